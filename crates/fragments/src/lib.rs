//! page-fragments: Composable page objects and step sequences for end-to-end UI tests
//!
//! A [`Fragment`] groups element handles resolved from selectors and can be
//! nested inside other fragments. A [`Sequence`] holds named fragments and an
//! ordered list of async steps, and runs them one after another, stopping at
//! the first failure.
//!
//! The browser driver is not part of this crate: fragments resolve selectors
//! through an injected [`ElementResolver`], and sequences navigate through an
//! injected [`Navigator`].
//!
//! # Examples
//!
//! ## Page Objects
//!
//! ```ignore
//! use async_trait::async_trait;
//! use page_fragments::{ElementResolver, ElementState, Fragment, PageFragment, Result};
//! use std::sync::Arc;
//!
//! const FORM: &str = "form";
//! const INPUT: &str = "input[name=q]";
//!
//! pub struct SearchPage {
//!     base: Fragment,
//! }
//!
//! impl SearchPage {
//!     pub fn new(resolver: Arc<dyn ElementResolver>, children: Vec<Arc<dyn PageFragment>>) -> Result<Self> {
//!         let base = Fragment::with_children(resolver, children);
//!         base.set_element(FORM)?;
//!         base.set_element(INPUT)?;
//!         Ok(Self { base })
//!     }
//! }
//!
//! #[async_trait]
//! impl PageFragment for SearchPage {
//!     fn fragment(&self) -> &Fragment {
//!         &self.base
//!     }
//!
//!     async fn test_elements(&self) -> Result<()> {
//!         self.base.test_elements().await?;
//!         self.base.test_attribute(INPUT, "type", "text").await?;
//!         self.base.test_state(INPUT, [ElementState::Displayed, ElementState::Enabled]).await
//!     }
//! }
//! ```
//!
//! ## Sequences
//!
//! ```ignore
//! use page_fragments::{Sequence, step};
//! use std::sync::Arc;
//!
//! let mut sequence = Sequence::new(navigator);
//! let search = sequence.set_fragment("search", Arc::new(SearchPage::new(resolver, vec![])?))?;
//!
//! let nav = sequence.navigation_step("/");
//! sequence.set_steps([nav]);
//! sequence.set_step({
//!     let search = Arc::clone(&search);
//!     move || {
//!         let search = Arc::clone(&search);
//!         async move { search.test_elements().await }
//!     }
//! });
//! sequence.set_step({
//!     let search = Arc::clone(&search);
//!     move || {
//!         let search = Arc::clone(&search);
//!         async move {
//!             search.fragment().element_send_keys(INPUT, ["rust", " lang"]).await?;
//!             search.fragment().element_submit(FORM).await
//!         }
//!     }
//! });
//!
//! sequence.run_sequence().await?;
//! ```

pub mod config;
pub mod driver;
mod error;
pub mod fragment;
pub mod keys;
pub mod sequence;
pub mod state;

// Re-export error types
pub use error::{Error, Result};

// Re-export driver contracts
pub use driver::{ElementHandle, ElementResolver, Navigator, SelectMode};

// Re-export fragment and sequence API
pub use fragment::{Fragment, PageFragment};
pub use sequence::{FragmentKey, Sequence, Step, StepFuture, SymbolKey, step};

// Re-export argument types
pub use keys::Keys;
pub use state::{ElementState, StateQuery};

// Re-export runner configuration
pub use config::RunnerConfig;
