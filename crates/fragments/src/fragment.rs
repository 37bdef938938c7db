// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Fragment - A composable group of element handles with verification helpers
//
// A Fragment owns a registry of selector -> handle entries and, optionally, a
// list of child fragments. Page objects embed a Fragment and implement
// PageFragment, overriding test_elements to add their own checks.
//
// Architecture:
// - Handles are resolved once, at registration, through the injected
//   ElementResolver and cached; lookups never re-resolve
// - The registry only grows; re-registering a selector replaces its handle
// - Fan-out checks (children, existence, multi-state) await every branch and
//   report the first failure in launch order

use crate::driver::{ElementHandle, ElementResolver, SelectMode};
use crate::error::{Error, Result};
use crate::keys::Keys;
use crate::state::{ElementState, StateQuery};
use async_trait::async_trait;
use futures_util::future::join_all;
use parking_lot::RwLock;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Registry of element handles keyed by selector, iterated in selector order.
type ElementRegistry = BTreeMap<String, Arc<dyn ElementHandle>>;

/// The capability contract shared by every fragment.
///
/// Implement it for page objects that embed a [`Fragment`]. Override
/// [`test_elements`](PageFragment::test_elements) to add checks beyond the
/// default existence pass; overrides usually start by awaiting the embedded
/// fragment's own `test_elements`.
///
/// # Example
///
/// ```ignore
/// use page_fragments::{Fragment, PageFragment, ElementState, Result};
/// use async_trait::async_trait;
///
/// const TERMS: &str = "#terms";
/// const INPUT: &str = "input[name=q]";
///
/// struct SearchForm {
///     base: Fragment,
/// }
///
/// #[async_trait]
/// impl PageFragment for SearchForm {
///     fn fragment(&self) -> &Fragment {
///         &self.base
///     }
///
///     async fn test_elements(&self) -> Result<()> {
///         self.base.test_elements().await?;
///         self.base.test_text(TERMS, "Terms").await?;
///         self.base.test_attribute(INPUT, "type", "text").await?;
///         self.base
///             .test_state(INPUT, [ElementState::Displayed, ElementState::Enabled])
///             .await
///     }
/// }
/// ```
#[async_trait]
pub trait PageFragment: AsAnyArc + Send + Sync {
    /// Returns the embedded fragment holding this page object's elements.
    fn fragment(&self) -> &Fragment;

    /// Verifies this fragment and all of its children.
    async fn test_elements(&self) -> Result<()> {
        self.fragment().test_elements().await
    }
}

/// Conversion to `Arc<dyn Any>` used for typed fragment lookups.
///
/// Implemented for every `'static` type; never implement it by hand.
#[doc(hidden)]
pub trait AsAnyArc {
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAnyArc for T {
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// A group of related page elements, optionally composed of child fragments.
///
/// # Example
///
/// ```ignore
/// use page_fragments::{Fragment, PageFragment};
/// use std::sync::Arc;
///
/// let logo = Arc::new(Fragment::new(resolver.clone()));
/// logo.set_element("#logo")?;
///
/// let page = Fragment::with_children(resolver, vec![logo as Arc<dyn PageFragment>]);
/// page.set_element("form")?;
///
/// // Checks the logo fragment, then the form
/// page.test_elements().await?;
/// ```
pub struct Fragment {
    resolver: Arc<dyn ElementResolver>,
    elements: RwLock<ElementRegistry>,
    children: Option<Vec<Arc<dyn PageFragment>>>,
}

impl Fragment {
    /// Creates a fragment with no children.
    pub fn new(resolver: Arc<dyn ElementResolver>) -> Self {
        Self {
            resolver,
            elements: RwLock::new(BTreeMap::new()),
            children: None,
        }
    }

    /// Creates a fragment composed of the given child fragments.
    ///
    /// Children are verified (concurrently) before this fragment's own
    /// elements in [`test_elements`](Fragment::test_elements).
    pub fn with_children(
        resolver: Arc<dyn ElementResolver>,
        children: Vec<Arc<dyn PageFragment>>,
    ) -> Self {
        Self {
            resolver,
            elements: RwLock::new(BTreeMap::new()),
            children: Some(children),
        }
    }

    /// Returns the child fragments in construction order.
    pub fn children(&self) -> &[Arc<dyn PageFragment>] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Returns the registered selectors, sorted.
    pub fn selectors(&self) -> Vec<String> {
        self.elements.read().keys().cloned().collect()
    }

    /// Returns the handle registered for `selector`.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` if `selector` is empty
    /// - `Error::ElementNotFound` if `selector` was never registered
    pub fn get_element(&self, selector: &str) -> Result<Arc<dyn ElementHandle>> {
        if selector.is_empty() {
            return Err(Error::invalid_argument(
                "get_element(selector): selector must be a populated string",
            ));
        }

        self.elements
            .read()
            .get(selector)
            .cloned()
            .ok_or_else(|| Error::ElementNotFound(selector.to_string()))
    }

    /// Resolves the first element matching `selector` and registers it.
    ///
    /// Replaces any handle previously registered under the same selector.
    pub fn set_element(&self, selector: &str) -> Result<Arc<dyn ElementHandle>> {
        self.register(selector, SelectMode::Single)
    }

    /// Resolves every element matching `selector` and registers the group.
    pub fn set_elements(&self, selector: &str) -> Result<Arc<dyn ElementHandle>> {
        self.register(selector, SelectMode::All)
    }

    fn register(&self, selector: &str, mode: SelectMode) -> Result<Arc<dyn ElementHandle>> {
        if selector.is_empty() {
            return Err(Error::invalid_argument(
                "set_element(selector): selector must be a populated string",
            ));
        }

        let handle = self.resolver.resolve(selector, mode);
        tracing::debug!("Registered element '{}' ({:?})", selector, mode);
        self.elements
            .write()
            .insert(selector.to_string(), Arc::clone(&handle));
        Ok(handle)
    }

    /// Verifies the whole composition tree.
    ///
    /// Runs every child's `test_elements` concurrently and waits for all of
    /// them, then runs [`test_exists`](Fragment::test_exists) on this
    /// fragment. Every check runs even if an earlier one failed; the first
    /// failure (children in order, then the local check) is returned.
    pub async fn test_elements(&self) -> Result<()> {
        let children = self.children();
        let mut results = if children.is_empty() {
            Vec::new()
        } else {
            join_all(children.iter().map(|child| child.test_elements())).await
        };

        results.push(self.test_exists().await);
        settle("test_elements", results)
    }

    /// Asserts that every registered element is present in the page.
    ///
    /// All existence checks run concurrently.
    pub async fn test_exists(&self) -> Result<()> {
        let registered: Vec<(String, Arc<dyn ElementHandle>)> = self
            .elements
            .read()
            .iter()
            .map(|(selector, handle)| (selector.clone(), Arc::clone(handle)))
            .collect();

        let checks = registered.iter().map(|(selector, handle)| async move {
            if handle.exists().await? {
                Ok(())
            } else {
                Err(Error::assertion(format!(
                    "Expected element '{}' to exist, but it was not present",
                    selector
                )))
            }
        });

        settle("test_exists", join_all(checks).await)
    }

    /// Asserts that the element's text equals `expected` exactly.
    ///
    /// No trimming or whitespace normalization is applied.
    pub async fn test_text(&self, selector: &str, expected: &str) -> Result<()> {
        if expected.is_empty() {
            return Err(Error::invalid_argument(
                "test_text(selector, text): text must be a populated string",
            ));
        }

        let actual = self.get_element(selector)?.text().await?;
        if actual == expected {
            Ok(())
        } else {
            Err(Error::assertion(format!(
                "Expected element '{}' to have text '{}', but had '{}'",
                selector, expected, actual
            )))
        }
    }

    /// Asserts one or more boolean states of an element.
    ///
    /// Accepts a single [`ElementState`], a state name, or an ordered list of
    /// either. Each state is checked concurrently; duplicates are checked
    /// once per occurrence.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` if the query is empty or names an unknown
    ///   state (no predicate is invoked)
    /// - `Error::AssertionFailed` if any state is false
    pub async fn test_state(&self, selector: &str, state: impl Into<StateQuery>) -> Result<()> {
        let states = state.into().resolve()?;
        let handle = self.get_element(selector)?;

        let checks = states
            .iter()
            .map(|state| check_state(handle.as_ref(), selector, *state));

        settle("test_state", join_all(checks).await)
    }

    /// Asserts that the element's `attribute` equals `expected` exactly.
    ///
    /// A missing attribute never matches.
    pub async fn test_attribute(
        &self,
        selector: &str,
        attribute: &str,
        expected: &str,
    ) -> Result<()> {
        if attribute.is_empty() {
            return Err(Error::invalid_argument(
                "test_attribute(selector, attribute, text): attribute must be a populated string",
            ));
        }
        if expected.is_empty() {
            return Err(Error::invalid_argument(
                "test_attribute(selector, attribute, text): text must be a populated string",
            ));
        }

        match self.get_element(selector)?.attribute(attribute).await? {
            Some(actual) if actual == expected => Ok(()),
            Some(actual) => Err(Error::assertion(format!(
                "Expected element '{}' to have attribute '{}'='{}', but had '{}'",
                selector, attribute, expected, actual
            ))),
            None => Err(Error::assertion(format!(
                "Expected element '{}' to have attribute '{}'='{}', but it was not set",
                selector, attribute, expected
            ))),
        }
    }

    /// Clears the value of the element.
    pub async fn element_clear(&self, selector: &str) -> Result<()> {
        self.get_element(selector)?.clear().await
    }

    /// Clicks the element.
    pub async fn element_click(&self, selector: &str) -> Result<()> {
        self.get_element(selector)?.click().await
    }

    /// Types `keys` into the element as a single input action.
    ///
    /// A list of keys is sent in one driver call, equivalent to typing the
    /// entries back to back.
    pub async fn element_send_keys(&self, selector: &str, keys: impl Into<Keys>) -> Result<()> {
        let keys = keys.into();
        keys.validate()?;
        self.get_element(selector)?.send_keys(&keys).await
    }

    /// Submits the form the element belongs to.
    pub async fn element_submit(&self, selector: &str) -> Result<()> {
        self.get_element(selector)?.submit().await
    }
}

impl PageFragment for Fragment {
    fn fragment(&self) -> &Fragment {
        self
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fragment")
            .field("selectors", &self.selectors())
            .field("children", &self.children().len())
            .finish()
    }
}

async fn check_state(handle: &dyn ElementHandle, selector: &str, state: ElementState) -> Result<()> {
    let holds = match state {
        ElementState::Displayed => handle.is_displayed().await?,
        ElementState::Enabled => handle.is_enabled().await?,
        ElementState::Selected => handle.is_selected().await?,
    };

    if holds {
        Ok(())
    } else {
        Err(Error::assertion(format!(
            "Expected element '{}' to be {}, but it was not",
            selector, state
        )))
    }
}

/// Joins fan-out results: the first failure wins, later ones are logged.
fn settle(operation: &str, results: Vec<Result<()>>) -> Result<()> {
    let mut first = None;
    for result in results {
        if let Err(err) = result {
            if first.is_none() {
                first = Some(err);
            } else {
                tracing::warn!("{}: additional failure: {}", operation, err);
            }
        }
    }

    match first {
        Some(err) => {
            tracing::warn!("{} failed: {}", operation, err);
            Err(err)
        }
        None => Ok(()),
    }
}
