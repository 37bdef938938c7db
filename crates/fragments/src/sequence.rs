// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Sequence - An ordered, fail-fast pipeline of test and action steps
//
// A Sequence keeps named fragments for step construction and an append-only
// list of steps. run_sequence awaits each step before starting the next and
// stops at the first failure, returning that step's error unchanged.

use crate::driver::Navigator;
use crate::error::{Error, Result};
use crate::fragment::PageFragment;
use futures_util::future::BoxFuture;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

/// A process-wide unique fragment key.
///
/// Two symbols created with the same description are still different keys.
#[derive(Clone)]
pub struct SymbolKey {
    id: u64,
    description: Arc<str>,
}

impl SymbolKey {
    pub fn new(description: &str) -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: Arc::from(description),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for SymbolKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SymbolKey {}

impl Hash for SymbolKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})#{}", self.description, self.id)
    }
}

/// Key under which a fragment is registered in a [`Sequence`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FragmentKey {
    Name(String),
    Symbol(SymbolKey),
}

impl FragmentKey {
    fn validate(&self, operation: &str) -> Result<()> {
        match self {
            FragmentKey::Name(name) if name.is_empty() => Err(Error::invalid_argument(format!(
                "{}: key must be a populated string or symbol",
                operation
            ))),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for FragmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentKey::Name(name) => f.write_str(name),
            FragmentKey::Symbol(symbol) => write!(f, "Symbol({})", symbol.description),
        }
    }
}

impl From<&str> for FragmentKey {
    fn from(name: &str) -> Self {
        FragmentKey::Name(name.to_string())
    }
}

impl From<String> for FragmentKey {
    fn from(name: String) -> Self {
        FragmentKey::Name(name)
    }
}

impl From<SymbolKey> for FragmentKey {
    fn from(symbol: SymbolKey) -> Self {
        FragmentKey::Symbol(symbol)
    }
}

impl From<&SymbolKey> for FragmentKey {
    fn from(symbol: &SymbolKey) -> Self {
        FragmentKey::Symbol(symbol.clone())
    }
}

/// Future returned by a step.
pub type StepFuture = BoxFuture<'static, Result<()>>;

/// A zero-argument callable producing one async step outcome.
///
/// Steps are `Fn`, so a sequence can be run more than once.
pub struct Step(Box<dyn Fn() -> StepFuture + Send + Sync>);

impl Step {
    fn invoke(&self) -> StepFuture {
        (self.0)()
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Step")
    }
}

/// Boxes a closure returning a future into a [`Step`].
///
/// # Example
///
/// ```ignore
/// let home = Arc::clone(&home);
/// let check = step(move || {
///     let home = Arc::clone(&home);
///     async move { home.test_elements().await }
/// });
/// ```
pub fn step<F, Fut>(f: F) -> Step
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    Step(Box::new(move || -> StepFuture { Box::pin(f()) }))
}

/// An ordered pipeline of steps plus the fragments they act on.
///
/// # Example
///
/// ```ignore
/// use page_fragments::{Sequence, step};
/// use std::sync::Arc;
///
/// let mut sequence = Sequence::new(navigator);
/// let home = sequence.set_fragment("home", Arc::new(HomePage::new(resolver)))?;
///
/// sequence.set_steps([
///     sequence.navigation_step("/"),
///     step({
///         let home = Arc::clone(&home);
///         move || {
///             let home = Arc::clone(&home);
///             async move { home.test_elements().await }
///         }
///     }),
/// ]);
///
/// sequence.run_sequence().await?;
/// ```
pub struct Sequence {
    navigator: Arc<dyn Navigator>,
    fragments: HashMap<FragmentKey, Arc<dyn PageFragment>>,
    steps: Vec<Step>,
}

impl Sequence {
    /// Creates an empty sequence that navigates through `navigator`.
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            navigator,
            fragments: HashMap::new(),
            steps: Vec::new(),
        }
    }

    /// Returns the fragment registered under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `key` is an empty name.
    pub fn get_fragment(&self, key: impl Into<FragmentKey>) -> Result<Option<Arc<dyn PageFragment>>> {
        let key = key.into();
        key.validate("get_fragment(key)")?;
        Ok(self.fragments.get(&key).cloned())
    }

    /// Registers `fragment` under `key` and hands it back.
    ///
    /// The returned `Arc` keeps its concrete type so steps can capture it.
    /// A key that is already registered is overwritten.
    pub fn set_fragment<F>(&mut self, key: impl Into<FragmentKey>, fragment: Arc<F>) -> Result<Arc<F>>
    where
        F: PageFragment + 'static,
    {
        let key = key.into();
        key.validate("set_fragment(key, fragment)")?;
        tracing::debug!("Registered fragment '{}'", key);
        self.fragments
            .insert(key, Arc::clone(&fragment) as Arc<dyn PageFragment>);
        Ok(fragment)
    }

    /// Returns the fragment registered under `key` as its concrete type.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` if `key` is an empty name
    /// - `Error::FragmentNotFound` if nothing is registered under `key`
    /// - `Error::WrongType` if the registered fragment is not an `F`
    pub fn fragment_as<F>(&self, key: impl Into<FragmentKey>) -> Result<Arc<F>>
    where
        F: PageFragment + 'static,
    {
        let key = key.into();
        let fragment = self
            .get_fragment(key.clone())?
            .ok_or_else(|| Error::FragmentNotFound(key.to_string()))?;

        fragment
            .into_any_arc()
            .downcast::<F>()
            .map_err(|_| Error::WrongType {
                key: key.to_string(),
                expected: std::any::type_name::<F>(),
            })
    }

    /// Appends one step.
    pub fn set_step<F, Fut>(&mut self, f: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.steps.push(step(f));
    }

    /// Appends each step in iteration order.
    pub fn set_steps(&mut self, steps: impl IntoIterator<Item = Step>) {
        self.steps.extend(steps);
    }

    /// Number of registered steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the injected navigator.
    pub fn navigator(&self) -> Arc<dyn Navigator> {
        Arc::clone(&self.navigator)
    }

    /// Navigates the session to `path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `path` is empty; otherwise the
    /// navigator's outcome is returned unchanged.
    pub async fn navigate_to(&self, path: &str) -> Result<()> {
        navigate(self.navigator.as_ref(), path).await
    }

    /// Builds a step that navigates to `path` when run.
    pub fn navigation_step(&self, path: impl Into<String>) -> Step {
        let navigator = Arc::clone(&self.navigator);
        let path: String = path.into();
        let path: Arc<str> = Arc::from(path);
        step(move || {
            let navigator = Arc::clone(&navigator);
            let path = Arc::clone(&path);
            async move { navigate(navigator.as_ref(), &path).await }
        })
    }

    /// Runs every step in registration order.
    ///
    /// Each step finishes before the next one starts. The first failing
    /// step ends the run; later steps are never invoked and its error is
    /// returned as-is.
    pub async fn run_sequence(&self) -> Result<()> {
        let total = self.steps.len();

        for (index, step) in self.steps.iter().enumerate() {
            tracing::debug!("Running step {}/{}", index + 1, total);
            if let Err(err) = step.invoke().await {
                tracing::warn!(
                    "Step {}/{} failed, skipping {} remaining: {}",
                    index + 1,
                    total,
                    total - index - 1,
                    err
                );
                return Err(err);
            }
        }

        tracing::debug!("Sequence completed ({} steps)", total);
        Ok(())
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("fragments", &self.fragments.keys().collect::<Vec<_>>())
            .field("steps", &self.steps.len())
            .finish()
    }
}

async fn navigate(navigator: &dyn Navigator, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(Error::invalid_argument(
            "navigate_to(path): path must be a populated string",
        ));
    }

    tracing::debug!("Navigating to '{}'", path);
    navigator.navigate(path).await
}
