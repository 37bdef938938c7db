// Shared test fixtures - Recording substitutes for the browser driver
//
// FakeResolver hands out FakeElement handles and remembers every resolve call.
// FakeElement answers queries from a configurable Behavior and records each
// driver call by name. FakeNavigator records visited paths.

// Note: Items appear "unused" because each test binary compiles separately,
// but they ARE used across multiple test files. Suppress false-positive warnings.
#![allow(dead_code)]

use async_trait::async_trait;
use page_fragments::{
    ElementHandle, ElementResolver, Error, Fragment, Keys, Navigator, PageFragment, Result,
    SelectMode,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};

static TRACING: Once = Once::new();

/// Installs a tracing subscriber once per test binary (RUST_LOG controls output).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// What a fake element reports when queried.
#[derive(Debug, Clone)]
pub struct Behavior {
    pub exists: bool,
    pub displayed: bool,
    pub enabled: bool,
    pub selected: bool,
    pub text: String,
    pub attributes: HashMap<String, String>,
    /// When set, every driver call fails with this message
    pub failure: Option<String>,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            exists: true,
            displayed: true,
            enabled: true,
            selected: true,
            text: String::new(),
            attributes: HashMap::new(),
            failure: None,
        }
    }
}

pub struct FakeElement {
    pub selector: String,
    pub mode: SelectMode,
    behavior: Mutex<Behavior>,
    calls: Mutex<Vec<String>>,
    sent_keys: Mutex<Vec<Vec<String>>>,
}

impl FakeElement {
    pub fn new(selector: &str, mode: SelectMode) -> Self {
        Self {
            selector: selector.to_string(),
            mode,
            behavior: Mutex::new(Behavior::default()),
            calls: Mutex::new(Vec::new()),
            sent_keys: Mutex::new(Vec::new()),
        }
    }

    pub fn configure(&self, f: impl FnOnce(&mut Behavior)) {
        f(&mut self.behavior.lock());
    }

    /// Driver calls made on this element, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.as_str() == name).count()
    }

    /// Key entries received by each send_keys call.
    pub fn sent_keys(&self) -> Vec<Vec<String>> {
        self.sent_keys.lock().clone()
    }

    fn record(&self, name: &str) -> Result<Behavior> {
        self.calls.lock().push(name.to_string());
        let behavior = self.behavior.lock().clone();
        match &behavior.failure {
            Some(message) => Err(Error::driver(message.clone())),
            None => Ok(behavior),
        }
    }
}

#[async_trait]
impl ElementHandle for FakeElement {
    async fn exists(&self) -> Result<bool> {
        Ok(self.record("exists")?.exists)
    }

    async fn is_displayed(&self) -> Result<bool> {
        Ok(self.record("is_displayed")?.displayed)
    }

    async fn is_enabled(&self) -> Result<bool> {
        Ok(self.record("is_enabled")?.enabled)
    }

    async fn is_selected(&self) -> Result<bool> {
        Ok(self.record("is_selected")?.selected)
    }

    async fn text(&self) -> Result<String> {
        Ok(self.record("text")?.text)
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.record("attribute")?.attributes.get(name).cloned())
    }

    async fn clear(&self) -> Result<()> {
        self.record("clear").map(|_| ())
    }

    async fn click(&self) -> Result<()> {
        self.record("click").map(|_| ())
    }

    async fn send_keys(&self, keys: &Keys) -> Result<()> {
        self.record("send_keys")?;
        self.sent_keys.lock().push(keys.entries().to_vec());
        Ok(())
    }

    async fn submit(&self) -> Result<()> {
        self.record("submit").map(|_| ())
    }
}

/// Resolver that creates a fresh FakeElement on every resolve call.
#[derive(Default)]
pub struct FakeResolver {
    latest: Mutex<HashMap<String, Arc<FakeElement>>>,
    resolved: Mutex<Vec<(String, SelectMode)>>,
}

impl FakeResolver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// The element most recently resolved for `selector`.
    pub fn element(&self, selector: &str) -> Arc<FakeElement> {
        self.latest
            .lock()
            .get(selector)
            .cloned()
            .unwrap_or_else(|| panic!("selector '{}' was never resolved", selector))
    }

    pub fn resolved(&self) -> Vec<(String, SelectMode)> {
        self.resolved.lock().clone()
    }
}

impl ElementResolver for FakeResolver {
    fn resolve(&self, selector: &str, mode: SelectMode) -> Arc<dyn ElementHandle> {
        let element = Arc::new(FakeElement::new(selector, mode));
        self.resolved.lock().push((selector.to_string(), mode));
        self.latest
            .lock()
            .insert(selector.to_string(), Arc::clone(&element));
        element
    }
}

/// Navigator that records every path and can be told to fail.
#[derive(Default)]
pub struct FakeNavigator {
    visited: Mutex<Vec<String>>,
    failure: Mutex<Option<String>>,
}

impl FakeNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock() = Some(message.to_string());
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().clone()
    }
}

#[async_trait]
impl Navigator for FakeNavigator {
    async fn navigate(&self, path: &str) -> Result<()> {
        self.visited.lock().push(path.to_string());
        match self.failure.lock().clone() {
            Some(message) => Err(Error::driver(message)),
            None => Ok(()),
        }
    }
}

/// Page object that counts test_elements calls and can be forced to fail.
pub struct ProbeFragment {
    base: Fragment,
    calls: AtomicUsize,
    failure: Option<String>,
}

impl ProbeFragment {
    pub fn new(resolver: Arc<dyn ElementResolver>, failure: Option<&str>) -> Self {
        Self {
            base: Fragment::new(resolver),
            calls: AtomicUsize::new(0),
            failure: failure.map(str::to_string),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFragment for ProbeFragment {
    fn fragment(&self) -> &Fragment {
        &self.base
    }

    async fn test_elements(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.base.test_elements().await?;
        match &self.failure {
            Some(message) => Err(Error::AssertionFailed(message.clone())),
            None => Ok(()),
        }
    }
}
