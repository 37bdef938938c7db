// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Driver - Collaborator contracts consumed by Fragment and Sequence
//
// The browser-automation driver is not part of this crate. Fragments resolve
// selectors through an injected ElementResolver and act on the returned
// ElementHandle; a Sequence navigates through an injected Navigator.
//
// Architecture:
// - Resolution is lazy: a handle re-queries the page whenever it is used,
//   so resolving a selector cannot fail
// - Every element query and action is async and may fail with Error::Driver
// - Handles are shared as Arc<dyn ElementHandle>; Fragment caches the Arc it
//   got at registration time and never re-resolves

use crate::error::Result;
use crate::keys::Keys;
use async_trait::async_trait;
use std::sync::Arc;

/// How many elements a selector resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectMode {
    /// The first matching element
    #[default]
    Single,
    /// Every matching element
    All,
}

/// A resolved reference to one element (or a group of elements for
/// `SelectMode::All`) on the page.
#[async_trait]
pub trait ElementHandle: Send + Sync {
    /// Returns whether the element is currently present in the page.
    async fn exists(&self) -> Result<bool>;

    async fn is_displayed(&self) -> Result<bool>;

    async fn is_enabled(&self) -> Result<bool>;

    async fn is_selected(&self) -> Result<bool>;

    /// Returns the element's text content.
    async fn text(&self) -> Result<String>;

    /// Returns the value of the named attribute, or `None` if it is not set.
    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    async fn clear(&self) -> Result<()>;

    async fn click(&self) -> Result<()>;

    /// Sends all keys as a single input action.
    async fn send_keys(&self, keys: &Keys) -> Result<()>;

    async fn submit(&self) -> Result<()>;
}

/// Turns a selector into an element handle.
pub trait ElementResolver: Send + Sync {
    fn resolve(&self, selector: &str, mode: SelectMode) -> Arc<dyn ElementHandle>;
}

/// Browser session navigation.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Loads `path` (usually relative to the session's base URL).
    async fn navigate(&self, path: &str) -> Result<()>;
}
