// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Element states checked by Fragment::test_state

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A boolean element state that can be asserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementState {
    /// Checked with `ElementHandle::is_displayed`
    Displayed,
    /// Checked with `ElementHandle::is_enabled`
    Enabled,
    /// Checked with `ElementHandle::is_selected`
    Selected,
}

impl ElementState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementState::Displayed => "displayed",
            ElementState::Enabled => "enabled",
            ElementState::Selected => "selected",
        }
    }
}

impl fmt::Display for ElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "displayed" => Ok(ElementState::Displayed),
            "enabled" => Ok(ElementState::Enabled),
            "selected" => Ok(ElementState::Selected),
            other => Err(Error::invalid_argument(format!(
                "test_state(selector, state): unsupported state '{}' (expected displayed, enabled or selected)",
                other
            ))),
        }
    }
}

/// One state or an ordered list of states for `Fragment::test_state`.
///
/// Built from `ElementState` values or from state names. Names are parsed
/// when the query is resolved, so an unknown name fails the call before any
/// element predicate runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateQuery(Vec<StateName>);

#[derive(Debug, Clone, PartialEq, Eq)]
enum StateName {
    Known(ElementState),
    Raw(String),
}

impl StateQuery {
    /// Resolves the query into concrete states, keeping order and duplicates.
    pub fn resolve(&self) -> Result<Vec<ElementState>> {
        if self.0.is_empty() {
            return Err(Error::invalid_argument(
                "test_state(selector, state): state must be a populated string or list",
            ));
        }

        self.0
            .iter()
            .map(|name| match name {
                StateName::Known(state) => Ok(*state),
                StateName::Raw(raw) if raw.is_empty() => Err(Error::invalid_argument(
                    "test_state(selector, state): state must be a populated string or list",
                )),
                StateName::Raw(raw) => raw.parse(),
            })
            .collect()
    }
}

impl From<ElementState> for StateQuery {
    fn from(state: ElementState) -> Self {
        StateQuery(vec![StateName::Known(state)])
    }
}

impl From<Vec<ElementState>> for StateQuery {
    fn from(states: Vec<ElementState>) -> Self {
        StateQuery(states.into_iter().map(StateName::Known).collect())
    }
}

impl From<&[ElementState]> for StateQuery {
    fn from(states: &[ElementState]) -> Self {
        StateQuery(states.iter().copied().map(StateName::Known).collect())
    }
}

impl<const N: usize> From<[ElementState; N]> for StateQuery {
    fn from(states: [ElementState; N]) -> Self {
        StateQuery(states.into_iter().map(StateName::Known).collect())
    }
}

impl From<&str> for StateQuery {
    fn from(name: &str) -> Self {
        StateQuery(vec![StateName::Raw(name.to_string())])
    }
}

impl From<Vec<&str>> for StateQuery {
    fn from(names: Vec<&str>) -> Self {
        StateQuery(names.into_iter().map(|n| StateName::Raw(n.to_string())).collect())
    }
}

impl<const N: usize> From<[&str; N]> for StateQuery {
    fn from(names: [&str; N]) -> Self {
        StateQuery(names.iter().map(|n| StateName::Raw(n.to_string())).collect())
    }
}
