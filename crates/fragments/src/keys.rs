// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Keys - Keyboard input for element_send_keys
//
// A single string or an ordered list of strings. A list is still one logical
// input action: drivers receive the whole list in a single send_keys call.

use crate::error::{Error, Result};

/// Keyboard input sent to an element as one action.
///
/// # Example
///
/// ```ignore
/// use page_fragments::Keys;
///
/// let single: Keys = "hello".into();
/// let chord: Keys = ["hello", " ", "world"].into();
/// assert_eq!(chord.concat(), "hello world");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keys {
    Single(String),
    List(Vec<String>),
}

impl Keys {
    /// Returns the individual key entries in order.
    pub fn entries(&self) -> &[String] {
        match self {
            Keys::Single(value) => std::slice::from_ref(value),
            Keys::List(values) => values,
        }
    }

    /// Returns all entries joined into a single key sequence.
    pub fn concat(&self) -> String {
        self.entries().concat()
    }

    /// An empty string or an empty list is rejected; a list of empty
    /// strings is not.
    pub(crate) fn validate(&self) -> Result<()> {
        let empty = match self {
            Keys::Single(value) => value.is_empty(),
            Keys::List(values) => values.is_empty(),
        };
        if empty {
            return Err(Error::invalid_argument(
                "element_send_keys(selector, keys): keys must be a populated string or list",
            ));
        }
        Ok(())
    }
}

impl From<&str> for Keys {
    fn from(value: &str) -> Self {
        Keys::Single(value.to_string())
    }
}

impl From<String> for Keys {
    fn from(value: String) -> Self {
        Keys::Single(value)
    }
}

impl From<Vec<String>> for Keys {
    fn from(value: Vec<String>) -> Self {
        Keys::List(value)
    }
}

impl From<Vec<&str>> for Keys {
    fn from(value: Vec<&str>) -> Self {
        Keys::List(value.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for Keys {
    fn from(value: &[&str]) -> Self {
        Keys::List(value.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Keys {
    fn from(value: [&str; N]) -> Self {
        Keys::List(value.iter().map(|s| s.to_string()).collect())
    }
}
