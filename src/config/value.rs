// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ordered map of option names to values, as supplied by the host.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// Whether a property can be changed after it is first set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyMutability {
    ReadOnly,
    ReadWrite,
}

/// A property name tagged with its mutability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyName {
    pub name: String,
    pub mutability: PropertyMutability,
}

impl PropertyName {
    pub fn read_only(name: &str) -> Self {
        Self {
            name: name.to_string(),
            mutability: PropertyMutability::ReadOnly,
        }
    }

    pub fn read_write(name: &str) -> Self {
        Self {
            name: name.to_string(),
            mutability: PropertyMutability::ReadWrite,
        }
    }

    pub fn is_mutable(&self) -> bool {
        self.mutability == PropertyMutability::ReadWrite
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A typed property or configuration value.
///
/// Untagged so that YAML and JSON option files deserialize naturally:
/// `true`, `4`, `"AUTO"` and `["a", "b"]` all map to the obvious variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    UInt(u64),
    Int(i64),
    Str(String),
    StrList(Vec<String>),
    Names(Vec<PropertyName>),
}

impl PropertyValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(value) => Some(*value),
            PropertyValue::Str(text) => match text.to_ascii_uppercase().as_str() {
                "YES" | "TRUE" => Some(true),
                "NO" | "FALSE" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            PropertyValue::UInt(value) => Some(*value),
            PropertyValue::Int(value) => u64::try_from(*value).ok(),
            PropertyValue::Str(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Str(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_str_list(&self) -> Option<&[String]> {
        match self {
            PropertyValue::StrList(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_names(&self) -> Option<&[PropertyName]> {
        match self {
            PropertyValue::Names(names) => Some(names),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<u32> for PropertyValue {
    fn from(value: u32) -> Self {
        PropertyValue::UInt(u64::from(value))
    }
}

impl From<u64> for PropertyValue {
    fn from(value: u64) -> Self {
        PropertyValue::UInt(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Str(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Str(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(value: Vec<String>) -> Self {
        PropertyValue::StrList(value)
    }
}

impl From<Vec<PropertyName>> for PropertyValue {
    fn from(value: Vec<PropertyName>) -> Self {
        PropertyValue::Names(value)
    }
}
