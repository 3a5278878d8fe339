//! Curated mapping tables.
//!
//! The tables are written and maintained by hand between runs; the generator
//! only reads them. Every map keeps the order of the config file, which is
//! the order declarations are emitted in.

use crate::{ConfigError, Result};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// A C type spelling mapped to a Go type.
///
/// In TOML either a plain string (`"int" = "int"`) or a table
/// (`"fooHandle_t" = { go = "Foo", wrapper = true }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TypeMappingRepr")]
pub struct TypeMapping {
    /// Go type name.
    pub go: String,
    /// The Go type is one of the generated wrapper structs (holds `internal`).
    pub wrapper: bool,
}

impl TypeMapping {
    pub fn plain(go: impl Into<String>) -> Self {
        Self { go: go.into(), wrapper: false }
    }

    pub fn wrapper(go: impl Into<String>) -> Self {
        Self { go: go.into(), wrapper: true }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeMappingRepr {
    Name(String),
    Full {
        go: String,
        #[serde(default)]
        wrapper: bool,
    },
}

impl From<TypeMappingRepr> for TypeMapping {
    fn from(repr: TypeMappingRepr) -> Self {
        match repr {
            TypeMappingRepr::Name(go) => Self::plain(go),
            TypeMappingRepr::Full { go, wrapper } => Self { go, wrapper },
        }
    }
}

/// All curated tables consumed by one generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tables {
    /// Raw C names excluded from generation entirely.
    pub ignored: IndexSet<String>,

    /// Enum name → Go type name.
    pub enums: IndexMap<String, String>,

    /// C type spelling (`int`, `float*`, `fooHandle_t`) → Go type.
    pub types: IndexMap<String, TypeMapping>,

    /// Receiver C type → functions that become methods on it.
    pub methods: IndexMap<String, Vec<String>>,

    /// Raw function name → Go method name.
    pub method_names: IndexMap<String, String>,

    /// Handle C type → setter functions that configure it.
    pub setters: IndexMap<String, Vec<String>>,

    /// Handle C type → creation functions. The first entry is used.
    pub creations: IndexMap<String, Vec<String>>,

    /// Handle C type → destruction functions. The first entry is used.
    pub destructions: IndexMap<String, Vec<String>>,

    /// Function name → parameter positions that are outputs (returned in Go).
    pub return_params: IndexMap<String, Vec<usize>>,

    /// C return type that signals success/failure, translated to a Go `error`.
    pub status_type: Option<String>,

    /// Library prefix stripped when deriving method names, e.g. `cudnn`.
    pub prefix: Option<String>,
}

impl Tables {
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored.contains(name)
    }

    pub fn creation_for(&self, handle: &str) -> Option<&str> {
        self.creations.get(handle).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn destruction_for(&self, handle: &str) -> Option<&str> {
        self.destructions.get(handle).and_then(|v| v.first()).map(String::as_str)
    }

    /// Output positions for `function`; empty when none are listed.
    pub fn return_positions(&self, function: &str) -> &[usize] {
        self.return_params.get(function).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_status(&self, c_type: &str) -> bool {
        self.status_type.as_deref() == Some(c_type)
    }

    /// Validate table contents.
    pub fn validate(&self) -> Result<()> {
        for (handle, fns) in &self.setters {
            if fns.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "tables.setters.{handle} must list at least one function"
                )));
            }
        }
        for (receiver, fns) in &self.methods {
            if fns.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "tables.methods.{receiver} must list at least one function"
                )));
            }
        }
        Ok(())
    }
}
