//! Dimension Registry
//!
//! Static catalogue of the parameter axes a variant can vary along, and the
//! legal value domain of each. Lookup by name is case-insensitive and ignores
//! `-` and `_`, so `SourceChangeScope` and `source-change-scope` resolve to
//! the same dimension.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Sentinel used by text and enumeration dimensions that do not apply to a
/// particular variant shape.
pub const NOT_APPLICABLE: &str = "not-applicable";

/// Errors from validating a dimension name or value against the registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DimensionError {
    /// The name does not resolve to any registered dimension.
    #[error("unknown dimension '{0}'")]
    Unknown(String),

    /// The value is outside the dimension's declared domain.
    #[error("invalid value '{value}' for dimension '{dimension}' (expected {expected})")]
    InvalidValue {
        /// Dimension being validated
        dimension: Dimension,
        /// Raw value as supplied
        value: String,
        /// Human-readable description of the domain
        expected: String,
    },
}

/// A named axis along which benchmark variants differ
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Dimension {
    /// Package restore runs as part of the build
    Restore,
    /// Projects are built in parallel
    Parallel,
    /// SDK version of the modern tool
    ToolVersion,
    /// Build orchestrator flavor (`modern` or `legacy`)
    Orchestrator,
    /// Version of the legacy build engine, or `not-applicable`
    LegacyVersion,
    /// Target framework moniker of the built project
    TargetFramework,
    /// View precompilation during build
    CompileOnBuild,
    /// Worker node reuse across builds (legacy orchestrator only)
    NodeReuse,
    /// Which source file is touched before an incremental build
    SourceChangeScope,
}

/// Legal value domain of a dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// `true` or `false`
    Flag,
    /// Any non-empty string
    Text,
    /// One of a closed set of lowercase names
    Choice(&'static [&'static str]),
}

impl Domain {
    /// Describe the domain for error messages
    pub fn describe(self) -> String {
        match self {
            Domain::Flag => "true or false".to_string(),
            Domain::Text => "a non-empty string".to_string(),
            Domain::Choice(choices) => format!("one of {}", choices.join(", ")),
        }
    }
}

impl Dimension {
    /// Every registered dimension, in registry order
    pub const ALL: [Dimension; 9] = [
        Dimension::Restore,
        Dimension::Parallel,
        Dimension::ToolVersion,
        Dimension::Orchestrator,
        Dimension::LegacyVersion,
        Dimension::TargetFramework,
        Dimension::CompileOnBuild,
        Dimension::NodeReuse,
        Dimension::SourceChangeScope,
    ];

    /// Canonical kebab-case name
    pub fn name(self) -> &'static str {
        match self {
            Dimension::Restore => "restore",
            Dimension::Parallel => "parallel",
            Dimension::ToolVersion => "tool-version",
            Dimension::Orchestrator => "orchestrator",
            Dimension::LegacyVersion => "legacy-version",
            Dimension::TargetFramework => "target-framework",
            Dimension::CompileOnBuild => "compile-on-build",
            Dimension::NodeReuse => "node-reuse",
            Dimension::SourceChangeScope => "source-change-scope",
        }
    }

    /// Legal domain of this dimension
    pub fn domain(self) -> Domain {
        match self {
            Dimension::Restore
            | Dimension::Parallel
            | Dimension::CompileOnBuild
            | Dimension::NodeReuse => Domain::Flag,
            Dimension::ToolVersion | Dimension::LegacyVersion => Domain::Text,
            Dimension::Orchestrator => Domain::Choice(&["modern", "legacy"]),
            Dimension::TargetFramework => {
                Domain::Choice(&["netcoreapp2.0", "netcoreapp2.1", "net461"])
            }
            Dimension::SourceChangeScope => Domain::Choice(&[
                NOT_APPLICABLE,
                "leaf-file-changed",
                "root-file-changed",
            ]),
        }
    }

    /// Resolve a user-supplied dimension name
    pub fn lookup(name: &str) -> Result<Dimension, DimensionError> {
        let wanted = normalize(name);
        Dimension::ALL
            .into_iter()
            .find(|d| normalize(d.name()) == wanted)
            .ok_or_else(|| DimensionError::Unknown(name.trim().to_string()))
    }

    /// Parse a raw value against this dimension's domain.
    ///
    /// Text dimensions accept a trailing `*` as a prefix pattern; the pattern
    /// is kept verbatim and resolved by [`Value::matches`].
    pub fn parse_value(self, raw: &str) -> Result<Value, DimensionError> {
        let trimmed = raw.trim();
        let invalid = || DimensionError::InvalidValue {
            dimension: self,
            value: raw.to_string(),
            expected: self.domain().describe(),
        };

        match self.domain() {
            Domain::Flag => match trimmed.to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Flag(true)),
                "false" => Ok(Value::Flag(false)),
                _ => Err(invalid()),
            },
            Domain::Text => {
                if trimmed.is_empty() || trimmed == "*" {
                    Err(invalid())
                } else {
                    Ok(Value::Text(trimmed.to_string()))
                }
            }
            Domain::Choice(choices) => choices
                .iter()
                .find(|c| c.eq_ignore_ascii_case(trimmed))
                .map(|c| Value::Text((*c).to_string()))
                .ok_or_else(invalid),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
