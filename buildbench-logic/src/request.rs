//! Selection requests and filter parsing
//!
//! A request is parsed once from user input and never changes afterwards.
//! Every dimension token is validated against the registry while parsing, so
//! a malformed request fails before any filtering runs.
//!
//! Parameter syntax: comma-separated `dimension=value1|value2` tokens. A token
//! without `=` continues the value list of the preceding dimension, so
//! `restore=true,false` means the same as `restore=true|false`. A bare
//! dimension name in that position is a filter missing its `=` and is
//! rejected as malformed.

use buildbench_core::{Dimension, DimensionError, Value};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Errors from parsing a selection request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RequestError {
    /// Token is not of the form `dimension=values`.
    #[error("malformed filter '{token}': expected dimension=value1|value2")]
    MalformedFilter {
        /// Offending token
        token: String,
    },

    /// Token names a dimension that is not registered.
    #[error("unknown dimension '{name}' in filter '{token}'")]
    UnknownDimension {
        /// Offending token
        token: String,
        /// Dimension name as supplied
        name: String,
    },

    /// Token carries a value outside the dimension's domain.
    #[error("invalid value '{value}' for dimension '{dimension}' in filter '{token}' (expected {expected})")]
    InvalidValue {
        /// Offending token
        token: String,
        /// Dimension being filtered
        dimension: Dimension,
        /// Value as supplied
        value: String,
        /// Description of the legal domain
        expected: String,
    },
}

impl RequestError {
    /// The filter token that caused the failure
    pub fn token(&self) -> &str {
        match self {
            RequestError::MalformedFilter { token }
            | RequestError::UnknownDimension { token, .. }
            | RequestError::InvalidValue { token, .. } => token,
        }
    }

    fn from_dimension(token: &str, err: DimensionError) -> Self {
        match err {
            DimensionError::Unknown(name) => RequestError::UnknownDimension {
                token: token.to_string(),
                name,
            },
            DimensionError::InvalidValue {
                dimension,
                value,
                expected,
            } => RequestError::InvalidValue {
                token: token.to_string(),
                dimension,
                value,
                expected,
            },
            _ => RequestError::MalformedFilter {
                token: token.to_string(),
            },
        }
    }
}

/// Run settings passed through to the execution engine untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Measured iterations per variant
    pub iterations: u32,
    /// Warm-up iterations per variant
    pub warmup: u32,
    /// Debug mode for the engine
    pub debug: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: 1,
            warmup: 0,
            debug: false,
        }
    }
}

/// What the user asked to run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionRequest {
    /// Lowercased substrings matched against type names
    pub type_substrings: BTreeSet<String>,
    /// Lowercased substrings matched against operation names
    pub method_substrings: BTreeSet<String>,
    /// Accepted values per explicitly constrained dimension
    pub dimension_filters: BTreeMap<Dimension, BTreeSet<Value>>,
    /// Pass-through run settings
    pub run_config: RunConfig,
}

impl SelectionRequest {
    /// Parse the three comma-separated filter strings
    pub fn parse(
        types: &str,
        methods: &str,
        parameters: &str,
        run_config: RunConfig,
    ) -> Result<Self, RequestError> {
        Ok(Self {
            type_substrings: parse_substrings(types),
            method_substrings: parse_substrings(methods),
            dimension_filters: parse_parameters(parameters)?,
            run_config,
        })
    }

    /// Add type-name substrings
    pub fn with_types<I, S>(mut self, substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.type_substrings
            .extend(substrings.into_iter().map(|s| s.as_ref().to_lowercase()));
        self
    }

    /// Add operation-name substrings
    pub fn with_methods<I, S>(mut self, substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.method_substrings
            .extend(substrings.into_iter().map(|s| s.as_ref().to_lowercase()));
        self
    }

    /// Constrain `dimension` to `values` (added to any values already accepted)
    pub fn with_filter(
        mut self,
        dimension: Dimension,
        values: impl IntoIterator<Item = Value>,
    ) -> Self {
        self.dimension_filters
            .entry(dimension)
            .or_default()
            .extend(values);
        self
    }

    /// Replace the run settings
    pub fn with_run_config(mut self, run_config: RunConfig) -> Self {
        self.run_config = run_config;
        self
    }

    /// Whether the user explicitly constrained `dimension`
    pub fn constrains(&self, dimension: Dimension) -> bool {
        self.dimension_filters.contains_key(&dimension)
    }

    /// Compact description for logs and warnings
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.type_substrings.is_empty() {
            parts.push(format!(
                "types={}",
                self.type_substrings.iter().cloned().collect::<Vec<_>>().join(",")
            ));
        }
        if !self.method_substrings.is_empty() {
            parts.push(format!(
                "methods={}",
                self.method_substrings.iter().cloned().collect::<Vec<_>>().join(",")
            ));
        }
        for (dimension, values) in &self.dimension_filters {
            let values: Vec<String> = values.iter().map(Value::to_string).collect();
            parts.push(format!("{}={}", dimension, values.join("|")));
        }
        if parts.is_empty() {
            "no filters".to_string()
        } else {
            parts.join(" ")
        }
    }
}

fn parse_substrings(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn parse_parameters(raw: &str) -> Result<BTreeMap<Dimension, BTreeSet<Value>>, RequestError> {
    let mut filters: BTreeMap<Dimension, BTreeSet<Value>> = BTreeMap::new();
    let mut current: Option<Dimension> = None;

    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let (dimension, values) = match token.split_once('=') {
            Some((name, values)) => {
                if name.trim().is_empty() {
                    return Err(RequestError::MalformedFilter {
                        token: token.to_string(),
                    });
                }
                let dimension = Dimension::lookup(name)
                    .map_err(|e| RequestError::from_dimension(token, e))?;
                (dimension, values)
            }
            None => match current {
                // A bare dimension name is a filter missing its `=`, not a value
                Some(_) if Dimension::lookup(token).is_ok() => {
                    return Err(RequestError::MalformedFilter {
                        token: token.to_string(),
                    });
                }
                Some(dimension) => (dimension, token),
                None => {
                    return Err(RequestError::MalformedFilter {
                        token: token.to_string(),
                    });
                }
            },
        };

        let mut parsed = BTreeSet::new();
        for value in values.split('|') {
            if value.trim().is_empty() {
                return Err(RequestError::MalformedFilter {
                    token: token.to_string(),
                });
            }
            let value = dimension
                .parse_value(value)
                .map_err(|e| RequestError::from_dimension(token, e))?;
            parsed.insert(value);
        }

        filters.entry(dimension).or_default().extend(parsed);
        current = Some(dimension);
    }

    Ok(filters)
}
