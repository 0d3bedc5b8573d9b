//! Benchmark variants and their category tags

use crate::dimension::{Dimension, NOT_APPLICABLE};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which build tool a variant family drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Toolchain {
    /// SDK-style CLI driver
    Modern,
    /// Standalone legacy build engine
    Legacy,
    /// Reference toolchain outside the SDK family (Gradle, Maven)
    External,
}

/// Size class of the project under test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceTree {
    /// Small or medium project
    Standard,
    /// Large generated source tree
    Large,
}

/// Classification attached to a variant family at declaration time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// Build tool driving the variant
    pub toolchain: Toolchain,
    /// Project size class
    pub tree: SourceTree,
}

impl Category {
    /// Shorthand constructor
    pub const fn new(toolchain: Toolchain, tree: SourceTree) -> Self {
        Self { toolchain, tree }
    }

    /// Dimensions a variant of this category must declare for an operation of `kind`
    pub fn required_dimensions(self, kind: OperationKind) -> Vec<Dimension> {
        let mut required = match self.toolchain {
            Toolchain::Modern => vec![
                Dimension::Restore,
                Dimension::Parallel,
                Dimension::ToolVersion,
                Dimension::Orchestrator,
                Dimension::LegacyVersion,
            ],
            Toolchain::Legacy => vec![
                Dimension::Restore,
                Dimension::Parallel,
                Dimension::NodeReuse,
                Dimension::LegacyVersion,
            ],
            Toolchain::External => Vec::new(),
        };
        if self.tree == SourceTree::Large && kind == OperationKind::IncrementalChange {
            required.push(Dimension::SourceChangeScope);
        }
        required
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let toolchain = match self.toolchain {
            Toolchain::Modern => "modern",
            Toolchain::Legacy => "legacy",
            Toolchain::External => "external",
        };
        match self.tree {
            SourceTree::Standard => f.write_str(toolchain),
            SourceTree::Large => write!(f, "{}/large", toolchain),
        }
    }
}

/// What scenario an operation exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    /// Full build of an unchanged tree
    Build,
    /// Build after touching a source file
    IncrementalChange,
}

/// One concrete, fully-parameterized benchmark case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Declared type-like name of the family (matched by `--types`)
    pub type_name: String,
    /// Operation name (matched by `--methods`)
    pub operation: String,
    /// Scenario kind of the operation
    pub kind: OperationKind,
    /// Category tag of the family
    pub category: Category,
    /// Value for each applicable dimension
    pub values: BTreeMap<Dimension, Value>,
}

impl Variant {
    /// Stable display identifier, e.g. `DotNetWeb.Build(restore=true, parallel=false)`
    pub fn id(&self) -> String {
        let params: Vec<String> = self
            .values
            .iter()
            .map(|(d, v)| format!("{}={}", d, v))
            .collect();
        format!("{}.{}({})", self.type_name, self.operation, params.join(", "))
    }

    /// Value of `dimension`, if it applies to this variant
    pub fn value(&self, dimension: Dimension) -> Option<&Value> {
        self.values.get(&dimension)
    }

    /// Boolean value of `dimension`
    pub fn flag(&self, dimension: Dimension) -> Option<bool> {
        self.value(dimension).and_then(Value::as_flag)
    }

    /// Text value of `dimension`
    pub fn text(&self, dimension: Dimension) -> Option<&str> {
        self.value(dimension).and_then(Value::as_text)
    }

    /// Whether `dimension` is present and equal to the text `expected`
    pub fn text_is(&self, dimension: Dimension, expected: &str) -> bool {
        self.text(dimension) == Some(expected)
    }

    /// Whether `dimension` is present and set to the not-applicable sentinel
    pub fn is_not_applicable(&self, dimension: Dimension) -> bool {
        self.text_is(dimension, NOT_APPLICABLE)
    }

    /// Driven by the modern tool
    pub fn is_modern(&self) -> bool {
        self.category.toolchain == Toolchain::Modern
    }

    /// Driven by the legacy tool
    pub fn is_legacy(&self) -> bool {
        self.category.toolchain == Toolchain::Legacy
    }

    /// Large source tree exercising an incremental-change operation
    pub fn is_large_incremental(&self) -> bool {
        self.category.tree == SourceTree::Large && self.kind == OperationKind::IncrementalChange
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}
