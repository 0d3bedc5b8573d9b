//! Built-in scenario table
//!
//! Every benchmark family the suite knows about. Variants are never
//! discovered at runtime; adding a family means adding an entry here.

use crate::catalogue::{AxisDef, FamilyDef, OperationDef};
use crate::dimension::{Dimension, NOT_APPLICABLE};
use crate::variant::{Category, OperationKind, SourceTree, Toolchain};

const BUILD: OperationDef = OperationDef {
    name: "Build",
    kind: OperationKind::Build,
};

const BUILD_INCREMENTAL: OperationDef = OperationDef {
    name: "BuildIncremental",
    kind: OperationKind::IncrementalChange,
};

const BOOL: &[&str] = &["true", "false"];
const TOOL_VERSIONS: &[&str] = &["1.1.7", "2.0.3", "2.1.4", "2.1.300"];
const LEGACY_VERSIONS: &[&str] = &[NOT_APPLICABLE, "15.5", "15.6"];
const CHANGE_SCOPES: &[&str] = &[NOT_APPLICABLE, "leaf-file-changed", "root-file-changed"];

const fn axis(dimension: Dimension, values: &'static [&'static str]) -> AxisDef {
    AxisDef { dimension, values }
}

/// Families of the built-in catalogue, in enumeration order
pub static FAMILIES: &[FamilyDef] = &[
    FamilyDef {
        type_name: "DotNetWeb",
        category: Category::new(Toolchain::Modern, SourceTree::Standard),
        operations: &[BUILD, BUILD_INCREMENTAL],
        axes: &[
            axis(Dimension::Restore, BOOL),
            axis(Dimension::Parallel, BOOL),
            axis(Dimension::ToolVersion, TOOL_VERSIONS),
            axis(Dimension::Orchestrator, &["modern"]),
            axis(Dimension::LegacyVersion, &[NOT_APPLICABLE]),
            axis(Dimension::TargetFramework, &["netcoreapp2.0", "netcoreapp2.1"]),
        ],
    },
    FamilyDef {
        type_name: "DotNetMvc",
        category: Category::new(Toolchain::Modern, SourceTree::Standard),
        operations: &[BUILD, BUILD_INCREMENTAL],
        axes: &[
            axis(Dimension::Restore, BOOL),
            axis(Dimension::Parallel, BOOL),
            axis(Dimension::ToolVersion, TOOL_VERSIONS),
            axis(Dimension::Orchestrator, &["modern", "legacy"]),
            axis(Dimension::LegacyVersion, LEGACY_VERSIONS),
            axis(Dimension::NodeReuse, BOOL),
            axis(Dimension::TargetFramework, &["netcoreapp2.0", "netcoreapp2.1"]),
            axis(Dimension::CompileOnBuild, BOOL),
        ],
    },
    FamilyDef {
        type_name: "DotNetWebLarge",
        category: Category::new(Toolchain::Modern, SourceTree::Large),
        operations: &[BUILD, BUILD_INCREMENTAL],
        axes: &[
            axis(Dimension::Restore, BOOL),
            axis(Dimension::Parallel, BOOL),
            axis(Dimension::ToolVersion, TOOL_VERSIONS),
            axis(Dimension::Orchestrator, &["modern", "legacy"]),
            axis(Dimension::LegacyVersion, &[NOT_APPLICABLE, "15.6"]),
            axis(Dimension::NodeReuse, BOOL),
            axis(Dimension::SourceChangeScope, CHANGE_SCOPES),
        ],
    },
    FamilyDef {
        type_name: "MSBuildMvc",
        category: Category::new(Toolchain::Legacy, SourceTree::Standard),
        operations: &[BUILD, BUILD_INCREMENTAL],
        axes: &[
            axis(Dimension::Restore, BOOL),
            axis(Dimension::Parallel, BOOL),
            axis(Dimension::NodeReuse, BOOL),
            axis(Dimension::LegacyVersion, LEGACY_VERSIONS),
            axis(Dimension::TargetFramework, &["net461", "netcoreapp2.0"]),
            axis(Dimension::CompileOnBuild, BOOL),
        ],
    },
    FamilyDef {
        type_name: "MSBuildWebLarge",
        category: Category::new(Toolchain::Legacy, SourceTree::Large),
        operations: &[BUILD, BUILD_INCREMENTAL],
        axes: &[
            axis(Dimension::Restore, BOOL),
            axis(Dimension::Parallel, BOOL),
            axis(Dimension::NodeReuse, BOOL),
            axis(Dimension::LegacyVersion, LEGACY_VERSIONS),
            axis(Dimension::SourceChangeScope, CHANGE_SCOPES),
        ],
    },
    FamilyDef {
        type_name: "GradleWebLarge",
        category: Category::new(Toolchain::External, SourceTree::Large),
        operations: &[BUILD, BUILD_INCREMENTAL],
        axes: &[
            axis(Dimension::Parallel, BOOL),
            axis(Dimension::SourceChangeScope, CHANGE_SCOPES),
        ],
    },
    FamilyDef {
        type_name: "MavenMvc",
        category: Category::new(Toolchain::External, SourceTree::Standard),
        operations: &[BUILD],
        axes: &[axis(Dimension::Parallel, BOOL)],
    },
];
