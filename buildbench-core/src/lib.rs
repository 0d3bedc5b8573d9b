#![warn(missing_docs)]
//! BuildBench Core - Variant Model
//!
//! This crate defines what can be selected:
//! - `Dimension` registry with typed value domains
//! - `Variant` with an explicit `Category` tag and a typed value map
//! - `Catalogue` built once from declarative `FamilyDef` descriptors
//! - The built-in scenario table

mod catalogue;
mod dimension;
pub mod scenarios;
mod value;
mod variant;

pub use catalogue::{
    AxisDef, Catalogue, CatalogueBuilder, CatalogueError, FamilyDef, OperationDef,
};
pub use dimension::{Dimension, DimensionError, Domain, NOT_APPLICABLE};
pub use value::Value;
pub use variant::{Category, OperationKind, SourceTree, Toolchain, Variant};
