//! # slate-sheets-core
//!
//! Core types for the slate-sheets spreadsheet engine.
//!
//! This crate provides the fundamental types used throughout slate-sheets:
//! - [`CellName`] - Canonical cell names (`A1`, `BC23`, ...)
//! - [`DependencyGraph`] - A directed graph over string keys recording
//!   "depends on" relationships
//!
//! ## Example
//!
//! ```rust
//! use slate_sheets_core::{CellName, DependencyGraph};
//!
//! let name = CellName::parse("a1").unwrap();
//! assert_eq!(name.as_str(), "A1");
//!
//! let mut graph = DependencyGraph::new();
//! graph.add_dependency("A1", "B1"); // B1 depends on A1
//! assert!(graph.has_dependents("A1"));
//! ```

pub mod dependency;
pub mod error;
pub mod name;

// Re-exports for convenience
pub use dependency::DependencyGraph;
pub use error::{Error, Result};
pub use name::CellName;
