//! HWC Compiler - Common Types and Utilities
//!
//! This crate contains the error definitions, diagnostics and node-path
//! locations shared by every component of the HWC compiler.

pub mod error;
pub mod node_path;

pub use error::{CompilerError, Diagnostic, ErrorReporter};
pub use node_path::{NodePath, PathSegment};
