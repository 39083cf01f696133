//! HWC Compiler - Frontend
//!
//! This crate provides the syntax-tree data model for the HWC compiler:
//! - AST: one node type per production of the source grammar
//! - Construct: kind identity and type-erased traversal of every node
//! - Builder: reduce-style construction, as driven by a parser
//! - Visitor: read-only traversal for later stages
//! - Verify: acyclicity and sharing checks over a built tree
//! - Printer: renders a tree back to source text
//!
//! Lexing, parsing, semantic analysis and code generation are separate
//! stages that produce or consume these trees.

pub mod ast;
pub mod builder;
pub mod construct;
pub mod printer;
pub mod samples;
pub mod verify;
pub mod visitor;

pub use ast::{
    BaseType, BinaryOp, Block, BlockItem, CompUnit, CompUnitItem, ConstDecl, ConstDef,
    ConstInitializer, Declaration, Expression, FunctionDefinition, Identifier, Initializer,
    LValue, Operator, ParamShape, Parameter, Shared, SharedList, Statement, UnaryOp, VarDecl,
    VarDef,
};
pub use builder::AstBuilder;
pub use construct::{Construct, ConstructKind, ConstructRef};
pub use printer::print_unit;
pub use verify::{verify_unit, DagReport};
pub use visitor::{ConstructCounter, Visitor};

use hwc_common::{CompilerError, ErrorReporter};
use log::debug;

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Decode a tree from its JSON form
    ///
    /// Sharing is not preserved: a subtree attached twice before encoding
    /// comes back as two equal, independent subtrees.
    pub fn load_json(json: &str) -> Result<CompUnit, CompilerError> {
        let unit: CompUnit = serde_json::from_str(json)?;
        debug!("loaded unit with {} top-level items", unit.items.len());
        Ok(unit)
    }

    /// Encode a tree as JSON
    pub fn store_json(unit: &CompUnit, pretty: bool) -> Result<String, CompilerError> {
        let json = if pretty {
            serde_json::to_string_pretty(unit)?
        } else {
            serde_json::to_string(unit)?
        };
        Ok(json)
    }

    /// Verify a tree, failing on the first structural error
    pub fn verify(unit: &CompUnit) -> Result<DagReport, CompilerError> {
        let mut reporter = ErrorReporter::new();
        let report = verify_unit(unit, &mut reporter);
        match reporter.first_error() {
            Some(err) => Err(err),
            None => Ok(report),
        }
    }

    /// Decode and verify
    pub fn load_verified(json: &str) -> Result<CompUnit, CompilerError> {
        let unit = Self::load_json(json)?;
        Self::verify(&unit)?;
        Ok(unit)
    }
}
