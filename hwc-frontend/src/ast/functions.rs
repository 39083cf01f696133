//! Function definitions and formal parameters

use super::expressions::Expression;
use super::statements::Block;
use super::terminals::{BaseType, Identifier};
use super::{Shared, SharedList};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub return_type: BaseType,
    pub ident: Identifier,
    pub params: SharedList<Parameter>,
    pub body: Shared<Block>,
}

impl FunctionDefinition {
    pub fn new(
        return_type: BaseType,
        ident: impl Into<Identifier>,
        params: SharedList<Parameter>,
        body: Shared<Block>,
    ) -> Self {
        Self { return_type, ident: ident.into(), params, body }
    }

    pub fn param(&self, name: &str) -> Option<&Shared<Parameter>> {
        self.params.iter().find(|p| p.ident == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub base_type: BaseType,
    pub ident: Identifier,
    pub shape: ParamShape,
}

/// Array parameters always omit their leading dimension (`int a[]`,
/// `int m[][3]`) and decay to a pointer-like reference. Only the trailing
/// dimensions are written out, and they are always concrete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamShape {
    #[default]
    Scalar,
    Array { trailing_dims: SharedList<Expression> },
}

impl Parameter {
    pub fn scalar(base_type: BaseType, ident: impl Into<Identifier>) -> Self {
        Self { base_type, ident: ident.into(), shape: ParamShape::Scalar }
    }

    pub fn array(
        base_type: BaseType,
        ident: impl Into<Identifier>,
        trailing_dims: SharedList<Expression>,
    ) -> Self {
        Self {
            base_type,
            ident: ident.into(),
            shape: ParamShape::Array { trailing_dims },
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self.shape, ParamShape::Array { .. })
    }

    /// Declared rank, counting the omitted leading dimension
    pub fn rank(&self) -> usize {
        match &self.shape {
            ParamShape::Scalar => 0,
            ParamShape::Array { trailing_dims } => 1 + trailing_dims.len(),
        }
    }

    /// Every dimension in declaration order; the leading one is `None`
    pub fn array_dims(&self) -> Vec<Option<&Shared<Expression>>> {
        match &self.shape {
            ParamShape::Scalar => Vec::new(),
            ParamShape::Array { trailing_dims } => std::iter::once(None)
                .chain(trailing_dims.iter().map(Some))
                .collect(),
        }
    }
}
