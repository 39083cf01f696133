//! Declaration and initializer nodes
//!
//! Initializers nest freely. Nothing here checks that the nesting depth or
//! element counts agree with the declared dimensions; that belongs to
//! semantic analysis, as does zero-filling definitions without initializer.

use super::expressions::Expression;
use super::terminals::{BaseType, Identifier};
use super::{Shared, SharedList};
use serde::{Deserialize, Serialize};

/// `const` or ordinary declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Declaration {
    Const(Shared<ConstDecl>),
    Var(Shared<VarDecl>),
}

impl Declaration {
    pub fn base_type(&self) -> BaseType {
        match self {
            Declaration::Const(decl) => decl.base_type,
            Declaration::Var(decl) => decl.base_type,
        }
    }

    /// Declared names in source order
    pub fn idents(&self) -> Vec<&Identifier> {
        match self {
            Declaration::Const(decl) => decl.defs.iter().map(|def| &def.ident).collect(),
            Declaration::Var(decl) => decl.defs.iter().map(|def| def.ident()).collect(),
        }
    }

    pub fn is_const(&self) -> bool {
        matches!(self, Declaration::Const(_))
    }
}

/// `const int a = 1, b[2] = {1, 2};`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstDecl {
    pub base_type: BaseType,
    pub defs: SharedList<ConstDef>,
}

impl ConstDecl {
    /// The grammar requires at least one definition, hence `first`.
    pub fn new(
        base_type: BaseType,
        first: Shared<ConstDef>,
        rest: impl IntoIterator<Item = Shared<ConstDef>>,
    ) -> Self {
        let mut defs = vec![first];
        defs.extend(rest);
        Self { base_type, defs }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstDef {
    pub ident: Identifier,
    /// Empty for scalars; length is the declared rank
    pub array_dims: SharedList<Expression>,
    pub init: Shared<ConstInitializer>,
}

impl ConstDef {
    pub fn new(
        ident: impl Into<Identifier>,
        array_dims: SharedList<Expression>,
        init: Shared<ConstInitializer>,
    ) -> Self {
        Self { ident: ident.into(), array_dims, init }
    }

    pub fn rank(&self) -> usize {
        self.array_dims.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstInitializer {
    Scalar(Shared<Expression>),
    /// Brace-enclosed list, possibly nested and possibly empty
    Array(SharedList<ConstInitializer>),
}

impl ConstInitializer {
    /// Brace nesting depth; scalars have depth 0
    pub fn depth(&self) -> usize {
        match self {
            ConstInitializer::Scalar(_) => 0,
            ConstInitializer::Array(elements) => {
                1 + elements.iter().map(|e| e.depth()).max().unwrap_or(0)
            }
        }
    }
}

/// `int a, b[3] = {1}, c = 2;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarDecl {
    pub base_type: BaseType,
    pub defs: SharedList<VarDef>,
}

impl VarDecl {
    pub fn new(
        base_type: BaseType,
        first: Shared<VarDef>,
        rest: impl IntoIterator<Item = Shared<VarDef>>,
    ) -> Self {
        let mut defs = vec![first];
        defs.extend(rest);
        Self { base_type, defs }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarDef {
    DefinitionOnly {
        ident: Identifier,
        array_dims: SharedList<Expression>,
    },
    DefinitionWithInit {
        ident: Identifier,
        array_dims: SharedList<Expression>,
        init: Shared<Initializer>,
    },
}

impl VarDef {
    pub fn ident(&self) -> &Identifier {
        match self {
            VarDef::DefinitionOnly { ident, .. }
            | VarDef::DefinitionWithInit { ident, .. } => ident,
        }
    }

    pub fn array_dims(&self) -> &SharedList<Expression> {
        match self {
            VarDef::DefinitionOnly { array_dims, .. }
            | VarDef::DefinitionWithInit { array_dims, .. } => array_dims,
        }
    }

    pub fn init(&self) -> Option<&Shared<Initializer>> {
        match self {
            VarDef::DefinitionOnly { .. } => None,
            VarDef::DefinitionWithInit { init, .. } => Some(init),
        }
    }

    pub fn rank(&self) -> usize {
        self.array_dims().len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Initializer {
    Scalar(Shared<Expression>),
    Array(SharedList<Initializer>),
}

impl Initializer {
    pub fn depth(&self) -> usize {
        match self {
            Initializer::Scalar(_) => 0,
            Initializer::Array(elements) => {
                1 + elements.iter().map(|e| e.depth()).max().unwrap_or(0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn lit(value: i32) -> Shared<Expression> {
        Arc::new(Expression::IntegerLiteral(value))
    }

    #[test]
    fn test_const_array_shape() {
        // const int a[2] = {1, 2};
        let init = Arc::new(ConstInitializer::Array(vec![
            Arc::new(ConstInitializer::Scalar(lit(1))),
            Arc::new(ConstInitializer::Scalar(lit(2))),
        ]));
        let def = Arc::new(ConstDef::new("a", vec![lit(2)], init));
        let decl = ConstDecl::new(BaseType::Int, def, []);

        assert_eq!(decl.defs.len(), 1);
        assert_eq!(decl.defs[0].rank(), 1);
        assert_eq!(decl.defs[0].init.depth(), 1);
    }

    #[test]
    fn test_initializer_depth_does_not_need_to_match_rank() {
        // int m[2][2] = {1, {2, 3}};
        let init = Arc::new(Initializer::Array(vec![
            Arc::new(Initializer::Scalar(lit(1))),
            Arc::new(Initializer::Array(vec![
                Arc::new(Initializer::Scalar(lit(2))),
                Arc::new(Initializer::Scalar(lit(3))),
            ])),
        ]));
        let def = VarDef::DefinitionWithInit {
            ident: Identifier::new("m"),
            array_dims: vec![lit(2), lit(2)],
            init,
        };

        assert_eq!(def.rank(), 2);
        assert_eq!(def.init().map(|i| i.depth()), Some(2));
        assert_eq!(Initializer::Array(Vec::new()).depth(), 1);
    }

    #[test]
    fn test_definition_only_has_no_initializer() {
        let def = Arc::new(VarDef::DefinitionOnly {
            ident: Identifier::new("x"),
            array_dims: Vec::new(),
        });
        let other = Arc::new(VarDef::DefinitionOnly {
            ident: Identifier::new("y"),
            array_dims: Vec::new(),
        });
        let decl = Declaration::Var(Arc::new(VarDecl::new(BaseType::Int, def, [other])));

        assert!(!decl.is_const());
        assert_eq!(decl.base_type(), BaseType::Int);
        assert_eq!(decl.idents(), vec![&Identifier::new("x"), &Identifier::new("y")]);
        if let Declaration::Var(var) = &decl {
            assert!(var.defs.iter().all(|d| d.init().is_none()));
        }
    }
}
