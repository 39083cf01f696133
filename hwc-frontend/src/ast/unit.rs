//! Compilation unit, the root of the tree

use super::declarations::Declaration;
use super::functions::FunctionDefinition;
use super::Shared;
use serde::{Deserialize, Serialize};

/// Top-level items in source order
///
/// The order is kept exactly as constructed; name resolution depends on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompUnit {
    pub items: Vec<CompUnitItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompUnitItem {
    Decl(Declaration),
    FuncDef(Shared<FunctionDefinition>),
}

impl CompUnit {
    pub fn new(items: Vec<CompUnitItem>) -> Self {
        Self { items }
    }

    pub fn functions(&self) -> impl Iterator<Item = &Shared<FunctionDefinition>> {
        self.items.iter().filter_map(|item| match item {
            CompUnitItem::FuncDef(func) => Some(func),
            CompUnitItem::Decl(_) => None,
        })
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.items.iter().filter_map(|item| match item {
            CompUnitItem::Decl(decl) => Some(decl),
            CompUnitItem::FuncDef(_) => None,
        })
    }

    pub fn function(&self, name: &str) -> Option<&Shared<FunctionDefinition>> {
        self.functions().find(|f| f.ident == name)
    }
}

impl From<Declaration> for CompUnitItem {
    fn from(decl: Declaration) -> Self {
        CompUnitItem::Decl(decl)
    }
}

impl From<Shared<FunctionDefinition>> for CompUnitItem {
    fn from(func: Shared<FunctionDefinition>) -> Self {
        CompUnitItem::FuncDef(func)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BaseType, Block, VarDecl, VarDef};
    use std::sync::Arc;

    #[test]
    fn test_items_keep_source_order() {
        let global = Declaration::Var(Arc::new(VarDecl::new(
            BaseType::Int,
            Arc::new(VarDef::DefinitionOnly {
                ident: "g".into(),
                array_dims: Vec::new(),
            }),
            [],
        )));
        let empty = Arc::new(Block::default());
        let f = Arc::new(FunctionDefinition::new(BaseType::Void, "f", Vec::new(), empty.clone()));
        let main = Arc::new(FunctionDefinition::new(BaseType::Int, "main", Vec::new(), empty));

        let unit = CompUnit::new(vec![f.into(), global.into(), main.into()]);

        assert!(matches!(unit.items[0], CompUnitItem::FuncDef(_)));
        assert!(matches!(unit.items[1], CompUnitItem::Decl(_)));
        let names: Vec<_> = unit.functions().map(|f| f.ident.as_str()).collect();
        assert_eq!(names, vec!["f", "main"]);
        assert_eq!(unit.declarations().count(), 1);
        assert!(unit.function("main").is_some());
    }
}
