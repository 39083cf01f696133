//! Node-path tracking for diagnostics
//!
//! The syntax tree carries no source positions, so findings are located by
//! the chain of ownership edges leading from the compilation unit to the
//! offending node, e.g. `unit.items[0].body.items[2].value`.

use std::fmt;

/// One step along an ownership edge
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Named child field (`body`, `cond`, ...)
    Field(&'static str),
    /// Position inside an ordered child list
    Index(usize),
}

/// A location in the syntax tree, rooted at the compilation unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    segments: Vec<PathSegment>,
}

impl NodePath {
    /// The compilation unit itself
    pub fn root() -> Self {
        Self::default()
    }

    /// Path to a named child of this node
    pub fn field(&self, name: &'static str) -> Self {
        self.with(PathSegment::Field(name))
    }

    /// Path to the `index`-th element of this node's child list
    pub fn index(&self, index: usize) -> Self {
        self.with(PathSegment::Index(index))
    }

    fn with(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        let path = NodePath::root();
        assert_eq!(path, NodePath::default());
        assert_eq!(format!("{}", path), "unit");
    }

    #[test]
    fn test_nested_path_display() {
        let path = NodePath::root()
            .field("items")
            .index(0)
            .field("body")
            .field("items")
            .index(2)
            .field("value");

        assert_eq!(format!("{}", path), "unit.items[0].body.items[2].value");
    }

    #[test]
    fn test_extending_leaves_parent_untouched() {
        let parent = NodePath::root().field("items");
        let child = parent.index(3);

        assert_eq!(parent.to_string(), "unit.items");
        assert_eq!(child.to_string(), "unit.items[3]");
        assert_ne!(parent, child);
    }
}
