//! Structural verification of a built tree
//!
//! Walks ownership edges depth-first, keyed by node address. A node met again
//! while it is still on the walk stack means it owns itself (a cycle); a node
//! met again after it was finished is a shared subtree, which is legal and
//! only counted. Shared subtrees are not re-entered; their recorded height
//! still counts toward the depth of every path that reaches them.

use crate::ast::*;
use crate::construct::ConstructRef;
use hwc_common::{Diagnostic, ErrorReporter, NodePath};
use log::debug;
use std::collections::{HashMap, HashSet};

/// Shape of the ownership graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DagReport {
    /// Distinct nodes, the root included
    pub unique_nodes: usize,
    /// Ownership edges followed
    pub edges: usize,
    /// Distinct nodes reached through more than one edge
    pub shared_nodes: usize,
    /// Longest root-to-leaf edge count
    pub max_depth: usize,
}

impl DagReport {
    pub fn is_tree(&self) -> bool {
        self.shared_nodes == 0
    }
}

struct DagWalker<'r> {
    reporter: &'r mut ErrorReporter,
    on_stack: HashSet<usize>,
    /// Longest downward edge count of every finished node
    heights: HashMap<usize, usize>,
    shared: HashSet<usize>,
    report: DagReport,
}

impl<'r> DagWalker<'r> {
    /// Walks `node` and returns its height
    fn walk(&mut self, node: ConstructRef<'_>, path: &NodePath) -> usize {
        let addr = node.addr();
        self.on_stack.insert(addr);
        self.report.unique_nodes += 1;

        self.check_node(node, path);

        let mut height = 0;
        for edge in node.edges() {
            self.report.edges += 1;
            let child_path = match edge.index {
                Some(index) => path.field(edge.field).index(index),
                None => path.field(edge.field),
            };
            let child = edge.child.addr();

            let child_height = if self.on_stack.contains(&child) {
                self.reporter.error(
                    format!("{} owns itself through this edge", edge.child.kind()),
                    child_path,
                );
                continue;
            } else if let Some(&finished) = self.heights.get(&child) {
                self.shared.insert(child);
                finished
            } else {
                self.walk(edge.child, &child_path)
            };
            height = height.max(child_height + 1);
        }

        self.on_stack.remove(&addr);
        self.heights.insert(addr, height);
        height
    }

    fn check_node(&mut self, node: ConstructRef<'_>, path: &NodePath) {
        let empty_decl = match node {
            ConstructRef::ConstDecl(decl) => decl.defs.is_empty(),
            ConstructRef::VarDecl(decl) => decl.defs.is_empty(),
            _ => false,
        };
        if empty_decl {
            let message = format!("{} declares nothing", node.kind());
            let diagnostic = Diagnostic::error(message, path.clone())
                .with_note("a declaration needs at least one definition".to_string());
            self.reporter.report(diagnostic);
        }
    }
}

/// Verify `unit`, reporting findings into `reporter`
pub fn verify_unit(unit: &CompUnit, reporter: &mut ErrorReporter) -> DagReport {
    let mut walker = DagWalker {
        reporter,
        on_stack: HashSet::new(),
        heights: HashMap::new(),
        shared: HashSet::new(),
        report: DagReport::default(),
    };
    let height = walker.walk(ConstructRef::CompUnit(unit), &NodePath::root());

    let mut report = walker.report;
    report.max_depth = height;
    report.shared_nodes = walker.shared.len();
    debug!(
        "verified unit: {} nodes, {} edges, {} shared, depth {}",
        report.unique_nodes, report.edges, report.shared_nodes, report.max_depth
    );
    report
}
