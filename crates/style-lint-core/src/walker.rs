//! Pre-order traversal over the syntax tree.
//!
//! Only fields listed in [`TRAVERSED_FIELDS`] are descended into. The list is
//! closed: supporting a new syntax shape means adding its field here.

use crate::tree::{Child, Field, Node, NodeId, SyntaxTree};

/// Fields the walker descends into.
pub const TRAVERSED_FIELDS: &[Field] = &[
    Field::Body,
    Field::Expression,
    Field::Expressions,
    Field::Test,
    Field::Consequent,
    Field::Alternate,
    Field::Object,
    Field::Property,
    Field::Discriminant,
    Field::Cases,
    Field::Argument,
    Field::Arguments,
    Field::Block,
    Field::Handler,
    Field::Finalizer,
    Field::Init,
    Field::Update,
    Field::Left,
    Field::Right,
    Field::Declarations,
    Field::Elements,
    Field::Properties,
    Field::Key,
    Field::Value,
    Field::Callee,
    Field::Id,
    Field::Params,
    Field::Param,
    Field::Label,
];

/// Returns true if the walker descends into `field`.
#[must_use]
pub fn is_traversed(field: Field) -> bool {
    TRAVERSED_FIELDS.contains(&field)
}

/// Visitor verdict for the node just visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Walk {
    /// Descend into the node's children.
    #[default]
    Continue,
    /// Do not descend into this node's children.
    Skip,
}

/// Location of a node inside its parent: the parent, the field, and the
/// position within the field's collection (`None` for single-node fields).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParentLink {
    /// Parent node.
    pub parent: NodeId,
    /// Field of the parent holding the node.
    pub field: Field,
    /// Index inside the field's collection.
    pub index: Option<usize>,
}

/// Walks the subtree rooted at `start` in document order.
///
/// `visit` receives each node with the link to its parent (`parent` for the
/// start node). Returning [`Walk::Skip`] prunes that node's subtree.
pub fn iterate<F>(tree: &SyntaxTree, start: NodeId, parent: Option<ParentLink>, mut visit: F)
where
    F: FnMut(NodeId, &Node, Option<ParentLink>) -> Walk,
{
    let mut stack = vec![(start, parent)];

    while let Some((id, link)) = stack.pop() {
        let node = tree.node(id);
        if visit(id, node, link) == Walk::Skip {
            continue;
        }

        let first_child = stack.len();
        for (field, child) in node.fields() {
            if !is_traversed(*field) {
                continue;
            }
            match child {
                Child::Node(child_id) => stack.push((
                    *child_id,
                    Some(ParentLink {
                        parent: id,
                        field: *field,
                        index: None,
                    }),
                )),
                Child::List(items) => {
                    for (index, item) in items.iter().enumerate() {
                        if let Some(child_id) = item {
                            stack.push((
                                *child_id,
                                Some(ParentLink {
                                    parent: id,
                                    field: *field,
                                    index: Some(index),
                                }),
                            ));
                        }
                    }
                }
            }
        }
        // Children were pushed in source order; reverse them so the first pops first.
        stack[first_child..].reverse();
    }
}
