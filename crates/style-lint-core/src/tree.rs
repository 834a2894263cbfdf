//! Arena-backed syntax tree in ESTree shape.
//!
//! The parser allocates every node into a [`SyntaxTree`] and refers to
//! children by [`NodeId`]. Each node keeps its children as an ordered list of
//! `(Field, Child)` pairs in source order, which is what the
//! [walker](crate::walker) traverses.

use crate::location::{SourceLocation, Span};
use std::fmt;
use std::str::FromStr;

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Arena slot of this node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

macro_rules! node_kinds {
    ($($kind:ident),* $(,)?) => {
        /// Node type tag.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[allow(missing_docs)]
        pub enum NodeKind {
            $($kind,)*
        }

        impl NodeKind {
            /// Every node kind, in declaration order.
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$kind,)*];

            /// ESTree type name.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(NodeKind::$kind => stringify!($kind),)*
                }
            }
        }

        impl FromStr for NodeKind {
            type Err = UnknownNodeKind;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($kind) => Ok(NodeKind::$kind),)*
                    other => Err(UnknownNodeKind(other.to_string())),
                }
            }
        }
    };
}

node_kinds! {
    Program,
    EmptyStatement,
    BlockStatement,
    ExpressionStatement,
    IfStatement,
    LabeledStatement,
    BreakStatement,
    ContinueStatement,
    WithStatement,
    SwitchStatement,
    SwitchCase,
    ReturnStatement,
    ThrowStatement,
    TryStatement,
    CatchClause,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    DebuggerStatement,
    FunctionDeclaration,
    VariableDeclaration,
    VariableDeclarator,
    ThisExpression,
    ArrayExpression,
    ObjectExpression,
    Property,
    FunctionExpression,
    SequenceExpression,
    UnaryExpression,
    BinaryExpression,
    AssignmentExpression,
    UpdateExpression,
    LogicalExpression,
    ConditionalExpression,
    CallExpression,
    NewExpression,
    MemberExpression,
    Identifier,
    Literal,
}

impl NodeKind {
    /// Returns true for function declarations and expressions.
    #[must_use]
    pub fn is_function(self) -> bool {
        matches!(self, Self::FunctionDeclaration | Self::FunctionExpression)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown node type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown node type `{0}`")]
pub struct UnknownNodeKind(pub String);

/// Name of a child-bearing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Field {
    Body,
    Expression,
    Expressions,
    Test,
    Consequent,
    Alternate,
    Object,
    Property,
    Discriminant,
    Cases,
    Argument,
    Arguments,
    Block,
    Handler,
    Finalizer,
    Init,
    Update,
    Left,
    Right,
    Declarations,
    Elements,
    Properties,
    Key,
    Value,
    Callee,
    Id,
    Params,
    Param,
    Label,
}

impl Field {
    /// ESTree property name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Expression => "expression",
            Self::Expressions => "expressions",
            Self::Test => "test",
            Self::Consequent => "consequent",
            Self::Alternate => "alternate",
            Self::Object => "object",
            Self::Property => "property",
            Self::Discriminant => "discriminant",
            Self::Cases => "cases",
            Self::Argument => "argument",
            Self::Arguments => "arguments",
            Self::Block => "block",
            Self::Handler => "handler",
            Self::Finalizer => "finalizer",
            Self::Init => "init",
            Self::Update => "update",
            Self::Left => "left",
            Self::Right => "right",
            Self::Declarations => "declarations",
            Self::Elements => "elements",
            Self::Properties => "properties",
            Self::Key => "key",
            Self::Value => "value",
            Self::Callee => "callee",
            Self::Id => "id",
            Self::Params => "params",
            Self::Param => "param",
            Self::Label => "label",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contents of a child field: a single node or an ordered collection.
///
/// Collections may contain holes (`None`), which only occur in array
/// literals such as `[a, , b]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    /// Single-node slot.
    Node(NodeId),
    /// Ordered collection.
    List(Vec<Option<NodeId>>),
}

/// Accessor flavour of an object literal property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// `key: value`
    Init,
    /// `get key() {}`
    Get,
    /// `set key(v) {}`
    Set,
}

/// A syntax tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Node type.
    pub kind: NodeKind,
    /// Byte range. Grouping parentheses around an expression are not part of it.
    pub span: Span,
    /// Line/column range.
    pub loc: SourceLocation,
    /// Operator text for unary, binary, logical, assignment and update expressions.
    pub operator: Option<String>,
    /// Identifier name or literal source text.
    pub value: Option<String>,
    /// `a[b]` rather than `a.b`.
    pub computed: bool,
    /// Prefix form of an update or unary expression.
    pub prefix: bool,
    /// Accessor flavour for `Property` nodes.
    pub property_kind: Option<PropertyKind>,
    fields: Vec<(Field, Child)>,
}

impl Node {
    /// Creates a node without children.
    #[must_use]
    pub fn new(kind: NodeKind, span: Span, loc: SourceLocation) -> Self {
        Self {
            kind,
            span,
            loc,
            operator: None,
            value: None,
            computed: false,
            prefix: false,
            property_kind: None,
            fields: Vec::new(),
        }
    }

    /// Appends a single-node field.
    #[must_use]
    pub fn with_child(mut self, field: Field, child: NodeId) -> Self {
        self.fields.push((field, Child::Node(child)));
        self
    }

    /// Appends a single-node field when `child` is present.
    #[must_use]
    pub fn with_optional_child(self, field: Field, child: Option<NodeId>) -> Self {
        match child {
            Some(child) => self.with_child(field, child),
            None => self,
        }
    }

    /// Appends a collection field without holes.
    #[must_use]
    pub fn with_list(mut self, field: Field, children: Vec<NodeId>) -> Self {
        self.fields
            .push((field, Child::List(children.into_iter().map(Some).collect())));
        self
    }

    /// Appends a collection field that may contain holes.
    #[must_use]
    pub fn with_sparse_list(mut self, field: Field, children: Vec<Option<NodeId>>) -> Self {
        self.fields.push((field, Child::List(children)));
        self
    }

    /// Sets the operator text.
    #[must_use]
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    /// Sets the identifier name or literal text.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Marks a member expression as computed.
    #[must_use]
    pub fn with_computed(mut self, computed: bool) -> Self {
        self.computed = computed;
        self
    }

    /// Marks a unary or update expression as prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: bool) -> Self {
        self.prefix = prefix;
        self
    }

    /// Sets the property accessor flavour.
    #[must_use]
    pub fn with_property_kind(mut self, kind: PropertyKind) -> Self {
        self.property_kind = Some(kind);
        self
    }

    /// All child fields in source order.
    #[must_use]
    pub fn fields(&self) -> &[(Field, Child)] {
        &self.fields
    }

    /// Looks up a field.
    #[must_use]
    pub fn field(&self, field: Field) -> Option<&Child> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, child)| child)
    }

    /// Single-node child stored under `field`.
    #[must_use]
    pub fn child(&self, field: Field) -> Option<NodeId> {
        match self.field(field)? {
            Child::Node(id) => Some(*id),
            Child::List(_) => None,
        }
    }

    /// Collection stored under `field`, holes included. Empty if absent.
    #[must_use]
    pub fn list(&self, field: Field) -> &[Option<NodeId>] {
        match self.field(field) {
            Some(Child::List(items)) => items,
            _ => &[],
        }
    }

    /// Collection stored under `field` with holes removed.
    pub fn children(&self, field: Field) -> impl Iterator<Item = NodeId> + '_ {
        self.list(field).iter().filter_map(|id| *id)
    }
}

/// Error returned when a tree is already holding its maximum node count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("syntax tree node limit of {0} exceeded")]
pub struct NodeLimitExceeded(pub usize);

/// Arena owning every node of one parsed input.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    limit: usize,
}

impl Default for SyntaxTree {
    fn default() -> Self {
        Self::with_limit(u32::MAX as usize)
    }
}

impl SyntaxTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tree holding at most `limit` nodes.
    ///
    /// Limits above `u32::MAX` are capped.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            limit: limit.min(u32::MAX as usize),
        }
    }

    /// Creates a tree made of a single root node.
    #[must_use]
    pub fn with_root(root: Node) -> (Self, NodeId) {
        let id = NodeId(0);
        let mut tree = Self::default();
        tree.nodes.push(root);
        tree.root = Some(id);
        (tree, id)
    }

    /// Allocates a node and returns its id.
    ///
    /// # Errors
    ///
    /// Fails once the tree holds as many nodes as its limit allows.
    pub fn alloc(&mut self, node: Node) -> Result<NodeId, NodeLimitExceeded> {
        let index = u32::try_from(self.nodes.len())
            .ok()
            .filter(|_| self.nodes.len() < self.limit)
            .ok_or(NodeLimitExceeded(self.limit))?;
        self.nodes.push(node);
        Ok(NodeId(index))
    }

    /// Marks `id` as the root (the `Program` node).
    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Root node id.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns the node for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated in this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Returns the node for `id`, if allocated here.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Number of allocated nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no node was allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_kind_round_trips_through_names() {
        for kind in NodeKind::ALL {
            assert_eq!(kind.as_str().parse::<NodeKind>(), Ok(*kind));
        }
        assert!("Bogus".parse::<NodeKind>().is_err());
    }

    #[test]
    fn fields_keep_insertion_order() {
        let mut tree = SyntaxTree::new();
        let a = tree.alloc(Node::new(NodeKind::Identifier, Span::new(0, 1), SourceLocation::default())).unwrap();
        let b = tree.alloc(Node::new(NodeKind::Identifier, Span::new(4, 5), SourceLocation::default())).unwrap();
        let bin = Node::new(NodeKind::BinaryExpression, Span::new(0, 5), SourceLocation::default())
            .with_child(Field::Left, a)
            .with_child(Field::Right, b)
            .with_operator("+");
        let names: Vec<Field> = bin.fields().iter().map(|(f, _)| *f).collect();
        assert_eq!(names, vec![Field::Left, Field::Right]);
        assert_eq!(bin.child(Field::Right), Some(b));
        assert!(bin.list(Field::Body).is_empty());
    }

    #[test]
    fn sparse_lists_skip_holes_in_children() {
        let mut tree = SyntaxTree::new();
        let a = tree.alloc(Node::new(NodeKind::Literal, Span::new(1, 2), SourceLocation::default())).unwrap();
        let array = Node::new(NodeKind::ArrayExpression, Span::new(0, 6), SourceLocation::default())
            .with_sparse_list(Field::Elements, vec![Some(a), None]);
        assert_eq!(array.list(Field::Elements).len(), 2);
        assert_eq!(array.children(Field::Elements).collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn alloc_fails_past_the_node_limit() {
        let mut tree = SyntaxTree::with_limit(1);
        let leaf = || Node::new(NodeKind::EmptyStatement, Span::new(0, 1), SourceLocation::default());
        assert!(tree.alloc(leaf()).is_ok());
        let err = tree.alloc(leaf()).unwrap_err();
        assert_eq!(err, NodeLimitExceeded(1));
        assert_eq!(err.to_string(), "syntax tree node limit of 1 exceeded");
        assert_eq!(tree.len(), 1);
    }
}
