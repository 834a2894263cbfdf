//! Source model handed to every rule.

use crate::lines::StrippedLines;
use crate::location::{split_lines, LineIndex, SourceLocation, Span};
use crate::parse::ParsedSource;
use crate::token::{Comment, Token, TokenKind};
use crate::tree::{Field, Node, NodeId, NodeKind, SyntaxTree};
use crate::walker::{self, ParentLink, Walk};

use once_cell::sync::OnceCell;
use std::collections::HashMap;
use tracing::trace;

/// A parsed input with derived indices.
///
/// Built once per input. Besides the tree, tokens and comments it owns the
/// node-type index and the parent table, both complete before any rule runs.
/// Offset indices and comment-stripped lines are built on first use.
#[derive(Debug)]
pub struct SourceFile {
    text: String,
    tree: SyntaxTree,
    root: NodeId,
    tokens: Vec<Token>,
    comments: Vec<Comment>,
    lines: Vec<String>,
    type_index: HashMap<NodeKind, Vec<NodeId>>,
    parents: Vec<Option<ParentLink>>,
    start_index: OnceCell<HashMap<usize, usize>>,
    end_index: OnceCell<HashMap<usize, usize>>,
    stripped: OnceCell<StrippedLines>,
}

impl SourceFile {
    /// Builds the source model for `text` from the parser's output.
    #[must_use]
    pub fn new(text: impl Into<String>, parsed: ParsedSource) -> Self {
        let text = text.into();
        let ParsedSource {
            mut tree,
            mut tokens,
            comments,
        } = parsed;

        let root = match tree.root() {
            Some(root) => root,
            None => {
                let span = Span::new(0, text.len());
                let loc = LineIndex::new(&text).location(&text, span);
                let (program, root) = SyntaxTree::with_root(Node::new(NodeKind::Program, span, loc));
                tree = program;
                root
            }
        };

        let mut type_index: HashMap<NodeKind, Vec<NodeId>> = HashMap::new();
        let mut parents = vec![None; tree.len()];
        walker::iterate(&tree, root, None, |id, node, link| {
            type_index.entry(node.kind).or_default().push(id);
            parents[id.index()] = link;
            Walk::Continue
        });

        reclassify_keyword_names(&tree, &type_index, &mut tokens);

        trace!(
            nodes = tree.len(),
            tokens = tokens.len(),
            comments = comments.len(),
            "built source model"
        );

        let lines = split_lines(&text);
        Self {
            text,
            tree,
            root,
            tokens,
            comments,
            lines,
            type_index,
            parents,
            start_index: OnceCell::new(),
            end_index: OnceCell::new(),
            stripped: OnceCell::new(),
        }
    }

    /// Full source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The syntax tree.
    #[must_use]
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// The `Program` node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the node for `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        self.tree.node(id)
    }

    /// Tokens ordered by position.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Comments ordered by position.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Physical lines without their terminators.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Text of a 1-based line.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&str> {
        line.checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
    }

    /// Lines with comments blanked out.
    pub fn stripped_lines(&self) -> &StrippedLines {
        self.stripped
            .get_or_init(|| StrippedLines::build(&self.lines, &self.comments))
    }

    /// Nodes of one type in document order.
    #[must_use]
    pub fn nodes_by_type(&self, kind: NodeKind) -> &[NodeId] {
        self.type_index.get(&kind).map_or(&[][..], Vec::as_slice)
    }

    /// Nodes of several types: each type in document order, types in the
    /// order requested.
    #[must_use]
    pub fn nodes_by_types(&self, kinds: &[NodeKind]) -> Vec<NodeId> {
        kinds
            .iter()
            .flat_map(|kind| self.nodes_by_type(*kind).iter().copied())
            .collect()
    }

    /// Walks the whole tree. See [`walker::iterate`].
    pub fn iterate<F>(&self, visit: F)
    where
        F: FnMut(NodeId, &Node, Option<ParentLink>) -> Walk,
    {
        self.iterate_from(self.root, visit);
    }

    /// Walks the subtree rooted at `start`.
    pub fn iterate_from<F>(&self, start: NodeId, visit: F)
    where
        F: FnMut(NodeId, &Node, Option<ParentLink>) -> Walk,
    {
        walker::iterate(&self.tree, start, self.parent_link(start), visit);
    }

    /// Where `id` sits inside its parent. `None` for the root.
    #[must_use]
    pub fn parent_link(&self, id: NodeId) -> Option<ParentLink> {
        self.parents.get(id.index()).copied().flatten()
    }

    /// Parent of `id`.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent_link(id).map(|link| link.parent)
    }

    /// Next node in the same parent collection, skipping holes.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let (siblings, index) = self.collection_of(id)?;
        siblings.iter().skip(index + 1).find_map(|s| *s)
    }

    /// Previous node in the same parent collection, skipping holes.
    #[must_use]
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let (siblings, index) = self.collection_of(id)?;
        siblings.iter().take(index).rev().find_map(|s| *s)
    }

    fn collection_of(&self, id: NodeId) -> Option<(&[Option<NodeId>], usize)> {
        let link = self.parent_link(id)?;
        let index = link.index?;
        Some((self.tree.node(link.parent).list(link.field), index))
    }

    /// Position of the token starting at byte `offset`.
    #[must_use]
    pub fn token_position_by_range_start(&self, offset: usize) -> Option<usize> {
        self.start_index
            .get_or_init(|| {
                self.tokens
                    .iter()
                    .enumerate()
                    .map(|(pos, token)| (token.span.start, pos))
                    .collect()
            })
            .get(&offset)
            .copied()
    }

    /// Position of the token ending at byte `offset`.
    #[must_use]
    pub fn token_position_by_range_end(&self, offset: usize) -> Option<usize> {
        self.end_index
            .get_or_init(|| {
                self.tokens
                    .iter()
                    .enumerate()
                    .map(|(pos, token)| (token.span.end, pos))
                    .collect()
            })
            .get(&offset)
            .copied()
    }

    /// Position of the first token starting at or after `offset`.
    #[must_use]
    pub fn token_position_at_or_after(&self, offset: usize) -> Option<usize> {
        let pos = self.tokens.partition_point(|t| t.span.start < offset);
        (pos < self.tokens.len()).then_some(pos)
    }

    /// Position of the last token starting at or before `offset`.
    #[must_use]
    pub fn token_position_at_or_before(&self, offset: usize) -> Option<usize> {
        self.tokens
            .partition_point(|t| t.span.start <= offset)
            .checked_sub(1)
    }

    /// Token at `position`.
    #[must_use]
    pub fn token(&self, position: usize) -> Option<&Token> {
        self.tokens.get(position)
    }

    /// Position of the first token of a node.
    #[must_use]
    pub fn first_token_position(&self, id: NodeId) -> Option<usize> {
        self.token_position_by_range_start(self.node(id).span.start)
    }

    /// Position of the last token of a node.
    #[must_use]
    pub fn last_token_position(&self, id: NodeId) -> Option<usize> {
        self.token_position_by_range_end(self.node(id).span.end)
    }

    /// Token immediately before the one at `position`.
    #[must_use]
    pub fn prev_token(&self, position: usize) -> Option<&Token> {
        position.checked_sub(1).and_then(|p| self.tokens.get(p))
    }

    /// Token immediately after the one at `position`.
    #[must_use]
    pub fn next_token(&self, position: usize) -> Option<&Token> {
        self.tokens.get(position + 1)
    }

    /// Location of a node.
    #[must_use]
    pub fn loc(&self, id: NodeId) -> SourceLocation {
        self.node(id).loc
    }
}

/// Parsers accept reserved words as property names (`a.default`,
/// `{ delete: 1 }`) but still tag the token as a keyword. Such tokens are
/// turned into identifiers, at property-key and member-property positions only.
fn reclassify_keyword_names(
    tree: &SyntaxTree,
    type_index: &HashMap<NodeKind, Vec<NodeId>>,
    tokens: &mut [Token],
) {
    let name_slots = [
        (NodeKind::Property, Field::Key),
        (NodeKind::MemberExpression, Field::Property),
    ];

    for (kind, field) in name_slots {
        for &id in type_index.get(&kind).map_or(&[][..], Vec::as_slice) {
            let node = tree.node(id);
            if node.computed {
                continue;
            }
            let Some(name) = node.child(field) else {
                continue;
            };
            let offset = tree.node(name).span.start;
            if let Ok(pos) = tokens.binary_search_by_key(&offset, |t| t.span.start) {
                if tokens[pos].kind == TokenKind::Keyword {
                    tokens[pos].kind = TokenKind::Identifier;
                }
            }
        }
    }
}
