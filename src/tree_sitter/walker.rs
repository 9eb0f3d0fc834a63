//! Pre-order traversal of a syntax tree
//!
//! Uses a single `TreeCursor` and nothing but first-child, next-sibling and
//! parent moves, so walking a tree never recurses and never allocates per
//! node.

use std::iter::FusedIterator;

use tree_sitter::{Node, Tree, TreeCursor};

/// Walk every node of `tree` in pre-order.
pub fn treewalk(tree: &Tree) -> TreeWalk<'_> {
    TreeWalk {
        cursor: tree.walk(),
        done: false,
    }
}

/// Lazy pre-order iterator over a (sub)tree.
///
/// Parents come before their children and siblings are visited left to
/// right. The iterator is one-shot: call [`treewalk`] again for a fresh pass.
pub struct TreeWalk<'tree> {
    cursor: TreeCursor<'tree>,
    done: bool,
}

impl<'tree> TreeWalk<'tree> {
    /// Walk the subtree rooted at `node`; the walk never leaves it.
    pub fn from_node(node: Node<'tree>) -> Self {
        Self {
            cursor: node.walk(),
            done: false,
        }
    }

    fn advance(&mut self) {
        if self.cursor.goto_first_child() || self.cursor.goto_next_sibling() {
            return;
        }

        loop {
            if !self.cursor.goto_parent() {
                self.done = true;
                return;
            }
            if self.cursor.goto_next_sibling() {
                return;
            }
        }
    }
}

impl<'tree> Iterator for TreeWalk<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let node = self.cursor.node();
        self.advance();
        Some(node)
    }
}

impl FusedIterator for TreeWalk<'_> {}
