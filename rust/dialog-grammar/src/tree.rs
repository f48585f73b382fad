//! Parse trees.
//!
//! A [`Tree`] is a labeled node whose children are either subtrees or leaf
//! words. Trees display in the usual bracketed notation:
//!
//! ```text
//! (S (STATEMENT (NP (PROPN (NNP Thomas))) (VP (V (VBZ likes))) (NP (NOM (N (NNS dogs))))))
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A child of a tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Tree(Tree),
    Leaf(String),
}

impl Node {
    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Node::Tree(tree) => Some(tree),
            Node::Leaf(_) => None,
        }
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a str>) {
        match self {
            Node::Tree(tree) => {
                for child in &tree.children {
                    child.collect_leaves(leaves);
                }
            }
            Node::Leaf(word) => leaves.push(word),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Tree(tree) => write!(f, "{tree}"),
            Node::Leaf(word) => write!(f, "{word}"),
        }
    }
}

/// A labeled parse tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    label: String,
    children: Vec<Node>,
}

impl Tree {
    pub fn new(label: impl Into<String>, children: Vec<Node>) -> Self {
        Tree {
            label: label.into(),
            children,
        }
    }

    /// The nonterminal this node was derived from.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child nodes that are trees, skipping leaf words.
    pub fn subtrees(&self) -> impl Iterator<Item = &Tree> {
        self.children.iter().filter_map(Node::as_tree)
    }

    /// All leaf words under this node, left to right.
    pub fn leaves(&self) -> Vec<&str> {
        let mut leaves = Vec::new();
        for child in &self.children {
            child.collect_leaves(&mut leaves);
        }
        leaves
    }

    /// Number of nodes on the longest path from this node to a leaf,
    /// counting the leaf.
    pub fn height(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| match child {
                Node::Tree(tree) => tree.height(),
                Node::Leaf(_) => 1,
            })
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.label)?;
        for child in &self.children {
            write!(f, " {child}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn leaf(word: &str) -> Node {
        Node::Leaf(word.into())
    }

    fn sample() -> Tree {
        Tree::new(
            "S",
            vec![
                Node::Tree(Tree::new("NP", vec![Node::Tree(Tree::new("NNP", vec![leaf("Thomas")]))])),
                Node::Tree(Tree::new(
                    "VP",
                    vec![
                        Node::Tree(Tree::new("VBZ", vec![leaf("likes")])),
                        Node::Tree(Tree::new("NNS", vec![leaf("dogs")])),
                    ],
                )),
            ],
        )
    }

    #[test]
    fn leaves_are_collected_left_to_right() {
        assert_eq!(sample().leaves(), vec!["Thomas", "likes", "dogs"]);
    }

    #[test]
    fn display_uses_bracketed_notation() {
        assert_eq!(
            sample().to_string(),
            "(S (NP (NNP Thomas)) (VP (VBZ likes) (NNS dogs)))"
        );
    }

    #[test]
    fn subtrees_skip_leaves() {
        let tree = Tree::new("X", vec![leaf("a"), Node::Tree(Tree::new("Y", vec![leaf("b")]))]);
        let labels: Vec<&str> = tree.subtrees().map(Tree::label).collect();
        assert_eq!(labels, vec!["Y"]);
    }

    #[test]
    fn height_counts_leaf_level() {
        assert_eq!(sample().height(), 4);
    }

    #[test]
    fn serializes_children_untagged() {
        let tree = Tree::new("NN", vec![leaf("dog")]);
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"{"label":"NN","children":["dog"]}"#);
    }
}
