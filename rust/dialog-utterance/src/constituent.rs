//! Flattening a parse into the constituents downstream extraction reads.
//!
//! ```text
//! (S (STATEMENT (NP (PROPN (NNP Thomas))) (VP (V (VBZ likes))) (NP (NOM (N (NNS dogs))))))
//!
//!   0: NP  "Thomas"
//!   1: VP  "likes"
//!   2: NP  "dogs"
//! ```

use std::collections::BTreeMap;

use dialog_grammar::Tree;
use serde::Serialize;

/// A labeled span directly below a clause node of the first parse tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constituent {
    pub label: String,
    pub structure: Tree,
    /// Surface words joined with `-`.
    pub raw: String,
}

pub type ConstituentMap = BTreeMap<usize, Constituent>;

/// Constituents of the first tree in `forest`, numbered left to right.
pub fn extract_constituents(forest: &[Tree]) -> ConstituentMap {
    let Some(tree) = forest.first() else {
        return ConstituentMap::new();
    };

    tree.subtrees()
        .flat_map(|clause| clause.subtrees())
        .enumerate()
        .map(|(index, branch)| {
            let constituent = Constituent {
                label: branch.label().to_string(),
                structure: branch.clone(),
                raw: branch.leaves().join("-"),
            };
            (index, constituent)
        })
        .collect()
}
