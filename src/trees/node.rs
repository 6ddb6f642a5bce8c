use crate::data::dataset::{Number, WholeNumber};

/// Decision tree node
///
/// Every `Internal` node owns exactly two children; leaves own none.
#[derive(Clone, Debug, PartialEq)]
pub enum Node<XT: Number, YT: WholeNumber> {
    /// Terminal node carrying the predicted class.
    Leaf { label: YT },
    /// Decision node: samples with `features[feature_index] <= threshold` go left.
    Internal {
        feature_index: usize,
        threshold: XT,
        left: Box<Node<XT, YT>>,
        right: Box<Node<XT, YT>>,
    },
}

impl<XT: Number, YT: WholeNumber> Node<XT, YT> {
    pub fn leaf(label: YT) -> Self {
        Node::Leaf { label }
    }

    pub fn internal(
        feature_index: usize,
        threshold: XT,
        left: Node<XT, YT>,
        right: Node<XT, YT>,
    ) -> Self {
        Node::Internal {
            feature_index,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Returns the label if this node is a leaf.
    pub fn label(&self) -> Option<YT> {
        match self {
            Node::Leaf { label } => Some(*label),
            Node::Internal { .. } => None,
        }
    }

    /// Number of edges on the longest path down to a leaf. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }

    /// Walks from this node down to a leaf, following `features`.
    ///
    /// Callers must make sure `features` is long enough for every feature index on the path.
    pub(crate) fn descend(&self, features: &[XT]) -> YT {
        let mut node = self;
        loop {
            match node {
                Node::Leaf { label } => return *label,
                Node::Internal {
                    feature_index,
                    threshold,
                    left,
                    right,
                } => {
                    node = if features[*feature_index] <= *threshold {
                        left.as_ref()
                    } else {
                        right.as_ref()
                    };
                }
            }
        }
    }
}
