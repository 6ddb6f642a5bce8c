//! Decision Tree Classifier
use super::{
    node::Node,
    params::{SplitCriterion, TreeParams},
    split::{best_split, is_pure, majority_label},
};
use crate::{
    data::dataset::{Dataset, Number, WholeNumber},
    error::TreeError,
    metrics::confusion::ClassificationMetrics,
};
use nalgebra::{DMatrix, DVector};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::{debug, info, instrument};

/// Binary decision tree classifier over numeric features.
///
/// Each internal node tests one feature against a threshold drawn from the training samples.
/// Thresholds are chosen to maximise information gain; growth stops when a node is pure or
/// when no threshold improves on it.
#[derive(Clone, Debug)]
pub struct DecisionTreeClassifier<XT: Number, YT: WholeNumber> {
    root: Option<Node<XT, YT>>,
    n_features: usize,
    tree_params: TreeParams,
}

impl<XT: Number, YT: WholeNumber> Default for DecisionTreeClassifier<XT, YT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<XT: Number, YT: WholeNumber> ClassificationMetrics<YT> for DecisionTreeClassifier<XT, YT> {}

impl<XT: Number, YT: WholeNumber> DecisionTreeClassifier<XT, YT> {
    /// Creates an untrained classifier using the entropy criterion and no growth limits.
    pub fn new() -> Self {
        Self {
            root: None,
            n_features: 0,
            tree_params: TreeParams::new(),
        }
    }

    /// Creates an untrained classifier with custom parameters.
    ///
    /// # Arguments
    ///
    /// * `criterion` - Impurity measure used to score splits. Defaults to entropy.
    /// * `min_samples_split` - The minimum number of samples required to split an internal node.
    /// * `max_depth` - The maximum depth of the tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidParameter`] if the minimum number of samples to split is
    /// less than 2 or if the maximum depth is less than 1.
    pub fn with_params(
        criterion: Option<SplitCriterion>,
        min_samples_split: Option<u16>,
        max_depth: Option<u16>,
    ) -> Result<Self, TreeError> {
        let mut tree = Self::new();

        tree.set_criterion(criterion.unwrap_or_default());
        tree.set_min_samples_split(min_samples_split.unwrap_or(2))?;
        tree.set_max_depth(max_depth)?;
        Ok(tree)
    }

    pub fn set_criterion(&mut self, criterion: SplitCriterion) {
        self.tree_params.set_criterion(criterion)
    }

    pub fn set_min_samples_split(&mut self, min_samples_split: u16) -> Result<(), TreeError> {
        self.tree_params.set_min_samples_split(min_samples_split)
    }

    pub fn set_max_depth(&mut self, max_depth: Option<u16>) -> Result<(), TreeError> {
        self.tree_params.set_max_depth(max_depth)
    }

    pub fn params(&self) -> &TreeParams {
        &self.tree_params
    }

    pub fn criterion(&self) -> SplitCriterion {
        self.tree_params.criterion()
    }

    pub fn min_samples_split(&self) -> u16 {
        self.tree_params.min_samples_split()
    }

    pub fn max_depth(&self) -> Option<u16> {
        self.tree_params.max_depth()
    }

    /// Root of the fitted tree, or `None` before [`fit`](Self::fit) has succeeded.
    pub fn root(&self) -> Option<&Node<XT, YT>> {
        self.root.as_ref()
    }

    /// Number of features seen during training.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Builds the decision tree from a dataset, replacing any previously fitted tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidInput`] if the dataset is empty, has no feature columns, or
    /// its label count differs from its row count. The previous tree is kept in that case.
    #[instrument(
        skip(self, dataset),
        fields(n_samples = dataset.nrows(), n_features = dataset.ncols(), criterion = %self.criterion())
    )]
    pub fn fit(&mut self, dataset: &Dataset<XT, YT>) -> Result<(), TreeError> {
        dataset.validate()?;
        let fallback = majority_label(dataset.y.as_slice())
            .ok_or_else(|| TreeError::invalid_input("dataset has zero samples"))?;

        let root = self.build_tree(dataset, 0, fallback);
        info!(
            depth = root.depth(),
            n_leaves = root.n_leaves(),
            "finished building the tree"
        );

        self.n_features = dataset.ncols();
        self.root = Some(root);
        Ok(())
    }

    /// Predicts the class of a single feature vector.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::ModelNotTrained`] before the tree is fitted, and
    /// [`TreeError::DimensionMismatch`] if `features` has the wrong length.
    pub fn predict_sample(&self, features: &[XT]) -> Result<YT, TreeError> {
        let root = self.root.as_ref().ok_or(TreeError::ModelNotTrained)?;
        self.check_dimension(features.len())?;
        Ok(root.descend(features))
    }

    /// Predicts the class of every row of `prediction_features`.
    ///
    /// Rows are independent, so they are routed through the tree in parallel.
    pub fn predict(&self, prediction_features: &DMatrix<XT>) -> Result<DVector<YT>, TreeError> {
        let root = self.root.as_ref().ok_or(TreeError::ModelNotTrained)?;
        self.check_dimension(prediction_features.ncols())?;

        let predictions: Vec<YT> = (0..prediction_features.nrows())
            .into_par_iter()
            .map(|row| {
                let features: Vec<XT> = prediction_features.row(row).iter().copied().collect();
                root.descend(&features)
            })
            .collect();

        Ok(DVector::from_vec(predictions))
    }

    fn check_dimension(&self, got: usize) -> Result<(), TreeError> {
        if got != self.n_features {
            return Err(TreeError::DimensionMismatch {
                expected: self.n_features,
                got,
            });
        }
        Ok(())
    }

    /// Grows the subtree for `dataset`. `fallback` labels the node if its partition is empty.
    fn build_tree(&self, dataset: &Dataset<XT, YT>, depth: usize, fallback: YT) -> Node<XT, YT> {
        let labels = dataset.y.as_slice();
        let majority = match majority_label(labels) {
            Some(label) => label,
            None => {
                debug!(depth, label = %fallback, "empty partition, using parent majority");
                return Node::leaf(fallback);
            }
        };

        if is_pure(labels) {
            return Node::leaf(majority);
        }

        let depth_reached = self
            .max_depth()
            .is_some_and(|max_depth| depth >= usize::from(max_depth));
        if depth_reached || labels.len() < usize::from(self.min_samples_split()) {
            debug!(depth, n_samples = labels.len(), "growth limit reached");
            return Node::leaf(majority);
        }

        let Some(split) = best_split(self.criterion(), &dataset.x, labels) else {
            debug!(depth, label = %majority, "no split improves impurity");
            return Node::leaf(majority);
        };
        debug!(
            depth,
            feature = split.feature_index,
            threshold = %split.threshold,
            gain = split.gain,
            "splitting node"
        );

        let (left, right) = dataset.split_on_threshold(split.feature_index, split.threshold);
        let left_node = self.build_tree(&left, depth + 1, majority);
        let right_node = self.build_tree(&right, depth + 1, majority);

        Node::internal(split.feature_index, split.threshold, left_node, right_node)
    }
}
