/// Errors from decision tree training and inference.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// Returned when the training data is empty, ragged, or its labels don't line up with it.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Human-readable description of what is wrong with the input.
        reason: String,
    },

    /// Returned when a hyperparameter is outside its allowed range.
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Human-readable description of the rejected value.
        reason: String,
    },

    /// Returned when predicting with a tree that was never fitted.
    #[error("tree wasn't built yet")]
    ModelNotTrained,

    /// Returned when a sample has a different number of features than the training data.
    #[error("sample has {got} features, expected {expected}")]
    DimensionMismatch {
        /// The number of features seen during training.
        expected: usize,
        /// The number of features in the offending sample.
        got: usize,
    },
}

impl TreeError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }
}
