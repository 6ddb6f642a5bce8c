use crate::error::TreeError;
use std::fmt::{self, Display};
use std::str::FromStr;

/// Impurity measure used to score candidate splits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SplitCriterion {
    /// Shannon entropy in bits; gain is the information gain.
    #[default]
    Entropy,
    /// Gini impurity, `1 - sum(p^2)`.
    Gini,
}

impl Display for SplitCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitCriterion::Entropy => write!(f, "entropy"),
            SplitCriterion::Gini => write!(f, "gini"),
        }
    }
}

impl FromStr for SplitCriterion {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entropy" => Ok(SplitCriterion::Entropy),
            "gini" => Ok(SplitCriterion::Gini),
            other => Err(TreeError::invalid_parameter(format!(
                "the criterion must be either 'gini' or 'entropy', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TreeParams {
    criterion: SplitCriterion,
    min_samples_split: u16,
    max_depth: Option<u16>,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeParams {
    /// Entropy criterion, no depth limit, and splits allowed down to two samples.
    pub fn new() -> Self {
        Self {
            criterion: SplitCriterion::Entropy,
            min_samples_split: 2,
            max_depth: None,
        }
    }

    pub fn set_criterion(&mut self, criterion: SplitCriterion) {
        self.criterion = criterion;
    }

    pub fn set_min_samples_split(&mut self, min_samples_split: u16) -> Result<(), TreeError> {
        if min_samples_split < 2 {
            return Err(TreeError::invalid_parameter(
                "the minimum number of samples to split must be greater than 1",
            ));
        }
        self.min_samples_split = min_samples_split;
        Ok(())
    }

    pub fn set_max_depth(&mut self, max_depth: Option<u16>) -> Result<(), TreeError> {
        if max_depth.is_some_and(|depth| depth < 1) {
            return Err(TreeError::invalid_parameter(
                "the maximum depth must be greater than 0",
            ));
        }
        self.max_depth = max_depth;
        Ok(())
    }

    pub fn criterion(&self) -> SplitCriterion {
        self.criterion
    }

    pub fn min_samples_split(&self) -> u16 {
        self.min_samples_split
    }

    pub fn max_depth(&self) -> Option<u16> {
        self.max_depth
    }
}
