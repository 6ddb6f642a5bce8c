//! # Rusty-tree
//!
//! `rusty-tree` is a binary decision tree classifier for numeric features. Trees are grown by
//! recursive partitioning: at every node each sample value of each feature is tried as a
//! threshold, and the one with the highest information gain splits the node in two.
//!
//! ## Example Usage
//!
//! ```rust
//! use rusty_tree::data::dataset::Dataset;
//! use rusty_tree::trees::classifier::DecisionTreeClassifier;
//!
//! let rows = vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]];
//! let dataset = Dataset::from_rows(&rows, &[0, 0, 1, 1]).unwrap();
//!
//! let mut tree = DecisionTreeClassifier::new();
//! tree.fit(&dataset).unwrap();
//!
//! assert_eq!(tree.predict_sample(&[1.5]).unwrap(), 0);
//! assert_eq!(tree.predict_sample(&[3.5]).unwrap(), 1);
//! ```

/// Dataset and data manipulation utilities
pub mod data;
/// Error type shared by every fallible operation
pub mod error;
/// Functions for evaluating model performance
pub mod metrics;
/// Decision trees
pub mod trees;

pub use error::TreeError;
