//! Impurity measures and exhaustive threshold search.
use super::params::SplitCriterion;
use crate::data::dataset::{Number, WholeNumber};
use nalgebra::DMatrix;
use std::collections::BTreeMap;

/// Best `(feature, threshold)` pair found at a node, with the gain it achieves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitCandidate<XT: Number> {
    pub feature_index: usize,
    pub threshold: XT,
    pub gain: f64,
}

/// Class frequencies, in ascending label order.
fn class_counts<YT: WholeNumber>(labels: &[YT]) -> BTreeMap<YT, usize> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(*label).or_insert(0) += 1;
    }
    counts
}

/// Shannon entropy of the label distribution, in bits. Empty input has entropy 0.
pub fn entropy<YT: WholeNumber>(labels: &[YT]) -> f64 {
    let total = labels.len() as f64;
    class_counts(labels).values().fold(0.0, |entropy, &count| {
        let p = count as f64 / total;
        entropy - p * p.log2()
    })
}

/// Gini impurity of the label distribution. Empty input has impurity 0.
pub fn gini<YT: WholeNumber>(labels: &[YT]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    let total = labels.len() as f64;
    let sum_sq = class_counts(labels).values().fold(0.0, |acc, &count| {
        let p = count as f64 / total;
        acc + p * p
    });
    1.0 - sum_sq
}

pub fn impurity<YT: WholeNumber>(criterion: SplitCriterion, labels: &[YT]) -> f64 {
    match criterion {
        SplitCriterion::Entropy => entropy(labels),
        SplitCriterion::Gini => gini(labels),
    }
}

/// Reduction in impurity from splitting `parent` into `left` and `right`.
pub fn information_gain<YT: WholeNumber>(
    criterion: SplitCriterion,
    parent: &[YT],
    left: &[YT],
    right: &[YT],
) -> f64 {
    weighted_gain(criterion, impurity(criterion, parent), parent.len(), left, right)
}

fn weighted_gain<YT: WholeNumber>(
    criterion: SplitCriterion,
    parent_impurity: f64,
    parent_len: usize,
    left: &[YT],
    right: &[YT],
) -> f64 {
    if parent_len == 0 {
        return 0.0;
    }
    let weight_left = left.len() as f64 / parent_len as f64;
    let weight_right = right.len() as f64 / parent_len as f64;

    parent_impurity
        - (weight_left * impurity(criterion, left) + weight_right * impurity(criterion, right))
}

/// Partitions `labels` by `x[i][feature_index] <= threshold`.
pub fn split_labels<XT: Number, YT: WholeNumber>(
    x: &DMatrix<XT>,
    labels: &[YT],
    feature_index: usize,
    threshold: XT,
) -> (Vec<YT>, Vec<YT>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for (row, label) in labels.iter().enumerate() {
        if x[(row, feature_index)] <= threshold {
            left.push(*label);
        } else {
            right.push(*label);
        }
    }
    (left, right)
}

/// `true` when every label equals the first one. Empty input counts as pure.
pub fn is_pure<YT: WholeNumber>(labels: &[YT]) -> bool {
    match labels.first() {
        Some(first) => labels.iter().all(|label| label == first),
        None => true,
    }
}

/// Most frequent label; among equally frequent labels the smallest wins.
pub fn majority_label<YT: WholeNumber>(labels: &[YT]) -> Option<YT> {
    let mut best: Option<(YT, usize)> = None;
    for (label, count) in class_counts(labels) {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}

/// Scores every sample value of every feature as a threshold and returns the best one.
///
/// Features are scanned in index order and, within a feature, samples in row order. Only a
/// gain strictly above the best seen so far (starting at 0.0) replaces it, so the earliest
/// candidate wins ties and a node where no split improves impurity yields `None`.
pub fn best_split<XT: Number, YT: WholeNumber>(
    criterion: SplitCriterion,
    x: &DMatrix<XT>,
    labels: &[YT],
) -> Option<SplitCandidate<XT>> {
    let parent_impurity = impurity(criterion, labels);

    (0..x.ncols())
        .flat_map(move |feature_index| {
            (0..x.nrows()).map(move |row| (feature_index, x[(row, feature_index)]))
        })
        .fold(None, |best: Option<SplitCandidate<XT>>, (feature_index, threshold)| {
            let (left, right) = split_labels(x, labels, feature_index, threshold);
            let gain = weighted_gain(criterion, parent_impurity, labels.len(), &left, &right);
            let best_gain = best.map_or(0.0, |candidate| candidate.gain);
            if gain > best_gain {
                Some(SplitCandidate {
                    feature_index,
                    threshold,
                    gain,
                })
            } else {
                best
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_entropy_pure() {
        assert_eq!(entropy(&[4, 4, 4]), 0.0);
        assert_eq!(entropy::<i32>(&[]), 0.0);
    }

    #[test]
    fn test_entropy_balanced() {
        assert_abs_diff_eq!(entropy(&[0, 1, 0, 1, 1, 0]), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(entropy(&[0, 1, 2, 3]), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_entropy_skewed() {
        let expected = -(0.25 * 0.25f64.log2() + 0.75 * 0.75f64.log2());
        assert_abs_diff_eq!(entropy(&[1, 0, 0, 0]), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_gini() {
        assert_eq!(gini(&[2, 2]), 0.0);
        assert_eq!(gini::<u8>(&[]), 0.0);
        assert_abs_diff_eq!(gini(&[0, 1]), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(gini(&[0, 0, 0, 1]), 0.375, epsilon = 1e-12);
    }

    #[test]
    fn test_information_gain() {
        let gain = information_gain(SplitCriterion::Entropy, &[0, 0, 1, 1], &[0, 0], &[1, 1]);
        assert_abs_diff_eq!(gain, 1.0, epsilon = 1e-9);

        let gain = information_gain(SplitCriterion::Entropy, &[0, 1], &[0, 1], &[]);
        assert_eq!(gain, 0.0);

        let gain = information_gain(SplitCriterion::Gini, &[0, 0, 1, 1], &[0, 0], &[1, 1]);
        assert_abs_diff_eq!(gain, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_split_labels() {
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 9.0, 2.0, 8.0, 3.0, 7.0, 4.0, 6.0]);
        let (left, right) = split_labels(&x, &[10, 11, 12, 13], 1, 7.0);
        assert_eq!(left, vec![12, 13]);
        assert_eq!(right, vec![10, 11]);
    }

    #[test]
    fn test_is_pure() {
        assert!(is_pure(&[1, 1, 1]));
        assert!(!is_pure(&[1, 2, 1]));
        assert!(is_pure::<i32>(&[]));
    }

    #[test]
    fn test_majority_label() {
        assert_eq!(majority_label(&[3, 1, 3, 2]), Some(3));
        assert_eq!(majority_label(&[2, 1, 1, 2]), Some(1));
        assert_eq!(majority_label::<i64>(&[]), None);
    }

    #[test]
    fn test_best_split_picks_maximum_gain() {
        let x = DMatrix::from_row_slice(4, 1, &[1.0, 2.0, 3.0, 4.0]);
        let best = best_split(SplitCriterion::Entropy, &x, &[0, 0, 1, 1]).unwrap();
        assert_eq!(best.feature_index, 0);
        assert_eq!(best.threshold, 2.0);
        assert_abs_diff_eq!(best.gain, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_best_split_earlier_feature_wins_ties() {
        let x = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 2.0, 2.0]);
        let best = best_split(SplitCriterion::Entropy, &x, &[0, 1]).unwrap();
        assert_eq!(best.feature_index, 0);
        assert_eq!(best.threshold, 1.0);
    }

    #[test]
    fn test_best_split_earlier_sample_wins_ties() {
        // Thresholds 3.0 and 1.0 score the same; 3.0 appears first in row order.
        let x = DMatrix::from_row_slice(4, 1, &[4.0, 2.0, 3.0, 1.0]);
        let best = best_split(SplitCriterion::Entropy, &x, &[0, 1, 1, 0]).unwrap();
        assert_eq!(best.threshold, 3.0);
    }

    #[test]
    fn test_best_split_none_without_gain() {
        let x = DMatrix::from_row_slice(2, 1, &[5.0, 5.0]);
        assert!(best_split(SplitCriterion::Entropy, &x, &[0, 1]).is_none());

        let xor = DMatrix::from_row_slice(4, 2, &[0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0]);
        assert!(best_split(SplitCriterion::Entropy, &xor, &[0, 1, 1, 0]).is_none());
        assert!(best_split(SplitCriterion::Gini, &xor, &[0, 1, 1, 0]).is_none());
    }
}
