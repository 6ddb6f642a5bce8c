use std::collections::{BTreeMap, BTreeSet};

use nalgebra::{DMatrix, DVector};

use crate::{data::dataset::WholeNumber, error::TreeError};

type ConfusionMatrix = DMatrix<usize>;

pub trait ClassificationMetrics<T: WholeNumber> {
    /// Computes the confusion matrix based on the true labels and predicted labels.
    ///
    /// Rows are indexed by true class and columns by predicted class, both in ascending
    /// label order over every class that appears in either vector.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidInput`] if the vectors differ in length or are empty.
    fn confusion_matrix(
        &self,
        y_true: &DVector<T>,
        y_pred: &DVector<T>,
    ) -> Result<ConfusionMatrix, TreeError> {
        if y_true.len() != y_pred.len() {
            return Err(TreeError::invalid_input(
                "predictions and labels are of different sizes",
            ));
        }
        if y_true.is_empty() {
            return Err(TreeError::invalid_input("no labels to compare"));
        }

        // Every label of either vector is a key, in ascending order.
        let class_index: BTreeMap<T, usize> = y_true
            .iter()
            .chain(y_pred.iter())
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(index, class)| (class, index))
            .collect();

        let mut matrix = DMatrix::zeros(class_index.len(), class_index.len());
        for (y_t, y_p) in y_true.iter().zip(y_pred.iter()) {
            matrix[(class_index[y_t], class_index[y_p])] += 1;
        }

        Ok(matrix)
    }

    /// Fraction of predictions that match the true label.
    fn accuracy(&self, y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<f64, TreeError> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;
        let correct: usize = matrix.diagonal().iter().sum();

        Ok(correct as f64 / y_true.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockClassifier;

    impl ClassificationMetrics<u8> for MockClassifier {}

    #[test]
    fn test_confusion_matrix() {
        let y_true = DVector::from_vec(vec![1, 0, 1, 0, 1]);
        let y_pred = DVector::from_vec(vec![1, 1, 0, 0, 1]);

        let result = MockClassifier.confusion_matrix(&y_true, &y_pred).unwrap();

        let expected = DMatrix::from_row_slice(2, 2, &[1, 1, 1, 2]);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_confusion_matrix_multiclass() {
        let y_true = DVector::from_vec(vec![0, 1, 2, 1, 0, 2]);
        let y_pred = DVector::from_vec(vec![0, 2, 1, 1, 0, 2]);

        let result = MockClassifier.confusion_matrix(&y_true, &y_pred).unwrap();

        let expected = DMatrix::from_row_slice(3, 3, &[2, 0, 0, 0, 1, 1, 0, 1, 1]);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_confusion_matrix_predicted_class_missing_from_truth() {
        let y_true = DVector::from_vec(vec![3, 3]);
        let y_pred = DVector::from_vec(vec![3, 7]);

        let result = MockClassifier.confusion_matrix(&y_true, &y_pred).unwrap();

        assert_eq!(result, DMatrix::from_row_slice(2, 2, &[1, 1, 0, 0]));
    }

    #[test]
    fn test_confusion_matrix_sparse_labels() {
        let y_true = DVector::from_vec(vec![9, 2, 5, 9]);
        let y_pred = DVector::from_vec(vec![9, 5, 2, 2]);

        let result = MockClassifier.confusion_matrix(&y_true, &y_pred).unwrap();

        let expected = DMatrix::from_row_slice(3, 3, &[0, 1, 0, 1, 0, 0, 1, 0, 1]);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_confusion_matrix_unequal() {
        let y_true = DVector::from_vec(vec![1, 0, 1, 0, 1, 0]);
        let y_pred = DVector::from_vec(vec![1, 1, 0, 0, 1]);

        assert!(MockClassifier.confusion_matrix(&y_true, &y_pred).is_err());
    }

    #[test]
    fn test_accuracy() {
        let y_true = DVector::from_vec(vec![1, 0, 1, 0, 1]);
        let y_pred = DVector::from_vec(vec![1, 1, 0, 0, 1]);

        assert_eq!(MockClassifier.accuracy(&y_true, &y_pred), Ok(0.6));
    }

    #[test]
    fn test_accuracy_empty() {
        let empty = DVector::<u8>::from_vec(vec![]);
        assert!(MockClassifier.accuracy(&empty, &empty).is_err());
    }
}
