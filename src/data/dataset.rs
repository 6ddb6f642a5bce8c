use crate::error::TreeError;
use nalgebra::{DMatrix, DVector};
use num_traits::Num;
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use std::cmp::PartialOrd;
use std::fmt::{Debug, Display};
use std::hash::Hash;

pub trait DataValue:
    Debug
    + Clone
    + Copy
    + Num
    + Send
    + Sync
    + Display
    + 'static
{
}

impl<T> DataValue for T where
    T: Debug
        + Clone
        + Copy
        + Num
        + Send
        + Sync
        + Display
        + 'static
{
}

/// Feature values: anything numeric that can be compared against a threshold.
pub trait Number: DataValue + PartialOrd {}
impl<T> Number for T where T: DataValue + PartialOrd {}

/// Class labels: totally ordered so that ties between classes resolve to the smallest id.
pub trait WholeNumber: Number + Eq + Ord + Hash {}
impl<T> WholeNumber for T where T: Number + Eq + Ord + Hash {}

pub trait TargetValue: DataValue {}
impl<T> TargetValue for T where T: DataValue {}

/// Feature matrix (one row per sample) paired with its label vector.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset<XT: Number, YT: TargetValue> {
    pub x: DMatrix<XT>,
    pub y: DVector<YT>,
}

impl<XT: Number, YT: TargetValue> Dataset<XT, YT> {
    pub fn new(x: DMatrix<XT>, y: DVector<YT>) -> Self {
        Self { x, y }
    }

    /// Builds a dataset from feature rows and their parallel labels.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidInput`] if there are no rows, the rows are empty or ragged,
    /// or the number of labels differs from the number of rows.
    pub fn from_rows(rows: &[Vec<XT>], labels: &[YT]) -> Result<Self, TreeError> {
        if rows.len() != labels.len() {
            return Err(TreeError::invalid_input(format!(
                "{} feature rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }
        let num_features = rows
            .first()
            .map(Vec::len)
            .ok_or_else(|| TreeError::invalid_input("dataset has zero samples"))?;
        if num_features == 0 {
            return Err(TreeError::invalid_input("dataset has zero feature columns"));
        }
        if let Some(index) = rows.iter().position(|row| row.len() != num_features) {
            return Err(TreeError::invalid_input(format!(
                "row {} has {} features, expected {}",
                index,
                rows[index].len(),
                num_features
            )));
        }

        Ok(Self::new(
            DMatrix::from_row_slice(rows.len(), num_features, &rows.concat()),
            DVector::from_column_slice(labels),
        ))
    }

    /// Checks that the dataset is usable for training.
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.x.nrows() != self.y.len() {
            return Err(TreeError::invalid_input(format!(
                "{} feature rows but {} labels",
                self.x.nrows(),
                self.y.len()
            )));
        }
        if self.x.nrows() == 0 {
            return Err(TreeError::invalid_input("dataset has zero samples"));
        }
        if self.x.ncols() == 0 {
            return Err(TreeError::invalid_input("dataset has zero feature columns"));
        }
        Ok(())
    }

    pub fn nrows(&self) -> usize {
        self.x.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.x.ncols()
    }

    /// Splits the dataset in two, shuffling rows first.
    ///
    /// # Arguments
    ///
    /// * `train_size` - Fraction of rows that go into the training half, in `[0.0, 1.0]`.
    /// * `seed` - Optional seed for a reproducible shuffle.
    pub fn train_test_split(
        &self,
        train_size: f64,
        seed: Option<u64>,
    ) -> Result<(Self, Self), TreeError> {
        if !(0.0..=1.0).contains(&train_size) {
            return Err(TreeError::invalid_parameter(
                "train size should be between 0.0 and 1.0",
            ));
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut indices = (0..self.nrows()).collect::<Vec<_>>();
        indices.shuffle(&mut rng);
        let train_rows = (self.nrows() as f64 * train_size).floor() as usize;
        let (train_indices, test_indices) = indices.split_at(train_rows);

        Ok((self.select(train_indices), self.select(test_indices)))
    }

    /// Partitions rows by `x[i][feature_index] <= threshold`, keeping their relative order.
    pub fn split_on_threshold(&self, feature_index: usize, threshold: XT) -> (Self, Self) {
        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) =
            (0..self.nrows()).partition(|&row| self.x[(row, feature_index)] <= threshold);

        (self.select(&left_indices), self.select(&right_indices))
    }

    fn select(&self, indices: &[usize]) -> Self {
        Self::new(self.x.select_rows(indices), self.y.select_rows(indices))
    }
}
