/// Decision tree classifier
pub mod classifier;
/// Tree nodes
pub mod node;
/// Hyperparameters
pub mod params;
/// Impurity measures and split search
pub mod split;
