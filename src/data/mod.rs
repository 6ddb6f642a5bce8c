/// Feature matrices paired with class labels
pub mod dataset;
