use csv::ReaderBuilder;
use rusty_tree::data::dataset::Dataset;
use rusty_tree::metrics::confusion::ClassificationMetrics;
use rusty_tree::trees::classifier::DecisionTreeClassifier;
use std::collections::HashMap;
use std::env;
use std::error::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: test-algos <csv-path> <dimension> [--header]";

/// Reads `dimension` numeric feature columns followed by a class-name column.
///
/// Class names are numbered in order of first appearance.
fn read_file_classification(
    file_path: &str,
    dimension: usize,
    header: bool,
) -> Result<Dataset<f64, u32>, Box<dyn Error>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(header)
        .from_path(file_path)?;
    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut label_map: HashMap<String, u32> = HashMap::new();

    for result in reader.records() {
        let record = result?;
        let mut feature_row = Vec::with_capacity(dimension);

        for feature in record.iter().take(dimension) {
            feature_row.push(feature.trim().parse::<f64>()?);
        }

        let label = record.get(dimension).ok_or("Missing label")?;
        let next_id = label_map.len() as u32;
        let label_id = *label_map.entry(label.trim().to_string()).or_insert(next_id);

        features.push(feature_row);
        labels.push(label_id);
    }
    info!(rows = features.len(), classes = label_map.len(), "read {}", file_path);

    Ok(Dataset::from_rows(&features, &labels)?)
}

fn test_tree_classifier(
    train_dataset: &Dataset<f64, u32>,
    test_dataset: &Dataset<f64, u32>,
) -> Result<String, Box<dyn Error>> {
    let mut classifier = DecisionTreeClassifier::new();
    classifier.fit(train_dataset)?;

    let predictions = classifier.predict(&test_dataset.x)?;
    let accuracy = classifier.accuracy(&test_dataset.y, &predictions)?;

    Ok(format!("Accuracy: {}%", accuracy * 100.0))
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let file_path = args.first().ok_or(USAGE)?;
    let dimension = args.get(1).ok_or(USAGE)?.parse::<usize>()?;
    let header = args.iter().any(|arg| arg == "--header");

    let dataset = read_file_classification(file_path, dimension, header)?;
    let (train_dataset, test_dataset) = dataset.train_test_split(0.75, Some(42))?;

    println!("Train: {}", test_tree_classifier(&train_dataset, &train_dataset)?);
    if test_dataset.nrows() > 0 {
        println!("Test: {}", test_tree_classifier(&train_dataset, &test_dataset)?);
    }
    Ok(())
}
