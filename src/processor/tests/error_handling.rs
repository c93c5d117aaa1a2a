//! Error handling integration tests

use super::{create_record_directory, metabolite_xml};
use crate::config::StratifyConfig;
use crate::error::StratifyError;
use crate::models::GroupOrder;
use crate::processor::{StratificationProcessor, process_subset};
use std::fs;
use tempfile::TempDir;

fn quiet_config() -> StratifyConfig {
    StratifyConfig::default().with_workers(4).without_progress()
}

#[tokio::test]
async fn test_nonexistent_input_path() {
    let temp_dir = TempDir::new().unwrap();
    let nonexistent_path = temp_dir.path().join("nonexistent");

    let result = StratificationProcessor::new(nonexistent_path.clone(), None);

    match result.unwrap_err() {
        StratifyError::InputNotFound { path } => assert_eq!(path, nonexistent_path),
        other => panic!("Expected InputNotFound error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_record_aborts_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = create_record_directory(
        temp_dir.path(),
        &[
            ("HMDB0000001", Some(&[("kingdom", "Organic compounds")][..])),
            ("HMDB0000003", Some(&[("kingdom", "Organic compounds")][..])),
        ],
    );
    let broken = input_path.join("HMDB0000002.xml");
    fs::write(&broken, "<hmdb><metabolite><taxonomy></metabolite>").unwrap();
    let output_path = temp_dir.path().join("out");

    let processor = StratificationProcessor::new(input_path, Some(output_path.clone()))
        .unwrap()
        .with_config(quiet_config());

    match processor.process().await {
        Err(StratifyError::Decode { path, .. }) => assert_eq!(path, broken),
        other => panic!("Expected Decode error, got {:?}", other),
    }
    assert!(!output_path.exists(), "no output may be written on failure");
}

#[tokio::test]
async fn test_missing_metabolite_element_is_decode_error() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = create_record_directory(temp_dir.path(), &[]);
    fs::write(
        input_path.join("HMDB0000001.xml"),
        "<?xml version=\"1.0\"?><hmdb><drug><name>x</name></drug></hmdb>",
    )
    .unwrap();

    let processor = StratificationProcessor::new(input_path, Some(temp_dir.path().join("out")))
        .unwrap()
        .with_config(quiet_config());

    match processor.process().await {
        Err(StratifyError::Decode { reason, .. }) => assert!(reason.contains("metabolite")),
        other => panic!("Expected Decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unranked_group_aborts_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = create_record_directory(
        temp_dir.path(),
        &[(
            "HMDB0000001",
            Some(&[("kingdom", "Organic compounds"), ("class", "Indoles")][..]),
        )],
    );
    let output_path = temp_dir.path().join("out");

    // "class" is extracted but has no rank
    let order: GroupOrder = [("kingdom".to_string(), 0), ("super_class".to_string(), 1)]
        .into_iter()
        .collect();
    let config = quiet_config()
        .with_fields(vec!["kingdom".into(), "super_class".into(), "class".into()])
        .with_group_order(order);

    let processor = StratificationProcessor::new(input_path, Some(output_path.clone()))
        .unwrap()
        .with_config(config);
    assert!(matches!(
        processor.process().await,
        Err(StratifyError::Configuration { .. })
    ));
    assert!(!output_path.exists());
}

#[tokio::test]
async fn test_blocked_output_leaves_no_partial_results() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = create_record_directory(
        temp_dir.path(),
        &[("HMDB0000001", Some(&[("kingdom", "Organic compounds")][..]))],
    );
    let output_path = temp_dir.path().join("out");
    fs::create_dir_all(output_path.join("hmdb_stratification_tsv.tsv")).unwrap();

    let processor = StratificationProcessor::new(input_path, Some(output_path.clone()))
        .unwrap()
        .with_config(quiet_config().with_save_classifications());

    assert!(matches!(
        processor.process().await,
        Err(StratifyError::Io(_))
    ));
    let names: Vec<String> = fs::read_dir(&output_path)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["hmdb_stratification_tsv.tsv"]);
}

#[tokio::test]
async fn test_structured_taxonomy_value_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = create_record_directory(temp_dir.path(), &[]);
    let xml = metabolite_xml("HMDB0000001", Some(&[("kingdom", "Organic compounds")][..]))
        .replace(
            "<kingdom>Organic compounds</kingdom>",
            "<kingdom>Organic</kingdom><kingdom>Inorganic</kingdom>",
        );
    fs::write(input_path.join("HMDB0000001.xml"), xml).unwrap();

    let processor = StratificationProcessor::new(input_path, Some(temp_dir.path().join("out")))
        .unwrap()
        .with_config(quiet_config());

    match processor.process().await {
        Err(StratifyError::InvalidRecord { field, .. }) => assert_eq!(field, "kingdom"),
        other => panic!("Expected InvalidRecord error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_zero_workers_uses_cpu_count() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = create_record_directory(
        temp_dir.path(),
        &[("HMDB0000001", Some(&[("kingdom", "Organic compounds")][..]))],
    );

    let processor = StratificationProcessor::new(input_path, Some(temp_dir.path().join("out")))
        .unwrap()
        .with_config(quiet_config().with_workers(0));

    let stats = processor.process().await.unwrap();
    assert_eq!(stats.records_classified, 1);
}

#[tokio::test]
async fn test_subset_missing_dump() {
    let temp_dir = TempDir::new().unwrap();

    let result = process_subset(
        &temp_dir.path().join("missing.json"),
        temp_dir.path(),
        "super_class",
        "Lipids and lipid-like molecules",
        &quiet_config(),
    )
    .await;

    assert!(matches!(result, Err(StratifyError::Io(_))));
}

#[tokio::test]
async fn test_subset_malformed_dump() {
    let temp_dir = TempDir::new().unwrap();
    let dump = temp_dir.path().join("dump.json");
    fs::write(&dump, "{\"HMDB0000001\": [1, 2]}").unwrap();

    let result = process_subset(
        &dump,
        temp_dir.path(),
        "super_class",
        "Lipids and lipid-like molecules",
        &quiet_config(),
    )
    .await;

    assert!(matches!(result, Err(StratifyError::Json(_))));
}
