//! Property-based tests for duplicate detection.
//!
//! These tests use proptest to generate random exports and verify that the
//! detector maintains its invariants under all conditions.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p dexa-screen --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p dexa-screen --test property_tests
//! ```

use std::collections::HashSet;

use proptest::prelude::*;

use dexa_screen::{Dataset, DiscrepancyDetector, MemoryLog};

const METADATA: [&str; 5] = [
    "DXA_subjID",
    "DXA_subVisit",
    "DXA_date#1_1",
    "DXA_date#2_1",
    "DXA_date#3_1",
];
const PARAMETERS: [&str; 3] = ["DXA_BMD", "DXA_FAT", "DXA_LEAN"];

// =============================================================================
// Test Strategies
// =============================================================================

/// A row: small metadata domain so duplicates are common, and parameters
/// drawn from a few values so both agreement and disagreement occur.
fn row() -> impl Strategy<Value = Vec<String>> {
    (
        0u8..4,
        0u8..2,
        prop::sample::select(vec!["Jan", "Feb"]),
        prop::collection::vec(prop::sample::select(vec!["1.2", "1.3", "", "x"]), 3),
    )
        .prop_map(|(subject, visit, month, params)| {
            let mut cells = vec![
                format!("S{}", subject),
                format!("V{}", visit),
                month.to_string(),
                "5".to_string(),
                "2020".to_string(),
            ];
            cells.extend(params.into_iter().map(str::to_string));
            cells
        })
}

fn dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(row(), 0..24).prop_map(|rows| {
        let headers = METADATA
            .iter()
            .chain(PARAMETERS.iter())
            .map(|s| s.to_string())
            .collect();
        Dataset::from_raw(headers, rows)
    })
}

/// Rows with all-distinct metadata tuples.
fn unique_dataset() -> impl Strategy<Value = Dataset> {
    dataset().prop_map(|mut data| {
        for (i, row) in data.rows.iter_mut().enumerate() {
            row[0] = dexa_screen::Value::Text(format!("U{}", i));
        }
        data
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn detection_is_deterministic(data in dataset()) {
        let detector = DiscrepancyDetector::new();
        let first = detector.detect(&data).unwrap();
        let second = detector.detect(&data).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn no_duplicates_means_no_discrepancies(data in unique_dataset()) {
        let detection = DiscrepancyDetector::new().detect(&data).unwrap();
        prop_assert!(detection.discrepancies.is_empty());
        prop_assert_eq!(detection.duplicate_groups, 0);
    }

    #[test]
    fn at_most_one_record_per_key(data in dataset()) {
        let detection = DiscrepancyDetector::new().detect(&data).unwrap();
        let mut keys = HashSet::new();
        for d in &detection.discrepancies {
            prop_assert!(keys.insert((d.subject_id.clone(), d.visit.clone(), d.parameter.clone())));
        }
    }

    #[test]
    fn records_come_from_disagreeing_pairs(data in dataset()) {
        let detection = DiscrepancyDetector::new().detect(&data).unwrap();
        for d in &detection.discrepancies {
            let [a, b] = d.rows;
            prop_assert!(a < b);
            let col = data.column_index(&d.parameter).unwrap();
            prop_assert_eq!(&data.rows[a][col], &d.record_1);
            prop_assert_eq!(&data.rows[b][col], &d.record_2);
            prop_assert_ne!(&d.record_1, &d.record_2);
            prop_assert_eq!(&data.rows[a][..5], &data.rows[b][..5]);

            // The pair is the whole group.
            let group_size = data.rows.iter().filter(|r| r[..5] == data.rows[a][..5]).count();
            prop_assert_eq!(group_size, 2);
        }
    }

    #[test]
    fn log_lines_match_records(data in dataset()) {
        let mut log = MemoryLog::new();
        let detection = DiscrepancyDetector::new().run(&data, &mut log).unwrap();
        prop_assert_eq!(log.len(), detection.discrepancies.len());
        for (line, d) in log.lines().iter().zip(&detection.discrepancies) {
            prop_assert_eq!(line, &format!("INFO:root:{}", d));
        }
    }
}
