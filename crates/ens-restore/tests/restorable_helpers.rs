use ens_core::EnsError;
use ens_restore::restorable::{join_histogram, join_vector, store_histogram, store_vector};

#[test]
fn joined_vector_appends_restored_samples() {
    let mut payload = Vec::new();
    store_vector(&[3.0f64, 4.0], &mut payload).unwrap();

    let mut samples = vec![1.0f64, 2.0];
    join_vector(&mut samples, &mut payload.as_slice()).unwrap();

    assert_eq!(samples, vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn joining_into_empty_vector_restores_exactly() {
    let mut payload = Vec::new();
    store_vector(&[7u64, 8, 9], &mut payload).unwrap();

    let mut samples: Vec<u64> = Vec::new();
    join_vector(&mut samples, &mut payload.as_slice()).unwrap();

    assert_eq!(samples, vec![7, 8, 9]);
}

#[test]
fn joined_histogram_appends_bin_by_bin() {
    let stored: Vec<Vec<f64>> = vec![vec![1.0], vec![], vec![5.0, 6.0]];
    let mut payload = Vec::new();
    store_histogram(&stored, &mut payload).unwrap();

    let mut bins: Vec<Vec<f64>> = vec![vec![0.5], vec![2.0], vec![]];
    join_histogram(&mut bins, &mut payload.as_slice()).unwrap();

    assert_eq!(bins, vec![vec![0.5, 1.0], vec![2.0], vec![5.0, 6.0]]);
}

#[test]
fn histogram_bin_count_mismatch_is_an_error() {
    let stored: Vec<Vec<f64>> = vec![vec![1.0], vec![2.0]];
    let mut payload = Vec::new();
    store_histogram(&stored, &mut payload).unwrap();

    let mut bins: Vec<Vec<f64>> = vec![vec![], vec![], vec![]];
    let err = join_histogram(&mut bins, &mut payload.as_slice()).unwrap_err();

    assert!(matches!(err, EnsError::Serde(_)));
    assert_eq!(err.info().code, "histogram-bins-mismatch");
}

#[test]
fn truncated_vector_payload_is_an_error() {
    let mut payload = Vec::new();
    store_vector(&[1.0f64, 2.0, 3.0], &mut payload).unwrap();
    payload.truncate(payload.len() - 6);

    let mut samples: Vec<f64> = Vec::new();
    let err = join_vector(&mut samples, &mut payload.as_slice()).unwrap_err();
    assert_eq!(err.info().code, "vector-join");
}
