//! Scaled k-means assignment and feature schema resolution.

use keystroke_metrics::features::TypingMetrics;
use keystroke_metrics::model::{
    ClassifierError, ClusterArtifact, ClusterClassifier, FeatureRow, FeatureSchema,
    KMeansClassifier, ScalerParams,
};

fn artifact(features: &[&str], mean: Vec<f64>, scale: Vec<f64>, centroids: Vec<Vec<f64>>) -> ClusterArtifact {
    ClusterArtifact {
        features: FeatureSchema::new(features.iter().copied()),
        scaler: ScalerParams { mean, scale },
        centroids,
    }
}

fn two_feature_model() -> KMeansClassifier {
    KMeansClassifier::from_artifact(artifact(
        &["keys_per_sec", "retry_count"],
        vec![4.0, 1.0],
        vec![2.0, 1.0],
        vec![vec![-1.0, -1.0], vec![1.0, 1.0], vec![3.0, 0.0]],
    ))
    .unwrap()
}

#[test]
fn assigns_nearest_scaled_centroid() {
    let model = two_feature_model();
    // scaled: (-1, -1)
    assert_eq!(model.predict(&[2.0, 0.0]).unwrap(), 0);
    // scaled: (1, 1)
    assert_eq!(model.predict(&[6.0, 2.0]).unwrap(), 1);
    // scaled: (3.5, 0)
    assert_eq!(model.predict(&[11.0, 1.0]).unwrap(), 2);
}

#[test]
fn equidistant_goes_to_lowest_cluster() {
    let model = two_feature_model();
    // scaled (0, 0): distance 2 to both cluster 0 and 1
    assert_eq!(model.predict(&[4.0, 1.0]).unwrap(), 0);
}

#[test]
fn zero_scale_does_not_divide_by_zero() {
    let model = KMeansClassifier::from_artifact(artifact(
        &["delete_rate"],
        vec![0.0],
        vec![0.0],
        vec![vec![0.0], vec![1.0]],
    ))
    .unwrap();
    assert_eq!(model.predict(&[0.9]).unwrap(), 1);
}

#[test]
fn wrong_length_input() {
    let model = two_feature_model();
    match model.predict(&[1.0]) {
        Err(ClassifierError::DimensionMismatch { expected, actual }) => {
            assert_eq!((expected, actual), (2, 1));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn non_finite_input() {
    let model = two_feature_model();
    assert!(matches!(
        model.predict(&[1.0, f64::NAN]),
        Err(ClassifierError::NonFinite(1))
    ));
}

#[test]
fn rejects_inconsistent_artifacts() {
    let bad_scaler = artifact(&["a", "b"], vec![0.0], vec![1.0, 1.0], vec![vec![0.0, 0.0]]);
    let no_centroids = artifact(&["a"], vec![0.0], vec![1.0], vec![]);
    let ragged = artifact(&["a", "b"], vec![0.0; 2], vec![1.0; 2], vec![vec![0.0, 0.0], vec![1.0]]);
    let empty = artifact(&[], vec![], vec![], vec![vec![]]);
    for a in [bad_scaler, no_centroids, ragged, empty] {
        assert!(matches!(
            KMeansClassifier::from_artifact(a),
            Err(ClassifierError::InvalidArtifact(_))
        ));
    }
}

#[test]
fn rejects_non_finite_or_negative_parameters() {
    let nan_centroid = artifact(&["a", "b"], vec![0.0; 2], vec![1.0; 2], vec![vec![0.0, 0.0], vec![f64::NAN, 1.0]]);
    let inf_mean = artifact(&["a"], vec![f64::INFINITY], vec![1.0], vec![vec![0.0]]);
    let nan_scale = artifact(&["a"], vec![0.0], vec![f64::NAN], vec![vec![0.0]]);
    let negative_scale = artifact(&["a"], vec![0.0], vec![-2.0], vec![vec![0.0]]);
    for a in [nan_centroid, inf_mean, nan_scale, negative_scale] {
        assert!(matches!(
            KMeansClassifier::from_artifact(a),
            Err(ClassifierError::InvalidArtifact(_))
        ));
    }
}

#[test]
fn schema_orders_metrics_and_extras() {
    let schema = FeatureSchema::new(["backspace_rate", "retry_count", "avg_dwell_time_ms"]);
    let metrics = TypingMetrics {
        avg_dwell_time_ms: 80.5,
        backspace_rate: 0.125,
        ..TypingMetrics::zero()
    };
    let row = FeatureRow::new(metrics)
        .with_extra("retry_count", 2.0)
        .with_extra("avg_dwell_time_ms", -1.0);
    assert_eq!(schema.vectorize(&row).unwrap(), vec![0.125, 2.0, 80.5]);
}

#[test]
fn schema_from_json_list() {
    let schema: FeatureSchema = serde_json::from_str(r#"["keys_per_sec", "delete_rate"]"#).unwrap();
    assert_eq!(schema.len(), 2);
    assert_eq!(schema.names()[1], "delete_rate");
}

#[test]
fn shared_across_threads() {
    let model = std::sync::Arc::new(two_feature_model());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let model = std::sync::Arc::clone(&model);
            std::thread::spawn(move || model.predict(&[6.0, 2.0]).unwrap())
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), 1);
    }
}
