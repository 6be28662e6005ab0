//! Cluster assignment benchmark: feature row → nearest centroid.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use keystroke_metrics::features::TypingMetrics;
use keystroke_metrics::model::{
    ClusterArtifact, ClusterClassifier, FeatureRow, FeatureSchema, KMeansClassifier, ScalerParams,
};

fn make_classifier(k: usize) -> KMeansClassifier {
    let features = FeatureSchema::new(TypingMetrics::FIELD_NAMES);
    let dim = features.len();
    let artifact = ClusterArtifact {
        features,
        scaler: ScalerParams {
            mean: vec![1.0; dim],
            scale: vec![2.0; dim],
        },
        centroids: (0..k).map(|i| vec![i as f64 * 0.5 - 1.0; dim]).collect(),
    };
    KMeansClassifier::from_artifact(artifact).unwrap()
}

fn bench_predict_row(c: &mut Criterion) {
    let classifier = make_classifier(5);
    let row = FeatureRow::new(TypingMetrics {
        avg_dwell_time_ms: 95.3,
        avg_flight_time_ms: 140.1,
        keys_per_sec: 5.2,
        backspace_rate: 0.08,
        delete_rate: 0.01,
    });

    c.bench_function("predict_row_k5", |b| {
        b.iter(|| classifier.predict_row(black_box(&row)).unwrap())
    });
}

fn bench_predict_by_k(c: &mut Criterion) {
    let values = [95.3, 140.1, 5.2, 0.08, 0.01];
    let mut g = c.benchmark_group("predict_by_k");
    for k in [2, 5, 16, 64] {
        let classifier = make_classifier(k);
        g.bench_function(format!("k_{}", k).as_str(), |b| {
            b.iter(|| classifier.predict(black_box(&values)).unwrap())
        });
    }
    g.finish();
}

criterion_group!(benches, bench_predict_row, bench_predict_by_k);
criterion_main!(benches);
