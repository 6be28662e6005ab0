//! Keystroke metrics entrypoint: reads one captured typing session, extracts features,
//! optionally assigns a cluster, and prints a single JSON report line on stdout.

use clap::Parser;
use keystroke_metrics::{
    config::AppConfig,
    events::parse_session,
    features::KeystrokeMetricsExtractor,
    logging::StructuredLogger,
    model::{ClusterClassifier, FeatureRow, KMeansClassifier},
    report::SessionReport,
};
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Command {
    /// Session JSON (event array or `{"events": [...]}`); stdin when absent or `-`
    input: Option<PathBuf>,
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Extra model feature, e.g. `--extra retry_count=2`
    #[arg(short, long, value_parser = parse_extra)]
    extra: Vec<(String, f64)>,
    /// Assign a cluster even if the config leaves the classifier disabled
    #[arg(long)]
    classify: bool,
}

fn parse_extra(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{}`", s))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad value for `{}`: {}", name, e))?;
    Ok((name.trim().to_string(), value))
}

fn read_input(input: Option<&PathBuf>) -> std::io::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cmd = Command::parse();
    // An explicit --config must load; the implicit default path may be absent.
    let config = match &cmd.config {
        Some(path) => AppConfig::load_strict(path)?,
        None => AppConfig::load(&AppConfig::default_path()),
    };

    StructuredLogger::init(config.log.json, &config.log.level);

    let raw = read_input(cmd.input.as_ref())?;
    let session = parse_session(&raw)?;
    info!(events = session.events.len(), "session loaded");

    let extractor = KeystrokeMetricsExtractor::new(config.keys.clone());
    let metrics = extractor.extract(&session.events);
    let mut report = SessionReport::new(session.events.len(), metrics);

    if cmd.classify || config.classifier.enabled {
        match KMeansClassifier::load(&config.classifier.artifact_path) {
            Ok(classifier) => {
                let row = FeatureRow::new(metrics)
                    .with_extras(session.extras)
                    .with_extras(cmd.extra);
                match classifier.predict_row(&row) {
                    Ok(cluster_id) => {
                        info!(cluster_id, "cluster assigned");
                        report = report.with_cluster(cluster_id);
                    }
                    Err(e) => warn!(error = %e, "cluster prediction failed"),
                }
            }
            Err(e) => warn!(
                path = %config.classifier.artifact_path.display(),
                error = %e,
                "cluster model unavailable; reporting metrics only"
            ),
        }
    }

    let stdout = std::io::stdout();
    StructuredLogger::emit_json(&report, &mut stdout.lock())?;
    Ok(())
}
