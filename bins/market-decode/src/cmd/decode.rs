use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use market_data::{decode_forecast_json, decode_json, Catalog};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::config::{Effective, Target};
use super::error::MarketDecodeError;

const STDIN_PATH: &str = "-";

// ═══════════════════════════════════════════════════════════════
//  decode
// ═══════════════════════════════════════════════════════════════

/// Decode every input document on the blocking pool, at most
/// `concurrency` at a time, and print the results in input order.
///
/// One input prints its records as-is; several print an array of
/// `{"file", "records"}` entries. A document that fails is logged and
/// left out; the run then fails once everything else is printed.
pub async fn run(eff: &Effective) -> Result<(), MarketDecodeError> {
    let catalog = Arc::new(eff.catalog.clone());
    let permits = Arc::new(Semaphore::new(eff.concurrency));
    let target = eff.target;

    let mut tasks = JoinSet::new();
    for (position, path) in eff.files.iter().cloned().enumerate() {
        let catalog = Arc::clone(&catalog);
        let permits = Arc::clone(&permits);
        tasks.spawn(async move {
            // The semaphore is never closed.
            let _permit = permits.acquire_owned().await.ok();
            let result = tokio::task::spawn_blocking(move || decode_file(target, &path, &catalog).map(|v| (path, v)))
                .await
                .map_err(MarketDecodeError::from)
                .and_then(|r| r);
            (position, result)
        });
    }

    let mut results: Vec<Option<(PathBuf, serde_json::Value)>> = vec![None; eff.files.len()];
    let mut failed = 0;
    while let Some(joined) = tasks.join_next().await {
        let (position, result) = joined?;
        match result {
            Ok(decoded) => results[position] = Some(decoded),
            Err(e) => {
                failed += 1;
                tracing::error!(
                    endpoint = %target,
                    file = %eff.files[position].display(),
                    error = %e,
                    "decode failed"
                );
            }
        }
    }

    let decoded: Vec<_> = results.into_iter().flatten().collect();
    let output = if eff.files.len() == 1 {
        decoded.into_iter().next().map(|(_, records)| records)
    } else {
        Some(serde_json::Value::Array(
            decoded
                .into_iter()
                .map(|(path, records)| {
                    serde_json::json!({ "file": path.display().to_string(), "records": records })
                })
                .collect(),
        ))
    };
    if let Some(output) = output {
        print_json(&output, eff.pretty)?;
    }

    if failed > 0 {
        return Err(MarketDecodeError::Partial { failed, total: eff.files.len() });
    }
    tracing::info!(endpoint = %target, documents = eff.files.len(), "decode complete");
    Ok(())
}

fn decode_file(target: Target, path: &Path, catalog: &Catalog) -> Result<serde_json::Value, MarketDecodeError> {
    let bytes = read_input(path)?;
    tracing::debug!(endpoint = %target, file = %path.display(), bytes = bytes.len(), "decoding");
    let decoded = match target {
        Target::Endpoint(endpoint) => decode_json(endpoint, &bytes, catalog)?,
        Target::Forecast => decode_forecast_json(&bytes, catalog)?,
    };
    Ok(decoded)
}

fn read_input(path: &Path) -> Result<Vec<u8>, MarketDecodeError> {
    let io_err = |source| MarketDecodeError::Io { path: path.display().to_string(), source };
    if path == Path::new(STDIN_PATH) {
        let mut bytes = Vec::new();
        std::io::stdin().lock().read_to_end(&mut bytes).map_err(io_err)?;
        return Ok(bytes);
    }
    std::fs::read(path).map_err(io_err)
}

pub fn print_json(value: &serde_json::Value, pretty: bool) -> Result<(), MarketDecodeError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    let text = rendered.map_err(flatstore::DecodeError::from)?;

    let mut out = std::io::stdout().lock();
    writeln!(out, "{text}").map_err(|source| MarketDecodeError::Io { path: "<stdout>".into(), source })
}
