//! Live analog readout.

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::{hid_registry, CommandResult};
use analogsense::{ActiveKey, ActiveKeySnapshot, Config, OutputFormat};

#[derive(Serialize)]
struct KeyJson {
    key: u16,
    name: &'static str,
    magnitude: f32,
}

#[derive(Serialize)]
struct SnapshotJson {
    keys: Vec<KeyJson>,
}

/// Keys at or above `threshold`
fn visible(keys: &[ActiveKey], threshold: f32) -> Vec<ActiveKey> {
    keys.iter().copied().filter(|k| k.magnitude >= threshold).collect()
}

/// One output line for a snapshot
fn format_snapshot(keys: &[ActiveKey], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let snapshot = SnapshotJson {
                keys: keys
                    .iter()
                    .map(|k| KeyJson {
                        key: k.key,
                        name: k.name(),
                        magnitude: k.magnitude,
                    })
                    .collect(),
            };
            Ok(serde_json::to_string(&snapshot)?)
        }
        OutputFormat::Text if keys.is_empty() => Ok("(no keys)".to_string()),
        OutputFormat::Text => Ok(keys
            .iter()
            .map(|k| format!("{}={:.2}", k.name(), k.magnitude))
            .collect::<Vec<_>>()
            .join(" ")),
    }
}

/// Print snapshots from a supported keyboard until Ctrl+C
pub async fn watch(
    config: &Config,
    json: bool,
    threshold: Option<f32>,
    index: Option<usize>,
) -> CommandResult {
    let format = if json { OutputFormat::Json } else { config.watch.format };
    let threshold = threshold.unwrap_or(config.watch.threshold);

    let Some(session) = hid_registry(config, index).request_session()? else {
        println!("No supported analog keyboard found");
        return Ok(());
    };
    println!(
        "Watching {} [{:04x}:{:04x}] ({}). Press Ctrl+C to exit.",
        session.product_name(),
        session.vendor_id(),
        session.product_id(),
        session.variant()
    );

    let (tx, mut rx) = mpsc::unbounded_channel::<ActiveKeySnapshot>();
    session.start_listening(move |snapshot| {
        // Receiver gone means we are shutting down
        let _ = tx.send(snapshot);
    })?;

    // Devices repeat unchanged snapshots; only print changes
    let mut last: Option<Vec<ActiveKey>> = None;
    loop {
        tokio::select! {
            snapshot = rx.recv() => {
                let Some(snapshot) = snapshot else {
                    debug!("Snapshot channel closed");
                    break;
                };
                let keys = visible(&snapshot, threshold);
                if last.as_ref() != Some(&keys) {
                    println!("{}", format_snapshot(&keys, format)?);
                    last = Some(keys);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    session.stop_listening();
    Ok(())
}
