use std::fs;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;

/// Writes the events as a pretty-printed JSON array, replacing any existing file.
pub fn write_json(events: &[Value], path: &Path) -> anyhow::Result<()> {
    let mut json = serde_json::to_string_pretty(events).context("failed to serialize events")?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("Wrote {} events to {}", events.len(), path.display());
    Ok(())
}
