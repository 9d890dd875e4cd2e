use std::{fs, path::Path};

use anyhow::Context;
use courier_fleet::fleet_plan::FleetPlan;
use serde::Serialize;

pub fn read_plan(path: &Path) -> anyhow::Result<FleetPlan> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    FleetPlan::from_json(&content).with_context(|| format!("invalid plan {}", path.display()))
}

/// Writes `value` as pretty JSON, creating parent folders as needed.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
