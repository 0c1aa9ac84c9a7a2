use std::path::Path;

use anyhow::{Context, Result, bail};

use dinner_core::models::StoredState;

use super::AppSession;
use super::helpers::meal_count_label;

pub(crate) fn cmd_export(session: &AppSession, path: Option<&Path>) -> Result<()> {
    let payload = session.state().to_json_pretty()?;

    match path {
        Some(path) => {
            std::fs::write(path, format!("{payload}\n"))
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            let count = meal_count_label(session.registry().len());
            eprintln!("Exported {count} to {}", path.display());
        }
        None => println!("{payload}"),
    }
    Ok(())
}

pub(crate) fn cmd_import(session: &mut AppSession, path: &Path, json: bool) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;

    let Some(state) = StoredState::parse(&raw) else {
        bail!(
            "{} is not a dinner export (expected {{\"meals\": [...], \"avoidRecent\": true|false}})",
            path.display()
        );
    };

    session.replace_state(state);

    if json {
        println!("{}", serde_json::to_string_pretty(&session.state())?);
    } else {
        let count = meal_count_label(session.registry().len());
        let avoid = if session.policy().avoid_recent { "on" } else { "off" };
        println!("Imported {count} (avoid recent: {avoid})");
    }
    Ok(())
}
