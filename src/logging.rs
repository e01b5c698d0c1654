//! Append-only log of inference calls.
//!
//! The TUI owns the terminal, so diagnostics go to a file under the config
//! directory instead of stdout/stderr.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::Utc;

/// Outcome and timing of one call to the Groq API.
pub struct ApiCallLog<'a> {
    pub model: &'a str,
    pub outcome: &'a str,
    pub elapsed: Duration,
}

pub fn log_api_call(log: &ApiCallLog) -> Result<()> {
    let log_path = get_log_path()?;
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let line = format!(
        "[{}] {} - {} - {}ms\n",
        Utc::now().to_rfc3339(),
        log.model,
        log.outcome,
        log.elapsed.as_millis()
    );

    let mut file = OpenOptions::new().append(true).create(true).open(&log_path)?;
    file.write_all(line.as_bytes())?;
    Ok(())
}

fn get_log_path() -> Result<PathBuf> {
    let config_dir =
        dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;

    Ok(config_dir.join("groqchat").join("api_calls.log"))
}
