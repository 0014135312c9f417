use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

pub const CHECK_LOG_PATH_ENV: &str = "LANES_CHECK_LOG_PATH";

static CHECK_LOG_PATH: OnceLock<Mutex<Option<PathBuf>>> = OnceLock::new();

/// One mismatching element, as written to the JSONL check log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckLogEntry {
    pub suite: &'static str,
    pub file: String,
    pub line: u32,
    pub lhs_expr: String,
    pub rhs_expr: String,
    pub index: Option<usize>,
    pub expected: String,
    pub actual: String,
    pub comparison: &'static str,
    pub slop: Option<f64>,
    pub policy: &'static str,
    pub label: String,
    pub reason_code: &'static str,
}

pub fn set_check_log_path(path: Option<PathBuf>) {
    let cell = CHECK_LOG_PATH.get_or_init(|| Mutex::new(None));
    if let Ok(mut slot) = cell.lock() {
        *slot = path;
    }
}

#[must_use]
pub fn check_log_path() -> Option<PathBuf> {
    let configured = CHECK_LOG_PATH
        .get()
        .and_then(|cell| cell.lock().ok())
        .and_then(|slot| slot.clone());
    let from_env = std::env::var_os(CHECK_LOG_PATH_ENV).map(PathBuf::from);
    configured.or(from_env)
}

pub(crate) fn maybe_append_check_log(entry: &CheckLogEntry) -> Result<(), String> {
    let Some(path) = check_log_path() else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| format!("failed creating {}: {err}", parent.display()))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|err| format!("failed opening {}: {err}", path.display()))?;
    let line = serde_json::to_string(entry)
        .map_err(|err| format!("failed serializing check log entry: {err}"))?;
    let mut payload = line.into_bytes();
    payload.push(b'\n');
    file.write_all(&payload)
        .map_err(|err| format!("failed appending check log {}: {err}", path.display()))
}
