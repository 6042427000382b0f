//! Structured JSONL logging.
//!
//! Records carry a level, a domain for filtering, a monotonic sequence
//! number, and a free-form data object. Lines go to stdout and to a per-run
//! events file under `LOG_DIR`. Level and domain filters come from the
//! `LOG_LEVEL` and `LOG_DOMAINS` environment variables.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl Level {
    pub fn from_env() -> Self {
        match std::env::var("LOG_LEVEL").as_deref() {
            Ok("trace") => Level::Trace,
            Ok("debug") => Level::Debug,
            Ok("info") => Level::Info,
            Ok("warn") => Level::Warn,
            Ok("error") => Level::Error,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

/// Subsystems, for `LOG_DOMAINS` filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Tiles,     // Generator batches, cache fills
    Layers,    // Selection, visibility, cascade events
    Insights,  // Panel selection, debounce
    Favorites, // Persistence reads/writes
    System,    // Startup, shutdown, config
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Tiles => "tiles",
            Domain::Layers => "layers",
            Domain::Insights => "insights",
            Domain::Favorites => "favorites",
            Domain::System => "system",
        }
    }

    pub fn is_enabled(&self) -> bool {
        match std::env::var("LOG_DOMAINS").as_deref() {
            Ok("all") | Err(_) => true,
            Ok(domains) => domains.split(',').any(|d| d.trim() == self.as_str()),
        }
    }
}

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);
static RUN_CONTEXT: OnceLock<RunContext> = OnceLock::new();

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst)
}

#[derive(Debug)]
struct RunContext {
    run_id: String,
    events: Option<Mutex<BufWriter<File>>>,
}

fn ensure_run_context() -> &'static RunContext {
    RUN_CONTEXT.get_or_init(|| {
        let run_id = std::env::var("RUN_ID")
            .unwrap_or_else(|_| format!("r-{}-{}", Utc::now().timestamp_millis(), process::id()));
        let base = std::env::var("LOG_DIR").unwrap_or_else(|_| "out/runs".to_string());
        let mut run_dir = PathBuf::from(base);
        run_dir.push(&run_id);
        let events = match create_dir_all(&run_dir)
            .and_then(|_| File::create(run_dir.join("events.jsonl")))
        {
            Ok(f) => Some(Mutex::new(BufWriter::new(f))),
            Err(err) => {
                eprintln!("[log] no events file, stdout only: {}", err);
                None
            }
        };
        RunContext { run_id, events }
    })
}

/// RFC3339 timestamp with milliseconds.
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Emit one structured record, subject to level and domain filters.
pub fn log(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    if level < Level::from_env() || !domain.is_enabled() {
        return;
    }
    let ctx = ensure_run_context();
    let mut entry = Map::new();
    entry.insert("ts".to_string(), json!(ts_now()));
    entry.insert("run_id".to_string(), json!(ctx.run_id.clone()));
    entry.insert("seq".to_string(), json!(next_seq()));
    entry.insert("lvl".to_string(), json!(level.as_str()));
    entry.insert("domain".to_string(), json!(domain.as_str()));
    entry.insert("event".to_string(), json!(event));
    entry.insert("data".to_string(), Value::Object(fields));

    let line = Value::Object(entry).to_string();
    if let Some(writer) = &ctx.events {
        if let Ok(mut w) = writer.lock() {
            let _ = writeln!(w, "{}", line);
        }
    }
    println!("{}", line);
}

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert((*k).to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

// =============================================================================
// Domain helpers
// =============================================================================

pub fn log_selection(layer: i64, selection: &str, state_digest: &str) {
    log(
        Level::Debug,
        Domain::Layers,
        "selection",
        obj(&[
            ("layer", json!(layer)),
            ("selection", v_str(selection)),
            ("state", v_str(state_digest)),
        ]),
    );
}

pub fn log_generation(cache_key: &str, category: &str, count: usize) {
    log(
        Level::Debug,
        Domain::Tiles,
        "generated",
        obj(&[
            ("cache_key", v_str(cache_key)),
            ("category", v_str(category)),
            ("count", json!(count)),
        ]),
    );
}

pub fn log_cache_hit(cache_key: &str) {
    log(
        Level::Trace,
        Domain::Tiles,
        "cache_hit",
        obj(&[("cache_key", v_str(cache_key))]),
    );
}

pub fn log_store_error(op: &str, err: &str) {
    log(
        Level::Warn,
        Domain::Favorites,
        "store_error",
        obj(&[("op", v_str(op)), ("error", v_str(err))]),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn obj_builds_a_map() {
        let m = obj(&[("k", v_str("v")), ("n", json!(4))]);
        assert_eq!(m.get("k").unwrap(), "v");
        assert_eq!(m.get("n").unwrap(), 4);
    }

    #[test]
    fn seq_increments() {
        let a = next_seq();
        let b = next_seq();
        assert!(b > a);
    }
}
