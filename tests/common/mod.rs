//! Common test utilities with tracing setup.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//!
//! #[test]
//! fn my_test() {
//!     common::init_tracing();
//!     // ... test code with tracing::info!, tracing::debug!, etc.
//! }
//! ```
//!
//! # Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: filter directives (e.g., `pushlist=trace`)
//! - `PUSHLIST_LOG_DIR`: if set, also write NDJSON logs there
//!
//! Use `jq` on the NDJSON output for filtering:
//!
//! ```bash
//! cat logs/pushlist.jsonl | jq 'select(.level == "TRACE")'
//! ```

#![allow(dead_code)]

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Once};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Ensures tracing is only initialized once across all tests.
static INIT: Once = Once::new();

/// Initialize the tracing subscriber with console (and optional file) output.
///
/// Safe to call multiple times - only the first call takes effect.
pub fn init_tracing() {
    INIT.call_once(setup_tracing);
}

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_test_writer()
        .with_target(true);

    let file_layer = env::var("PUSHLIST_LOG_DIR").ok().and_then(|dir| {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir).ok()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("pushlist.jsonl"))
            .ok()?;
        Some(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(Arc::new(file)),
        )
    });

    Registry::default()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();
}
