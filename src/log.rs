// src/log.rs
//! Tracing subscriber setup.
//!
//! Lines go to stderr, and optionally to an append-only file. Timestamps are the
//! uptime of the process. `RUST_LOG` overrides the level passed in.

use std::{
    fs::{self, OpenOptions},
    io,
    path::Path,
    sync::Mutex,
};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. A second call is a no-op.
pub fn init(level: LevelFilter, file: Option<&Path>) -> io::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let file_layer = match file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let out = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(out))
                    .with_timer(fmt::time::uptime())
                    .with_ansi(false),
            )
        }
        None => None,
    };

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_timer(fmt::time::uptime())
        .with_target(false)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_log_dir_and_tolerates_reinit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store/debug.log");
        init(LevelFilter::DEBUG, Some(&path)).unwrap();
        init(LevelFilter::INFO, None).unwrap();
        assert!(path.is_file());
    }
}
