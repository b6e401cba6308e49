// In: src/observability.rs

//! Opt-in logging for hosts that don't install their own `log` backend.
//!
//! The library itself only talks to the `log` facade. Calling
//! `enable_verbose_logging` wires that facade to `env_logger`.

use log::LevelFilter;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Once;

use crate::error::PipelineError;

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` backend printing `[LEVEL] message` lines, either to
/// stderr or appended to `log_file`.
///
/// Only the first successful call has any effect. A log file that cannot be
/// opened is reported as `PipelineError::Io` and leaves logging uninitialised.
pub fn enable_verbose_logging(
    level: LevelFilter,
    log_file: Option<&Path>,
) -> Result<(), PipelineError> {
    if INIT_LOGGER.is_completed() {
        return Ok(());
    }

    let file = log_file.map(open_append).transpose()?;

    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(level);

        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        // Another backend may already be installed by the host; keep it.
        let _ = builder.try_init();
    });
    log::info!("verbose logging enabled at {}", level);
    Ok(())
}

fn open_append(path: &Path) -> Result<File, PipelineError> {
    Ok(OpenOptions::new().append(true).create(true).open(path)?)
}
