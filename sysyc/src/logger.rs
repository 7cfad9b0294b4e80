//! Configures `env_logger` from the CLI's verbosity/log-file flags.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use env_logger::Builder;
use log::LevelFilter;
use time::OffsetDateTime;

use crate::error::CompileError;

/// `0` logs errors only; each repeat of `-v` raises the level by one,
/// saturating at `trace`.
pub fn configure(verbosity: u8, log_file: Option<PathBuf>) -> Result<(), CompileError> {
    let level = match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = Builder::new();
    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:?}] {}",
                record.level(),
                OffsetDateTime::now_utc(),
                record.args()
            )
        })
        .filter_level(level)
        .init();

    Ok(())
}
