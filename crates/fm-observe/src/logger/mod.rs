mod config;
mod error;
mod format;
mod log;

pub use config::LoggerConfig;
pub use error::LoggerError;
pub use format::LoggerFormat;

/// Install the global subscriber described by `cfg`.
///
/// Fails with [`LoggerError::AlreadyInitialized`] on a second call in the same process.
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let installed = match cfg.format {
        LoggerFormat::Text => log::Logger::text(cfg),
        LoggerFormat::Json => log::Logger::json(cfg),
        LoggerFormat::Journald => log::Logger::journald(cfg),
    };
    installed?;

    tracing::debug!(
        target: "fm.observe",
        format = %cfg.format,
        filter = %cfg.level,
        span_timing = cfg.span_timing,
        "logger ready"
    );
    Ok(())
}
