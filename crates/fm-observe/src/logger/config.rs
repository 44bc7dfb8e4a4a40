use crate::logger::format::LoggerFormat;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directive, e.g. `info` or `fm_core=debug,info`.
    pub level: String,
    pub with_targets: bool,
    pub use_color: bool,
    /// Emit an event with busy/idle time whenever a job or work-item span closes.
    pub span_timing: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        // Logs share stderr with failure records; stdout stays clean for novel records.
        let use_color = cfg!(test) || atty::is(atty::Stream::Stderr);
        Self {
            format: LoggerFormat::default(),
            level: "info".to_string(),
            with_targets: true,
            use_color,
            span_timing: false,
        }
    }
}
