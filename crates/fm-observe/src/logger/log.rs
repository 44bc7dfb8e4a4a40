use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan, time::OffsetTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::logger::{config::LoggerConfig, error::LoggerError};

pub struct Logger;

impl Logger {
    pub fn text(cfg: &LoggerConfig) -> Result<(), LoggerError> {
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(cfg.use_color)
            .with_target(cfg.with_targets)
            .with_span_events(span_events(cfg))
            .with_timer(mk_timer());

        init_with(tracing_subscriber::registry().with(mk_filter(&cfg.level)?).with(layer))
    }

    pub fn json(cfg: &LoggerConfig) -> Result<(), LoggerError> {
        let layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_current_span(true)
            .with_target(cfg.with_targets)
            .with_span_events(span_events(cfg))
            .with_timer(mk_timer());

        init_with(tracing_subscriber::registry().with(mk_filter(&cfg.level)?).with(layer))
    }

    pub fn journald(cfg: &LoggerConfig) -> Result<(), LoggerError> {
        mk_journald(mk_filter(&cfg.level)?)
    }
}

pub(crate) fn mk_filter(level: &str) -> Result<EnvFilter, LoggerError> {
    EnvFilter::try_new(level).map_err(|_| LoggerError::InvalidLogLevel(level.to_string()))
}

fn span_events(cfg: &LoggerConfig) -> FmtSpan {
    if cfg.span_timing {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}

fn mk_timer() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

fn init_with<S>(subscriber: S) -> Result<(), LoggerError>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber.try_init().map_err(|e| {
        let s = e.to_string();
        if s.contains("SetGlobalDefaultError") {
            LoggerError::AlreadyInitialized
        } else {
            LoggerError::InitializationFailed(s)
        }
    })
}

#[cfg(all(target_os = "linux", feature = "journald"))]
fn mk_journald(filter: EnvFilter) -> Result<(), LoggerError> {
    let journald = tracing_journald::layer()
        .map_err(|e| LoggerError::InitializationFailed(format!("journald: {e}")))?
        .with_syslog_identifier("fm-driver".to_string());
    init_with(tracing_subscriber::registry().with(filter).with(journald))
}

#[cfg(not(all(target_os = "linux", feature = "journald")))]
fn mk_journald(_filter: EnvFilter) -> Result<(), LoggerError> {
    Err(LoggerError::JournaldNotSupported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_directives() {
        assert!(mk_filter("info").is_ok());
        assert!(mk_filter("fm_core=debug,warn").is_ok());
    }

    #[test]
    fn filter_rejects_garbage() {
        let err = mk_filter("fm_core=notalevel").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLogLevel(_)));
    }

    #[test]
    fn timer_writes_rfc3339() {
        use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

        let mut out = String::new();
        mk_timer().format_time(&mut Writer::new(&mut out)).unwrap();
        assert!(out.len() >= 20, "{out}");
        assert_eq!(&out[4..5], "-");
        assert_eq!(&out[10..11], "T");
    }

    #[test]
    fn span_timing_toggles_close_events() {
        let mut cfg = LoggerConfig::default();
        assert_eq!(span_events(&cfg), FmtSpan::NONE);
        cfg.span_timing = true;
        assert_eq!(span_events(&cfg), FmtSpan::CLOSE);
    }
}
