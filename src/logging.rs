use crate::config::LogConfig;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log lines go for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// The terminal belongs to the wizard: log to `log.file` or nowhere.
    Interactive,
    Stderr,
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured filter.
pub fn init(config: &LogConfig, mode: LogMode) -> io::Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(env.as_deref(), &config.filter);
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match (mode, &config.file) {
        (LogMode::Interactive, Some(path)) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        (LogMode::Interactive, None) => builder.with_writer(io::sink).try_init(),
        (LogMode::Stderr, _) => builder.with_writer(io::stderr).try_init(),
    };
    if installed.is_err() {
        tracing::debug!("global subscriber already installed");
    }
    Ok(())
}

fn build_filter(env: Option<&str>, configured: &str) -> EnvFilter {
    env.filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_new(configured).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::build_filter;

    #[test]
    fn env_overrides_configured_filter() {
        assert_eq!(build_filter(Some("debug"), "warn").to_string(), "debug");
        assert_eq!(build_filter(Some("  "), "warn").to_string(), "warn");
        assert_eq!(build_filter(None, "portal_wizard=trace").to_string(), "portal_wizard=trace");
    }
}
