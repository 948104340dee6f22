use clap::ValueEnum;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogDestination {
    Stdout,
    File,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub destination: LogDestination,
    pub file_path: Option<PathBuf>,
    pub debug: bool,
}

impl LoggingConfig {
    pub fn level_directive(&self) -> &'static str {
        if self.debug {
            "repograph=debug"
        } else {
            "repograph=info"
        }
    }
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(config, rust_log.as_deref())?;

    let writer = make_writer(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(config.destination == LogDestination::Stdout)
        .with_target(true)
        .try_init()
        .map_err(|e| Error::Config(format!("failed to initialize logging: {}", e)))?;

    tracing::debug!(
        "Logging configured (dest={:?}, debug={})",
        config.destination,
        config.debug
    );
    Ok(())
}

/// `RUST_LOG` wins when set; `--debug` still raises this crate to DEBUG.
pub fn build_filter(config: &LoggingConfig, rust_log: Option<&str>) -> Result<EnvFilter> {
    match rust_log.map(str::trim).filter(|v| !v.is_empty()) {
        Some(directives) => {
            let filter = EnvFilter::try_new(directives)
                .map_err(|e| Error::Config(format!("invalid RUST_LOG '{}': {}", directives, e)))?;
            if config.debug {
                Ok(filter.add_directive(parse_directive(config.level_directive())?))
            } else {
                Ok(filter)
            }
        }
        None => Ok(EnvFilter::default()
            .add_directive(parse_directive(config.level_directive())?)
            .add_directive(parse_directive("reqwest=warn")?)),
    }
}

pub fn make_writer(config: &LoggingConfig) -> Result<BoxMakeWriter> {
    match config.destination {
        LogDestination::Stdout => Ok(BoxMakeWriter::new(std::io::stdout)),
        LogDestination::File => {
            let path = config.file_path.as_deref().ok_or_else(|| {
                Error::Config("a log file path is required when logging to a file".to_string())
            })?;
            let file = open_log_file(path)?;
            Ok(BoxMakeWriter::new(Mutex::new(file)))
        }
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

fn parse_directive(directive: &str) -> Result<tracing_subscriber::filter::Directive> {
    directive
        .parse()
        .map_err(|e| Error::Config(format!("invalid log directive '{}': {}", directive, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_directive() {
        let mut config = LoggingConfig {
            destination: LogDestination::Stdout,
            file_path: None,
            debug: false,
        };
        assert_eq!(config.level_directive(), "repograph=info");
        config.debug = true;
        assert_eq!(config.level_directive(), "repograph=debug");
        assert!(parse_directive(config.level_directive()).is_ok());
    }

    #[test]
    fn test_rust_log_overrides_default_level() {
        let mut config = LoggingConfig {
            destination: LogDestination::Stdout,
            file_path: None,
            debug: false,
        };

        let filter = build_filter(&config, Some("repograph=warn")).unwrap().to_string();
        assert!(filter.contains("repograph=warn"));
        assert!(!filter.contains("repograph=info"));

        let filter = build_filter(&config, None).unwrap().to_string();
        assert!(filter.contains("repograph=info"));
        assert!(filter.contains("reqwest=warn"));

        config.debug = true;
        let filter = build_filter(&config, Some("repograph=warn")).unwrap().to_string();
        assert!(filter.contains("repograph=debug"));
    }

    #[test]
    fn test_invalid_rust_log_is_config_error() {
        let config = LoggingConfig {
            destination: LogDestination::Stdout,
            file_path: None,
            debug: false,
        };
        assert!(matches!(
            build_filter(&config, Some("repograph=loud")),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_file_destination_requires_path() {
        let config = LoggingConfig {
            destination: LogDestination::File,
            file_path: None,
            debug: false,
        };
        assert!(matches!(make_writer(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_file_destination_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("app.log");
        let config = LoggingConfig {
            destination: LogDestination::File,
            file_path: Some(path.clone()),
            debug: false,
        };
        assert!(make_writer(&config).is_ok());
        assert!(path.exists());
    }
}
