use std::{
    fs::{self, File},
    io,
};

use tracing_subscriber::{
    Layer, Registry,
    fmt::{self},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::{LoggerConfig, LoggerFormat};

/// Installs the global subscriber: stdio output in the configured format and,
/// optionally, a JSON log file that is truncated on start.
pub fn init_logger(opts: LoggerConfig) -> io::Result<()> {
    let stdio_filter = tracing_subscriber::EnvFilter::new(opts.stdio_level.clone());
    let stdio_layer = match opts.format {
        LoggerFormat::Pretty => fmt::Layer::default().pretty().boxed(),
        LoggerFormat::Json => fmt::Layer::default().json().boxed(),
        LoggerFormat::Compact => fmt::Layer::default().compact().boxed(),
    }
    .with_filter(stdio_filter);

    let file_layer = match opts.log_file {
        Some(log_file) => {
            if let Some(parent) = log_file.parent() {
                fs::create_dir_all(parent)?;
            }
            let writer = File::create(&log_file)?;
            let filter = tracing_subscriber::EnvFilter::new(opts.file_level.clone());
            Some(
                fmt::Layer::default()
                    .json()
                    .with_writer(writer)
                    .with_filter(filter),
            )
        }
        None => None,
    };

    match file_layer {
        Some(file_layer) => Registry::default()
            .with(stdio_layer)
            .with(file_layer)
            .init(),
        None => Registry::default().with(stdio_layer).init(),
    }
    Ok(())
}
