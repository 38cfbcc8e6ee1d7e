use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "vitro")]
#[command(about = "Whitted-style ray tracer: spheres, planes and boxes with mirrors and glass")]
pub struct Args {
    /// Scene file (JSON). Renders the built-in demo scene when omitted
    pub scene: Option<PathBuf>,

    /// Output image path
    #[arg(short, long, default_value = "output.bmp")]
    pub output: PathBuf,

    /// Image width in pixels, overriding the scene
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels, overriding the scene
    #[arg(long)]
    pub height: Option<u32>,

    /// Vertical field of view in degrees, overriding the scene
    #[arg(long)]
    pub fov: Option<f32>,

    /// Stop rendering after this many milliseconds
    #[arg(long)]
    pub deadline_ms: Option<u64>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
