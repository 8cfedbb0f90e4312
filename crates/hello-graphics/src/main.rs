//! Opens a window and draws a triangle until it is closed.
//!
//! Exits with status 1 and the error on stderr if any setup or frame step fails.

mod app;
mod config;

use std::process::ExitCode;

use anyhow::Result;

use hello_engine::logging::{init_logging, LoggingConfig};
use hello_engine::window::Runtime;

use crate::app::HelloTriangle;
use crate::config::AppConfig;

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = AppConfig::from_env();
    log::debug!("shader directory: {}", config.shader_dir.display());

    let app = HelloTriangle::new(
        config.vertex_shader(),
        config.fragment_shader(),
        config.clear_color,
    );

    Runtime::run(config.window, config.gpu, app)
}
