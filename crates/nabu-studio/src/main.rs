mod app;
mod config;
mod overlay;

use anyhow::Result;
use nabu_demos::DemoAssets;
use nabu_engine::device::GpuInit;
use nabu_engine::logging::{LoggingConfig, init_logging};
use nabu_engine::window::Runtime;

use crate::app::StudioApp;
use crate::config::StudioConfig;

fn main() -> Result<()> {
    let config = StudioConfig::from_env();

    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..LoggingConfig::default()
    });
    log::info!("assets: {}", config.assets_dir.display());

    let assets = DemoAssets::in_dir(&config.assets_dir);
    Runtime::run(config.runtime(), GpuInit::default(), move |setup| {
        StudioApp::new(setup, assets)
    })
}
