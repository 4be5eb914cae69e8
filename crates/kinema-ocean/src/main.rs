//! Gerstner-wave ocean demo.
//!
//! A grid of spheres rides a superposition of Gerstner waves while a wireline
//! mesh connects each sphere to its grid neighbours. WASD/arrows move, the
//! mouse looks around, the wheel zooms, Escape quits.

mod config;
mod scene;
mod sim;

use kinema_engine::device::GpuInit;
use kinema_engine::logging::{init_logging, LoggingConfig};
use kinema_engine::window::{Runtime, RuntimeConfig};

use config::OceanConfig;
use scene::OceanScene;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = OceanConfig::default();
    config.log_summary();

    Runtime::run(
        RuntimeConfig::new("kinema ocean", 800.0, 600.0),
        GpuInit::default(),
        OceanScene::new(config),
    )
}
