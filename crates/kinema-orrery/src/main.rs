//! Sun/earth/moon orrery demo.
//!
//! The sun follows the pointer, the earth orbits the sun and the moon orbits
//! the earth; dashed rings trace both orbits. Escape quits.

mod config;
mod render;
mod scene;

use kinema_engine::device::GpuInit;
use kinema_engine::logging::{init_logging, LoggingConfig};
use kinema_engine::window::{Runtime, RuntimeConfig};

use config::OrreryConfig;
use scene::OrreryScene;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = OrreryConfig::default();
    config.log_summary();
    let scene = OrreryScene::new(config)?;

    Runtime::run(
        RuntimeConfig::new("kinema orrery", 800.0, 800.0),
        GpuInit::flat(),
        scene,
    )
}
