use glam::{Vec2, Vec3};
use kinema_engine::paint::Color;
use kinema_kernels::{SampleGrid, WaveDescriptor};

/// Static configuration of the ocean scene.
#[derive(Debug, Clone)]
pub struct OceanConfig {
    pub grid: SampleGrid,
    pub waves: Vec<WaveDescriptor>,

    pub camera_position: Vec3,
    /// Initial yaw/pitch in degrees.
    pub camera_yaw: f32,
    pub camera_pitch: f32,

    pub clear_color: Color,
    pub line_color: Color,
    /// Direction towards the light.
    pub light_dir: Vec3,

    pub sphere_radius: f32,
    pub sphere_subdivisions: u32,
}

impl Default for OceanConfig {
    fn default() -> Self {
        Self {
            grid: SampleGrid::new(20, 20, Vec3::new(-1.0, -1.0, -1.0), 1.0),
            waves: vec![
                WaveDescriptor::new(Vec2::new(1.0, 0.1), 0.35, 20.0, 0.8),
                WaveDescriptor::new(Vec2::new(0.5, 1.0), 0.30, 15.0, 1.0),
                WaveDescriptor::new(Vec2::new(-0.3, 0.8), 0.25, 8.0, 1.2),
                WaveDescriptor::new(Vec2::new(0.8, -0.4), 0.20, 4.0, 1.5),
            ],
            camera_position: Vec3::new(10.0, 10.0, 10.0),
            camera_yaw: -90.0,
            camera_pitch: -45.0,
            clear_color: Color::rgb(0.2, 0.3, 0.3),
            line_color: Color::rgba(0.9, 0.95, 1.0, 0.6),
            light_dir: Vec3::new(0.4, 1.0, 0.3),
            sphere_radius: 0.25,
            sphere_subdivisions: 3,
        }
    }
}

impl OceanConfig {
    /// Waves past the Gerstner stability bound, with their index.
    pub fn unstable_waves(&self) -> impl Iterator<Item = (usize, &WaveDescriptor)> {
        self.waves
            .iter()
            .enumerate()
            .filter(|(_, w)| w.exceeds_stability_bound())
    }

    /// Upper bound of the vertical displacement: sum of wave amplitudes.
    pub fn max_wave_height(&self) -> f32 {
        self.waves.iter().map(WaveDescriptor::amplitude).sum()
    }

    /// Logs the configuration and warns about waves that will self-intersect.
    pub fn log_summary(&self) {
        log::info!(
            "ocean: {}x{} grid, {} waves, spheres r={} (subdiv {})",
            self.grid.rows,
            self.grid.cols,
            self.waves.len(),
            self.sphere_radius,
            self.sphere_subdivisions
        );
        for (i, w) in self.unstable_waves() {
            log::warn!(
                "wave {i} steepness {} exceeds the stability bound; crests will loop",
                w.steepness
            );
        }
    }
}
