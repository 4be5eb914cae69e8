use kinema_engine::camera::FlyCamera;
use kinema_engine::core::{App, AppControl, FrameCtx};
use kinema_engine::geometry::icosphere;
use kinema_engine::input::Key;
use kinema_engine::render::{
    CameraUniform, GpuMesh, InstancedMeshRenderer, InstancedMeshStyle, LineRenderer,
};
use kinema_kernels::WaveField;

use crate::config::OceanConfig;
use crate::sim::OceanSim;

/// Wave-animated sphere grid with a wireline overlay and a free-fly camera.
pub struct OceanScene {
    config: OceanConfig,
    sim: OceanSim,
    camera: FlyCamera,

    sphere: Option<GpuMesh>,
    spheres: InstancedMeshRenderer,
    lines: LineRenderer,

    cursor_grabbed: bool,
}

impl OceanScene {
    pub fn new(config: OceanConfig) -> Self {
        let sim = OceanSim::new(config.grid, WaveField::new(config.waves.clone()));

        let mut camera = FlyCamera::new(config.camera_position);
        camera.look(config.camera_yaw, config.camera_pitch);

        let spheres = InstancedMeshRenderer::new(InstancedMeshStyle {
            rest_height: config.grid.origin.y,
            height_range: config.max_wave_height(),
            ..InstancedMeshStyle::default()
        });

        Self {
            config,
            sim,
            camera,
            sphere: None,
            spheres,
            lines: LineRenderer::new(),
            cursor_grabbed: false,
        }
    }

    /// Keeps the cursor grabbed while the window has focus.
    fn sync_cursor_grab(&mut self, ctx: &FrameCtx<'_, '_>) {
        let want = ctx.input.focused;
        if want != self.cursor_grabbed {
            ctx.window.grab_cursor(want);
            self.cursor_grabbed = want;
        }
    }
}

impl App for OceanScene {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }

        self.sync_cursor_grab(ctx);
        self.camera.update(ctx.input, ctx.input_frame, ctx.time.dt);
        self.sim.step(ctx.time.elapsed);
        log::trace!(
            "t={:.2} {} spheres, {} segments",
            ctx.time.elapsed,
            self.sim.positions().len(),
            self.sim.segments().len()
        );

        let (fb_w, fb_h) = ctx.window.framebuffer_size();
        let aspect = if fb_h > 0.0 { fb_w / fb_h } else { 1.0 };
        let camera = CameraUniform::new(
            self.camera.view_projection(aspect),
            self.camera.position,
            self.config.light_dir,
        );

        let sphere_slot = &mut self.sphere;
        let spheres = &mut self.spheres;
        let lines = &mut self.lines;
        let sim = &self.sim;
        let config = &self.config;

        ctx.render(config.clear_color, |rctx, target| {
            let sphere = sphere_slot.get_or_insert_with(|| {
                GpuMesh::upload(
                    rctx.device,
                    "kinema ocean sphere",
                    &icosphere(config.sphere_radius, config.sphere_subdivisions),
                )
            });

            spheres.render(rctx, target, sphere, &camera, sim.positions());
            lines.render(rctx, target, &camera, config.line_color, sim.line_vertices());
        })
    }
}
