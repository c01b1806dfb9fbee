mod scene;

use anyhow::Result;
use winit::dpi::LogicalSize;

use umbra_engine::SdfError;
use umbra_engine::coords::{Vec2, Viewport};
use umbra_engine::core::{App, AppControl, FrameCtx};
use umbra_engine::device::{Gpu, GpuInit};
use umbra_engine::input::Key;
use umbra_engine::logging::{LoggingConfig, init_logging};
use umbra_engine::paint::Color;
use umbra_engine::render::{SdfRenderer, SdfRendererConfig};
use umbra_engine::sdf::{Light, MAX_MARCH_STEPS, Primitive, TRACE_COLOR, ray_march_with_trace};
use umbra_engine::window::{Runtime, RuntimeConfig};

use scene::{DemoScene, LightSettings};

const BACKGROUND: Color = Color::new(0.02, 0.02, 0.03, 1.0);

/// Fixed end point of the debug ray; the ray starts at the cursor.
const PROBE: Vec2 = Vec2::new(300.0, 200.0);

struct Renderers {
    scene: SdfRenderer,
    overlay: SdfRenderer,
}

struct Studio {
    scene: DemoScene,
    light: LightSettings,
    show_trace: bool,
    overlay: Vec<Primitive>,
    renderers: Option<Renderers>,
}

impl Studio {
    fn new() -> Self {
        Self {
            scene: DemoScene::new(),
            light: LightSettings::default(),
            show_trace: false,
            overlay: Vec::new(),
            renderers: None,
        }
    }

    /// Rebuilds the overlay: the traversed ray plus one circle per march sample.
    fn build_trace(&mut self, origin: Vec2) {
        self.overlay.clear();
        if origin == PROBE {
            return;
        }

        let trace = ray_march_with_trace(origin, PROBE, self.light.max_distance, self.scene.primitives());
        let end = origin + (PROBE - origin).normalize_or_zero() * trace.distance;
        self.overlay
            .push(Primitive::line(origin, end, 1.0).with_color(TRACE_COLOR.with_alpha(0.5)));
        self.overlay.extend(trace.markers);

        log::trace!("trace: {:.2} px in {} steps", trace.distance, trace.steps);
    }
}

impl App for Studio {
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let size = gpu.size();
        let ctx = gpu.render_ctx(Viewport::new(size.width as f32, size.height as f32));

        let scene = SdfRenderer::new(&ctx, SdfRendererConfig {
            label: "studio scene",
            ..SdfRendererConfig::default()
        })?;
        // one marker per march sample plus the ray itself
        let overlay = SdfRenderer::new(&ctx, SdfRendererConfig {
            capacity: MAX_MARCH_STEPS as usize + 2,
            label: "studio trace overlay",
        })?;

        self.renderers = Some(Renderers { scene, overlay });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            return AppControl::Exit;
        }
        if ctx.input_frame.key_pressed(Key::Space) {
            self.show_trace = !self.show_trace;
            log::info!("ray trace overlay {}", if self.show_trace { "on" } else { "off" });
        }

        let viewport = ctx.viewport();
        let cursor = ctx
            .input
            .pointer
            .unwrap_or(Vec2::new(viewport.width * 0.5, viewport.height * 0.5));

        self.scene.update(ctx.time.elapsed);
        if self.show_trace {
            self.build_trace(cursor);
        }

        let Some(renderers) = self.renderers.as_mut() else {
            return AppControl::Continue;
        };
        let light = Light::new(cursor, self.light.color, self.light.max_distance);
        let primitives = self.scene.primitives();
        let overlay = self.show_trace.then_some(self.overlay.as_slice());

        ctx.render(BACKGROUND, |rctx, target| -> Result<(), SdfError> {
            renderers.scene.refresh(rctx, primitives)?;
            let uniforms = renderers.scene.uniforms(rctx.viewport, &light);
            renderers.scene.render(rctx, target, &uniforms);

            if let Some(overlay) = overlay {
                renderers.overlay.refresh(rctx, overlay)?;
                let uniforms = renderers.overlay.uniforms(rctx.viewport, &Light::unlit());
                renderers.overlay.render(rctx, target, &uniforms);
            }
            Ok(())
        })
    }

    fn on_shutdown(&mut self) {
        if let Some(renderers) = self.renderers.take() {
            renderers.scene.destroy();
            renderers.overlay.destroy();
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    log::info!("umbra studio: move the mouse to light the scene, Space toggles the ray trace, Esc quits");

    let config = RuntimeConfig {
        title: "umbra studio".to_string(),
        initial_size: LogicalSize::new(800.0, 600.0),
    };
    Runtime::run(config, GpuInit::default(), Studio::new())
}
