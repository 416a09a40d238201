use std::process::ExitCode;

use anyhow::{Context, Result};

use prism_engine::core::{App, AppControl, FrameCtx};
use prism_engine::device::{Gpu, GpuInit};
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::render::MeshRenderer;
use prism_engine::scene::{FrameUpdater, SceneDesc, TransformUniform, Variant};
use prism_engine::window::{Runtime, RuntimeConfig};

/// One spinning mesh: a scene description, the GPU objects built from it,
/// and the per-frame transform source.
struct SpinDemo {
    desc: SceneDesc,
    updater: FrameUpdater,
    renderer: Option<MeshRenderer>,
}

impl SpinDemo {
    fn new(variant: Variant) -> Self {
        let desc = SceneDesc::for_variant(variant);
        let updater = FrameUpdater::new(desc.transform);
        Self {
            desc,
            updater,
            renderer: None,
        }
    }
}

impl App for SpinDemo {
    fn setup(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let renderer = MeshRenderer::new(gpu.device(), gpu.queue(), gpu.surface_format(), &self.desc)
            .with_context(|| format!("failed to build scene `{}`", self.desc.variant))?;

        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(renderer) = &self.renderer else {
            return AppControl::Continue;
        };

        let size = ctx.gpu.size();
        if let Some(matrix) = self.updater.advance(size.width, size.height) {
            renderer.write_transform(ctx.gpu.queue(), &TransformUniform::from_matrix(matrix));
        }

        ctx.render(|rctx, target| renderer.render(rctx, target))
    }
}

fn run() -> Result<()> {
    let variant = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<Variant>()?,
        None => Variant::default(),
    };
    log::info!("starting prism demo `{variant}`");

    let config = RuntimeConfig {
        title: format!("prism - {variant}"),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, GpuInit::default(), SpinDemo::new(variant))
}

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
