use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use vitro_renderer::{load_scene_file, render_image, RenderConfig};

mod cli;
mod demo;

use cli::Args;

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let (scene, mut camera) = match &args.scene {
        Some(path) => load_scene_file(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene file given, rendering the demo scene");
            demo::demo_scene()
        }
    };

    if let Some(width) = args.width {
        camera.width = width;
    }
    if let Some(height) = args.height {
        camera.height = height;
    }
    if let Some(fov) = args.fov {
        camera.fov = fov;
    }
    anyhow::ensure!(
        camera.width > 0 && camera.height > 0,
        "Image size must be positive, got {}x{}",
        camera.width,
        camera.height
    );
    anyhow::ensure!(
        camera.fov > 0.0 && camera.fov < 180.0,
        "Field of view must be between 0 and 180 degrees, got {}",
        camera.fov
    );

    let config = RenderConfig {
        deadline: args.deadline_ms.map(Duration::from_millis),
    };

    let (image, stats) = render_image(&scene, &camera, &config);
    if !stats.completed {
        log::warn!("Render stopped early, unrendered pixels are black");
    }

    image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!(
        "Done: {} pixels in {:.2?} -> {}",
        stats.pixels,
        stats.elapsed,
        args.output.display()
    );

    Ok(())
}
