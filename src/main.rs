use animated_button::app::{HeadlessOptions, run_gui, run_headless};
use animated_button::io::config::Config;
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

/// Hover-animated 3D button.
#[derive(Parser, Debug)]
#[command(name = "animated-button", version)]
#[command(about = "A button with a sphere, torus and cone that animate in on hover")]
struct Cli {
    /// Path to the configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Render without a window and save a PNG
    #[arg(long)]
    headless: bool,

    /// Snapshot path for headless mode
    #[arg(short, long, value_name = "FILE", default_value = "button.png")]
    output: PathBuf,

    /// Number of frames to simulate in headless mode
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Frame at which the pointer enters the button (headless)
    #[arg(long, value_name = "N")]
    hover_at: Option<u32>,

    /// Frame at which the pointer leaves the button (headless)
    #[arg(long, value_name = "N")]
    leave_at: Option<u32>,

    /// Pointer position in window pixels, sent before the first frame (headless)
    #[arg(long, value_name = "X,Y", value_parser = parse_pointer)]
    pointer: Option<(f32, f32)>,
}

fn parse_pointer(value: &str) -> Result<(f32, f32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{value}'"))?;
    let coord = |c: &str| c.trim().parse::<f32>().map_err(|e| format!("'{c}': {e}"));
    Ok((coord(x)?, coord(y)?))
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .filter_module("eframe", log::LevelFilter::Warn)
        .filter_module("egui_glow", log::LevelFilter::Warn)
        .filter_module("egui_winit", log::LevelFilter::Warn)
        .filter_module("winit", log::LevelFilter::Warn)
        .filter_module("wgpu", log::LevelFilter::Warn)
        .filter_module("glutin", log::LevelFilter::Warn)
        .filter_module("sctk", log::LevelFilter::Warn)
        .format_timestamp(None)
        .format_level(true)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            info!("Loading config: {:?}", path);
            Config::load(path)
        }
        None => {
            info!("Using default settings");
            Ok(Config::default())
        }
    };

    let result = config.and_then(|config| {
        if cli.headless {
            run_headless(
                config,
                &HeadlessOptions {
                    output: cli.output.clone(),
                    frames: cli.frames,
                    hover_at: cli.hover_at,
                    leave_at: cli.leave_at,
                    pointer: cli.pointer,
                },
            )
        } else {
            run_gui(config)
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_flags_default_to_no_hover() {
        let cli = Cli::try_parse_from(["animated-button", "--headless"]).unwrap();
        assert_eq!(cli.hover_at, None);
        assert_eq!(cli.pointer, None);
        assert_eq!(cli.frames, 60);
    }

    #[test]
    fn pointer_and_hover_flags_parse() {
        let cli = Cli::try_parse_from(["animated-button", "--headless", "--hover-at", "5", "--pointer", "120, 40.5"])
            .unwrap();
        assert_eq!(cli.hover_at, Some(5));
        assert_eq!(cli.pointer, Some((120.0, 40.5)));
        assert!(Cli::try_parse_from(["animated-button", "--pointer", "12"]).is_err());
    }
}
