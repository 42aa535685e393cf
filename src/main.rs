use bevy::prelude::*;

use bevy::window::WindowResolution;

use hexglow::honeycomb::config::{PageLayout, PAGE_LAYOUT_PATH};
use hexglow::honeycomb::HoneycombPlugin;

use bevy::log::LogPlugin;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILES_KEPT: usize = 25;

fn setup_file_logging() -> io::Result<String> {
    let log_dir = PathBuf::from("logs");
    fs::create_dir_all(&log_dir)?;

    cleanup_old_logs(&log_dir, LOG_FILES_KEPT);

    let now = chrono::Local::now();
    let log_filename = format!("hexglow_{}.log", now.format("%Y%m%d_%H%M%S"));
    let log_path_str = log_dir.join(&log_filename).to_string_lossy().to_string();

    // One file per run
    let file_appender = RollingFileAppender::new(Rotation::NEVER, &log_dir, &log_filename);

    let file_layer = fmt::layer().with_writer(file_appender).with_ansi(false);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("wgpu=error,bevy_render=info,bevy_ecs=info,hexglow=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(log_path_str)
}

fn setup_stdout_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hexglow=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

fn cleanup_old_logs(log_dir: &Path, keep_count: usize) {
    let Ok(entries) = fs::read_dir(log_dir) else { return };
    let mut log_files: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .file_name()
                .and_then(|n| n.to_str())
                .map(|s| s.starts_with("hexglow") && s.ends_with(".log"))
                .unwrap_or(false)
        })
        .collect();

    // Oldest first
    log_files.sort_by_key(|e| e.metadata().ok().and_then(|m| m.modified().ok()));

    if log_files.len() > keep_count {
        for file in log_files.iter().take(log_files.len() - keep_count) {
            let _ = fs::remove_file(file.path());
        }
    }
}

fn main() {
    match setup_file_logging() {
        Ok(log_file) => println!("hexglow: logging to {}", log_file),
        Err(e) => {
            setup_stdout_logging();
            warn!("File logging unavailable ({}), logging to stdout only", e);
        }
    }

    let layout = PageLayout::load_or_default(PAGE_LAYOUT_PATH);

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: layout.title.clone(),
                        resolution: WindowResolution::new(layout.window_width, layout.window_height),
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .build()
                .disable::<LogPlugin>(), // We install our own subscriber
        )
        .insert_resource(layout)
        .add_plugins(HoneycombPlugin)
        .run();
}
