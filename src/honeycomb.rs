use bevy::prelude::*;

pub mod animator;
pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod pulse;
pub mod surface;
pub mod tiling;

use config::HoneycombConfigPlugin;
use surface::SurfacePlugin;

pub use animator::{HexGridAnimator, RenderStyle};
pub use canvas::{Canvas, RecordingCanvas, Stroke};
pub use error::GridError;
pub use tiling::{Cell, GlowPalette, GridConfig};

pub struct HoneycombPlugin;

impl Plugin for HoneycombPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((HoneycombConfigPlugin, SurfacePlugin))
            .insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, setup_camera);
    }
}

fn setup_camera(mut commands: Commands) {
    info!("Honeycomb setup started");
    commands.spawn(Camera2d);
}
