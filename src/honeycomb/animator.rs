use bevy::prelude::*;
use rand::Rng;

use super::canvas::{Canvas, Stroke, GIZMO_LINE_WIDTH, MAX_STROKE_PASSES};
use super::error::GridError;
use super::geometry::hexagon_vertices;
use super::pulse::{GlowStyle, DEFAULT_ANGULAR_SPEED};
use super::tiling::{initialize_with, Cell, GridConfig};

/// Per-surface drawing constants that do not affect the tiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    /// Stroke every cell gets in the first pass.
    pub base_stroke: Stroke,
    /// Pulse speed in radians per frame.
    pub angular_speed: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            base_stroke: Stroke::new(Color::srgb_u8(50, 50, 50), 1.0),
            angular_speed: DEFAULT_ANGULAR_SPEED,
        }
    }
}

impl RenderStyle {
    /// Widest base stroke accepted, in pixels.
    pub const MAX_STROKE_WIDTH: f32 = MAX_STROKE_PASSES as f32 * GIZMO_LINE_WIDTH;

    pub fn validate(&self) -> Result<(), GridError> {
        let width = self.base_stroke.width;
        if !width.is_finite() || width <= 0.0 || width > Self::MAX_STROKE_WIDTH {
            return Err(GridError::DegenerateConfig(format!(
                "base stroke width must be in (0, {}], got {}",
                Self::MAX_STROKE_WIDTH,
                width
            )));
        }
        if !self.angular_speed.is_finite() {
            return Err(GridError::DegenerateConfig(format!(
                "angular speed must be finite, got {}",
                self.angular_speed
            )));
        }
        Ok(())
    }
}

/// Honeycomb tiling for one surface, plus the glow animation drawn over it.
///
/// Owns its cells exclusively. A resize swaps in a freshly drawn grid; cells
/// are never edited in place.
#[derive(Component, Debug, Clone)]
pub struct HexGridAnimator {
    config: GridConfig,
    style: RenderStyle,
    cells: Vec<Cell>,
}

impl HexGridAnimator {
    /// Validates `config` and lays out the first grid.
    pub fn new(config: GridConfig, style: RenderStyle) -> Result<Self, GridError> {
        Self::new_with(config, style, &mut rand::rng())
    }

    pub fn new_with<R: Rng>(
        config: GridConfig,
        style: RenderStyle,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        style.validate()?;
        let mut animator = Self {
            config,
            style,
            cells: Vec::new(),
        };
        animator.initialize_with(rng)?;
        Ok(animator)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn surface_size(&self) -> Vec2 {
        Vec2::new(self.config.surface_width, self.config.surface_height)
    }

    /// Recomputes the grid for the current config, discarding the old one.
    pub fn initialize_with<R: Rng>(&mut self, rng: &mut R) -> Result<&[Cell], GridError> {
        self.cells = initialize_with(&self.config, rng)?;
        Ok(&self.cells)
    }

    /// Re-tiles for a new surface size. Glow selection and phases are drawn
    /// again from scratch.
    pub fn on_resize(&mut self, width: f32, height: f32) -> Result<&[Cell], GridError> {
        self.on_resize_with(width, height, &mut rand::rng())
    }

    pub fn on_resize_with<R: Rng>(
        &mut self,
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> Result<&[Cell], GridError> {
        let resized = self.config.with_surface_size(width, height);
        let cells = initialize_with(&resized, rng)?;
        self.config = resized;
        self.cells = cells;
        Ok(&self.cells)
    }

    /// Draws one frame: the base grid, then the pulsing glow overlay.
    pub fn render<C: Canvas>(&self, canvas: &mut C, frame_count: u32) {
        let radius = self.config.hex_radius;

        for cell in &self.cells {
            draw_hexagon(canvas, cell.center, radius, self.style.base_stroke);
        }

        for cell in self.cells.iter().filter(|c| c.is_glowing) {
            let Some(color) = cell.glow_color else { continue };
            let glow = GlowStyle::at(f64::from(frame_count), self.style.angular_speed, cell.phase_offset);
            let stroke = Stroke::new(color.with_alpha(glow.alpha_unit()), glow.width);
            draw_hexagon(canvas, cell.center, radius, stroke);
        }
    }
}

/// Strokes one pointy-top hexagon outline.
pub fn draw_hexagon<C: Canvas>(canvas: &mut C, center: Vec2, radius: f32, stroke: Stroke) {
    canvas.stroke_polygon(&hexagon_vertices(center, radius), stroke);
}
