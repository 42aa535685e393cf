use bevy::prelude::*;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::f32::consts::TAU;

use super::error::GridError;
use super::geometry::HexMetrics;

#[cfg(test)]
mod tests;

/// Largest grid a single surface may lay out.
pub const MAX_CELLS: usize = 1_000_000;

/// Colors a glowing cell may take.
#[derive(Debug, Clone, PartialEq)]
pub enum GlowPalette {
    /// Every glowing cell uses this color.
    Single(Color),
    /// Each glowing cell picks one of these uniformly at random.
    Many(Vec<Color>),
}

impl GlowPalette {
    fn pick<R: Rng>(&self, rng: &mut R) -> Option<Color> {
        match self {
            GlowPalette::Single(color) => Some(*color),
            GlowPalette::Many(colors) => colors.choose(rng).copied(),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, GlowPalette::Many(colors) if colors.is_empty())
    }
}

/// One hexagon of the tiling.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Center in surface coordinates (top-left origin, y down).
    pub center: Vec2,
    pub is_glowing: bool,
    /// Set only for glowing cells.
    pub glow_color: Option<Color>,
    /// Pulse phase in `[0, 2π)`, drawn for every cell.
    pub phase_offset: f32,
}

/// Everything needed to lay out one surface's grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub hex_radius: f32,
    pub surface_width: f32,
    pub surface_height: f32,
    pub glow_palette: GlowPalette,
    /// Chance that any given cell glows. Values outside `[0, 1]` are clamped.
    pub glow_probability: f32,
}

impl GridConfig {
    /// Rejects configs that would produce an empty-by-accident or unbounded
    /// tiling. A zero-sized surface is valid and tiles to nothing.
    pub fn validate(&self) -> Result<(), GridError> {
        if !self.hex_radius.is_finite() || self.hex_radius <= 0.0 {
            return Err(GridError::DegenerateConfig(format!(
                "hex radius must be positive, got {}",
                self.hex_radius
            )));
        }
        if !self.surface_width.is_finite() || !self.surface_height.is_finite() {
            return Err(GridError::DegenerateConfig(format!(
                "surface size must be finite, got {}x{}",
                self.surface_width, self.surface_height
            )));
        }
        if self.surface_width < 0.0 || self.surface_height < 0.0 {
            return Err(GridError::DegenerateConfig(format!(
                "surface size must not be negative, got {}x{}",
                self.surface_width, self.surface_height
            )));
        }
        if self.glow_palette.is_empty() {
            return Err(GridError::DegenerateConfig(
                "glow palette needs at least one color".to_string(),
            ));
        }
        let cells = self.cell_count_estimate();
        if cells > MAX_CELLS as f64 {
            return Err(GridError::DegenerateConfig(format!(
                "radius {} on a {}x{} surface needs {:.0} cells, limit is {}",
                self.hex_radius, self.surface_width, self.surface_height, cells, MAX_CELLS
            )));
        }
        Ok(())
    }

    /// Closed-form cell count in f64, so tiny radii cannot overflow.
    fn cell_count_estimate(&self) -> f64 {
        if self.surface_width <= 0.0 || self.surface_height <= 0.0 {
            return 0.0;
        }
        let radius = f64::from(self.hex_radius);
        let hex_width = 3.0_f64.sqrt() * radius;
        let cols = ((f64::from(self.surface_width) + hex_width) / hex_width).ceil();
        let rows = ((f64::from(self.surface_height) + 2.0 * radius) / (1.5 * radius)).ceil();
        cols * rows
    }

    pub fn metrics(&self) -> HexMetrics {
        HexMetrics::new(self.hex_radius)
    }

    /// Same config for a surface of a different size.
    pub fn with_surface_size(&self, width: f32, height: f32) -> Self {
        Self {
            surface_width: width,
            surface_height: height,
            ..self.clone()
        }
    }
}

/// Lays out the honeycomb for `config` using the thread-local generator.
pub fn initialize(config: &GridConfig) -> Result<Vec<Cell>, GridError> {
    initialize_with(config, &mut rand::rng())
}

/// Lays out the honeycomb for `config`, drawing glow state from `rng`.
///
/// Cell positions depend only on the config; `is_glowing`, `glow_color` and
/// `phase_offset` are the only randomized fields.
pub fn initialize_with<R: Rng>(
    config: &GridConfig,
    rng: &mut R,
) -> Result<Vec<Cell>, GridError> {
    config.validate()?;

    let metrics = config.metrics();
    let rows = metrics.row_count(config.surface_height);
    let cols = metrics.column_count(config.surface_width);
    let probability = config.glow_probability.clamp(0.0, 1.0);

    let mut cells = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        let y = row as f32 * metrics.row_stride;
        let x_offset = metrics.row_offset(row);
        for col in 0..cols {
            let x = col as f32 * metrics.hex_width + x_offset;
            let is_glowing = rng.random::<f32>() < probability;
            let glow_color = if is_glowing {
                config.glow_palette.pick(rng)
            } else {
                None
            };
            cells.push(Cell {
                center: Vec2::new(x, y),
                is_glowing,
                glow_color,
                phase_offset: rng.random_range(0.0..TAU),
            });
        }
    }

    Ok(cells)
}
