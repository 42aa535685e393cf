//! Pointy-top hexagon geometry shared by the tiling and the renderer.
//!
//! The three spacing constants are derived from each other: a pointy-top
//! hexagon of circumradius `r` is `√3·r` wide and `2r` tall, and vertically
//! adjacent rows interlock at 3/4 of the full height. Changing one without
//! the others (or without the vertex angle offset) opens gaps between cells.

use bevy::prelude::*;
use std::f32::consts::{FRAC_PI_3, FRAC_PI_6};

/// Tolerance used when testing points that sit exactly on a shared edge.
pub const EDGE_EPSILON: f32 = 1e-3;

/// Spacing derived from a hexagon's circumradius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexMetrics {
    pub radius: f32,
    /// Horizontal distance between neighbouring centers in a row (`√3·r`).
    pub hex_width: f32,
    /// Full vertex-to-vertex height (`2r`).
    pub hex_height: f32,
    /// Vertical distance between successive rows (`0.75 · hex_height`).
    pub row_stride: f32,
}

impl HexMetrics {
    pub fn new(radius: f32) -> Self {
        let hex_width = 3.0_f32.sqrt() * radius;
        let hex_height = 2.0 * radius;
        Self {
            radius,
            hex_width,
            hex_height,
            row_stride: hex_height * 0.75,
        }
    }

    /// Number of columns emitted for a surface of the given width.
    ///
    /// One extra column of overscan covers the partially visible edge cells,
    /// so this is `ceil((width + hex_width) / hex_width)`.
    pub fn column_count(&self, width: f32) -> usize {
        if width <= 0.0 {
            return 0;
        }
        ((width + self.hex_width) / self.hex_width).ceil() as usize
    }

    /// Number of rows emitted for a surface of the given height.
    pub fn row_count(&self, height: f32) -> usize {
        if height <= 0.0 {
            return 0;
        }
        ((height + self.hex_height) / self.row_stride).ceil() as usize
    }

    /// Horizontal offset applied to a row: odd rows shift by half a cell.
    pub fn row_offset(&self, row: usize) -> f32 {
        if row % 2 == 1 {
            self.hex_width / 2.0
        } else {
            0.0
        }
    }
}

/// Vertices of a pointy-top hexagon, starting 30° off the horizontal.
pub fn hexagon_vertices(center: Vec2, radius: f32) -> [Vec2; 6] {
    std::array::from_fn(|k| {
        let angle = FRAC_PI_6 + FRAC_PI_3 * k as f32;
        center + Vec2::new(angle.cos(), angle.sin()) * radius
    })
}

/// Whether `point` lies inside (or on the border of) the pointy-top hexagon
/// centered at `center`.
pub fn contains_point(center: Vec2, radius: f32, point: Vec2) -> bool {
    let d = (point - center).abs();
    let half_width = 3.0_f32.sqrt() / 2.0 * radius;
    if d.x > half_width + EDGE_EPSILON {
        return false;
    }
    // Slanted edges: y <= r - x/√3 inside the right half.
    d.y <= radius - d.x / 3.0_f32.sqrt() + EDGE_EPSILON
}
