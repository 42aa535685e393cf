use bevy::prelude::*;

/// Outline style for one polygon. Color carries its own alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// The drawing capability a honeycomb surface needs: closed polygon outlines,
/// never filled. Coordinates are surface pixels, top-left origin, y down.
pub trait Canvas {
    fn stroke_polygon(&mut self, vertices: &[Vec2], stroke: Stroke);
}

/// A polygon as it was handed to a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub struct StrokedPolygon {
    pub vertices: Vec<Vec2>,
    pub stroke: Stroke,
}

/// Canvas that keeps every stroke in draw order instead of rasterizing.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub polygons: Vec<StrokedPolygon>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for RecordingCanvas {
    fn stroke_polygon(&mut self, vertices: &[Vec2], stroke: Stroke) {
        self.polygons.push(StrokedPolygon {
            vertices: vertices.to_vec(),
            stroke,
        });
    }
}

/// Gizmo group used for every honeycomb stroke.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct HoneycombGizmos;

/// Width of one gizmo line, in pixels.
pub const GIZMO_LINE_WIDTH: f32 = 1.0;

/// Draws a surface onto the 2D gizmo layer.
///
/// `rect` is the surface's placement in window pixels (top-left origin,
/// y down). Edges are clipped to it, so overscan cells stop at the border.
pub struct GizmoCanvas<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's, HoneycombGizmos>,
    rect: Rect,
    window_size: Vec2,
}

impl<'a, 'w, 's> GizmoCanvas<'a, 'w, 's> {
    pub fn new(gizmos: &'a mut Gizmos<'w, 's, HoneycombGizmos>, rect: Rect, window_size: Vec2) -> Self {
        Self { gizmos, rect, window_size }
    }

    fn to_world(&self, point: Vec2) -> Vec2 {
        window_to_world(self.rect.min + point, self.window_size)
    }
}

impl Canvas for GizmoCanvas<'_, '_, '_> {
    fn stroke_polygon(&mut self, vertices: &[Vec2], stroke: Stroke) {
        let bounds = Rect::from_corners(Vec2::ZERO, self.rect.size());
        for offset in stroke_offsets(stroke.width) {
            let outline = offset_polygon(vertices, offset);
            for (i, &a) in outline.iter().enumerate() {
                let b = outline[(i + 1) % outline.len()];
                if let Some((a, b)) = clip_segment(a, b, bounds) {
                    let (a, b) = (self.to_world(a), self.to_world(b));
                    self.gizmos.line_2d(a, b, stroke.color);
                }
            }
        }
    }
}

/// Converts window pixels (top-left origin, y down) to 2D world coordinates
/// for a camera centered on the window.
pub fn window_to_world(point: Vec2, window_size: Vec2) -> Vec2 {
    Vec2::new(point.x - window_size.x / 2.0, window_size.y / 2.0 - point.y)
}

/// Most parallel outlines drawn for one stroke.
pub const MAX_STROKE_PASSES: usize = 16;

/// Offsets of the parallel outlines that together make up a stroke of
/// `width` pixels drawn with 1 px gizmo lines.
pub fn stroke_offsets(width: f32) -> Vec<f32> {
    if !width.is_finite() {
        return vec![0.0];
    }
    let passes = (width / GIZMO_LINE_WIDTH)
        .round()
        .clamp(1.0, MAX_STROKE_PASSES as f32) as usize;
    if passes == 1 {
        return vec![0.0];
    }
    let spacing = (width - GIZMO_LINE_WIDTH) / (passes - 1) as f32;
    let middle = (passes - 1) as f32 / 2.0;
    (0..passes).map(|k| (k as f32 - middle) * spacing).collect()
}

/// Grows (positive `offset`) or shrinks a convex polygon about its centroid.
pub fn offset_polygon(vertices: &[Vec2], offset: f32) -> Vec<Vec2> {
    if offset == 0.0 || vertices.is_empty() {
        return vertices.to_vec();
    }
    let centroid = vertices.iter().copied().sum::<Vec2>() / vertices.len() as f32;
    let radius = vertices[0].distance(centroid);
    if radius <= f32::EPSILON {
        return vertices.to_vec();
    }
    let scale = ((radius + offset) / radius).max(0.0);
    vertices
        .iter()
        .map(|&v| centroid + (v - centroid) * scale)
        .collect()
}

/// Liang-Barsky clipping of segment `a-b` against `bounds`.
pub fn clip_segment(a: Vec2, b: Vec2, bounds: Rect) -> Option<(Vec2, Vec2)> {
    let d = b - a;
    let mut t0 = 0.0_f32;
    let mut t1 = 1.0_f32;
    let edges = [
        (-d.x, a.x - bounds.min.x),
        (d.x, bounds.max.x - a.x),
        (-d.y, a.y - bounds.min.y),
        (d.y, bounds.max.y - a.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((a + d * t0, a + d * t1))
}
