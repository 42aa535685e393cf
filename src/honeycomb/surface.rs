//! Honeycomb surfaces hosted in page containers.
//!
//! Each configured surface becomes one entity carrying its animator, its pixel
//! rect and a background sprite. Surfaces are looked up by container id
//! through [`SurfaceRegistry`], so the host can ask a single surface to
//! re-measure itself with [`RefreshSurface`].

use bevy::diagnostic::FrameCount;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use hexglow_macros::profile;
use std::collections::HashMap;

use super::animator::HexGridAnimator;
use super::canvas::{window_to_world, GizmoCanvas, HoneycombGizmos, GIZMO_LINE_WIDTH};
use super::config::{PageLayout, SurfaceSpec, SurfaceSpecs};
use super::error::GridError;

/// Container id a surface draws in.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct SurfaceId(pub String);

/// Surface placement in window pixels (top-left origin, y down).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect(pub Rect);

/// Current window size in logical pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct HostViewport {
    pub size: Vec2,
}

impl Default for HostViewport {
    fn default() -> Self {
        Self {
            size: Vec2::new(1280.0, 720.0),
        }
    }
}

/// Live surfaces by container id.
#[derive(Resource, Debug, Default)]
pub struct SurfaceRegistry {
    surfaces: HashMap<String, Entity>,
}

impl SurfaceRegistry {
    pub fn get(&self, container: &str) -> Option<Entity> {
        self.surfaces.get(container).copied()
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn containers(&self) -> impl Iterator<Item = &str> {
        self.surfaces.keys().map(String::as_str)
    }
}

/// Asks the surface in `container` to re-measure its container and re-tile.
/// Sent after the host changes a container's size.
#[derive(Event, Message, Debug, Clone)]
pub struct RefreshSurface {
    pub container: String,
}

impl RefreshSurface {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum SurfaceSet {
    Layout,
    Draw,
}

pub struct SurfacePlugin;

impl Plugin for SurfacePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SurfaceRegistry>()
            .init_resource::<SurfaceSpecs>()
            .add_message::<RefreshSurface>()
            .init_gizmo_group::<HoneycombGizmos>()
            .configure_sets(Update, SurfaceSet::Layout.before(SurfaceSet::Draw))
            .add_systems(Startup, (init_viewport, configure_gizmos))
            .add_systems(
                Update,
                (
                    track_window_resize,
                    spawn_surfaces.run_if(resource_exists_and_changed::<SurfaceSpecs>),
                    relayout_surfaces.run_if(viewport_resized),
                    refresh_surfaces,
                )
                    .chain()
                    .in_set(SurfaceSet::Layout),
            )
            .add_systems(Update, draw_surfaces.in_set(SurfaceSet::Draw));
    }
}

fn init_viewport(
    mut commands: Commands,
    existing: Option<Res<HostViewport>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if let Ok(window) = windows.single() {
        commands.insert_resource(HostViewport {
            size: Vec2::new(window.width(), window.height()),
        });
    } else if existing.is_none() {
        commands.init_resource::<HostViewport>();
    }
}

fn configure_gizmos(mut store: ResMut<GizmoConfigStore>) {
    let (config, _) = store.config_mut::<HoneycombGizmos>();
    config.line.width = GIZMO_LINE_WIDTH;
}

fn track_window_resize(
    mut resized: MessageReader<WindowResized>,
    mut viewport: ResMut<HostViewport>,
) {
    if let Some(last) = resized.read().last() {
        viewport.set_if_neq(HostViewport {
            size: Vec2::new(last.width, last.height),
        });
    }
}

/// A later resize, not the viewport's first insertion. Surfaces spawned
/// against a fresh viewport are already sized for it.
fn viewport_resized(viewport: Res<HostViewport>) -> bool {
    viewport.is_changed() && !viewport.is_added()
}

/// Builds the animator for one spec, or explains why the surface is disabled.
fn build_surface(
    spec: &SurfaceSpec,
    layout: &PageLayout,
    window_size: Vec2,
) -> Result<(HexGridAnimator, Rect, Color), GridError> {
    let rect = layout.container_rect(&spec.container, window_size)?;
    let animator = HexGridAnimator::new(spec.grid_config(rect.size())?, spec.render_style()?)?;
    Ok((animator, rect, spec.background_color()?))
}

fn backdrop(rect: Rect, color: Color, window_size: Vec2) -> (Sprite, Transform) {
    let center = window_to_world(rect.center(), window_size);
    (
        Sprite::from_color(color, rect.size()),
        Transform::from_translation(center.extend(-1.0)),
    )
}

/// Replaces every surface with the ones listed in [`SurfaceSpecs`].
fn spawn_surfaces(
    mut commands: Commands,
    specs: Res<SurfaceSpecs>,
    layout: Res<PageLayout>,
    viewport: Res<HostViewport>,
    mut registry: ResMut<SurfaceRegistry>,
    existing: Query<Entity, With<SurfaceId>>,
) {
    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }
    registry.surfaces.clear();

    for spec in &specs.0 {
        let (animator, rect, background) = match build_surface(spec, &layout, viewport.size) {
            Ok(surface) => surface,
            Err(e) => {
                error!("Surface '{}' disabled: {}", spec.container, e);
                continue;
            }
        };

        if animator.cells().is_empty() {
            warn!("Surface '{}' has zero size; nothing will be drawn until it is resized", spec.container);
        }
        info!(
            "Surface '{}': {}x{} px, {} cells ({} glowing)",
            spec.container,
            rect.width(),
            rect.height(),
            animator.cells().len(),
            animator.cells().iter().filter(|c| c.is_glowing).count()
        );

        let (sprite, transform) = backdrop(rect, background, viewport.size);
        let entity = commands
            .spawn((
                SurfaceId(spec.container.clone()),
                SurfaceRect(rect),
                animator,
                sprite,
                transform,
            ))
            .id();

        if registry.surfaces.insert(spec.container.clone(), entity).is_some() {
            warn!("Container '{}' hosts more than one surface; the last one wins the registry", spec.container);
        }
    }
}

/// Re-measures one surface's container and draws a fresh grid for it.
fn remeasure(
    id: &SurfaceId,
    rect: &mut SurfaceRect,
    animator: &mut HexGridAnimator,
    sprite: &mut Sprite,
    transform: &mut Transform,
    layout: &PageLayout,
    window_size: Vec2,
) -> Result<(), GridError> {
    let new_rect = layout.container_rect(&id.0, window_size)?;
    let cells = animator.on_resize(new_rect.width(), new_rect.height())?.len();
    debug!(
        "Surface '{}' re-tiled at {}x{}: {} cells",
        id.0,
        new_rect.width(),
        new_rect.height(),
        cells
    );

    rect.0 = new_rect;
    sprite.custom_size = Some(new_rect.size());
    let center = window_to_world(new_rect.center(), window_size);
    transform.translation = center.extend(transform.translation.z);
    Ok(())
}

fn relayout_surfaces(
    layout: Res<PageLayout>,
    viewport: Res<HostViewport>,
    mut surfaces: Query<(&SurfaceId, &mut SurfaceRect, &mut HexGridAnimator, &mut Sprite, &mut Transform)>,
) {
    for (id, mut rect, mut animator, mut sprite, mut transform) in surfaces.iter_mut() {
        if let Err(e) = remeasure(
            id,
            &mut rect,
            &mut animator,
            &mut sprite,
            &mut transform,
            &layout,
            viewport.size,
        ) {
            error!("Failed to resize surface '{}': {}", id.0, e);
        }
    }
}

fn refresh_surfaces(
    mut requests: MessageReader<RefreshSurface>,
    registry: Res<SurfaceRegistry>,
    layout: Res<PageLayout>,
    viewport: Res<HostViewport>,
    mut surfaces: Query<(&SurfaceId, &mut SurfaceRect, &mut HexGridAnimator, &mut Sprite, &mut Transform)>,
) {
    for request in requests.read() {
        let Some(entity) = registry.get(&request.container) else {
            warn!("No surface registered for container '{}'", request.container);
            continue;
        };
        let Ok((id, mut rect, mut animator, mut sprite, mut transform)) = surfaces.get_mut(entity) else {
            continue;
        };
        if let Err(e) = remeasure(
            id,
            &mut rect,
            &mut animator,
            &mut sprite,
            &mut transform,
            &layout,
            viewport.size,
        ) {
            error!("Failed to refresh surface '{}': {}", id.0, e);
        }
    }
}

#[profile]
fn draw_surfaces(
    surfaces: Query<(&HexGridAnimator, &SurfaceRect)>,
    viewport: Res<HostViewport>,
    frame: Res<FrameCount>,
    mut gizmos: Gizmos<HoneycombGizmos>,
) {
    crate::profile_log!(frame, "Drawing {} honeycomb surfaces", surfaces.iter().len());

    for (animator, rect) in surfaces.iter() {
        let mut canvas = GizmoCanvas::new(&mut gizmos, rect.0, viewport.size);
        animator.render(&mut canvas, frame.0);
    }
}
