use bevy::prelude::*;
use bevy_common_assets::ron::RonAssetPlugin;
use serde::{Deserialize, Serialize};

use super::animator::RenderStyle;
use super::canvas::Stroke;
use super::error::GridError;
use super::pulse::DEFAULT_ANGULAR_SPEED;
use super::tiling::{GlowPalette, GridConfig};

pub const PAGE_LAYOUT_PATH: &str = "assets/page_layout.ron";

/// A named region of the window that can host one honeycomb surface.
/// Position and size are fractions of the window.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ContainerSpec {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Static page layout, read once at startup before the window opens.
#[derive(Resource, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct PageLayout {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub containers: Vec<ContainerSpec>,
}

impl PageLayout {
    /// Reads the layout from `path`, falling back to the built-in one.
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match ron::from_str::<PageLayout>(&contents) {
                Ok(layout) => {
                    info!("Loaded page layout from {}", path);
                    layout
                }
                Err(e) => {
                    error!("Failed to parse page layout: {}", e);
                    error!("Using default PageLayout");
                    PageLayout::default()
                }
            },
            Err(e) => {
                error!("Failed to read {}: {}", path, e);
                error!("Using default PageLayout");
                PageLayout::default()
            }
        }
    }

    pub fn container(&self, id: &str) -> Option<&ContainerSpec> {
        self.containers.iter().find(|c| c.id == id)
    }

    pub fn container_mut(&mut self, id: &str) -> Option<&mut ContainerSpec> {
        self.containers.iter_mut().find(|c| c.id == id)
    }

    /// Pixel rect (top-left origin, y down) of a container in a window of
    /// `window_size`.
    pub fn container_rect(&self, id: &str, window_size: Vec2) -> Result<Rect, GridError> {
        let spec = self.container(id).ok_or_else(|| GridError::MissingSurface {
            container: id.to_string(),
        })?;
        let min = Vec2::new(spec.x, spec.y) * window_size;
        let size = (Vec2::new(spec.width, spec.height) * window_size).max(Vec2::ZERO);
        Ok(Rect::from_corners(min, min + size))
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        let container = |id: &str, x, y, width, height| ContainerSpec {
            id: id.to_string(),
            x,
            y,
            width,
            height,
        };
        Self {
            title: "Honeycomb".to_string(),
            window_width: 1280,
            window_height: 720,
            containers: vec![
                container("canvas-container", 0.0, 0.0, 1.0, 0.4),
                container("profile-background", 0.0, 0.4, 0.5, 0.3),
                container("projects-background", 0.5, 0.4, 0.5, 0.3),
                container("experience-background", 0.0, 0.7, 0.5, 0.3),
                container("skills-background", 0.5, 0.7, 0.5, 0.3),
            ],
        }
    }
}

/// Glow colors as written in the config file.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub enum PaletteSpec {
    Single(String),
    Many(Vec<String>),
}

impl PaletteSpec {
    pub fn resolve(&self) -> Result<GlowPalette, GridError> {
        match self {
            PaletteSpec::Single(hex) => Ok(GlowPalette::Single(parse_color(hex)?)),
            PaletteSpec::Many(hexes) => hexes
                .iter()
                .map(|hex| parse_color(hex))
                .collect::<Result<Vec<_>, _>>()
                .map(GlowPalette::Many),
        }
    }
}

fn default_angular_speed() -> f32 {
    DEFAULT_ANGULAR_SPEED
}

/// One honeycomb surface and the container it draws in.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct SurfaceSpec {
    pub container: String,
    pub hex_radius: f32,
    pub glow_probability: f32,
    pub glow: PaletteSpec,
    pub base_stroke_color: String,
    pub base_stroke_width: f32,
    pub background: String,
    #[serde(default = "default_angular_speed")]
    pub angular_speed: f32,
}

impl SurfaceSpec {
    pub fn grid_config(&self, surface_size: Vec2) -> Result<GridConfig, GridError> {
        let config = GridConfig {
            hex_radius: self.hex_radius,
            surface_width: surface_size.x,
            surface_height: surface_size.y,
            glow_palette: self.glow.resolve()?,
            glow_probability: self.glow_probability,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn render_style(&self) -> Result<RenderStyle, GridError> {
        let style = RenderStyle {
            base_stroke: Stroke::new(parse_color(&self.base_stroke_color)?, self.base_stroke_width),
            angular_speed: self.angular_speed,
        };
        style.validate()?;
        Ok(style)
    }

    pub fn background_color(&self) -> Result<Color, GridError> {
        parse_color(&self.background)
    }
}

/// Parses `#rrggbb`-style hex colors.
pub fn parse_color(value: &str) -> Result<Color, GridError> {
    Srgba::hex(value)
        .map(Color::from)
        .map_err(|_| GridError::InvalidColor {
            value: value.to_string(),
        })
}

/// Hot-reloadable surface list, loaded as an asset.
#[derive(Deserialize, Serialize, Asset, TypePath, Clone, Debug, PartialEq)]
pub struct HoneycombConfig {
    pub surfaces: Vec<SurfaceSpec>,
}

impl Default for HoneycombConfig {
    fn default() -> Self {
        let section = |container: &str, color: &str| SurfaceSpec {
            container: container.to_string(),
            hex_radius: 40.0,
            glow_probability: 0.1,
            glow: PaletteSpec::Single(color.to_string()),
            base_stroke_color: "#000000".to_string(),
            base_stroke_width: 1.0,
            background: "#2a2a2a".to_string(),
            angular_speed: DEFAULT_ANGULAR_SPEED,
        };
        Self {
            surfaces: vec![
                SurfaceSpec {
                    container: "canvas-container".to_string(),
                    hex_radius: 40.0,
                    glow_probability: 0.1,
                    glow: PaletteSpec::Many(
                        ["#ff0000", "#ffa500", "#87ceeb", "#adff2f"]
                            .iter()
                            .map(|c| c.to_string())
                            .collect(),
                    ),
                    base_stroke_color: "#323232".to_string(),
                    base_stroke_width: 1.0,
                    background: "#000000".to_string(),
                    angular_speed: DEFAULT_ANGULAR_SPEED,
                },
                section("profile-background", "#ff0000"),
                section("projects-background", "#adff2f"),
                section("experience-background", "#ffa500"),
                SurfaceSpec {
                    glow_probability: 0.15,
                    background: "#1a1a1a".to_string(),
                    ..section("skills-background", "#87ceeb")
                },
            ],
        }
    }
}

#[derive(Resource)]
pub struct HoneycombConfigHandle(pub Handle<HoneycombConfig>);

/// Surface list currently in effect. Replacing it respawns every surface.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct SurfaceSpecs(pub Vec<SurfaceSpec>);

pub struct HoneycombConfigPlugin;

impl Plugin for HoneycombConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<HoneycombConfig>::new(&["honeycomb.ron"]))
            .init_resource::<SurfaceSpecs>()
            .add_systems(Startup, (load_page_layout, setup_surface_config).chain())
            .add_systems(Update, apply_surface_config);
    }
}

/// Reads the page layout unless the binary already inserted one.
fn load_page_layout(mut commands: Commands, existing: Option<Res<PageLayout>>) {
    if existing.is_none() {
        commands.insert_resource(PageLayout::load_or_default(PAGE_LAYOUT_PATH));
    }
}

fn setup_surface_config(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handle = asset_server.load("honeycomb.ron");
    commands.insert_resource(HoneycombConfigHandle(handle));
}

/// Copies the surface asset into [`SurfaceSpecs`] on load and on every edit.
fn apply_surface_config(
    config_handle: Res<HoneycombConfigHandle>,
    configs: Res<Assets<HoneycombConfig>>,
    mut events: MessageReader<AssetEvent<HoneycombConfig>>,
    mut specs: ResMut<SurfaceSpecs>,
) {
    for event in events.read() {
        if event.is_modified(config_handle.0.id())
            || event.is_loaded_with_dependencies(config_handle.0.id())
        {
            if let Some(config) = configs.get(&config_handle.0) {
                info!("Applying honeycomb config: {} surfaces", config.surfaces.len());
                specs.set_if_neq(SurfaceSpecs(config.surfaces.clone()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_configs_parse() {
        let layout: PageLayout =
            ron::from_str(include_str!("../../assets/page_layout.ron")).expect("page layout");
        assert_eq!(layout, PageLayout::default());

        let config: HoneycombConfig =
            ron::from_str(include_str!("../../assets/honeycomb.ron")).expect("honeycomb config");
        assert_eq!(config, HoneycombConfig::default());
        for spec in &config.surfaces {
            assert!(layout.container(&spec.container).is_some(), "{}", spec.container);
            spec.grid_config(Vec2::new(100.0, 100.0)).expect("valid grid");
            spec.render_style().expect("valid style");
            spec.background_color().expect("valid background");
        }
    }

    #[test]
    fn test_container_rect_scales_with_window() {
        let layout = PageLayout::default();
        let rect = layout
            .container_rect("skills-background", Vec2::new(1000.0, 500.0))
            .expect("container exists");
        assert_eq!(rect.min, Vec2::new(500.0, 350.0));
        assert_eq!(rect.size(), Vec2::new(500.0, 150.0));
    }

    #[test]
    fn test_missing_container_is_reported() {
        let err = PageLayout::default()
            .container_rect("modal-background", Vec2::new(100.0, 100.0))
            .unwrap_err();
        assert_eq!(
            err,
            GridError::MissingSurface {
                container: "modal-background".to_string()
            }
        );
    }

    #[test]
    fn test_palette_resolution() {
        let many = PaletteSpec::Many(vec!["#ff0000".into(), "#00ff00".into()]);
        assert_eq!(
            many.resolve().expect("valid colors"),
            GlowPalette::Many(vec![Color::srgb(1.0, 0.0, 0.0), Color::srgb(0.0, 1.0, 0.0)])
        );

        let bad = PaletteSpec::Single("not-a-color".into());
        assert!(matches!(bad.resolve(), Err(GridError::InvalidColor { .. })));
    }

    #[test]
    fn test_empty_palette_is_degenerate() {
        let spec = SurfaceSpec {
            glow: PaletteSpec::Many(Vec::new()),
            ..HoneycombConfig::default().surfaces[0].clone()
        };
        assert!(matches!(
            spec.grid_config(Vec2::new(10.0, 10.0)),
            Err(GridError::DegenerateConfig(_))
        ));
    }

    #[test]
    fn test_unusable_stroke_widths_are_degenerate() {
        let base = HoneycombConfig::default().surfaces[1].clone();
        for width in [0.0, -1.0, f32::NAN, f32::INFINITY, 1e9] {
            let spec = SurfaceSpec {
                base_stroke_width: width,
                ..base.clone()
            };
            assert!(
                matches!(spec.render_style(), Err(GridError::DegenerateConfig(_))),
                "width {width}"
            );
        }

        let widest = SurfaceSpec {
            base_stroke_width: RenderStyle::MAX_STROKE_WIDTH,
            ..base
        };
        widest.render_style().expect("widest accepted stroke");
    }

    #[test]
    fn test_angular_speed_defaults_when_omitted() {
        let spec: SurfaceSpec = ron::from_str(
            r##"(
                container: "profile-background",
                hex_radius: 40.0,
                glow_probability: 0.1,
                glow: Single("#ff0000"),
                base_stroke_color: "#000000",
                base_stroke_width: 1.0,
                background: "#2a2a2a",
            )"##,
        )
        .expect("surface spec");
        assert_eq!(spec.angular_speed, DEFAULT_ANGULAR_SPEED);
    }
}
