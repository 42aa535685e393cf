use super::*;
use crate::honeycomb::geometry::contains_point;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn red() -> Color {
    Color::srgb(1.0, 0.0, 0.0)
}

fn config(width: f32, height: f32, probability: f32) -> GridConfig {
    GridConfig {
        hex_radius: 40.0,
        surface_width: width,
        surface_height: height,
        glow_palette: GlowPalette::Single(red()),
        glow_probability: probability,
    }
}

fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn test_example_surface_cell_count() {
    // 400x300 at radius 40: 7 columns (ceil(469.28 / 69.28)) by 7 rows (ceil(380 / 60)).
    let cells = initialize_with(&config(400.0, 300.0, 0.0), &mut seeded(0)).unwrap();
    assert_eq!(cells.len(), 49);
    assert!(cells.iter().all(|c| !c.is_glowing && c.glow_color.is_none()));
}

#[test]
fn test_columns_per_row_match_closed_form() {
    for (width, height) in [(400.0, 300.0), (1280.0, 720.0), (1.0, 1.0), (69.0, 200.0)] {
        let cfg = config(width, height, 0.0);
        let m = cfg.metrics();
        let cells = initialize_with(&cfg, &mut seeded(3)).unwrap();
        let expected_cols = ((width + m.hex_width) / m.hex_width).ceil() as usize;

        let rows = m.row_count(height);
        assert_eq!(cells.len(), rows * expected_cols, "{width}x{height}");
        for row in 0..rows {
            let y = row as f32 * m.row_stride;
            let in_row = cells.iter().filter(|c| (c.center.y - y).abs() < 1e-3).count();
            assert_eq!(in_row, expected_cols, "row {row} of {width}x{height}");
        }
    }
}

#[test]
fn test_odd_rows_are_offset_by_half_a_cell() {
    let cfg = config(400.0, 300.0, 0.0);
    let m = cfg.metrics();
    let cells = initialize_with(&cfg, &mut seeded(0)).unwrap();
    let cols = m.column_count(400.0);

    assert_eq!(cells[0].center, Vec2::ZERO);
    let first_odd = &cells[cols];
    assert!((first_odd.center.x - m.hex_width / 2.0).abs() < 1e-4);
    assert!((first_odd.center.y - m.row_stride).abs() < 1e-4);
    let first_even = &cells[2 * cols];
    assert_eq!(first_even.center.x, 0.0);
}

#[test]
fn test_grid_covers_the_whole_surface() {
    for (width, height, radius) in [(400.0, 300.0, 40.0), (333.0, 217.0, 17.5), (50.0, 500.0, 60.0)] {
        let cfg = GridConfig {
            hex_radius: radius,
            ..config(width, height, 0.0)
        };
        let cells = initialize_with(&cfg, &mut seeded(9)).unwrap();

        let steps = 40;
        for i in 0..=steps {
            for j in 0..=steps {
                let probe = Vec2::new(width * i as f32 / steps as f32, height * j as f32 / steps as f32);
                let nearest = cells
                    .iter()
                    .min_by(|a, b| {
                        a.center
                            .distance_squared(probe)
                            .total_cmp(&b.center.distance_squared(probe))
                    })
                    .unwrap();
                assert!(
                    contains_point(nearest.center, radius, probe),
                    "gap at {probe:?} for {width}x{height} r={radius}"
                );
            }
        }
    }
}

#[test]
fn test_positions_do_not_depend_on_randomness() {
    let cfg = config(640.0, 480.0, 0.5);
    let a = initialize_with(&cfg, &mut seeded(1)).unwrap();
    let b = initialize_with(&cfg, &mut seeded(2)).unwrap();
    assert_eq!(a.len(), b.len());
    assert!(a.iter().zip(&b).all(|(x, y)| x.center == y.center));

    // Same seed, same everything.
    let c = initialize_with(&cfg, &mut seeded(1)).unwrap();
    assert_eq!(a, c);
}

#[test]
fn test_probability_one_lights_every_cell() {
    let cells = initialize_with(&config(400.0, 300.0, 1.0), &mut seeded(5)).unwrap();
    assert!(cells.iter().all(|c| c.is_glowing && c.glow_color == Some(red())));
}

#[test]
fn test_probability_is_clamped() {
    let none = initialize_with(&config(400.0, 300.0, -3.0), &mut seeded(5)).unwrap();
    assert!(none.iter().all(|c| !c.is_glowing));
    let all = initialize_with(&config(400.0, 300.0, 7.0), &mut seeded(5)).unwrap();
    assert!(all.iter().all(|c| c.is_glowing));
}

#[test]
fn test_palette_colors_come_from_the_palette() {
    let palette = vec![
        Color::srgb(1.0, 0.0, 0.0),
        Color::srgb(1.0, 0.65, 0.0),
        Color::srgb(0.53, 0.81, 0.92),
        Color::srgb(0.68, 1.0, 0.18),
    ];
    let cfg = GridConfig {
        glow_palette: GlowPalette::Many(palette.clone()),
        ..config(1280.0, 720.0, 1.0)
    };
    let cells = initialize_with(&cfg, &mut seeded(11)).unwrap();
    for cell in &cells {
        let color = cell.glow_color.expect("every cell glows");
        assert!(palette.contains(&color));
    }
    // Several hundred draws should hit every color.
    for color in &palette {
        assert!(cells.iter().any(|c| c.glow_color.as_ref() == Some(color)));
    }
}

#[test]
fn test_phase_offsets_stay_in_range_for_every_cell() {
    let cells = initialize_with(&config(800.0, 600.0, 0.1), &mut seeded(13)).unwrap();
    assert!(cells
        .iter()
        .all(|c| (0.0..std::f32::consts::TAU).contains(&c.phase_offset)));
    // Non-glowing cells get a phase too.
    assert!(cells.iter().any(|c| !c.is_glowing && c.phase_offset > 0.0));
}

#[test]
fn test_zero_sized_surface_yields_no_cells() {
    for (w, h) in [(0.0, 0.0), (0.0, 300.0), (400.0, 0.0)] {
        let cells = initialize_with(&config(w, h, 1.0), &mut seeded(0)).unwrap();
        assert!(cells.is_empty(), "{w}x{h}");
    }
}

#[test]
fn test_degenerate_configs_are_rejected() {
    let mut cfg = config(400.0, 300.0, 0.1);
    cfg.hex_radius = 0.0;
    assert!(matches!(initialize(&cfg), Err(GridError::DegenerateConfig(_))));

    cfg.hex_radius = -5.0;
    assert!(matches!(initialize(&cfg), Err(GridError::DegenerateConfig(_))));

    cfg.hex_radius = f32::NAN;
    assert!(matches!(initialize(&cfg), Err(GridError::DegenerateConfig(_))));

    let negative = config(-1.0, 300.0, 0.1);
    assert!(matches!(initialize(&negative), Err(GridError::DegenerateConfig(_))));

    let infinite = config(f32::INFINITY, 300.0, 0.1);
    assert!(matches!(initialize(&infinite), Err(GridError::DegenerateConfig(_))));
}

#[test]
fn test_tiny_radius_is_rejected_before_allocating() {
    for radius in [1e-4, 1e-30, f32::MIN_POSITIVE] {
        let cfg = GridConfig {
            hex_radius: radius,
            ..config(400.0, 300.0, 0.1)
        };
        assert!(
            matches!(initialize(&cfg), Err(GridError::DegenerateConfig(_))),
            "radius {radius}"
        );
    }

    // A tiny radius on an empty surface still tiles to nothing.
    let empty = GridConfig {
        hex_radius: 1e-4,
        ..config(0.0, 300.0, 0.1)
    };
    assert!(initialize(&empty).unwrap().is_empty());
}

#[test]
fn test_large_grids_under_the_limit_are_accepted() {
    // 1920x1080 at radius 2: 556 columns by 362 rows.
    let cfg = GridConfig {
        hex_radius: 2.0,
        ..config(1920.0, 1080.0, 0.0)
    };
    let m = cfg.metrics();
    let expected = m.column_count(1920.0) * m.row_count(1080.0);
    assert!(expected < MAX_CELLS);
    assert_eq!(initialize_with(&cfg, &mut seeded(4)).unwrap().len(), expected);
}
