use approx::assert_relative_eq;

use fluted_glass::color::Rgb;
use fluted_glass::config::GlassConfig;
use fluted_glass::lookup::LookupTexture;
use fluted_glass::shade::{blob_centers, shade, Uniforms};

fn setup(columns: i64, distortion: f32, resolution: [f32; 2]) -> (Uniforms, LookupTexture) {
    let cfg = GlassConfig {
        columns,
        distortion,
        ..GlassConfig::default()
    };
    (Uniforms::from_config(&cfg, resolution), LookupTexture::new(cfg.columns))
}

fn grid() -> impl Iterator<Item = [f32; 2]> {
    (0..=16).flat_map(|i| (0..=16).map(move |j| [i as f32 / 16.0, j as f32 / 16.0]))
}

#[test]
fn output_is_a_pure_function_of_inputs() {
    let (mut u, lut) = setup(5, 0.25, [320.0, 200.0]);
    u.time = 3.7;
    let again = u;
    for uv in grid() {
        let a = shade(uv, &u, &lut);
        let b = shade(uv, &again, &lut);
        assert_eq!(a.map(f32::to_bits), b.map(f32::to_bits), "uv {uv:?}");
    }
}

#[test]
fn opaque_color_one_at_first_blob_center() {
    let (mut u, lut) = setup(5, 0.0, [100.0, 100.0]);
    u.grain = 0.0;
    let [c1, _] = blob_centers(0.0, 1.0);
    let px = shade(c1, &u, &lut);
    assert_eq!(px[3], 1.0);
    assert_eq!(px[..3], GlassConfig::default().color_one.0);
}

#[test]
fn transparent_away_from_blobs() {
    let (u, lut) = setup(5, 0.0, [100.0, 100.0]);
    let px = shade([0.0, 0.0], &u, &lut);
    assert_eq!(px, [0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn color_is_premultiplied() {
    let (mut u, lut) = setup(9, 0.3, [160.0, 90.0]);
    u.grain = 0.0;
    u.time = 1.25;
    u.color_one = Rgb([1.0, 1.0, 1.0]);
    u.color_two = Rgb([1.0, 0.5, 0.0]);
    for uv in grid() {
        let [r, g, b, a] = shade(uv, &u, &lut);
        assert!((0.0..=1.0).contains(&a));
        for c in [r, g, b] {
            assert!(c <= a + 1e-6, "uv {uv:?}: {c} > alpha {a}");
        }
    }
}

#[test]
fn second_blob_pulls_toward_color_two() {
    let (mut u, lut) = setup(5, 0.0, [100.0, 100.0]);
    u.grain = 0.0;
    let [_, c2] = blob_centers(0.0, 1.0);
    let px = shade(c2, &u, &lut);
    assert_eq!(px[3], 1.0);
    assert_eq!(px[..3], GlassConfig::default().color_two.0);
}

#[test]
fn blobs_drift_over_time() {
    let (mut u, lut) = setup(5, 0.0, [100.0, 100.0]);
    u.grain = 0.0;
    let at = |u: &Uniforms| grid().map(|uv| shade(uv, u, &lut)[3]).collect::<Vec<_>>();
    let still = at(&u);
    u.time = 7.0;
    assert_ne!(still, at(&u));
}

#[test]
fn blobs_stay_round_on_wide_surfaces() {
    let (mut square, lut) = setup(5, 0.0, [100.0, 100.0]);
    let (mut wide, _) = setup(5, 0.0, [200.0, 100.0]);
    square.grain = 0.0;
    wide.grain = 0.0;
    assert_eq!(wide.aspect, 2.0);

    let [c_sq, _] = blob_centers(0.0, 1.0);
    // Same horizontal distance in aspect space, half the uv distance.
    let a = shade([c_sq[0] + 0.1, c_sq[1]], &square, &lut)[3];
    let b = shade([c_sq[0] + 0.05, c_sq[1]], &wide, &lut)[3];
    assert!(a > 0.0);
    assert_relative_eq!(a, b, epsilon = 1e-5);
}

#[test]
fn flutes_matter_only_with_distortion() {
    let (mut flat_a, lut_a) = setup(1, 0.0, [100.0, 100.0]);
    let (mut flat_b, lut_b) = setup(40, 0.0, [100.0, 100.0]);
    flat_a.grain = 0.0;
    flat_b.grain = 0.0;
    for uv in grid() {
        assert_eq!(shade(uv, &flat_a, &lut_a), shade(uv, &flat_b, &lut_b));
    }

    let (mut fluted, lut_c) = setup(40, 0.5, [100.0, 100.0]);
    fluted.grain = 0.0;
    assert!(grid().any(|uv| shade(uv, &flat_a, &lut_a) != shade(uv, &fluted, &lut_c)));
}
