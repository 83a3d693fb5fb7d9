use proptest::prelude::*;
use verdant_world::height::GROUND_LEVEL;
use verdant_world::{
    Biome, BiomeClassifier, HeightField, HeightSource, WorldGenParams, find_safe_spawn_point,
};

fn field() -> HeightField {
    HeightField::with_scales(1337, 0.1, 2.0, 3)
}

#[test]
fn default_params_sample_finite_heights() {
    let hf = HeightField::new(&WorldGenParams::default());
    for i in -50..50 {
        let x = i as f32 * 3.7;
        let z = i as f32 * -1.3;
        let h = hf.height(x, z);
        assert!(h.is_finite());
        assert!(h >= GROUND_LEVEL);
    }
}

#[test]
fn trait_object_matches_inherent_sampler() {
    let hf = field();
    let src: &dyn HeightSource = &hf;
    assert_eq!(src.height_at(12.5, -3.25).to_bits(), hf.height(12.5, -3.25).to_bits());
}

#[test]
fn seed_changes_the_terrain() {
    let a = HeightField::with_scales(1, 0.1, 5.0, 3);
    let b = HeightField::with_scales(2, 0.1, 5.0, 3);
    let differs = (0..64).any(|i| {
        let x = i as f32 * 1.7 + 0.3;
        a.height(x, x * 0.5) != b.height(x, x * 0.5)
    });
    assert!(differs);
}

#[test]
fn update_params_reseeds_only_when_needed() {
    let mut hf = field();
    let before = hf.height(4.2, 9.1);
    let mut params = WorldGenParams {
        seed: 1337,
        noise_scale: 0.1,
        height_scale: 2.0,
        octaves: 3,
        ..WorldGenParams::default()
    };
    hf.update_params(&params);
    assert_eq!(hf.height(4.2, 9.1).to_bits(), before.to_bits());

    params.height_scale = 4.0;
    hf.update_params(&params);
    assert_eq!(hf.height_scale(), 4.0);
    params.seed = 99;
    hf.update_params(&params);
    assert_eq!(hf.seed(), 99);
}

#[test]
fn moisture_stays_in_noise_range() {
    let hf = field();
    for i in 0..200 {
        let m = hf.moisture(i as f32 * 2.3 - 100.0, i as f32 * 0.7);
        assert!(m.abs() <= 1.0 + 1e-3, "moisture {m} out of range");
    }
}

#[test]
fn classifier_never_reports_mountain_below_threshold() {
    let hf = field();
    let c = BiomeClassifier::new(hf.height_scale());
    for i in 0..100 {
        let (x, z) = (i as f32 * 0.9, i as f32 * -0.4);
        let h = hf.height(x, z);
        let biome = c.classify(h, hf.moisture(x, z));
        if h <= 0.6 * hf.height_scale() {
            assert_ne!(biome, Biome::Mountain);
        }
    }
}

#[test]
fn spawn_on_level_ground_keeps_preferred_point() {
    let plane = |_x: f32, _z: f32| 3.0_f32;
    let p = find_safe_spawn_point(&plane, 4.0, -2.0);
    assert_eq!((p.x, p.y, p.z), (4.0, 3.0, -2.0));
}

#[test]
fn spawn_moves_off_a_cliff_edge() {
    let cliff = |x: f32, _z: f32| if x < 0.0 { 0.0 } else { 10.0 };
    let p = find_safe_spawn_point(&cliff, 0.1, 0.0);
    assert!((p.x - 2.1).abs() < 1e-5);
    assert_eq!(p.y, 10.0);
    assert!(p.z.abs() < 1e-5);
}

proptest! {
    // Same coordinates, same parameters: bit-identical output
    #[test]
    fn height_is_deterministic(x in -1.0e4f32..1.0e4, z in -1.0e4f32..1.0e4) {
        let a = field();
        let b = field();
        prop_assert_eq!(a.height(x, z).to_bits(), a.height(x, z).to_bits());
        prop_assert_eq!(a.height(x, z).to_bits(), b.height(x, z).to_bits());
        prop_assert_eq!(a.moisture(x, z).to_bits(), b.moisture(x, z).to_bits());
    }

    // Doubling the height scale doubles every octave's contribution exactly
    #[test]
    fn height_scale_is_linear_above_floor(x in -500.0f32..500.0, z in -500.0f32..500.0) {
        let low = HeightField::with_scales(7, 0.05, 2.0, 4);
        let high = HeightField::with_scales(7, 0.05, 4.0, 4);
        let h = low.height(x, z);
        prop_assume!(h >= 0.0);
        prop_assert_eq!(high.height(x, z), h * 2.0);
    }
}
