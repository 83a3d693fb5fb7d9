use proptest::prelude::*;
use verdant_geom::{Aabb, Vec2, Vec3};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec2_distance_is_euclidean() {
    let a = Vec2::new(1.0, 2.0);
    let b = Vec2::new(4.0, 6.0);
    assert!(approx_eq(a.distance(b), 5.0, 1e-6));
    assert!(approx_eq(b.distance(a), 5.0, 1e-6));
    assert!(approx_eq(a.distance(a), 0.0, 1e-6));
}

#[test]
fn vec2_lifts_into_world_space() {
    let p = Vec2::new(3.0, -7.0).with_height(2.5);
    assert!(vec3_approx_eq(p, Vec3::new(3.0, 2.5, -7.0), 1e-6));
    assert_eq!(p.xz(), Vec2::new(3.0, -7.0));
}

#[test]
fn vec3_cross_of_grid_edges_points_up() {
    // Winding used by the terrain mesher: (tl, bl, tr) on a flat grid.
    let tl = Vec3::new(0.0, 0.0, 0.0);
    let bl = Vec3::new(0.0, 0.0, 1.0);
    let tr = Vec3::new(1.0, 0.0, 0.0);
    let n = (bl - tl).cross(tr - tl);
    assert!(vec3_approx_eq(n.normalized(), Vec3::UP, 1e-6));
}

#[test]
fn vec3_lerp_endpoints_and_midpoint() {
    let grey = Vec3::splat(0.5);
    let white = Vec3::ONE;
    assert!(vec3_approx_eq(grey.lerp(white, 0.0), grey, 1e-6));
    assert!(vec3_approx_eq(grey.lerp(white, 1.0), white, 1e-6));
    assert!(vec3_approx_eq(grey.lerp(white, 0.5), Vec3::splat(0.75), 1e-6));
}

#[test]
fn vec3_zero_normalization_is_noop() {
    let zn = Vec3::ZERO.normalized();
    assert!(vec3_approx_eq(zn, Vec3::ZERO, 1e-6));
    assert!(!zn.x.is_nan());
}

#[test]
fn aabb_from_points_encloses_all() {
    let pts = [
        Vec3::new(1.0, -2.0, 3.0),
        Vec3::new(-4.0, 5.0, 0.5),
        Vec3::new(0.0, 0.0, -6.0),
    ];
    let bb = Aabb::from_points(pts).unwrap();
    assert!(vec3_approx_eq(bb.min, Vec3::new(-4.0, -2.0, -6.0), 1e-6));
    assert!(vec3_approx_eq(bb.max, Vec3::new(1.0, 5.0, 3.0), 1e-6));
    for p in pts {
        assert!(bb.contains(p));
    }
    assert!(Aabb::from_points(std::iter::empty()).is_none());
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    -1.0e4f32..1.0e4
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // Distance is symmetric and never negative
    #[test]
    fn vec3_distance_symmetric(a in arb_vec3(), b in arb_vec3()) {
        let d1 = a.distance(b);
        let d2 = b.distance(a);
        prop_assert!(d1 >= 0.0);
        prop_assert!(approx_eq(d1, d2, 1e-3));
    }

    // Every point fed to from_points is contained in the result
    #[test]
    fn aabb_contains_inputs(pts in prop::collection::vec(arb_vec3(), 1..16)) {
        let bb = Aabb::from_points(pts.iter().copied()).unwrap();
        for p in &pts {
            prop_assert!(bb.contains(*p));
        }
        prop_assert!(bb.contains(bb.center()));
    }
}
