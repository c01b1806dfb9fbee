//! Scene composition: nearest-surface union over a primitive list.
//!
//! The list itself is owned by the caller. Order only affects which index
//! `nearest` reports on exact ties; the distance is order independent.

use crate::coords::Vec2;

use super::Primitive;

/// Union of all primitive fields at `p`, seeded with `max_distance`.
///
/// An empty scene (or one holding only empty primitives) reports
/// `max_distance` everywhere.
pub fn scene_distance(p: Vec2, max_distance: f32, primitives: &[Primitive]) -> f32 {
    primitives
        .iter()
        .filter_map(|prim| prim.distance(p))
        .fold(max_distance, f32::min)
}

/// [`scene_distance`] with the primitive at index `skip` left out of the union.
///
/// Used to test what lies between a surface and the light without the
/// surface shadowing itself.
pub fn scene_distance_except(p: Vec2, max_distance: f32, primitives: &[Primitive], skip: usize) -> f32 {
    primitives
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != skip)
        .filter_map(|(_, prim)| prim.distance(p))
        .fold(max_distance, f32::min)
}

/// Index and distance of the primitive nearest to `p`.
///
/// Returns `None` when nothing in the scene comes closer than `max_distance`.
/// The first primitive wins on exact ties.
pub fn nearest(p: Vec2, max_distance: f32, primitives: &[Primitive]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    let mut best_d = max_distance;

    for (i, prim) in primitives.iter().enumerate() {
        let Some(d) = prim.distance(p) else { continue };
        if d < best_d {
            best_d = d;
            best = Some((i, d));
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    fn demo_scene() -> Vec<Primitive> {
        vec![
            Primitive::circle(v(500.0, 450.0), 38.0).with_color(Color::RED),
            Primitive::circle(v(300.0, 200.0), 50.0).with_color(Color::PURPLE),
            Primitive::rect(v(400.0, 200.0), v(50.0, 60.0)).with_round_corner(10.0),
            Primitive::triangle(v(100.0, 400.0), v(220.0, 330.0), v(180.0, 500.0))
                .with_round_corner(5.0),
        ]
    }

    #[test]
    fn empty_scene_reports_max_distance() {
        assert_eq!(scene_distance(v(12.0, 34.0), 1000.0, &[]), 1000.0);
        assert_eq!(nearest(v(12.0, 34.0), 1000.0, &[]), None);
    }

    #[test]
    fn none_primitives_are_ignored() {
        let scene = [Primitive::none(), Primitive::none()];
        assert_eq!(scene_distance(v(0.0, 0.0), 250.0, &scene), 250.0);
    }

    #[test]
    fn union_is_the_minimum_over_primitives() {
        let scene = demo_scene();
        let p = v(640.0, 40.0);
        let expected = scene
            .iter()
            .filter_map(|prim| prim.distance(p))
            .fold(f32::INFINITY, f32::min);
        assert_eq!(scene_distance(p, 10_000.0, &scene), expected);
    }

    #[test]
    fn adding_a_primitive_never_increases_distance() {
        let mut scene = demo_scene();
        let points = [v(0.0, 0.0), v(300.0, 300.0), v(700.0, 500.0), v(150.0, 420.0)];
        let before: Vec<f32> = points.iter().map(|&p| scene_distance(p, 1000.0, &scene)).collect();

        scene.push(Primitive::line(v(0.0, 600.0), v(800.0, 0.0), 2.0));

        for (p, b) in points.iter().zip(before) {
            assert!(scene_distance(*p, 1000.0, &scene) <= b);
        }
    }

    #[test]
    fn union_ignores_insertion_order() {
        let scene = demo_scene();
        let mut reversed = scene.clone();
        reversed.reverse();
        for p in [v(10.0, 10.0), v(420.0, 210.0), v(500.0, 450.0)] {
            assert_eq!(scene_distance(p, 1000.0, &scene), scene_distance(p, 1000.0, &reversed));
        }
    }

    #[test]
    fn excluded_primitive_drops_out_of_the_union() {
        let scene = demo_scene();
        let p = v(300.0, 200.0);
        assert_eq!(scene_distance_except(p, 1000.0, &scene, 1), {
            let rest: Vec<Primitive> = scene
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != 1)
                .map(|(_, prim)| *prim)
                .collect();
            scene_distance(p, 1000.0, &rest)
        });
        assert_eq!(scene_distance_except(p, 1000.0, &scene, 99), scene_distance(p, 1000.0, &scene));
    }

    #[test]
    fn nearest_picks_the_containing_shape() {
        let scene = demo_scene();
        let (idx, d) = nearest(v(300.0, 200.0), 1000.0, &scene).expect("inside a circle");
        assert_eq!(idx, 1);
        assert_eq!(d, -50.0);
    }
}
