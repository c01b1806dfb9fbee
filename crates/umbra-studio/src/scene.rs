//! The demo scene and its light.

use umbra_engine::coords::Vec2;
use umbra_engine::paint::Color;
use umbra_engine::sdf::{Primitive, Shape};

/// Degrees per second for the spinning box.
const SPIN_RATE: f32 = 20.0;

/// Cursor light parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightSettings {
    pub color: Color,
    pub max_distance: f32,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            color: Color::new(0.8, 0.8, 0.2, 0.8),
            max_distance: 800.0,
        }
    }
}

/// Scene list owned by the studio; the engine only ever borrows it.
pub struct DemoScene {
    primitives: Vec<Primitive>,
    spinner: usize,
}

impl DemoScene {
    pub fn new() -> Self {
        let v = Vec2::new;
        let primitives = vec![
            Primitive::circle(v(500.0, 450.0), 38.0).with_color(Color::RED),
            Primitive::circle(v(300.0, 200.0), 50.0).with_color(Color::PURPLE),
            Primitive::rect(v(400.0, 200.0), v(50.0, 60.0))
                .with_color(Color::GREEN.with_alpha(0.8))
                .with_round_corner(10.0),
            Primitive::triangle(v(100.0, 400.0), v(220.0, 330.0), v(180.0, 500.0))
                .with_color(Color::GRAY)
                .with_round_corner(5.0),
            Primitive::rotated_rect(v(640.0, 150.0), v(45.0, 18.0), 0.0)
                .with_color(Color::ORANGE)
                .with_round_corner(4.0),
            Primitive::line(v(60.0, 560.0), v(340.0, 520.0), 3.0).with_color(Color::CYAN),
            Primitive::circle(v(660.0, 420.0), 30.0)
                .with_color(Color::hsv(0.6, 0.5, 1.0))
                .as_outline(4.0),
        ];

        Self {
            primitives,
            spinner: 4,
        }
    }

    /// Advances the animation to `elapsed` seconds.
    pub fn update(&mut self, elapsed: f32) {
        if let Some(Primitive {
            shape: Shape::RotatedRect { rotation_deg, .. },
            ..
        }) = self.primitives.get_mut(self.spinner)
        {
            *rotation_deg = (elapsed * SPIN_RATE) % 360.0;
        }
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }
}
