pub mod vec2;
pub mod vec3;

use self::{vec2::Vec2, vec3::Vec3};

/// Builds a [`Vec2`] from raw components.
pub const fn vec2(x: f64, y: f64) -> Vec2 {
    Vec2::new(x, y)
}

/// Builds a [`Vec3`] from raw components.
pub const fn vec3(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x, y, z)
}

impl From<Vec2> for Vec3 {
    fn from(value: Vec2) -> Self {
        value.to_v3()
    }
}

impl From<Vec3> for Vec2 {
    fn from(value: Vec3) -> Self {
        value.to_v2()
    }
}
