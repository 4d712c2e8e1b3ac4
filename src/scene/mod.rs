// scene/ - Fixed scene dimensions and tuning constants
//
// The canyon is drawn in logical units at a low internal resolution.
// Everything the simulation tunes lives in `Tuning`.

mod tuning;

pub use tuning::Tuning;

/// Logical scene width.
pub const SCENE_W: f32 = 240.0;
/// Logical scene height. Taller than wide for a deeper canyon.
pub const SCENE_H: f32 = 360.0;
/// Vertical coordinate of the canyon rim.
pub const RIM_Y: f32 = 64.0;

/// Clamp a point into the scene rectangle.
#[inline]
pub fn clamp_to_scene(x: f32, y: f32) -> (f32, f32) {
    (x.clamp(0.0, SCENE_W), y.clamp(0.0, SCENE_H))
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
