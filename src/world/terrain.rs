// terrain.rs - Canyon walls and floor
//
// All coordinates are in scene space (SCENE_W x SCENE_H).
// Inputs outside the scene are fine and extrapolate.

use crate::scene::{RIM_Y, SCENE_H, SCENE_W, lerp};

/// Normalized depth below the rim: 0 at the rim, 1 at the bottom of the scene.
#[inline]
fn depth(y: f32) -> f32 {
    ((y - RIM_Y) / (SCENE_H - RIM_Y)).clamp(0.0, 1.0)
}

/// Horizontal position of the left wall at height `y`
#[inline]
pub fn x_left(y: f32) -> f32 {
    let t = depth(y);
    let inset = lerp(18.0, 44.0, t);
    let wiggle = (y * 0.055).sin() * lerp(1.5, 4.5, t);
    inset + wiggle
}

/// Horizontal position of the right wall at height `y`
#[inline]
pub fn x_right(y: f32) -> f32 {
    let t = depth(y);
    let inset = lerp(16.0, 52.0, t);
    let wiggle = (y * 0.048 + 1.7).sin() * lerp(1.5, 4.0, t);
    SCENE_W - (inset + wiggle)
}

/// Floor height at horizontal position `x` (one sine period across the scene)
#[inline]
pub fn floor_y(x: f32) -> f32 {
    let t = (x / SCENE_W).clamp(0.0, 1.0);
    let base = SCENE_H - 14.0;
    base + (t * std::f32::consts::TAU).sin() * 2.0
}

/// Left wall position at the rim, where the actor stands
#[inline]
pub fn rim_edge() -> f32 {
    x_left(RIM_Y)
}

/// Check if a point lies strictly between the walls and above the floor
#[inline]
pub fn inside_canyon(x: f32, y: f32) -> bool {
    y >= RIM_Y && x > x_left(y) && x < x_right(y) && y < floor_y(x)
}
