// input.rs - Latest pointer sample
//
// The host normalizes pointer/touch events into scene coordinates and
// forwards them here. One-shot edges are cleared at the end of every tick.

use crate::scene::{SCENE_H, SCENE_W, clamp_to_scene};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSample {
    pub x: f32,
    pub y: f32,
    /// Stream is latched on
    pub held: bool,
    pub just_pressed: bool,
    pub just_released: bool,
}

impl Default for InputSample {
    fn default() -> Self {
        Self {
            x: SCENE_W / 2.0,
            y: SCENE_H / 2.0,
            held: false,
            just_pressed: false,
            just_released: false,
        }
    }
}

impl InputSample {
    /// Move the pointer, clamped to the scene
    pub fn set_position(&mut self, x: f32, y: f32) {
        let (x, y) = clamp_to_scene(x, y);
        self.x = x;
        self.y = y;
    }

    pub fn clear_edges(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_is_clamped() {
        let mut input = InputSample::default();
        input.set_position(-20.0, 900.0);
        assert_eq!((input.x, input.y), (0.0, SCENE_H));
    }

    #[test]
    fn edges_clear_but_hold_stays() {
        let mut input = InputSample { held: true, just_pressed: true, just_released: true, ..Default::default() };
        input.clear_edges();
        assert!(input.held);
        assert!(!input.just_pressed && !input.just_released);
    }
}
