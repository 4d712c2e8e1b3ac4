// ripple.rs - Floor impact rings
//
// A ring that grows in place at the contact point and fades out.

use rand::Rng;

use super::{fade, uniform};
use crate::scene::Tuning;

#[derive(Debug, Clone, Copy)]
pub struct Ripple {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub age: f32,
    pub ttl: f32,
}

impl Ripple {
    #[inline]
    pub fn fade(&self) -> f32 {
        fade(self.age, self.ttl)
    }
}

#[derive(Debug, Default)]
pub struct Ripples {
    items: Vec<Ripple>,
}

impl Ripples {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ripple> {
        self.items.iter()
    }

    /// Start a ring at the contact point
    pub fn spawn<R: Rng + ?Sized>(&mut self, x: f32, y: f32, tuning: &Tuning, rng: &mut R) {
        self.items.push(Ripple {
            x,
            y,
            radius: tuning.ripple_radius,
            age: 0.0,
            ttl: uniform(rng, tuning.ripple_ttl),
        });
    }

    /// Grow rings, remove finished ones
    pub fn update(&mut self, dt: f32, tuning: &Tuning) {
        let mut write = 0;

        for read in 0..self.items.len() {
            let mut r = self.items[read];
            r.age += dt;
            r.radius += dt * tuning.ripple_growth;
            if r.age > r.ttl { continue; }

            self.items[write] = r;
            write += 1;
        }

        self.items.truncate(write);
    }
}
