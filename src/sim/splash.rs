// splash.rs - Impact debris
//
// Short-lived specks thrown off when a droplet hits the canyon.
// Purely decorative: no collision, they just fall and fade.

use rand::Rng;

use super::{drag, fade, uniform};
use crate::scene::{Tuning, lerp};

/// Visual weight of a speck. Only the renderer cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Solid,
    Faint,
}

#[derive(Debug, Clone, Copy)]
pub struct SplashParticle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub age: f32,
    pub ttl: f32,
    pub weight: Weight,
    pub size: f32,
}

impl SplashParticle {
    #[inline]
    pub fn fade(&self) -> f32 {
        fade(self.age, self.ttl)
    }
}

#[derive(Debug, Default)]
pub struct Splashes {
    items: Vec<SplashParticle>,
}

impl Splashes {
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

    pub fn iter(&self) -> impl Iterator<Item = &SplashParticle> {
        self.items.iter()
    }

    /// Number of specks a burst of the given intensity throws
    pub fn batch_size(intensity: f32, tuning: &Tuning) -> usize {
        let (lo, hi) = tuning.splash_batch;
        lerp(lo, hi, intensity.clamp(0.0, 1.0)).round() as usize
    }

    /// Throw a batch of specks from (x, y), biased along (dir_x, dir_y).
    /// Returns how many were spawned.
    pub fn burst<R: Rng + ?Sized>(
        &mut self,
        x: f32,
        y: f32,
        dir_x: f32,
        dir_y: f32,
        intensity: f32,
        tuning: &Tuning,
        rng: &mut R,
    ) -> usize {
        let n = Self::batch_size(intensity, tuning);
        self.items.reserve(n);

        for i in 0..n {
            let a = uniform(rng, (-std::f32::consts::PI, std::f32::consts::PI));
            let s = uniform(rng, (0.25, 1.1)) + intensity * 0.9;
            let vx = a.cos() * s + dir_x * uniform(rng, (0.3, 1.2));
            let vy = a.sin() * s + dir_y * uniform(rng, (0.3, 1.2));

            self.items.push(SplashParticle {
                x,
                y,
                vx,
                vy,
                age: 0.0,
                ttl: uniform(rng, tuning.splash_ttl),
                weight: if i % 4 == 0 { Weight::Faint } else { Weight::Solid },
                size: uniform(rng, tuning.splash_size),
            });
        }

        n
    }

    /// Fall, drag, drift; drop anything past its lifetime
    pub fn update(&mut self, dt: f32, tuning: &Tuning) {
        let k = drag(tuning.splash_drag, dt);
        let mut write = 0;

        for read in 0..self.items.len() {
            let mut p = self.items[read];
            p.age += dt;
            p.vy += tuning.splash_gravity * dt;
            p.vx *= k;
            p.vy *= k;
            p.x += p.vx * 60.0 * dt;
            p.y += p.vy * 60.0 * dt;

            if p.age > p.ttl { continue; }

            self.items[write] = p;
            write += 1;
        }

        self.items.truncate(write);
    }
}
