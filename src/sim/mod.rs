// sim/ - Particle collections
//
// Each collection is a plain Vec of Copy records. Updates compact in place
// (read index / write index), so removal needs no stable identity.

mod droplet;
mod ripple;
mod splash;

pub use droplet::{Droplet, Droplets, Impacts};
pub use ripple::{Ripple, Ripples};
pub use splash::{SplashParticle, Splashes, Weight};

use rand::Rng;

/// Uniform sample from `(lo, hi)`. A degenerate range returns `lo`.
#[inline(always)]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f32, f32)) -> f32 {
    lo + rng.r#gen::<f32>() * (hi - lo)
}

/// Drag coefficient scaled to the tick length (tuned per 1/60 s).
#[inline(always)]
pub fn drag(coefficient: f32, dt: f32) -> f32 {
    coefficient.powf(dt * 60.0)
}

/// Remaining opacity of something `age` seconds into a `ttl` lifetime.
#[inline(always)]
pub fn fade(age: f32, ttl: f32) -> f32 {
    if ttl <= 0.0 {
        return 0.0;
    }
    (1.0 - age / ttl).clamp(0.0, 1.0)
}
