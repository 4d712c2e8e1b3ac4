// droplet.rs - The stream
//
// Droplets are launched from the actor toward the aim point, fall under
// gravity with per-axis drag, and die on the canyon walls or floor.

use rand::Rng;

use super::{Ripples, Splashes, drag, fade, uniform};
use crate::scene::{RIM_Y, SCENE_H, SCENE_W, Tuning, lerp};
use crate::world::{floor_y, x_left, x_right};

// Contact tolerance against the walls
const WALL_SLOP: f32 = 1.0;

// Fraction of droplet velocity handed to the debris it throws
const WALL_CARRY: f32 = 0.15;
const FLOOR_CARRY: f32 = 0.1;
const FLOOR_KICK: f32 = -0.2;

#[derive(Debug, Clone, Copy)]
pub struct Droplet {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub r: f32,
    pub age: f32,
    pub ttl: f32,
    /// Wobble phase in [0, 1). Visual only.
    pub seed: f32,
}

impl Droplet {
    #[inline]
    pub fn fade(&self) -> f32 {
        fade(self.age, self.ttl)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vx.hypot(self.vy)
    }
}

/// Collisions resolved during one update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Impacts {
    pub wall: usize,
    pub floor: usize,
    pub expired: usize,
}

#[derive(Debug, Default)]
pub struct Droplets {
    items: Vec<Droplet>,
}

impl Droplets {
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

    pub fn iter(&self) -> impl Iterator<Item = &Droplet> {
        self.items.iter()
    }

    /// Insert a droplet as-is
    pub fn push(&mut self, d: Droplet) {
        self.items.push(d);
    }

    /// Launch velocity from `origin` toward `target`.
    ///
    /// `strength` in [0, 1] picks the speed between the tuned bounds and
    /// tightens the spread. A target on top of the origin fires straight down.
    pub fn launch_velocity<R: Rng + ?Sized>(
        origin: (f32, f32),
        target: (f32, f32),
        strength: f32,
        tuning: &Tuning,
        rng: &mut R,
    ) -> (f32, f32) {
        let strength = strength.clamp(0.0, 1.0);
        let dx = target.0 - origin.0;
        let mut dy = target.1 - origin.1;
        if dx.abs() + dy.abs() < 0.001 {
            dy = 1.0;
        }

        let base = dy.atan2(dx);
        let spread = uniform(rng, (-tuning.spread, tuning.spread)) * (0.40 + (1.0 - strength) * 0.12);
        let a = base + spread;

        let speed = lerp(tuning.speed_min, tuning.speed_max, strength) + uniform(rng, tuning.speed_jitter);
        (a.cos() * speed, a.sin() * speed)
    }

    /// Emit one batch of droplets from `origin` toward `target`
    pub fn emit<R: Rng + ?Sized>(
        &mut self,
        origin: (f32, f32),
        target: (f32, f32),
        strength: f32,
        tuning: &Tuning,
        rng: &mut R,
    ) {
        let jitter = (-tuning.spawn_jitter, tuning.spawn_jitter);

        for _ in 0..tuning.drops_per_emit {
            let (vx, vy) = Self::launch_velocity(origin, target, strength, tuning, rng);
            self.items.push(Droplet {
                x: origin.0 + uniform(rng, jitter),
                y: origin.1 + uniform(rng, jitter),
                vx,
                vy,
                r: uniform(rng, tuning.drop_radius),
                age: 0.0,
                ttl: uniform(rng, tuning.drop_ttl),
                seed: rng.r#gen::<f32>(),
            });
        }
    }

    /// Integrate droplets, resolve terrain hits, cull the dead.
    ///
    /// `t` is the session clock, used only for the wobble phase.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        t: f32,
        tuning: &Tuning,
        splashes: &mut Splashes,
        ripples: &mut Ripples,
        rng: &mut R,
    ) -> Impacts {
        let kx = drag(tuning.drop_drag_x, dt);
        let ky = drag(tuning.drop_drag_y, dt);
        let margin = tuning.bounds_margin;
        let mut impacts = Impacts::default();
        let mut write = 0;

        for read in 0..self.items.len() {
            let mut d = self.items[read];
            d.age += dt;

            // Slight air drift
            let wobble = (t * 6.0 + d.seed * 20.0).sin() * tuning.wobble_amp;
            d.vy += tuning.drop_gravity * dt;
            d.vx += wobble * dt;

            d.vx *= kx;
            d.vy *= ky;

            d.x += d.vx * 60.0 * dt;
            d.y += d.vy * 60.0 * dt;

            // Terrain, skipping the band right under the rim
            if d.y >= RIM_Y + tuning.rim_margin {
                if d.x <= x_left(d.y) + WALL_SLOP || d.x >= x_right(d.y) - WALL_SLOP {
                    splashes.burst(
                        d.x,
                        d.y,
                        d.vx * WALL_CARRY,
                        d.vy * WALL_CARRY,
                        tuning.wall_intensity,
                        tuning,
                        rng,
                    );
                    impacts.wall += 1;
                    continue;
                }

                let fy = floor_y(d.x);
                if d.y >= fy {
                    splashes.burst(d.x, fy, d.vx * FLOOR_CARRY, FLOOR_KICK, tuning.floor_intensity, tuning, rng);
                    ripples.spawn(d.x, fy, tuning, rng);
                    impacts.floor += 1;
                    continue;
                }
            }

            let lost = d.y > SCENE_H + margin
                || d.y < -margin
                || d.x < -margin
                || d.x > SCENE_W + margin;
            if d.age > d.ttl || lost {
                impacts.expired += 1;
                continue;
            }

            self.items[write] = d;
            write += 1;
        }

        self.items.truncate(write);
        impacts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn still(x: f32, y: f32) -> Droplet {
        Droplet { x, y, vx: 0.0, vy: 0.0, r: 0.7, age: 0.0, ttl: 2.0, seed: 0.0 }
    }

    #[test]
    fn full_strength_straight_down() {
        let tuning = Tuning::default();
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..200 {
            let (vx, vy) = Droplets::launch_velocity((100.0, 50.0), (100.0, 300.0), 1.0, &tuning, &mut rng);
            let angle = vy.atan2(vx);
            let speed = vx.hypot(vy);
            assert!((angle - std::f32::consts::FRAC_PI_2).abs() <= 0.02 * 0.40 + 1e-5);
            assert!(speed >= 2.85 - 0.03 - 1e-4 && speed <= 2.85 + 0.08 + 1e-4);
        }
    }

    #[test]
    fn degenerate_aim_fires_down() {
        let tuning = Tuning::default();
        let mut rng = SmallRng::seed_from_u64(12);
        let (vx, vy) = Droplets::launch_velocity((80.0, 40.0), (80.0, 40.0), 0.5, &tuning, &mut rng);
        assert!(vy > 0.0);
        assert!(vx.abs() < vy * 0.05);
    }

    #[test]
    fn emit_spawns_a_batch_near_origin() {
        let tuning = Tuning::default();
        let mut rng = SmallRng::seed_from_u64(13);
        let mut drops = Droplets::new();
        drops.emit((30.0, 53.0), (150.0, 200.0), 0.8, &tuning, &mut rng);

        assert_eq!(drops.len(), 2);
        for d in drops.iter() {
            assert!((d.x - 30.0).abs() <= 0.25 && (d.y - 53.0).abs() <= 0.25);
            assert!((0.5..=0.95).contains(&d.r));
            assert!((1.3..=2.2).contains(&d.ttl));
            assert!(d.vx > 0.0 && d.vy > 0.0);
        }
    }

    #[test]
    fn wall_hit_splashes_without_ripple() {
        let tuning = Tuning::default();
        let mut rng = SmallRng::seed_from_u64(14);
        let (mut drops, mut splashes, mut ripples) = (Droplets::new(), Splashes::new(), Ripples::new());

        let y = 200.0;
        drops.push(still(x_left(y) + 0.5, y));
        let hits = drops.update(1.0 / 60.0, 0.0, &tuning, &mut splashes, &mut ripples, &mut rng);

        assert_eq!(hits.wall, 1);
        assert!(drops.is_empty());
        assert!(ripples.is_empty());
        assert_eq!(splashes.len(), Splashes::batch_size(0.35, &tuning));
    }

    #[test]
    fn floor_hit_leaves_one_ripple() {
        let tuning = Tuning::default();
        let mut rng = SmallRng::seed_from_u64(15);
        let (mut drops, mut splashes, mut ripples) = (Droplets::new(), Splashes::new(), Ripples::new());

        let x = 120.0;
        let mut d = still(x, floor_y(x) - 0.1);
        d.vy = 1.0;
        drops.push(d);
        let hits = drops.update(1.0 / 60.0, 0.0, &tuning, &mut splashes, &mut ripples, &mut rng);

        assert_eq!(hits.floor, 1);
        assert!(drops.is_empty());
        assert_eq!(ripples.len(), 1);
        assert_eq!(splashes.len(), Splashes::batch_size(0.25, &tuning));
        let r = ripples.iter().next().unwrap();
        assert!((r.y - floor_y(r.x)).abs() < 1e-4);
    }

    #[test]
    fn no_collisions_just_below_rim() {
        let tuning = Tuning::default();
        let mut rng = SmallRng::seed_from_u64(16);
        let (mut drops, mut splashes, mut ripples) = (Droplets::new(), Splashes::new(), Ripples::new());

        // Inside the left wall, but within the rim margin
        drops.push(still(5.0, RIM_Y + 2.0));
        drops.update(1.0 / 60.0, 0.0, &tuning, &mut splashes, &mut ripples, &mut rng);
        assert_eq!(drops.len(), 1);
        assert!(splashes.is_empty());
    }

    #[test]
    fn expires_on_the_tick_age_passes_ttl() {
        let tuning = Tuning::default();
        let mut rng = SmallRng::seed_from_u64(17);
        let (mut drops, mut splashes, mut ripples) = (Droplets::new(), Splashes::new(), Ripples::new());

        // Above the rim, so no terrain in the way
        let mut d = still(120.0, 20.0);
        d.ttl = 0.05;
        d.vy = -0.1;
        drops.push(d);

        let dt = 0.02;
        drops.update(dt, 0.0, &tuning, &mut splashes, &mut ripples, &mut rng);
        drops.update(dt, dt, &tuning, &mut splashes, &mut ripples, &mut rng);
        assert_eq!(drops.len(), 1);
        let hits = drops.update(dt, 2.0 * dt, &tuning, &mut splashes, &mut ripples, &mut rng);
        assert_eq!(hits.expired, 1);
        assert!(drops.is_empty());
    }

    #[test]
    fn strays_outside_bounds_are_culled() {
        let tuning = Tuning::default();
        let mut rng = SmallRng::seed_from_u64(18);
        let (mut drops, mut splashes, mut ripples) = (Droplets::new(), Splashes::new(), Ripples::new());

        drops.push(still(-40.0, 30.0));
        drops.push(still(SCENE_W + 40.0, 30.0));
        drops.push(still(120.0, -40.0));
        let hits = drops.update(1.0 / 60.0, 0.0, &tuning, &mut splashes, &mut ripples, &mut rng);
        assert_eq!(hits.expired, 3);
        assert!(drops.is_empty());
    }
}
