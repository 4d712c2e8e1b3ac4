// actor.rs - The figure on the rim
//
// Stands on the left canyon edge, aims the stream, and nods now and then
// while idle. The nod is a small explicit state machine with phase-relative
// timing, so zero-length phases cannot reorder anything.

use std::f32::consts::FRAC_PI_2;

use rand::Rng;

use crate::scene::{RIM_Y, SCENE_H, SCENE_W, lerp};
use crate::sim::uniform;
use crate::world::rim_edge;

// Stream leaves from mid-height of a ~20 unit tall figure
const STREAM_RISE: f32 = 10.0;

// Lean while streaming
const LEAN_X: f32 = 2.0;
const LEAN_Y: f32 = 1.0;

// Nod schedule
const FIRST_NOD_DELAY: (f32, f32) = (0.9, 2.2);
const NOD_REST: (f32, f32) = (1.0, 3.0);
const NOD_RISE: (f32, f32) = (0.12, 0.20);
const NOD_HOLD: (f32, f32) = (0.38, 0.75);
const NOD_FALL: (f32, f32) = (0.16, 0.26);
const NOD_AMP: (f32, f32) = (0.55, 1.05);
// No nod right after the stream stops
const ENGAGED_HOLDOFF: f32 = 0.25;

/// Visual pose for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pose {
    /// Vertical head offset. Negative is up.
    pub head_bob: f32,
    pub lean_x: f32,
    pub lean_y: f32,
    pub engaged: bool,
}

/// Where the nod animation currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodPhase {
    Idle,
    Scheduled,
    Rising,
    Holding,
    Falling,
}

#[derive(Debug, Clone, Copy)]
struct NodCycle {
    start: f32,
    rise: f32,
    hold: f32,
    fall: f32,
    amp: f32,
    rest: f32,
}

impl NodCycle {
    fn roll<R: Rng + ?Sized>(start: f32, rng: &mut R) -> Self {
        Self {
            start,
            rise: uniform(rng, NOD_RISE),
            hold: uniform(rng, NOD_HOLD),
            fall: uniform(rng, NOD_FALL),
            amp: uniform(rng, NOD_AMP),
            rest: uniform(rng, NOD_REST),
        }
    }

    fn len(&self) -> f32 {
        self.rise + self.hold + self.fall
    }

    fn end(&self) -> f32 {
        self.start + self.len()
    }

    fn next_at(&self) -> f32 {
        self.end() + self.rest
    }

    fn phase(&self, local: f32) -> NodPhase {
        if local <= self.rise {
            NodPhase::Rising
        } else if local <= self.rise + self.hold {
            NodPhase::Holding
        } else {
            NodPhase::Falling
        }
    }

    /// 0 -> 1 -> 1 -> 0 envelope over the cycle
    fn envelope(&self, local: f32) -> f32 {
        match self.phase(local) {
            NodPhase::Rising => (progress(local, self.rise) * FRAC_PI_2).sin(),
            NodPhase::Holding => 1.0,
            _ => (progress(local - self.rise - self.hold, self.fall) * FRAC_PI_2).cos(),
        }
    }
}

#[inline]
fn progress(elapsed: f32, span: f32) -> f32 {
    if span <= 0.0 { 1.0 } else { (elapsed / span).clamp(0.0, 1.0) }
}

#[derive(Debug, Clone, Copy)]
enum Nod {
    Unscheduled,
    Waiting { at: f32 },
    Nodding(NodCycle),
}

#[derive(Debug, Clone)]
pub struct Actor {
    /// Foot position, resting on the rim line
    pub x: f32,
    pub y: f32,
    /// Smoothed aim point the stream is fired at
    pub aim_x: f32,
    pub aim_y: f32,
    nod: Nod,
    pose: Pose,
}

impl Default for Actor {
    fn default() -> Self {
        Self::anchored()
    }
}

impl Actor {
    /// Actor standing on the left rim edge
    pub fn anchored() -> Self {
        Self {
            x: (rim_edge() - 3.0).clamp(4.0, SCENE_W - 4.0),
            y: RIM_Y - 1.0,
            aim_x: SCENE_W * 0.60,
            aim_y: SCENE_H * 0.55,
            nod: Nod::Unscheduled,
            pose: Pose::default(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::anchored();
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Ease the aim toward the pointer. `k` is the blend factor for this tick.
    pub fn smooth_aim(&mut self, target_x: f32, target_y: f32, k: f32) {
        self.aim_x = lerp(self.aim_x, target_x, k);
        self.aim_y = lerp(self.aim_y, target_y, k);
    }

    /// Where droplets leave from, given the current pose
    pub fn stream_origin(&self) -> (f32, f32) {
        (self.x + self.pose.lean_x, self.y - STREAM_RISE + self.pose.lean_y)
    }

    /// Advance the nod schedule to time `t` and recompute the pose
    pub fn update_pose<R: Rng + ?Sized>(&mut self, t: f32, engaged: bool, rng: &mut R) -> Pose {
        let head_bob = if engaged {
            self.defer_nod(t);
            0.0
        } else {
            self.advance_nod(t, rng)
        };

        self.pose = Pose {
            head_bob,
            lean_x: if engaged { LEAN_X } else { 0.0 },
            lean_y: if engaged { LEAN_Y } else { 0.0 },
            engaged,
        };
        self.pose
    }

    /// Nod phase at time `t`, without advancing anything
    pub fn nod_phase(&self, t: f32) -> NodPhase {
        match self.nod {
            Nod::Unscheduled => NodPhase::Idle,
            Nod::Waiting { .. } => NodPhase::Scheduled,
            Nod::Nodding(c) if t > c.end() => NodPhase::Scheduled,
            Nod::Nodding(c) => c.phase(t - c.start),
        }
    }

    fn defer_nod(&mut self, t: f32) {
        let holdoff = t + ENGAGED_HOLDOFF;
        let at = match self.nod {
            Nod::Unscheduled => holdoff,
            Nod::Waiting { at } => at.max(holdoff),
            Nod::Nodding(c) => c.next_at().max(holdoff),
        };
        self.nod = Nod::Waiting { at };
    }

    fn advance_nod<R: Rng + ?Sized>(&mut self, t: f32, rng: &mut R) -> f32 {
        if let Nod::Unscheduled = self.nod {
            self.nod = Nod::Waiting { at: t + uniform(rng, FIRST_NOD_DELAY) };
        }
        if let Nod::Nodding(c) = self.nod {
            if t > c.end() {
                self.nod = Nod::Waiting { at: c.next_at() };
            }
        }
        if let Nod::Waiting { at } = self.nod {
            if t >= at {
                self.nod = Nod::Nodding(NodCycle::roll(t, rng));
            }
        }

        match self.nod {
            Nod::Nodding(c) => -c.amp * c.envelope(t - c.start),
            _ => 0.0,
        }
    }
}
