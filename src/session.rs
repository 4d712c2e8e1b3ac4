// session.rs - Scene lifecycle
//
//   Start --press--> StartFading --0.4s--> Zen --empty--> DoneWait
//     ^                  ^                                   |
//     |               press               drops gone + 1.0s  v
//   StartIn <------------------- outro finished ---------- Done
//
// State lives in two scopes: `Run` is rebuilt on every reset, `Ambient`
// spans the whole session and is never reset.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::actor::{Actor, Pose};
use crate::input::InputSample;
use crate::scene::Tuning;
use crate::sim::{Droplets, Ripples, Splashes, uniform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Title overlay fully visible, waiting for a press
    Start,
    /// Overlay fading back in after an outro
    StartIn,
    /// Overlay fading out; the stream may already run
    StartFading,
    /// Active session
    Zen,
    /// Resource spent; waiting for the last droplets to land
    DoneWait,
    /// Outro line playing
    Done,
}

impl Phase {
    /// Emission and drain are allowed in this phase
    pub fn allows_streaming(self) -> bool {
        matches!(self, Phase::StartFading | Phase::Zen)
    }

    /// The title overlay is on screen
    pub fn shows_overlay(self) -> bool {
        matches!(self, Phase::Start | Phase::StartIn | Phase::StartFading)
    }

    /// Stable numeric code for the frame buffer
    pub fn code(self) -> u8 {
        match self {
            Phase::Start => 0,
            Phase::StartIn => 1,
            Phase::StartFading => 2,
            Phase::Zen => 3,
            Phase::DoneWait => 4,
            Phase::Done => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::StartIn => "start_in",
            Phase::StartFading => "start_fading",
            Phase::Zen => "zen",
            Phase::DoneWait => "done_wait",
            Phase::Done => "done",
        }
    }
}

/// Session-wide state that survives run resets
#[derive(Debug, Clone, Copy, Default)]
pub struct Ambient {
    /// Keeps background motion continuous between runs
    pub background_time: f32,
}

/// Per-run state, rebuilt by every reset
#[derive(Debug, Clone)]
pub struct Run {
    /// Run clock
    pub t: f32,
    /// Last tick length
    pub dt: f32,
    /// Remaining resource in [0, 1]
    pub resource: f32,
    /// Seconds of streaming this run allows
    pub budget: f32,
    pub cooldown: f32,
    pub has_fired: bool,
    /// Title overlay opacity in [0, 1]
    pub overlay: f32,
    /// Counts down once the last droplet is gone
    pub done_delay: Option<f32>,
    pub outro_clock: f32,
}

impl Run {
    fn fresh(tuning: &Tuning, rng: &mut SmallRng) -> Self {
        Self {
            t: 0.0,
            dt: 0.0,
            resource: 1.0,
            budget: uniform(rng, tuning.budget),
            cooldown: 0.0,
            has_fired: false,
            overlay: 1.0,
            done_delay: None,
            outro_clock: 0.0,
        }
    }
}

pub struct Session {
    phase: Phase,
    pub ambient: Ambient,
    pub run: Run,
    pub actor: Actor,
    pub drops: Droplets,
    pub splashes: Splashes,
    pub ripples: Ripples,
    pub input: InputSample,
    tuning: Tuning,
    rng: SmallRng,
}

impl Session {
    pub fn new(tuning: Tuning, mut rng: SmallRng) -> Self {
        let run = Run::fresh(&tuning, &mut rng);
        Self {
            phase: Phase::Start,
            ambient: Ambient::default(),
            run,
            actor: Actor::anchored(),
            drops: Droplets::new(),
            splashes: Splashes::new(),
            ripples: Ripples::new(),
            input: InputSample::default(),
            tuning,
            rng,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        Self::new(tuning, SmallRng::seed_from_u64(seed))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn pose(&self) -> Pose {
        self.actor.pose()
    }

    /// Emission strength derived from what is left
    pub fn strength(&self) -> f32 {
        if self.tuning.unlimited { 1.0 } else { self.run.resource.clamp(0.0, 1.0) }
    }

    // -- Input collaborator hooks ------------------------------------------

    /// Pointer went down at (x, y)
    pub fn press(&mut self, x: f32, y: f32) {
        self.input.set_position(x, y);
        self.input.just_pressed = true;

        match self.phase {
            // Let the outro finish; no relatch once the resource is spent
            Phase::Done | Phase::DoneWait => {}
            // One gesture both dismisses the overlay and starts the stream
            Phase::Start | Phase::StartIn => {
                self.set_phase(Phase::StartFading);
                self.input.held = true;
            }
            Phase::StartFading | Phase::Zen => self.input.held = true,
        }
    }

    pub fn move_pointer(&mut self, x: f32, y: f32) {
        self.input.set_position(x, y);
    }

    /// Pointer came up at (x, y)
    pub fn release(&mut self, x: f32, y: f32) {
        self.input.set_position(x, y);
        self.input.just_released = true;
        if self.tuning.release_stops_stream {
            self.input.held = false;
        }
    }

    /// Manual reset: fresh run, back to the title
    pub fn manual_reset(&mut self) {
        self.reset_run();
        self.input.held = false;
        self.set_phase(Phase::Start);
    }

    // -- Per-tick ----------------------------------------------------------

    /// Accumulate run and background clocks
    pub fn advance_clocks(&mut self, dt: f32) {
        self.run.t += dt;
        self.run.dt = dt;
        self.ambient.background_time += dt;
    }

    /// Run the state machine and every particle system for one tick
    pub fn step(&mut self, dt: f32) {
        let k = 1.0 - self.tuning.aim_smoothing.powf(dt);
        self.actor.smooth_aim(self.input.x, self.input.y, k);
        self.run.cooldown = (self.run.cooldown - dt).max(0.0);

        match self.phase {
            Phase::StartFading => {
                self.run.overlay = (self.run.overlay - dt / self.tuning.fade_out_secs).max(0.0);
                if self.run.overlay <= 0.0 {
                    self.set_phase(Phase::Zen);
                }
            }
            Phase::StartIn => {
                self.run.overlay = (self.run.overlay + dt / self.tuning.fade_in_secs).min(1.0);
                if self.run.overlay >= 1.0 {
                    self.set_phase(Phase::Start);
                }
            }
            _ => {}
        }

        self.actor.update_pose(self.run.t, self.input.held, &mut self.rng);

        // The title screen holds still
        if self.phase == Phase::Start {
            return;
        }

        let streaming = self.phase.allows_streaming() && self.input.held;

        if streaming && !self.tuning.unlimited {
            self.run.resource = (self.run.resource - dt / self.run.budget).clamp(0.0, 1.0);
            if self.run.resource <= 0.0 {
                self.input.held = false;
                log::debug!("resource spent after {:.2}s", self.run.t);
                self.set_phase(Phase::DoneWait);
            }
        }

        match self.phase {
            Phase::DoneWait if self.drops.is_empty() => {
                let left = self.run.done_delay.get_or_insert(self.tuning.done_delay);
                *left = (*left - dt).max(0.0);
                if *left <= 0.0 {
                    self.run.outro_clock = 0.0;
                    self.set_phase(Phase::Done);
                }
            }
            Phase::Done => {
                self.run.outro_clock += dt;
                if self.run.outro_clock >= self.tuning.outro_total() {
                    self.reset_run();
                    self.run.overlay = 0.0;
                    self.input.held = false;
                    self.set_phase(Phase::StartIn);
                    return;
                }
            }
            _ => {}
        }

        let can_emit = self.tuning.unlimited || self.run.resource > self.tuning.emit_threshold;
        if self.phase.allows_streaming() && self.input.held && self.run.cooldown <= 0.0 && can_emit {
            self.emit();
        }

        self.drops.update(dt, self.run.t, &self.tuning, &mut self.splashes, &mut self.ripples, &mut self.rng);
        self.splashes.update(dt, &self.tuning);
        self.ripples.update(dt, &self.tuning);
    }

    fn emit(&mut self) {
        if !self.run.has_fired {
            log::debug!("first emission at {:.2}s", self.run.t);
            self.run.has_fired = true;
        }

        let origin = self.actor.stream_origin();
        let target = (self.actor.aim_x, self.actor.aim_y);
        let strength = self.strength();
        self.drops.emit(origin, target, strength, &self.tuning, &mut self.rng);
        self.run.cooldown = self.tuning.emit_cooldown;
    }

    /// Clear everything run-scoped. Background time is left alone.
    fn reset_run(&mut self) {
        self.drops.clear();
        self.splashes.clear();
        self.ripples.clear();
        self.run = Run::fresh(&self.tuning, &mut self.rng);
        self.actor.reset();
        log::debug!("run reset, budget {:.2}s", self.run.budget);
    }

    fn set_phase(&mut self, next: Phase) {
        if next != self.phase {
            log::info!("{} -> {} at {:.2}s", self.phase.name(), next.name(), self.run.t);
        }
        self.phase = next;
    }

    // -- Outro line --------------------------------------------------------

    /// Opacity of the outro line (0 outside `Done`)
    pub fn outro_alpha(&self) -> f32 {
        if self.phase != Phase::Done {
            return 0.0;
        }
        let tn = &self.tuning;
        let tt = self.run.outro_clock.clamp(0.0, tn.outro_total());

        if tt < tn.outro_in {
            smoothstep(tt / tn.outro_in)
        } else if tt < tn.outro_in + tn.outro_hold {
            1.0
        } else {
            1.0 - smoothstep((tt - tn.outro_in - tn.outro_hold) / tn.outro_out)
        }
    }

    /// Upward drift of the outro line across its whole life, 0 -> 1
    pub fn outro_drift(&self) -> f32 {
        if self.phase != Phase::Done {
            return 0.0;
        }
        let tn = &self.tuning;
        let tt = self.run.outro_clock.clamp(0.0, tn.outro_total());

        if tt < tn.outro_in {
            (tt / tn.outro_in).clamp(0.0, 1.0) * 0.35
        } else if tt < tn.outro_in + tn.outro_hold {
            0.35 + ((tt - tn.outro_in) / tn.outro_hold).clamp(0.0, 1.0) * 0.45
        } else {
            0.80 + ((tt - tn.outro_in - tn.outro_hold) / tn.outro_out).clamp(0.0, 1.0) * 0.20
        }
    }
}

#[inline]
fn smoothstep(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    p * p * (3.0 - 2.0 * p)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn tick(s: &mut Session, dt: f32) {
        s.advance_clocks(dt);
        s.step(dt);
        s.input.clear_edges();
    }

    #[test]
    fn boots_on_title() {
        let s = Session::with_seed(1);
        assert_eq!(s.phase(), Phase::Start);
        assert_eq!(s.run.resource, 1.0);
        assert_eq!(s.run.overlay, 1.0);
        assert!((8.8..=11.6).contains(&s.run.budget));
        assert!(s.drops.is_empty());
    }

    #[test]
    fn press_on_title_starts_fade_and_stream() {
        let mut s = Session::with_seed(2);
        s.press(120.0, 300.0);
        assert_eq!(s.phase(), Phase::StartFading);
        assert!(s.input.held);
        assert!(s.input.just_pressed);

        tick(&mut s, DT);
        assert!(!s.drops.is_empty(), "stream starts while the overlay fades");
        assert!(s.run.has_fired);
        assert!(!s.input.just_pressed);
    }

    #[test]
    fn title_stays_frozen() {
        let mut s = Session::with_seed(3);
        for _ in 0..60 {
            tick(&mut s, DT);
        }
        assert_eq!(s.phase(), Phase::Start);
        assert_eq!(s.run.resource, 1.0);
        assert!(s.drops.is_empty());
        assert!((s.ambient.background_time - 1.0).abs() < 1e-3);
    }

    #[test]
    fn below_threshold_emits_nothing() {
        let mut s = Session::with_seed(4);
        s.press(120.0, 300.0);
        for _ in 0..30 {
            tick(&mut s, DT);
        }
        assert_eq!(s.phase(), Phase::Zen);

        s.drops.clear();
        s.run.resource = 0.04;
        s.run.cooldown = 0.0;
        tick(&mut s, DT);
        assert!(s.drops.is_empty());
        assert!(s.run.resource < 0.04, "drain continues below the threshold");
        assert_eq!(s.phase(), Phase::Zen);
    }

    #[test]
    fn depletion_unlatches_and_waits() {
        let mut s = Session::with_seed(5);
        s.press(120.0, 300.0);
        for _ in 0..30 {
            tick(&mut s, DT);
        }
        s.run.resource = 0.0001;
        tick(&mut s, DT);
        assert_eq!(s.phase(), Phase::DoneWait);
        assert_eq!(s.run.resource, 0.0);
        assert!(!s.input.held);

        // Pressing now does not restart anything
        s.press(60.0, 200.0);
        assert!(!s.input.held);
        assert_eq!(s.phase(), Phase::DoneWait);
    }

    #[test]
    fn unlimited_never_drains() {
        let tuning = Tuning { unlimited: true, ..Tuning::default() };
        let mut s = Session::with_tuning(tuning, 6);
        s.press(120.0, 300.0);
        for _ in 0..(60 * 20) {
            tick(&mut s, DT);
        }
        assert_eq!(s.phase(), Phase::Zen);
        assert_eq!(s.run.resource, 1.0);
        assert_eq!(s.strength(), 1.0);
    }

    #[test]
    fn release_keeps_stream_latched_by_default() {
        let mut s = Session::with_seed(7);
        s.press(120.0, 300.0);
        s.release(120.0, 300.0);
        assert!(s.input.held);
        assert!(s.input.just_released);

        let tuning = Tuning { release_stops_stream: true, ..Tuning::default() };
        let mut s = Session::with_tuning(tuning, 7);
        s.press(120.0, 300.0);
        s.release(120.0, 300.0);
        assert!(!s.input.held);
    }

    #[test]
    fn manual_reset_keeps_background_time() {
        let mut s = Session::with_seed(8);
        s.press(120.0, 300.0);
        for _ in 0..120 {
            tick(&mut s, DT);
        }
        let bg = s.ambient.background_time;
        assert!(!s.drops.is_empty() || !s.splashes.is_empty());

        s.manual_reset();
        assert_eq!(s.phase(), Phase::Start);
        assert!(s.drops.is_empty() && s.splashes.is_empty() && s.ripples.is_empty());
        assert_eq!(s.run.resource, 1.0);
        assert_eq!(s.run.t, 0.0);
        assert!(!s.input.held);
        assert_eq!(s.ambient.background_time, bg);
        assert_eq!((s.actor.x, s.actor.y), (Actor::anchored().x, Actor::anchored().y));
    }

    #[test]
    fn outro_curve_rises_holds_falls() {
        let mut s = Session::with_seed(9);
        s.phase = Phase::Done;

        s.run.outro_clock = 0.0;
        assert_eq!(s.outro_alpha(), 0.0);
        s.run.outro_clock = 0.425;
        assert!((s.outro_alpha() - 0.5).abs() < 1e-4);
        s.run.outro_clock = 1.5;
        assert_eq!(s.outro_alpha(), 1.0);
        assert!(s.outro_drift() > 0.35 && s.outro_drift() < 0.80);
        s.run.outro_clock = 3.85;
        assert!(s.outro_alpha().abs() < 1e-4);
        assert!((s.outro_drift() - 1.0).abs() < 1e-4);

        s.phase = Phase::Zen;
        assert_eq!(s.outro_alpha(), 0.0);
    }

    #[test]
    fn phase_codes_are_distinct() {
        let all = [Phase::Start, Phase::StartIn, Phase::StartFading, Phase::Zen, Phase::DoneWait, Phase::Done];
        let mut codes: Vec<u8> = all.iter().map(|p| p.code()).collect();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
        assert!(all.iter().filter(|p| p.allows_streaming()).count() == 2);
    }
}
