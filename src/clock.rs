// clock.rs - Frame driver
//
// Turns host timestamps into clamped time steps and runs one session tick.
// A stall (background tab, debugger) becomes a single capped step.

use crate::session::Session;

#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
    frames: u64,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self { last_ms: None, max_dt, frames: 0 }
    }

    /// Ticks driven so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Seconds since the previous timestamp, clamped to `[0, max_dt]`.
    /// The first call yields 0.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.clamp(0.0, self.max_dt)
    }

    /// Host entry point: one display frame at `now_ms`
    pub fn drive(&mut self, now_ms: f64, session: &mut Session) -> f32 {
        let dt = self.delta(now_ms);
        self.step(dt, session)
    }

    /// Advance the session by `dt` (clamped): clocks, state machine, edge reset
    pub fn step(&mut self, dt: f32, session: &mut Session) -> f32 {
        let dt = dt.clamp(0.0, self.max_dt);
        session.advance_clocks(dt);
        session.step(dt);
        session.input.clear_edges();
        self.frames += 1;
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_zero_then_real_deltas() {
        let mut clock = FrameClock::new(0.033);
        assert_eq!(clock.delta(1000.0), 0.0);
        assert!((clock.delta(1016.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn stalls_are_capped() {
        let mut clock = FrameClock::new(0.033);
        clock.delta(0.0);
        assert_eq!(clock.delta(5000.0), 0.033);
        // Clock going backwards never yields a negative step
        assert_eq!(clock.delta(4000.0), 0.0);
    }

    #[test]
    fn drive_advances_session_and_clears_edges() {
        let mut clock = FrameClock::new(0.033);
        let mut session = Session::with_seed(1);
        session.press(100.0, 200.0);

        clock.drive(0.0, &mut session);
        clock.drive(1000.0, &mut session);

        assert_eq!(clock.frames(), 2);
        assert!((session.ambient.background_time - 0.033).abs() < 1e-6);
        assert!((session.run.dt - 0.033).abs() < 1e-6);
        assert!(!session.input.just_pressed);
    }
}
