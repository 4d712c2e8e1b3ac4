// render.rs - Encode session state to the frame buffer
//
// The host draws from a flat f32 buffer it reads straight out of wasm memory.
//
//   header   16 floats (see HEADER_* below)
//   drops    6 floats each:  x, y, vx, vy, r, fade
//   splashes 5 floats each:  x, y, size, fade, weight (0 solid, 1 faint)
//   ripples  4 floats each:  x, y, radius, fade

use crate::session::Session;
use crate::sim::Weight;

pub const HEADER_LEN: usize = 16;
pub const DROP_STRIDE: usize = 6;
pub const SPLASH_STRIDE: usize = 5;
pub const RIPPLE_STRIDE: usize = 4;

// Header slots
pub const HEADER_PHASE: usize = 0;
pub const HEADER_OVERLAY: usize = 1;
pub const HEADER_OUTRO_ALPHA: usize = 2;
pub const HEADER_OUTRO_DRIFT: usize = 3;
pub const HEADER_RESOURCE: usize = 4;
pub const HEADER_HAS_FIRED: usize = 5;
pub const HEADER_BACKGROUND_T: usize = 6;
pub const HEADER_RUN_T: usize = 7;
pub const HEADER_ACTOR_X: usize = 8;
pub const HEADER_ACTOR_Y: usize = 9;
pub const HEADER_HEAD_BOB: usize = 10;
pub const HEADER_LEAN_X: usize = 11;
pub const HEADER_LEAN_Y: usize = 12;
pub const HEADER_DROPS: usize = 13;
pub const HEADER_SPLASHES: usize = 14;
pub const HEADER_RIPPLES: usize = 15;

#[derive(Debug, Default)]
pub struct Encoder {
    out: Vec<f32>,
}

impl Encoder {
    pub fn new() -> Self {
        Self { out: Vec::with_capacity(HEADER_LEN + 512 * DROP_STRIDE) }
    }

    pub fn ptr(&self) -> *const f32 {
        self.out.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.out
    }

    /// Rebuild the buffer from the current session state
    pub fn encode(&mut self, s: &Session) {
        self.out.clear();
        self.encode_header(s);
        self.encode_drops(s);
        self.encode_splashes(s);
        self.encode_ripples(s);
    }

    fn encode_header(&mut self, s: &Session) {
        let pose = s.pose();
        let flag = |b: bool| -> f32 { if b { 1.0 } else { 0.0 } };

        self.out.extend_from_slice(&[
            s.phase().code() as f32,
            s.run.overlay,
            s.outro_alpha(),
            s.outro_drift(),
            s.run.resource,
            flag(s.run.has_fired),
            s.ambient.background_time,
            s.run.t,
            s.actor.x,
            s.actor.y,
            pose.head_bob,
            pose.lean_x,
            pose.lean_y,
            s.drops.len() as f32,
            s.splashes.len() as f32,
            s.ripples.len() as f32,
        ]);
    }

    fn encode_drops(&mut self, s: &Session) {
        for d in s.drops.iter() {
            self.out.extend_from_slice(&[d.x, d.y, d.vx, d.vy, d.r, d.fade()]);
        }
    }

    fn encode_splashes(&mut self, s: &Session) {
        for p in s.splashes.iter() {
            let weight = match p.weight {
                Weight::Solid => 0.0,
                Weight::Faint => 1.0,
            };
            self.out.extend_from_slice(&[p.x, p.y, p.size, p.fade(), weight]);
        }
    }

    fn encode_ripples(&mut self, s: &Session) {
        for r in s.ripples.iter() {
            self.out.extend_from_slice(&[r.x, r.y, r.radius, r.fade()]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FrameClock;

    #[test]
    fn idle_title_is_header_only() {
        let s = Session::with_seed(1);
        let mut enc = Encoder::new();
        enc.encode(&s);

        let buf = enc.as_slice();
        assert_eq!(buf.len(), HEADER_LEN);
        assert_eq!(buf[HEADER_PHASE], 0.0);
        assert_eq!(buf[HEADER_OVERLAY], 1.0);
        assert_eq!(buf[HEADER_RESOURCE], 1.0);
        assert_eq!(buf[HEADER_ACTOR_X], s.actor.x);
    }

    #[test]
    fn layout_matches_counts() {
        let mut s = Session::with_seed(2);
        let mut clock = FrameClock::new(0.033);
        s.press(150.0, 340.0);
        for _ in 0..200 {
            clock.step(1.0 / 60.0, &mut s);
        }

        let mut enc = Encoder::new();
        enc.encode(&s);
        let buf = enc.as_slice();

        let drops = buf[HEADER_DROPS] as usize;
        let splashes = buf[HEADER_SPLASHES] as usize;
        let ripples = buf[HEADER_RIPPLES] as usize;
        assert!(drops > 0);
        assert_eq!(
            buf.len(),
            HEADER_LEN + drops * DROP_STRIDE + splashes * SPLASH_STRIDE + ripples * RIPPLE_STRIDE
        );
        assert_eq!(buf[HEADER_HAS_FIRED], 1.0);
        assert_eq!(buf[HEADER_LEAN_X], 2.0);

        let first = s.drops.iter().next().unwrap();
        assert_eq!(&buf[HEADER_LEN..HEADER_LEN + 2], &[first.x, first.y]);
    }
}
