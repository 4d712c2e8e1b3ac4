use wasm_bindgen::prelude::*;

// ============================================================================
// CANYON - A figure on a canyon rim, a stream, and a quiet outro
// ============================================================================

pub mod actor;
pub mod clock;
pub mod input;
pub mod render;
pub mod scene;
pub mod session;
pub mod sim;
pub mod world;

pub use actor::{Actor, NodPhase, Pose};
pub use clock::FrameClock;
pub use input::InputSample;
pub use render::Encoder;
pub use scene::{RIM_Y, SCENE_H, SCENE_W, Tuning};
pub use session::{Ambient, Phase, Run, Session};

/// Install console logging and the panic hook. Call once from the host.
#[wasm_bindgen]
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }
}

#[wasm_bindgen]
pub struct CanyonWorld {
    session: Session,
    clock: FrameClock,
    encoder: Encoder,
}

#[wasm_bindgen]
impl CanyonWorld {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        Self::with_seed(seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        let session = Session::with_seed(seed);
        let clock = FrameClock::new(session.tuning().max_dt);
        let mut encoder = Encoder::new();
        encoder.encode(&session);
        log::info!("canyon world ready, budget {:.2}s", session.run.budget);
        Self { session, clock, encoder }
    }

    /// One display frame. `now_ms` is the host's frame timestamp.
    pub fn tick(&mut self, now_ms: f64) {
        self.clock.drive(now_ms, &mut self.session);
        self.encoder.encode(&self.session);
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.session.press(x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.session.move_pointer(x, y);
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) {
        self.session.release(x, y);
    }

    pub fn reset(&mut self) {
        self.session.manual_reset();
        self.encoder.encode(&self.session);
    }

    // Accessors for WASM
    pub fn phase(&self) -> u8 { self.session.phase().code() }
    pub fn phase_name(&self) -> String { self.session.phase().name().to_string() }
    pub fn overlay(&self) -> f32 { self.session.run.overlay }
    pub fn outro_alpha(&self) -> f32 { self.session.outro_alpha() }
    pub fn outro_drift(&self) -> f32 { self.session.outro_drift() }
    pub fn resource(&self) -> f32 { self.session.run.resource }
    pub fn has_fired(&self) -> bool { self.session.run.has_fired }
    pub fn background_time(&self) -> f32 { self.session.ambient.background_time }
    pub fn frame_ptr(&self) -> *const f32 { self.encoder.ptr() }
    pub fn frame_len(&self) -> usize { self.encoder.len() }
}

// Terrain queries for the host's canyon silhouette

#[wasm_bindgen]
pub fn wall_left(y: f32) -> f32 { world::x_left(y) }

#[wasm_bindgen]
pub fn wall_right(y: f32) -> f32 { world::x_right(y) }

#[wasm_bindgen]
pub fn floor_at(x: f32) -> f32 { world::floor_y(x) }

#[wasm_bindgen]
pub fn scene_width() -> f32 { SCENE_W }

#[wasm_bindgen]
pub fn scene_height() -> f32 { SCENE_H }

#[wasm_bindgen]
pub fn rim_y() -> f32 { RIM_Y }
