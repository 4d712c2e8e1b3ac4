// tuning.rs - Constant tuning table
//
// Velocities are in units per 1/60 s, timers in seconds.
// Ranges are (min, max) pairs sampled uniformly.

/// Every tuned constant of the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    /// Longest time step a single tick may take.
    pub max_dt: f32,

    // Resource
    /// Skip the resource budget entirely (stream never runs dry).
    pub unlimited: bool,
    /// Per-run budget in seconds of streaming.
    pub budget: (f32, f32),
    /// Resource must exceed this to emit.
    pub emit_threshold: f32,
    /// A release unlatches the stream. Off: one tap streams until empty.
    pub release_stops_stream: bool,

    // Emission
    pub drops_per_emit: usize,
    pub emit_cooldown: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub speed_jitter: (f32, f32),
    pub spread: f32,
    pub spawn_jitter: f32,
    pub drop_radius: (f32, f32),
    pub drop_ttl: (f32, f32),

    // Drop physics
    pub drop_gravity: f32,
    pub drop_drag_x: f32,
    pub drop_drag_y: f32,
    pub wobble_amp: f32,
    /// Collisions only apply this far below the rim.
    pub rim_margin: f32,
    /// Drops this far outside the scene are culled.
    pub bounds_margin: f32,

    // Splashes
    pub splash_batch: (f32, f32),
    pub splash_gravity: f32,
    pub splash_drag: f32,
    pub splash_ttl: (f32, f32),
    pub splash_size: (f32, f32),
    pub wall_intensity: f32,
    pub floor_intensity: f32,

    // Ripples
    pub ripple_radius: f32,
    pub ripple_growth: f32,
    pub ripple_ttl: (f32, f32),

    // Actor
    pub aim_smoothing: f32,

    // Phase timers
    pub fade_out_secs: f32,
    pub fade_in_secs: f32,
    pub done_delay: f32,
    pub outro_in: f32,
    pub outro_hold: f32,
    pub outro_out: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_dt: 0.033,

            unlimited: false,
            budget: (8.8, 11.6),
            emit_threshold: 0.05,
            release_stops_stream: false,

            drops_per_emit: 2,
            emit_cooldown: 0.015,
            speed_min: 1.45,
            speed_max: 2.85,
            speed_jitter: (-0.03, 0.08),
            spread: 0.02,
            spawn_jitter: 0.25,
            drop_radius: (0.50, 0.95),
            drop_ttl: (1.3, 2.2),

            drop_gravity: 5.6,
            drop_drag_x: 0.993,
            drop_drag_y: 0.994,
            wobble_amp: 0.03,
            rim_margin: 10.0,
            bounds_margin: 30.0,

            splash_batch: (4.0, 10.0),
            splash_gravity: 6.5,
            splash_drag: 0.96,
            splash_ttl: (0.35, 0.75),
            splash_size: (1.0, 2.1),
            wall_intensity: 0.35,
            floor_intensity: 0.25,

            ripple_radius: 1.5,
            ripple_growth: 22.0,
            ripple_ttl: (1.4, 2.4),

            aim_smoothing: 0.001,

            fade_out_secs: 0.4,
            fade_in_secs: 0.6,
            done_delay: 1.0,
            outro_in: 0.85,
            outro_hold: 1.8,
            outro_out: 1.2,
        }
    }
}

impl Tuning {
    /// Length of the whole outro line animation.
    pub fn outro_total(&self) -> f32 {
        self.outro_in + self.outro_hold + self.outro_out
    }
}
