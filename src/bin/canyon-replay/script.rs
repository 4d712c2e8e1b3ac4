// script.rs - Scripted pointer input
//
// A replay script is a JSON list of timed pointer events:
//   [{ "at": 0.25, "kind": "press", "x": 150, "y": 330 }, ...]

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use canyon_engine::Session;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Press,
    Move,
    Release,
    Reset,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Event {
    pub at: f32,
    pub kind: Kind,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

pub fn load(path: &Path) -> Result<Vec<Event>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    parse(&text).with_context(|| format!("parsing script {}", path.display()))
}

/// Parse and time-sort a script
pub fn parse(text: &str) -> Result<Vec<Event>> {
    let mut events: Vec<Event> = serde_json::from_str(text)?;
    for e in &events {
        ensure!(e.at.is_finite() && e.at >= 0.0, "event time must be a non-negative number, got {}", e.at);
    }
    events.sort_by(|a, b| a.at.total_cmp(&b.at));
    Ok(events)
}

/// Default script: point at the target, then tap once
pub fn hold_at(x: f32, y: f32) -> Vec<Event> {
    vec![
        Event { at: 0.0, kind: Kind::Move, x, y },
        Event { at: 0.25, kind: Kind::Press, x, y },
    ]
}

/// Feeds due events into a session in time order
pub struct Feed {
    events: Vec<Event>,
    next: usize,
}

impl Feed {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events, next: 0 }
    }

    /// Apply every event scheduled at or before `t`. Returns how many fired.
    pub fn apply_until(&mut self, t: f32, session: &mut Session) -> usize {
        let start = self.next;
        while let Some(e) = self.events.get(self.next) {
            if e.at > t {
                break;
            }
            match e.kind {
                Kind::Press => session.press(e.x, e.y),
                Kind::Move => session.move_pointer(e.x, e.y),
                Kind::Release => session.release(e.x, e.y),
                Kind::Reset => session.manual_reset(),
            }
            log::debug!("script {:?} at {:.2}s", e.kind, e.at);
            self.next += 1;
        }
        self.next - start
    }

    pub fn is_done(&self) -> bool {
        self.next >= self.events.len()
    }
}
