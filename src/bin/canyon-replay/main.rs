// canyon-replay - Run a canyon session headless
//
// Drives the simulation at a fixed tick rate from a scripted pointer,
// logs every phase change, and can dump frames as PNGs.
//
// Usage: cargo run --bin canyon-replay -- [--target X Y] [--frames out/] [--every 4]

mod raster;
mod script;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;

use canyon_engine::{FrameClock, Phase, SCENE_H, SCENE_W, Session, Tuning};

#[derive(Parser)]
#[command(author, version, about = "Replay a canyon session without a browser", long_about = None)]
struct Args {
    /// RNG seed for the session
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Simulation ticks per second
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Seconds of simulated time
    #[arg(long, default_value_t = 20.0)]
    duration: f32,

    /// Aim point for the default script
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    target: Option<Vec<f32>>,

    /// JSON input script (overrides --target)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Write PNG frames into this directory
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Keep every Nth frame
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Never run out
    #[arg(long)]
    unlimited: bool,
}

/// What happened over the whole replay
#[derive(Default)]
struct Summary {
    ticks: u64,
    peak_drops: usize,
    peak_splashes: usize,
    first_fire: Option<f32>,
    depleted_at: Option<f32>,
    outro_at: Option<f32>,
    back_to_title_at: Option<f32>,
}

impl Summary {
    fn observe(&mut self, t: f32, s: &Session, prev: Phase) {
        self.ticks += 1;
        self.peak_drops = self.peak_drops.max(s.drops.len());
        self.peak_splashes = self.peak_splashes.max(s.splashes.len());
        if self.first_fire.is_none() && s.run.has_fired {
            self.first_fire = Some(t);
        }
        let now = s.phase();
        if now == prev {
            return;
        }
        match now {
            Phase::DoneWait => { self.depleted_at.get_or_insert(t); }
            Phase::Done => { self.outro_at.get_or_insert(t); }
            Phase::Start if prev == Phase::StartIn => { self.back_to_title_at.get_or_insert(t); }
            _ => {}
        }
    }

    fn print(&self) {
        let fmt = |v: Option<f32>| v.map_or("-".to_string(), |t| format!("{:.2}s", t));
        println!("ticks:          {}", self.ticks);
        println!("peak droplets:  {}", self.peak_drops);
        println!("peak splashes:  {}", self.peak_splashes);
        println!("first emission: {}", fmt(self.first_fire));
        println!("depleted:       {}", fmt(self.depleted_at));
        println!("outro:          {}", fmt(self.outro_at));
        println!("back to title:  {}", fmt(self.back_to_title_at));
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    ensure!(args.fps > 0.0, "--fps must be positive");
    ensure!(args.duration >= 0.0, "--duration must not be negative");
    ensure!(args.every > 0, "--every must be at least 1");

    let events = match &args.script {
        Some(path) => script::load(path)?,
        None => {
            let (x, y) = match args.target.as_deref() {
                Some([x, y]) => (*x, *y),
                _ => (SCENE_W * 0.62, SCENE_H * 0.92),
            };
            script::hold_at(x, y)
        }
    };
    let mut feed = script::Feed::new(events);

    let tuning = Tuning { unlimited: args.unlimited, ..Tuning::default() };
    let dt = 1.0 / args.fps;
    if dt > tuning.max_dt {
        log::warn!("{:.1} fps is below the step cap; each tick is clamped to {}s", args.fps, tuning.max_dt);
    }

    let mut session = Session::with_tuning(tuning, args.seed);
    let mut clock = FrameClock::new(session.tuning().max_dt);
    log::info!("seed {}, budget {:.2}s", args.seed, session.run.budget);

    if let Some(dir) = &args.frames {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let ticks = (args.duration * args.fps).ceil() as u64;
    let mut summary = Summary::default();
    let mut elapsed = 0.0f32;

    for i in 0..ticks {
        feed.apply_until(elapsed, &mut session);

        let prev = session.phase();
        elapsed += clock.step(dt, &mut session);
        summary.observe(elapsed, &session, prev);

        if let Some(dir) = &args.frames {
            if i % args.every == 0 {
                let path = dir.join(format!("frame_{:05}.png", i));
                raster::render(&session)
                    .save(&path)
                    .with_context(|| format!("writing {}", path.display()))?;
            }
        }
    }

    if !feed.is_done() {
        log::warn!("replay ended before the script did");
    }
    summary.print();
    Ok(())
}
