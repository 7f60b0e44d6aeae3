//! Paddle Rush entry point
//!
//! The browser build is driven from JS through `platform::web::WebSession`.
//! Natively this runs a headless autoplay session, which is handy for
//! checking tuning changes and the high-score file.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;
    use glam::Vec2;

    use paddle_rush::persistence::FileStore;
    use paddle_rush::sim::{Directions, FrameInput, GameEvent, GameState};
    use paddle_rush::{Session, SimConfig, Variant};

    #[derive(Parser, Debug)]
    #[command(name = "paddle-rush", about = "Headless Paddle Rush autoplay runner")]
    struct Args {
        /// Preset: classic, survival, cascade or timed
        #[arg(long, default_value = "survival")]
        variant: String,

        /// JSON config overriding the preset
        #[arg(long)]
        config: Option<PathBuf>,

        /// Frames to simulate
        #[arg(long, default_value_t = 3600)]
        frames: u32,

        /// Simulated frame rate
        #[arg(long, default_value_t = 60.0)]
        fps: f32,

        /// RNG seed (defaults to the clock)
        #[arg(long)]
        seed: Option<u64>,

        /// Where the high-score file lives
        #[arg(long, default_value = ".paddle-rush/store.json")]
        store: PathBuf,
    }

    fn load_config(args: &Args) -> SimConfig {
        let variant = Variant::from_str(&args.variant).unwrap_or_else(|| {
            log::warn!("Unknown variant {:?}, using survival", args.variant);
            Variant::Survival
        });
        let preset = SimConfig::for_variant(variant);

        let Some(path) = &args.config else {
            return preset;
        };
        match std::fs::read_to_string(path) {
            Ok(json) => match SimConfig::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::error!(
                        "Bad config {}: {}, using {} preset",
                        path.display(),
                        err,
                        variant.as_str()
                    );
                    preset
                }
            },
            Err(err) => {
                log::error!(
                    "Cannot read {}: {}, using {} preset",
                    path.display(),
                    err,
                    variant.as_str()
                );
                preset
            }
        }
    }

    /// Chase the nearest collectible unless the star is close; otherwise
    /// shadow the ball for the classic points.
    fn autopilot(state: &GameState) -> FrameInput {
        let paddle = state.paddle.pos;

        let threat = state
            .hazard
            .as_ref()
            .filter(|h| h.pos.distance(paddle) < 220.0)
            .map(|h| paddle + (paddle - h.pos));

        let target = threat.or_else(|| {
            state
                .collectibles
                .iter()
                .map(|c| c.pos)
                .min_by(|a, b| a.distance(paddle).total_cmp(&b.distance(paddle)))
        });
        let target = target.unwrap_or(Vec2::new(state.ball.pos.x, paddle.y));

        let delta = target - paddle;
        let dead_zone = state.config.paddle_step;
        let arrows = Directions {
            left: delta.x < -dead_zone,
            right: delta.x > dead_zone,
            up: delta.y < -dead_zone,
            down: delta.y > dead_zone,
        };
        FrameInput {
            arrows,
            ..Default::default()
        }
    }

    pub fn run() {
        env_logger::init();
        let args = Args::parse();
        let config = load_config(&args);
        let seed = args.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
        let dt = if args.fps > 0.0 { 1.0 / args.fps } else { 1.0 / 60.0 };

        log::info!("Paddle Rush (native) starting...");
        let store = FileStore::open(&args.store);
        log::info!("High scores kept in {}", store.path().display());
        let mut session = Session::new(config, store, seed);

        let mut collected = 0u32;
        let mut expired = 0u32;
        let mut star_hits = 0u32;
        let mut frames_run = 0u32;
        for _ in 0..args.frames {
            let input = autopilot(session.state());
            let report = session.frame(&input, dt);
            frames_run += 1;
            for event in &report.events {
                match event {
                    GameEvent::CollectibleCollected { .. } => collected += 1,
                    GameEvent::CollectibleExpired { .. } | GameEvent::CollectibleFellOff { .. } => {
                        expired += 1
                    }
                    GameEvent::HazardHitPaddle { .. } => star_hits += 1,
                    _ => {}
                }
            }
            if report.ended {
                break;
            }
        }

        let state = session.state();
        println!("Frames:      {}", frames_run);
        println!("Score:       {}", state.score);
        println!("High score:  {}", session.high_score());
        println!("Health:      {}", state.health);
        println!("Collected:   {}", collected);
        println!("Missed:      {}", expired);
        println!("Star hits:   {}", star_hits);
        println!("Game over:   {}", session.is_over());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
