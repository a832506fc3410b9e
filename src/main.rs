//! Gap Runner headless entry point
//!
//! Runs an autopilot session through the same frame loop a display host would
//! use, with simulated display timing. Set `RUST_LOG=info` (or `debug`) to
//! follow along and `GAP_RUNNER_TUNING=path.json` to override balance.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use gap_runner::Tuning;
use gap_runner::platform::{FrameView, GameLoop, Key, KeyboardAdapter, ManualScheduler, Renderer};
use gap_runner::sim::{GameEvent, Session};

/// Simulated display refresh rate
const DISPLAY_HZ: f64 = 144.0;
/// Frames to simulate (two minutes of display time)
const FRAMES: u32 = 144 * 120;
const SEED: u64 = 0x5eed;

/// Renderer stand-in that just tracks what it was shown
#[derive(Default)]
struct HeadlessRenderer {
    frames: u64,
    best_on_screen: u32,
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, view: &FrameView<'_>) {
        self.frames += 1;
        self.best_on_screen = self.best_on_screen.max(view.score);
        log::trace!(
            "frame {}: avatar y={:.1} score={} paused={}",
            self.frames,
            view.avatar.pos.y,
            view.score,
            view.paused
        );
    }
}

fn load_tuning() -> Tuning {
    let Ok(path) = std::env::var("GAP_RUNNER_TUNING") else {
        return Tuning::default();
    };

    match std::fs::read_to_string(&path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning in {}: {}", path, e);
                Tuning::default()
            }
        },
        Err(e) => {
            log::warn!("Could not read {}: {}", path, e);
            Tuning::default()
        }
    }
}

/// Should the autopilot flap this frame?
///
/// Aims for the middle of the nearest gap that is not yet behind the avatar.
fn autopilot_wants_jump(session: &Session) -> bool {
    let avatar = &session.avatar;
    let target = session
        .obstacles
        .iter()
        .find(|o| o.right() > avatar.pos.x)
        .map(|o| o.gap_top + o.gap_size / 2.0)
        .unwrap_or(session.tuning.screen_height / 2.0);

    avatar.pos.y + avatar.size / 2.0 > target + 20.0 && avatar.vel_y >= 0.0
}

fn main() {
    env_logger::init();
    log::info!("Gap Runner (headless) starting...");

    let tuning = load_tuning();
    let frame_ms = 1000.0 / DISPLAY_HZ;

    let mut scheduler = ManualScheduler::new();
    let mut renderer = HeadlessRenderer::default();
    let mut keyboard = KeyboardAdapter::new();
    let mut game = GameLoop::new(Session::with_tuning(tuning, SEED));
    let mut jitter = Pcg32::seed_from_u64(SEED);

    game.start(&mut scheduler);

    let mut now = 0.0;
    for _ in 0..FRAMES {
        if scheduler.fire().is_none() {
            log::error!("Frame loop stopped unexpectedly");
            break;
        }

        let key_event = if autopilot_wants_jump(&game.session) {
            keyboard.key_down(Key::Space)
        } else {
            keyboard.key_up(Key::Space)
        };
        if let Some(intent) = key_event {
            game.handle_intent(intent);
        }

        now += frame_ms * jitter.random_range(0.6..1.4);
        game.on_frame(now, &mut scheduler, &mut renderer);

        for event in game.drain_events() {
            match event {
                GameEvent::Scored { score } => log::debug!("Score {}", score),
                GameEvent::Died { cause } => log::info!("Died: {:?}", cause),
                GameEvent::SpeedUp { scroll_speed } => log::info!("Speed {}", scroll_speed),
                GameEvent::ObstacleRecycled | GameEvent::CeilingHit => {}
            }
        }
    }

    let session = &game.session;
    let summary = serde_json::json!({
        "seed": session.seed,
        "elapsed_ms": now,
        "frames": renderer.frames,
        "ticks": session.time_ticks,
        "score": session.score,
        "best_score": session.best_score,
        "best_on_screen": renderer.best_on_screen,
        "deaths": session.deaths,
        "scroll_speed": session.scroll_speed,
    });
    println!("{}", summary);
}
