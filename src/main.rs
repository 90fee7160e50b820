//! Cross Road headless runner
//!
//! Drives a session with a simple autopilot and logs what happens. Usage:
//! `cross-road [seed] [frames]`. Settings are read from (and written back to)
//! `$CROSS_ROAD_DATA`, default `.cross-road/`.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::path::PathBuf;

    use cross_road::Settings;
    use cross_road::audio::LogAudioSink;
    use cross_road::persistence::FileStorage;
    use cross_road::platform::Session;
    use cross_road::sim::{Game, GameEvent, GamePhase, Playfield, SimRng};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse::<u64>()?,
        None => rand::random(),
    };
    let frames = match args.next() {
        Some(arg) => arg.parse::<u32>()?,
        None => 60 * 120,
    };

    let dir = std::env::var_os("CROSS_ROAD_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".cross-road"));
    let mut storage = FileStorage::new(dir);
    let settings = Settings::load(&storage);
    settings.save(&mut storage)?;
    log::info!("Settings stored in {}", storage.dir().display());

    log::info!("Cross Road (headless) starting, seed {}", seed);
    let game = Game::new(Playfield::default(), settings, SimRng::from_seed(seed));
    let mut session = Session::new(game, LogAudioSink);

    let mut failures = 0u32;
    let mut cleared = 0u32;
    for frame in 0..frames {
        let held = autopilot::controls(session.game(), frame);
        session.frame(frame as f64 * autopilot::FRAME_MS, &held);

        for event in session.game().events() {
            match event {
                GameEvent::Failure => failures += 1,
                GameEvent::Success => cleared += 1,
                _ => {}
            }
        }
        if session.game().phase() == GamePhase::Complete {
            log::info!("All levels cleared after {} frames", frame + 1);
            break;
        }
    }

    let game = session.game();
    log::info!(
        "Finished in {:?} on level {} with {} coins; {} levels cleared, {} failures",
        game.phase(),
        game.level_index(),
        game.coins_collected(),
        cleared,
        failures
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm host drives `platform::Session` directly
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use cross_road::input::Controls;
    use cross_road::sim::{Game, GamePhase, RandomSource};

    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Closer than this on an axis counts as lined up
    const SLACK: f32 = 3.0;

    /// Greedy pilot: nearest coin until the target is met, then straight up
    pub fn controls<R: RandomSource>(game: &Game<R>, frame: u32) -> Controls {
        // Alternate frames so each confirm is a fresh press
        if game.phase() != GamePhase::Play {
            return Controls {
                confirm: frame % 2 == 0,
                ..Default::default()
            };
        }
        let Some(level) = game.level() else {
            return Controls::default();
        };

        let player = &level.player;
        let centre = player.pos + player.size / 2.0;
        let goal = if level.coins_collected < level.config.coin_target {
            level
                .coins
                .iter()
                .filter(|c| !c.collected)
                .min_by(|a, b| a.pos.distance(centre).total_cmp(&b.pos.distance(centre)))
                .map(|c| c.pos)
        } else {
            None
        }
        .unwrap_or(glam::Vec2::new(centre.x, 0.0));

        let delta = goal - centre;
        Controls {
            left: delta.x < -SLACK,
            right: delta.x > SLACK,
            up: delta.y < -SLACK,
            down: delta.y > SLACK,
            ..Default::default()
        }
    }
}
