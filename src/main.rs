//! Flap Arcade entry point
//!
//! The browser build is driven by the page through `ArcadeHandle`; this
//! binary only matters natively, where it plays a headless demo round.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flap_arcade::sim::autopilot::wants_impulse;
    use flap_arcade::{Arcade, GameConfig};

    env_logger::init();
    log::info!("Flap Arcade (native) starting headless demo...");

    // Optional JSON tuning as the first argument
    let config = match std::env::args().nth(1) {
        Some(json) => match GameConfig::from_json(&json) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Bad config: {e}");
                std::process::exit(2);
            }
        },
        None => GameConfig::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut arcade = match Arcade::new(config, seed) {
        Ok(arcade) => arcade,
        Err(e) => {
            log::error!("Bad config: {e}");
            std::process::exit(2);
        }
    };

    // Autopilot runs can last a long time; cut them off eventually
    const MAX_DEMO_FRAMES: u64 = 100_000;

    let mut ticket = arcade.open().request_frame;
    while let Some(current) = ticket {
        if arcade.session().is_some_and(|s| s.frames >= MAX_DEMO_FRAMES) {
            log::info!("Frame cap reached, closing");
            break;
        }
        if let Some(session) = arcade.session() {
            if wants_impulse(session, arcade.config()) {
                arcade.impulse();
            }
        }
        ticket = arcade.on_frame(current).and_then(|output| output.next);
    }

    let frames = arcade.session().map_or(0, |s| s.frames);
    let score = arcade.score();
    log::info!("Demo over after {} frames", frames);
    arcade.close();
    println!("Score: {}", score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is ArcadeHandle, this is just to satisfy the compiler
}
