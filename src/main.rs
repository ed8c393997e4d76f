//! Penguin Run entry point
//!
//! Native builds run a headless demo: the autopilot plays the chosen variant,
//! restarts after each finished run, and the high score is kept in a JSON file.
//!
//! Usage: `penguin-run [runner|collector|<config.json>] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use penguin_run::consts::SIM_DT;
    use penguin_run::persistence::FileStore;
    use penguin_run::platform::InputState;
    use penguin_run::sim::GameEvent;
    use penguin_run::{Game, GameConfig, Variant};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Penguin Run (native) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        None => GameConfig::default(),
        Some(arg) => match Variant::from_str(&arg) {
            Some(variant) => GameConfig::from_variant(variant),
            None => match std::fs::read_to_string(&arg)
                .map_err(|e| e.to_string())
                .and_then(|json| GameConfig::from_json(&json).map_err(|e| e.to_string()))
            {
                Ok(config) => config,
                Err(e) => {
                    log::error!("Could not load config {}: {}", arg, e);
                    std::process::exit(2);
                }
            },
        },
    };
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let store = FileStore::new("penguin_run_save.json");
    let mut game = match Game::new(config, store, seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Invalid config: {}", e);
            std::process::exit(2);
        }
    };

    let mut input = InputState::new();
    input.idle_mode = true;
    let frames = (seconds / SIM_DT) as u32;
    // Frames to wait on the game over screen before pressing restart
    let mut restart_in: Option<u32> = None;
    let mut runs = 1;

    for _ in 0..frames {
        let press_restart = restart_in == Some(0);
        restart_in = restart_in.map(|n| n.saturating_sub(1));
        let tick_input = input.sample(false, press_restart);

        for event in game.update(SIM_DT, &tick_input) {
            match event {
                GameEvent::RunLost { .. } | GameEvent::RunWon { .. } => {
                    let hud = game.hud();
                    log::info!(
                        "{} | {} | {}",
                        hud.banner.unwrap_or_default(),
                        hud.score_text,
                        hud.high_score_text
                    );
                    restart_in = Some(60);
                }
                GameEvent::Restarted => {
                    restart_in = None;
                    runs += 1;
                }
                GameEvent::WorldSpeedUp { speed } => log::debug!("Speed {:.0}", speed),
                _ => {}
            }
        }
    }

    let hud = game.hud();
    println!(
        "{} run(s) in {:.0}s | {} | {}",
        runs, seconds, hud.score_text, hud.high_score_text
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `wasm_start` in the library
}
