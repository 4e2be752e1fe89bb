//! Number Rush entry point
//!
//! The browser build is driven from JS through `platform::web`. Natively
//! there is no renderer, so the binary plays one session in demo mode and
//! logs how it went.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use number_rush::consts::TICK_INTERVAL;
    use number_rush::{Game, Settings, format_elapsed};

    env_logger::init();
    log::info!("Number Rush (native) starting...");

    let mut game = Game::new(Settings::default());
    game.restart();

    // Bounded so a stuck session cannot spin forever
    let max_frames = (game.marker_count() as usize + 1) * 100;
    for _ in 0..max_frames {
        if let Some(id) = game.autoplay_step() {
            log::debug!("Demo clicked {}", id);
        }
        game.update(TICK_INTERVAL);
        if !game.state().timer_active && !game.removal_pending() {
            break;
        }
    }

    let state = game.state();
    println!(
        "{} - {} of {} in {}",
        state.status().label(),
        state.cleared(),
        state.marker_count,
        format_elapsed(state.elapsed)
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
