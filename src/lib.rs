//! Number Rush - click the numbered markers in order
//!
//! Core modules:
//! - `sim`: Session state machine and marker layout (pure, seeded RNG)
//! - `driver`: Fixed timestep driver that schedules delayed removals
//! - `settings`: Tunable game settings
//! - `platform`: Browser bindings for a JS front end

pub mod driver;
pub mod platform;
pub mod settings;
pub mod sim;

pub use driver::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Delay between an accepted click and the marker vanishing (seconds)
    pub const ANIMATION_DURATION: f64 = 0.3;
    /// Suggested timer cadence (seconds)
    pub const TICK_INTERVAL: f64 = 0.1;
    /// Maximum timer steps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will account for (seconds)
    pub const MAX_FRAME_DT: f64 = 0.25;
    /// Shortest tick the driver can keep up with inside `MAX_SUBSTEPS`
    pub const MIN_TICK_INTERVAL: f64 = MAX_FRAME_DT / MAX_SUBSTEPS as f64;

    /// Markers per session when nothing else is configured
    pub const DEFAULT_MARKER_COUNT: u32 = 10;
    /// Larger requests are clamped to this many markers
    pub const MAX_MARKER_COUNT: u32 = 1000;

    /// Upper bound (exclusive) of a normalized marker coordinate
    pub const MAX_POSITION: f32 = 0.9;

    /// Play field size in pixels
    pub const FIELD_WIDTH: f32 = 450.0;
    pub const FIELD_HEIGHT: f32 = 500.0;
}

/// Format elapsed seconds the way the HUD shows them ("3.4s")
pub fn format_elapsed(secs: f64) -> String {
    format!("{:.1}s", secs.max(0.0))
}
