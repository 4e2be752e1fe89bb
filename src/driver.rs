//! Fixed timestep driver
//!
//! Owns a `Session` and plays the part of the UI timer: accumulates frame
//! time into fixed ticks and fires the delayed marker removal handed out by
//! each accepted click.

use crate::consts::{MAX_FRAME_DT, MAX_MARKER_COUNT, MAX_SUBSTEPS};
use crate::settings::Settings;
use crate::sim::{ActivationOutcome, ActivationTicket, Session, SessionState};

/// A removal waiting for its flash to finish
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScheduledRemoval {
    ticket: ActivationTicket,
    remaining: f64,
}

/// Game instance driving one session at a time
#[derive(Debug, Clone)]
pub struct Game {
    session: Session,
    settings: Settings,
    accumulator: f64,
    scheduled: Option<ScheduledRemoval>,
    /// Count used by the next restart
    marker_count: u32,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        let settings = settings.sanitized();
        let seed = settings.resolve_seed();
        log::info!("Game initialized with seed: {}", seed);
        Self {
            session: Session::new(seed).with_animation_duration(settings.animation_duration),
            marker_count: settings.marker_count,
            settings,
            accumulator: 0.0,
            scheduled: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn marker_count(&self) -> u32 {
        self.marker_count
    }

    /// Takes effect on the next restart; clamped to `MAX_MARKER_COUNT`
    pub fn set_marker_count(&mut self, count: u32) {
        self.marker_count = count.min(MAX_MARKER_COUNT);
    }

    /// Apply a raw value from the count input widget.
    ///
    /// Negative or non-numeric input is ignored and returns false. Fractions
    /// are truncated.
    pub fn set_marker_count_from_input(&mut self, value: f64) -> bool {
        if !value.is_finite() || value < 0.0 {
            log::debug!("Ignoring marker count input {}", value);
            return false;
        }
        // `as` saturates, so huge inputs land on u32::MAX before clamping
        self.set_marker_count(value as u32);
        true
    }

    /// Start a new session, dropping any removal from the old one
    pub fn restart(&mut self) -> &SessionState {
        self.scheduled = None;
        self.accumulator = 0.0;
        self.session.start(self.marker_count)
    }

    /// Forward a click and schedule the removal if it was accepted
    pub fn click(&mut self, id: u32) -> ActivationOutcome {
        let outcome = self.session.activate(id);
        if let ActivationOutcome::ScheduleRemoval { ticket, delay } = outcome {
            self.scheduled = Some(ScheduledRemoval {
                ticket,
                remaining: delay,
            });
        }
        outcome
    }

    /// True while a click is waiting for its removal
    pub fn removal_pending(&self) -> bool {
        self.scheduled.is_some()
    }

    /// Advance by one frame of `dt` seconds
    pub fn update(&mut self, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let dt = dt.min(MAX_FRAME_DT);
        let step = self.settings.tick_interval;

        self.accumulator += dt;
        let mut substeps = 0;
        while self.accumulator >= step && substeps < MAX_SUBSTEPS {
            self.session.tick(step);
            self.accumulator -= step;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than catching up over several frames
            self.accumulator = self.accumulator.min(step);
        }

        if let Some(mut removal) = self.scheduled.take() {
            removal.remaining -= dt;
            if removal.remaining <= 0.0 {
                self.session.resolve_activation(removal.ticket);
            } else {
                self.scheduled = Some(removal);
            }
        }
    }

    /// Idle/demo mode: click the expected marker when nothing is in flight.
    ///
    /// Returns the clicked id.
    pub fn autoplay_step(&mut self) -> Option<u32> {
        let state = self.session.state();
        if self.scheduled.is_some() || state.pending_activation.is_some() {
            return None;
        }
        let id = state.expected_next;
        state.marker(id)?;
        match self.click(id) {
            ActivationOutcome::ScheduleRemoval { .. } => Some(id),
            _ => None,
        }
    }
}
