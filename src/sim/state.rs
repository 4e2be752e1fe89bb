//! Session state and core types
//!
//! Everything the front end needs to draw a frame lives in `SessionState`.

use serde::{Deserialize, Serialize};

use super::layout::Marker;

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Never started
    Idle,
    /// Markers remain and no wrong click yet
    InProgress,
    /// Every marker removed in order
    Cleared,
    /// Wrong marker clicked (terminal until restart)
    GameOver,
}

/// Heading shown above the play field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayStatus {
    InProgress,
    Cleared,
    GameOver,
}

impl DisplayStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayStatus::InProgress => "LET'S PLAY",
            DisplayStatus::Cleared => "ALL CLEARED",
            DisplayStatus::GameOver => "Game Over",
        }
    }
}

impl From<Phase> for DisplayStatus {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::InProgress => DisplayStatus::InProgress,
            // An empty field reads as cleared before the first start too
            Phase::Idle | Phase::Cleared => DisplayStatus::Cleared,
            Phase::GameOver => DisplayStatus::GameOver,
        }
    }
}

/// Handle for a click accepted but not yet resolved.
///
/// Carries the session generation so a removal scheduled before a restart
/// cannot resolve a click from the new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivationTicket {
    pub id: u32,
    pub generation: u64,
}

/// What the driver must do after a click
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivationOutcome {
    /// Correct marker; call `resolve_activation(ticket)` after `delay` seconds
    ScheduleRemoval {
        ticket: ActivationTicket,
        delay: f64,
    },
    /// Wrong marker; the session is over
    GameOver,
    /// Click dropped (session over, not started, or another click pending)
    Ignored,
}

/// Snapshot of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Markers still on the field (unique by id)
    pub markers: Vec<Marker>,
    /// Smallest id not yet cleared
    pub expected_next: u32,
    /// Marker in its post-click delay, if any
    pub pending_activation: Option<u32>,
    /// Seconds accrued while the timer was running
    pub elapsed: f64,
    pub timer_active: bool,
    pub game_over: bool,
    /// Markers generated by the last start
    pub marker_count: u32,
    /// Whether `start` has been called at least once
    pub started: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            markers: Vec::new(),
            expected_next: 1,
            pending_activation: None,
            elapsed: 0.0,
            timer_active: false,
            game_over: false,
            marker_count: 0,
            started: false,
        }
    }
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if !self.started {
            Phase::Idle
        } else if self.markers.is_empty() {
            Phase::Cleared
        } else {
            Phase::InProgress
        }
    }

    pub fn status(&self) -> DisplayStatus {
        self.phase().into()
    }

    /// Label for the start button
    pub fn start_label(&self) -> &'static str {
        if self.markers.is_empty() {
            "Start"
        } else {
            "Restart"
        }
    }

    pub fn marker(&self, id: u32) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    /// True while the marker shows its clicked flash
    pub fn is_flashing(&self, id: u32) -> bool {
        self.pending_activation == Some(id)
    }

    /// Markers cleared so far
    pub fn cleared(&self) -> u32 {
        self.expected_next.saturating_sub(1)
    }
}
