//! Session controller
//!
//! Purely reactive: the driver calls `start`, `activate`, `resolve_activation`
//! and `tick`, and reads the resulting `SessionState`. Nothing here owns a
//! clock or schedules callbacks.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::layout::generate;
use super::state::{ActivationOutcome, ActivationTicket, Phase, SessionState};
use crate::consts::{ANIMATION_DURATION, MAX_MARKER_COUNT};

/// Authoritative game state plus the RNG that lays out markers
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    seed: u64,
    rng: Pcg32,
    /// Bumped on every start; stale tickets carry an older value
    generation: u64,
    /// Delay handed out with each accepted click (seconds)
    animation_duration: f64,
}

impl Session {
    /// Create an idle session whose layouts derive from `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            state: SessionState::default(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            generation: 0,
            animation_duration: ANIMATION_DURATION,
        }
    }

    pub fn with_animation_duration(mut self, secs: f64) -> Self {
        self.animation_duration = secs;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn animation_duration(&self) -> f64 {
        self.animation_duration
    }

    /// Reset and lay out `count` fresh markers.
    ///
    /// Supersedes any pending click. `count == 0` is accepted and lands
    /// directly in `Cleared`; counts above `MAX_MARKER_COUNT` are clamped.
    pub fn start(&mut self, count: u32) -> &SessionState {
        if count > MAX_MARKER_COUNT {
            log::warn!("Marker count {} clamped to {}", count, MAX_MARKER_COUNT);
        }
        let count = count.min(MAX_MARKER_COUNT);
        self.generation += 1;
        self.state = SessionState {
            markers: generate(count, &mut self.rng),
            expected_next: 1,
            pending_activation: None,
            elapsed: 0.0,
            timer_active: count > 0,
            game_over: false,
            marker_count: count,
            started: true,
        };
        log::info!(
            "Session {} started with {} markers",
            self.generation,
            count
        );
        &self.state
    }

    /// Handle a click on marker `id`
    pub fn activate(&mut self, id: u32) -> ActivationOutcome {
        if self.state.game_over {
            log::trace!("Click on {} ignored: game over", id);
            return ActivationOutcome::Ignored;
        }
        if let Some(pending) = self.state.pending_activation {
            log::trace!("Click on {} ignored: {} still pending", id, pending);
            return ActivationOutcome::Ignored;
        }
        if self.state.phase() != Phase::InProgress {
            log::trace!("Click on {} ignored: no markers in play", id);
            return ActivationOutcome::Ignored;
        }

        if id == self.state.expected_next {
            self.state.pending_activation = Some(id);
            log::debug!("Marker {} accepted", id);
            ActivationOutcome::ScheduleRemoval {
                ticket: ActivationTicket {
                    id,
                    generation: self.generation,
                },
                delay: self.animation_duration,
            }
        } else {
            self.state.game_over = true;
            self.state.timer_active = false;
            log::info!(
                "Game over: clicked {} expecting {} after {:.1}s",
                id,
                self.state.expected_next,
                self.state.elapsed
            );
            ActivationOutcome::GameOver
        }
    }

    /// Finish a click accepted by `activate`.
    ///
    /// Returns false (and changes nothing) when the ticket does not match the
    /// pending click of the current session.
    pub fn resolve_activation(&mut self, ticket: ActivationTicket) -> bool {
        if ticket.generation != self.generation {
            log::debug!(
                "Stale removal of {} from session {} dropped",
                ticket.id,
                ticket.generation
            );
            return false;
        }
        if self.state.pending_activation != Some(ticket.id) {
            log::debug!("Removal of {} does not match pending click", ticket.id);
            return false;
        }

        self.state.markers.retain(|m| m.id != ticket.id);
        self.state.expected_next += 1;
        self.state.pending_activation = None;

        if self.state.markers.is_empty() {
            self.state.timer_active = false;
            log::info!(
                "All {} markers cleared in {:.1}s",
                self.state.marker_count,
                self.state.elapsed
            );
        }
        true
    }

    /// Advance the session clock by `dt` seconds
    pub fn tick(&mut self, dt: f64) {
        if !self.state.timer_active {
            return;
        }
        if !dt.is_finite() || dt < 0.0 {
            log::debug!("Ignoring tick of {}", dt);
            return;
        }
        self.state.elapsed += dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::DisplayStatus;

    fn ids(session: &Session) -> Vec<u32> {
        let mut ids: Vec<u32> = session.state().markers.iter().map(|m| m.id).collect();
        ids.sort_unstable();
        ids
    }

    fn click_and_resolve(session: &mut Session, id: u32) {
        match session.activate(id) {
            ActivationOutcome::ScheduleRemoval { ticket, .. } => {
                assert!(session.resolve_activation(ticket));
            }
            other => panic!("expected removal for {}, got {:?}", id, other),
        }
    }

    #[test]
    fn test_scenario_wrong_click_after_one() {
        let mut session = Session::new(12345);
        session.start(3);
        assert_eq!(ids(&session), vec![1, 2, 3]);
        assert_eq!(session.state().expected_next, 1);

        let outcome = session.activate(1);
        assert_eq!(session.state().pending_activation, Some(1));
        let ActivationOutcome::ScheduleRemoval { ticket, delay } = outcome else {
            panic!("expected removal, got {:?}", outcome);
        };
        assert!((delay - ANIMATION_DURATION).abs() < 1e-12);

        assert!(session.resolve_activation(ticket));
        assert_eq!(ids(&session), vec![2, 3]);
        assert_eq!(session.state().expected_next, 2);

        assert_eq!(session.activate(3), ActivationOutcome::GameOver);
        assert!(session.state().game_over);
        assert!(!session.state().timer_active);
        assert_eq!(session.state().status(), DisplayStatus::GameOver);
    }

    #[test]
    fn test_scenario_start_zero() {
        let mut session = Session::new(1);
        session.start(0);
        assert!(session.state().markers.is_empty());
        assert_eq!(session.phase(), Phase::Cleared);
        assert!(!session.state().timer_active);
        assert_eq!(session.activate(1), ActivationOutcome::Ignored);
    }

    #[test]
    fn test_idle_ignores_clicks_and_ticks() {
        let mut session = Session::new(1);
        assert_eq!(session.activate(1), ActivationOutcome::Ignored);
        session.tick(1.0);
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.state().elapsed, 0.0);
    }

    #[test]
    fn test_clear_all_in_order() {
        let mut session = Session::new(5);
        session.start(4);
        for id in 1..=4 {
            session.tick(0.1);
            click_and_resolve(&mut session, id);
        }
        assert_eq!(session.phase(), Phase::Cleared);
        assert!(!session.state().game_over);
        assert!(!session.state().timer_active);
        assert_eq!(session.state().expected_next, 5);

        let elapsed = session.state().elapsed;
        session.tick(1.0);
        assert_eq!(session.state().elapsed, elapsed);
    }

    #[test]
    fn test_out_of_range_click_is_game_over() {
        let mut session = Session::new(5);
        session.start(3);
        assert_eq!(session.activate(99), ActivationOutcome::GameOver);
        assert_eq!(session.phase(), Phase::GameOver);
    }

    #[test]
    fn test_click_while_pending_is_ignored() {
        let mut session = Session::new(5);
        session.start(3);
        assert!(matches!(
            session.activate(1),
            ActivationOutcome::ScheduleRemoval { .. }
        ));
        // Even a wrong id is dropped while the first click is in flight
        assert_eq!(session.activate(3), ActivationOutcome::Ignored);
        assert!(!session.state().game_over);
        assert!(session.state().is_flashing(1));
    }

    #[test]
    fn test_game_over_ignores_further_clicks() {
        let mut session = Session::new(5);
        session.start(3);
        session.activate(2);
        let before = session.state().clone();
        assert_eq!(session.activate(1), ActivationOutcome::Ignored);
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_mismatched_resolve_is_noop() {
        let mut session = Session::new(5);
        session.start(3);
        let before = session.state().clone();
        let bogus = ActivationTicket {
            id: 1,
            generation: session.generation(),
        };
        assert!(!session.resolve_activation(bogus));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_stale_ticket_after_restart() {
        let mut session = Session::new(5);
        session.start(3);
        let ActivationOutcome::ScheduleRemoval { ticket: old, .. } = session.activate(1) else {
            panic!("expected removal");
        };

        session.start(3);
        assert_eq!(session.state().pending_activation, None);
        // Click 1 again in the new session, then let the old callback fire
        assert!(matches!(
            session.activate(1),
            ActivationOutcome::ScheduleRemoval { .. }
        ));
        assert!(!session.resolve_activation(old));
        assert_eq!(session.state().pending_activation, Some(1));
        assert_eq!(session.state().markers.len(), 3);
    }

    #[test]
    fn test_negative_tick_ignored() {
        let mut session = Session::new(5);
        session.start(3);
        session.tick(0.5);
        session.tick(-1.0);
        session.tick(f64::NAN);
        assert!((session.state().elapsed - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut session = Session::new(5);
        session.start(3);
        session.tick(2.0);
        session.activate(3);
        session.start(5);
        let state = session.state();
        assert_eq!(state.expected_next, 1);
        assert_eq!(state.elapsed, 0.0);
        assert!(!state.game_over);
        assert!(state.timer_active);
        assert_eq!(ids(&session), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_oversized_start_is_clamped() {
        let mut session = Session::new(5);
        session.start(u32::MAX);
        assert_eq!(session.state().markers.len() as u32, MAX_MARKER_COUNT);
        assert_eq!(session.state().marker_count, MAX_MARKER_COUNT);
        assert!(session.state().timer_active);
    }

    #[test]
    fn test_custom_animation_duration() {
        let mut session = Session::new(5).with_animation_duration(1.5);
        session.start(2);
        let ActivationOutcome::ScheduleRemoval { delay, .. } = session.activate(1) else {
            panic!("expected removal");
        };
        assert!((delay - 1.5).abs() < 1e-12);
    }
}
