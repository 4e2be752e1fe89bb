//! Deterministic game core
//!
//! All gameplay rules live here. This module must stay pure:
//! - No clocks or scheduled callbacks (the driver supplies time)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod layout;
pub mod session;
pub mod state;

pub use layout::{Marker, generate};
pub use session::Session;
pub use state::{ActivationOutcome, ActivationTicket, DisplayStatus, Phase, SessionState};
