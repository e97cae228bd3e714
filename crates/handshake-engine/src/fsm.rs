//! Session lifecycle state machine using rust-fsm.
//!
//! ```text
//! ┌───────────────┐
//! │ Uninitialized │ (initial)
//! └───────┬───────┘
//!         │ SessionAdopted / NoSession
//!         ▼
//! ┌───────────────┐  SessionAdopted   ┌───────────────┐
//! │   Anonymous   │ ────────────────► │ Authenticated │
//! └───────────────┘ ◄──────────────── └───────────────┘
//!                    SessionInvalidated / LoggedOut
//! ```

use rust_fsm::*;
use serde::{Deserialize, Serialize};

// Generates a module `session_lifecycle` with State, Input and StateMachine.
state_machine! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub session_lifecycle(Uninitialized)

    Uninitialized => {
        SessionAdopted => Authenticated,
        NoSession => Anonymous
    },
    Anonymous => {
        SessionAdopted => Authenticated,
        NoSession => Anonymous
    },
    Authenticated => {
        SessionInvalidated => Anonymous,
        LoggedOut => Anonymous
    }
}

pub use session_lifecycle::Input as SessionInput;
pub use session_lifecycle::State as SessionState;
pub use session_lifecycle::StateMachine as SessionMachine;

/// Observable lifecycle phase, the external view of the machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Bootstrap has not run yet.
    Uninitialized,
    /// A stored session token was adopted as the current identity.
    Authenticated,
    /// No usable session; a login redirect is required to authenticate.
    Anonymous,
}

impl SessionPhase {
    /// Returns true when a session identity is currently held.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionPhase::Authenticated)
    }
}

impl From<&SessionState> for SessionPhase {
    fn from(state: &SessionState) -> Self {
        match state {
            SessionState::Uninitialized => SessionPhase::Uninitialized,
            SessionState::Authenticated => SessionPhase::Authenticated,
            SessionState::Anonymous => SessionPhase::Anonymous,
        }
    }
}
