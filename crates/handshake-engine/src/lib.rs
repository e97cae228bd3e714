//! Redirect-based auth handshake client.
//!
//! This crate provides:
//! - The redirect handler that consumes one-time exchange credentials from
//!   the page URL and trades them for a durable session token
//! - The bootstrap sequence (`init_auth`) with an explicit session
//!   lifecycle state machine
//! - The session guard that probes token validity after suspicious
//!   transport closes and forces a fresh login when the token is rejected
//! - Login redirect and method-override logout navigation
//!
//! All trust decisions are the backend's; this client only orchestrates
//! redirects and local storage.

mod client;
mod config;
mod engine;
mod error;
mod fsm;
mod guard;
mod navigate;
mod redirect;

pub use client::BackendClient;
pub use config::{BackendConfig, DEFAULT_BACKEND_URL};
pub use engine::{AuthEngine, Bootstrap, LogoutOptions, UserQuery};
pub use error::{AuthError, AuthResult};
pub use fsm::{SessionInput, SessionMachine, SessionPhase, SessionState};
pub use guard::{LivenessWatcher, TransportClose};
pub use navigate::{FormSubmission, Navigator};
pub use redirect::ExchangeCredentials;
