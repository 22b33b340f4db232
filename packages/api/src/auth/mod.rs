//! Session lifecycle: restoring a session at startup, login, logout and local
//! profile updates.
//!
//! [`AuthState`] holds the pure state machine. The free functions here drive a
//! [`DataSource`](crate::source::DataSource) and report what the state should
//! become; [`AuthStore`] combines both for non-UI callers, and the UI provider
//! does the same through a signal.

mod session;
mod store;

pub use session::AuthState;
pub use store::{login, logout, restore_session, AuthStore};
