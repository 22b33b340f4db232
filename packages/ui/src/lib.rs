//! This crate contains all shared UI for the workspace.

pub mod components;
pub mod format;

mod submit;
pub use submit::claim_submit;

mod storage;
pub use storage::{make_source, make_token_store};

mod auth;
pub use auth::{sign_in, sign_out, use_auth, use_source, AuthProvider, LogoutButton};

mod sidebar;
pub use sidebar::{AppSidebar, NavItem};
