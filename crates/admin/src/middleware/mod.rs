//! HTTP middleware for admin.
//!
//! - `auth` - session-backed authentication extractors
//! - `session` - tower-sessions layer (in-memory store, SameSite=Strict)

pub mod auth;
pub mod session;

pub use auth::{
    LOGIN_PATH, OptionalAdminAuth, RequireAdminAuth, clear_current_admin, current_admin,
    set_current_admin,
};
pub use session::create_session_layer;
