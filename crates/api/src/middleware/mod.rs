//! Request middleware.
//!
//! - [`session::require_session`] -- gate for `/api/*` routes (401 JSON).
//! - [`session::require_session_page`] -- gate for HTML pages (redirect to `/login`).

pub mod session;
