/// Middleware modules for the API server
///
/// Authentication middleware lives in `pawminder_shared::auth::middleware`;
/// this crate only adds response hardening.

pub mod security;
