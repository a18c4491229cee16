/// API route handlers
///
/// - `health`: Health check endpoint
/// - `auth`: Register, login and token echo
/// - `pets` / `reminders`: Minimal API
/// - `rest`: Hosted-store collection surface under `/rest/v1`

pub mod auth;
pub mod health;
pub mod pets;
pub mod reminders;
pub mod rest;
