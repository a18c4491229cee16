/// Database layer
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with health check
/// - `migrations`: embedded schema migrations
///
/// Records and their queries live in [`crate::models`].

pub mod migrations;
pub mod pool;
