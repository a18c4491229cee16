/// Client configuration
///
/// Read from `PAWMINDER_*` environment variables (after loading `.env` if
/// present) through the `config` crate.
///
/// | Variable | Field | Default |
/// |---|---|---|
/// | `PAWMINDER_URL` | `url` | required |
/// | `PAWMINDER_PUBLIC_KEY` | `public_key` | required |
/// | `PAWMINDER_USER_ID` | `user_id` | none (all pets, unowned inserts) |
/// | `PAWMINDER_TIMEOUT_SECS` | `timeout_secs` | 10 |

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use uuid::Uuid;

/// Client settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Server base URL, e.g. `http://localhost:5000`
    pub url: String,

    /// Value sent in the `apikey` header
    pub public_key: String,

    /// Owner stamped on new pets and used to filter the pet list
    #[serde(default)]
    pub user_id: Option<Uuid>,

    /// Per-request timeout
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(Environment::with_prefix("PAWMINDER"))
    }

    fn from_source(source: Environment) -> Result<Self, ConfigError> {
        let config: ClientConfig = Config::builder()
            .set_default("timeout_secs", 10)?
            .add_source(source)
            .build()?
            .try_deserialize()?;

        if config.url.trim().is_empty() {
            return Err(ConfigError::Message("PAWMINDER_URL must not be empty".to_string()));
        }

        Ok(config)
    }
}
