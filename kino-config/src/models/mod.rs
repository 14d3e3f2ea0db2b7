pub mod player;

use anyhow::Context;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_SERVER_URL, ENV_AUTOPLAY, ENV_DATA_DIR, ENV_SERVER_URL,
};
use crate::util::{non_empty_var, normalize_base_url, parse_bool_var};
use player::{PlayerConfig, PlayerConfigSource};

/// Everything the watch client needs to start.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Normalized base URL of the catalog/progress server.
    pub server_url: String,
    /// Override for the session storage directory. `None` uses the platform
    /// data directory.
    pub data_dir: Option<PathBuf>,
    pub player: PlayerConfig,
    pub player_source: PlayerConfigSource,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            data_dir: None,
            player: PlayerConfig::default(),
            player_source: PlayerConfigSource::Default,
        }
    }
}

impl ClientConfig {
    /// Load `.env` (if present), then environment overrides, then the player
    /// tunables. The result is validated before it is returned.
    pub fn load() -> anyhow::Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded environment from {}", path.display()),
            Err(err) if err.not_found() => {}
            Err(err) => log::warn!("Ignoring unreadable .env file: {err}"),
        }

        let (mut player, player_source) = PlayerConfig::load_from_env()
            .context("failed to load player configuration")?;
        if let Some(autoplay) = parse_bool_var(ENV_AUTOPLAY) {
            player.autoplay = autoplay;
        }

        let config = Self {
            server_url: Self::server_url_from_env(),
            data_dir: non_empty_var(ENV_DATA_DIR).map(PathBuf::from),
            player,
            player_source,
        };
        config.validate()?;

        log::debug!(
            "Client config loaded: server={} player_source={:?}",
            config.server_url,
            config.player_source
        );
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        url::Url::parse(&self.server_url).with_context(|| {
            format!("invalid server url {:?}", self.server_url)
        })?;
        self.player.validate()
    }

    /// Replace the server URL, normalizing it the same way env values are.
    pub fn with_server_url(mut self, raw: &str) -> anyhow::Result<Self> {
        self.server_url = normalize_base_url(raw);
        self.validate()?;
        Ok(self)
    }

    fn server_url_from_env() -> String {
        let Some(raw) = non_empty_var(ENV_SERVER_URL) else {
            return DEFAULT_SERVER_URL.to_string();
        };
        let normalized = normalize_base_url(&raw);
        if normalized != raw {
            log::warn!(
                "Normalized {ENV_SERVER_URL} from '{}' to '{}'",
                raw,
                normalized
            );
        }
        normalized
    }
}
