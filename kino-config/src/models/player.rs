use anyhow::{Context, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::constants::{
    ENV_PLAYER_CONFIG_JSON, ENV_PLAYER_CONFIG_PATH, player as defaults,
};

/// Source that produced the player configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlayerConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// Tunables of the playback session controller.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Interval (ms) at which the media element reports the playhead.
    pub progress_interval_ms: u64,
    /// Quiet period (ms) after the last playhead report before a progress
    /// save is attempted. Every new report restarts the wait.
    pub save_debounce_ms: u64,
    /// Minimum playhead movement (seconds) since the last accepted save for
    /// a new save to go out.
    pub save_min_delta_secs: f64,
    /// Distance covered by one skip command.
    pub skip_step_secs: f64,
    /// Lifetime (ms) of the on-screen skip indicator.
    pub skip_indicator_ms: u64,
    /// Volume change per arrow key press.
    pub volume_step: f64,
    /// Idle time (ms) after which controls hide while playing.
    pub controls_hide_ms: u64,
    /// Stored progress at or above this percentage starts over from zero.
    pub resume_ceiling_percent: f64,
    /// Start playing as soon as metadata is ready.
    pub autoplay: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            progress_interval_ms: defaults::PROGRESS_INTERVAL_MS,
            save_debounce_ms: defaults::SAVE_DEBOUNCE_MS,
            save_min_delta_secs: defaults::SAVE_MIN_DELTA_SECS,
            skip_step_secs: defaults::SKIP_STEP_SECS,
            skip_indicator_ms: defaults::SKIP_INDICATOR_MS,
            volume_step: defaults::VOLUME_STEP,
            controls_hide_ms: defaults::CONTROLS_HIDE_MS,
            resume_ceiling_percent: defaults::RESUME_CEILING_PERCENT,
            autoplay: false,
        }
    }
}

impl PlayerConfig {
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }

    pub fn skip_indicator_ttl(&self) -> Duration {
        Duration::from_millis(self.skip_indicator_ms)
    }

    pub fn controls_hide_after(&self) -> Duration {
        Duration::from_millis(self.controls_hide_ms)
    }

    /// Reject values that would stall or spin the controller.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.progress_interval_ms == 0 {
            bail!("progress_interval_ms must be greater than zero");
        }
        if self.save_debounce_ms == 0 {
            bail!("save_debounce_ms must be greater than zero");
        }
        if self.skip_indicator_ms == 0 {
            bail!("skip_indicator_ms must be greater than zero");
        }
        if self.controls_hide_ms == 0 {
            bail!("controls_hide_ms must be greater than zero");
        }
        if !(self.save_min_delta_secs >= 0.0) {
            bail!("save_min_delta_secs must be zero or positive");
        }
        if !(self.skip_step_secs > 0.0) {
            bail!("skip_step_secs must be positive");
        }
        if !(self.volume_step > 0.0 && self.volume_step <= 1.0) {
            bail!("volume_step must be within (0, 1]");
        }
        if !(self.resume_ceiling_percent > 0.0
            && self.resume_ceiling_percent <= 100.0)
        {
            bail!("resume_ceiling_percent must be within (0, 100]");
        }
        Ok(())
    }

    /// Load player configuration overrides using environment variables.
    /// Evaluation order:
    /// 1) `$KINO_PLAYER_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$KINO_PLAYER_CONFIG_JSON` (inline JSON),
    /// 3) the first default file found in the working directory,
    /// 4) defaults if none of the above is present.
    pub fn load_from_env() -> anyhow::Result<(Self, PlayerConfigSource)> {
        if let Ok(path_str) = env::var(ENV_PLAYER_CONFIG_PATH)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            return Ok((config, PlayerConfigSource::EnvPath(path)));
        }

        if let Ok(raw) = env::var(ENV_PLAYER_CONFIG_JSON)
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw).with_context(|| {
                format!("failed to parse {ENV_PLAYER_CONFIG_JSON}")
            })?;
            return Ok((parsed, PlayerConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file() {
            let config = Self::load_from_file(&path)?;
            return Ok((config, PlayerConfigSource::File(path)));
        }

        Ok((Self::default(), PlayerConfigSource::Default))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read player config from {}", path.display())
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents).with_context(|| {
                format!("invalid player config {}", path.display())
            }),
            Some("toml") | Some("tml") => {
                toml::from_str(&contents).map_err(|err| {
                    anyhow!(
                        "invalid player config {}: {}",
                        path.display(),
                        err
                    )
                })
            }
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    pub fn parse_from_str(
        contents: &str,
        origin: &str,
    ) -> anyhow::Result<Self> {
        // Try TOML first, then JSON for convenience.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse player config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw)
            .map_err(|err| anyhow!("invalid player config json: {err}"))
    }

    fn find_default_file() -> Option<PathBuf> {
        const CANDIDATES: &[&str] = &[
            "player.toml",
            "player.json",
            "config/player.toml",
            "config/player.json",
        ];

        CANDIDATES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(|path| path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_watch_page_timings() {
        let config = PlayerConfig::default();
        assert_eq!(config.progress_interval(), Duration::from_secs(1));
        assert_eq!(config.save_debounce(), Duration::from_secs(2));
        assert_eq!(config.skip_indicator_ttl(), Duration::from_millis(600));
        assert_eq!(config.save_min_delta_secs, 5.0);
        assert!(!config.autoplay);
        config.validate().unwrap();
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config = PlayerConfig::parse_from_str(
            "save_debounce_ms = 500\nautoplay = true\n",
            "inline",
        )
        .unwrap();
        assert_eq!(config.save_debounce_ms, 500);
        assert!(config.autoplay);
        assert_eq!(config.skip_step_secs, defaults::SKIP_STEP_SECS);
    }

    #[test]
    fn falls_back_to_json_when_toml_fails() {
        let config =
            PlayerConfig::parse_from_str(r#"{"volume_step": 0.05}"#, "inline")
                .unwrap();
        assert_eq!(config.volume_step, 0.05);
    }

    #[test]
    fn validate_rejects_zero_debounce_window() {
        let config = PlayerConfig {
            save_debounce_ms: 0,
            ..PlayerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("save_debounce_ms"));
    }

    #[test]
    fn validate_rejects_zero_overlay_timers() {
        let config = PlayerConfig {
            skip_indicator_ms: 0,
            ..PlayerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("skip_indicator_ms"));

        let config = PlayerConfig {
            controls_hide_ms: 0,
            ..PlayerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("controls_hide_ms"));
    }
}
