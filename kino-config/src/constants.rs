//! Defaults and environment variable names.

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8002";

pub const ENV_SERVER_URL: &str = "KINO_SERVER_URL";
pub const ENV_DATA_DIR: &str = "KINO_DATA_DIR";
pub const ENV_PLAYER_CONFIG_PATH: &str = "KINO_PLAYER_CONFIG_PATH";
pub const ENV_PLAYER_CONFIG_JSON: &str = "KINO_PLAYER_CONFIG_JSON";
pub const ENV_AUTOPLAY: &str = "KINO_AUTOPLAY";

pub mod player {
    pub const PROGRESS_INTERVAL_MS: u64 = 1_000;
    pub const SAVE_DEBOUNCE_MS: u64 = 2_000;
    pub const SAVE_MIN_DELTA_SECS: f64 = 5.0;
    pub const SKIP_STEP_SECS: f64 = 10.0;
    pub const SKIP_INDICATOR_MS: u64 = 600;
    pub const VOLUME_STEP: f64 = 0.1;
    pub const CONTROLS_HIDE_MS: u64 = 3_000;
    pub const RESUME_CEILING_PERCENT: f64 = 95.0;
}
