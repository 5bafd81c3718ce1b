//! Configuration types for the site core.
//!
//! Every field has a default that reproduces the live site, so a config
//! file is optional and may set only the fields it cares about.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use etya_search::SearchConfig;

/// Top-level site configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Search behaviour.
    pub search: SearchSettings,
    /// Layout and station identity.
    pub site: SiteSettings,
    /// Simulated player text and timing.
    pub player: PlayerSettings,
}

/// What to show when the web lookup fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Show only the "temporarily unavailable" card, dropping local matches.
    #[default]
    SuppressLocal,
    /// Show local matches when there are any, the unavailable card otherwise.
    KeepLocal,
}

/// Search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Instant-answer API base URL.
    pub endpoint: String,
    /// Keyword appended to web queries.
    pub query_suffix: String,
    /// Web request timeout in seconds.
    pub timeout_seconds: u64,
    /// Maximum related-topic records per query.
    pub max_related_topics: usize,
    /// Character limit for web excerpts before the ellipsis.
    pub excerpt_chars: usize,
    /// Character limit for web titles without a `" - "` separator.
    pub title_chars: usize,
    /// Minimum spacing between web requests in milliseconds.
    pub min_request_interval_ms: u64,
    /// Custom User-Agent (None = crate default).
    pub user_agent: Option<String>,
    /// Behaviour on web lookup failure.
    pub failure_policy: FailurePolicy,
}

impl Default for SearchSettings {
    fn default() -> Self {
        let base = SearchConfig::default();
        Self {
            endpoint: base.endpoint,
            query_suffix: base.query_suffix,
            timeout_seconds: base.timeout_seconds,
            max_related_topics: base.max_related_topics,
            excerpt_chars: base.excerpt_chars,
            title_chars: base.title_chars,
            min_request_interval_ms: base.min_request_interval_ms,
            user_agent: base.user_agent,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl SearchSettings {
    /// Lower these settings into the search crate's configuration.
    pub fn to_search_config(&self) -> SearchConfig {
        SearchConfig {
            endpoint: self.endpoint.clone(),
            query_suffix: self.query_suffix.clone(),
            timeout_seconds: self.timeout_seconds,
            max_related_topics: self.max_related_topics,
            excerpt_chars: self.excerpt_chars,
            title_chars: self.title_chars,
            min_request_interval_ms: self.min_request_interval_ms,
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Layout and station identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Page highlighted when the location path is empty.
    pub home_page: String,
    /// Navigation link targets in display order.
    pub nav_links: Vec<String>,
    /// Viewport width (px) at or below which the mobile menu applies.
    pub mobile_breakpoint: u32,
    /// Station name shown by the player.
    pub station_name: String,
    /// Frequency text shown in every frequency label.
    pub frequency: String,
    /// Delay step between content card reveals, in milliseconds.
    pub card_reveal_step_ms: u64,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            home_page: "index.html".to_owned(),
            nav_links: [
                "index.html",
                "news.html",
                "sports.html",
                "business.html",
                "politics.html",
            ]
            .map(String::from)
            .to_vec(),
            mobile_breakpoint: 768,
            station_name: "Etya Radio".to_owned(),
            frequency: "100.3 FM".to_owned(),
            card_reveal_step_ms: 100,
        }
    }
}

/// Simulated player settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Delay before the live button auto-starts the player, in milliseconds.
    pub autoplay_delay_ms: u64,
    /// Programme shown as now playing.
    pub programme: String,
    /// Presenter name.
    pub host: String,
    /// Stream quality label.
    pub stream_quality: String,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            autoplay_delay_ms: 500,
            programme: "Eriogi Ria Omogusii - Morning Show".to_owned(),
            host: "Radio Presenter".to_owned(),
            stream_quality: "Good".to_owned(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// search settings are invalid.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::error::SiteError::Config(e.to_string()))?;
        config.search.to_search_config().validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SiteError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/etya/config.toml`.
    pub fn default_config_path() -> PathBuf {
        match dirs::config_dir() {
            Some(dir) => dir.join("etya").join("config.toml"),
            None => PathBuf::from("/tmp/etya/config.toml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_live_site() {
        let config = SiteConfig::default();
        assert_eq!(config.site.home_page, "index.html");
        assert_eq!(config.site.mobile_breakpoint, 768);
        assert_eq!(config.site.frequency, "100.3 FM");
        assert_eq!(config.player.autoplay_delay_ms, 500);
        assert_eq!(config.search.failure_policy, FailurePolicy::SuppressLocal);
        assert!(config.search.to_search_config().validate().is_ok());
    }

    #[test]
    fn search_settings_lower_into_search_config() {
        let settings = SearchSettings {
            timeout_seconds: 9,
            query_suffix: " radio".into(),
            ..Default::default()
        };
        let config = settings.to_search_config();
        assert_eq!(config.timeout_seconds, 9);
        assert_eq!(config.query_suffix, " radio");
        assert_eq!(config.excerpt_chars, 150);
        assert_eq!(config.title_chars, 60);
    }

    #[test]
    fn toml_sets_web_text_limits() {
        let config: SiteConfig = toml::from_str(
            r#"
            [search]
            excerpt_chars = 80
            title_chars = 40
            "#,
        )
        .expect("parse");
        let search = config.search.to_search_config();
        assert_eq!(search.excerpt_chars, 80);
        assert_eq!(search.title_chars, 40);
        assert_eq!(search.max_related_topics, 3);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: SiteConfig = toml::from_str(
            r#"
            [search]
            failure_policy = "keep_local"

            [site]
            frequency = "98.1 FM"
            "#,
        )
        .expect("parse");
        assert_eq!(config.search.failure_policy, FailurePolicy::KeepLocal);
        assert_eq!(config.search.timeout_seconds, 5);
        assert_eq!(config.site.frequency, "98.1 FM");
        assert_eq!(config.site.station_name, "Etya Radio");
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut config = SiteConfig::default();
        config.site.mobile_breakpoint = 640;
        config.player.host = "DJ Moraa".into();

        config.save_to_file(&path).expect("save");
        let loaded = SiteConfig::from_file(&path).expect("load");
        assert_eq!(loaded.site.mobile_breakpoint, 640);
        assert_eq!(loaded.player.host, "DJ Moraa");
    }

    #[test]
    fn from_file_nonexistent_returns_error() {
        let result = SiteConfig::from_file(std::path::Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn from_file_invalid_toml_returns_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").expect("write");
        assert!(SiteConfig::from_file(&path).is_err());
    }

    #[test]
    fn from_file_rejects_invalid_search_settings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("zero.toml");
        std::fs::write(&path, "[search]\ntimeout_seconds = 0\n").expect("write");
        let err = SiteConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn default_config_path_ends_with_etya() {
        let path = SiteConfig::default_config_path();
        assert!(path.ends_with("etya/config.toml"));
    }
}
