use super::defaults;
use super::models::{AppConfig, LogLevel, ThemeMode};
use serde::Deserialize;

/// On-disk layout of `config.toml`: one table per concern.
#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    window: WindowConfig,
    #[serde(default)]
    tracker: TrackerConfig,
    #[serde(default)]
    feed: FeedConfig,
    #[serde(default)]
    content: ContentConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            theme: tables.appearance.theme,
            font_size: tables.appearance.font_size,
            line_spacing: tables.appearance.line_spacing,
            window_width: tables.window.width,
            window_height: tables.window.height,
            center_offset_fraction: tables.tracker.center_offset_fraction,
            nav_header_height: tables.tracker.nav_header_height,
            back_to_top_threshold: tables.tracker.back_to_top_threshold,
            smooth_scroll_speed: tables.tracker.smooth_scroll_speed,
            feed_url: tables.feed.url,
            max_articles: tables.feed.max_articles,
            excerpt_chars: tables.feed.excerpt_chars,
            feed_timeout_secs: tables.feed.timeout_secs,
            content_path: tables.content.path,
            log_level: tables.logging.log_level,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            appearance: AppearanceConfig {
                theme: config.theme,
                font_size: config.font_size,
                line_spacing: config.line_spacing,
            },
            window: WindowConfig {
                width: config.window_width,
                height: config.window_height,
            },
            tracker: TrackerConfig {
                center_offset_fraction: config.center_offset_fraction,
                nav_header_height: config.nav_header_height,
                back_to_top_threshold: config.back_to_top_threshold,
                smooth_scroll_speed: config.smooth_scroll_speed,
            },
            feed: FeedConfig {
                url: config.feed_url.clone(),
                max_articles: config.max_articles,
                excerpt_chars: config.excerpt_chars,
                timeout_secs: config.feed_timeout_secs,
            },
            content: ContentConfig {
                path: config.content_path.clone(),
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AppearanceConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default = "defaults::default_font_size")]
    font_size: u32,
    #[serde(default = "defaults::default_line_spacing")]
    line_spacing: f32,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            theme: ThemeMode::default(),
            font_size: defaults::default_font_size(),
            line_spacing: defaults::default_line_spacing(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct WindowConfig {
    #[serde(default = "defaults::default_window_width")]
    width: f32,
    #[serde(default = "defaults::default_window_height")]
    height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: defaults::default_window_width(),
            height: defaults::default_window_height(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct TrackerConfig {
    #[serde(default = "defaults::default_center_offset_fraction")]
    center_offset_fraction: f32,
    #[serde(default = "defaults::default_nav_header_height")]
    nav_header_height: f32,
    #[serde(default = "defaults::default_back_to_top_threshold")]
    back_to_top_threshold: f32,
    #[serde(default = "defaults::default_smooth_scroll_speed")]
    smooth_scroll_speed: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            center_offset_fraction: defaults::default_center_offset_fraction(),
            nav_header_height: defaults::default_nav_header_height(),
            back_to_top_threshold: defaults::default_back_to_top_threshold(),
            smooth_scroll_speed: defaults::default_smooth_scroll_speed(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct FeedConfig {
    #[serde(default = "defaults::default_feed_url")]
    url: String,
    #[serde(default = "defaults::default_max_articles")]
    max_articles: usize,
    #[serde(default = "defaults::default_excerpt_chars")]
    excerpt_chars: usize,
    #[serde(default = "defaults::default_feed_timeout_secs")]
    timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            url: defaults::default_feed_url(),
            max_articles: defaults::default_max_articles(),
            excerpt_chars: defaults::default_excerpt_chars(),
            timeout_secs: defaults::default_feed_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ContentConfig {
    #[serde(default = "defaults::default_content_path")]
    path: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        ContentConfig {
            path: defaults::default_content_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}
