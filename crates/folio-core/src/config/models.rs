use serde::Deserialize;

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "crate::config::defaults::default_font_size")]
    pub font_size: u32,
    #[serde(default = "crate::config::defaults::default_line_spacing")]
    pub line_spacing: f32,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default = "crate::config::defaults::default_center_offset_fraction")]
    pub center_offset_fraction: f32,
    #[serde(default = "crate::config::defaults::default_nav_header_height")]
    pub nav_header_height: f32,
    #[serde(default = "crate::config::defaults::default_back_to_top_threshold")]
    pub back_to_top_threshold: f32,
    #[serde(default = "crate::config::defaults::default_smooth_scroll_speed")]
    pub smooth_scroll_speed: f32,
    #[serde(default = "crate::config::defaults::default_feed_url")]
    pub feed_url: String,
    #[serde(default = "crate::config::defaults::default_max_articles")]
    pub max_articles: usize,
    #[serde(default = "crate::config::defaults::default_excerpt_chars")]
    pub excerpt_chars: usize,
    #[serde(default = "crate::config::defaults::default_feed_timeout_secs")]
    pub feed_timeout_secs: u64,
    #[serde(default = "crate::config::defaults::default_content_path")]
    pub content_path: String,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            theme: ThemeMode::Night,
            font_size: crate::config::defaults::default_font_size(),
            line_spacing: crate::config::defaults::default_line_spacing(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            center_offset_fraction: crate::config::defaults::default_center_offset_fraction(),
            nav_header_height: crate::config::defaults::default_nav_header_height(),
            back_to_top_threshold: crate::config::defaults::default_back_to_top_threshold(),
            smooth_scroll_speed: crate::config::defaults::default_smooth_scroll_speed(),
            feed_url: crate::config::defaults::default_feed_url(),
            max_articles: crate::config::defaults::default_max_articles(),
            excerpt_chars: crate::config::defaults::default_excerpt_chars(),
            feed_timeout_secs: crate::config::defaults::default_feed_timeout_secs(),
            content_path: crate::config::defaults::default_content_path(),
            log_level: crate::config::defaults::default_log_level(),
        }
    }
}

impl AppConfig {
    /// Pull out-of-range values back into something the UI can render.
    pub fn clamp(&mut self) {
        self.font_size = self.font_size.clamp(10, 40);
        if !self.line_spacing.is_finite() {
            self.line_spacing = crate::config::defaults::default_line_spacing();
        }
        self.line_spacing = self.line_spacing.clamp(0.8, 3.0);
        if !self.window_width.is_finite() || self.window_width < 320.0 {
            self.window_width = crate::config::defaults::default_window_width();
        }
        if !self.window_height.is_finite() || self.window_height < 240.0 {
            self.window_height = crate::config::defaults::default_window_height();
        }
        if !self.center_offset_fraction.is_finite() {
            self.center_offset_fraction = crate::config::defaults::default_center_offset_fraction();
        }
        self.center_offset_fraction = self.center_offset_fraction.clamp(0.0, 1.0);
        if !self.nav_header_height.is_finite() {
            self.nav_header_height = crate::config::defaults::default_nav_header_height();
        }
        self.nav_header_height = self.nav_header_height.max(0.0);
        if !self.smooth_scroll_speed.is_finite() {
            self.smooth_scroll_speed = crate::config::defaults::default_smooth_scroll_speed();
        }
        self.smooth_scroll_speed = self.smooth_scroll_speed.clamp(0.05, 0.95);
        self.max_articles = self.max_articles.clamp(1, 50);
        self.excerpt_chars = self.excerpt_chars.max(1);
        self.feed_timeout_secs = self.feed_timeout_secs.clamp(1, 120);
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Default, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Day,
    #[default]
    Night,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Day => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Day,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Default, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
