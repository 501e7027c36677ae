use super::models::LogLevel;

pub(crate) fn default_font_size() -> u32 {
    18
}

pub(crate) fn default_line_spacing() -> f32 {
    1.4
}

pub(crate) fn default_window_width() -> f32 {
    1280.0
}

pub(crate) fn default_window_height() -> f32 {
    860.0
}

pub(crate) fn default_center_offset_fraction() -> f32 {
    crate::tracker::DEFAULT_CENTER_OFFSET_FRACTION
}

pub(crate) fn default_nav_header_height() -> f32 {
    crate::tracker::DEFAULT_NAV_HEADER_HEIGHT
}

pub(crate) fn default_back_to_top_threshold() -> f32 {
    crate::tracker::DEFAULT_BACK_TO_TOP_THRESHOLD
}

pub(crate) fn default_smooth_scroll_speed() -> f32 {
    0.25
}

pub(crate) fn default_feed_url() -> String {
    "https://api.rss2json.com/v1/api.json?rss_url=https%3A%2F%2Fmedium.com%2Ffeed%2F%40example"
        .to_string()
}

pub(crate) fn default_max_articles() -> usize {
    crate::feed::DEFAULT_MAX_ARTICLES
}

pub(crate) fn default_excerpt_chars() -> usize {
    crate::feed::DEFAULT_EXCERPT_CHARS
}

pub(crate) fn default_feed_timeout_secs() -> u64 {
    10
}

pub(crate) fn default_content_path() -> String {
    "conf/content.toml".to_string()
}

pub(crate) fn default_log_level() -> LogLevel {
    LogLevel::Debug
}
