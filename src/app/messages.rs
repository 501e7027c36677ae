use folio_core::feed::FeedOutcome;
use std::time::Instant;

/// Messages emitted by the UI and the runtime.
#[derive(Debug, Clone)]
pub enum Message {
    NavigateTo(String),
    BackToTop,
    ToggleTheme,
    Scrolled {
        offset_y: f32,
        viewport_width: f32,
        viewport_height: f32,
        content_height: f32,
    },
    WindowResized {
        width: f32,
        height: f32,
    },
    Frame(Instant),
    ArticlesLoaded(FeedOutcome),
}
