use super::layout;
use super::messages::Message;
use super::update::Effect;
use chrono::Local;
use folio_core::config::AppConfig;
use folio_core::content::{SiteContent, TenureCache};
use folio_core::feed::FeedOutcome;
use folio_core::tracker::{LayoutSnapshot, SectionTracker, SmoothScroll};
use iced::Task;
use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;
use tracing::info;

pub(crate) static SECTIONS_SCROLL_ID: Lazy<ScrollId> =
    Lazy::new(|| ScrollId::new("folio-sections"));

pub(crate) const NAV_BAR_HEIGHT_PX: f32 = 56.0;
pub(crate) const PROGRESS_BAR_HEIGHT_PX: f32 = 4.0;

/// Last geometry reported by the sections scrollable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
    pub content_height: f32,
}

impl ViewportState {
    /// Estimate from the window size until the first scroll event arrives.
    pub(super) fn from_window(width: f32, height: f32) -> Self {
        Self {
            scroll_y: 0.0,
            width: width.max(1.0),
            height: (height - NAV_BAR_HEIGHT_PX - PROGRESS_BAR_HEIGHT_PX).max(1.0),
            content_height: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArticlesState {
    pub loading: bool,
    pub outcome: Option<FeedOutcome>,
}

pub struct App {
    pub(super) config: AppConfig,
    pub(super) content: SiteContent,
    pub(super) tracker: SectionTracker,
    pub(super) animation: SmoothScroll,
    pub(super) viewport: ViewportState,
    pub(super) articles: ArticlesState,
    /// Tenure per experience entry, aligned with `content.experience`.
    pub(super) tenure_labels: Vec<Option<String>>,
}

impl App {
    pub(super) fn bootstrap(
        config: AppConfig,
        content: SiteContent,
        tracker: SectionTracker,
    ) -> (App, Task<Message>) {
        let today = Local::now().date_naive();
        let mut tenure = TenureCache::new();
        let tenure_labels = content
            .experience
            .iter()
            .map(|entry| tenure.label(&entry.start, entry.end.as_deref(), today))
            .collect();

        let mut app = App {
            animation: SmoothScroll::new(config.smooth_scroll_speed),
            viewport: ViewportState::from_window(config.window_width, config.window_height),
            articles: ArticlesState {
                loading: true,
                outcome: None,
            },
            tenure_labels,
            config,
            content,
            tracker,
        };

        info!(
            sections = app.tracker.section_ids().len(),
            active = app.tracker.active_section_id(),
            "Bootstrapped folio"
        );

        // First measurement once the layout exists.
        app.tracker.schedule_recompute();
        let task = app.run_effect(Effect::FetchArticles);
        (app, task)
    }

    /// Geometry of the sections as currently rendered.
    pub(super) fn layout_snapshot(&self) -> LayoutSnapshot {
        let mut snapshot = LayoutSnapshot::stacked(self.viewport.height, layout::section_heights(self));
        snapshot.set_scroll_offset(self.viewport.scroll_y);
        snapshot
    }
}
