mod core;
mod feed;
mod scroll;

/// Work performed outside the reducer.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Effect {
    ScrollTo(f32),
    FetchArticles,
}

#[cfg(test)]
mod tests {
    use super::super::messages::Message;
    use super::super::state::App;
    use super::Effect;
    use folio_core::config::AppConfig;
    use folio_core::content::SiteContent;
    use folio_core::feed::{Article, FeedOutcome};
    use folio_core::tracker::{SectionTracker, TrackerOptions};
    use std::time::Instant;

    fn test_app() -> App {
        let config = AppConfig {
            feed_url: String::new(),
            ..AppConfig::default()
        };
        let content = SiteContent::default();
        let tracker = SectionTracker::with_options(content.section_ids(), TrackerOptions::from(&config))
            .expect("default sections are valid");
        let (mut app, _task) = App::bootstrap(config, content, tracker);
        app.reduce(Message::ArticlesLoaded(FeedOutcome::Empty));
        app.reduce(Message::Frame(Instant::now()));
        app
    }

    fn scrolled(app: &App, offset_y: f32) -> Message {
        Message::Scrolled {
            offset_y,
            viewport_width: app.viewport.width,
            viewport_height: app.viewport.height,
            content_height: app.layout_snapshot().content_height(),
        }
    }

    fn settle(app: &mut App) -> Vec<f32> {
        let mut emitted = Vec::new();
        for _ in 0..500 {
            for effect in app.reduce(Message::Frame(Instant::now())) {
                if let Effect::ScrollTo(y) = effect {
                    emitted.push(y);
                }
            }
            if !app.animation.is_animating() && !app.tracker.is_frame_pending() {
                break;
            }
        }
        emitted
    }

    #[test]
    fn bootstrap_starts_on_first_section() {
        let app = test_app();
        assert_eq!(app.tracker.active_section_id(), "home");
        assert!(!app.tracker.show_back_to_top());
        assert!(app.tracker.is_listening());
    }

    #[test]
    fn scroll_burst_recomputes_once_per_frame() {
        let mut app = test_app();
        let before = app.tracker.stats().recomputations;

        for step in 0..50 {
            let message = scrolled(&app, 20.0 * step as f32);
            assert!(app.reduce(message).is_empty());
        }
        assert_eq!(app.tracker.stats().recomputations, before);
        assert!(app.tracker.is_frame_pending());

        app.reduce(Message::Frame(Instant::now()));
        assert_eq!(app.tracker.stats().recomputations, before + 1);
        assert!(app.tracker.show_back_to_top());
    }

    #[test]
    fn navigation_converges_through_scroll_frames() {
        let mut app = test_app();
        app.reduce(Message::NavigateTo("experience".to_string()));

        assert!(app.animation.is_animating());
        assert_eq!(app.tracker.active_section_id(), "home");

        let emitted = settle(&mut app);
        let layout = app.layout_snapshot();
        let extent = layout
            .sections()
            .find(|(id, _)| *id == "experience")
            .map(|(_, extent)| extent)
            .expect("experience is laid out");

        assert_eq!(emitted.last().copied(), Some(extent.top - app.config.nav_header_height));
        assert_eq!(app.tracker.active_section_id(), "experience");
    }

    #[test]
    fn unknown_navigation_target_changes_nothing() {
        let mut app = test_app();
        let before = app.tracker.snapshot();

        assert!(app.reduce(Message::NavigateTo("nonexistent".to_string())).is_empty());
        assert!(!app.animation.is_animating());
        assert_eq!(app.tracker.snapshot(), before);
    }

    #[test]
    fn user_scroll_interrupts_navigation() {
        let mut app = test_app();
        app.reduce(Message::NavigateTo("projects".to_string()));
        app.reduce(Message::Frame(Instant::now()));
        assert!(app.animation.is_animating());

        let message = scrolled(&app, app.viewport.scroll_y + 250.0);
        app.reduce(message);
        assert!(!app.animation.is_animating());
    }

    #[test]
    fn back_to_top_scrolls_home() {
        let mut app = test_app();
        let message = scrolled(&app, 900.0);
        app.reduce(message);
        app.reduce(Message::Frame(Instant::now()));
        assert!(app.tracker.show_back_to_top());

        app.reduce(Message::BackToTop);
        let emitted = settle(&mut app);
        assert_eq!(emitted.last().copied(), Some(0.0));
        assert!(!app.tracker.show_back_to_top());
        assert_eq!(app.tracker.active_section_id(), "home");
    }

    #[test]
    fn loaded_articles_reflow_the_layout() {
        let mut app = test_app();
        let before = app.layout_snapshot().content_height();
        let article = Article {
            title: "Scroll spies".to_string(),
            link: "https://example.com/post".to_string(),
            published_at: "2024-01-15 10:00:00".to_string(),
            excerpt: "x".repeat(150),
            thumbnail_url: None,
            categories: Vec::new(),
        };

        app.reduce(Message::ArticlesLoaded(FeedOutcome::Loaded(vec![article; 6])));

        assert!(!app.articles.loading);
        assert!(app.tracker.is_frame_pending());
        assert!(app.layout_snapshot().content_height() > before);
    }

    #[test]
    fn empty_feed_url_skips_the_network() {
        let config = AppConfig {
            feed_url: "   ".to_string(),
            ..AppConfig::default()
        };
        let content = SiteContent::default();
        let tracker = SectionTracker::with_options(content.section_ids(), TrackerOptions::from(&config))
            .expect("default sections are valid");
        let (app, _task) = App::bootstrap(config, content, tracker);
        assert!(app.articles.loading);
        assert!(app.feed_disabled());
    }

    #[test]
    fn bootstrap_uses_loaded_config_as_is() {
        let config = AppConfig {
            feed_url: String::new(),
            font_size: 22,
            smooth_scroll_speed: 0.4,
            ..AppConfig::default()
        };
        let content = SiteContent::default();
        let tracker = SectionTracker::with_options(content.section_ids(), TrackerOptions::from(&config))
            .expect("default sections are valid");
        let (app, _task) = App::bootstrap(config.clone(), content, tracker);
        assert_eq!(app.config, config);
    }

    #[test]
    fn theme_toggle_flips_mode() {
        let mut app = test_app();
        let before = app.config.theme;
        app.reduce(Message::ToggleTheme);
        assert_eq!(app.config.theme, before.toggled());
    }
}
