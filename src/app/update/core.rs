use super::super::messages::Message;
use super::super::state::{App, SECTIONS_SCROLL_ID};
use super::Effect;
use folio_core::feed::{FeedOptions, FeedOutcome, fetch_articles};
use iced::widget::scrollable::{self, AbsoluteOffset};
use iced::{Subscription, Task, window};
use tracing::{debug, info};

impl App {
    pub fn subscription(app: &App) -> Subscription<Message> {
        if !app.tracker.is_listening() {
            return Subscription::none();
        }

        let mut subscriptions: Vec<Subscription<Message>> =
            vec![window::resize_events().map(|(_id, size)| Message::WindowResized {
                width: size.width,
                height: size.height,
            })];

        if app.tracker.is_frame_pending() || app.animation.is_animating() {
            subscriptions.push(window::frames().map(Message::Frame));
        }

        Subscription::batch(subscriptions)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }

    pub(in crate::app) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::NavigateTo(id) => self.handle_navigate_to(&id),
            Message::BackToTop => self.handle_back_to_top(),
            Message::ToggleTheme => {
                self.config.theme = self.config.theme.toggled();
                info!(theme = %self.config.theme, "Toggled theme");
            }
            Message::Scrolled {
                offset_y,
                viewport_width,
                viewport_height,
                content_height,
            } => self.handle_scrolled(offset_y, viewport_width, viewport_height, content_height),
            Message::WindowResized { width, height } => self.handle_window_resized(width, height),
            Message::Frame(_at) => self.handle_frame(&mut effects),
            Message::ArticlesLoaded(outcome) => self.handle_articles_loaded(outcome),
        }

        effects
    }

    pub(in crate::app) fn run_effect(&self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::ScrollTo(y) => {
                scrollable::scroll_to(SECTIONS_SCROLL_ID.clone(), AbsoluteOffset { x: 0.0, y })
            }
            Effect::FetchArticles => {
                if self.feed_disabled() {
                    debug!("No feed URL configured; skipping article fetch");
                    return Task::done(Message::ArticlesLoaded(FeedOutcome::Empty));
                }
                let url = self.config.feed_url.clone();
                let options = FeedOptions::from(&self.config);
                Task::perform(
                    async move { fetch_articles(&url, &options).await },
                    Message::ArticlesLoaded,
                )
            }
        }
    }
}
