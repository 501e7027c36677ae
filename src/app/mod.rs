mod layout;
mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use folio_core::config::{AppConfig, ThemeMode};
use folio_core::content::SiteContent;
use folio_core::tracker::SectionTracker;
use iced::{Size, Theme, window};

/// Launch the window with the tracker already attached to the content's
/// sections.
pub fn run_app(config: AppConfig, content: SiteContent, tracker: SectionTracker) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        ..window::Settings::default()
    };

    iced::application("Folio", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| {
            if matches!(app.config.theme, ThemeMode::Night) {
                Theme::Dark
            } else {
                Theme::Light
            }
        })
        .run_with(move || App::bootstrap(config, content, tracker))
}
