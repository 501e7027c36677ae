use super::super::state::App;
use folio_core::feed::FeedOutcome;
use tracing::{info, warn};

impl App {
    pub(in crate::app) fn feed_disabled(&self) -> bool {
        self.config.feed_url.trim().is_empty()
    }

    pub(super) fn handle_articles_loaded(&mut self, outcome: FeedOutcome) {
        match &outcome {
            FeedOutcome::Loaded(articles) => info!(count = articles.len(), "Articles loaded"),
            FeedOutcome::Empty => info!("Feed returned no articles"),
            FeedOutcome::Failed(reason) => warn!(%reason, "Showing article placeholder"),
        }
        self.articles.loading = false;
        self.articles.outcome = Some(outcome);
        // The articles section changed height.
        self.tracker.schedule_recompute();
    }
}
