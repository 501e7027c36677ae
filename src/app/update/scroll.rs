use super::super::state::{App, NAV_BAR_HEIGHT_PX, PROGRESS_BAR_HEIGHT_PX};
use super::Effect;
use folio_core::tracker::ScrollCommand;
use tracing::{debug, trace};

fn sanitize_px(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

impl App {
    pub(super) fn handle_scrolled(
        &mut self,
        offset_y: f32,
        viewport_width: f32,
        viewport_height: f32,
        content_height: f32,
    ) {
        self.viewport.scroll_y = sanitize_px(offset_y);
        self.viewport.width = sanitize_px(viewport_width).max(1.0);
        self.viewport.height = sanitize_px(viewport_height).max(1.0);
        self.viewport.content_height = sanitize_px(content_height);

        let estimated = self.layout_snapshot().content_height();
        if (estimated - self.viewport.content_height).abs() > 1.0 {
            debug!(
                reported = self.viewport.content_height,
                estimated, "Section layout differs from rendered content"
            );
        }

        self.animation.observe_external(self.viewport.scroll_y);
        if !self.tracker.schedule_recompute() {
            trace!(offset = self.viewport.scroll_y, "Scroll coalesced into pending frame");
        }
    }

    pub(super) fn handle_window_resized(&mut self, width: f32, height: f32) {
        // The scrollable reports its real bounds on the next scroll event.
        self.viewport.width = sanitize_px(width).max(1.0);
        self.viewport.height =
            (sanitize_px(height) - NAV_BAR_HEIGHT_PX - PROGRESS_BAR_HEIGHT_PX).max(1.0);
        debug!(width, height, "Window resized");
        self.tracker.schedule_recompute();
    }

    pub(super) fn handle_frame(&mut self, effects: &mut Vec<Effect>) {
        if let Some(y) = self.animation.step() {
            self.viewport.scroll_y = y;
            effects.push(Effect::ScrollTo(y));
            self.tracker.schedule_recompute();
        }
        let layout = self.layout_snapshot();
        self.tracker.on_animation_frame(&layout);
    }

    pub(super) fn handle_navigate_to(&mut self, id: &str) {
        let layout = self.layout_snapshot();
        match self.tracker.navigate_to(id, &layout) {
            Ok(command) => {
                self.animation
                    .start(self.viewport.scroll_y, &command, layout.max_scroll_offset());
            }
            Err(err) => debug!(%id, "Navigation ignored: {err}"),
        }
    }

    pub(super) fn handle_back_to_top(&mut self) {
        let layout = self.layout_snapshot();
        self.animation.start(
            self.viewport.scroll_y,
            &ScrollCommand::to_top(),
            layout.max_scroll_offset(),
        );
    }
}
