//! Viewport section tracker.
//!
//! Decides which named section sits under the probe line of the viewport,
//! how far the reader has scrolled through the tracked region, and whether
//! the back-to-top affordance should show. Scroll and resize events only
//! *schedule* work through a single-slot [`FrameGate`]; the work runs once
//! per animation frame against live geometry read through [`Viewport`].

mod animation;
mod frame;
mod geometry;
mod lifecycle;

pub use animation::SmoothScroll;
pub use frame::FrameGate;
pub use geometry::{LayoutSnapshot, SectionExtent, Viewport};
pub use lifecycle::MountToken;

use crate::config::AppConfig;
use crate::error::TrackerError;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, trace, warn};
use ts_rs::TS;

pub const DEFAULT_CENTER_OFFSET_FRACTION: f32 = 0.5;
pub const DEFAULT_NAV_HEADER_HEIGHT: f32 = 80.0;
pub const DEFAULT_BACK_TO_TOP_THRESHOLD: f32 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerOptions {
    /// Where the probe line sits, as a fraction of the viewport height.
    pub center_offset_fraction: f32,
    /// Height of the fixed header that overlays the top of the page.
    pub nav_header_height: f32,
    /// Scroll distance past which the back-to-top affordance shows.
    pub back_to_top_threshold: f32,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            center_offset_fraction: DEFAULT_CENTER_OFFSET_FRACTION,
            nav_header_height: DEFAULT_NAV_HEADER_HEIGHT,
            back_to_top_threshold: DEFAULT_BACK_TO_TOP_THRESHOLD,
        }
    }
}

impl TrackerOptions {
    fn sanitized(self) -> Self {
        let finite_or = |value: f32, fallback: f32| {
            if value.is_finite() { value } else { fallback }
        };
        Self {
            center_offset_fraction: finite_or(
                self.center_offset_fraction,
                DEFAULT_CENTER_OFFSET_FRACTION,
            )
            .clamp(0.0, 1.0),
            nav_header_height: finite_or(self.nav_header_height, DEFAULT_NAV_HEADER_HEIGHT)
                .max(0.0),
            back_to_top_threshold: finite_or(
                self.back_to_top_threshold,
                DEFAULT_BACK_TO_TOP_THRESHOLD,
            ),
        }
    }
}

impl From<&AppConfig> for TrackerOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            center_offset_fraction: config.center_offset_fraction,
            nav_header_height: config.nav_header_height,
            back_to_top_threshold: config.back_to_top_threshold,
        }
    }
}

/// Observable tracker state, copied out for renderers.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct TrackerSnapshot {
    pub active_section_id: String,
    pub scroll_progress: f32,
    pub show_back_to_top: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerStats {
    pub recomputations: u64,
    pub coalesced_requests: u64,
    pub skipped_sections: u64,
    pub late_frames_dropped: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Scroll request handed to the host. `top` is not clamped; hosts clamp it
/// to their scrollable range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub top: f32,
    pub behavior: ScrollBehavior,
}

impl ScrollCommand {
    pub fn to_top() -> Self {
        Self {
            top: 0.0,
            behavior: ScrollBehavior::Smooth,
        }
    }
}

#[derive(Debug)]
pub struct SectionTracker {
    section_ids: Vec<String>,
    options: TrackerOptions,
    // Index into `section_ids`; the list is never empty.
    active_idx: usize,
    scroll_progress: f32,
    show_back_to_top: bool,
    frame: FrameGate,
    mount: MountToken,
    listening: bool,
    stats: TrackerStats,
}

impl SectionTracker {
    /// Track `section_ids` in document order with the probe line at
    /// `center_offset_fraction` of the viewport.
    pub fn initialize<I, S>(section_ids: I, center_offset_fraction: f32) -> Result<Self, TrackerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_options(
            section_ids,
            TrackerOptions {
                center_offset_fraction,
                ..TrackerOptions::default()
            },
        )
    }

    pub fn with_options<I, S>(section_ids: I, options: TrackerOptions) -> Result<Self, TrackerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let section_ids = validate_section_ids(section_ids)?;
        let options = options.sanitized();
        debug!(
            sections = section_ids.len(),
            first = %section_ids[0],
            center_offset_fraction = options.center_offset_fraction,
            nav_header_height = options.nav_header_height,
            "Attached scroll listener"
        );
        Ok(Self {
            section_ids,
            options,
            active_idx: 0,
            scroll_progress: 0.0,
            show_back_to_top: false,
            frame: FrameGate::new(),
            mount: MountToken::new(),
            listening: true,
            stats: TrackerStats::default(),
        })
    }

    /// Replace the tracked ids. The active section is kept when it survives
    /// the change and reset to the new first id otherwise.
    pub fn reconfigure<I, S>(&mut self, section_ids: I) -> Result<(), TrackerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let section_ids = validate_section_ids(section_ids)?;
        let previous = self.active_section_id().to_string();
        self.active_idx = section_ids
            .iter()
            .position(|id| *id == previous)
            .unwrap_or(0);
        self.section_ids = section_ids;
        debug!(
            sections = self.section_ids.len(),
            active = %self.active_section_id(),
            "Reconfigured tracked sections"
        );
        Ok(())
    }

    pub fn section_ids(&self) -> &[String] {
        &self.section_ids
    }

    pub fn options(&self) -> TrackerOptions {
        self.options
    }

    pub fn active_section_id(&self) -> &str {
        &self.section_ids[self.active_idx]
    }

    pub fn scroll_progress(&self) -> f32 {
        self.scroll_progress
    }

    pub fn show_back_to_top(&self) -> bool {
        self.show_back_to_top
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame.is_pending()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_mounted()
    }

    /// Token for deferred work that must become inert after teardown.
    pub fn mount_token(&self) -> MountToken {
        self.mount.clone()
    }

    pub fn stats(&self) -> TrackerStats {
        self.stats
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            active_section_id: self.active_section_id().to_string(),
            scroll_progress: self.scroll_progress,
            show_back_to_top: self.show_back_to_top,
        }
    }

    /// Scroll/resize entry point. Returns `true` if this call scheduled a
    /// frame; `false` if one was already pending or the tracker is gone.
    pub fn schedule_recompute(&mut self) -> bool {
        if !self.listening || !self.mount.is_mounted() {
            return false;
        }
        if self.frame.request() {
            trace!("Scheduled section recompute for next frame");
            true
        } else {
            self.stats.coalesced_requests = self.stats.coalesced_requests.saturating_add(1);
            false
        }
    }

    /// Animation-frame callback. Runs the pending recomputation, if any,
    /// against the geometry visible right now.
    pub fn on_animation_frame<V: Viewport + ?Sized>(&mut self, viewport: &V) -> bool {
        if let Err(err) = self.mount.check_mounted("animation-frame") {
            self.stats.late_frames_dropped = self.stats.late_frames_dropped.saturating_add(1);
            debug!("Ignoring late animation frame: {err}");
            return false;
        }
        if !self.frame.take() {
            return false;
        }
        self.recompute(viewport);
        true
    }

    /// Re-evaluate state from the viewport. Same inputs give the same state.
    pub fn recompute<V: Viewport + ?Sized>(&mut self, viewport: &V) {
        if !self.mount.is_mounted() {
            return;
        }
        let scroll = geometry::sanitize_px(viewport.scroll_offset());
        let viewport_height = geometry::sanitize_px(viewport.viewport_height());
        let probe = scroll + viewport_height * self.options.center_offset_fraction;

        let mut hit = None;
        let mut region: Option<(f32, f32)> = None;
        for (idx, id) in self.section_ids.iter().enumerate() {
            let extent = match geometry::measure(viewport, id) {
                Ok(extent) => extent,
                Err(err) => {
                    self.stats.skipped_sections = self.stats.skipped_sections.saturating_add(1);
                    trace!("Skipping section for this pass: {err}");
                    continue;
                }
            };
            region = Some(match region {
                Some((start, _)) => (start, extent.bottom()),
                None => (extent.top, extent.bottom()),
            });
            if hit.is_none() && extent.contains(probe) {
                hit = Some(idx);
            }
        }

        if let Some(idx) = hit {
            if idx != self.active_idx {
                debug!(
                    from = %self.section_ids[self.active_idx],
                    to = %self.section_ids[idx],
                    probe,
                    "Active section changed"
                );
                self.active_idx = idx;
            }
        }
        self.show_back_to_top = scroll > self.options.back_to_top_threshold;
        self.scroll_progress = progress_fraction(scroll, viewport_height, region);
        self.stats.recomputations = self.stats.recomputations.saturating_add(1);
    }

    /// Build the scroll command that brings `section_id` under the fixed
    /// header. The active section is left alone; scroll events converge it.
    pub fn navigate_to<V: Viewport + ?Sized>(
        &self,
        section_id: &str,
        viewport: &V,
    ) -> Result<ScrollCommand, TrackerError> {
        self.mount.check_mounted("navigate")?;
        if !self.section_ids.iter().any(|id| id == section_id) {
            let err = TrackerError::NavigationTargetNotFound(section_id.to_string());
            warn!("{err}");
            return Err(err);
        }
        let extent = geometry::measure(viewport, section_id).map_err(|_| {
            let err = TrackerError::NavigationTargetNotFound(section_id.to_string());
            warn!("{err} (not rendered)");
            err
        })?;
        let command = ScrollCommand {
            top: extent.top - self.options.nav_header_height,
            behavior: ScrollBehavior::Smooth,
        };
        debug!(section = section_id, top = command.top, "Navigating to section");
        Ok(command)
    }

    /// Detach the listener and make any already scheduled frame inert.
    /// Safe to call more than once; also runs on drop.
    pub fn teardown(&mut self) {
        if !self.listening && !self.mount.is_mounted() {
            return;
        }
        self.listening = false;
        self.frame.cancel();
        self.mount.unmount();
        debug!(
            recomputations = self.stats.recomputations,
            coalesced = self.stats.coalesced_requests,
            "Detached scroll listener"
        );
    }
}

impl Drop for SectionTracker {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn validate_section_ids<I, S>(section_ids: I) -> Result<Vec<String>, TrackerError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let ids: Vec<String> = section_ids.into_iter().map(Into::into).collect();
    if ids.is_empty() {
        return Err(TrackerError::NoSections);
    }
    let mut seen = HashSet::with_capacity(ids.len());
    for id in &ids {
        if !seen.insert(id.as_str()) {
            return Err(TrackerError::DuplicateSection(id.clone()));
        }
    }
    Ok(ids)
}

/// Fraction of the tracked region scrolled past. The region runs from the
/// first measurable section's top to the last one's bottom; the final
/// viewport's worth cannot be scrolled, so it is excluded.
fn progress_fraction(scroll: f32, viewport_height: f32, region: Option<(f32, f32)>) -> f32 {
    let Some((start, end)) = region else {
        return 0.0;
    };
    let span = end - start - viewport_height;
    if span <= f32::EPSILON {
        return if scroll > start { 1.0 } else { 0.0 };
    }
    ((scroll - start) / span).clamp(0.0, 1.0)
}
