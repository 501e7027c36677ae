use crate::error::TrackerError;
use serde::{Deserialize, Serialize};

/// Vertical extent of one section in document pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionExtent {
    pub top: f32,
    pub height: f32,
}

impl SectionExtent {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Half-open containment: `top <= y < top + height`. A zero-height
    /// section contains nothing.
    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y < self.bottom()
    }

    pub fn is_measurable(&self) -> bool {
        self.top.is_finite() && self.height.is_finite() && self.height >= 0.0
    }
}

/// Read-only view of the live layout, queried on demand during a
/// recomputation and never cached beyond it.
pub trait Viewport {
    /// Distance scrolled from the document top.
    fn scroll_offset(&self) -> f32;

    /// Visible height of the scrolling area.
    fn viewport_height(&self) -> f32;

    /// Extent of a section, or `None` if it is not rendered yet.
    fn section_extent(&self, id: &str) -> Option<SectionExtent>;
}

pub(crate) fn measure<V: Viewport + ?Sized>(
    viewport: &V,
    id: &str,
) -> Result<SectionExtent, TrackerError> {
    viewport
        .section_extent(id)
        .filter(SectionExtent::is_measurable)
        .ok_or_else(|| TrackerError::SectionNotRenderedYet(id.to_string()))
}

pub(crate) fn sanitize_px(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// In-memory layout: a scroll position, a viewport height and a list of
/// section extents. Hosts rebuild one per frame from their measurements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSnapshot {
    scroll_offset: f32,
    viewport_height: f32,
    sections: Vec<(String, SectionExtent)>,
}

impl LayoutSnapshot {
    pub fn new(viewport_height: f32) -> Self {
        Self {
            scroll_offset: 0.0,
            viewport_height,
            sections: Vec::new(),
        }
    }

    /// Stack sections top to bottom starting at zero, in the given order.
    pub fn stacked<I, S>(viewport_height: f32, heights: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        let mut snapshot = Self::new(viewport_height);
        let mut top = 0.0f32;
        for (id, height) in heights {
            let height = sanitize_px(height);
            snapshot
                .sections
                .push((id.into(), SectionExtent::new(top, height)));
            top += height;
        }
        snapshot
    }

    pub fn with_section(mut self, id: impl Into<String>, top: f32, height: f32) -> Self {
        self.upsert_section(id, SectionExtent::new(top, height));
        self
    }

    pub fn upsert_section(&mut self, id: impl Into<String>, extent: SectionExtent) {
        let id = id.into();
        match self.sections.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, slot)) => *slot = extent,
            None => self.sections.push((id, extent)),
        }
    }

    pub fn remove_section(&mut self, id: &str) -> Option<SectionExtent> {
        let idx = self.sections.iter().position(|(existing, _)| existing == id)?;
        Some(self.sections.remove(idx).1)
    }

    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = offset;
    }

    /// Scroll so that the probe line at `fraction` of the viewport lands on
    /// `probe`.
    pub fn set_probe(&mut self, probe: f32, fraction: f32) {
        self.scroll_offset = probe - self.viewport_height * fraction;
    }

    pub fn content_height(&self) -> f32 {
        self.sections
            .iter()
            .map(|(_, extent)| extent.bottom())
            .fold(0.0, f32::max)
    }

    pub fn max_scroll_offset(&self) -> f32 {
        (self.content_height() - self.viewport_height).max(0.0)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, SectionExtent)> {
        self.sections.iter().map(|(id, extent)| (id.as_str(), *extent))
    }
}

impl Viewport for LayoutSnapshot {
    fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    fn section_extent(&self, id: &str) -> Option<SectionExtent> {
        self.sections
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, extent)| *extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_is_half_open() {
        let extent = SectionExtent::new(800.0, 800.0);
        assert!(extent.contains(800.0));
        assert!(extent.contains(1599.5));
        assert!(!extent.contains(1600.0));
        assert!(!extent.contains(799.9));
    }

    #[test]
    fn zero_height_contains_nothing() {
        let extent = SectionExtent::new(100.0, 0.0);
        assert!(extent.is_measurable());
        assert!(!extent.contains(100.0));
    }

    #[test]
    fn stacked_sections_are_contiguous() {
        let snapshot = LayoutSnapshot::stacked(600.0, [("a", 100.0), ("b", 250.0), ("c", 50.0)]);
        assert_eq!(snapshot.section_extent("b"), Some(SectionExtent::new(100.0, 250.0)));
        assert_eq!(snapshot.section_extent("c"), Some(SectionExtent::new(350.0, 50.0)));
        assert_eq!(snapshot.content_height(), 400.0);
        assert_eq!(snapshot.max_scroll_offset(), 0.0);
    }

    #[test]
    fn measure_rejects_missing_and_degenerate_geometry() {
        let snapshot = LayoutSnapshot::new(600.0)
            .with_section("ok", 0.0, 10.0)
            .with_section("nan", f32::NAN, 10.0);

        assert!(measure(&snapshot, "ok").is_ok());
        assert_eq!(
            measure(&snapshot, "nan"),
            Err(TrackerError::SectionNotRenderedYet("nan".to_string()))
        );
        assert_eq!(
            measure(&snapshot, "missing"),
            Err(TrackerError::SectionNotRenderedYet("missing".to_string()))
        );
    }

    #[test]
    fn set_probe_positions_scroll_offset() {
        let mut snapshot = LayoutSnapshot::new(800.0);
        snapshot.set_probe(850.0, 0.5);
        assert_eq!(snapshot.scroll_offset(), 450.0);
    }
}
