use thiserror::Error;

/// Failures surfaced by the section tracker. None of them are fatal; callers
/// log them and leave the view as it is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("no sections configured")]
    NoSections,

    #[error("section configured more than once: {0}")]
    DuplicateSection(String),

    #[error("navigation target not found: {0}")]
    NavigationTargetNotFound(String),

    #[error("section not rendered yet: {0}")]
    SectionNotRenderedYet(String),

    #[error("tracker unmounted at stage={0}")]
    Unmounted(&'static str),
}
