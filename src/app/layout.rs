//! Section geometry for the sections column.
//!
//! Every section is rendered into a container of fixed height, so the
//! heights computed here are exactly the extents laid out on screen and the
//! tracker can be fed without reading back widget bounds.

use super::state::App;
use folio_core::feed::FeedOutcome;

pub(crate) const SECTION_PADDING_PX: f32 = 32.0;
pub(crate) const SECTION_TITLE_SIZE_PX: f32 = 30.0;
pub(crate) const BLOCK_SPACING_PX: f32 = 12.0;
/// Every section is at least this share of the viewport tall.
pub(crate) const MIN_SECTION_VIEWPORT_FRACTION: f32 = 0.75;
const GLYPH_WIDTH_RATIO: f32 = 0.55;
const TITLE_LINE_HEIGHT: f32 = 1.3;

/// Text blocks rendered below a section's title. Unknown ids render the
/// title only.
pub(crate) fn section_blocks(app: &App, id: &str) -> Vec<String> {
    let content = &app.content;
    match id {
        "home" => vec![content.profile.name.clone(), content.profile.headline.clone()],
        "about" => vec![content.profile.summary.clone()],
        "experience" => or_placeholder(
            content
                .experience
                .iter()
                .zip(app.tenure_labels.iter())
                .map(|(entry, tenure)| {
                    let end = entry.end.as_deref().unwrap_or("Present");
                    let mut block = format!("{} · {}\n{} – {}", entry.role, entry.company, entry.start, end);
                    if let Some(tenure) = tenure {
                        block.push_str(&format!(" ({tenure})"));
                    }
                    for highlight in &entry.highlights {
                        block.push_str(&format!("\n• {highlight}"));
                    }
                    block
                })
                .collect(),
        ),
        "education" => or_placeholder(
            content
                .education
                .iter()
                .map(|entry| {
                    let years = match (&entry.start, &entry.end) {
                        (Some(start), Some(end)) => format!(" ({start} – {end})"),
                        (Some(start), None) => format!(" ({start} – Present)"),
                        (None, Some(end)) => format!(" ({end})"),
                        (None, None) => String::new(),
                    };
                    format!("{}\n{}{years}", entry.degree, entry.institution)
                })
                .collect(),
        ),
        "projects" => or_placeholder(
            content
                .projects
                .iter()
                .map(|project| {
                    let mut block = format!("{}\n{}", project.name, project.description);
                    if !project.tech.is_empty() {
                        block.push_str(&format!("\n{}", project.tech.join(" · ")));
                    }
                    if let Some(link) = &project.link {
                        block.push_str(&format!("\n{link}"));
                    }
                    block
                })
                .collect(),
        ),
        "articles" => article_blocks(app),
        "contact" => {
            let mut blocks = Vec::new();
            if let Some(email) = &content.profile.email {
                blocks.push(email.clone());
            }
            blocks.extend(
                content
                    .profile
                    .links
                    .iter()
                    .map(|link| format!("{}: {}", link.label, link.url)),
            );
            or_placeholder(blocks)
        }
        _ => Vec::new(),
    }
}

fn article_blocks(app: &App) -> Vec<String> {
    if app.articles.loading {
        return vec!["Loading articles...".to_string()];
    }
    match &app.articles.outcome {
        Some(FeedOutcome::Loaded(articles)) => articles
            .iter()
            .map(|article| {
                format!(
                    "{}\n{}\n{}",
                    article.title,
                    article.display_date(),
                    article.excerpt
                )
            })
            .collect(),
        Some(FeedOutcome::Empty) | Some(FeedOutcome::Failed(_)) | None => {
            vec!["Articles coming soon.".to_string()]
        }
    }
}

fn or_placeholder(blocks: Vec<String>) -> Vec<String> {
    if blocks.is_empty() {
        vec!["Nothing here yet.".to_string()]
    } else {
        blocks
    }
}

/// Height of a section whose body is `blocks`, wrapped to `width`.
pub(crate) fn section_height(
    blocks: &[String],
    font_size: f32,
    line_spacing: f32,
    width: f32,
    viewport_height: f32,
) -> f32 {
    let font_size = font_size.max(1.0);
    let text_width = (width - SECTION_PADDING_PX * 2.0).max(font_size);
    let chars_per_line = ((text_width / (font_size * GLYPH_WIDTH_RATIO)).floor() as usize).max(8);
    let line_px = font_size * line_spacing.max(1.0);

    let body: f32 = blocks
        .iter()
        .map(|block| {
            let lines: usize = block
                .split('\n')
                .map(|line| line.chars().count().div_ceil(chars_per_line).max(1))
                .sum();
            lines as f32 * line_px + BLOCK_SPACING_PX
        })
        .sum();

    let natural = SECTION_PADDING_PX * 2.0 + SECTION_TITLE_SIZE_PX * TITLE_LINE_HEIGHT + body;
    let minimum = viewport_height.max(0.0) * MIN_SECTION_VIEWPORT_FRACTION;
    natural.max(minimum).ceil()
}

/// `(id, height)` for every section in render order.
pub(crate) fn section_heights(app: &App) -> Vec<(String, f32)> {
    app.content
        .sections
        .iter()
        .map(|section| {
            let blocks = section_blocks(app, &section.id);
            let height = section_height(
                &blocks,
                app.config.font_size as f32,
                app.config.line_spacing,
                app.viewport.width,
                app.viewport.height,
            );
            (section.id.clone(), height)
        })
        .collect()
}
