//! Static portfolio content.
//!
//! Sections and their records are plain data read from `conf/content.toml`.
//! The tracker only ever sees [`SiteContent::section_ids`]; the rest is for
//! the renderer.

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SiteContent {
    #[serde(default)]
    pub profile: Profile,
    pub sections: Vec<SectionInfo>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    pub summary: String,
    pub email: Option<String>,
    pub links: Vec<ProfileLink>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProfileLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SectionInfo {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    /// `YYYY-MM`.
    pub start: String,
    /// `YYYY-MM`; absent while the position is current.
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl SiteContent {
    pub fn section_ids(&self) -> Vec<String> {
        self.sections.iter().map(|section| section.id.clone()).collect()
    }

    pub fn section_title(&self, id: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|section| section.id == id)
            .map(|section| section.title.as_str())
    }

    fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            bail!("content declares no sections");
        }
        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.id.trim().is_empty() {
                bail!("section with title {:?} has an empty id", section.title);
            }
            if !seen.insert(section.id.as_str()) {
                bail!("section id {:?} declared twice", section.id);
            }
        }
        Ok(())
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        let section = |id: &str, title: &str| SectionInfo {
            id: id.to_string(),
            title: title.to_string(),
        };
        SiteContent {
            profile: Profile {
                name: "Your Name".to_string(),
                headline: "Software Engineer".to_string(),
                summary: "Add a short biography in conf/content.toml.".to_string(),
                email: None,
                links: Vec::new(),
            },
            sections: vec![
                section("home", "Home"),
                section("about", "About"),
                section("experience", "Experience"),
                section("education", "Education"),
                section("projects", "Projects"),
                section("articles", "Articles"),
                section("contact", "Contact"),
            ],
            experience: Vec::new(),
            education: Vec::new(),
            projects: Vec::new(),
        }
    }
}

/// Load content from `path`, falling back to the built-in placeholder.
pub fn load_content(path: &Path) -> SiteContent {
    let contents = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) => {
            warn!(path = %path.display(), "Falling back to placeholder content: {err}");
            return SiteContent::default();
        }
    };
    match parse_content(&contents) {
        Ok(content) => {
            info!(
                path = %path.display(),
                sections = content.sections.len(),
                experience = content.experience.len(),
                projects = content.projects.len(),
                "Loaded site content"
            );
            content
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid content TOML: {err:#}");
            SiteContent::default()
        }
    }
}

pub fn parse_content(contents: &str) -> Result<SiteContent> {
    let content: SiteContent = toml::from_str(contents).context("failed to parse content")?;
    content.validate()?;
    Ok(content)
}

/// Parse `YYYY-MM` (or a full `YYYY-MM-DD`) into the first day of the month.
pub fn parse_year_month(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
        .and_then(|date| date.with_day(1))
}

/// Inclusive month count between two month starts; `None` if `end` precedes
/// `start`.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> Option<u32> {
    let months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    u32::try_from(months).ok().map(|m| m + 1)
}

/// `"2 yrs 3 mos"`, `"1 yr"`, `"5 mos"`.
pub fn tenure_label(months: u32) -> String {
    let years = months / 12;
    let rest = months % 12;
    let mut parts = Vec::with_capacity(2);
    match years {
        0 => {}
        1 => parts.push("1 yr".to_string()),
        n => parts.push(format!("{n} yrs")),
    }
    match rest {
        0 => {}
        1 => parts.push("1 mo".to_string()),
        n => parts.push(format!("{n} mos")),
    }
    parts.join(" ")
}

type TenureKey = (NaiveDate, Option<NaiveDate>, NaiveDate);

/// Memoized tenure labels keyed by start, end and the day they were
/// computed for.
#[derive(Debug, Default)]
pub struct TenureCache {
    entries: HashMap<TenureKey, Option<String>>,
    hits: u64,
}

impl TenureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(&mut self, start: &str, end: Option<&str>, today: NaiveDate) -> Option<String> {
        let start = parse_year_month(start)?;
        let end = match end {
            Some(raw) => Some(parse_year_month(raw)?),
            None => None,
        };
        let key = (start, end, today);
        if let Some(cached) = self.entries.get(&key) {
            self.hits += 1;
            return cached.clone();
        }
        let until = end.unwrap_or(today);
        let label = months_between(start, until).map(tenure_label);
        debug!(%start, ?end, ?label, "Computed tenure label");
        self.entries.insert(key, label.clone());
        label
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn parses_sections_and_records_in_order() {
        let content = parse_content(
            r#"
[profile]
name = "Ada"
headline = "Engineer"

[[sections]]
id = "home"
title = "Home"

[[sections]]
id = "projects"
title = "Projects"

[[experience]]
company = "Acme"
role = "Engineer"
start = "2021-06"

[[projects]]
name = "tracker"
description = "Scroll tracking"
tech = ["rust"]
"#,
        )
        .expect("valid content");

        assert_eq!(content.section_ids(), vec!["home", "projects"]);
        assert_eq!(content.section_title("projects"), Some("Projects"));
        assert_eq!(content.experience[0].end, None);
        assert_eq!(content.projects[0].tech, vec!["rust"]);
    }

    #[test]
    fn rejects_duplicate_and_missing_sections() {
        let duplicate = r#"
[[sections]]
id = "home"
title = "Home"

[[sections]]
id = "home"
title = "Again"
"#;
        assert!(parse_content(duplicate).is_err());
        assert!(parse_content("sections = []").is_err());
    }

    #[test]
    fn missing_file_uses_placeholder() {
        let content = load_content(Path::new("/nonexistent/folio/content.toml"));
        assert_eq!(content, SiteContent::default());
        assert_eq!(content.section_ids().first().map(String::as_str), Some("home"));
    }

    #[test]
    fn month_arithmetic_is_inclusive() {
        assert_eq!(months_between(date(2021, 6, 1), date(2021, 6, 1)), Some(1));
        assert_eq!(months_between(date(2021, 6, 1), date(2023, 8, 1)), Some(27));
        assert_eq!(months_between(date(2023, 8, 1), date(2021, 6, 1)), None);
    }

    #[test]
    fn tenure_labels_pluralize() {
        assert_eq!(tenure_label(1), "1 mo");
        assert_eq!(tenure_label(5), "5 mos");
        assert_eq!(tenure_label(12), "1 yr");
        assert_eq!(tenure_label(27), "2 yrs 3 mos");
    }

    #[test]
    fn cache_reuses_computed_labels() {
        let mut cache = TenureCache::new();
        let today = date(2024, 3, 14);

        assert_eq!(
            cache.label("2021-06", Some("2023-08"), today).as_deref(),
            Some("2 yrs 3 mos")
        );
        assert_eq!(cache.label("2023-01", None, today).as_deref(), Some("1 yr 3 mos"));
        assert_eq!(
            cache.label("2021-06", Some("2023-08"), today).as_deref(),
            Some("2 yrs 3 mos")
        );
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.hits(), 1);

        assert_eq!(cache.label("not-a-date", None, today), None);
        assert_eq!(cache.len(), 2);
    }
}
