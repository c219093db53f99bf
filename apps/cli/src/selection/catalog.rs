//! Section Catalog Builder: discovers which recognized list sections a resume carries.
//!
//! Pure function of the document. Every label lookup has a hardcoded fallback so a label
//! is always producible from partial data.

use serde_json::Value;

use crate::models::resume::{first_present, ResumeDocument};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// The recognized list-valued top-level fields, in catalog precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKey {
    Work,
    Education,
    Publications,
    Projects,
    Skills,
    Languages,
    Interests,
}

impl SectionKey {
    pub const ALL: [SectionKey; 7] = [
        SectionKey::Work,
        SectionKey::Education,
        SectionKey::Publications,
        SectionKey::Projects,
        SectionKey::Skills,
        SectionKey::Languages,
        SectionKey::Interests,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SectionKey::Work => "Experiences",
            SectionKey::Education => "Education",
            SectionKey::Publications => "Publications",
            SectionKey::Projects => "Projects",
            SectionKey::Skills => "Skills",
            SectionKey::Languages => "Languages",
            SectionKey::Interests => "Interests",
        }
    }
}

/// One entry of a section, identified by its position in the source list.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub index: usize,
    pub label: String,
}

/// A non-empty recognized section with its display items.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub key: SectionKey,
    pub label: String,
    pub items: Vec<Item>,
}

// ────────────────────────────────────────────────────────────────────────────
// Item labels
// ────────────────────────────────────────────────────────────────────────────

/// Display label for one entry of `key`. Entries of any shape get a label; members that
/// are missing, empty or not objects fall back to fixed placeholders.
pub fn item_label(key: SectionKey, entry: &Value) -> String {
    let field = |chain: &[&str], default: &str| first_present(entry, chain, default);
    match key {
        SectionKey::Work => format!(
            "{} @ {}",
            field(&["position"], "Role"),
            field(&["name"], "Company")
        ),
        SectionKey::Education => format!(
            "{} in {} @ {}",
            field(&["studyType"], "Study"),
            field(&["area"], "Area"),
            field(&["institution"], "Institution")
        ),
        SectionKey::Publications => format!(
            "{} ({})",
            field(&["name"], "Publication"),
            field(&["publisher"], "Publisher")
        ),
        SectionKey::Projects => format!(
            "{} ({})",
            field(&["name"], "Project"),
            field(&["type"], "Project")
        ),
        SectionKey::Skills => format!(
            "{} ({})",
            field(&["name"], "Skill"),
            field(&["level"], "level unknown")
        ),
        SectionKey::Languages => format!(
            "{} – {}",
            field(&["language"], "Language"),
            field(&["fluency"], "fluency unknown")
        ),
        SectionKey::Interests => field(&["name"], "Interest"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog
// ────────────────────────────────────────────────────────────────────────────

/// Source entries of one section. Absent sections have none.
pub fn section_entries(doc: &ResumeDocument, key: SectionKey) -> &[Value] {
    let entries = match key {
        SectionKey::Work => &doc.work,
        SectionKey::Education => &doc.education,
        SectionKey::Publications => &doc.publications,
        SectionKey::Projects => &doc.projects,
        SectionKey::Skills => &doc.skills,
        SectionKey::Languages => &doc.languages,
        SectionKey::Interests => &doc.interests,
    };
    entries.as_deref().unwrap_or_default()
}

/// Builds the ordered section catalog. Absent or empty lists produce no section.
pub fn build_catalog(doc: &ResumeDocument) -> Vec<Section> {
    SectionKey::ALL
        .iter()
        .filter_map(|&key| {
            let entries = section_entries(doc, key);
            if entries.is_empty() {
                return None;
            }
            let items = entries
                .iter()
                .enumerate()
                .map(|(index, entry)| Item {
                    index,
                    label: item_label(key, entry),
                })
                .collect();
            Some(Section {
                key,
                label: key.label().to_string(),
                items,
            })
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
