//! Filter Engine: rebuilds a reduced document from a document and a [`SelectionState`].
//!
//! Total and pure. Out-of-range indices simply match nothing.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::models::resume::{without_street_address, Basics, FilteredDocument, ResumeDocument};
use crate::selection::catalog::{section_entries, SectionKey};
use crate::selection::state::{BasicsSelection, SelectionState};

/// Produces the filtered document.
///
/// Algorithm:
/// 1. Basics: copy each flagged member that is set in the source; location is copied
///    with `address`/`postalCode` stripped unless street address is included; profiles are
///    kept by index and dropped entirely when none survive. `basics` is emitted only when
///    at least one member was written.
/// 2. Sections: every active section is emitted, in state order, holding the selected
///    entries verbatim and in source order. An active section with no surviving entries is
///    emitted as an empty list.
/// 3. Nothing else is copied.
pub fn filter_document(doc: &ResumeDocument, state: &SelectionState) -> FilteredDocument {
    let mut out = FilteredDocument {
        basics: doc
            .basics
            .as_ref()
            .and_then(|b| filter_basics(b, &state.basics)),
        ..FilteredDocument::default()
    };

    for section in &state.sections {
        let kept = Some(pick(section_entries(doc, section.key), &section.indices));
        match section.key {
            SectionKey::Work => out.work = kept,
            SectionKey::Education => out.education = kept,
            SectionKey::Publications => out.publications = kept,
            SectionKey::Projects => out.projects = kept,
            SectionKey::Skills => out.skills = kept,
            SectionKey::Languages => out.languages = kept,
            SectionKey::Interests => out.interests = kept,
        }
    }

    out
}

fn filter_basics(source: &Basics, sel: &BasicsSelection) -> Option<Basics> {
    let simple = [
        ("name", sel.include_name),
        ("label", sel.include_label),
        ("image", sel.include_image),
        ("email", sel.include_email),
        ("phone", sel.include_phone),
        ("url", sel.include_url),
        ("summary", sel.include_summary),
    ];

    let mut out = Basics::default();
    for (key, wanted) in simple {
        if let Some(value) = source.member(key).filter(|_| wanted) {
            out.insert(key, value.clone());
        }
    }

    if let Some(location) = source.location().filter(|_| sel.include_location) {
        let location = if sel.include_street_address() {
            location.clone()
        } else {
            without_street_address(location)
        };
        out.insert("location", Value::Object(location));
    }

    let profiles = pick(source.profiles(), &sel.profiles);
    if !profiles.is_empty() {
        out.insert("profiles", Value::Array(profiles));
    }

    (!out.is_empty()).then_some(out)
}

fn pick(source: &[Value], indices: &BTreeSet<usize>) -> Vec<Value> {
    source
        .iter()
        .enumerate()
        .filter(|(index, _)| indices.contains(index))
        .map(|(_, entry)| entry.clone())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::catalog::build_catalog;
    use crate::selection::contacts::{selection_from_fields, ContactField};
    use serde_json::{json, Value};

    fn doc(value: Value) -> ResumeDocument {
        serde_json::from_value(value).unwrap()
    }

    fn to_json(filtered: &FilteredDocument) -> Value {
        serde_json::to_value(filtered).unwrap()
    }

    /// Selects every section in the catalog with every item, and every basics member.
    fn select_everything(d: &ResumeDocument) -> SelectionState {
        let mut state = SelectionState::new();
        for section in build_catalog(d) {
            state.select_section(section.key, section.items.iter().map(|i| i.index));
        }
        state.basics = BasicsSelection::everything(d.basics.as_ref());
        state
    }

    #[test]
    fn test_selected_work_entries_in_source_order() {
        let d = doc(json!({
            "work": [
                { "name": "A", "highlights": ["x"] },
                { "name": "B" },
                { "name": "C", "startDate": "2020-01" }
            ],
            "education": []
        }));
        let catalog = build_catalog(&d);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].label, "Experiences");

        let mut state = SelectionState::new();
        state.select_section(SectionKey::Work, [2, 0]);
        let out = to_json(&filter_document(&d, &state));

        assert_eq!(
            out,
            json!({
                "work": [
                    { "name": "A", "highlights": ["x"] },
                    { "name": "C", "startDate": "2020-01" }
                ]
            })
        );
    }

    #[test]
    fn test_subset_size_and_entries_identical_to_source() {
        let d = doc(json!({
            "skills": [
                { "name": "Rust", "keywords": ["tokio"] },
                { "name": "Go" },
                { "name": "SQL", "level": "Advanced" },
                { "name": "C" }
            ]
        }));
        let mut state = SelectionState::new();
        state.select_section(SectionKey::Skills, [1, 3]);
        let out = filter_document(&d, &state);

        let source = d.skills.as_ref().unwrap();
        let skills = out.skills.unwrap();
        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0], source[1]);
        assert_eq!(skills[1], source[3]);
    }

    #[test]
    fn test_chosen_section_with_no_items_is_empty_list() {
        let d = doc(json!({ "interests": [{ "name": "Chess" }] }));
        let mut state = SelectionState::new();
        state.select_section(SectionKey::Interests, std::iter::empty());
        assert_eq!(
            to_json(&filter_document(&d, &state)),
            json!({ "interests": [] })
        );
    }

    #[test]
    fn test_out_of_range_indices_select_nothing() {
        let d = doc(json!({ "languages": [{ "language": "French" }] }));
        let mut state = SelectionState::new();
        state.select_section(SectionKey::Languages, [5, 9]);
        assert_eq!(filter_document(&d, &state).languages, Some(vec![]));
    }

    #[test]
    fn test_unrecognized_fields_never_copied() {
        let d = doc(json!({
            "meta": { "theme": "even" },
            "awards": [{ "title": "Prize" }],
            "basics": { "name": "Ada", "customField": "x" },
            "work": [{ "name": "Acme" }]
        }));
        let out = to_json(&filter_document(&d, &select_everything(&d)));
        assert_eq!(
            out,
            json!({ "basics": { "name": "Ada" }, "work": [{ "name": "Acme" }] })
        );
    }

    #[test]
    fn test_street_address_stripped_from_location() {
        let d = doc(json!({
            "basics": {
                "location": {
                    "city": "Springfield",
                    "address": "742 Evergreen Terrace",
                    "postalCode": "49007",
                    "region": "OR"
                }
            }
        }));
        let mut state = SelectionState::new();
        state.basics = selection_from_fields(&[ContactField::Location], d.basics.as_ref());

        let out = to_json(&filter_document(&d, &state));
        assert_eq!(
            out,
            json!({ "basics": { "location": { "city": "Springfield", "region": "OR" } } })
        );
    }

    #[test]
    fn test_street_address_kept_when_selected() {
        let d = doc(json!({
            "basics": { "location": { "city": "Springfield", "address": "742 Evergreen Terrace", "postalCode": "49007" } }
        }));
        let mut state = SelectionState::new();
        state.basics = selection_from_fields(
            &[ContactField::Location, ContactField::StreetAddress],
            d.basics.as_ref(),
        );
        let out = filter_document(&d, &state);
        assert_eq!(
            out.basics.as_ref().and_then(Basics::location),
            d.basics.as_ref().and_then(Basics::location)
        );
    }

    #[test]
    fn test_basics_omitted_when_nothing_survives() {
        let d = doc(json!({
            "basics": {
                "name": "Ada",
                "email": "ada@example.com",
                "location": { "city": "London" },
                "profiles": [{ "network": "GitHub" }]
            },
            "work": [{ "name": "Acme" }]
        }));
        let mut state = SelectionState::new();
        state.select_section(SectionKey::Work, [0]);
        let out = to_json(&filter_document(&d, &state));
        assert!(out.get("basics").is_none());
    }

    #[test]
    fn test_flag_over_absent_field_is_noop() {
        let d = doc(json!({ "basics": { "name": "Ada" } }));
        let mut state = SelectionState::new();
        state.basics = BasicsSelection::everything(d.basics.as_ref());
        assert_eq!(
            to_json(&filter_document(&d, &state)),
            json!({ "basics": { "name": "Ada" } })
        );
    }

    #[test]
    fn test_single_profile_selected() {
        let d = doc(json!({
            "basics": {
                "profiles": [
                    { "network": "GitHub", "username": "ada" },
                    { "network": "Mastodon", "url": "https://mastodon.social/@ada" }
                ]
            }
        }));
        let mut state = SelectionState::new();
        state.basics =
            selection_from_fields(&[ContactField::Profile(1)], d.basics.as_ref());
        let out = to_json(&filter_document(&d, &state));
        assert_eq!(
            out,
            json!({
                "basics": {
                    "profiles": [
                        { "network": "Mastodon", "url": "https://mastodon.social/@ada" }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_profiles_key_omitted_when_none_selected() {
        let d = doc(json!({ "basics": { "name": "Ada", "profiles": [{ "network": "GitHub" }] } }));
        let mut state = SelectionState::new();
        state.basics = selection_from_fields(&[ContactField::Name], d.basics.as_ref());
        assert_eq!(
            to_json(&filter_document(&d, &state)),
            json!({ "basics": { "name": "Ada" } })
        );
    }

    #[test]
    fn test_filtering_is_a_fixed_point_under_select_everything() {
        let d = doc(json!({
            "basics": {
                "name": "Ada",
                "image": "ada.png",
                "location": { "city": "London", "address": "1 Main St", "postalCode": "N1" },
                "profiles": [{ "network": "GitHub" }, { "network": "Mastodon" }]
            },
            "work": [{ "name": "A" }, { "name": "B" }, { "name": "C" }],
            "skills": [{ "name": "Rust" }, { "name": "Go" }],
            "interests": [{ "name": "Chess" }]
        }));

        let mut state = SelectionState::new();
        state.select_section(SectionKey::Work, [0, 2]);
        state.select_section(SectionKey::Interests, [0]);
        state.basics = selection_from_fields(
            &[ContactField::Name, ContactField::Location, ContactField::Profile(1)],
            d.basics.as_ref(),
        );
        let first = filter_document(&d, &state);

        let written = serde_json::to_string_pretty(&first).unwrap();
        let as_input: ResumeDocument = serde_json::from_str(&written).unwrap();
        let second = filter_document(&as_input, &select_everything(&as_input));
        assert_eq!(second, first);
        assert_eq!(serde_json::to_string_pretty(&second).unwrap(), written);
    }

    #[test]
    fn test_kept_entry_is_byte_identical_to_source() {
        let raw = r#"{
            "work": [
                { "position": null, "name": "Acme", "url": "u", "endDate": "e" },
                { "name": "Skipped" }
            ],
            "skills": ["Rust", { "name": "Go", "level": 4, "keywords": [] }]
        }"#;
        let d: ResumeDocument = serde_json::from_str(raw).unwrap();
        let mut state = SelectionState::new();
        state.select_section(SectionKey::Work, [0]);
        state.select_section(SectionKey::Skills, [0, 1]);
        let out = filter_document(&d, &state);

        let work = out.work.unwrap();
        assert_eq!(
            serde_json::to_string(&work[0]).unwrap(),
            r#"{"position":null,"name":"Acme","url":"u","endDate":"e"}"#
        );
        assert_eq!(out.skills.unwrap(), d.skills.unwrap());
    }

    #[test]
    fn test_basics_members_copied_verbatim() {
        let d = doc(json!({
            "basics": {
                "phone": 5550100,
                "email": "",
                "location": { "postalCode": 12345, "city": "Springfield", "address": "1 Main St" }
            }
        }));
        let mut state = SelectionState::new();
        state.basics = selection_from_fields(
            &[ContactField::Phone, ContactField::Email, ContactField::Location],
            d.basics.as_ref(),
        );
        assert_eq!(
            to_json(&filter_document(&d, &state)),
            json!({ "basics": { "phone": 5550100, "location": { "city": "Springfield" } } })
        );
    }

    #[test]
    fn test_sections_emitted_only_when_active() {
        let d = doc(json!({
            "work": [{ "name": "A" }],
            "projects": [{ "name": "P" }]
        }));
        let mut state = SelectionState::new();
        state.select_section(SectionKey::Projects, [0]);
        let out = filter_document(&d, &state);
        assert!(out.work.is_none());
        assert_eq!(out.projects.map(|p| p.len()), Some(1));
    }

    #[test]
    fn test_filter_does_not_mutate_document() {
        let d = doc(json!({ "basics": { "location": { "address": "x", "city": "y" } } }));
        let before = d.clone();
        let mut state = SelectionState::new();
        state.basics = selection_from_fields(&[ContactField::Location], d.basics.as_ref());
        let _ = filter_document(&d, &state);
        assert_eq!(d, before);
    }
}
