//! Contact Field Selector Model: the selectable members of `basics`.
//!
//! Produces the ordered choices shown in the contacts prompt and turns a chosen subset
//! back into a [`BasicsSelection`].

use serde_json::{Map, Value};

use crate::models::resume::{text_of, Basics};
use crate::selection::state::BasicsSelection;

const PROFILE_SEPARATOR: &str = " – ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Label,
    Image,
    Email,
    Phone,
    Url,
    Summary,
    Location,
    StreetAddress,
    Profile(usize),
}

/// One row of the contacts prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactChoice {
    pub field: ContactField,
    pub title: String,
    pub default_selected: bool,
}

impl ContactChoice {
    fn new(field: ContactField, title: impl Into<String>) -> Self {
        Self {
            field,
            title: title.into(),
            default_selected: true,
        }
    }

    fn unselected(mut self) -> Self {
        self.default_selected = false;
        self
    }
}

/// Lists the selectable contact fields of `basics`, in prompt order.
///
/// Simple members appear only when set. Location appears when the location object exists;
/// street address gets its own row only when that location carries an address. Every
/// profile is offered, complete or not.
pub fn contact_choices(basics: Option<&Basics>) -> Vec<ContactChoice> {
    let Some(basics) = basics else {
        return Vec::new();
    };

    let mut choices = Vec::new();

    if let Some(name) = basics.text("name") {
        choices.push(ContactChoice::new(ContactField::Name, format!("Name: {name}")));
    }
    if let Some(label) = basics.text("label") {
        choices.push(ContactChoice::new(ContactField::Label, format!("Label: {label}")));
    }
    if basics.member("image").is_some() {
        choices.push(ContactChoice::new(ContactField::Image, "Image").unselected());
    }
    if let Some(email) = basics.text("email") {
        choices.push(ContactChoice::new(ContactField::Email, format!("Email: {email}")));
    }
    if let Some(phone) = basics.text("phone") {
        choices.push(ContactChoice::new(ContactField::Phone, format!("Phone: {phone}")));
    }
    if let Some(url) = basics.text("url") {
        choices.push(ContactChoice::new(ContactField::Url, format!("Website: {url}")));
    }
    if basics.member("summary").is_some() {
        choices.push(ContactChoice::new(ContactField::Summary, "Summary"));
    }

    if let Some(location) = basics.location() {
        choices.push(ContactChoice::new(
            ContactField::Location,
            location_title(location),
        ));
        if let Some(address) = location.get("address").and_then(text_of) {
            choices.push(ContactChoice::new(
                ContactField::StreetAddress,
                format!("Street address: {address}"),
            ));
        }
    }

    for (index, profile) in basics.profiles().iter().enumerate() {
        choices.push(ContactChoice::new(
            ContactField::Profile(index),
            profile_title(profile, index),
        ));
    }

    choices
}

fn location_title(location: &Map<String, Value>) -> String {
    let parts: Vec<String> = ["city", "region", "countryCode"]
        .into_iter()
        .filter_map(|key| location.get(key).and_then(text_of))
        .collect();
    if parts.is_empty() {
        "Location".to_string()
    } else {
        format!("Location ({})", parts.join(", "))
    }
}

/// `Profile: network – username – url` from whichever are set, else `Profile #N` (1-based).
/// A profile that is not an object has none of them.
pub fn profile_title(profile: &Value, index: usize) -> String {
    let parts: Vec<String> = ["network", "username", "url"]
        .into_iter()
        .filter_map(|key| profile.get(key).and_then(text_of))
        .collect();
    if parts.is_empty() {
        format!("Profile #{}", index + 1)
    } else {
        format!("Profile: {}", parts.join(PROFILE_SEPARATOR))
    }
}

/// Converts the chosen contact fields into a [`BasicsSelection`].
///
/// Anything not chosen is excluded. The street-address flag is forced false when location
/// was not chosen or the source location has no address.
pub fn selection_from_fields(chosen: &[ContactField], basics: Option<&Basics>) -> BasicsSelection {
    let has = |field: ContactField| chosen.contains(&field);

    let mut selection = BasicsSelection::default();
    selection.include_name = has(ContactField::Name);
    selection.include_label = has(ContactField::Label);
    selection.include_image = has(ContactField::Image);
    selection.include_email = has(ContactField::Email);
    selection.include_phone = has(ContactField::Phone);
    selection.include_url = has(ContactField::Url);
    selection.include_summary = has(ContactField::Summary);
    selection.profiles = chosen
        .iter()
        .filter_map(|field| match field {
            ContactField::Profile(index) => Some(*index),
            _ => None,
        })
        .collect();
    selection.set_location(has(ContactField::Location));
    selection.set_street_address(has(ContactField::StreetAddress), basics);
    selection
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
