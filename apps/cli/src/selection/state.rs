use std::collections::BTreeSet;

use crate::models::resume::{has_street_address, Basics};
use crate::selection::catalog::SectionKey;

/// Which members of `basics` survive filtering.
///
/// `include_street_address` is private: it can only be effectively true while location is
/// included and the source location actually carries an address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicsSelection {
    pub include_name: bool,
    pub include_label: bool,
    pub include_image: bool,
    pub include_email: bool,
    pub include_phone: bool,
    pub include_url: bool,
    pub include_summary: bool,
    pub include_location: bool,
    include_street_address: bool,
    pub profiles: BTreeSet<usize>,
}

impl BasicsSelection {
    /// Selects every member, every profile and the street address when the source has one.
    #[cfg(test)]
    pub fn everything(basics: Option<&Basics>) -> Self {
        let profile_count = basics.map(|b| b.profiles().len()).unwrap_or(0);
        let mut selection = BasicsSelection {
            include_name: true,
            include_label: true,
            include_image: true,
            include_email: true,
            include_phone: true,
            include_url: true,
            include_summary: true,
            include_location: true,
            include_street_address: false,
            profiles: (0..profile_count).collect(),
        };
        selection.set_street_address(true, basics);
        selection
    }

    pub fn include_street_address(&self) -> bool {
        self.include_street_address && self.include_location
    }

    /// Requests street-address inclusion. The flag is forced false when location is not
    /// included or the source location has no address.
    pub fn set_street_address(&mut self, wanted: bool, basics: Option<&Basics>) {
        let has_address = basics
            .and_then(Basics::location)
            .is_some_and(has_street_address);
        self.include_street_address = wanted && self.include_location && has_address;
    }

    pub fn set_location(&mut self, include: bool) {
        self.include_location = include;
        if !include {
            self.include_street_address = false;
        }
    }
}

/// Items chosen within one active section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSelection {
    pub key: SectionKey,
    pub indices: BTreeSet<usize>,
}

/// Everything the user chose in one run. Sections are kept in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub sections: Vec<SectionSelection>,
    pub basics: BasicsSelection,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the chosen items for a section. Re-selecting a section replaces its indices
    /// in place.
    pub fn select_section(&mut self, key: SectionKey, indices: impl IntoIterator<Item = usize>) {
        let indices: BTreeSet<usize> = indices.into_iter().collect();
        match self.sections.iter_mut().find(|s| s.key == key) {
            Some(existing) => existing.indices = indices,
            None => self.sections.push(SectionSelection { key, indices }),
        }
    }
}
