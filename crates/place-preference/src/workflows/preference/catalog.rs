use serde::Serialize;

use super::domain::{OptionSetId, Place, Section, Slot};

/// Fixed bundle of three ordered places selectable as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSet {
    pub id: OptionSetId,
    pub places: [Place; 3],
}

const DOMESTIC_OPTION_SETS: [OptionSet; 3] = [
    OptionSet {
        id: OptionSetId::Option1,
        places: [
            Place::new("Mumbai"),
            Place::new("Delhi"),
            Place::new("Kolkata"),
        ],
    },
    OptionSet {
        id: OptionSetId::Option2,
        places: [
            Place::new("Bengaluru"),
            Place::new("Chennai"),
            Place::new("Hyderabad"),
        ],
    },
    OptionSet {
        id: OptionSetId::Option3,
        places: [
            Place::new("Ahmedabad"),
            Place::new("Pune"),
            Place::new("Jaipur"),
        ],
    },
];

const FOREIGN_OPTION_SETS: [OptionSet; 3] = [
    OptionSet {
        id: OptionSetId::Option1,
        places: [
            Place::new("New York"),
            Place::new("London"),
            Place::new("Tokyo"),
        ],
    },
    OptionSet {
        id: OptionSetId::Option2,
        places: [
            Place::new("Paris"),
            Place::new("Dubai"),
            Place::new("Singapore"),
        ],
    },
    OptionSet {
        id: OptionSetId::Option3,
        places: [
            Place::new("Berlin"),
            Place::new("Sydney"),
            Place::new("Toronto"),
        ],
    },
];

pub fn option_sets(section: Section) -> &'static [OptionSet; 3] {
    match section {
        Section::Domestic => &DOMESTIC_OPTION_SETS,
        Section::Foreign => &FOREIGN_OPTION_SETS,
    }
}

/// Expands an option-set into its ordered place triple.
pub fn expand(section: Section, option: OptionSetId) -> [Place; 3] {
    option_sets(section)[option.index()].places
}

/// Every place a section permits, in catalog order.
pub fn section_places(section: Section) -> impl Iterator<Item = Place> {
    option_sets(section)
        .iter()
        .flat_map(|set| set.places.into_iter())
}

/// Resolves user-entered text to the catalog's spelling of a place.
pub fn find_place(section: Section, name: &str) -> Option<Place> {
    let needle = name.trim();
    section_places(section).find(|place| place.as_str().eq_ignore_ascii_case(needle))
}

pub fn place_id(slot: Slot) -> String {
    format!("p{}", slot.index() + 1)
}

/// Radio value of a single cell in the option grid, e.g. `option2-p3`.
pub fn composite_id(option: OptionSetId, slot: Slot) -> String {
    format!("{}-{}", option.as_str(), place_id(slot))
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionCatalogView {
    pub section: &'static str,
    pub title: &'static str,
    pub option_sets: Vec<OptionSetView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionSetView {
    pub id: &'static str,
    pub name: &'static str,
    pub places: Vec<PlaceView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaceView {
    pub id: String,
    pub name: &'static str,
}

pub fn catalog_view() -> Vec<SectionCatalogView> {
    Section::ordered()
        .into_iter()
        .map(|section| SectionCatalogView {
            section: section.label(),
            title: section.title(),
            option_sets: option_sets(section)
                .iter()
                .map(|set| OptionSetView {
                    id: set.id.as_str(),
                    name: set.id.label(),
                    places: Slot::ordered()
                        .into_iter()
                        .zip(set.places)
                        .map(|(slot, place)| PlaceView {
                            id: place_id(slot),
                            name: place.as_str(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}
