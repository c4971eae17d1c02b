mod policy;
mod rules;

pub use policy::{DepartmentPolicy, SectionRequirement};
pub use rules::IncompleteSelection;

use super::domain::{
    EmployeeProfile, OptionSetId, Place, Section, DIRECT_SELECTION_OPTION, NOT_APPLICABLE,
};
use super::store::EmployeeRecord;
use tracing::debug;

/// Final value of one section after policy and expansion have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedSection {
    NotApplicable,
    Direct([Place; 3]),
    OptionSet {
        option: OptionSetId,
        places: [Place; 3],
    },
}

impl ResolvedSection {
    pub fn option_field(&self) -> &'static str {
        match self {
            ResolvedSection::NotApplicable => NOT_APPLICABLE,
            ResolvedSection::Direct(_) => DIRECT_SELECTION_OPTION,
            ResolvedSection::OptionSet { option, .. } => option.as_str(),
        }
    }

    pub fn place_fields(&self) -> [&'static str; 3] {
        match self {
            ResolvedSection::NotApplicable => [NOT_APPLICABLE; 3],
            ResolvedSection::Direct(places) | ResolvedSection::OptionSet { places, .. } => {
                places.map(Place::as_str)
            }
        }
    }
}

/// A record that passed the completeness check, ready for payload assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSelection {
    pub profile: EmployeeProfile,
    pub domestic: ResolvedSection,
    pub foreign: ResolvedSection,
}

impl ValidatedSelection {
    pub fn section(&self, section: Section) -> &ResolvedSection {
        match section {
            Section::Domestic => &self.domestic,
            Section::Foreign => &self.foreign,
        }
    }
}

/// Applies the department policy and reports every required section that is
/// still incomplete.
pub fn validate(record: &EmployeeRecord) -> Result<ValidatedSelection, IncompleteSelection> {
    let policy = DepartmentPolicy::for_department(record.department());
    let mut missing = Vec::new();
    let mut resolved = [ResolvedSection::NotApplicable; 2];

    for (position, section) in Section::ordered().into_iter().enumerate() {
        if policy.requirement(section) == SectionRequirement::NotApplicable {
            continue;
        }

        match rules::resolve_section(section, record.selection(section)) {
            Some(value) => resolved[position] = value,
            None => missing.push(section),
        }
    }

    if !missing.is_empty() {
        debug!(employee = %record.id(), ?missing, "selection incomplete");
        return Err(IncompleteSelection { missing });
    }

    let [domestic, foreign] = resolved;
    Ok(ValidatedSelection {
        profile: record.profile().clone(),
        domestic,
        foreign,
    })
}
