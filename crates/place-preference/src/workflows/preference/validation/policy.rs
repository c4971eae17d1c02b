use super::super::domain::{Section, TECHNICAL_DEPARTMENT};

/// Whether a section has to be completed before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionRequirement {
    Required,
    NotApplicable,
}

/// Fixed per-department rule deciding which sections are mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartmentPolicy {
    domestic: SectionRequirement,
    foreign: SectionRequirement,
}

impl DepartmentPolicy {
    pub fn for_department(department: &str) -> Self {
        if department == TECHNICAL_DEPARTMENT {
            Self {
                domestic: SectionRequirement::NotApplicable,
                foreign: SectionRequirement::Required,
            }
        } else {
            Self {
                domestic: SectionRequirement::Required,
                foreign: SectionRequirement::Required,
            }
        }
    }

    pub fn requirement(&self, section: Section) -> SectionRequirement {
        match section {
            Section::Domestic => self.domestic,
            Section::Foreign => self.foreign,
        }
    }

    pub fn required_sections(&self) -> Vec<Section> {
        Section::ordered()
            .into_iter()
            .filter(|section| self.requirement(*section) == SectionRequirement::Required)
            .collect()
    }
}
