use std::fmt;

use super::super::catalog;
use super::super::domain::Section;
use super::super::store::SectionSelection;
use super::ResolvedSection;

/// Submission attempted before every required section was completed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("please complete {}", MissingSections(.missing))]
pub struct IncompleteSelection {
    pub missing: Vec<Section>,
}

struct MissingSections<'a>(&'a [Section]);

impl fmt::Display for MissingSections<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, section) in self.0.iter().enumerate() {
            if position > 0 {
                f.write_str(" and ")?;
            }
            write!(f, "{} ({})", section.label(), section.title())?;
        }
        Ok(())
    }
}

pub(crate) fn resolve_section(
    section: Section,
    selection: Option<&SectionSelection>,
) -> Option<ResolvedSection> {
    match selection? {
        SectionSelection::Direct(slots) => slots.places().map(ResolvedSection::Direct),
        SectionSelection::OptionSet(option) => Some(ResolvedSection::OptionSet {
            option: *option,
            places: catalog::expand(section, *option),
        }),
    }
}
