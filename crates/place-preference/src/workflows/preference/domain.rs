use std::fmt;

use serde::{Deserialize, Serialize};

/// Department whose employees skip the domestic section.
pub const TECHNICAL_DEPARTMENT: &str = "Technical";

/// Marker written in place of data for a section excluded by department policy.
pub const NOT_APPLICABLE: &str = "N/A";

/// Option field value for a section filled slot by slot instead of by option-set.
pub const DIRECT_SELECTION_OPTION: &str = "direct";

/// Identifier wrapper for looked-up employees.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Employee details as returned by the lookup collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub id: EmployeeId,
    pub name: String,
    pub department: String,
}

/// The two independent selection groups of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Domestic,
    Foreign,
}

impl Section {
    pub const fn ordered() -> [Self; 2] {
        [Self::Domestic, Self::Foreign]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Domestic => "Section1",
            Self::Foreign => "Section2",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Domestic => "Domestic Places",
            Self::Foreign => "Foreign Places",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered place position within a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Place1,
    Place2,
    Place3,
}

impl Slot {
    pub const fn ordered() -> [Self; 3] {
        [Self::Place1, Self::Place2, Self::Place3]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Place1 => 0,
            Self::Place2 => 1,
            Self::Place3 => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Place1 => "place1",
            Self::Place2 => "place2",
            Self::Place3 => "place3",
        }
    }

    /// Slot that must be filled before this one is enabled.
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Place1 => None,
            Self::Place2 => Some(Self::Place1),
            Self::Place3 => Some(Self::Place2),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifier of one of the three option-sets a section offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionSetId {
    Option1,
    Option2,
    Option3,
}

impl OptionSetId {
    pub const fn ordered() -> [Self; 3] {
        [Self::Option1, Self::Option2, Self::Option3]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Option1 => 0,
            Self::Option2 => 1,
            Self::Option3 => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Option1 => "option1",
            Self::Option2 => "option2",
            Self::Option3 => "option3",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Option1 => "Option 1",
            Self::Option2 => "Option 2",
            Self::Option3 => "Option 3",
        }
    }

    /// Parses a bare (`option2`) or composite (`option2-p3`) identifier.
    ///
    /// Only the option-set part decides the result; the place suffix is dropped.
    pub fn parse(raw: &str) -> Result<Self, InvalidOption> {
        let trimmed = raw.trim();
        let option_part = match trimmed.split_once('-') {
            Some((head, _place)) => head,
            None => trimmed,
        };

        match option_part {
            "option1" => Ok(Self::Option1),
            "option2" => Ok(Self::Option2),
            "option3" => Ok(Self::Option3),
            _ => Err(InvalidOption {
                raw: raw.to_string(),
            }),
        }
    }
}

impl fmt::Display for OptionSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An option identifier outside the fixed catalog reached the expansion step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized option-set id '{raw}'")]
pub struct InvalidOption {
    pub raw: String,
}

/// Place name drawn from a section catalog. Only the catalog constructs these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Place(&'static str);

impl Place {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// User interaction that mutates the active record's selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    Slot {
        section: Section,
        slot: Slot,
        place: String,
    },
    OptionSet {
        section: Section,
        option: OptionSetId,
    },
}

impl SelectionEvent {
    pub fn section(&self) -> Section {
        match self {
            SelectionEvent::Slot { section, .. } | SelectionEvent::OptionSet { section, .. } => {
                *section
            }
        }
    }
}
