use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::catalog;
use super::domain::{
    InvalidOption, OptionSetId, Section, DIRECT_SELECTION_OPTION, NOT_APPLICABLE,
};
use super::store::EmployeeRecord;
use super::validation::{self, DepartmentPolicy, IncompleteSelection, SectionRequirement, ValidatedSelection};

/// Flat record posted to the sheet endpoint. Field names are the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    #[serde(rename = "userId")]
    user_id: String,
    department: String,
    section1_option: String,
    section1_place1: String,
    section1_place2: String,
    section1_place3: String,
    section2_option: String,
    section2_place1: String,
    section2_place2: String,
    section2_place3: String,
    #[serde(with = "iso_timestamp")]
    timestamp: DateTime<Utc>,
}

impl SubmissionPayload {
    /// Validates `record` and stamps the payload with the current time.
    pub fn build(record: &EmployeeRecord) -> Result<Self, IncompleteSelection> {
        Self::build_at(record, Utc::now())
    }

    pub fn build_at(
        record: &EmployeeRecord,
        submitted_at: DateTime<Utc>,
    ) -> Result<Self, IncompleteSelection> {
        let validated = validation::validate(record)?;
        Ok(Self::from_validated(&validated, submitted_at))
    }

    pub fn from_validated(selection: &ValidatedSelection, submitted_at: DateTime<Utc>) -> Self {
        let [section1_place1, section1_place2, section1_place3] =
            selection.domestic.place_fields().map(str::to_string);
        let [section2_place1, section2_place2, section2_place3] =
            selection.foreign.place_fields().map(str::to_string);

        Self {
            user_id: selection.profile.id.0.clone(),
            department: selection.profile.department.clone(),
            section1_option: selection.domestic.option_field().to_string(),
            section1_place1,
            section1_place2,
            section1_place3,
            section2_option: selection.foreign.option_field().to_string(),
            section2_place1,
            section2_place2,
            section2_place3,
            timestamp: submitted_at,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn section_option(&self, section: Section) -> &str {
        match section {
            Section::Domestic => &self.section1_option,
            Section::Foreign => &self.section2_option,
        }
    }

    pub fn section_places(&self, section: Section) -> [&str; 3] {
        match section {
            Section::Domestic => [
                self.section1_place1.as_str(),
                self.section1_place2.as_str(),
                self.section1_place3.as_str(),
            ],
            Section::Foreign => [
                self.section2_place1.as_str(),
                self.section2_place2.as_str(),
                self.section2_place3.as_str(),
            ],
        }
    }

    /// Values in sheet column order (A:K).
    pub fn sheet_row(&self) -> [String; 11] {
        [
            self.user_id.clone(),
            self.department.clone(),
            self.section1_option.clone(),
            self.section1_place1.clone(),
            self.section1_place2.clone(),
            self.section1_place3.clone(),
            self.section2_option.clone(),
            self.section2_place1.clone(),
            self.section2_place2.clone(),
            self.section2_place3.clone(),
            self.timestamp_iso(),
        ]
    }

    /// Re-checks a payload received over the wire against the catalog and the
    /// department policy.
    pub fn verify(&self) -> Result<(), PayloadRejection> {
        if self.user_id.trim().is_empty() {
            return Err(PayloadRejection::MissingUserId);
        }

        let policy = DepartmentPolicy::for_department(&self.department);
        for section in Section::ordered() {
            let option = self.section_option(section);
            let places = self.section_places(section);

            if policy.requirement(section) == SectionRequirement::NotApplicable {
                if option != NOT_APPLICABLE || places.iter().any(|place| *place != NOT_APPLICABLE)
                {
                    return Err(PayloadRejection::ExpectedNotApplicable { section });
                }
                continue;
            }

            if option == NOT_APPLICABLE {
                return Err(PayloadRejection::MissingSection { section });
            }

            verify_places(section, &places)?;
            if option != DIRECT_SELECTION_OPTION {
                let option_set = OptionSetId::parse(option)?;
                let expected = catalog::expand(section, option_set);
                if expected.iter().zip(places).any(|(want, got)| want.as_str() != got) {
                    return Err(PayloadRejection::PlaceMismatch {
                        section,
                        option: option_set,
                    });
                }
            }
        }

        Ok(())
    }
}

fn verify_places(section: Section, places: &[&str; 3]) -> Result<(), PayloadRejection> {
    for (position, place) in places.iter().enumerate() {
        if catalog::section_places(section).all(|known| known.as_str() != *place) {
            return Err(PayloadRejection::NotInCatalog {
                section,
                value: place.to_string(),
            });
        }
        if places[..position].contains(place) {
            return Err(PayloadRejection::DuplicatePlace {
                section,
                value: place.to_string(),
            });
        }
    }
    Ok(())
}

/// Reasons a received payload is refused by the sheet intake.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadRejection {
    #[error("userId is required")]
    MissingUserId,
    #[error("{section} is required for this department")]
    MissingSection { section: Section },
    #[error("{section} must be marked N/A for this department")]
    ExpectedNotApplicable { section: Section },
    #[error("'{value}' is not a permitted {section} place")]
    NotInCatalog { section: Section, value: String },
    #[error("{value} appears more than once in {section}")]
    DuplicatePlace { section: Section, value: String },
    #[error("{section} places do not match {option}")]
    PlaceMismatch {
        section: Section,
        option: OptionSetId,
    },
    #[error(transparent)]
    InvalidOption(#[from] InvalidOption),
}

mod iso_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|value| value.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
