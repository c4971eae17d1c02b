use std::collections::BTreeMap;

use tracing::debug;

use super::catalog;
use super::directory::{DirectoryError, EmployeeDirectory};
use super::domain::{
    EmployeeId, EmployeeProfile, OptionSetId, Place, Section, SelectionEvent, Slot,
};

/// Places chosen slot by slot. A slot is only ever filled when every earlier slot is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotSelections {
    places: [Option<Place>; 3],
}

impl SlotSelections {
    pub fn get(&self, slot: Slot) -> Option<Place> {
        self.places[slot.index()]
    }

    pub fn is_enabled(&self, slot: Slot) -> bool {
        slot.previous()
            .map_or(true, |previous| self.get(previous).is_some())
    }

    pub fn is_complete(&self) -> bool {
        self.places.iter().all(Option::is_some)
    }

    /// The ordered triple once all three slots are filled.
    pub fn places(&self) -> Option<[Place; 3]> {
        match self.places {
            [Some(first), Some(second), Some(third)] => Some([first, second, third]),
            _ => None,
        }
    }

    fn holds_elsewhere(&self, slot: Slot, place: Place) -> bool {
        Slot::ordered()
            .into_iter()
            .any(|other| other != slot && self.get(other) == Some(place))
    }

    fn set(&mut self, slot: Slot, place: Place) {
        self.places[slot.index()] = Some(place);
    }

    fn clear_from(&mut self, slot: Slot) {
        for position in &mut self.places[slot.index()..] {
            *position = None;
        }
    }
}

/// Current choice for one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionSelection {
    Direct(SlotSelections),
    OptionSet(OptionSetId),
}

/// The loaded employee together with in-progress selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRecord {
    profile: EmployeeProfile,
    selections: BTreeMap<Section, SectionSelection>,
}

impl EmployeeRecord {
    pub fn new(profile: EmployeeProfile) -> Self {
        Self {
            profile,
            selections: BTreeMap::new(),
        }
    }

    pub fn profile(&self) -> &EmployeeProfile {
        &self.profile
    }

    pub fn id(&self) -> &EmployeeId {
        &self.profile.id
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn department(&self) -> &str {
        &self.profile.department
    }

    pub fn selection(&self, section: Section) -> Option<&SectionSelection> {
        self.selections.get(&section)
    }

    /// Choices offered for `slot`: the section catalog minus places held by
    /// the other slots. Empty while the slot is still disabled.
    pub fn available_choices(&self, section: Section, slot: Slot) -> Vec<Place> {
        let slots = self.direct_slots(section);
        if !slots.is_enabled(slot) {
            return Vec::new();
        }

        catalog::section_places(section)
            .filter(|place| !slots.holds_elsewhere(slot, *place))
            .collect()
    }

    fn direct_slots(&self, section: Section) -> SlotSelections {
        match self.selections.get(&section) {
            Some(SectionSelection::Direct(slots)) => *slots,
            _ => SlotSelections::default(),
        }
    }

    fn set_slot(&mut self, section: Section, slot: Slot, raw: &str) -> Result<Place, SelectionError> {
        let mut slots = self.direct_slots(section);
        if let Some(previous) = slot.previous() {
            if slots.get(previous).is_none() {
                return Err(SelectionError::OutOfOrder {
                    section,
                    slot,
                    requires: previous,
                });
            }
        }

        let place =
            catalog::find_place(section, raw).ok_or_else(|| SelectionError::NotInCatalog {
                section,
                value: raw.trim().to_string(),
            })?;
        if slots.holds_elsewhere(slot, place) {
            return Err(SelectionError::AlreadyChosen { section, place });
        }

        slots.set(slot, place);
        self.selections
            .insert(section, SectionSelection::Direct(slots));
        Ok(place)
    }

    fn choose_option_set(&mut self, section: Section, option: OptionSetId) -> [Place; 3] {
        self.selections
            .insert(section, SectionSelection::OptionSet(option));
        catalog::expand(section, option)
    }

    fn clear_slot(&mut self, section: Section, slot: Slot) {
        if let Some(SectionSelection::Direct(slots)) = self.selections.get_mut(&section) {
            slots.clear_from(slot);
            if slots.get(Slot::Place1).is_none() {
                self.selections.remove(&section);
            }
        }
    }
}

/// Single-instance owner of the currently loaded record.
#[derive(Debug, Default)]
pub struct EmployeeRecordStore {
    active: Option<EmployeeRecord>,
}

impl EmployeeRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&EmployeeRecord> {
        self.active.as_ref()
    }

    /// Looks up `id` and installs a fresh record with no selections.
    ///
    /// Any previous record is dropped before the lookup starts, so a failed
    /// lookup always leaves the store empty.
    pub async fn load<D>(
        &mut self,
        directory: &D,
        id: &EmployeeId,
    ) -> Result<&EmployeeRecord, DirectoryError>
    where
        D: EmployeeDirectory,
    {
        self.active = None;
        let profile = directory.fetch_employee(id).await?;
        debug!(employee = %profile.id, department = %profile.department, "employee record loaded");
        Ok(self.active.insert(EmployeeRecord::new(profile)))
    }

    pub fn apply(&mut self, event: SelectionEvent) -> Result<(), SelectionError> {
        match event {
            SelectionEvent::Slot {
                section,
                slot,
                place,
            } => self.set_slot(section, slot, &place).map(|_| ()),
            SelectionEvent::OptionSet { section, option } => {
                self.choose_option_set(section, option).map(|_| ())
            }
        }
    }

    /// Fills `slot` of `section`. Leaves the record untouched on any error.
    pub fn set_slot(
        &mut self,
        section: Section,
        slot: Slot,
        place: &str,
    ) -> Result<Place, SelectionError> {
        self.record_mut()?.set_slot(section, slot, place)
    }

    /// Replaces whatever `section` held with `option`, returning the expanded places.
    pub fn choose_option_set(
        &mut self,
        section: Section,
        option: OptionSetId,
    ) -> Result<[Place; 3], SelectionError> {
        Ok(self.record_mut()?.choose_option_set(section, option))
    }

    /// Clears `slot` and every later slot of the section.
    pub fn clear_slot(&mut self, section: Section, slot: Slot) -> Result<(), SelectionError> {
        self.record_mut()?.clear_slot(section, slot);
        Ok(())
    }

    pub fn clear_section(&mut self, section: Section) -> Result<(), SelectionError> {
        self.record_mut()?.selections.remove(&section);
        Ok(())
    }

    pub fn available_choices(&self, section: Section, slot: Slot) -> Vec<Place> {
        self.active
            .as_ref()
            .map(|record| record.available_choices(section, slot))
            .unwrap_or_default()
    }

    fn record_mut(&mut self) -> Result<&mut EmployeeRecord, SelectionError> {
        self.active.as_mut().ok_or(SelectionError::NoActiveRecord)
    }
}

/// Rejected selection mutation. The record is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("no employee record is loaded")]
    NoActiveRecord,
    #[error("{section} {slot} requires {requires} to be selected first")]
    OutOfOrder {
        section: Section,
        slot: Slot,
        requires: Slot,
    },
    #[error("'{value}' is not a permitted {section} place")]
    NotInCatalog { section: Section, value: String },
    #[error("{place} is already selected in {section}")]
    AlreadyChosen { section: Section, place: Place },
}
