use crate::models::{AllowedSubstitute, ApprovedPortion};

/// Clinician-approved substitutes, keyed by (patient, original food).
pub trait AllowedSubstituteStore {
    fn get(&self, patient_id: &str, original_food_id: &str) -> Vec<ApprovedPortion>;

    /// Add `approved`, replacing an entry for the same substitute food.
    fn add(&mut self, patient_id: &str, original_food_id: &str, approved: ApprovedPortion);

    /// Returns whether an entry was removed.
    fn remove(
        &mut self,
        patient_id: &str,
        original_food_id: &str,
        substitute_food_id: &str,
    ) -> bool;
}

/// Linear in-memory store. Not synchronized; one writer per patient session.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAllowedSubstitutes {
    entries: Vec<AllowedSubstitute>,
}

impl InMemoryAllowedSubstitutes {
    pub fn new(entries: Vec<AllowedSubstitute>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[AllowedSubstitute] {
        &self.entries
    }

    fn entry(&self, patient_id: &str, original_food_id: &str) -> Option<&AllowedSubstitute> {
        self.entries
            .iter()
            .find(|e| e.patient_id == patient_id && e.original_food_id == original_food_id)
    }
}

impl AllowedSubstituteStore for InMemoryAllowedSubstitutes {
    fn get(&self, patient_id: &str, original_food_id: &str) -> Vec<ApprovedPortion> {
        self.entry(patient_id, original_food_id)
            .map(|e| e.substitutes.clone())
            .unwrap_or_default()
    }

    fn add(&mut self, patient_id: &str, original_food_id: &str, approved: ApprovedPortion) {
        let position = self
            .entries
            .iter()
            .position(|e| e.patient_id == patient_id && e.original_food_id == original_food_id);
        let entry = match position {
            Some(i) => &mut self.entries[i],
            None => {
                self.entries.push(AllowedSubstitute::new(patient_id, original_food_id));
                let last = self.entries.len() - 1;
                &mut self.entries[last]
            }
        };
        entry.upsert(approved);
    }

    fn remove(
        &mut self,
        patient_id: &str,
        original_food_id: &str,
        substitute_food_id: &str,
    ) -> bool {
        let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.patient_id == patient_id && e.original_food_id == original_food_id)
        else {
            return false;
        };
        let removed = entry.remove(substitute_food_id);
        self.entries.retain(|e| !e.substitutes.is_empty());
        removed
    }
}
