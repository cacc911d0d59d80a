//! Listing fields — the five free-text attributes of a recruitment listing
//! and their canonical presentation order.

use serde::{Deserialize, Serialize};

/// One of the five named listing attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingField {
    StudyTitle,
    Purpose,
    Pitch,
    ParticipantTasks,
    Compensation,
}

impl ListingField {
    /// Canonical field order, used for both dispatch and presentation.
    pub const ALL: [ListingField; 5] = [
        ListingField::StudyTitle,
        ListingField::Purpose,
        ListingField::Pitch,
        ListingField::ParticipantTasks,
        ListingField::Compensation,
    ];

    /// The snake_case field name used in prompts and result keys.
    pub fn name(self) -> &'static str {
        match self {
            ListingField::StudyTitle => "study_title",
            ListingField::Purpose => "purpose",
            ListingField::Pitch => "pitch",
            ListingField::ParticipantTasks => "participant_tasks",
            ListingField::Compensation => "compensation",
        }
    }
}

/// Raw listing input, one request's worth. Missing request fields behave
/// like empty ones; nothing outlives the optimization call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub study_title: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub pitch: String,
    #[serde(default)]
    pub participant_tasks: String,
    #[serde(default)]
    pub compensation: String,
}

impl Listing {
    pub fn field(&self, field: ListingField) -> &str {
        match field {
            ListingField::StudyTitle => &self.study_title,
            ListingField::Purpose => &self.purpose,
            ListingField::Pitch => &self.pitch,
            ListingField::ParticipantTasks => &self.participant_tasks,
            ListingField::Compensation => &self.compensation,
        }
    }
}

/// Optimized text per field. A key appears only if its input was non-blank
/// and its completion succeeded; declaration order is the canonical
/// presentation order, so serialized output lists fields canonically.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OptimizedListing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_tasks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compensation: Option<String>,
}

impl OptimizedListing {
    pub fn set(&mut self, field: ListingField, text: String) {
        let slot = match field {
            ListingField::StudyTitle => &mut self.study_title,
            ListingField::Purpose => &mut self.purpose,
            ListingField::Pitch => &mut self.pitch,
            ListingField::ParticipantTasks => &mut self.participant_tasks,
            ListingField::Compensation => &mut self.compensation,
        };
        *slot = Some(text);
    }

    pub fn get(&self, field: ListingField) -> Option<&str> {
        match field {
            ListingField::StudyTitle => self.study_title.as_deref(),
            ListingField::Purpose => self.purpose.as_deref(),
            ListingField::Pitch => self.pitch.as_deref(),
            ListingField::ParticipantTasks => self.participant_tasks.as_deref(),
            ListingField::Compensation => self.compensation.as_deref(),
        }
    }

    /// Number of fields that were optimized.
    pub fn len(&self) -> usize {
        ListingField::ALL
            .iter()
            .filter(|field| self.get(**field).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_matches_field_names() {
        let names: Vec<&str> = ListingField::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(
            names,
            vec![
                "study_title",
                "purpose",
                "pitch",
                "participant_tasks",
                "compensation"
            ]
        );
    }

    #[test]
    fn listing_deserializes_with_missing_fields() {
        let listing: Listing = serde_json::from_str(r#"{"purpose": "Why it matters."}"#).unwrap();
        assert_eq!(listing.purpose, "Why it matters.");
        assert_eq!(listing.study_title, "");
        assert_eq!(listing.compensation, "");
    }

    #[test]
    fn result_serializes_in_canonical_order_and_skips_missing_keys() {
        let mut result = OptimizedListing::default();
        result.set(ListingField::Compensation, "You get $50.".to_string());
        result.set(ListingField::Purpose, "Because.".to_string());

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"purpose":"Because.","compensation":"You get $50."}"#);
    }

    #[test]
    fn len_counts_only_set_fields() {
        let mut result = OptimizedListing::default();
        assert!(result.is_empty());

        result.set(ListingField::Pitch, "Join us.".to_string());
        assert_eq!(result.len(), 1);
        assert!(!result.is_empty());
    }
}
