//! Project entity and DTOs.
//!
//! A project is one customer's journey through the configurator: the
//! plot/house selection, the calculator input and result, derived progress,
//! and contact details collected at booking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calculation::{CalculationInput, CalculationResult};

/// How the customer wants the house built.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConstructionFormat {
    #[serde(rename = "self")]
    SelfBuild,
    #[serde(rename = "turnkey")]
    Turnkey,
}

impl ConstructionFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelfBuild => "self",
            Self::Turnkey => "turnkey",
        }
    }
}

/// Plot/house choice made on the map and catalog screens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSelection {
    #[serde(default)]
    pub plot_id: Option<String>,
    #[serde(default)]
    pub construction_format: Option<ConstructionFormat>,
    #[serde(default)]
    pub house_project_id: Option<String>,
    #[serde(default)]
    pub booking_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Wizard step identifiers, in display order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStepKey {
    Selection,
    Parameters,
    Summary,
    Contacts,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressStep {
    pub key: ProgressStepKey,
    pub label: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressState {
    pub steps: Vec<ProgressStep>,
    /// Always a multiple of 25.
    pub percent: u8,
}

/// Project entity as persisted and returned to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<UserSelection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation_input: Option<CalculationInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation_result: Option<CalculationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
}

/// Fields the caller may supply when creating a project.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub selection: Option<UserSelection>,
    #[serde(default)]
    pub contact: Option<ContactInfo>,
}

/// Partial update applied to an existing project. `None` fields are left
/// untouched; `updated_at` is bumped by the store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub selection: Option<UserSelection>,
    #[serde(default)]
    pub calculation_input: Option<CalculationInput>,
    #[serde(default)]
    pub calculation_result: Option<CalculationResult>,
    #[serde(default)]
    pub progress: Option<ProgressState>,
    #[serde(default)]
    pub contact: Option<ContactInfo>,
}

impl Project {
    /// Build a fresh project from creation fields.
    pub fn from_new(new: NewProject) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            name: new.name,
            selection: new.selection,
            calculation_input: None,
            calculation_result: None,
            progress: None,
            contact: new.contact,
        }
    }

    /// Merge a patch into this project, bumping `updated_at`.
    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(selection) = patch.selection {
            self.selection = Some(selection);
        }
        if let Some(input) = patch.calculation_input {
            self.calculation_input = Some(input);
        }
        if let Some(result) = patch.calculation_result {
            self.calculation_result = Some(result);
        }
        if let Some(progress) = patch.progress {
            self.progress = Some(progress);
        }
        if let Some(contact) = patch.contact {
            self.contact = Some(contact);
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_merges_only_supplied_fields() {
        let mut project = Project::from_new(NewProject {
            name: Some("Дом у озера".into()),
            ..Default::default()
        });
        let before = project.updated_at;

        project.apply(ProjectPatch {
            contact: Some(ContactInfo {
                email: Some("ivan@example.com".into()),
                ..Default::default()
            }),
            ..Default::default()
        });

        assert_eq!(project.name.as_deref(), Some("Дом у озера"));
        assert_eq!(
            project.contact.as_ref().unwrap().email.as_deref(),
            Some("ivan@example.com")
        );
        assert!(project.updated_at >= before);
    }

    #[test]
    fn construction_format_wire_values() {
        assert_eq!(
            serde_json::to_value(ConstructionFormat::SelfBuild).unwrap(),
            "self"
        );
        assert_eq!(
            serde_json::to_value(ConstructionFormat::Turnkey).unwrap(),
            "turnkey"
        );
    }
}
