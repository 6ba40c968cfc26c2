//! Style profile and training pair types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::instructions::EditingInstructions;

/// A photographer's derived editing aesthetic. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    pub id: String,
    pub name: String,
    pub description: String,
    pub instructions: EditingInstructions,
    pub created_at: DateTime<Utc>,
}

impl StyleProfile {
    /// Mint a profile with a fresh id and the current timestamp.
    pub fn create(name: Option<String>, instructions: EditingInstructions) -> Self {
        let id = Uuid::new_v4().to_string();
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("Style {}", &id[..8]));
        Self {
            description: instructions.description.clone(),
            id,
            name,
            instructions,
            created_at: Utc::now(),
        }
    }
}

/// One raw/edited image pair as decoded bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingPairInput {
    pub raw: Vec<u8>,
    pub edited: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_mints_unique_ids() {
        let a = StyleProfile::create(None, EditingInstructions::neutral());
        let b = StyleProfile::create(None, EditingInstructions::neutral());
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_create_falls_back_to_short_id_name() {
        let profile = StyleProfile::create(Some("   ".to_string()), EditingInstructions::neutral());
        assert_eq!(profile.name, format!("Style {}", &profile.id[..8]));
    }

    #[test]
    fn test_create_copies_description() {
        let instructions = EditingInstructions {
            description: "Faded film look".to_string(),
            ..EditingInstructions::neutral()
        };
        let profile = StyleProfile::create(Some("Nairobi Dusk".to_string()), instructions);
        assert_eq!(profile.name, "Nairobi Dusk");
        assert_eq!(profile.description, "Faded film look");
    }

    #[test]
    fn test_profile_serializes_timestamp_as_rfc3339() {
        let profile = StyleProfile::create(Some("A".to_string()), EditingInstructions::neutral());
        let json = serde_json::to_value(&profile).unwrap();
        let ts = json["created_at"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(ts).is_ok());
    }
}
