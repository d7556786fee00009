use serde::{Deserialize, Serialize};

use crate::types::PropertyType;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// What form of ownership a foreign buyer can register for a property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipClassification {
    /// Full freehold title is available (condominium units, within quota)
    Freehold,
    /// Land cannot be owned directly; a registered long-term lease (or a
    /// Thai company structure) is the workable route
    LeaseholdOnly,
    /// Direct ownership is not available at all
    NotAllowed,
}

/// Guidance attached to a result when the buyer is a foreign national.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeignerInfo {
    pub ownership: OwnershipClassification,
    /// A bank-issued Foreign Exchange Transaction record proving the funds
    /// were remitted from abroad is always required
    pub fet_required: bool,
    pub notes: Vec<String>,
    pub required_documents: Vec<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Classify what a foreign buyer can own and list the paperwork involved.
pub fn foreigner_guidance(property_type: PropertyType) -> ForeignerInfo {
    let (ownership, mut notes) = match property_type {
        PropertyType::Condo => (
            OwnershipClassification::Freehold,
            vec![
                "Foreign freehold ownership of condominium units is permitted, but the \
                 building-wide foreign quota (commonly 49% of saleable area) must be \
                 verified with the juristic person before transfer."
                    .to_string(),
            ],
        ),
        PropertyType::HouseWithLand => (
            OwnershipClassification::LeaseholdOnly,
            vec![
                "Foreign nationals cannot own land directly. A registered lease of up \
                 to 30 years (renewable) or a Thai limited company holding the land \
                 are the usual alternatives."
                    .to_string(),
            ],
        ),
        PropertyType::LandOnly => (
            OwnershipClassification::NotAllowed,
            vec!["Direct foreign ownership of land is not permitted under Thai law.".to_string()],
        ),
    };

    notes.push(
        "Purchase funds must be remitted from abroad in foreign currency; the receiving \
         bank issues the Foreign Exchange Transaction form required at the Land Department."
            .to_string(),
    );

    ForeignerInfo {
        ownership,
        fet_required: true,
        notes,
        required_documents: vec![
            "Passport (valid, with entry stamp)".to_string(),
            "Foreign Exchange Transaction form from the receiving Thai bank".to_string(),
            "Thai bank account book or statement".to_string(),
            "Power of attorney (if a representative attends the transfer)".to_string(),
        ],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condo_is_freehold_with_quota_note() {
        let info = foreigner_guidance(PropertyType::Condo);
        assert_eq!(info.ownership, OwnershipClassification::Freehold);
        assert!(info.notes.iter().any(|n| n.contains("49%")));
    }

    #[test]
    fn house_with_land_is_leasehold_only() {
        let info = foreigner_guidance(PropertyType::HouseWithLand);
        assert_eq!(info.ownership, OwnershipClassification::LeaseholdOnly);
        assert!(info.notes.iter().any(|n| n.contains("lease")));
    }

    #[test]
    fn land_only_not_allowed() {
        let info = foreigner_guidance(PropertyType::LandOnly);
        assert_eq!(info.ownership, OwnershipClassification::NotAllowed);
    }

    #[test]
    fn fet_always_required_with_document_checklist() {
        for property in [
            PropertyType::Condo,
            PropertyType::HouseWithLand,
            PropertyType::LandOnly,
        ] {
            let info = foreigner_guidance(property);
            assert!(info.fet_required);
            assert_eq!(info.required_documents.len(), 4);
            assert!(info
                .required_documents
                .iter()
                .any(|d| d.contains("Foreign Exchange Transaction")));
        }
    }
}
