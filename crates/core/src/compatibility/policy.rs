//! Business classification of rule checks.
//!
//! Which failures block a build and which are advisory is fixed policy keyed
//! on what a rule compares, not a column on the rule record.

use super::rules::{CompatibilityRule, IssueCode};

/// What kind of physical constraint a rule expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCheck {
    Socket,
    MemoryType,
    MemorySpeed,
    MemorySlots,
    MemoryCapacity,
    Wattage,
    Clearance,
    Generic,
}

// Matched in order; the first hit wins (`MB_MAX_RAM_SPEED_MHZ` is a speed).
const CLASSIFICATION: &[(RuleCheck, &[&str])] = &[
    (RuleCheck::Socket, &["SOCKET"]),
    (RuleCheck::MemorySpeed, &["SPEED"]),
    (RuleCheck::MemoryType, &["RAM_TYPE", "MEMORY_TYPE"]),
    (RuleCheck::MemorySlots, &["MODULES", "SLOTS"]),
    (RuleCheck::MemoryCapacity, &["CAPACITY", "MAX_RAM"]),
    (RuleCheck::Wattage, &["WATT", "PSU_W"]),
    (RuleCheck::Clearance, &["LENGTH", "HEIGHT", "CLEARANCE", "_MM"]),
];

impl RuleCheck {
    /// Classify a rule from the attribute keys it reads.
    pub fn classify(rule: &CompatibilityRule) -> Self {
        let keys: Vec<String> = rule
            .attribute_keys()
            .iter()
            .map(|k| k.to_ascii_uppercase())
            .collect();
        CLASSIFICATION
            .iter()
            .find(|(_, markers)| {
                keys.iter()
                    .any(|key| markers.iter().any(|marker| key.contains(marker)))
            })
            .map_or(Self::Generic, |(check, _)| *check)
    }

    pub fn issue_code(self) -> IssueCode {
        match self {
            Self::Socket => IssueCode::SocketMismatch,
            Self::MemoryType => IssueCode::RamTypeMismatch,
            Self::MemorySpeed => IssueCode::RamSpeedAboveRated,
            Self::MemorySlots => IssueCode::RamSlotsExceeded,
            Self::MemoryCapacity => IssueCode::RamCapacityExceeded,
            Self::Wattage => IssueCode::InsufficientWattage,
            Self::Clearance => IssueCode::ClearanceExceeded,
            Self::Generic => IssueCode::RuleViolation,
        }
    }

    /// Advisory checks describe a build that works but underperforms.
    pub fn is_advisory(self) -> bool {
        matches!(self, Self::MemorySpeed)
    }

    /// Sentence used when the rule record has no note.
    pub fn fallback_note(self) -> Option<&'static str> {
        match self {
            Self::Socket => Some("CPU socket does not match the mainboard socket"),
            Self::MemoryType => Some("Memory type is not supported by the mainboard"),
            Self::MemorySpeed => Some("Memory will run below its rated speed on this mainboard"),
            Self::MemorySlots => Some("Not enough memory slots for the selected modules"),
            Self::MemoryCapacity => Some("Total memory exceeds the mainboard maximum"),
            Self::Wattage => Some("Power supply wattage is too low"),
            Self::Clearance => Some("Component does not fit inside the case"),
            Self::Generic => None,
        }
    }
}
