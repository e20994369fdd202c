//! Entry category and crossing direction enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who or what crossed the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "entry_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// A resident of the village.
    Resident,
    /// A visitor admitted on behalf of a household.
    Guest,
    /// A courier or delivery rider.
    Delivery,
    /// A worker entering under a construction permit.
    ConstructionWorker,
    /// Emergency services.
    Emergency,
}

impl EntryType {
    /// Return the entry type as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resident => "resident",
            Self::Guest => "guest",
            Self::Delivery => "delivery",
            Self::ConstructionWorker => "construction_worker",
            Self::Emergency => "emergency",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a gate crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gate_direction", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Coming into the village.
    Entry,
    /// Leaving the village.
    Exit,
}

impl Direction {
    /// Return the direction as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Exit => "exit",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
