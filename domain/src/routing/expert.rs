//! Expert identities.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The response generators a turn can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpertKind {
    /// Greetings, thanks, off-topic chit-chat; sales-oriented tone.
    General,
    /// Vehicle and EV questions answered from the product knowledge base.
    Domain,
    /// Battery capacity / range / model lookups from the capacity table.
    DataLookup,
}

impl ExpertKind {
    pub const ALL: [ExpertKind; 3] = [ExpertKind::General, ExpertKind::Domain, ExpertKind::DataLookup];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpertKind::General => "general",
            ExpertKind::Domain => "domain",
            ExpertKind::DataLookup => "data_lookup",
        }
    }

    /// Human-readable name for console output.
    pub fn display_name(&self) -> &'static str {
        match self {
            ExpertKind::General => "General Expert",
            ExpertKind::Domain => "Domain Expert",
            ExpertKind::DataLookup => "Data Lookup Expert",
        }
    }
}

impl std::fmt::Display for ExpertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExpertKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(ExpertKind::General),
            "domain" => Ok(ExpertKind::Domain),
            "data_lookup" | "data-lookup" => Ok(ExpertKind::DataLookup),
            other => Err(DomainError::UnknownExpert(other.to_string())),
        }
    }
}
