// Captain multiplier resolution with vice-captain fallback.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::Rules;
use crate::event::{form_of, PlayerForm};
use crate::roster::{Chip, ManagerRoster};

use super::autosub::EffectiveLineup;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which armband, if any, earned the multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptainStatus {
    Captain,
    Vice,
    None,
}

impl CaptainStatus {
    /// Whether any multiplier recipient was found.
    pub fn activated(&self) -> bool {
        !matches!(self, CaptainStatus::None)
    }

    /// Identifier used in storage and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptainStatus::Captain => "captain",
            CaptainStatus::Vice => "vice",
            CaptainStatus::None => "none",
        }
    }

    /// Parse a stored status identifier.
    pub fn from_str_status(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "captain" => Some(CaptainStatus::Captain),
            "vice" => Some(CaptainStatus::Vice),
            "none" => Some(CaptainStatus::None),
            _ => None,
        }
    }
}

/// Outcome of captain resolution: who receives the multiplier and its value.
#[derive(Debug, Clone)]
pub struct CaptainResolution {
    pub status: CaptainStatus,
    /// The player whose raw score is multiplied; `None` when neither the
    /// captain nor the vice-captain qualifies.
    pub recipient: Option<String>,
    pub multiplier: i32,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Decide the multiplier recipient for one manager.
///
/// The captain qualifies when they sit in the effective lineup and played;
/// otherwise the vice-captain is checked under the same conditions. The
/// multiplier value comes from the rule table, with the triple-captain chip
/// selecting the larger one.
pub fn resolve_captain(
    roster: &ManagerRoster,
    lineup: &EffectiveLineup,
    form: &HashMap<String, PlayerForm>,
    rules: &Rules,
) -> CaptainResolution {
    let multiplier = if roster.chip == Some(Chip::TripleCaptain) {
        rules.chips.triple_captain_multiplier
    } else {
        rules.chips.captain_multiplier
    };

    let qualifies =
        |pid: &str| lineup.contains(pid) && form_of(form, pid).played;

    if qualifies(&roster.captain_id) {
        CaptainResolution {
            status: CaptainStatus::Captain,
            recipient: Some(roster.captain_id.clone()),
            multiplier,
        }
    } else if qualifies(&roster.vice_captain_id) {
        CaptainResolution {
            status: CaptainStatus::Vice,
            recipient: Some(roster.vice_captain_id.clone()),
            multiplier,
        }
    } else {
        CaptainResolution {
            status: CaptainStatus::None,
            recipient: None,
            multiplier,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
