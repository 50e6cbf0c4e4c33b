// Scoring engine core: auto-substitution, captain resolution, aggregation.

pub mod aggregate;
pub mod autosub;
pub mod captain;

use std::collections::HashMap;

use crate::config::Rules;
use crate::event::PlayerForm;
use crate::roster::{ManagerRoster, PlayerInfo};

pub use aggregate::ManagerScore;
pub use autosub::{AutoSub, EffectiveLineup};
pub use captain::{CaptainResolution, CaptainStatus};

/// Score one manager's validated roster against the gameweek's player form.
///
/// Pipeline order matters: auto-substitution fixes the effective lineup,
/// captain resolution runs against that lineup, and aggregation applies the
/// multiplier and (under bench boost) widens the scoring set to the squad.
pub fn score_manager(
    roster: &ManagerRoster,
    form: &HashMap<String, PlayerForm>,
    players: &HashMap<String, PlayerInfo>,
    rules: &Rules,
) -> ManagerScore {
    let lineup = autosub::resolve_effective_lineup(roster, form, players, rules);
    let captain = captain::resolve_captain(roster, &lineup, form, rules);
    aggregate::aggregate_total(roster, lineup, &captain, form)
}
