// Match events and the per-player raw-score resolver.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Recordable match actions. `Appearance` rows exist so that a player who
/// played but scored nothing is distinguishable from one who did not play
/// at all: any event row, appearance included, marks the player as played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    Appearance,
    Goal,
    Assist,
    CleanSheet,
    Save,
    PenaltySave,
    PenaltyMiss,
    YellowCard,
    RedCard,
    OwnGoal,
    Bonus,
}

impl EventAction {
    /// Parse an action identifier as stored by the event store.
    pub fn from_str_action(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "appearance" => Some(EventAction::Appearance),
            "goal" => Some(EventAction::Goal),
            "assist" => Some(EventAction::Assist),
            "clean_sheet" => Some(EventAction::CleanSheet),
            "save" => Some(EventAction::Save),
            "penalty_save" => Some(EventAction::PenaltySave),
            "penalty_miss" => Some(EventAction::PenaltyMiss),
            "yellow_card" => Some(EventAction::YellowCard),
            "red_card" => Some(EventAction::RedCard),
            "own_goal" => Some(EventAction::OwnGoal),
            "bonus" => Some(EventAction::Bonus),
            _ => None,
        }
    }

    /// Identifier used in storage and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventAction::Appearance => "appearance",
            EventAction::Goal => "goal",
            EventAction::Assist => "assist",
            EventAction::CleanSheet => "clean_sheet",
            EventAction::Save => "save",
            EventAction::PenaltySave => "penalty_save",
            EventAction::PenaltyMiss => "penalty_miss",
            EventAction::YellowCard => "yellow_card",
            EventAction::RedCard => "red_card",
            EventAction::OwnGoal => "own_goal",
            EventAction::Bonus => "bonus",
        }
    }
}

// ---------------------------------------------------------------------------
// Event rows
// ---------------------------------------------------------------------------

/// One recorded (match, player, action) row. The store keeps at most one row
/// per key; `quantity` aggregates repeats and `points_awarded` is the
/// already-resolved point total for the action at that quantity (so a
/// two-goal row from a midfielder carries 10, and a seven-save goalkeeper
/// row carries the grouped value).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEventRecord {
    pub match_id: String,
    pub player_id: String,
    pub action: EventAction,
    pub quantity: u32,
    pub points_awarded: i32,
}

// ---------------------------------------------------------------------------
// Raw-score resolution
// ---------------------------------------------------------------------------

/// A player's aggregate line for one gameweek: total raw points and whether
/// any event row exists for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerForm {
    pub points: i32,
    pub played: bool,
}

/// Sum each player's event rows into a raw score. Every row marks its
/// player as played, whatever its point value.
///
/// A player with no rows at all is absent from the returned map; lookups
/// fall back to [`PlayerForm::default()`] (`0` points, `played = false`).
pub fn resolve_player_form(events: &[MatchEventRecord]) -> HashMap<String, PlayerForm> {
    let mut form: HashMap<String, PlayerForm> = HashMap::new();
    for event in events {
        let entry = form.entry(event.player_id.clone()).or_default();
        entry.points += event.points_awarded;
        entry.played = true;
    }
    form
}

/// Lookup helper with the non-player fallback.
pub fn form_of<'a>(form: &'a HashMap<String, PlayerForm>, player_id: &str) -> PlayerForm {
    form.get(player_id).copied().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn event(
        match_id: &str,
        player_id: &str,
        action: EventAction,
        quantity: u32,
        points_awarded: i32,
    ) -> MatchEventRecord {
        MatchEventRecord {
            match_id: match_id.into(),
            player_id: player_id.into(),
            action,
            quantity,
            points_awarded,
        }
    }

    #[test]
    fn action_identifiers_round_trip() {
        for action in [
            EventAction::Appearance,
            EventAction::Goal,
            EventAction::Assist,
            EventAction::CleanSheet,
            EventAction::Save,
            EventAction::PenaltySave,
            EventAction::PenaltyMiss,
            EventAction::YellowCard,
            EventAction::RedCard,
            EventAction::OwnGoal,
            EventAction::Bonus,
        ] {
            assert_eq!(EventAction::from_str_action(action.as_str()), Some(action));
        }
        assert_eq!(EventAction::from_str_action("throw_in"), None);
    }

    #[test]
    fn sums_points_across_rows() {
        let events = vec![
            event("m1", "p1", EventAction::Appearance, 1, 2),
            event("m1", "p1", EventAction::Goal, 2, 8),
            event("m1", "p1", EventAction::YellowCard, 1, -1),
        ];
        let form = resolve_player_form(&events);
        let p1 = form_of(&form, "p1");
        assert_eq!(p1.points, 2 + 8 - 1);
        assert!(p1.played);
    }

    #[test]
    fn sums_across_matches_in_gameweek() {
        // A double gameweek: the same player has rows from two matches.
        let events = vec![
            event("m1", "p1", EventAction::Goal, 1, 4),
            event("m2", "p1", EventAction::Goal, 1, 4),
            event("m2", "p1", EventAction::Assist, 1, 3),
        ];
        let form = resolve_player_form(&events);
        assert_eq!(form_of(&form, "p1").points, 11);
    }

    #[test]
    fn zero_point_appearance_still_counts_as_played() {
        let events = vec![event("m1", "p1", EventAction::Appearance, 1, 0)];
        let form = resolve_player_form(&events);
        let p1 = form_of(&form, "p1");
        assert_eq!(p1.points, 0);
        assert!(p1.played, "an appearance row marks the player as played");
    }

    #[test]
    fn absent_player_is_non_player() {
        let events = vec![event("m1", "p1", EventAction::Goal, 1, 4)];
        let form = resolve_player_form(&events);
        let ghost = form_of(&form, "p2");
        assert_eq!(ghost.points, 0);
        assert!(!ghost.played, "no event rows means the player did not play");
    }

    #[test]
    fn negative_total_is_possible() {
        let events = vec![
            event("m1", "p1", EventAction::Appearance, 1, 2),
            event("m1", "p1", EventAction::RedCard, 1, -3),
            event("m1", "p1", EventAction::OwnGoal, 1, -2),
        ];
        let form = resolve_player_form(&events);
        assert_eq!(form_of(&form, "p1").points, -3);
    }

    #[test]
    fn empty_event_set_yields_empty_form() {
        let form = resolve_player_form(&[]);
        assert!(form.is_empty());
    }
}
