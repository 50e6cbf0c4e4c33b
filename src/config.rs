// Rules configuration loading and parsing (config/rules.toml).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::event::EventAction;
use crate::roster::Position;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Rules structs
// ---------------------------------------------------------------------------

/// Full rule table for a league: squad shape, formation legality bounds,
/// chip multipliers, optional composition counts, and the point values
/// used to resolve raw match actions at ingest time.
#[derive(Debug, Clone, Deserialize)]
pub struct Rules {
    pub squad: SquadShape,
    pub formation: FormationRules,
    pub chips: ChipRules,
    #[serde(default)]
    pub composition: CompositionRules,
    pub points: PointsTable,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SquadShape {
    /// Total squad size, starters plus bench.
    pub size: usize,
    /// Number of starting players.
    pub starting: usize,
}

impl SquadShape {
    /// Number of bench slots.
    pub fn bench(&self) -> usize {
        self.size - self.starting
    }
}

/// Inclusive per-position bounds on the starting lineup.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PositionBounds {
    pub min: usize,
    pub max: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormationRules {
    pub gk: PositionBounds,
    pub def: PositionBounds,
    pub mid: PositionBounds,
    pub fwd: PositionBounds,
}

impl FormationRules {
    /// Bounds for one position.
    pub fn bounds(&self, pos: Position) -> PositionBounds {
        match pos {
            Position::Goalkeeper => self.gk,
            Position::Defender => self.def,
            Position::Midfielder => self.mid,
            Position::Forward => self.fwd,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChipRules {
    /// Multiplier applied to the active captain's raw score.
    pub captain_multiplier: i32,
    /// Multiplier used instead when the triple-captain chip is active.
    pub triple_captain_multiplier: i32,
}

/// Optional squad-composition counts. Leagues that field mixed squads set
/// these; when unset the checks are skipped entirely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompositionRules {
    pub lady_players_squad: Option<usize>,
    pub lady_players_starting: Option<usize>,
}

// ---------------------------------------------------------------------------
// Point values
// ---------------------------------------------------------------------------

/// A point value that is either flat across positions or position-dependent
/// (e.g. goals: FWD 4, MID 5, DEF 6, GK 6).
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum PointValue {
    Flat(i32),
    ByPosition { gk: i32, def: i32, mid: i32, fwd: i32 },
}

impl PointValue {
    pub fn for_position(&self, pos: Position) -> i32 {
        match self {
            PointValue::Flat(v) => *v,
            PointValue::ByPosition { gk, def, mid, fwd } => match pos {
                Position::Goalkeeper => *gk,
                Position::Defender => *def,
                Position::Midfielder => *mid,
                Position::Forward => *fwd,
            },
        }
    }
}

/// Point values per action type. The engine consumes pre-resolved event
/// rows; this table is what resolves raw actions into those rows at ingest.
#[derive(Debug, Clone, Deserialize)]
pub struct PointsTable {
    pub appearance: PointValue,
    pub goal: PointValue,
    pub assist: PointValue,
    pub clean_sheet: PointValue,
    pub save: PointValue,
    /// Saves are scored in groups: one `save` value per this many saves.
    pub saves_per_point: u32,
    pub penalty_save: PointValue,
    pub penalty_miss: PointValue,
    pub yellow_card: PointValue,
    pub red_card: PointValue,
    pub own_goal: PointValue,
    pub bonus: PointValue,
}

impl PointsTable {
    /// Resolve the total points for `quantity` occurrences of `action` by a
    /// player at `position`. Saves count in groups of `saves_per_point`;
    /// every other action scores per occurrence.
    pub fn points_for(&self, action: EventAction, position: Position, quantity: u32) -> i32 {
        let per_unit = match action {
            EventAction::Appearance => self.appearance,
            EventAction::Goal => self.goal,
            EventAction::Assist => self.assist,
            EventAction::CleanSheet => self.clean_sheet,
            EventAction::Save => {
                let groups = quantity / self.saves_per_point;
                return self.save.for_position(position) * groups as i32;
            }
            EventAction::PenaltySave => self.penalty_save,
            EventAction::PenaltyMiss => self.penalty_miss,
            EventAction::YellowCard => self.yellow_card,
            EventAction::RedCard => self.red_card,
            EventAction::OwnGoal => self.own_goal,
            EventAction::Bonus => self.bonus,
        };
        per_unit.for_position(position) * quantity as i32
    }
}

// ---------------------------------------------------------------------------
// Built-in defaults
// ---------------------------------------------------------------------------

impl Default for Rules {
    /// The built-in league preset, mirrored by `defaults/rules.toml`:
    /// 15-player squads with 11 starters, one goalkeeper, DEF 3-5,
    /// MID 2-5, FWD 1-3, captain x2 and triple captain x3.
    fn default() -> Self {
        Rules {
            squad: SquadShape {
                size: 15,
                starting: 11,
            },
            formation: FormationRules {
                gk: PositionBounds { min: 1, max: 1 },
                def: PositionBounds { min: 3, max: 5 },
                mid: PositionBounds { min: 2, max: 5 },
                fwd: PositionBounds { min: 1, max: 3 },
            },
            chips: ChipRules {
                captain_multiplier: 2,
                triple_captain_multiplier: 3,
            },
            composition: CompositionRules::default(),
            points: PointsTable {
                appearance: PointValue::Flat(2),
                goal: PointValue::ByPosition {
                    gk: 6,
                    def: 6,
                    mid: 5,
                    fwd: 4,
                },
                assist: PointValue::Flat(3),
                clean_sheet: PointValue::ByPosition {
                    gk: 4,
                    def: 4,
                    mid: 1,
                    fwd: 0,
                },
                save: PointValue::Flat(1),
                saves_per_point: 3,
                penalty_save: PointValue::Flat(5),
                penalty_miss: PointValue::Flat(-2),
                yellow_card: PointValue::Flat(-1),
                red_card: PointValue::Flat(-3),
                own_goal: PointValue::Flat(-2),
                bonus: PointValue::Flat(1),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate the rule table from `config/rules.toml` relative to the
/// given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults. Prefer `load_rules()` which handles default initialization.
pub(crate) fn load_rules_from(base_dir: &Path) -> Result<Rules, ConfigError> {
    let rules_path = base_dir.join("config").join("rules.toml");
    let text = read_file(&rules_path)?;
    let rules: Rules = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: rules_path,
        source: e,
    })?;
    validate(&rules)?;
    Ok(rules)
}

/// Ensure `config/rules.toml` exists by copying it from `defaults/` when
/// missing. Returns the list of files that were copied.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // File already exists in config/, skip it
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads the rule table relative to the current working
/// directory, copying defaults into place first.
pub fn load_rules() -> Result<Rules, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_rules_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(rules: &Rules) -> Result<(), ConfigError> {
    if rules.squad.size == 0 {
        return Err(ConfigError::ValidationError {
            field: "squad.size".into(),
            message: "must be greater than 0".into(),
        });
    }
    if rules.squad.starting == 0 || rules.squad.starting >= rules.squad.size {
        return Err(ConfigError::ValidationError {
            field: "squad.starting".into(),
            message: format!(
                "must be between 1 and squad.size - 1, got {} of {}",
                rules.squad.starting, rules.squad.size
            ),
        });
    }

    // Formation sanity: one goalkeeper slot is always required, every
    // min must not exceed its max, and the bounds must admit a lineup of
    // exactly `starting` players.
    let f = &rules.formation;
    if f.gk.min < 1 {
        return Err(ConfigError::ValidationError {
            field: "formation.gk.min".into(),
            message: "must be at least 1".into(),
        });
    }
    let bounds_fields: &[(&str, PositionBounds)] = &[
        ("formation.gk", f.gk),
        ("formation.def", f.def),
        ("formation.mid", f.mid),
        ("formation.fwd", f.fwd),
    ];
    for (name, b) in bounds_fields {
        if b.min > b.max {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("min {} exceeds max {}", b.min, b.max),
            });
        }
    }
    let min_sum = f.gk.min + f.def.min + f.mid.min + f.fwd.min;
    let max_sum = f.gk.max + f.def.max + f.mid.max + f.fwd.max;
    if min_sum > rules.squad.starting || max_sum < rules.squad.starting {
        return Err(ConfigError::ValidationError {
            field: "formation".into(),
            message: format!(
                "bounds admit lineups of {min_sum}..{max_sum} players, \
                 but squad.starting is {}",
                rules.squad.starting
            ),
        });
    }

    // Chip multipliers
    let chip_fields: &[(&str, i32)] = &[
        ("chips.captain_multiplier", rules.chips.captain_multiplier),
        (
            "chips.triple_captain_multiplier",
            rules.chips.triple_captain_multiplier,
        ),
    ];
    for (name, val) in chip_fields {
        if *val < 1 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be at least 1, got {val}"),
            });
        }
    }

    if rules.points.saves_per_point == 0 {
        return Err(ConfigError::ValidationError {
            field: "points.saves_per_point".into(),
            message: "must be greater than 0".into(),
        });
    }

    // Composition counts must fit inside the squad shape.
    let comp_fields: &[(&str, Option<usize>, usize)] = &[
        (
            "composition.lady_players_squad",
            rules.composition.lady_players_squad,
            rules.squad.size,
        ),
        (
            "composition.lady_players_starting",
            rules.composition.lady_players_starting,
            rules.squad.starting,
        ),
    ];
    for (name, val, limit) in comp_fields {
        if let Some(v) = val {
            if *v > *limit {
                return Err(ConfigError::ValidationError {
                    field: name.to_string(),
                    message: format!("must be at most {limit}, got {v}"),
                });
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    /// Helper: returns the path to the project root (works whether
    /// `cargo test` runs from the crate root or elsewhere).
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        if cwd.join("defaults").exists() {
            cwd
        } else {
            panic!("Cannot locate defaults/ directory from CWD {:?}", cwd);
        }
    }

    fn write_rules(dir: &Path, text: &str) {
        let config_dir = dir.join("config");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("rules.toml"), text).unwrap();
    }

    fn default_rules_text() -> String {
        let root = project_root();
        fs::read_to_string(root.join("defaults/rules.toml")).unwrap()
    }

    #[test]
    fn load_default_rules_file() {
        let root = project_root();
        ensure_config_files(&root).expect("should copy default configs");
        let rules = load_rules_from(&root).expect("should load valid rules");

        assert_eq!(rules.squad.size, 15);
        assert_eq!(rules.squad.starting, 11);
        assert_eq!(rules.squad.bench(), 4);
        assert_eq!(rules.formation.gk.min, 1);
        assert_eq!(rules.formation.gk.max, 1);
        assert_eq!(rules.formation.def.min, 3);
        assert_eq!(rules.chips.captain_multiplier, 2);
        assert_eq!(rules.chips.triple_captain_multiplier, 3);
        assert!(rules.composition.lady_players_squad.is_none());
    }

    #[test]
    fn default_preset_matches_defaults_file() {
        let from_file: Rules = toml::from_str(&default_rules_text()).unwrap();
        let preset = Rules::default();

        // Spot-check the fields that drive engine behavior.
        assert_eq!(from_file.squad.size, preset.squad.size);
        assert_eq!(from_file.squad.starting, preset.squad.starting);
        assert_eq!(from_file.formation.def.min, preset.formation.def.min);
        assert_eq!(from_file.formation.fwd.max, preset.formation.fwd.max);
        assert_eq!(
            from_file.chips.triple_captain_multiplier,
            preset.chips.triple_captain_multiplier
        );
        assert_eq!(
            from_file
                .points
                .points_for(EventAction::Goal, Position::Defender, 1),
            preset
                .points
                .points_for(EventAction::Goal, Position::Defender, 1)
        );
    }

    #[test]
    fn point_value_flat_and_by_position() {
        let points = Rules::default().points;
        // Goals are position-dependent.
        assert_eq!(points.points_for(EventAction::Goal, Position::Forward, 1), 4);
        assert_eq!(
            points.points_for(EventAction::Goal, Position::Midfielder, 1),
            5
        );
        assert_eq!(points.points_for(EventAction::Goal, Position::Defender, 2), 12);
        // Assists are flat.
        assert_eq!(
            points.points_for(EventAction::Assist, Position::Goalkeeper, 3),
            9
        );
        // Clean sheets are worth nothing to forwards.
        assert_eq!(
            points.points_for(EventAction::CleanSheet, Position::Forward, 1),
            0
        );
    }

    #[test]
    fn saves_score_in_groups() {
        let points = Rules::default().points;
        assert_eq!(points.points_for(EventAction::Save, Position::Goalkeeper, 2), 0);
        assert_eq!(points.points_for(EventAction::Save, Position::Goalkeeper, 3), 1);
        assert_eq!(points.points_for(EventAction::Save, Position::Goalkeeper, 7), 2);
    }

    #[test]
    fn negative_actions_score_negative() {
        let points = Rules::default().points;
        assert_eq!(
            points.points_for(EventAction::YellowCard, Position::Midfielder, 1),
            -1
        );
        assert_eq!(
            points.points_for(EventAction::RedCard, Position::Defender, 1),
            -3
        );
        assert_eq!(
            points.points_for(EventAction::OwnGoal, Position::Defender, 2),
            -4
        );
    }

    #[test]
    fn rejects_starting_not_below_size() {
        let tmp = std::env::temp_dir().join("rules_test_starting_size");
        let _ = fs::remove_dir_all(&tmp);
        let text = default_rules_text().replace("starting = 11", "starting = 15");
        write_rules(&tmp, &text);

        let err = load_rules_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "squad.starting");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_goalkeeper_minimum() {
        let tmp = std::env::temp_dir().join("rules_test_gk_min");
        let _ = fs::remove_dir_all(&tmp);
        let text = default_rules_text().replace(
            "[formation.gk]\nmin = 1",
            "[formation.gk]\nmin = 0",
        );
        write_rules(&tmp, &text);

        let err = load_rules_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "formation.gk.min");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_formation_that_cannot_fill_lineup() {
        let tmp = std::env::temp_dir().join("rules_test_formation_sum");
        let _ = fs::remove_dir_all(&tmp);
        // Cap every position so the maxima sum below 11.
        let text = default_rules_text()
            .replace("[formation.def]\nmin = 3\nmax = 5", "[formation.def]\nmin = 3\nmax = 3")
            .replace("[formation.mid]\nmin = 2\nmax = 5", "[formation.mid]\nmin = 2\nmax = 3")
            .replace("[formation.fwd]\nmin = 1\nmax = 3", "[formation.fwd]\nmin = 1\nmax = 2");
        write_rules(&tmp, &text);

        let err = load_rules_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "formation");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_captain_multiplier() {
        let tmp = std::env::temp_dir().join("rules_test_multiplier");
        let _ = fs::remove_dir_all(&tmp);
        let text = default_rules_text().replace("captain_multiplier = 2", "captain_multiplier = 0");
        write_rules(&tmp, &text);

        let err = load_rules_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "chips.captain_multiplier");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_saves_per_point() {
        let tmp = std::env::temp_dir().join("rules_test_saves_group");
        let _ = fs::remove_dir_all(&tmp);
        let text = default_rules_text().replace("saves_per_point = 3", "saves_per_point = 0");
        write_rules(&tmp, &text);

        let err = load_rules_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "points.saves_per_point");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_oversized_composition_count() {
        let tmp = std::env::temp_dir().join("rules_test_composition");
        let _ = fs::remove_dir_all(&tmp);
        let text = format!(
            "{}\n[composition]\nlady_players_starting = 12\n",
            default_rules_text()
        );
        write_rules(&tmp, &text);

        let err = load_rules_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "composition.lady_players_starting");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_rules_toml() {
        let tmp = std::env::temp_dir().join("rules_test_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        let err = load_rules_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => {
                assert!(path.ends_with("rules.toml"));
            }
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = std::env::temp_dir().join("rules_test_invalid_toml");
        let _ = fs::remove_dir_all(&tmp);
        write_rules(&tmp, "this is not valid [[[ toml");

        let err = load_rules_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => {
                assert!(path.ends_with("rules.toml"));
            }
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_files() {
        let tmp = std::env::temp_dir().join("rules_test_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::write(defaults_dir.join("rules.toml"), default_rules_text()).unwrap();

        assert!(!tmp.join("config").exists());

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(tmp.join("config/rules.toml").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = std::env::temp_dir().join("rules_test_ensure_skips");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        let config_dir = tmp.join("config");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(defaults_dir.join("rules.toml"), default_rules_text()).unwrap();
        fs::write(config_dir.join("rules.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());

        let content = fs::read_to_string(config_dir.join("rules.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("rules_test_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}
