//! Rule configuration.
//!
//! A game is configured once, before setup, with a [`RuleConfig`]. The table
//! is immutable for the game's duration; the engine only ever reads it.
//!
//! Configs can be built in code with the `with_*` builders or loaded from
//! JSON, where every omitted field falls back to its default:
//!
//! ```
//! use rust_trinity::core::{RuleConfig, TurnModel};
//!
//! let config = RuleConfig::from_json(r#"{ "player_count": 3, "turn_model": "Classic" }"#).unwrap();
//! assert_eq!(config.player_count, 3);
//! assert_eq!(config.turn_model, TurnModel::Classic);
//! assert_eq!(config.hand_size, RuleConfig::default().hand_size);
//! ```

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::player::PlayerId;

/// Turn structure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnModel {
    /// One phase; placing the allowed tiles ends the turn automatically.
    #[default]
    Simple,
    /// Draw → Develop → Agent → End, advanced explicitly.
    Classic,
}

/// How many tiles a player draws at the end of a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawMode {
    /// 1 + non-HQ landmarks + 1 if tied for fewest non-HQ landmarks.
    #[default]
    Landmarks,
    /// Draw until the hand holds `hand_size` tiles.
    Refill,
}

/// How the first player is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartingPlayer {
    /// Always the given seat.
    Fixed(PlayerId),
    /// Uniformly random seat from the game RNG.
    Random,
    /// Everyone draws a tile; Housing beats Commerce beats Industry.
    #[default]
    DrawOff,
}

/// Combo placement rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboRules {
    pub enabled: bool,
    /// Extra placements allowed after the turn's first tile.
    pub max_chain: u32,
}

impl Default for ComboRules {
    fn default() -> Self {
        Self {
            enabled: false,
            max_chain: 3,
        }
    }
}

/// Agent caps and combat thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentRules {
    /// Agents a single player may have on the board at once.
    pub max_per_player: u32,
    /// Agents spawned when a landmark becomes a headquarters.
    pub hq_spawn: u32,
    /// Agents spawned per headquarters in the Classic draw phase.
    pub draw_spawn_per_hq: u32,
    /// Agents an attacker needs on a landmark to contest it.
    pub contest_threshold: u32,
    /// Agents at which a takeover would count as a capture. Takeovers still
    /// resolve as settlement; the threshold is only reported.
    pub capture_threshold: u32,
    /// Agent moves allowed per turn.
    pub moves_per_turn: u32,
}

impl Default for AgentRules {
    fn default() -> Self {
        Self {
            max_per_player: 10,
            hq_spawn: 2,
            draw_spawn_per_hq: 1,
            contest_threshold: 3,
            capture_threshold: 5,
            moves_per_turn: 3,
        }
    }
}

/// Conditions that end the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinConditions {
    /// End when every cell holds a tile, landmark, or agent.
    pub board_full: bool,
    /// End when the draw pile and every hand are empty.
    pub exhaustion: bool,
    /// End when a player's score reaches this value.
    pub landmark_target: Option<u32>,
}

impl Default for WinConditions {
    fn default() -> Self {
        Self {
            board_full: true,
            exhaustion: true,
            landmark_target: Some(5),
        }
    }
}

/// Complete rule table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Number of players (2-4).
    pub player_count: usize,
    /// Board edge length.
    pub board_size: u8,
    /// Maximum tiles in hand.
    pub hand_size: usize,
    /// Tiles dealt to each player at setup.
    pub starting_hand: usize,
    /// Maximum event cards in hand.
    pub event_hand_size: usize,
    /// Event cards dealt to each player at setup (without draft).
    pub starting_events: usize,
    /// Copies of each tile type in the draw pile.
    pub tiles_per_type: usize,
    /// Copies of each catalog entry in the event pile.
    pub event_copies: usize,
    pub turn_model: TurnModel,
    pub draw_mode: DrawMode,
    /// Tiles per turn before combo placement.
    pub placements_per_turn: u32,
    pub combo: ComboRules,
    pub agents: AgentRules,
    /// Headquarters a player may own at once.
    pub max_headquarters: u32,
    /// Form detected landmarks automatically after each placement.
    pub auto_form_landmarks: bool,
    /// Event cards drawn when a landmark is formed.
    pub events_per_landmark: usize,
    /// Event cards a player may play per turn.
    pub events_per_turn: u32,
    pub win: WinConditions,
    pub shuffle: bool,
    pub starting_player: StartingPlayer,
    /// Deal starting events as deal-2 / keep-1 / pass-1-left.
    pub event_draft: bool,
    /// Allow each player one mulligan before their first placement.
    pub mulligan: bool,
    /// Snapshots kept for undo.
    pub undo_capacity: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            board_size: 8,
            hand_size: 5,
            starting_hand: 3,
            event_hand_size: 3,
            starting_events: 1,
            tiles_per_type: 20,
            event_copies: 2,
            turn_model: TurnModel::Simple,
            draw_mode: DrawMode::Landmarks,
            placements_per_turn: 1,
            combo: ComboRules::default(),
            agents: AgentRules::default(),
            max_headquarters: 1,
            auto_form_landmarks: true,
            events_per_landmark: 1,
            events_per_turn: 1,
            win: WinConditions::default(),
            shuffle: true,
            starting_player: StartingPlayer::DrawOff,
            event_draft: false,
            mulligan: false,
            undo_capacity: 20,
        }
    }
}

impl RuleConfig {
    /// Default rules for `player_count` players.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Parse a rule table from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the table for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=4).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if !(4..=32).contains(&self.board_size) {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        if self.hand_size == 0 {
            return Err(ConfigError::HandSize);
        }
        if self.placements_per_turn == 0 {
            return Err(ConfigError::Placements);
        }
        if self.agents.contest_threshold == 0 {
            return Err(ConfigError::ContestThreshold);
        }
        if self.undo_capacity == 0 {
            return Err(ConfigError::UndoCapacity);
        }
        Ok(())
    }

    #[must_use]
    pub fn with_board_size(mut self, size: u8) -> Self {
        self.board_size = size;
        self
    }

    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    #[must_use]
    pub fn with_starting_hand(mut self, count: usize) -> Self {
        self.starting_hand = count;
        self
    }

    #[must_use]
    pub fn with_turn_model(mut self, model: TurnModel) -> Self {
        self.turn_model = model;
        self
    }

    #[must_use]
    pub fn with_draw_mode(mut self, mode: DrawMode) -> Self {
        self.draw_mode = mode;
        self
    }

    #[must_use]
    pub fn with_combo(mut self, max_chain: u32) -> Self {
        self.combo = ComboRules {
            enabled: true,
            max_chain,
        };
        self
    }

    #[must_use]
    pub fn with_agents(mut self, agents: AgentRules) -> Self {
        self.agents = agents;
        self
    }

    #[must_use]
    pub fn with_win(mut self, win: WinConditions) -> Self {
        self.win = win;
        self
    }

    #[must_use]
    pub fn with_starting_player(mut self, starting: StartingPlayer) -> Self {
        self.starting_player = starting;
        self
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    #[must_use]
    pub fn with_event_draft(mut self, draft: bool) -> Self {
        self.event_draft = draft;
        self
    }

    #[must_use]
    pub fn with_mulligan(mut self, mulligan: bool) -> Self {
        self.mulligan = mulligan;
        self
    }

    #[must_use]
    pub fn with_pile_sizes(mut self, tiles_per_type: usize, event_copies: usize) -> Self {
        self.tiles_per_type = tiles_per_type;
        self.event_copies = event_copies;
        self
    }

    #[must_use]
    pub fn with_auto_form(mut self, auto: bool) -> Self {
        self.auto_form_landmarks = auto;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(RuleConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = RuleConfig::new(4)
            .with_board_size(10)
            .with_combo(2)
            .with_turn_model(TurnModel::Classic)
            .with_starting_player(StartingPlayer::Fixed(PlayerId::new(1)));

        assert_eq!(config.player_count, 4);
        assert_eq!(config.board_size, 10);
        assert!(config.combo.enabled);
        assert_eq!(config.combo.max_chain, 2);
        assert_eq!(config.starting_player, StartingPlayer::Fixed(PlayerId::new(1)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_player_count() {
        assert!(matches!(
            RuleConfig::new(5).validate(),
            Err(ConfigError::PlayerCount(5))
        ));
        assert!(matches!(
            RuleConfig::new(1).validate(),
            Err(ConfigError::PlayerCount(1))
        ));
    }

    #[test]
    fn test_json_nested_defaults() {
        let config = RuleConfig::from_json(r#"{ "agents": { "contest_threshold": 2 } }"#).unwrap();
        assert_eq!(config.agents.contest_threshold, 2);
        assert_eq!(config.agents.hq_spawn, AgentRules::default().hq_spawn);
    }

    #[test]
    fn test_json_invalid_is_rejected() {
        assert!(matches!(
            RuleConfig::from_json(r#"{ "board_size": 2 }"#),
            Err(ConfigError::BoardSize(2))
        ));
        assert!(matches!(RuleConfig::from_json("not json"), Err(ConfigError::Json(_))));
    }
}
