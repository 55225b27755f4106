//! Turn and phase bookkeeping.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, TurnModel};

/// Turn phase. `Play` is the only phase of a Simple turn; Classic turns
/// run `Draw → Develop → Agent → End`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Play,
    Draw,
    Develop,
    Agent,
    End,
}

impl Phase {
    /// The phase every turn starts in.
    #[must_use]
    pub const fn initial(model: TurnModel) -> Self {
        match model {
            TurnModel::Simple => Phase::Play,
            TurnModel::Classic => Phase::Draw,
        }
    }

    /// Can a turn of `model` be in this phase?
    #[must_use]
    pub const fn belongs_to(self, model: TurnModel) -> bool {
        matches!(
            (self, model),
            (Phase::Play, TurnModel::Simple)
                | (Phase::Draw | Phase::Develop | Phase::Agent | Phase::End, TurnModel::Classic)
        )
    }

    /// The following Classic phase; `None` after `End` (and for `Play`).
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Phase::Draw => Some(Phase::Develop),
            Phase::Develop => Some(Phase::Agent),
            Phase::Agent => Some(Phase::End),
            Phase::End | Phase::Play => None,
        }
    }

    /// Tiles may be placed in this phase.
    #[must_use]
    pub const fn allows_placement(self) -> bool {
        matches!(self, Phase::Play | Phase::Develop)
    }

    /// Agents may move and fight in this phase.
    #[must_use]
    pub const fn allows_agents(self) -> bool {
        matches!(self, Phase::Play | Phase::Agent)
    }
}

/// Current turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Round number, starting at 1; bumps when play wraps to seat 0.
    pub number: u32,
    pub current: PlayerId,
    pub phase: Phase,
    pub tiles_placed: u32,
    /// Combo placements made after the first tile.
    pub combo_chain: u32,
    pub agent_moves: u32,
    pub events_played: u32,
}

impl Turn {
    #[must_use]
    pub fn new(first: PlayerId, model: TurnModel) -> Self {
        Self {
            number: 1,
            current: first,
            phase: Phase::initial(model),
            tiles_placed: 0,
            combo_chain: 0,
            agent_moves: 0,
            events_played: 0,
        }
    }

    /// Zero the per-turn counters.
    pub fn reset_counters(&mut self) {
        self.tiles_placed = 0;
        self.combo_chain = 0;
        self.agent_moves = 0;
        self.events_played = 0;
    }
}
