//! Game event types.
//!
//! Every state change the engine makes is announced as one [`GameEvent`].
//! Events carry copies of the data involved, never references into the
//! store, so a listener sees exactly what changed and nothing it could use
//! to mutate the game.

use serde::{Deserialize, Serialize};

use crate::board::{Tile, TileType};
use crate::cards::EventCard;
use crate::core::{PlayerId, Position};
use crate::rules::GameResult;
use crate::store::{Phase, PlayerFlags};

/// Something that happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    // === Tiles ===
    TilePlaced {
        pos: Position,
        tile: Tile,
    },
    TileRemoved {
        pos: Position,
        tile: Tile,
    },
    TileOwnerChanged {
        pos: Position,
        from: Option<PlayerId>,
        to: PlayerId,
    },
    TileRetyped {
        pos: Position,
        from: TileType,
        to: TileType,
    },

    // === Landmarks ===
    LandmarkCreated {
        anchor: Position,
        owner: PlayerId,
        /// Cells the three source tiles came from.
        sources: [Position; 3],
    },
    LandmarkRemoved {
        anchor: Position,
        owner: PlayerId,
        was_hq: bool,
    },
    HeadquartersCreated {
        pos: Position,
        owner: PlayerId,
        /// Agents actually spawned (the configured count, clamped to the cap).
        agents_spawned: u32,
    },

    // === Agents ===
    AgentPlaced {
        pos: Position,
        owner: PlayerId,
    },
    AgentMoved {
        from: Position,
        to: Position,
        owner: PlayerId,
    },
    AgentRemoved {
        pos: Position,
        owner: PlayerId,
    },
    AgentsCleared {
        pos: Position,
        removed: u32,
    },
    LandmarkCaptured {
        anchor: Position,
        attacker: PlayerId,
        defender: PlayerId,
        attackers_lost: u32,
        defenders_lost: u32,
        /// The attacker's stack met the capture threshold. Resolution is
        /// settlement either way.
        reached_capture: bool,
        /// The defender's insurance returned the folded tiles.
        insured: bool,
    },
    TileCaptured {
        pos: Position,
        attacker: PlayerId,
        defender: PlayerId,
        attackers_spent: u32,
        defenders_lost: u32,
    },

    // === Hands and cards ===
    HandChanged {
        player: PlayerId,
        tiles: usize,
        events: usize,
    },
    TilesDiscarded {
        player: PlayerId,
        tiles: Vec<Tile>,
    },
    EventDrawn {
        player: PlayerId,
        card: EventCard,
    },
    EventPlayed {
        player: PlayerId,
        card: EventCard,
    },
    EventsDiscarded {
        player: PlayerId,
        cards: Vec<EventCard>,
    },
    DrawPileReordered {
        count: usize,
    },

    // === Turn flow ===
    TurnStarted {
        turn: u32,
        player: PlayerId,
    },
    TurnEnded {
        turn: u32,
        player: PlayerId,
    },
    PlayerChanged {
        from: PlayerId,
        to: PlayerId,
    },
    PhaseChanged {
        phase: Phase,
    },
    FlagsChanged {
        player: PlayerId,
        flags: PlayerFlags,
    },
    StateRestored {
        turn: u32,
    },

    // === Starting-player draw-off ===
    DrawOffStarted {
        contenders: Vec<PlayerId>,
    },
    DrawOffTileDrawn {
        player: PlayerId,
        tile_type: TileType,
    },
    DrawOffTie {
        players: Vec<PlayerId>,
    },
    DrawOffResolved {
        winner: PlayerId,
    },

    GameOver {
        result: GameResult,
    },
}

impl GameEvent {
    /// Stable name of the variant, for logs and string-keyed consumers.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::TilePlaced { .. } => "tile_placed",
            GameEvent::TileRemoved { .. } => "tile_removed",
            GameEvent::TileOwnerChanged { .. } => "tile_owner_changed",
            GameEvent::TileRetyped { .. } => "tile_retyped",
            GameEvent::LandmarkCreated { .. } => "landmark_created",
            GameEvent::LandmarkRemoved { .. } => "landmark_removed",
            GameEvent::HeadquartersCreated { .. } => "headquarters_created",
            GameEvent::AgentPlaced { .. } => "agent_placed",
            GameEvent::AgentMoved { .. } => "agent_moved",
            GameEvent::AgentRemoved { .. } => "agent_removed",
            GameEvent::AgentsCleared { .. } => "agents_cleared",
            GameEvent::LandmarkCaptured { .. } => "landmark_captured",
            GameEvent::TileCaptured { .. } => "tile_captured",
            GameEvent::HandChanged { .. } => "hand_changed",
            GameEvent::TilesDiscarded { .. } => "tiles_discarded",
            GameEvent::EventDrawn { .. } => "event_drawn",
            GameEvent::EventPlayed { .. } => "event_played",
            GameEvent::EventsDiscarded { .. } => "events_discarded",
            GameEvent::DrawPileReordered { .. } => "draw_pile_reordered",
            GameEvent::TurnStarted { .. } => "turn_started",
            GameEvent::TurnEnded { .. } => "turn_ended",
            GameEvent::PlayerChanged { .. } => "player_changed",
            GameEvent::PhaseChanged { .. } => "phase_changed",
            GameEvent::FlagsChanged { .. } => "flags_changed",
            GameEvent::StateRestored { .. } => "state_restored",
            GameEvent::DrawOffStarted { .. } => "draw_off_started",
            GameEvent::DrawOffTileDrawn { .. } => "draw_off_tile_drawn",
            GameEvent::DrawOffTie { .. } => "draw_off_tie",
            GameEvent::DrawOffResolved { .. } => "draw_off_resolved",
            GameEvent::GameOver { .. } => "game_over",
        }
    }

    /// The player the event is primarily about, where there is one.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::TilePlaced { tile, .. } | GameEvent::TileRemoved { tile, .. } => tile.owner,
            GameEvent::TileOwnerChanged { to, .. } => Some(*to),
            GameEvent::LandmarkCreated { owner, .. }
            | GameEvent::LandmarkRemoved { owner, .. }
            | GameEvent::HeadquartersCreated { owner, .. }
            | GameEvent::AgentPlaced { owner, .. }
            | GameEvent::AgentMoved { owner, .. }
            | GameEvent::AgentRemoved { owner, .. } => Some(*owner),
            GameEvent::LandmarkCaptured { attacker, .. } | GameEvent::TileCaptured { attacker, .. } => {
                Some(*attacker)
            }
            GameEvent::HandChanged { player, .. }
            | GameEvent::TilesDiscarded { player, .. }
            | GameEvent::EventDrawn { player, .. }
            | GameEvent::EventPlayed { player, .. }
            | GameEvent::EventsDiscarded { player, .. }
            | GameEvent::TurnStarted { player, .. }
            | GameEvent::TurnEnded { player, .. }
            | GameEvent::FlagsChanged { player, .. }
            | GameEvent::DrawOffTileDrawn { player, .. } => Some(*player),
            GameEvent::PlayerChanged { to, .. } => Some(*to),
            GameEvent::DrawOffResolved { winner } => Some(*winner),
            GameEvent::TileRetyped { .. }
            | GameEvent::AgentsCleared { .. }
            | GameEvent::DrawPileReordered { .. }
            | GameEvent::PhaseChanged { .. }
            | GameEvent::StateRestored { .. }
            | GameEvent::DrawOffStarted { .. }
            | GameEvent::DrawOffTie { .. }
            | GameEvent::GameOver { .. } => None,
        }
    }
}
