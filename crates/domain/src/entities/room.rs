//! Room entity - one isolated game session with its own roster, story,
//! clue list, and chat log.
//!
//! The room is the single consistency boundary: every mutation goes through
//! a method here, and each method leaves the room in a consistent state.
//! Invariants held by construction:
//! - exactly one host while the roster is non-empty
//! - the turn pointer references a rostered player while status is Playing
//! - health never goes below zero
//! - chat log and clue list are append-only

use chrono::{DateTime, Duration, Utc};

use super::chat::ChatMessage;
use super::clue::Clue;
use super::player::Player;
use crate::error::DomainError;
use crate::value_objects::{PlayerName, RoomCode};
use crate::{PlayerId, StoryId};

/// Default roster capacity.
pub const DEFAULT_MAX_PLAYERS: usize = 4;

/// Rooms inactive for longer than this are reclaimable.
pub const EXPIRY_WINDOW_HOURS: i64 = 2;

/// Room lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Waiting,
    Playing,
    Finished,
}

/// One isolated game session.
#[derive(Debug, Clone)]
pub struct Room {
    code: RoomCode,
    players: Vec<Player>,
    current_turn: Option<PlayerId>,
    /// Index the turn pointer last occupied; advance wraps from here even
    /// when the pointed-at player has since left.
    turn_cursor: usize,
    status: RoomStatus,
    story_id: StoryId,
    clues: Vec<Clue>,
    chat: Vec<ChatMessage>,
    max_players: usize,
    max_health: u32,
    time_limit_minutes: u32,
    started_at: Option<DateTime<Utc>>,
    last_activity: DateTime<Utc>,
}

impl Room {
    /// Create a room seeded with its host at full health, status Waiting.
    pub fn new(
        code: RoomCode,
        host_name: PlayerName,
        max_players: usize,
        max_health: u32,
        time_limit_minutes: u32,
        story_id: StoryId,
        now: DateTime<Utc>,
    ) -> Self {
        let host = Player::host(host_name, max_health);
        let current_turn = None;
        Self {
            code,
            players: vec![host],
            current_turn,
            turn_cursor: 0,
            status: RoomStatus::Waiting,
            story_id,
            clues: Vec::new(),
            chat: Vec::new(),
            max_players: max_players.max(1),
            max_health,
            time_limit_minutes,
            started_at: None,
            last_activity: now,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn status(&self) -> RoomStatus {
        self.status
    }

    pub fn story_id(&self) -> StoryId {
        self.story_id
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn host(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_host)
    }

    pub fn current_turn(&self) -> Option<PlayerId> {
        self.current_turn
    }

    pub fn chat(&self) -> &[ChatMessage] {
        &self.chat
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    pub fn max_players(&self) -> usize {
        self.max_players
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn time_limit_minutes(&self) -> u32 {
        self.time_limit_minutes
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    // ========================================================================
    // Lobby operations
    // ========================================================================

    /// Add a player to the roster. Joiners start not-ready, not-host, at
    /// full health.
    pub fn join(&mut self, name: PlayerName, now: DateTime<Utc>) -> Result<Player, DomainError> {
        if self.status != RoomStatus::Waiting {
            return Err(DomainError::GameAlreadyStarted(self.code.to_string()));
        }
        if self.players.len() >= self.max_players {
            return Err(DomainError::RoomFull {
                room: self.code.to_string(),
                current: self.players.len(),
                max: self.max_players,
            });
        }
        let player = Player::joiner(name, self.max_health);
        self.players.push(player.clone());
        self.touch(now);
        Ok(player)
    }

    /// Remove a player. A departing host hands the role to the next player
    /// in roster order (wrapping) in the same call; a departing turn holder
    /// hands the turn to the next player the same way.
    pub fn remove_player(
        &mut self,
        player_id: PlayerId,
        now: DateTime<Utc>,
    ) -> Result<Player, DomainError> {
        let index = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or_else(|| DomainError::player_not_found(self.code.to_string(), player_id))?;

        let removed = self.players.remove(index);
        self.touch(now);

        if self.players.is_empty() {
            self.current_turn = None;
            return Ok(removed);
        }

        let successor = index % self.players.len();
        if removed.is_host {
            self.players[successor].is_host = true;
        }
        match self.current_turn {
            Some(id) if id == removed.id => {
                if self.status == RoomStatus::Playing {
                    self.current_turn = Some(self.players[successor].id);
                    self.turn_cursor = successor;
                } else {
                    self.current_turn = None;
                }
            }
            Some(id) => {
                // Removal may have shifted the turn holder's index.
                if let Some(i) = self.players.iter().position(|p| p.id == id) {
                    self.turn_cursor = i;
                }
            }
            None => {}
        }
        Ok(removed)
    }

    /// Flip a player's ready flag. Only meaningful pre-game.
    pub fn toggle_ready(
        &mut self,
        player_id: PlayerId,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        if self.status != RoomStatus::Waiting {
            return Err(DomainError::invalid_state(
                "ready can only be toggled before the game starts",
            ));
        }
        let code = self.code.to_string();
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or_else(|| DomainError::player_not_found(code, player_id))?;
        player.is_ready = !player.is_ready;
        let ready = player.is_ready;
        self.touch(now);
        Ok(ready)
    }

    /// Transition Waiting -> Playing. Requires a non-empty, fully ready
    /// roster. The turn pointer lands on the first player by join order.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.status != RoomStatus::Waiting {
            return Err(DomainError::invalid_state(
                "game can only be started from the waiting state",
            ));
        }
        if self.players.is_empty() {
            return Err(DomainError::invalid_state(
                "cannot start a game with no players",
            ));
        }
        if !self.players.iter().all(|p| p.is_ready) {
            return Err(DomainError::invalid_state("not all players are ready"));
        }
        self.status = RoomStatus::Playing;
        self.current_turn = Some(self.players[0].id);
        self.turn_cursor = 0;
        self.started_at = Some(now);
        self.touch(now);
        Ok(())
    }

    // ========================================================================
    // Play operations
    // ========================================================================

    /// Check a player may perform a costed action (question/guess/hint).
    pub fn ensure_can_act(&self, player_id: PlayerId) -> Result<(), DomainError> {
        match self.status {
            RoomStatus::Playing => {}
            RoomStatus::Waiting => {
                return Err(DomainError::invalid_state("game has not started"));
            }
            RoomStatus::Finished => {
                return Err(DomainError::invalid_state("game is finished"));
            }
        }
        let player = self
            .player(player_id)
            .ok_or_else(|| DomainError::player_not_found(self.code.to_string(), player_id))?;
        if player.health.is_depleted() {
            return Err(DomainError::PlayerEliminated(player.name.to_string()));
        }
        Ok(())
    }

    /// Append a chat entry. Chat is append-only; entries are never
    /// reordered or deleted.
    pub fn push_message(&mut self, message: ChatMessage) -> ChatMessage {
        self.last_activity = message.timestamp.max(self.last_activity);
        self.chat.push(message.clone());
        message
    }

    /// Append a discovered clue.
    pub fn add_clue(&mut self, clue: Clue) -> Clue {
        self.last_activity = clue.discovered_at.max(self.last_activity);
        self.clues.push(clue.clone());
        clue
    }

    /// Deduct one health point from a player. Returns the remaining pool.
    pub fn spend_health(
        &mut self,
        player_id: PlayerId,
        now: DateTime<Utc>,
    ) -> Result<u32, DomainError> {
        let code = self.code.to_string();
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or_else(|| DomainError::player_not_found(code, player_id))?;
        player.health = player.health.spend();
        let remaining = player.health.remaining();
        self.touch(now);
        Ok(remaining)
    }

    /// Rotate the turn pointer to the next player in roster order, wrapping
    /// around. Wraps from the last-known index when the previous holder has
    /// left the roster. Only meaningful while Playing.
    pub fn advance_turn(&mut self, now: DateTime<Utc>) -> Option<PlayerId> {
        if self.status != RoomStatus::Playing {
            return None;
        }
        if self.players.is_empty() {
            self.current_turn = None;
            return None;
        }
        let next = match self
            .current_turn
            .and_then(|id| self.players.iter().position(|p| p.id == id))
        {
            Some(index) => (index + 1) % self.players.len(),
            None => self.turn_cursor % self.players.len(),
        };
        self.turn_cursor = next;
        self.current_turn = Some(self.players[next].id);
        self.touch(now);
        self.current_turn
    }

    /// Transition to Finished. Terminal; repeated calls are a no-op.
    pub fn end(&mut self, now: DateTime<Utc>) {
        self.status = RoomStatus::Finished;
        self.touch(now);
    }

    // ========================================================================
    // Queries for end-of-game detection (the room never ends itself)
    // ========================================================================

    /// True when every rostered player has run out of health.
    pub fn all_eliminated(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(|p| p.health.is_depleted())
    }

    /// True when the configured time limit has elapsed since game start.
    pub fn time_expired(&self, now: DateTime<Utc>) -> bool {
        match self.started_at {
            Some(started) => now >= started + Duration::minutes(i64::from(self.time_limit_minutes)),
            None => false,
        }
    }

    /// True when the room has seen no activity for the expiry window.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.last_activity > Duration::hours(EXPIRY_WINDOW_HOURS)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity = self.last_activity.max(now);
    }
}
