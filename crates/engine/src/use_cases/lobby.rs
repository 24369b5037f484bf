//! Lobby use cases: room creation, joining, readiness, game start.

use std::sync::Arc;

use uuid::Uuid;

use turtlesoup_domain::{
    ChatMessage, DomainError, PlayerId, PlayerName, DEFAULT_MAX_HEALTH, DEFAULT_MAX_PLAYERS,
};
use turtlesoup_shared::{PlayerJoined, RoomCreated, RoomStateData};

use super::snapshot::{player_data, room_state};
use super::{parse_code, story_prompt};
use crate::infrastructure::ports::{ClockPort, RandomPort};
use crate::stores::{RoomStore, StoryRegistry};

/// Default game length when the creator does not choose one.
const DEFAULT_TIME_LIMIT_MINUTES: u32 = 30;

/// Use cases for the pre-game room lifecycle.
pub struct LobbyUseCases {
    store: Arc<RoomStore>,
    registry: Arc<StoryRegistry>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl LobbyUseCases {
    pub fn new(
        store: Arc<RoomStore>,
        registry: Arc<StoryRegistry>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            store,
            registry,
            clock,
            random,
        }
    }

    /// Create a room: fresh code, seeded host, randomly picked story.
    pub fn create_room(
        &self,
        host_name: &str,
        max_players: Option<usize>,
        time_limit_minutes: Option<u32>,
    ) -> Result<RoomCreated, DomainError> {
        let host_name = PlayerName::new(host_name)?;
        let story = self.registry.pick(self.random.as_ref());
        let room = self.store.create_room(
            host_name.clone(),
            max_players.unwrap_or(DEFAULT_MAX_PLAYERS),
            DEFAULT_MAX_HEALTH,
            time_limit_minutes.unwrap_or(DEFAULT_TIME_LIMIT_MINUTES),
            story.id,
        );
        tracing::info!(room = %room.code(), host = %host_name, "room created");
        Ok(RoomCreated {
            room_id: room.code().to_string(),
            state: room_state(&room, &story.prompt, self.clock.now()),
        })
    }

    /// Join a waiting room.
    pub async fn join_room(
        &self,
        room_id: &str,
        player_name: &str,
    ) -> Result<PlayerJoined, DomainError> {
        let code = parse_code(room_id)?;
        let player_name = PlayerName::new(player_name)?;
        let mut room = self.store.checkout(&code).await?;
        let player = room.join(player_name, self.clock.now())?;
        tracing::info!(room = %code, player = %player.name, "player joined");
        let prompt = story_prompt(&self.registry, &room);
        Ok(PlayerJoined {
            player: player_data(&player),
            state: room_state(&room, &prompt, self.clock.now()),
        })
    }

    /// Remove a player, promoting a new host and reclaiming the room as
    /// needed. Returns false when the room or player is unknown.
    pub async fn leave_room(&self, room_id: &str, player_id: Uuid) -> bool {
        let Ok(code) = parse_code(room_id) else {
            return false;
        };
        let left = self.store.leave(&code, PlayerId::from_uuid(player_id)).await;
        if left {
            tracing::info!(room = %code, %player_id, "player left");
        }
        left
    }

    /// Flip a player's ready flag. Pre-game only.
    pub async fn toggle_ready(
        &self,
        room_id: &str,
        player_id: Uuid,
    ) -> Result<RoomStateData, DomainError> {
        let code = parse_code(room_id)?;
        let mut room = self.store.checkout(&code).await?;
        room.toggle_ready(PlayerId::from_uuid(player_id), self.clock.now())?;
        let prompt = story_prompt(&self.registry, &room);
        Ok(room_state(&room, &prompt, self.clock.now()))
    }

    /// Start the game. Host-only; requires every player ready. Announces
    /// the surface prompt in a system chat entry - never the solution.
    pub async fn start_game(
        &self,
        room_id: &str,
        player_id: Uuid,
    ) -> Result<RoomStateData, DomainError> {
        let code = parse_code(room_id)?;
        let player_id = PlayerId::from_uuid(player_id);
        let mut room = self.store.checkout(&code).await?;

        let is_host = room.player(player_id).is_some_and(|p| p.is_host);
        if !is_host {
            return Err(DomainError::invalid_state("only the host can start the game"));
        }

        room.start(self.clock.now())?;
        let prompt = story_prompt(&self.registry, &room);
        room.push_message(ChatMessage::system(
            format!("游戏开始！汤面：{prompt}"),
            self.clock.now(),
        ));
        tracing::info!(room = %code, "game started");
        Ok(room_state(&room, &prompt, self.clock.now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedClock, FixedRandom};
    use chrono::{TimeZone, Utc};
    use turtlesoup_domain::RoomStatus;

    fn lobby() -> LobbyUseCases {
        let t = Utc
            .with_ymd_and_hms(2025, 1, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        let clock = Arc::new(FixedClock(t));
        LobbyUseCases::new(
            Arc::new(RoomStore::new(clock.clone())),
            Arc::new(StoryRegistry::builtin()),
            clock,
            Arc::new(FixedRandom(0)),
        )
    }

    #[tokio::test]
    async fn create_join_ready_start_flow() {
        let lobby = lobby();

        let created = lobby
            .create_room("Alice", Some(4), None)
            .expect("room created");
        assert_eq!(created.state.status, RoomStatus::Waiting);
        assert_eq!(created.state.players.len(), 1);
        let alice = &created.state.players[0];
        assert!(alice.is_host);
        assert!(alice.is_ready);
        assert_eq!(alice.health, 5);

        let joined = lobby
            .join_room(&created.room_id, "Bob")
            .await
            .expect("joined");
        assert_eq!(joined.state.players.len(), 2);
        assert!(!joined.player.is_ready);
        assert!(!joined.player.is_host);

        // Bob is not ready yet, so the host cannot start.
        let err = lobby
            .start_game(&created.room_id, alice.id)
            .await
            .expect_err("Bob not ready");
        assert!(matches!(err, DomainError::InvalidState(_)));

        let state = lobby
            .toggle_ready(&created.room_id, joined.player.id)
            .await
            .expect("toggled");
        assert!(state.players[1].is_ready);

        let state = lobby
            .start_game(&created.room_id, alice.id)
            .await
            .expect("started");
        assert_eq!(state.status, RoomStatus::Playing);
        assert_eq!(state.current_turn, Some(alice.id));
        // The announcement shows the prompt, never the solution.
        let announcement = state.chat_history.last().expect("system entry");
        assert!(announcement.body.contains(&state.prompt));
    }

    #[tokio::test]
    async fn only_the_host_starts() {
        let lobby = lobby();
        let created = lobby.create_room("Alice", None, None).expect("created");
        let joined = lobby
            .join_room(&created.room_id, "Bob")
            .await
            .expect("joined");
        lobby
            .toggle_ready(&created.room_id, joined.player.id)
            .await
            .expect("toggled");

        let err = lobby
            .start_game(&created.room_id, joined.player.id)
            .await
            .expect_err("Bob is not host");
        assert!(matches!(err, DomainError::InvalidState(_)));
    }

    #[tokio::test]
    async fn join_unknown_room_is_not_found() {
        let lobby = lobby();
        let err = lobby
            .join_room("deadbeef", "Bob")
            .await
            .expect_err("no such room");
        assert!(matches!(err, DomainError::RoomNotFound(_)));

        // Garbage codes read as not-found too, not as validation noise.
        let err = lobby
            .join_room("not-a-code", "Bob")
            .await
            .expect_err("bad code");
        assert!(matches!(err, DomainError::RoomNotFound(_)));
    }

    #[tokio::test]
    async fn leave_handles_unknown_rooms_gracefully() {
        let lobby = lobby();
        assert!(!lobby.leave_room("deadbeef", Uuid::new_v4()).await);
        assert!(!lobby.leave_room("not-a-code", Uuid::new_v4()).await);
    }
}
