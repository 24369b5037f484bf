//! Room store - sole owner of live room state.
//!
//! One concurrent map of rooms, one async mutex per room. A compound
//! operation checks a room out and holds its lock across the awaited
//! narrator call, which gives the single-writer-per-room discipline: chat
//! order matches acceptance order, and requests for different rooms never
//! contend.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use turtlesoup_domain::{DomainError, PlayerId, PlayerName, Room, RoomCode, StoryId};

use crate::infrastructure::ports::ClockPort;

/// In-memory store of live rooms. Explicitly constructed and passed by
/// reference; there is no global instance.
pub struct RoomStore {
    rooms: DashMap<RoomCode, Arc<Mutex<Room>>>,
    clock: Arc<dyn ClockPort>,
}

impl RoomStore {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            rooms: DashMap::new(),
            clock,
        }
    }

    /// Create a room with a fresh code and return its initial snapshot.
    pub fn create_room(
        &self,
        host_name: PlayerName,
        max_players: usize,
        max_health: u32,
        time_limit_minutes: u32,
        story_id: StoryId,
    ) -> Room {
        let now = self.clock.now();
        loop {
            let code = RoomCode::generate();
            // Codes are 8 hex chars; collisions are unlikely but cheap to
            // re-roll.
            if self.rooms.contains_key(&code) {
                continue;
            }
            let room = Room::new(
                code.clone(),
                host_name.clone(),
                max_players,
                max_health,
                time_limit_minutes,
                story_id,
                now,
            );
            let snapshot = room.clone();
            self.rooms.insert(code, Arc::new(Mutex::new(room)));
            return snapshot;
        }
    }

    /// Check a room out for mutation. The returned guard holds the room's
    /// write lock until dropped.
    pub async fn checkout(&self, code: &RoomCode) -> Result<OwnedMutexGuard<Room>, DomainError> {
        let room = self
            .rooms
            .get(code)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DomainError::room_not_found(code.to_string()))?;
        Ok(room.lock_owned().await)
    }

    /// Consistent read-only snapshot. Stale the moment it is returned,
    /// which polling readers must tolerate anyway.
    pub async fn snapshot(&self, code: &RoomCode) -> Result<Room, DomainError> {
        let guard = self.checkout(code).await?;
        Ok(guard.clone())
    }

    /// Drop a room entirely. Returns whether it existed.
    pub fn remove(&self, code: &RoomCode) -> bool {
        self.rooms.remove(code).is_some()
    }

    pub fn contains(&self, code: &RoomCode) -> bool {
        self.rooms.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Remove every player-less or inactivity-expired room. Returns how
    /// many rooms were reclaimed.
    pub async fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let candidates: Vec<(RoomCode, Arc<Mutex<Room>>)> = self
            .rooms
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        let mut reclaimed = 0;
        for (code, room) in candidates {
            let expired = {
                let room = room.lock().await;
                room.is_empty() || room.is_expired(now)
            };
            if expired && self.rooms.remove(&code).is_some() {
                tracing::info!(room = %code, "expired room reclaimed");
                reclaimed += 1;
            }
        }
        reclaimed
    }

    /// Convenience for the leave path: mutate, then reclaim if the roster
    /// emptied. Returns false when the room or player is unknown.
    pub async fn leave(&self, code: &RoomCode, player_id: PlayerId) -> bool {
        let Ok(mut room) = self.checkout(code).await else {
            return false;
        };
        let now = self.clock.now();
        if room.remove_player(player_id, now).is_err() {
            return false;
        }
        let empty = room.is_empty();
        drop(room);
        if empty {
            self.remove(code);
        }
        true
    }
}
