//! Player entity - a roster member owned by its Room

use serde::{Deserialize, Serialize};

use crate::value_objects::{Health, PlayerName};
use crate::PlayerId;

/// A player in a room's roster.
///
/// Owned exclusively by its `Room`; mutated only through Room operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: PlayerName,
    pub health: Health,
    pub is_ready: bool,
    pub is_host: bool,
}

impl Player {
    /// Seed the room creator. Hosts start ready.
    pub fn host(name: PlayerName, max_health: u32) -> Self {
        Self {
            id: PlayerId::new(),
            name,
            health: Health::full(max_health),
            is_ready: true,
            is_host: true,
        }
    }

    /// Seed a joining player. Joiners start not-ready, not-host.
    pub fn joiner(name: PlayerName, max_health: u32) -> Self {
        Self {
            id: PlayerId::new(),
            name,
            health: Health::full(max_health),
            is_ready: false,
            is_host: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PlayerName {
        PlayerName::new(s).expect("valid name")
    }

    #[test]
    fn host_starts_ready_at_full_health() {
        let host = Player::host(name("Alice"), 5);
        assert!(host.is_host);
        assert!(host.is_ready);
        assert_eq!(host.health.remaining(), 5);
    }

    #[test]
    fn joiner_starts_not_ready() {
        let joiner = Player::joiner(name("Bob"), 5);
        assert!(!joiner.is_host);
        assert!(!joiner.is_ready);
        assert_eq!(joiner.health.remaining(), 5);
    }
}
