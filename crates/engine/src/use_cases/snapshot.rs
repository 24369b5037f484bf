//! Domain -> wire DTO conversions.

use turtlesoup_domain::{ChatAuthor, ChatMessage, Clue, Player, Room};
use turtlesoup_shared::{AuthorData, ChatMessageData, ClueData, PlayerData, RoomStateData};

pub fn player_data(player: &Player) -> PlayerData {
    PlayerData {
        id: player.id.to_uuid(),
        name: player.name.to_string(),
        health: player.health.remaining(),
        is_ready: player.is_ready,
        is_host: player.is_host,
    }
}

pub fn chat_data(message: &ChatMessage) -> ChatMessageData {
    let (author, player_id) = match message.author {
        ChatAuthor::Player(id) => (AuthorData::Player, Some(id.to_uuid())),
        ChatAuthor::Narrator => (AuthorData::Narrator, None),
        ChatAuthor::System => (AuthorData::System, None),
    };
    ChatMessageData {
        id: message.id.to_uuid(),
        author,
        player_id,
        author_name: message.author_name.clone(),
        body: message.body.clone(),
        kind: message.kind,
        timestamp: message.timestamp,
        verdict: message.verdict,
    }
}

pub fn clue_data(clue: &Clue) -> ClueData {
    ClueData {
        id: clue.id.to_uuid(),
        title: clue.title.clone(),
        description: clue.description.clone(),
        discovered_by: clue.discovered_by.to_uuid(),
        discovered_at: clue.discovered_at,
    }
}

/// Full snapshot of a room. Carries the surface prompt; the solution never
/// crosses this boundary.
pub fn room_state(room: &Room, prompt: &str, now: chrono::DateTime<chrono::Utc>) -> RoomStateData {
    RoomStateData {
        room_id: room.code().to_string(),
        players: room.players().iter().map(player_data).collect(),
        current_turn: room.current_turn().map(|id| id.to_uuid()),
        status: room.status(),
        prompt: prompt.to_string(),
        discovered_clues: room.clues().iter().map(clue_data).collect(),
        chat_history: room.chat().iter().map(chat_data).collect(),
        max_health: room.max_health(),
        time_limit_minutes: room.time_limit_minutes(),
        game_start_time: room.started_at(),
        all_eliminated: room.all_eliminated(),
        time_expired: room.time_expired(now),
    }
}
