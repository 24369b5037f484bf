//! Play use cases: the costed compound operations plus turn and game-end
//! management.
//!
//! Every compound operation follows the same shape under the room's write
//! lock: reject eliminated players, append the player's entry, await the
//! narrator, append the narrator's entry, spend one health point. The
//! narrator is awaited while the lock is held so chat order always matches
//! acceptance order, and any narrator error is recovered with the local
//! heuristics so the player's entry is never orphaned.

use std::sync::Arc;

use uuid::Uuid;

use turtlesoup_domain::{
    ChatMessage, Clue, DomainError, MessageKind, PlayerId, Room, RoomStatus, Story,
};
use turtlesoup_shared::{
    CommandOutcome, EngineResultData, GuessOutcome, HintOutcome, QuestionOutcome, RoomStateData,
};

use super::snapshot::{chat_data, room_state};
use super::{parse_code, story_prompt};
use crate::infrastructure::ports::{
    ClockPort, GuessVerdict, NarratorPort, QuestionVerdict, RandomPort,
};
use crate::narrator::heuristic;
use crate::stores::{RoomStore, StoryRegistry};

/// Health cost of every question, guess, and hint.
const ACTION_COST: u32 = 1;

/// Use cases for in-game actions.
pub struct PlayUseCases {
    store: Arc<RoomStore>,
    registry: Arc<StoryRegistry>,
    narrator: Arc<dyn NarratorPort>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl PlayUseCases {
    pub fn new(
        store: Arc<RoomStore>,
        registry: Arc<StoryRegistry>,
        narrator: Arc<dyn NarratorPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            store,
            registry,
            narrator,
            clock,
            random,
        }
    }

    /// Ask the narrator a yes/no question. Costs one health point
    /// regardless of the verdict.
    pub async fn submit_question(
        &self,
        room_id: &str,
        player_id: Uuid,
        question: &str,
    ) -> Result<CommandOutcome, DomainError> {
        let code = parse_code(room_id)?;
        let player_id = PlayerId::from_uuid(player_id);
        let mut room = self.store.checkout(&code).await?;
        room.ensure_can_act(player_id)?;
        let story = self.story_for(&room)?;
        let author = author_name(&room, player_id);

        let entry = room.push_message(ChatMessage::player(
            player_id,
            author,
            question,
            MessageKind::Question,
            self.clock.now(),
        ));

        let verdict = match self.narrator.answer_question(question, &story).await {
            Ok(verdict) => verdict,
            Err(error) => {
                tracing::warn!(%error, "narrator unavailable, classifying locally");
                heuristic::classify_question(question, &story)
            }
        };
        let QuestionVerdict {
            answer,
            explanation,
        } = verdict;

        let reply = room.push_message(
            ChatMessage::narrator(
                answer.display_zh(),
                MessageKind::Answer,
                self.clock.now(),
            )
            .with_verdict(answer),
        );
        room.spend_health(player_id, self.clock.now())?;

        Ok(CommandOutcome {
            chat_entries: vec![chat_data(&entry), chat_data(&reply)],
            engine_result: EngineResultData::Question(QuestionOutcome {
                answer,
                explanation,
            }),
            state: room_state(&room, &story.prompt, self.clock.now()),
        })
    }

    /// Submit a solution guess. Costs one health point regardless of the
    /// grade; a correct guess carries the full reveal in the result but the
    /// room stays in Playing until the transport calls `end_game`.
    pub async fn submit_guess(
        &self,
        room_id: &str,
        player_id: Uuid,
        guess: &str,
    ) -> Result<CommandOutcome, DomainError> {
        let code = parse_code(room_id)?;
        let player_id = PlayerId::from_uuid(player_id);
        let mut room = self.store.checkout(&code).await?;
        room.ensure_can_act(player_id)?;
        let story = self.story_for(&room)?;
        let author = author_name(&room, player_id);

        let entry = room.push_message(ChatMessage::player(
            player_id,
            author,
            format!("我猜测：{guess}"),
            MessageKind::Guess,
            self.clock.now(),
        ));

        let verdict = match self.narrator.evaluate_guess(guess, &story).await {
            Ok(verdict) => verdict,
            Err(error) => {
                tracing::warn!(%error, "narrator unavailable, grading locally");
                heuristic::evaluate_guess(guess, &story)
            }
        };
        let GuessVerdict {
            band,
            message,
            full_story,
        } = verdict;

        let reply = room.push_message(ChatMessage::narrator(
            message.clone(),
            MessageKind::Answer,
            self.clock.now(),
        ));
        room.spend_health(player_id, self.clock.now())?;

        Ok(CommandOutcome {
            chat_entries: vec![chat_data(&entry), chat_data(&reply)],
            engine_result: EngineResultData::Guess(GuessOutcome {
                is_correct: band.is_correct(),
                band,
                message,
                full_story,
            }),
            state: room_state(&room, &story.prompt, self.clock.now()),
        })
    }

    /// Request a hint. Costs one health point.
    pub async fn request_hint(
        &self,
        room_id: &str,
        player_id: Uuid,
    ) -> Result<CommandOutcome, DomainError> {
        let code = parse_code(room_id)?;
        let player_id = PlayerId::from_uuid(player_id);
        let mut room = self.store.checkout(&code).await?;
        room.ensure_can_act(player_id)?;
        let story = self.story_for(&room)?;
        let author = author_name(&room, player_id);
        let clue_titles: Vec<String> = room.clues().iter().map(|c| c.title.clone()).collect();

        let entry = room.push_message(ChatMessage::player(
            player_id,
            author,
            "请求提示",
            MessageKind::Hint,
            self.clock.now(),
        ));

        let hint = match self.narrator.generate_hint(&story, &clue_titles).await {
            Ok(hint) => hint,
            Err(error) => {
                tracing::warn!(%error, "narrator unavailable, hinting locally");
                heuristic::pick_hint(&story, &clue_titles, self.random.as_ref())
            }
        };

        let reply = room.push_message(ChatMessage::narrator(
            format!("提示：{hint}"),
            MessageKind::Hint,
            self.clock.now(),
        ));
        room.spend_health(player_id, self.clock.now())?;

        Ok(CommandOutcome {
            chat_entries: vec![chat_data(&entry), chat_data(&reply)],
            engine_result: EngineResultData::Hint(HintOutcome {
                hint,
                cost: ACTION_COST,
            }),
            state: room_state(&room, &story.prompt, self.clock.now()),
        })
    }

    /// Record a discovered clue.
    pub async fn record_clue(
        &self,
        room_id: &str,
        player_id: Uuid,
        title: &str,
        description: &str,
    ) -> Result<RoomStateData, DomainError> {
        let code = parse_code(room_id)?;
        let player_id = PlayerId::from_uuid(player_id);
        let mut room = self.store.checkout(&code).await?;
        if room.status() == RoomStatus::Finished {
            return Err(DomainError::invalid_state("game is finished"));
        }
        if room.player(player_id).is_none() {
            return Err(DomainError::player_not_found(code.to_string(), player_id));
        }
        room.add_clue(Clue::new(title, description, player_id, self.clock.now()));
        let prompt = story_prompt(&self.registry, &room);
        Ok(room_state(&room, &prompt, self.clock.now()))
    }

    /// Rotate the turn pointer. Returns the new holder, if any.
    pub async fn advance_turn(&self, room_id: &str) -> Result<Option<Uuid>, DomainError> {
        let code = parse_code(room_id)?;
        let mut room = self.store.checkout(&code).await?;
        Ok(room.advance_turn(self.clock.now()).map(|id| id.to_uuid()))
    }

    /// Finish the game. Terminal; the transport decides when (correct
    /// guess, all players eliminated, or time limit).
    pub async fn end_game(&self, room_id: &str) -> Result<RoomStateData, DomainError> {
        let code = parse_code(room_id)?;
        let mut room = self.store.checkout(&code).await?;
        room.end(self.clock.now());
        tracing::info!(room = %code, "game ended");
        let prompt = story_prompt(&self.registry, &room);
        Ok(room_state(&room, &prompt, self.clock.now()))
    }

    /// Read-only snapshot for polling clients. Stale reads are fine.
    pub async fn get_state(&self, room_id: &str) -> Result<RoomStateData, DomainError> {
        let code = parse_code(room_id)?;
        let room = self.store.snapshot(&code).await?;
        let prompt = story_prompt(&self.registry, &room);
        Ok(room_state(&room, &prompt, self.clock.now()))
    }

    fn story_for(&self, room: &Room) -> Result<Story, DomainError> {
        self.registry
            .get(room.story_id())
            .cloned()
            .ok_or_else(|| DomainError::invalid_state("room references an unregistered story"))
    }
}

fn author_name(room: &Room, player_id: PlayerId) -> String {
    room.player(player_id)
        .map(|p| p.name.to_string())
        .unwrap_or_default()
}
