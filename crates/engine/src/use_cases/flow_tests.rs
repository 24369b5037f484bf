//! End-to-end flows over the use cases with a real store and the local
//! narrator (or a mocked delegate where the test needs a failure).

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use turtlesoup_domain::{DomainError, MessageKind, RoomStatus};
use turtlesoup_shared::{AuthorData, EngineResultData};

use crate::infrastructure::clock::{FixedClock, FixedRandom};
use crate::infrastructure::ports::{ClockPort, MockNarratorPort, NarratorError, NarratorPort};
use crate::narrator::HeuristicNarrator;
use crate::stores::{RoomStore, StoryRegistry};
use crate::use_cases::{LobbyUseCases, PlayUseCases};

struct Harness {
    lobby: LobbyUseCases,
    play: PlayUseCases,
}

fn harness_with(narrator: Arc<dyn NarratorPort>) -> Harness {
    let t = Utc
        .with_ymd_and_hms(2025, 1, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let clock: Arc<dyn ClockPort> = Arc::new(FixedClock(t));
    let random = Arc::new(FixedRandom(0));
    let store = Arc::new(RoomStore::new(clock.clone()));
    let registry = Arc::new(StoryRegistry::builtin());
    Harness {
        lobby: LobbyUseCases::new(store.clone(), registry.clone(), clock.clone(), random.clone()),
        play: PlayUseCases::new(store, registry, narrator, clock, random),
    }
}

fn local_harness() -> Harness {
    harness_with(Arc::new(HeuristicNarrator::new(Arc::new(FixedRandom(0)))))
}

/// Create a room with Alice hosting and Bob joined, everyone ready,
/// game started. Returns (room_id, alice, bob).
async fn playing_room(harness: &Harness) -> (String, Uuid, Uuid) {
    let created = harness
        .lobby
        .create_room("Alice", Some(4), Some(30))
        .expect("room created");
    let alice = created.state.players[0].id;
    let joined = harness
        .lobby
        .join_room(&created.room_id, "Bob")
        .await
        .expect("joined");
    let bob = joined.player.id;
    harness
        .lobby
        .toggle_ready(&created.room_id, bob)
        .await
        .expect("toggled");
    harness
        .lobby
        .start_game(&created.room_id, alice)
        .await
        .expect("started");
    (created.room_id, alice, bob)
}

fn health_of(state: &turtlesoup_shared::RoomStateData, player: Uuid) -> u32 {
    state
        .players
        .iter()
        .find(|p| p.id == player)
        .expect("player in roster")
        .health
}

#[tokio::test]
async fn question_appends_paired_entries_and_costs_one_health() {
    let harness = local_harness();
    let (room_id, alice, _) = playing_room(&harness).await;

    let outcome = harness
        .play
        .submit_question(&room_id, alice, "男人死了吗？")
        .await
        .expect("question accepted");

    // Exactly one player entry followed by exactly one narrator entry.
    assert_eq!(outcome.chat_entries.len(), 2);
    assert_eq!(outcome.chat_entries[0].author, AuthorData::Player);
    assert_eq!(outcome.chat_entries[0].kind, MessageKind::Question);
    assert_eq!(outcome.chat_entries[1].author, AuthorData::Narrator);
    assert_eq!(outcome.chat_entries[1].kind, MessageKind::Answer);
    assert!(outcome.chat_entries[1].verdict.is_some());

    assert_eq!(health_of(&outcome.state, alice), 4);
    // The chat log ends with the same pair, in the same order.
    let log = &outcome.state.chat_history;
    assert_eq!(log[log.len() - 2].id, outcome.chat_entries[0].id);
    assert_eq!(log[log.len() - 1].id, outcome.chat_entries[1].id);
}

#[tokio::test]
async fn guess_costs_one_health_even_when_wrong() {
    let harness = local_harness();
    let (room_id, alice, _) = playing_room(&harness).await;

    let outcome = harness
        .play
        .submit_guess(&room_id, alice, "他被外星人带走了")
        .await
        .expect("guess accepted");

    let EngineResultData::Guess(result) = &outcome.engine_result else {
        panic!("expected a guess result");
    };
    assert!(!result.is_correct);
    assert!(result.full_story.is_none());
    assert_eq!(health_of(&outcome.state, alice), 4);
    assert_eq!(outcome.chat_entries.len(), 2);
}

#[tokio::test]
async fn correct_guess_reveals_the_solution() {
    let harness = local_harness();
    let (room_id, alice, _) = playing_room(&harness).await;

    // The prompt identifies the story; guess its canonical solution.
    let state = harness.play.get_state(&room_id).await.expect("state");
    let registry = StoryRegistry::builtin();
    let solution = (0..registry.len() as i32)
        .map(|i| registry.pick(&FixedRandom(i)))
        .find(|story| story.prompt == state.prompt)
        .map(|story| story.solution.clone())
        .expect("prompt belongs to the builtin corpus");

    let outcome = harness
        .play
        .submit_guess(&room_id, alice, &solution)
        .await
        .expect("guess accepted");

    let EngineResultData::Guess(result) = &outcome.engine_result else {
        panic!("expected a guess result");
    };
    assert!(result.is_correct);
    let reveal = result.full_story.as_deref().expect("reveal present");
    assert!(!reveal.is_empty());

    // The store never ends the game on its own; the transport does.
    assert_eq!(outcome.state.status, RoomStatus::Playing);
    let ended = harness.play.end_game(&room_id).await.expect("ended");
    assert_eq!(ended.status, RoomStatus::Finished);
}

#[tokio::test]
async fn hint_follows_the_same_compound_shape() {
    let harness = local_harness();
    let (room_id, alice, _) = playing_room(&harness).await;

    let outcome = harness
        .play
        .request_hint(&room_id, alice)
        .await
        .expect("hint granted");

    assert_eq!(outcome.chat_entries.len(), 2);
    assert_eq!(outcome.chat_entries[0].author, AuthorData::Player);
    assert_eq!(outcome.chat_entries[0].kind, MessageKind::Hint);
    assert_eq!(outcome.chat_entries[1].author, AuthorData::Narrator);
    assert_eq!(outcome.chat_entries[1].kind, MessageKind::Hint);
    let EngineResultData::Hint(hint) = &outcome.engine_result else {
        panic!("expected a hint result");
    };
    assert!(!hint.hint.is_empty());
    assert_eq!(hint.cost, 1);
    assert_eq!(health_of(&outcome.state, alice), 4);
}

#[tokio::test]
async fn hints_get_more_pointed_once_clues_are_recorded() {
    let harness = local_harness();
    let (room_id, alice, _) = playing_room(&harness).await;

    for title in ["线索一", "线索二", "线索三"] {
        harness
            .play
            .record_clue(&room_id, alice, title, "细节")
            .await
            .expect("clue recorded");
    }

    let outcome = harness
        .play
        .request_hint(&room_id, alice)
        .await
        .expect("hint granted");
    let EngineResultData::Hint(hint) = &outcome.engine_result else {
        panic!("expected a hint result");
    };
    assert!(hint.hint.contains("联系"), "tiered hint expected: {}", hint.hint);
    assert_eq!(outcome.state.discovered_clues.len(), 3);
}

#[tokio::test]
async fn eliminated_players_are_rejected_on_every_costed_path() {
    let harness = local_harness();
    let (room_id, alice, _) = playing_room(&harness).await;

    for _ in 0..5 {
        harness
            .play
            .request_hint(&room_id, alice)
            .await
            .expect("still has health");
    }

    let question = harness
        .play
        .submit_question(&room_id, alice, "他死了吗？")
        .await
        .expect_err("eliminated");
    assert!(matches!(question, DomainError::PlayerEliminated(_)));
    let guess = harness
        .play
        .submit_guess(&room_id, alice, "随便猜猜")
        .await
        .expect_err("eliminated");
    assert!(matches!(guess, DomainError::PlayerEliminated(_)));
    let hint = harness
        .play
        .request_hint(&room_id, alice)
        .await
        .expect_err("eliminated");
    assert!(matches!(hint, DomainError::PlayerEliminated(_)));

    // Health floored at zero and no further chat entries were appended.
    let state = harness.play.get_state(&room_id).await.expect("state");
    assert_eq!(health_of(&state, alice), 0);
}

#[tokio::test]
async fn all_eliminated_is_surfaced_for_the_transport_to_act_on() {
    let harness = local_harness();
    let (room_id, alice, bob) = playing_room(&harness).await;

    for player in [alice, bob] {
        for _ in 0..5 {
            harness
                .play
                .request_hint(&room_id, player)
                .await
                .expect("still has health");
        }
    }

    let state = harness.play.get_state(&room_id).await.expect("state");
    assert!(state.all_eliminated);
    assert_eq!(state.status, RoomStatus::Playing);

    let ended = harness.play.end_game(&room_id).await.expect("ended");
    assert_eq!(ended.status, RoomStatus::Finished);
}

#[tokio::test]
async fn actions_before_start_are_invalid_state() {
    let harness = local_harness();
    let created = harness
        .lobby
        .create_room("Alice", None, None)
        .expect("created");
    let alice = created.state.players[0].id;

    let err = harness
        .play
        .submit_question(&created.room_id, alice, "他死了吗？")
        .await
        .expect_err("game not started");
    assert!(matches!(err, DomainError::InvalidState(_)));
}

#[tokio::test]
async fn finished_rooms_reject_further_actions() {
    let harness = local_harness();
    let (room_id, alice, _) = playing_room(&harness).await;
    harness.play.end_game(&room_id).await.expect("ended");

    let err = harness
        .play
        .submit_question(&room_id, alice, "他死了吗？")
        .await
        .expect_err("terminal");
    assert!(matches!(err, DomainError::InvalidState(_)));
}

#[tokio::test]
async fn turns_rotate_round_robin() {
    let harness = local_harness();
    let (room_id, alice, bob) = playing_room(&harness).await;

    let state = harness.play.get_state(&room_id).await.expect("state");
    assert_eq!(state.current_turn, Some(alice));

    assert_eq!(
        harness.play.advance_turn(&room_id).await.expect("advanced"),
        Some(bob)
    );
    assert_eq!(
        harness.play.advance_turn(&room_id).await.expect("advanced"),
        Some(alice)
    );
}

#[tokio::test]
async fn failing_delegate_never_orphans_the_player_entry() {
    let mut delegate = MockNarratorPort::new();
    delegate
        .expect_answer_question()
        .returning(|_, _| Err(NarratorError::RequestFailed("connection refused".into())));
    let harness = harness_with(Arc::new(delegate));
    let (room_id, alice, _) = playing_room(&harness).await;

    let outcome = harness
        .play
        .submit_question(&room_id, alice, "男人死了吗？")
        .await
        .expect("local fallback answered");

    assert_eq!(outcome.chat_entries.len(), 2);
    assert_eq!(outcome.chat_entries[1].author, AuthorData::Narrator);
    assert_eq!(health_of(&outcome.state, alice), 4);
    let EngineResultData::Question(result) = &outcome.engine_result else {
        panic!("expected a question result");
    };
    // The local classifier produced a usable verdict.
    assert!(matches!(
        result.answer,
        turtlesoup_domain::Answer::Yes | turtlesoup_domain::Answer::Close
    ));
}
