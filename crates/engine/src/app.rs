//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    ports::{ClockPort, NarratorPort, RandomPort},
};
use crate::narrator::{FallbackNarrator, HeuristicNarrator, LlmNarrator};
use crate::settings::{EngineSettings, NarratorMode};
use crate::stores::{RoomStore, StoryRegistry};
use crate::use_cases::{LobbyUseCases, PlayUseCases};

/// Main application state.
///
/// Holds the store, the story registry, the narrator strategy, and the use
/// cases. Constructed once at process start and passed by reference to
/// whatever transport drives the core.
pub struct App {
    pub store: Arc<RoomStore>,
    pub stories: Arc<StoryRegistry>,
    pub narrator: Arc<dyn NarratorPort>,
    pub lobby: LobbyUseCases,
    pub play: PlayUseCases,
}

impl App {
    /// Compose the application with the system clock and system randomness.
    pub fn new(settings: &EngineSettings) -> Self {
        Self::with_parts(
            settings,
            Arc::new(SystemClock::new()),
            Arc::new(SystemRandom::new()),
        )
    }

    /// Compose the application with injected clock and randomness. Tests
    /// use this to get deterministic time and picks.
    pub fn with_parts(
        settings: &EngineSettings,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let narrator: Arc<dyn NarratorPort> = match settings.narrator_mode {
            NarratorMode::Local => Arc::new(HeuristicNarrator::new(random.clone())),
            NarratorMode::Remote => Arc::new(FallbackNarrator::new(
                Arc::new(LlmNarrator::with_timeout(
                    &settings.narrator_base_url,
                    &settings.narrator_model,
                    settings.narrator_timeout_secs,
                )),
                HeuristicNarrator::new(random.clone()),
            )),
        };

        let store = Arc::new(RoomStore::new(clock.clone()));
        let stories = Arc::new(StoryRegistry::builtin());

        let lobby = LobbyUseCases::new(
            store.clone(),
            stories.clone(),
            clock.clone(),
            random.clone(),
        );
        let play = PlayUseCases::new(
            store.clone(),
            stories.clone(),
            narrator.clone(),
            clock,
            random,
        );

        Self {
            store,
            stories,
            narrator,
            lobby,
            play,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn local_mode_composes_a_working_app() {
        let app = App::new(&EngineSettings::default());
        let created = app.lobby.create_room("Alice", None, None).expect("created");
        let state = app
            .play
            .get_state(&created.room_id)
            .await
            .expect("readable");
        assert_eq!(state.players.len(), 1);
        assert!(!state.prompt.is_empty());
    }
}
