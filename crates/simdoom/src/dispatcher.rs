//! # Command Dispatcher
//!
//! Owns the one game and the one arena, and turns command records into
//! response records.
//!
//! ## State machine
//!
//! | Command    | Uninitialized   | Ready / GameOver          |
//! |------------|-----------------|---------------------------|
//! | INIT       | → Ready         | → Ready (new game)        |
//! | INPUT      | 6986            | apply key                 |
//! | UPDATE     | 6986            | tick + render             |
//! | GET_SCREEN | 6986            | screen + 9000             |
//! | GET_STATUS | 6986            | status + 9000             |
//! | RESET      | → Uninitialized | → Uninitialized           |
//!
//! GameOver is Ready with `game_over` set: INPUT and UPDATE are accepted
//! but change nothing.

use simdoom_core::Arena;
use simdoom_shared::{Command, PlayerAction, ProtocolError, ResponseWriter, StatusWord};
use simdoom_sim::{
    ConfigError, EntitySimulator, FrameScratch, GameConfig, GameState, ScreenCompositor, SimError,
};
use thiserror::Error;

/// Errors reported to the host as status words.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The record failed validation.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The command needs a game and none exists.
    #[error("no game in progress")]
    NotInitialized,

    /// The simulation could not run (for example, out of arena).
    #[error(transparent)]
    Sim(#[from] SimError),

    /// The payload did not fit the response buffer.
    #[error("response buffer overflow")]
    ResponseOverflow,
}

impl DispatchError {
    /// The status word reported to the host.
    #[must_use]
    pub const fn status_word(&self) -> StatusWord {
        match self {
            Self::Protocol(error) => error.status_word(),
            Self::NotInitialized => StatusWord::NOT_INITIALIZED,
            Self::Sim(_) | Self::ResponseOverflow => StatusWord::GENERIC_ERROR,
        }
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Where the dispatcher's state machine is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No game exists.
    Uninitialized,
    /// A game is running.
    Ready,
    /// A game exists but has ended.
    GameOver,
}

/// The card application.
pub struct CommandDispatcher {
    simulator: EntitySimulator,
    compositor: ScreenCompositor,
    arena: Arena,
    session: Option<GameState>,
    response: ResponseWriter,
}

impl CommandDispatcher {
    /// A dispatcher with the default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::build(GameConfig::default())
    }

    /// A dispatcher with custom tuning.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if the config fails validation.
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GameConfig) -> Self {
        Self {
            arena: Arena::new(config.arena_capacity),
            simulator: EntitySimulator::new(&config),
            compositor: ScreenCompositor::new(),
            session: None,
            response: ResponseWriter::new(),
        }
    }

    /// Processes one command record and returns the response record.
    ///
    /// Never fails: every error is reported as a trailing status word.
    pub fn process(&mut self, record: &[u8]) -> &[u8] {
        self.arena.begin_transaction();
        self.response.reset();

        let result = Command::decode(record)
            .map_err(DispatchError::from)
            .and_then(|command| self.execute(command));

        let status = match result {
            Ok(()) => StatusWord::SUCCESS,
            Err(error) => {
                tracing::warn!(
                    instruction = record.get(1).copied().unwrap_or_default(),
                    status = %error.status_word(),
                    %error,
                    "command rejected"
                );
                self.response.reset();
                error.status_word()
            }
        };

        if !self.response.write_status(status) {
            return self.response.status_only(StatusWord::GENERIC_ERROR);
        }
        tracing::debug!(
            instruction = record.get(1).copied().unwrap_or_default(),
            %status,
            len = self.response.len(),
            "command processed"
        );
        self.response.as_slice()
    }

    fn execute(&mut self, command: Command) -> DispatchResult<()> {
        match command {
            Command::Init => self.init(),
            Command::Input { key } => {
                let state = self.session.as_mut().ok_or(DispatchError::NotInitialized)?;
                if let Some(action) = PlayerAction::from_key(key) {
                    let outcome = self.simulator.apply_action(state, action);
                    tracing::trace!(?action, ?outcome, "input applied");
                }
                Ok(())
            }
            Command::Update => self.update(),
            Command::GetScreen => {
                let state = self.session.as_ref().ok_or(DispatchError::NotInitialized)?;
                self.response
                    .write_bytes(state.screen.as_bytes())
                    .then_some(())
                    .ok_or(DispatchError::ResponseOverflow)
            }
            Command::GetStatus => {
                let state = self.session.as_ref().ok_or(DispatchError::NotInitialized)?;
                self.response
                    .write_pod(&state.status_record())
                    .then_some(())
                    .ok_or(DispatchError::ResponseOverflow)
            }
            Command::Reset => {
                self.session = None;
                Ok(())
            }
        }
    }

    /// Builds a new game and renders its first frame.
    ///
    /// On failure any existing game is kept.
    fn init(&mut self) -> DispatchResult<()> {
        let scratch = FrameScratch::reserve(&mut self.arena)?;
        let mut state = self.simulator.new_game();
        self.compositor.render(&mut state, &scratch, &mut self.arena)?;
        tracing::debug!(level = state.level, "game initialized");
        self.session = Some(state);
        Ok(())
    }

    /// One tick followed by a render.
    ///
    /// Scratch memory is reserved before the tick, so an exhausted arena
    /// leaves the game untouched.
    fn update(&mut self) -> DispatchResult<()> {
        let state = self.session.as_mut().ok_or(DispatchError::NotInitialized)?;
        let scratch = FrameScratch::reserve(&mut self.arena)?;
        let report = self.simulator.tick(state);
        self.compositor.render(state, &scratch, &mut self.arena)?;
        if report != Default::default() {
            tracing::trace!(frame = state.frame_count, ?report, "tick");
        }
        Ok(())
    }

    /// The current game, if any.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> Option<&GameState> {
        self.session.as_ref()
    }

    /// The state machine's current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match &self.session {
            None => Phase::Uninitialized,
            Some(state) if state.game_over => Phase::GameOver,
            Some(_) => Phase::Ready,
        }
    }

    /// The tuning in use.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        self.simulator.config()
    }

    /// Most arena bytes any command has needed so far.
    #[inline]
    #[must_use]
    pub const fn arena_high_water(&self) -> usize {
        self.arena.high_water()
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CommandDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDispatcher")
            .field("phase", &self.phase())
            .field("arena", &self.arena)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INIT: [u8; 4] = [0x80, 0x01, 0x00, 0x00];
    const UPDATE: [u8; 4] = [0x80, 0x03, 0x00, 0x00];
    const GET_STATUS: [u8; 4] = [0x80, 0x05, 0x00, 0x00];
    const RESET: [u8; 4] = [0x80, 0x06, 0x00, 0x00];

    #[test]
    fn test_phase_transitions() {
        let mut card = CommandDispatcher::new();
        assert_eq!(card.phase(), Phase::Uninitialized);
        assert_eq!(card.process(&INIT), &[0x90, 0x00]);
        assert_eq!(card.phase(), Phase::Ready);
        assert_eq!(card.process(&RESET), &[0x90, 0x00]);
        assert_eq!(card.phase(), Phase::Uninitialized);
        assert!(card.state().is_none());
    }

    #[test]
    fn test_commands_before_init() {
        let mut card = CommandDispatcher::new();
        for record in [UPDATE, GET_STATUS, [0x80, 0x04, 0x00, 0x00]] {
            assert_eq!(card.process(&record), &[0x69, 0x86]);
        }
        assert_eq!(card.process(&[0x80, 0x02, 0x00, 0x00, 0x01, b'w']), &[0x69, 0x86]);
        // Reset is always accepted.
        assert_eq!(card.process(&RESET), &[0x90, 0x00]);
    }

    #[test]
    fn test_header_errors() {
        let mut card = CommandDispatcher::new();
        assert_eq!(card.process(&[]), &[0x67, 0x00]);
        assert_eq!(card.process(&[0x80, 0x01, 0x00]), &[0x67, 0x00]);
        assert_eq!(card.process(&[0x00, 0x01, 0x00, 0x00]), &[0x6E, 0x00]);
        assert_eq!(card.process(&[0x80, 0x7F, 0x00, 0x00]), &[0x6D, 0x00]);
        assert_eq!(card.process(&[0x80, 0x02, 0x00, 0x00, 0x02, b'w']), &[0x67, 0x00]);
        assert_eq!(card.phase(), Phase::Uninitialized);
    }

    #[test]
    fn test_unmapped_key_is_success() {
        let mut card = CommandDispatcher::new();
        let _ = card.process(&INIT);
        let before = card.state().map(|s| s.pose);
        assert_eq!(card.process(&[0x80, 0x02, 0x00, 0x00, 0x01, b'z']), &[0x90, 0x00]);
        assert_eq!(card.state().map(|s| s.pose), before);
    }

    #[test]
    fn test_error_maps_to_status() {
        assert_eq!(
            DispatchError::Sim(SimError::StaleScratch).status_word(),
            StatusWord::GENERIC_ERROR
        );
        assert_eq!(
            DispatchError::from(ProtocolError::WrongClass(0)).status_word(),
            StatusWord::WRONG_CLASS
        );
    }

    #[test]
    fn test_update_without_arena_room_keeps_state() {
        let mut card = CommandDispatcher::new();
        let _ = card.process(&INIT);
        let _ = card.process(&[0x80, 0x02, 0x00, 0x00, 0x01, b' ']);
        card.arena = Arena::new(16);

        let frames = card.state().map(|s| s.frame_count);
        let bullets = card.state().map(|s| s.bullets.clone());
        assert_eq!(card.process(&UPDATE), &[0x6F, 0x00]);
        assert_eq!(card.state().map(|s| s.frame_count), frames);
        assert_eq!(card.state().map(|s| s.bullets.clone()), bullets);
        assert_eq!(card.phase(), Phase::Ready);
    }

    #[test]
    fn test_arena_usage_is_bounded() {
        let mut card = CommandDispatcher::new();
        let _ = card.process(&INIT);
        for _ in 0..10 {
            let _ = card.process(&UPDATE);
        }
        assert!(card.arena_high_water() <= FrameScratch::BYTES);
        assert!(card.arena_high_water() > 0);
    }
}
