//! Key bytes accepted by INPUT.

use serde::{Deserialize, Serialize};

/// A player action selected by an INPUT key byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// `w`: step along the heading.
    Forward,
    /// `s`: step against the heading.
    Back,
    /// `a`: step 90° left of the heading.
    StrafeLeft,
    /// `d`: step 90° right of the heading.
    StrafeRight,
    /// `q`: rotate counter-clockwise.
    TurnLeft,
    /// `e`: rotate clockwise.
    TurnRight,
    /// Space: fire a bullet.
    Fire,
}

impl PlayerAction {
    /// Maps a key byte (either case) to an action.
    ///
    /// Unmapped bytes return `None`; the dispatcher treats them as a
    /// successful no-op.
    #[must_use]
    pub const fn from_key(key: u8) -> Option<Self> {
        match key.to_ascii_lowercase() {
            b'w' => Some(Self::Forward),
            b's' => Some(Self::Back),
            b'a' => Some(Self::StrafeLeft),
            b'd' => Some(Self::StrafeRight),
            b'q' => Some(Self::TurnLeft),
            b'e' => Some(Self::TurnRight),
            b' ' => Some(Self::Fire),
            _ => None,
        }
    }

    /// The canonical key byte for this action.
    #[must_use]
    pub const fn key(self) -> u8 {
        match self {
            Self::Forward => b'w',
            Self::Back => b's',
            Self::StrafeLeft => b'a',
            Self::StrafeRight => b'd',
            Self::TurnLeft => b'q',
            Self::TurnRight => b'e',
            Self::Fire => b' ',
        }
    }
}
