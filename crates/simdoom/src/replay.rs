//! # Session Replay
//!
//! Records the exact command records a host sent, so a session can be
//! replayed into a fresh dispatcher. Because the game is deterministic the
//! replay reproduces every status word and every screen byte.
//!
//! ## File Format
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │ Magic "SDRP" (4) │ Version (2) │ Reserved (2)    │
//! │ Record count (4)                                 │
//! ├──────────────────────────────────────────────────┤
//! │ Length (2) │ Record bytes (length)               │  × count
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! All integers are little-endian.

use std::io::{self, Read, Write};

use simdoom_shared::StatusWord;
use thiserror::Error;

use crate::dispatcher::CommandDispatcher;

/// Magic bytes at the start of a session file.
pub const SESSION_MAGIC: [u8; 4] = *b"SDRP";

/// Current session format version.
pub const SESSION_VERSION: u16 = 1;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 12;

/// Errors raised while reading or writing a session log.
#[derive(Error, Debug)]
pub enum ReplayError {
    /// Underlying I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The file does not start with [`SESSION_MAGIC`].
    #[error("not a session log (magic {0:02X?})")]
    BadMagic([u8; 4]),

    /// The file was written by an unknown format version.
    #[error("unsupported session version {0}")]
    UnsupportedVersion(u16),

    /// The file ends in the middle of a record.
    #[error("truncated session log: expected {expected} records, found {found}")]
    Truncated {
        /// Records promised by the header.
        expected: u32,
        /// Records actually read.
        found: u32,
    },

    /// A record is longer than the format can store.
    #[error("record of {0} bytes is too long")]
    RecordTooLong(usize),
}

/// An ordered list of raw command records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionLog {
    records: Vec<Vec<u8>>,
}

impl SessionLog {
    /// An empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Appends a record.
    ///
    /// # Errors
    ///
    /// [`ReplayError::RecordTooLong`] if the record exceeds `u16::MAX` bytes.
    pub fn push(&mut self, record: &[u8]) -> Result<(), ReplayError> {
        if u16::try_from(record.len()).is_err() {
            return Err(ReplayError::RecordTooLong(record.len()));
        }
        self.records.push(record.to_vec());
        Ok(())
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the log holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records in order.
    pub fn records(&self) -> impl Iterator<Item = &[u8]> {
        self.records.iter().map(Vec::as_slice)
    }

    /// Feeds every record into `dispatcher` and collects the status words.
    pub fn replay(&self, dispatcher: &mut CommandDispatcher) -> Vec<StatusWord> {
        self.records()
            .map(|record| {
                StatusWord::from_response(dispatcher.process(record))
                    .unwrap_or(StatusWord::GENERIC_ERROR)
            })
            .collect()
    }

    /// Serializes the log.
    ///
    /// # Errors
    ///
    /// Propagates writer failures.
    pub fn save<W: Write>(&self, writer: &mut W) -> Result<(), ReplayError> {
        let count = u32::try_from(self.records.len())
            .map_err(|_| ReplayError::RecordTooLong(self.records.len()))?;

        let mut header = [0u8; HEADER_SIZE];
        header[0..4].copy_from_slice(&SESSION_MAGIC);
        header[4..6].copy_from_slice(&SESSION_VERSION.to_le_bytes());
        header[8..12].copy_from_slice(&count.to_le_bytes());
        writer.write_all(&header)?;

        for record in &self.records {
            let len = u16::try_from(record.len())
                .map_err(|_| ReplayError::RecordTooLong(record.len()))?;
            writer.write_all(&len.to_le_bytes())?;
            writer.write_all(record)?;
        }
        Ok(())
    }

    /// Serializes the log into a byte vector.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE + self.records.len() * 8);
        // Infallible: Vec writer, record lengths checked on push.
        let _ = self.save(&mut bytes);
        bytes
    }

    /// Reads a log.
    ///
    /// # Errors
    ///
    /// [`ReplayError::BadMagic`], [`ReplayError::UnsupportedVersion`],
    /// [`ReplayError::Truncated`], or an I/O error.
    pub fn load<R: Read>(reader: &mut R) -> Result<Self, ReplayError> {
        let mut header = [0u8; HEADER_SIZE];
        reader.read_exact(&mut header)?;

        let magic = [header[0], header[1], header[2], header[3]];
        if magic != SESSION_MAGIC {
            return Err(ReplayError::BadMagic(magic));
        }
        let version = u16::from_le_bytes([header[4], header[5]]);
        if version != SESSION_VERSION {
            return Err(ReplayError::UnsupportedVersion(version));
        }
        let expected = u32::from_le_bytes([header[8], header[9], header[10], header[11]]);

        let mut records = Vec::new();
        for found in 0..expected {
            let truncated = |_| ReplayError::Truncated { expected, found };
            let mut len = [0u8; 2];
            reader.read_exact(&mut len).map_err(truncated)?;
            let mut record = vec![0u8; usize::from(u16::from_le_bytes(len))];
            reader.read_exact(&mut record).map_err(truncated)?;
            records.push(record);
        }
        Ok(Self { records })
    }

    /// Reads a log from a byte slice.
    ///
    /// # Errors
    ///
    /// As [`SessionLog::load`].
    pub fn from_bytes(mut bytes: &[u8]) -> Result<Self, ReplayError> {
        Self::load(&mut bytes)
    }
}

/// Wraps a dispatcher and logs every record it processes.
#[derive(Debug, Default)]
pub struct SessionRecorder {
    dispatcher: CommandDispatcher,
    log: SessionLog,
}

impl SessionRecorder {
    /// Starts recording in front of `dispatcher`.
    #[must_use]
    pub fn new(dispatcher: CommandDispatcher) -> Self {
        Self {
            dispatcher,
            log: SessionLog::new(),
        }
    }

    /// Records and processes one command.
    ///
    /// Records too long for the log are still processed but not kept.
    pub fn process(&mut self, record: &[u8]) -> &[u8] {
        if let Err(error) = self.log.push(record) {
            tracing::warn!(%error, "record not logged");
        }
        self.dispatcher.process(record)
    }

    /// The recorded log so far.
    #[must_use]
    pub const fn log(&self) -> &SessionLog {
        &self.log
    }

    /// The wrapped dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    /// Stops recording and returns the log.
    #[must_use]
    pub fn into_log(self) -> SessionLog {
        self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simdoom_shared::Command;

    fn sample() -> SessionLog {
        let mut log = SessionLog::new();
        for command in [
            Command::Init,
            Command::Input { key: b'w' },
            Command::Update,
            Command::GetStatus,
        ] {
            log.push(&command.to_bytes()).unwrap();
        }
        log
    }

    #[test]
    fn test_file_layout() {
        let bytes = sample().to_bytes();
        assert_eq!(&bytes[0..4], b"SDRP");
        assert_eq!(&bytes[4..6], &[1, 0]);
        assert_eq!(&bytes[8..12], &[4, 0, 0, 0]);
        assert_eq!(&bytes[12..14], &[4, 0]);
        assert_eq!(&bytes[14..18], &[0x80, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_save_and_load() {
        let log = sample();
        assert_eq!(SessionLog::from_bytes(&log.to_bytes()).unwrap(), log);
    }

    #[test]
    fn test_load_rejects_bad_input() {
        assert!(matches!(
            SessionLog::from_bytes(b"OROB\x01\x00\x00\x00\x00\x00\x00\x00"),
            Err(ReplayError::BadMagic(_))
        ));
        assert!(matches!(
            SessionLog::from_bytes(b"SDRP\x09\x00\x00\x00\x00\x00\x00\x00"),
            Err(ReplayError::UnsupportedVersion(9))
        ));

        let mut bytes = sample().to_bytes();
        bytes.truncate(bytes.len() - 3);
        assert!(matches!(
            SessionLog::from_bytes(&bytes),
            Err(ReplayError::Truncated { expected: 4, found: 3 })
        ));
    }

    #[test]
    fn test_recorder_captures_everything() {
        let mut recorder = SessionRecorder::default();
        for record in sample().records() {
            let _ = recorder.process(record);
        }
        let _ = recorder.process(&[0x00]);
        assert_eq!(recorder.log().len(), 5);
        assert!(recorder.dispatcher().state().is_some());
    }

    #[test]
    fn test_replay_returns_status_per_record() {
        let statuses = sample().replay(&mut CommandDispatcher::new());
        assert_eq!(statuses, vec![StatusWord::SUCCESS; 4]);
    }
}
