//! BLOCKFALL - falling-block puzzle engine
//!
//! The engine owns the board, the falling piece, the score and the
//! pause/run/lock/clear/game-over state machine. It reads no clock and does
//! no I/O: hosts feed it commands, gravity ticks and timer callbacks, and read
//! back a [`Snapshot`] plus a queue of [`GameEvent`]s.
//!
//! ```
//! use blockfall::{Command, Engine, EngineConfig, Phase};
//!
//! let mut engine = Engine::new(EngineConfig { seed: Some(7), ..EngineConfig::default() })?;
//! engine.apply(Command::Resume);
//! engine.tick();
//! assert_eq!(engine.phase(), Phase::Running);
//! assert_eq!(engine.anchor().y, 1);
//! # Ok::<(), blockfall::ConfigError>(())
//! ```

pub mod board;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod piece;
pub mod randomizer;
pub mod score;
pub mod snapshot;
pub mod tetromino;

pub use board::{Board, Cell};
pub use clock::Clock;
pub use config::EngineConfig;
pub use engine::{Command, Engine, GameEvent, Phase, Timer, TimerKind};
pub use error::{BoardError, ConfigError};
pub use geometry::Coord;
pub use piece::Piece;
pub use snapshot::{Snapshot, SnapshotCell};
pub use tetromino::Shape;
