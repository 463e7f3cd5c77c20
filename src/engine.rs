//! Core game state and logic
//!
//! The engine never sleeps or reads a clock. Gravity arrives through
//! [`Engine::tick`]; the lock delay and the clear animation are requested as
//! [`GameEvent::TimerRequested`] and come back through [`Engine::fire`].
//! Every request carries the epoch it was issued in, and the epoch moves on
//! whenever a pending timer is cancelled, so late callbacks are ignored.

use crate::board::{Board, Cell};
use crate::config::EngineConfig;
use crate::error::{BoardError, ConfigError};
use crate::geometry::Coord;
use crate::piece::Piece;
use crate::randomizer::Randomizer;
use crate::score::Score;
use crate::snapshot::Snapshot;
use crate::tetromino::HIGHLIGHT;
use std::time::Duration;
use tracing::{debug, info};

/// A locked cell in this row ends the game
pub const GAME_OVER_ROW: usize = 1;

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Paused,
    Running,
    /// The piece cannot fall; a lock-delay timer is outstanding
    LockPending,
    /// Full rows are highlighted; a clear-animation timer is outstanding
    ClearAnimating,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    LockDelay,
    ClearAnimation,
}

/// Token for a one-shot timer. Hand it back to [`Engine::fire`] when due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timer {
    pub kind: TimerKind,
    pub epoch: u64,
}

/// Things the host may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    RowsCleared(usize),
    ScoreChanged(u64),
    PieceLocked,
    GameOver,
    TimerRequested { timer: Timer, after: Duration },
}

/// Commands the host can send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Pause,
    Resume,
    TogglePause,
    Reset,
}

#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    board: Board,
    active: Option<Piece>,
    anchor: Coord,
    score: Score,
    phase: Phase,
    epoch: u64,
    /// Rows painted for the clear animation, removed when it ends
    clearing: Vec<usize>,
    randomizer: Randomizer,
    events: Vec<GameEvent>,
}

impl Engine {
    /// Create a paused game with its first piece at the spawn point
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let randomizer = match config.seed {
            Some(seed) => Randomizer::with_seed(config.palette_size, seed),
            None => Randomizer::new(config.palette_size),
        };

        let mut engine = Self {
            board: Board::new(config.columns, config.rows),
            active: None,
            anchor: Coord::default(),
            score: Score::new(),
            phase: Phase::Paused,
            epoch: 0,
            clearing: Vec::new(),
            randomizer,
            events: Vec::new(),
            config,
        };
        engine.reset();
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_piece(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn anchor(&self) -> Coord {
        self.anchor
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score.points
    }

    pub fn rows_cleared(&self) -> u32 {
        self.score.rows
    }

    /// Whether move/rotate commands currently have any effect
    pub fn input_enabled(&self) -> bool {
        matches!(self.phase, Phase::Running | Phase::LockPending) && self.active.is_some()
    }

    /// Take every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        let overlay = self
            .active
            .as_ref()
            .map(|piece| (piece.cells_at(self.anchor), piece.color()));
        Snapshot::capture(&self.board, overlay, self.score.points, self.phase)
    }

    /// Process a command; returns whether it changed anything
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::SoftDrop => self.soft_drop(),
            Command::Rotate => self.rotate(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => {
                self.reset();
                true
            }
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(1, 0)
    }

    /// Move the piece down one row if it can fall
    pub fn soft_drop(&mut self) -> bool {
        self.try_shift(0, 1)
    }

    /// Switch to the next rotation state if all four of its cells are free.
    /// There are no wall kicks.
    pub fn rotate(&mut self) -> bool {
        if !self.input_enabled() {
            return false;
        }
        let Some(piece) = &self.active else {
            return false;
        };
        let current = piece.current_cells();
        let valid = piece
            .next_rotation_cells()
            .iter()
            .all(|&p| self.is_placement_valid(p, &current));
        if !valid {
            return false;
        }
        if let Some(piece) = &mut self.active {
            piece.apply_rotation();
        }
        self.after_player_move();
        true
    }

    pub fn pause(&mut self) -> bool {
        match self.phase {
            Phase::Running | Phase::LockPending | Phase::ClearAnimating => {
                self.cancel_timers();
                debug!(from = ?self.phase, "paused");
                self.phase = Phase::Paused;
                true
            }
            Phase::Paused | Phase::GameOver => false,
        }
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        if self.clearing.is_empty() {
            self.phase = Phase::Running;
        } else {
            // Paused mid-animation: run it again from the start
            self.phase = Phase::ClearAnimating;
            self.request(TimerKind::ClearAnimation, self.config.clear_animation());
        }
        debug!(to = ?self.phase, "resumed");
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.phase == Phase::Paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Empty the board, zero the score, and spawn a fresh piece. The game is
    /// left paused, or over if the piece has nowhere to go.
    pub fn reset(&mut self) {
        self.cancel_timers();
        self.board = Board::new(self.config.columns, self.config.rows);
        self.score = Score::new();
        self.clearing.clear();
        self.active = None;
        self.events.push(GameEvent::ScoreChanged(0));
        info!("game reset");
        if self.place_new_piece() {
            self.phase = Phase::Paused;
        } else {
            self.game_over();
        }
    }

    /// Gravity step
    pub fn tick(&mut self) {
        if self.active.is_none() {
            return;
        }
        match self.phase {
            Phase::Running => {
                if self.can_shift(0, 1) {
                    self.anchor = self.anchor.offset(0, 1);
                } else {
                    debug!(anchor = ?self.anchor, "piece grounded, lock pending");
                    self.phase = Phase::LockPending;
                    self.request(TimerKind::LockDelay, self.config.lock_delay());
                }
            }
            Phase::LockPending => {
                if self.can_shift(0, 1) {
                    self.cancel_lock();
                    self.anchor = self.anchor.offset(0, 1);
                }
            }
            Phase::Paused | Phase::ClearAnimating | Phase::GameOver => {}
        }
    }

    /// Handle a due timer. Tokens from an older epoch, or of a kind the
    /// current phase is not waiting for, are ignored.
    pub fn fire(&mut self, timer: Timer) -> Result<(), BoardError> {
        if timer.epoch != self.epoch {
            debug!(?timer, epoch = self.epoch, "stale timer ignored");
            return Ok(());
        }
        match (timer.kind, self.phase) {
            (TimerKind::LockDelay, Phase::LockPending) => {
                self.cancel_timers();
                self.resolve_lock()
            }
            (TimerKind::ClearAnimation, Phase::ClearAnimating) => {
                self.cancel_timers();
                self.finish_clear()
            }
            _ => Ok(()),
        }
    }

    /// Whether `candidate` (relative to the anchor) may hold a piece cell:
    /// it has to be on the board, and the board cell must be empty or part of
    /// the piece's own current footprint.
    ///
    /// The active piece is never written into the board until it locks, so
    /// for engine-driven moves the footprint rule only decides anything when
    /// a caller has filled a cell under the piece.
    pub fn is_placement_valid(&self, candidate: Coord, current: &[Coord; 4]) -> bool {
        let target = candidate + self.anchor;
        match self.board.cell_at(target.x, target.y) {
            Err(_) => false,
            Ok(cell) if cell.is_empty() => true,
            Ok(_) => current.iter().any(|&p| p + self.anchor == target),
        }
    }

    fn can_shift(&self, dx: i32, dy: i32) -> bool {
        let Some(piece) = &self.active else {
            return false;
        };
        let current = piece.current_cells();
        current
            .iter()
            .all(|&p| self.is_placement_valid(p.offset(dx, dy), &current))
    }

    fn try_shift(&mut self, dx: i32, dy: i32) -> bool {
        if !self.input_enabled() || !self.can_shift(dx, dy) {
            return false;
        }
        self.anchor = self.anchor.offset(dx, dy);
        self.after_player_move();
        true
    }

    /// A grounded piece that was moved somewhere it can fall from again
    /// goes back to falling
    fn after_player_move(&mut self) {
        if self.phase == Phase::LockPending && self.can_shift(0, 1) {
            self.cancel_lock();
        }
    }

    fn cancel_lock(&mut self) {
        self.cancel_timers();
        self.phase = Phase::Running;
        debug!(anchor = ?self.anchor, "lock cancelled");
    }

    fn cancel_timers(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    fn request(&mut self, kind: TimerKind, after: Duration) {
        let timer = Timer {
            kind,
            epoch: self.epoch,
        };
        self.events.push(GameEvent::TimerRequested { timer, after });
    }

    fn resolve_lock(&mut self) -> Result<(), BoardError> {
        if self.can_shift(0, 1) {
            self.phase = Phase::Running;
            return Ok(());
        }
        let Some(piece) = self.active.take() else {
            return Ok(());
        };

        for p in piece.cells_at(self.anchor) {
            self.board.set_cell(p.x, p.y, Cell::Filled(piece.color()))?;
        }
        self.events.push(GameEvent::PieceLocked);
        debug!(shape = ?piece.shape(), anchor = ?self.anchor, "piece locked");

        if !self.board.is_row_empty(GAME_OVER_ROW) {
            self.game_over();
            return Ok(());
        }

        let rows = self.board.full_rows();
        if rows.is_empty() {
            self.spawn_next();
            return Ok(());
        }

        let total = self
            .score
            .add_clear(rows.len(), self.config.columns, self.config.per_square_score);
        self.events.push(GameEvent::ScoreChanged(total));
        self.events.push(GameEvent::RowsCleared(rows.len()));
        info!(rows = rows.len(), score = total, "rows cleared");

        for &y in &rows {
            self.board.paint_row(y, HIGHLIGHT)?;
        }
        self.clearing = rows;
        self.phase = Phase::ClearAnimating;
        self.request(TimerKind::ClearAnimation, self.config.clear_animation());
        Ok(())
    }

    fn finish_clear(&mut self) -> Result<(), BoardError> {
        let mut rows = std::mem::take(&mut self.clearing);
        for &y in &rows {
            self.board.clear_row(y)?;
        }
        rows.sort_unstable_by(|a, b| b.cmp(a));
        self.board.compact_after_clears(&rows)?;
        self.spawn_next();
        Ok(())
    }

    fn spawn_next(&mut self) {
        if self.place_new_piece() {
            self.phase = Phase::Running;
        } else {
            self.game_over();
        }
    }

    /// Put a fresh piece at the spawn point. Returns false, leaving no active
    /// piece, when it overlaps the board.
    fn place_new_piece(&mut self) -> bool {
        let piece = self.randomizer.next_piece();
        self.anchor = spawn_anchor(self.config.columns);
        let fits = piece
            .cells_at(self.anchor)
            .iter()
            .all(|p| self.board.cell_at(p.x, p.y).is_ok_and(|cell| cell.is_empty()));
        if fits {
            self.active = Some(piece);
        }
        fits
    }

    fn game_over(&mut self) {
        self.cancel_timers();
        self.active = None;
        self.phase = Phase::GameOver;
        self.events.push(GameEvent::GameOver);
        info!(score = self.score.points, rows = self.score.rows, "game over");
    }
}

#[cfg(test)]
impl Engine {
    /// Swap in a known piece at `anchor`, for tests outside this module
    pub(crate) fn place_active(&mut self, piece: Piece, anchor: Coord) {
        self.active = Some(piece);
        self.anchor = anchor;
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

/// Where new pieces appear on a board `columns` wide
pub(crate) fn spawn_anchor(columns: usize) -> Coord {
    Coord::new(columns as i32 / 2 - 1, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::Shape;
    use ratatui::style::Color;

    fn engine() -> Engine {
        Engine::new(EngineConfig {
            seed: Some(1234),
            ..EngineConfig::default()
        })
        .unwrap()
    }

    fn running() -> Engine {
        let mut engine = engine();
        engine.resume();
        engine.drain_events();
        engine
    }

    /// Replace the active piece
    fn place(engine: &mut Engine, shape: Shape, x: i32, y: i32) {
        engine.active = Some(Piece::new(shape, Color::Yellow));
        engine.anchor = Coord::new(x, y);
    }

    fn fill(engine: &mut Engine, x: i32, y: i32) {
        engine
            .board
            .set_cell(x, y, Cell::Filled(Color::Blue))
            .unwrap();
    }

    fn last_timer(engine: &mut Engine) -> Timer {
        engine
            .drain_events()
            .into_iter()
            .rev()
            .find_map(|event| match event {
                GameEvent::TimerRequested { timer, .. } => Some(timer),
                _ => None,
            })
            .expect("no timer requested")
    }

    #[test]
    fn test_new_game_is_paused_with_piece_at_spawn() {
        let engine = engine();
        assert_eq!(engine.phase(), Phase::Paused);
        assert_eq!(engine.score(), 0);
        assert!(engine.active_piece().is_some());
        assert_eq!(engine.anchor(), Coord::new(4, 0));
        assert!(!engine.input_enabled());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = EngineConfig {
            rows: 2,
            ..EngineConfig::default()
        };
        assert!(Engine::new(config).is_err());
    }

    #[test]
    fn test_input_ignored_while_paused() {
        let mut engine = engine();
        let anchor = engine.anchor();
        assert!(!engine.move_left());
        assert!(!engine.soft_drop());
        assert!(!engine.rotate());
        engine.tick();
        assert_eq!(engine.anchor(), anchor);
    }

    #[test]
    fn test_tick_applies_gravity() {
        let mut engine = running();
        engine.tick();
        assert_eq!(engine.anchor(), Coord::new(4, 1));
        assert_eq!(engine.phase(), Phase::Running);
    }

    #[test]
    fn test_left_wall_rejects_move() {
        let mut engine = running();
        place(&mut engine, Shape::O, 0, 5);
        assert!(!engine.move_left());
        assert_eq!(engine.anchor(), Coord::new(0, 5));
        assert!(engine.move_right());
        assert_eq!(engine.anchor(), Coord::new(1, 5));
    }

    #[test]
    fn test_right_move_blocked_by_locked_cell() {
        let mut engine = running();
        place(&mut engine, Shape::O, 3, 5);
        fill(&mut engine, 5, 6);
        assert!(!engine.move_right());
        assert_eq!(engine.anchor(), Coord::new(3, 5));
    }

    #[test]
    fn test_soft_drop_moves_one_row() {
        let mut engine = running();
        place(&mut engine, Shape::T, 3, 5);
        assert!(engine.soft_drop());
        assert_eq!(engine.anchor(), Coord::new(3, 6));
    }

    #[test]
    fn test_rotation_without_kicks_fails_at_wall() {
        let mut engine = running();
        place(&mut engine, Shape::I, 9, 3);
        if let Some(piece) = &mut engine.active {
            piece.apply_rotation();
        }
        // Vertical against the right wall; horizontal would need x 9..=12
        assert!(!engine.rotate());
        assert_eq!(engine.active_piece().unwrap().rotation(), 1);

        place(&mut engine, Shape::T, 3, 3);
        assert!(engine.rotate());
        assert_eq!(engine.active_piece().unwrap().rotation(), 1);
    }

    #[test]
    fn test_grounded_piece_locks_after_delay() {
        let mut engine = running();
        place(&mut engine, Shape::O, 0, 14);
        engine.tick();
        assert_eq!(engine.phase(), Phase::LockPending);

        let timer = last_timer(&mut engine);
        assert_eq!(timer.kind, TimerKind::LockDelay);
        engine.fire(timer).unwrap();

        assert_eq!(engine.board().cell_at(0, 15), Ok(Cell::Filled(Color::Yellow)));
        assert_eq!(engine.board().cell_at(1, 14), Ok(Cell::Filled(Color::Yellow)));
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.anchor(), Coord::new(4, 0));
        assert!(engine.drain_events().contains(&GameEvent::PieceLocked));
    }

    #[test]
    fn test_two_row_clear_scores_twenty() {
        let mut engine = running();
        for y in 14..16 {
            for x in 2..10 {
                fill(&mut engine, x, y);
            }
        }
        fill(&mut engine, 5, 13);
        place(&mut engine, Shape::O, 0, 14);

        engine.tick();
        let lock = last_timer(&mut engine);
        engine.fire(lock).unwrap();

        assert_eq!(engine.phase(), Phase::ClearAnimating);
        assert_eq!(engine.score(), 20);
        assert_eq!(engine.rows_cleared(), 2);
        assert!(engine.active_piece().is_none());
        assert_eq!(engine.board().cell_at(7, 15), Ok(Cell::Filled(HIGHLIGHT)));

        let events = engine.drain_events();
        assert!(events.contains(&GameEvent::ScoreChanged(20)));
        assert!(events.contains(&GameEvent::RowsCleared(2)));
        let clear = events
            .iter()
            .find_map(|e| match e {
                GameEvent::TimerRequested { timer, after } => Some((*timer, *after)),
                _ => None,
            })
            .unwrap();
        assert_eq!(clear.0.kind, TimerKind::ClearAnimation);
        assert_eq!(clear.1, Duration::from_millis(500));

        // Input and gravity wait for the animation
        engine.tick();
        assert!(!engine.move_left());

        engine.fire(clear.0).unwrap();
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.board().cell_at(5, 15), Ok(Cell::Filled(Color::Blue)));
        assert!(engine.board().is_row_empty(14));
        assert!(engine.active_piece().is_some());
    }

    #[test]
    fn test_lock_in_row_one_ends_game_and_reset_recovers() {
        let mut engine = running();
        engine.score.points = 30;
        fill(&mut engine, 4, 2);
        place(&mut engine, Shape::O, 4, 0);

        engine.tick();
        assert_eq!(engine.phase(), Phase::LockPending);
        let timer = last_timer(&mut engine);
        engine.fire(timer).unwrap();

        assert_eq!(engine.phase(), Phase::GameOver);
        assert!(engine.drain_events().contains(&GameEvent::GameOver));
        assert!(!engine.move_right());
        assert!(!engine.resume());

        engine.reset();
        assert_eq!(engine.phase(), Phase::Paused);
        assert_eq!(engine.score(), 0);
        assert!(engine.board().is_empty());
        assert!(engine.active_piece().is_some());
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let mut engine = running();
        for x in 4..8 {
            fill(&mut engine, x, 0);
        }
        engine.spawn_next();
        assert_eq!(engine.phase(), Phase::GameOver);
        assert!(engine.active_piece().is_none());
    }

    #[test]
    fn test_shift_during_lock_delay_cancels_lock() {
        let mut engine = running();
        fill(&mut engine, 0, 15);
        place(&mut engine, Shape::O, 0, 13);

        engine.tick();
        assert_eq!(engine.phase(), Phase::LockPending);
        let timer = last_timer(&mut engine);

        assert!(engine.move_right());
        assert_eq!(engine.phase(), Phase::Running);

        // The stale lock does nothing, the next tick keeps falling
        engine.fire(timer).unwrap();
        assert!(engine.board().cell_at(1, 14).unwrap().is_empty());
        engine.tick();
        assert_eq!(engine.anchor(), Coord::new(1, 14));
        assert_eq!(engine.phase(), Phase::Running);
    }

    #[test]
    fn test_pause_invalidates_lock_timer() {
        let mut engine = running();
        place(&mut engine, Shape::O, 0, 14);
        engine.tick();
        let timer = last_timer(&mut engine);

        assert!(engine.pause());
        engine.fire(timer).unwrap();
        assert_eq!(engine.phase(), Phase::Paused);
        assert!(engine.board().is_empty());

        // After resuming, the grounded piece asks for a fresh lock delay
        assert!(engine.resume());
        engine.tick();
        assert_eq!(engine.phase(), Phase::LockPending);
        let fresh = last_timer(&mut engine);
        assert_ne!(fresh.epoch, timer.epoch);
        engine.fire(fresh).unwrap();
        assert!(engine.board().cell_at(0, 15).unwrap().is_filled());
    }

    #[test]
    fn test_reset_invalidates_pending_timer() {
        let mut engine = running();
        place(&mut engine, Shape::O, 0, 14);
        engine.tick();
        let timer = last_timer(&mut engine);

        engine.reset();
        engine.resume();
        engine.fire(timer).unwrap();
        assert!(engine.board().is_empty());
        assert_eq!(engine.phase(), Phase::Running);
    }

    #[test]
    fn test_reset_invalidates_clear_animation_timer() {
        let mut engine = running();
        for x in 2..10 {
            fill(&mut engine, x, 15);
        }
        place(&mut engine, Shape::O, 0, 14);
        engine.tick();
        let lock = last_timer(&mut engine);
        engine.fire(lock).unwrap();
        assert_eq!(engine.phase(), Phase::ClearAnimating);
        let clear = last_timer(&mut engine);
        assert_eq!(clear.kind, TimerKind::ClearAnimation);

        engine.reset();
        assert!(engine.resume());
        let anchor = engine.anchor();
        engine.fire(clear).unwrap();

        // Nothing from the old game is compacted or credited
        assert_eq!(engine.phase(), Phase::Running);
        assert!(engine.board().is_empty());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.rows_cleared(), 0);
        assert_eq!(engine.anchor(), anchor);
        assert!(engine.active_piece().is_some());
    }

    #[test]
    fn test_reset_without_room_to_spawn_ends_game() {
        let mut engine = running();
        // Narrower than any validated config, so no shape fits at spawn
        engine.config.columns = 1;
        engine.reset();

        assert_eq!(engine.phase(), Phase::GameOver);
        assert!(engine.active_piece().is_none());
        assert!(engine.drain_events().contains(&GameEvent::GameOver));
        assert!(!engine.resume());
        engine.tick();
        assert_eq!(engine.phase(), Phase::GameOver);
    }

    #[test]
    fn test_tick_without_piece_never_waits_to_lock() {
        let mut engine = running();
        engine.active = None;
        engine.tick();
        assert_eq!(engine.phase(), Phase::Running);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_own_footprint_counts_as_free() {
        let mut engine = running();
        place(&mut engine, Shape::O, 3, 5);
        let current = engine.active_piece().unwrap().current_cells();

        // A filled cell under the piece itself does not block it
        fill(&mut engine, 3, 5);
        assert!(engine.is_placement_valid(Coord::new(0, 0), &current));
        assert!(engine.is_placement_valid(Coord::new(1, 1), &current));

        fill(&mut engine, 5, 5);
        assert!(!engine.is_placement_valid(Coord::new(2, 0), &current));
        assert!(engine.is_placement_valid(Coord::new(2, 1), &current));
        assert!(!engine.is_placement_valid(Coord::new(-4, 0), &current));
        assert!(!engine.is_placement_valid(Coord::new(0, 11), &current));
    }

    #[test]
    fn test_pause_during_clear_animation_keeps_rows() {
        let mut engine = running();
        for x in 2..10 {
            fill(&mut engine, x, 15);
        }
        place(&mut engine, Shape::O, 0, 14);
        engine.tick();
        let lock = last_timer(&mut engine);
        engine.fire(lock).unwrap();
        let clear = last_timer(&mut engine);

        assert!(engine.pause());
        engine.fire(clear).unwrap();
        assert!(engine.board().is_row_full(15));

        assert!(engine.resume());
        assert_eq!(engine.phase(), Phase::ClearAnimating);
        let again = last_timer(&mut engine);
        engine.fire(again).unwrap();
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.board().cell_at(0, 15), Ok(Cell::Filled(Color::Yellow)));
        assert_eq!(engine.score(), 10);
    }

    #[test]
    fn test_wrong_kind_timer_is_ignored() {
        let mut engine = running();
        place(&mut engine, Shape::O, 0, 14);
        engine.tick();
        let timer = last_timer(&mut engine);
        engine
            .fire(Timer {
                kind: TimerKind::ClearAnimation,
                epoch: timer.epoch,
            })
            .unwrap();
        assert_eq!(engine.phase(), Phase::LockPending);
    }

    #[test]
    fn test_snapshot_overlays_active_piece() {
        let mut engine = running();
        place(&mut engine, Shape::O, 2, 3);
        let snap = engine.snapshot();
        assert!(snap.cell(2, 3).occupied);
        assert_eq!(snap.cell(3, 4).color, Color::Yellow);
        assert!(!snap.cell(4, 4).occupied);
        assert!(engine.board().is_empty());
        assert_eq!(snap.phase, Phase::Running);
    }

    #[test]
    fn test_apply_dispatches_commands() {
        let mut engine = engine();
        assert!(engine.apply(Command::TogglePause));
        assert_eq!(engine.phase(), Phase::Running);
        place(&mut engine, Shape::O, 3, 3);
        assert!(engine.apply(Command::MoveLeft));
        assert_eq!(engine.anchor(), Coord::new(2, 3));
        assert!(engine.apply(Command::Pause));
        assert!(!engine.apply(Command::Pause));
        assert!(engine.apply(Command::Reset));
        assert_eq!(engine.phase(), Phase::Paused);
    }
}
