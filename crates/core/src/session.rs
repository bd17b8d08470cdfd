//! Session module - one play-through of the game
//!
//! Ties the field, the current/next pieces and the shape source together and
//! drives them through the spawn → fall → lock → spawn cycle:
//!
//! - `tick(dt)` accumulates time and performs one gravity step per elapsed
//!   fall interval, carrying the remainder over.
//! - A gravity step that cannot descend runs the lock sequence: lock, clear
//!   full rows, score, speed up, promote the next piece.
//! - A freshly promoted piece that collides where it spawns ends the session
//!   (block-out). After that every command is ignored until a reset.

use std::fmt;

use crate::field::Field;
use crate::piece::ActivePiece;
use crate::rng::ShapeSource;
use crate::scoring::{clamp_fall_interval_ms, line_clear_score, next_fall_interval_ms};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{DropOutcome, GameAction, LockEvent, PieceKind, INITIAL_FALL_INTERVAL_MS};

/// Simulation knobs fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Gravity interval at the start of every play-through (≥ 50ms)
    pub initial_fall_interval_ms: u32,
}

impl SessionConfig {
    pub fn with_fall_interval_ms(ms: u32) -> Self {
        Self {
            initial_fall_interval_ms: clamp_fall_interval_ms(ms),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_fall_interval_ms: INITIAL_FALL_INTERVAL_MS,
        }
    }
}

/// Complete session state
///
/// `Session` is `Send`, so a host that runs input and simulation on separate
/// threads can guard it with a single `Mutex`.
pub struct Session {
    config: SessionConfig,
    field: Field,
    current: ActivePiece,
    next: ActivePiece,
    shapes: Box<dyn ShapeSource + Send>,
    score: u32,
    lines_cleared: u32,
    fall_interval_ms: u32,
    elapsed_ms: u32,
    game_over: bool,
    /// Lock events not yet drained by an observer, oldest first.
    events: Vec<LockEvent>,
}

impl Session {
    /// Start a session on an empty field
    pub fn new(config: SessionConfig, shapes: impl ShapeSource + Send + 'static) -> Self {
        Self::with_field(config, shapes, Field::new())
    }

    /// Start a session on a prepared field
    ///
    /// The first piece is spawned immediately; if it collides with `field`
    /// the session begins already over.
    pub fn with_field(
        config: SessionConfig,
        shapes: impl ShapeSource + Send + 'static,
        field: Field,
    ) -> Self {
        let config = SessionConfig::with_fall_interval_ms(config.initial_fall_interval_ms);
        let placeholder = ActivePiece::spawn(PieceKind::I);
        let mut session = Self {
            config,
            field: Field::new(),
            current: placeholder,
            next: placeholder,
            shapes: Box::new(shapes),
            score: 0,
            lines_cleared: 0,
            fall_interval_ms: config.initial_fall_interval_ms,
            elapsed_ms: 0,
            game_over: false,
            events: Vec::new(),
        };
        session.begin(field);
        session
    }

    /// Replace the whole session state with a fresh play-through
    ///
    /// The shape source is kept, so a seeded source keeps its sequence going.
    pub fn reset(&mut self) {
        self.begin(Field::new());
    }

    fn begin(&mut self, field: Field) {
        self.field = field;
        self.score = 0;
        self.lines_cleared = 0;
        self.fall_interval_ms = self.config.initial_fall_interval_ms;
        self.elapsed_ms = 0;
        self.game_over = false;
        self.events.clear();

        self.next = ActivePiece::spawn(self.shapes.next_kind());
        self.spawn_piece();
    }

    /// Promote the next piece and draw a new one
    ///
    /// Returns false (and ends the session) on block-out.
    fn spawn_piece(&mut self) -> bool {
        self.current = self.next;
        self.next = ActivePiece::spawn(self.shapes.next_kind());

        if self.field.collides(&self.current) {
            self.game_over = true;
            return false;
        }
        true
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn current(&self) -> ActivePiece {
        self.current
    }

    pub fn next(&self) -> ActivePiece {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Remove and return every pending lock event, oldest first.
    ///
    /// A single `tick` or drop can lock more than one piece; none are dropped.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, LockEvent> {
        self.events.drain(..)
    }

    /// Advance the gravity clock by `dt_ms`
    ///
    /// Performs one gravity step per whole fall interval accumulated and
    /// returns how many were performed. A step that ends the session drops
    /// the remaining time.
    pub fn tick(&mut self, dt_ms: u32) -> u32 {
        if self.game_over {
            return 0;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);

        let mut steps = 0;
        while self.elapsed_ms >= self.fall_interval_ms {
            self.elapsed_ms -= self.fall_interval_ms;
            steps += 1;
            self.gravity_step();
            if self.game_over {
                self.elapsed_ms = 0;
                break;
            }
        }
        steps
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Commit the translated piece unless it collides
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.game_over {
            return false;
        }
        let moved = self.current.translated(dx, dy);
        if self.field.collides(&moved) {
            return false;
        }
        self.current = moved;
        true
    }

    /// Advance to the next rotation state in place
    ///
    /// A rotation that collides is rejected outright; the piece is never
    /// shifted to make room.
    pub fn rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let rotated = self.current.rotated();
        if self.field.collides(&rotated) {
            return false;
        }
        self.current = rotated;
        true
    }

    /// One gravity step on demand
    pub fn soft_drop(&mut self) -> DropOutcome {
        if self.game_over {
            return DropOutcome::Ignored;
        }
        self.gravity_step()
    }

    /// Gravity steps until the piece locks
    pub fn hard_drop(&mut self) -> DropOutcome {
        if self.game_over {
            return DropOutcome::Ignored;
        }
        loop {
            if self.gravity_step() == DropOutcome::Locked {
                return DropOutcome::Locked;
            }
        }
    }

    fn gravity_step(&mut self) -> DropOutcome {
        let dropped = self.current.translated(0, 1);
        if !self.field.collides(&dropped) {
            self.current = dropped;
            return DropOutcome::Falling;
        }

        self.lock_piece();
        DropOutcome::Locked
    }

    /// Lock the current piece, clear rows and spawn the next piece
    fn lock_piece(&mut self) {
        let locked = self.current;
        self.field.lock(&locked);

        let lines = self.clear_full_lines();
        let block_out = !self.spawn_piece();

        self.events.push(LockEvent {
            kind: locked.kind,
            lines_cleared: lines,
            line_clear_score: line_clear_score(lines),
            score: self.score,
            lines: self.lines_cleared,
            fall_interval_ms: self.fall_interval_ms,
            block_out,
        });
    }

    /// Remove full rows from the field and score them
    ///
    /// Returns the number of rows removed. Any clear is worth
    /// `n * 100 * (n + 1)` points and speeds gravity up by one step.
    pub fn clear_full_lines(&mut self) -> u32 {
        let lines = self.field.clear_full_lines() as u32;
        if lines > 0 {
            self.score = self.score.saturating_add(line_clear_score(lines));
            self.fall_interval_ms = next_fall_interval_ms(self.fall_interval_ms);
            self.lines_cleared = self.lines_cleared.saturating_add(lines);
        }
        lines
    }

    /// Where the current piece would lock if hard dropped now
    pub fn ghost(&self) -> ActivePiece {
        let mut ghost = self.current;
        loop {
            let below = ghost.translated(0, 1);
            if self.field.collides(&below) {
                return ghost;
            }
            ghost = below;
        }
    }

    /// Apply a game action
    ///
    /// Returns whether the session changed. `Restart` is always honoured;
    /// everything else is ignored once the game is over.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop() != DropOutcome::Ignored,
            GameAction::HardDrop => self.hard_drop() != DropOutcome::Ignored,
            GameAction::Rotate => self.rotate(),
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.field.write_grid(&mut out.board);

        out.current = PieceSnapshot::from(self.current);
        out.next = PieceSnapshot::from(self.next);
        out.ghost_y = if self.game_over {
            None
        } else {
            Some(self.ghost().y)
        };
        out.score = self.score;
        out.lines = self.lines_cleared;
        out.fall_interval_ms = self.fall_interval_ms;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("current", &self.current)
            .field("next", &self.next)
            .field("score", &self.score)
            .field("lines_cleared", &self.lines_cleared)
            .field("fall_interval_ms", &self.fall_interval_ms)
            .field("elapsed_ms", &self.elapsed_ms)
            .field("game_over", &self.game_over)
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedShapes, SimpleRng};
    use crate::types::{Color, MIN_FALL_INTERVAL_MS};

    fn session_of(kinds: &[PieceKind]) -> Session {
        Session::new(SessionConfig::default(), ScriptedShapes::new(kinds.to_vec()))
    }

    #[test]
    fn test_new_session() {
        let session = session_of(&[PieceKind::T, PieceKind::O]);

        assert!(!session.game_over);
        assert_eq!(session.score, 0);
        assert_eq!(session.lines_cleared, 0);
        assert_eq!(session.elapsed_ms, 0);
        assert_eq!(session.fall_interval_ms, INITIAL_FALL_INTERVAL_MS);
        assert_eq!(session.current, ActivePiece::spawn(PieceKind::T));
        assert_eq!(session.next, ActivePiece::spawn(PieceKind::O));
        assert!(session.events.is_empty());
    }

    #[test]
    fn test_config_is_clamped() {
        let session = Session::new(
            SessionConfig { initial_fall_interval_ms: 5 },
            SimpleRng::new(1),
        );
        assert_eq!(session.fall_interval_ms(), MIN_FALL_INTERVAL_MS);
        assert_eq!(session.config().initial_fall_interval_ms, MIN_FALL_INTERVAL_MS);
    }

    #[test]
    fn test_tick_accumulates_below_interval() {
        let mut session = session_of(&[PieceKind::O]);
        assert_eq!(session.tick(499), 0);
        assert_eq!(session.current.y, 0);
        assert_eq!(session.elapsed_ms, 499);

        assert_eq!(session.tick(1), 1);
        assert_eq!(session.current.y, 1);
        assert_eq!(session.elapsed_ms, 0);
    }

    #[test]
    fn test_tick_keeps_remainder_and_steps_multiple_times() {
        let mut session = session_of(&[PieceKind::O]);
        assert_eq!(session.tick(1250), 2);
        assert_eq!(session.current.y, 2);
        assert_eq!(session.elapsed_ms, 250);
    }

    #[test]
    fn test_try_move_collision() {
        let mut session = session_of(&[PieceKind::O]);
        session.field.set(1, 2, Some(Color::GRAY));
        session.field.set(1, 3, Some(Color::GRAY));

        // O occupies columns 4..=5 at x=3; moving to x=0 would hit column 1.
        assert!(session.move_left());
        assert!(session.move_left());
        assert!(!session.move_left());
        assert_eq!(session.current.x, 1);
    }

    #[test]
    fn test_rotate_rejected_without_kick() {
        // I vertical at column x+2; against the left wall the horizontal state
        // would poke out at column -1.
        let mut session = session_of(&[PieceKind::I]);
        session.current = ActivePiece::at(PieceKind::I, -2, 5);
        assert!(!session.field.collides(&session.current));

        assert!(!session.rotate());
        assert_eq!(session.current, ActivePiece::at(PieceKind::I, -2, 5));
    }

    #[test]
    fn test_lock_piece_records_event() {
        let mut session = session_of(&[PieceKind::O, PieceKind::T]);
        assert_eq!(session.hard_drop(), DropOutcome::Locked);

        let events: Vec<_> = session.drain_events().collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, PieceKind::O);
        assert_eq!(events[0].lines_cleared, 0);
        assert_eq!(events[0].line_clear_score, 0);
        assert!(!events[0].block_out);
        assert_eq!(session.drain_events().count(), 0);
    }

    #[test]
    fn test_lock_sequence_scores_and_speeds_up() {
        // Bottom two rows full except columns 4 and 5, where the O lands.
        let field = Field::from_rows(&["####..####", "####..####"]);
        let mut session = Session::with_field(
            SessionConfig::default(),
            ScriptedShapes::repeat(PieceKind::O),
            field,
        );

        assert_eq!(session.hard_drop(), DropOutcome::Locked);
        assert_eq!(session.lines_cleared, 2);
        assert_eq!(session.score, 600);
        assert_eq!(session.fall_interval_ms, INITIAL_FALL_INTERVAL_MS - 10);
        assert_eq!(session.field, Field::new());

        let event = session.drain_events().next().unwrap();
        assert_eq!(event.lines_cleared, 2);
        assert_eq!(event.line_clear_score, 600);
        assert_eq!((event.score, event.lines), (600, 2));
        assert_eq!(event.fall_interval_ms, 490);
    }

    #[test]
    fn test_ghost_matches_hard_drop() {
        let mut session = session_of(&[PieceKind::T, PieceKind::I]);
        let ghost = session.ghost();
        let color = session.current.color;
        session.hard_drop();
        for (x, y) in ghost.cells() {
            assert_eq!(session.field.get(x, y), Some(Some(color)));
        }
    }

    #[test]
    fn test_game_over_stops_game() {
        let mut session = session_of(&[PieceKind::O]);
        session.game_over = true;
        let before = session.current;

        assert_eq!(session.tick(10_000), 0);
        assert!(!session.move_left());
        assert!(!session.move_right());
        assert!(!session.rotate());
        assert_eq!(session.soft_drop(), DropOutcome::Ignored);
        assert_eq!(session.hard_drop(), DropOutcome::Ignored);
        assert_eq!(session.current, before);
        assert_eq!(session.elapsed_ms, 0);
    }

    #[test]
    fn test_restart_clears_game_over() {
        let mut session = session_of(&[PieceKind::O]);
        session.game_over = true;
        session.score = 1200;

        assert!(session.apply_action(GameAction::Restart));
        assert!(!session.game_over);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_snapshot() {
        let mut session = session_of(&[PieceKind::J, PieceKind::L]);
        session.hard_drop();
        let snap = session.snapshot();

        assert_eq!(snap.current.kind, PieceKind::L);
        assert_eq!(snap.locked_cells(), 4);
        assert_eq!(snap.ghost_y, Some(session.ghost().y));
        assert_eq!(snap.fall_interval_ms, INITIAL_FALL_INTERVAL_MS);
        assert!(snap.playable());
    }

    #[test]
    fn test_every_lock_in_one_tick_is_queued() {
        // O pieces stack in columns 4..=5: 17, 15 and 13 steps to lock.
        let mut session = Session::new(
            SessionConfig::with_fall_interval_ms(50),
            ScriptedShapes::repeat(PieceKind::O),
        );

        assert_eq!(session.tick(45 * 50), 45);
        assert!(!session.game_over);
        assert_eq!(session.elapsed_ms, 0);
        assert_eq!(session.field.cells().iter().filter(|c| c.is_some()).count(), 12);

        let events: Vec<_> = session.drain_events().collect();
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.kind == PieceKind::O && !e.block_out));
        assert_eq!(session.drain_events().count(), 0);
    }

    #[test]
    fn test_events_from_drop_and_tick_accumulate() {
        let mut session = session_of(&[PieceKind::O]);
        session.hard_drop();
        // Second O needs 15 steps of 500ms to land on the first.
        assert_eq!(session.tick(15 * 500), 15);
        assert_eq!(session.drain_events().count(), 2);
    }
}
