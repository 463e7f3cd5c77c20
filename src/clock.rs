//! Cooperative scheduler for the gravity interval and one-shot timers
//!
//! The host owns a [`Clock`] next to its [`Engine`] and calls
//! [`Clock::advance`] with the current instant. Everything that fell due since
//! the previous call is fed to the engine in deadline order.

use crate::engine::{Engine, GameEvent, Phase, Timer};
use crate::error::BoardError;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Clock {
    gravity: Duration,
    next_gravity: Instant,
    pending: Vec<(Instant, Timer)>,
}

impl Clock {
    pub fn new(gravity: Duration, now: Instant) -> Self {
        Self {
            gravity,
            next_gravity: now + gravity,
            pending: Vec::new(),
        }
    }

    /// Earliest instant at which `advance` will have work to do
    pub fn next_deadline(&self) -> Instant {
        self.pending
            .iter()
            .map(|(at, _)| *at)
            .fold(self.next_gravity, Instant::min)
    }

    /// Number of one-shot timers still waiting
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Run every tick and timer due at or before `now`; returns the events
    /// the engine emitted along the way
    pub fn advance(&mut self, engine: &mut Engine, now: Instant) -> Result<Vec<GameEvent>, BoardError> {
        let mut events = Vec::new();
        self.collect(engine, now, &mut events);
        // Instant of the last step handled, so an interval that restarts
        // mid-advance counts from the step that stopped the piece
        let mut cursor = now;

        loop {
            // Gravity only runs while a piece is in play; pausing restarts the
            // interval from scratch
            let falling = matches!(engine.phase(), Phase::Running | Phase::LockPending);
            if !falling {
                self.next_gravity = cursor + self.gravity;
            }

            let timer = self
                .pending
                .iter()
                .enumerate()
                .filter(|(_, (at, _))| *at <= now)
                .min_by_key(|(_, (at, _))| *at)
                .map(|(idx, (at, _))| (idx, *at));
            let gravity_due = falling && self.next_gravity <= now;

            match timer {
                Some((idx, at)) if !gravity_due || at <= self.next_gravity => {
                    let (at, timer) = self.pending.remove(idx);
                    engine.fire(timer)?;
                    self.collect(engine, at, &mut events);
                    cursor = at;
                }
                _ if gravity_due => {
                    let at = self.next_gravity;
                    engine.tick();
                    self.next_gravity = at + self.gravity;
                    self.collect(engine, at, &mut events);
                    cursor = at;
                }
                _ => break,
            }
        }

        Ok(events)
    }

    /// Drain engine events, scheduling timer requests relative to `at`
    fn collect(&mut self, engine: &mut Engine, at: Instant, out: &mut Vec<GameEvent>) {
        for event in engine.drain_events() {
            if let GameEvent::TimerRequested { timer, after } = event {
                self.pending.push((at + after, timer));
            }
            out.push(event);
        }
    }
}
