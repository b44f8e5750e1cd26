//! Match state and the operations that change it outside physics
//!
//! Everything needed to resume a match lives in `MatchState`; the tick and
//! the input entry points all take it by `&mut`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::piece::{CoinColor, PieceKind};
use super::rules::{self, Phase, QueenOutcome, ShotSummary, TurnDecision};
use super::store::{PieceStore, PocketCounts};
use crate::consts::*;
use crate::settings::MatchConfig;

/// Where a fresh striker sits on its baseline
pub const DEFAULT_PLACEMENT: f32 = 0.5;

/// Something that happened during a tick, for renderers and audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    ShotTaken { seat: usize },
    Pocketed { id: u32, kind: PieceKind },
    Foul { seat: usize },
    QueenPocketed,
    QueenCovered,
    QueenReturned,
    TurnContinued { seat: usize },
    TurnPassed { to: usize },
    GameOver { winner: CoinColor },
}

/// Append `event`, dropping the oldest entries once the backlog is full
pub(crate) fn push_capped(events: &mut Vec<MatchEvent>, event: MatchEvent) {
    if events.len() >= EVENT_BACKLOG {
        let excess = events.len() + 1 - EVENT_BACKLOG;
        events.drain(..excess);
    }
    events.push(event);
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub config: MatchConfig,
    pub store: PieceStore,
    pub phase: Phase,
    /// Seat whose turn it is
    pub active_seat: usize,
    /// Current striker placement along the active baseline
    pub placement: f32,
    /// Queen pocketed but not yet covered
    pub queen_pending: bool,
    /// Pocket counts taken when the current shot was fired
    pub shot_start: Option<PocketCounts>,
    pub winner: Option<CoinColor>,
    pub shots_taken: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    #[serde(skip)]
    events: Vec<MatchEvent>,
}

impl MatchState {
    pub fn new(config: MatchConfig) -> Self {
        let store = PieceStore::new(Board::default(), config.seats);
        let mut state = Self {
            config,
            store,
            phase: Phase::Aiming,
            active_seat: 0,
            placement: DEFAULT_PLACEMENT,
            queen_pending: false,
            shot_start: None,
            winner: None,
            shots_taken: 0,
            time_ticks: 0,
            events: Vec::new(),
        };
        state.store.spawn_striker(0, DEFAULT_PLACEMENT);
        state
    }

    /// Re-rack for a rematch: fresh layout, scores, turn and queen state
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    /// Color the active seat plays for
    pub fn shooter_color(&self) -> CoinColor {
        self.config.seats.color_of(self.active_seat)
    }

    /// Pocketed counts per color; these are the scores
    pub fn scores(&self) -> PocketCounts {
        self.store.pocket_counts()
    }

    pub fn winner_label(&self) -> Option<&'static str> {
        self.winner.map(|c| self.config.seats.winner_label(c))
    }

    pub fn seat_name(&self) -> &'static str {
        self.config.seats.seat_name(self.active_seat)
    }

    /// Whether a shot is in flight
    pub fn is_in_motion(&self) -> bool {
        matches!(self.phase, Phase::Shooting | Phase::Settling)
    }

    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: MatchEvent) {
        push_capped(&mut self.events, event);
    }

    /// Slide the striker along the active baseline. Only while aiming;
    /// out-of-range values are clamped.
    pub fn set_striker_placement(&mut self, placement: f32) -> bool {
        if self.phase != Phase::Aiming {
            return false;
        }
        self.placement = if placement.is_nan() {
            DEFAULT_PLACEMENT
        } else {
            placement.clamp(0.0, 1.0)
        };
        self.store.spawn_striker(self.active_seat, self.placement);
        true
    }

    /// Fire the striker. Ignored unless aiming, or if the shot is too weak
    /// to count.
    pub fn submit_shot(&mut self, velocity: Vec2) -> bool {
        if self.phase != Phase::Aiming {
            return false;
        }
        if !velocity.is_finite() || velocity.length() < MIN_SHOT_SPEED {
            log::debug!("Ignoring weak shot ({:.2})", velocity.length());
            return false;
        }

        if self.store.striker().is_none() {
            log::warn!("No striker on the board, respawning for seat {}", self.active_seat);
            self.store.spawn_striker(self.active_seat, self.placement);
        }
        let Some(striker) = self.store.striker_mut() else {
            return false;
        };
        striker.vel = velocity;

        self.shot_start = Some(self.store.pocket_counts());
        self.phase = Phase::Shooting;
        self.shots_taken += 1;
        self.push_event(MatchEvent::ShotTaken {
            seat: self.active_seat,
        });
        true
    }

    /// Apply the turn rules once every piece has come to rest
    pub(crate) fn settle(&mut self) {
        let after = self.store.pocket_counts();
        let before = self.shot_start.take().unwrap_or(after);
        let striker_pocketed = self.store.striker().is_some_and(|s| s.is_pocketed());
        let seat = self.active_seat;

        let outcome = rules::resolve(&ShotSummary {
            before,
            after,
            striker_pocketed,
            shooter: self.shooter_color(),
            queen_pending: self.queen_pending,
        });

        if outcome.foul {
            // The striker stays in the pocket; the next turn spawns a fresh one
            log::debug!("Foul by seat {seat}: striker pocketed");
            self.push_event(MatchEvent::Foul { seat });
        }

        match outcome.queen {
            QueenOutcome::Untouched => {}
            QueenOutcome::Pocketed => {
                log::debug!("Queen pocketed by seat {seat}, cover owed");
                self.push_event(MatchEvent::QueenPocketed);
            }
            QueenOutcome::Covered => {
                log::debug!("Queen covered by seat {seat}");
                self.push_event(MatchEvent::QueenCovered);
            }
            QueenOutcome::Returned => {
                log::debug!("Queen not covered, returning to center");
                self.store.respawn_queen();
                self.push_event(MatchEvent::QueenReturned);
            }
        }
        self.queen_pending = outcome.queen_pending;

        match outcome.decision {
            TurnDecision::GameOver(color) => {
                let label = self.config.seats.winner_label(color);
                log::info!("Game over: {label} wins after {} shots", self.shots_taken);
                self.winner = Some(color);
                self.phase = Phase::GameOver;
                self.push_event(MatchEvent::GameOver { winner: color });
            }
            TurnDecision::ContinueTurn => {
                log::debug!("Seat {seat} continues ({} own pocketed)", outcome.own_pocketed);
                self.push_event(MatchEvent::TurnContinued { seat });
                self.begin_turn(seat);
            }
            TurnDecision::AdvanceTurn => {
                let next = self.config.seats.next(seat);
                log::debug!("Turn passes from seat {seat} to seat {next}");
                self.push_event(MatchEvent::TurnPassed { to: next });
                self.begin_turn(next);
            }
        }
    }

    fn begin_turn(&mut self, seat: usize) {
        self.active_seat = seat;
        self.placement = DEFAULT_PLACEMENT;
        self.store.spawn_striker(seat, DEFAULT_PLACEMENT);
        self.phase = Phase::Aiming;
    }
}
