//! Match session: the loop a frontend drives once per animation frame
//!
//! Owns the match state, the computer planner and the drag gesture. The
//! computer's "thinking" pause is a tick countdown so exiting the match can
//! cancel it deterministically.

use glam::Vec2;

use crate::consts::PLANNER_DELAY_TICKS;
use crate::input::DragAim;
use crate::settings::MatchConfig;
use crate::sim::state::push_capped;
use crate::sim::{MatchEvent, MatchState, Phase, ShotPlanner, TickInput, tick};
use crate::snapshot::FrameSnapshot;

/// Called once per match with the winner label, or `None` if abandoned
pub type CompletionCallback = Box<dyn FnMut(Option<&str>)>;

/// A computer shot waiting for its delay to run out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredShot {
    pub seat: usize,
    pub remaining_ticks: u32,
}

pub struct Session {
    state: MatchState,
    planner: ShotPlanner,
    drag: DragAim,
    pending: Option<DeferredShot>,
    on_complete: Option<CompletionCallback>,
    /// Completion already reported for the current match
    reported: bool,
    running: bool,
    /// Demo mode: the computer plays every seat
    autoplay: bool,
    planner_delay: u32,
    /// Rematch counter, mixed into the planner seed
    match_index: u64,
    events: Vec<MatchEvent>,
}

impl Session {
    pub fn new(config: MatchConfig, on_complete: Option<CompletionCallback>) -> Self {
        log::info!(
            "Starting match: {}, {}, {}",
            config.mode.as_str(),
            config.difficulty.as_str(),
            config.seats.as_str()
        );
        let planner = ShotPlanner::new(config.seed, config.difficulty);
        Self {
            state: MatchState::new(config),
            planner,
            drag: DragAim::default(),
            pending: None,
            on_complete,
            reported: false,
            running: true,
            autoplay: false,
            planner_delay: PLANNER_DELAY_TICKS,
            match_index: 0,
            events: Vec::new(),
        }
    }

    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn with_planner_delay(mut self, ticks: u32) -> Self {
        self.planner_delay = ticks;
        self
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pending_shot(&self) -> Option<DeferredShot> {
        self.pending
    }

    /// Whether the active seat is played by the computer
    pub fn is_computer_turn(&self) -> bool {
        self.autoplay || self.state.config.is_computer(self.state.active_seat)
    }

    /// Events collected since the last call, at most `EVENT_BACKLOG` of the
    /// newest
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run one frame. Returns true while a shot is settling.
    pub fn frame(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.run_planner_timer();
        let settling = tick(&mut self.state, &TickInput::default());
        for event in self.state.drain_events() {
            push_capped(&mut self.events, event);
        }

        if self.state.phase == Phase::GameOver {
            let label = self.state.winner_label();
            self.report(label);
        }
        settling
    }

    fn run_planner_timer(&mut self) {
        if self.state.phase != Phase::Aiming || !self.is_computer_turn() {
            self.pending = None;
            return;
        }

        let seat = self.state.active_seat;
        match &mut self.pending {
            Some(shot) if shot.seat == seat => {
                shot.remaining_ticks = shot.remaining_ticks.saturating_sub(1);
            }
            _ => {
                log::debug!("Computer thinking for seat {seat}");
                self.pending = Some(DeferredShot {
                    seat,
                    remaining_ticks: self.planner_delay,
                });
            }
        }

        if self.pending.is_some_and(|shot| shot.remaining_ticks == 0) {
            self.pending = None;
            self.planner.take_shot(&mut self.state);
        }
    }

    fn accepts_human_input(&self) -> bool {
        self.running && self.state.phase == Phase::Aiming && !self.is_computer_turn()
    }

    /// Fire the striker with an explicit velocity
    pub fn submit_shot(&mut self, velocity: Vec2) -> bool {
        if !self.accepts_human_input() {
            return false;
        }
        self.state.submit_shot(velocity)
    }

    /// Move the striker along the baseline (slider value 0..1)
    pub fn set_striker_placement(&mut self, placement: f32) -> bool {
        if !self.accepts_human_input() {
            return false;
        }
        self.state.set_striker_placement(placement)
    }

    /// Start a pull-back drag at a board-space point
    pub fn begin_drag(&mut self, point: Vec2) -> bool {
        if !self.accepts_human_input() {
            return false;
        }
        match self.state.store.striker() {
            Some(striker) => self.drag.begin(point, striker.pos),
            None => false,
        }
    }

    pub fn drag_to(&mut self, point: Vec2) {
        if self.accepts_human_input() {
            self.drag.update(point);
        }
    }

    /// Release the drag; shoots if it was long enough
    pub fn release_drag(&mut self) -> bool {
        let shot = self.drag.release();
        match shot {
            Some(velocity) => self.submit_shot(velocity),
            None => false,
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state, self.drag.aim_vector())
    }

    /// Re-rack and start the next match with the same configuration
    pub fn rematch(&mut self) {
        if !self.reported {
            log::info!("Match abandoned for a rematch");
            let label = self.state.winner_label();
            self.report(label);
        }
        self.match_index += 1;
        log::info!("Rematch #{}", self.match_index);
        self.state.reset();
        self.planner = ShotPlanner::new(
            self.state.config.seed.wrapping_add(self.match_index),
            self.state.config.difficulty,
        );
        self.drag.cancel();
        self.pending = None;
        self.events.clear();
        self.reported = false;
        self.running = true;
    }

    /// Leave the match: cancel the pending computer shot and stop the loop
    pub fn exit(&mut self) {
        if !self.running {
            return;
        }
        if let Some(shot) = self.pending.take() {
            log::debug!("Cancelled pending computer shot for seat {}", shot.seat);
        }
        self.drag.cancel();
        self.running = false;
        log::info!("Match exited after {} shots", self.state.shots_taken);
        self.report(None);
    }

    fn report(&mut self, winner: Option<&'static str>) {
        if self.reported {
            return;
        }
        self.reported = true;
        if let Some(callback) = self.on_complete.as_mut() {
            callback(winner);
        }
    }
}
