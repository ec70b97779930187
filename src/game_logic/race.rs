use crate::game_logic::Track;
use bevy::prelude::*;

/// Lifecycle of one race. `Finished` is terminal; racing again means a fresh
/// tracker (and vehicle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RacePhase {
    NotStarted,
    Racing,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceEvent {
    CheckpointPassed(usize),
    LapCompleted(u32),
    RaceFinished,
}

/// Sequences checkpoint crossings into laps. Checkpoints must be crossed in
/// order; once the sequence wraps, a start-line crossing is additionally
/// required before the lap counts, so looping back near the start without
/// actually completing the circuit gains nothing.
pub struct RaceProgress {
    next_checkpoint: usize,
    awaiting_start_line: bool,
    laps_complete: u32,
    total_laps: u32,
    elapsed: f32,
    phase: RacePhase,
}

impl RaceProgress {
    pub fn new(total_laps: u32) -> Self {
        Self {
            next_checkpoint: 0,
            awaiting_start_line: false,
            laps_complete: 0,
            total_laps,
            elapsed: 0.0,
            phase: RacePhase::NotStarted,
        }
    }

    /// Evaluate one tick of movement against the track's gates. The first
    /// tick starts the race clock.
    pub fn tick(&mut self, from: Vec2, to: Vec2, track: &Track, dt: f32) -> Option<RaceEvent> {
        match self.phase {
            RacePhase::Finished => return None,
            RacePhase::NotStarted => self.phase = RacePhase::Racing,
            RacePhase::Racing => {}
        }
        self.elapsed += dt;

        let mut event = None;
        if !track.checkpoints.is_empty() {
            let gate = &track.checkpoints[self.next_checkpoint % track.checkpoints.len()];
            if track.crossed_line(from, to, gate) {
                let passed = self.next_checkpoint;
                self.next_checkpoint = (self.next_checkpoint + 1) % track.checkpoints.len();
                if self.next_checkpoint == 0 {
                    self.awaiting_start_line = true;
                }
                info!("checkpoint {} passed", passed);
                event = Some(RaceEvent::CheckpointPassed(passed));
            }
        }

        if self.awaiting_start_line && track.crossed_line(from, to, &track.start_line) {
            self.awaiting_start_line = false;
            self.laps_complete += 1;
            info!("lap {} complete", self.laps_complete);

            if self.laps_complete >= self.total_laps {
                self.phase = RacePhase::Finished;
                return Some(RaceEvent::RaceFinished);
            }
            return Some(RaceEvent::LapCompleted(self.laps_complete));
        }

        event
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    pub fn next_checkpoint(&self) -> usize {
        self.next_checkpoint
    }

    pub fn laps_complete(&self) -> u32 {
        self.laps_complete
    }

    pub fn total_laps(&self) -> u32 {
        self.total_laps
    }

    pub fn elapsed_millis(&self) -> u64 {
        (self.elapsed * 1000.0) as u64
    }

    /// Whether this run beats a previously recorded best time.
    pub fn beats(&self, best: Option<u64>) -> bool {
        best.is_none_or(|best| self.elapsed_millis() < best)
    }
}
