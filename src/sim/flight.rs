//! Obstacle flight minigame (the "work shift")
//!
//! Side-scroller on a fixed 60 Hz step. The actor falls under gravity, a tap
//! sets an upward velocity, and paired obstacles scroll in from the right
//! with a random gap. Passing an obstacle scores a point; touching one or
//! leaving the screen ends the shift.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::{Rect, out_of_bounds};
use crate::consts::MAX_FRAME_MS;

/// Logical world size (the renderer scales to fit)
pub const WORLD_WIDTH: f32 = 400.0;
pub const WORLD_HEIGHT: f32 = 500.0;

/// Fixed physics step (60 Hz)
pub const STEP_MS: f64 = 1000.0 / 60.0;
/// Maximum steps per frame to prevent spiral of death
pub const MAX_SUBSTEPS: u32 = 8;

/// Downward acceleration per step
pub const GRAVITY: f32 = 0.6;
/// Velocity set by a jump (negative is up)
pub const JUMP_VELOCITY: f32 = -8.5;

/// Actor geometry
pub const ACTOR_X: f32 = 50.0;
pub const ACTOR_SIZE: f32 = 30.0;
/// Hitbox shrink so near misses don't count
pub const ACTOR_MARGIN: f32 = 5.0;
/// Height reserved at the bottom (actor plus ground strip)
pub const ACTOR_BOUNDARY_HEIGHT: f32 = 35.0;
pub const START_Y: f32 = 200.0;

/// Obstacle layout
pub const OBSTACLE_SPEED: f32 = 3.5;
pub const OBSTACLE_SPACING: f32 = 220.0;
pub const OBSTACLE_WIDTH: f32 = 50.0;
pub const GAP_HEIGHT: f32 = 140.0;
pub const MIN_GAP_TOP: u32 = 50;
pub const MAX_GAP_TOP: u32 = 310; // WORLD_HEIGHT - GAP_HEIGHT - MIN_GAP_TOP
/// Obstacles left of this are gone and scored
pub const DESPAWN_X: f32 = -60.0;

/// Flight session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlightPhase {
    /// Waiting on the start screen
    Idle,
    Running,
    /// Shift over, waiting for retry or cash out
    Ended,
}

/// Why a shift ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CrashCause {
    Boundary,
    Obstacle,
}

/// Things the orchestrator reacts to (sound cues)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightEvent {
    Jumped,
    Scored { score: u32 },
    Crashed(CrashCause),
}

/// A pair of obstacles with a gap between them
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Top of the gap (height of the upper obstacle)
    pub gap_top: f32,
}

impl Obstacle {
    pub fn top_rect(&self) -> Rect {
        Rect::new(
            Vec2::new(self.x, 0.0),
            Vec2::new(self.x + OBSTACLE_WIDTH, self.gap_top),
        )
    }

    pub fn bottom_rect(&self) -> Rect {
        Rect::new(
            Vec2::new(self.x, self.gap_top + GAP_HEIGHT),
            Vec2::new(self.x + OBSTACLE_WIDTH, WORLD_HEIGHT),
        )
    }
}

/// Transient state for one flight session
#[derive(Debug, Clone, Serialize)]
pub struct FlightSession {
    pub phase: FlightPhase,
    /// Top edge of the actor
    pub y: f32,
    pub velocity: f32,
    /// Oldest first
    pub obstacles: VecDeque<Obstacle>,
    pub score: u32,
    pub crash: Option<CrashCause>,
    /// Physics steps since start
    pub steps: u64,
    #[serde(skip)]
    jump_pending: bool,
    #[serde(skip)]
    accumulator: f64,
    #[serde(skip)]
    rng: Pcg32,
    #[serde(skip)]
    events: Vec<FlightEvent>,
}

impl FlightSession {
    /// New session on the start screen
    pub fn new(seed: u64) -> Self {
        Self {
            phase: FlightPhase::Idle,
            y: START_Y,
            velocity: 0.0,
            obstacles: VecDeque::new(),
            score: 0,
            crash: None,
            steps: 0,
            jump_pending: false,
            accumulator: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Start or retry: reset everything and begin running.
    /// Ignored while a shift is in progress.
    pub fn start(&mut self) -> bool {
        if self.phase == FlightPhase::Running {
            return false;
        }
        self.phase = FlightPhase::Running;
        self.y = START_Y;
        self.velocity = 0.0;
        self.obstacles.clear();
        self.score = 0;
        self.crash = None;
        self.steps = 0;
        self.jump_pending = false;
        self.accumulator = 0.0;
        log::debug!("Flight session started");
        true
    }

    /// Queue an upward impulse for the next physics step
    pub fn jump(&mut self) -> bool {
        if self.phase != FlightPhase::Running {
            return false;
        }
        self.jump_pending = true;
        self.events.push(FlightEvent::Jumped);
        true
    }

    /// Feed real elapsed time; runs whole fixed steps and carries the rest.
    /// Returns the number of steps run.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if self.phase != FlightPhase::Running {
            return 0;
        }
        self.accumulator += elapsed_ms.clamp(0.0, MAX_FRAME_MS);

        let mut substeps = 0;
        while self.accumulator >= STEP_MS
            && substeps < MAX_SUBSTEPS
            && self.phase == FlightPhase::Running
        {
            self.step();
            self.accumulator -= STEP_MS;
            substeps += 1;
        }
        substeps
    }

    /// Advance the simulation by exactly one fixed step
    pub fn step(&mut self) {
        if self.phase != FlightPhase::Running {
            return;
        }
        self.steps += 1;

        // Physics
        if std::mem::take(&mut self.jump_pending) {
            self.velocity = JUMP_VELOCITY;
        }
        self.velocity += GRAVITY;
        self.y += self.velocity;

        // Boundaries
        if out_of_bounds(self.y, 0.0, WORLD_HEIGHT - ACTOR_BOUNDARY_HEIGHT) {
            self.end(CrashCause::Boundary);
            return;
        }

        // Spawn at constant spacing
        let spawn = self
            .obstacles
            .back()
            .is_none_or(|last| WORLD_WIDTH - last.x >= OBSTACLE_SPACING);
        if spawn {
            let gap_top = self.rng.random_range(MIN_GAP_TOP..=MAX_GAP_TOP) as f32;
            self.obstacles.push_back(Obstacle {
                x: WORLD_WIDTH,
                gap_top,
            });
        }

        for obstacle in self.obstacles.iter_mut() {
            obstacle.x -= OBSTACLE_SPEED;
        }

        // Oldest obstacle scrolled away: score it
        if self.obstacles.front().is_some_and(|o| o.x < DESPAWN_X) {
            self.obstacles.pop_front();
            self.score += 1;
            self.events.push(FlightEvent::Scored { score: self.score });
        }

        let actor = self.actor_rect();
        let hit = self
            .obstacles
            .iter()
            .any(|o| actor.overlaps(&o.top_rect()) || actor.overlaps(&o.bottom_rect()));
        if hit {
            self.end(CrashCause::Obstacle);
        }
    }

    fn end(&mut self, cause: CrashCause) {
        self.phase = FlightPhase::Ended;
        self.crash = Some(cause);
        self.jump_pending = false;
        self.events.push(FlightEvent::Crashed(cause));
        log::info!("Flight session ended ({cause:?}) with score {}", self.score);
    }

    /// Actor hitbox with the forgiveness margin applied
    pub fn actor_rect(&self) -> Rect {
        Rect::from_pos_size(Vec2::new(ACTOR_X, self.y), Vec2::splat(ACTOR_SIZE)).inset(ACTOR_MARGIN)
    }

    /// Sprite rotation in degrees (nose up when rising)
    pub fn actor_tilt(&self) -> f32 {
        (self.velocity * 4.0).clamp(-25.0, 25.0)
    }

    /// Score to report when the player leaves: the final score once ended,
    /// zero from the start screen, nothing while a shift is in progress
    pub fn exit_score(&self) -> Option<u32> {
        match self.phase {
            FlightPhase::Idle => Some(0),
            FlightPhase::Ended => Some(self.score),
            FlightPhase::Running => None,
        }
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<FlightEvent> {
        std::mem::take(&mut self.events)
    }
}
