//! Catch minigame (the "play" session)
//!
//! Hearts and bombs fall at a rate proportional to frame time; the pet slides
//! left and right in fixed hops to catch hearts and dodge bombs. A separate
//! one-second countdown ends the round. Coordinates are percentages of the
//! play area.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::Rect;

/// Round length
pub const ROUND_SECS: u32 = 30;
/// Time between spawns
pub const SPAWN_INTERVAL_MS: f64 = 700.0;
/// Fall distance per 16ms of frame time
pub const FALL_SPEED: f32 = 0.6;
pub const FALL_REFERENCE_MS: f64 = 16.0;

/// Horizontal play band
pub const MIN_X: f32 = 15.0;
pub const MAX_X: f32 = 85.0;
pub const START_X: f32 = 50.0;
/// Distance covered by one move command
pub const MOVE_STEP: f32 = 20.0;

/// Objects appear just above the visible area
pub const SPAWN_Y: f32 = -10.0;
/// Objects below this are gone
pub const CULL_Y: f32 = 120.0;

/// Catch zone around the pet
pub const CATCH_HALF_WIDTH: f32 = 15.0;
pub const CATCH_TOP: f32 = 75.0;
pub const CATCH_BOTTOM: f32 = 100.0;

pub const HEART_CHANCE: f64 = 0.7;
pub const HEART_POINTS: u32 = 10;
pub const BOMB_PENALTY: u32 = 20;

/// Catch session phase (there is no start screen)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CatchPhase {
    Running,
    Ended,
}

/// What is falling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FallingKind {
    /// Worth points
    Heart,
    /// Costs points
    Bomb,
}

/// Things the orchestrator reacts to (sound cues)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchEvent {
    Caught { kind: FallingKind, score: u32 },
    TimeUp { score: u32 },
}

/// A falling object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallingObject {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub kind: FallingKind,
    pub caught: bool,
}

/// Transient state for one catch round
#[derive(Debug, Clone, Serialize)]
pub struct CatchSession {
    pub phase: CatchPhase,
    pub actor_x: f32,
    pub objects: Vec<FallingObject>,
    pub score: u32,
    pub seconds_left: u32,
    /// Objects spawned this round
    pub spawned: u32,
    #[serde(skip)]
    spawn_timer_ms: f64,
    #[serde(skip)]
    countdown_ms: f64,
    #[serde(skip)]
    rng: Pcg32,
    #[serde(skip)]
    events: Vec<CatchEvent>,
}

impl CatchSession {
    /// New round, already running
    pub fn new(seed: u64) -> Self {
        log::debug!("Catch session started");
        Self {
            phase: CatchPhase::Running,
            actor_x: START_X,
            objects: Vec::new(),
            score: 0,
            seconds_left: ROUND_SECS,
            spawned: 0,
            spawn_timer_ms: 0.0,
            countdown_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == CatchPhase::Running
    }

    /// Drive both the frame loop and the countdown with one clock delta
    pub fn advance(&mut self, dt_ms: f64) {
        self.frame(dt_ms);

        self.countdown_ms += dt_ms.max(0.0);
        while self.countdown_ms >= 1_000.0 && self.is_running() {
            self.countdown_ms -= 1_000.0;
            self.tick_countdown();
        }
    }

    /// One render frame: spawn, move, collide, cull
    pub fn frame(&mut self, dt_ms: f64) {
        if !self.is_running() {
            return;
        }
        let dt_ms = dt_ms.max(0.0);

        self.spawn_timer_ms += dt_ms;
        if self.spawn_timer_ms > SPAWN_INTERVAL_MS {
            self.spawn_timer_ms = 0.0;
            self.spawn_random();
        }

        let fall = FALL_SPEED * (dt_ms / FALL_REFERENCE_MS) as f32;
        for object in self.objects.iter_mut() {
            object.y += fall;
        }

        let zone = self.catch_zone();
        for object in self.objects.iter_mut().filter(|o| !o.caught) {
            if !zone.contains_point(Vec2::new(object.x, object.y)) {
                continue;
            }
            object.caught = true;
            self.score = match object.kind {
                FallingKind::Heart => self.score + HEART_POINTS,
                FallingKind::Bomb => self.score.saturating_sub(BOMB_PENALTY),
            };
            self.events.push(CatchEvent::Caught {
                kind: object.kind,
                score: self.score,
            });
        }

        self.objects.retain(|o| !o.caught && o.y < CULL_Y);
    }

    /// One second of the round clock
    pub fn tick_countdown(&mut self) {
        if !self.is_running() {
            return;
        }
        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left == 0 {
            self.phase = CatchPhase::Ended;
            self.events.push(CatchEvent::TimeUp { score: self.score });
            log::info!("Catch session ended with score {}", self.score);
        }
    }

    pub fn move_left(&mut self) {
        if self.is_running() {
            self.actor_x = (self.actor_x - MOVE_STEP).max(MIN_X);
        }
    }

    pub fn move_right(&mut self) {
        if self.is_running() {
            self.actor_x = (self.actor_x + MOVE_STEP).min(MAX_X);
        }
    }

    /// Drop an object into the play area; returns its id
    pub fn spawn(&mut self, x: f32, y: f32, kind: FallingKind) -> u32 {
        self.spawned += 1;
        let id = self.spawned;
        self.objects.push(FallingObject {
            id,
            x,
            y,
            kind,
            caught: false,
        });
        id
    }

    fn spawn_random(&mut self) -> u32 {
        let x = MIN_X + self.rng.random::<f32>() * (MAX_X - MIN_X);
        let kind = if self.rng.random_bool(HEART_CHANCE) {
            FallingKind::Heart
        } else {
            FallingKind::Bomb
        };
        self.spawn(x, SPAWN_Y, kind)
    }

    /// The pet's hitbox
    pub fn catch_zone(&self) -> Rect {
        Rect::new(
            Vec2::new(self.actor_x - CATCH_HALF_WIDTH, CATCH_TOP),
            Vec2::new(self.actor_x + CATCH_HALF_WIDTH, CATCH_BOTTOM),
        )
    }

    /// The score is reported whenever the player leaves
    pub fn exit_score(&self) -> u32 {
        self.score
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<CatchEvent> {
        std::mem::take(&mut self.events)
    }
}
