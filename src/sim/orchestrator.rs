//! Simulation orchestrator
//!
//! Owns the canonical pet state and routes everything else: the decay clock,
//! view changes, minigame sessions and their rewards, shop and wardrobe
//! commands, and the delayed animation continuations. State is persisted after
//! every mutation.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::animation::{FeedPhase, PoopPhase};
use super::catalog::{self, ShopItem};
use super::catch::{CatchEvent, CatchSession, FallingKind};
use super::decay::{self, DecayClock};
use super::flight::{FlightEvent, FlightSession};
use super::inventory::{Appearance, EquipOutcome, Inventory, InventoryEntry};
use super::jobs::{Job, JobLadder};
use super::state::{Mood, PetStats, View};
use super::timer::Scheduler;
use crate::audio::{AudioSink, Cue};
use crate::persistence::{SaveData, Storage};
use crate::tuning::Tuning;

/// Flight points between "pop" cues
const SCORE_CUE_INTERVAL: u32 = 5;

/// Delayed continuations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// The squat is over, land the pile
    PoopResolve,
    /// Enter the given feeding phase
    Feed(FeedPhase),
}

/// Result of a purchase attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Bought,
    InsufficientFunds,
    AlreadyOwned,
    UnknownItem,
}

/// Result of asking the pet to eat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeOutcome {
    Started,
    /// Already eating
    Busy,
    NotOwned,
    NotFood,
}

/// Result of a view request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewChange {
    Changed,
    /// Already there
    Unchanged,
    /// Only Home is reachable while eating
    BlockedByFeeding,
}

/// Inbound commands from the view layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Command {
    /// Start the flight shift
    Start,
    /// Throw away the flight session and start a new one
    Retry,
    /// Leave the current view, collecting any reward
    Exit,
    MovePetLeft,
    MovePetRight,
    Jump,
    ConsumeItem { id: String },
    PurchaseItem { id: String },
    EquipToggle { id: String },
    OpenView { view: View },
    SecretTap,
    FinishShower,
}

/// Everything the view layer needs to draw a frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub view: View,
    pub mood: Mood,
    pub stats: &'a PetStats,
    pub job: &'a Job,
    pub growth_stage: f32,
    pub render_scale: f32,
    pub dirty: bool,
    pub hungry: bool,
    pub has_poop: bool,
    pub poop_phase: PoopPhase,
    pub feed_phase: FeedPhase,
    pub feeding_item: Option<&'a str>,
    pub mouth_open: bool,
    pub inventory: &'a [InventoryEntry],
    pub appearance: &'a Appearance,
    pub flight: Option<&'a FlightSession>,
    /// Flight sprite rotation in degrees
    pub flight_tilt: Option<f32>,
    pub catch: Option<&'a CatchSession>,
    pub muted: bool,
}

/// The pet simulation
pub struct Orchestrator {
    data: SaveData,
    view: View,
    tuning: Tuning,
    ladder: JobLadder,
    rng: Pcg32,

    /// Simulated milliseconds since construction
    now_ms: f64,
    /// Wall-clock time at construction (ms since the Unix epoch)
    epoch_ms: f64,
    decay_clock: DecayClock,
    timers: Scheduler<Timer>,

    poop_phase: PoopPhase,
    feed_phase: FeedPhase,
    feeding_item: Option<&'static ShopItem>,

    flight: Option<FlightSession>,
    catch: Option<CatchSession>,

    secret_taps: Vec<f64>,
    notices: Vec<String>,

    storage: Box<dyn Storage>,
    audio: Box<dyn AudioSink>,
    muted: bool,
}

impl Orchestrator {
    /// Load saved state from `storage` and start on the home view
    pub fn new(
        storage: Box<dyn Storage>,
        audio: Box<dyn AudioSink>,
        tuning: Tuning,
        seed: u64,
    ) -> Self {
        let mut data = SaveData::load(storage.as_ref());
        let ladder = JobLadder::standard();

        // Unknown job ids fall back to the entry tier; a stale save may also
        // hold a job below what its high score earns
        let current = ladder.job(data.stats.job_id).id;
        data.stats.job_id = current.max(ladder.eligible(data.stats.high_score).id);

        Self {
            data,
            view: View::Home,
            tuning,
            ladder,
            rng: Pcg32::seed_from_u64(seed),
            now_ms: 0.0,
            epoch_ms: 0.0,
            decay_clock: DecayClock::new(),
            timers: Scheduler::new(),
            poop_phase: PoopPhase::Idle,
            feed_phase: FeedPhase::Idle,
            feeding_item: None,
            flight: None,
            catch: None,
            secret_taps: Vec::new(),
            notices: Vec::new(),
            storage,
            audio,
            muted: false,
        }
    }

    /// Set the wall-clock origin used for `last_update` stamps
    pub fn set_epoch_ms(&mut self, epoch_ms: f64) {
        self.epoch_ms = epoch_ms;
    }

    /// Silence every cue until unmuted
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.audio.set_volume(volume);
    }

    // === Accessors ===

    pub fn stats(&self) -> &PetStats {
        &self.data.stats
    }

    pub fn inventory(&self) -> &Inventory {
        &self.data.inventory
    }

    pub fn appearance(&self) -> &Appearance {
        &self.data.appearance
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn ladder(&self) -> &JobLadder {
        &self.ladder
    }

    pub fn current_job(&self) -> &Job {
        self.ladder.job(self.data.stats.job_id)
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn poop_phase(&self) -> PoopPhase {
        self.poop_phase
    }

    pub fn feed_phase(&self) -> FeedPhase {
        self.feed_phase
    }

    pub fn flight(&self) -> Option<&FlightSession> {
        self.flight.as_ref()
    }

    pub fn catch(&self) -> Option<&CatchSession> {
        self.catch.as_ref()
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Timers still waiting to fire
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn mood(&self) -> Mood {
        self.data.stats.mood(self.feed_phase)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let stats = &self.data.stats;
        Snapshot {
            view: self.view,
            mood: self.mood(),
            stats,
            job: self.current_job(),
            growth_stage: stats.growth_stage(),
            render_scale: stats.render_scale(),
            dirty: stats.is_dirty(),
            hungry: stats.is_hungry(),
            has_poop: stats.has_poop(),
            poop_phase: self.poop_phase,
            feed_phase: self.feed_phase,
            feeding_item: self.feeding_item.map(|item| item.id),
            mouth_open: self.feed_phase.mouth_open(),
            inventory: self.data.inventory.entries(),
            appearance: &self.data.appearance,
            flight: self.flight.as_ref(),
            flight_tilt: self.flight.as_ref().map(FlightSession::actor_tilt),
            catch: self.catch.as_ref(),
            muted: self.muted,
        }
    }

    /// Snapshot as JSON for the web view
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|e| {
            log::warn!("Failed to serialize snapshot: {e}");
            "{}".to_string()
        })
    }

    /// Take queued notices, oldest first
    pub fn drain_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    // === Clock ===

    /// Advance the whole simulation by `dt_ms` of real time
    pub fn advance(&mut self, dt_ms: f64) {
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        self.now_ms += dt_ms;

        // Decay is suspended in minigames, including the time bank
        if !self.view.is_minigame() {
            let ticks = self.decay_clock.advance(dt_ms, self.tuning.decay_tick_ms);
            for _ in 0..ticks {
                self.decay_tick();
            }
            // One write per frame, however many ticks a long gap produced
            if ticks > 0 {
                self.save();
            }
        }

        match self.view {
            View::Work => {
                if let Some(flight) = self.flight.as_mut() {
                    flight.advance(dt_ms);
                }
            }
            View::Play => {
                if let Some(catch) = self.catch.as_mut() {
                    catch.advance(dt_ms);
                }
            }
            _ => {}
        }
        self.pump_session_events();

        for timer in self.timers.take_due(self.now_ms) {
            self.fire(timer);
        }
    }

    fn decay_tick(&mut self) {
        decay::apply_tick(&mut self.data.stats, &self.tuning);
        self.data.stats.last_update = self.epoch_ms + self.now_ms;
        log::debug!(
            "Decay tick: hunger {:.1} hygiene {:.1} happiness {:.1}",
            self.data.stats.hunger,
            self.data.stats.hygiene,
            self.data.stats.happiness
        );

        let busy = self.poop_phase.is_busy();
        if decay::roll_poop(&self.data.stats, busy, &self.tuning, &mut self.rng) {
            self.begin_poop();
        }
    }

    fn begin_poop(&mut self) {
        log::debug!("Poop sequence started");
        self.poop_phase = PoopPhase::Squatting;
        self.switch_view(View::Home);
        self.cue(Cue::Loose);
        self.timers
            .schedule(self.now_ms, self.tuning.poop_delay_ms, Timer::PoopResolve);
    }

    fn fire(&mut self, timer: Timer) {
        match timer {
            Timer::PoopResolve => {
                if self.poop_phase != PoopPhase::Squatting {
                    return;
                }
                decay::resolve_poop(&mut self.data.stats, &self.tuning);
                self.poop_phase = PoopPhase::Resolved;
                self.notify("Oops!");
                self.save();
            }
            Timer::Feed(phase) => {
                if !self.feed_phase.is_active() {
                    return;
                }
                self.feed_phase = phase;
                match phase {
                    FeedPhase::Chewing => self.eat(),
                    FeedPhase::Idle => self.feeding_item = None,
                    _ => {}
                }
            }
        }
    }

    // === Views ===

    /// Navigate to `view` on the player's request
    pub fn open_view(&mut self, view: View) -> ViewChange {
        if view == self.view {
            return ViewChange::Unchanged;
        }
        if self.feed_phase.is_active() && view != View::Home {
            return ViewChange::BlockedByFeeding;
        }
        self.cue(Cue::Click);
        self.switch_view(view);
        ViewChange::Changed
    }

    /// Change view without a cue, creating and destroying sessions
    fn switch_view(&mut self, view: View) {
        if view == self.view {
            return;
        }
        log::debug!("View {:?} -> {:?}", self.view, view);

        // Leaving a minigame destroys its session
        match self.view {
            View::Work => self.flight = None,
            View::Play => self.catch = None,
            _ => {}
        }

        if view.is_minigame() {
            self.timers.cancel_all();
            self.poop_phase = PoopPhase::Idle;
            self.feed_phase = FeedPhase::Idle;
            self.feeding_item = None;
        }

        match view {
            View::Work => self.flight = Some(FlightSession::new(self.rng.random())),
            View::Play => {
                log::info!("Play session started");
                self.catch = Some(CatchSession::new(self.rng.random()));
            }
            _ => {}
        }
        self.view = view;
    }

    // === Minigames ===

    /// Begin the flight shift
    pub fn start(&mut self) -> bool {
        let started = match (self.view, self.flight.as_mut()) {
            (View::Work, Some(flight)) => flight.start(),
            _ => false,
        };
        if started {
            log::info!("Work shift started");
        }
        started
    }

    /// Replace the flight session with a fresh running one (no reward)
    pub fn retry(&mut self) -> bool {
        if self.view != View::Work {
            return false;
        }
        let mut flight = FlightSession::new(self.rng.random());
        flight.start();
        self.flight = Some(flight);
        log::info!("Work shift restarted");
        true
    }

    pub fn jump(&mut self) -> bool {
        let jumped = self.flight.as_mut().is_some_and(|f| f.jump());
        self.pump_session_events();
        jumped
    }

    pub fn move_pet_left(&mut self) {
        if let Some(catch) = self.catch.as_mut() {
            catch.move_left();
        }
    }

    pub fn move_pet_right(&mut self) {
        if let Some(catch) = self.catch.as_mut() {
            catch.move_right();
        }
    }

    /// Leave the current view, reporting any minigame score
    pub fn exit(&mut self) {
        match self.view {
            View::Work => {
                let score = self.flight.as_ref().and_then(|f| f.exit_score());
                self.switch_view(View::Home);
                match score {
                    Some(score) => self.apply_work_reward(score),
                    None => log::info!("Work shift abandoned"),
                }
            }
            View::Play => {
                let score = self.catch.as_ref().map(|c| c.exit_score()).unwrap_or(0);
                self.switch_view(View::Home);
                self.apply_play_reward(score);
            }
            _ => self.switch_view(View::Home),
        }
    }

    /// Pay out a work shift and check for a promotion
    pub fn apply_work_reward(&mut self, score: u32) {
        if score > 0 {
            self.cue(Cue::Coin);
        }
        let multiplier = self.current_job().salary_multiplier;
        let stats = &mut self.data.stats;
        stats.money = stats.money.saturating_add(score as u64 * multiplier);
        stats.high_score = stats.high_score.max(score);

        if let Some(job) = self.ladder.promotion(stats.job_id, stats.high_score) {
            stats.job_id = job.id;
            let title = job.title.clone();
            log::info!("Promoted to {title}");
            self.cue(Cue::Success);
            self.notify(format!("Promoted to {title}!"));
        }

        let stats = &mut self.data.stats;
        stats.happiness -= self.tuning.work_happiness_cost;
        stats.clamp();
        log::info!("Work shift ended with score {score}");
        self.switch_view(View::Home);
        self.save();
    }

    /// Reward a play session
    pub fn apply_play_reward(&mut self, score: u32) {
        if score > 0 {
            self.cue(Cue::Powerup);
        }
        let gain = self.tuning.play_happiness_gain(score);
        let stats = &mut self.data.stats;
        stats.happiness += gain;
        stats.hunger -= self.tuning.play_hunger_cost;
        stats.clamp();
        log::info!("Play session ended with score {score}");
        self.notify(format!("Fun! +{gain} Happy"));
        self.switch_view(View::Home);
        self.save();
    }

    /// Shower minigame finished
    pub fn finish_shower(&mut self) -> bool {
        if self.view != View::Shower {
            return false;
        }
        self.cue(Cue::Success);
        let stats = &mut self.data.stats;
        stats.hygiene = crate::consts::MAX_STAT;
        stats.poops = 0;
        stats.happiness += self.tuning.shower_happiness_bonus;
        stats.clamp();
        self.notify("Squeaky clean!");
        self.switch_view(View::Home);
        self.save();
        true
    }

    /// Turn session events into cues
    fn pump_session_events(&mut self) {
        let flight_events = self
            .flight
            .as_mut()
            .map(|f| f.drain_events())
            .unwrap_or_default();
        for event in flight_events {
            match event {
                FlightEvent::Jumped => self.cue(Cue::Jump),
                FlightEvent::Scored { score } if score % SCORE_CUE_INTERVAL == 0 => {
                    self.cue(Cue::Pop)
                }
                FlightEvent::Scored { .. } => {}
                FlightEvent::Crashed(cause) => {
                    log::debug!("Flight crashed: {cause:?}");
                    self.cue(Cue::Crash);
                }
            }
        }

        let catch_events = self
            .catch
            .as_mut()
            .map(|c| c.drain_events())
            .unwrap_or_default();
        for event in catch_events {
            match event {
                CatchEvent::Caught {
                    kind: FallingKind::Heart,
                    ..
                } => self.cue(Cue::Coin),
                CatchEvent::Caught {
                    kind: FallingKind::Bomb,
                    ..
                } => self.cue(Cue::Crash),
                CatchEvent::TimeUp { score } => log::debug!("Play time up at {score}"),
            }
        }
    }

    // === Shop & wardrobe ===

    pub fn purchase_item(&mut self, id: &str) -> PurchaseOutcome {
        let Some(item) = catalog::item(id) else {
            log::warn!("Purchase of unknown item `{id}`");
            return PurchaseOutcome::UnknownItem;
        };
        if self.data.stats.money < item.cost {
            self.cue(Cue::Crash);
            self.notify("Not enough money!");
            return PurchaseOutcome::InsufficientFunds;
        }
        if !item.is_food() && self.data.inventory.contains(item.id) {
            self.notify(format!("You already have {}!", item.name));
            return PurchaseOutcome::AlreadyOwned;
        }

        self.data.stats.money -= item.cost;
        self.data.inventory.add(item.id);
        self.cue(Cue::Coin);
        self.notify(format!("Bought {}!", item.name));
        self.save();
        PurchaseOutcome::Bought
    }

    /// Start feeding an owned food item
    pub fn consume_item(&mut self, id: &str) -> ConsumeOutcome {
        if self.feed_phase.is_active() {
            return ConsumeOutcome::Busy;
        }
        let Some(item) = catalog::item(id) else {
            return ConsumeOutcome::NotOwned;
        };
        if !item.is_food() {
            return ConsumeOutcome::NotFood;
        }
        if !self.data.inventory.contains(item.id) {
            return ConsumeOutcome::NotOwned;
        }

        self.cue(Cue::Pop);
        self.switch_view(View::Home);
        self.feed_phase = FeedPhase::Spawned;
        self.feeding_item = Some(item);
        for (phase, delay_ms) in FeedPhase::schedule() {
            self.timers
                .schedule(self.now_ms, delay_ms, Timer::Feed(phase));
        }
        ConsumeOutcome::Started
    }

    /// Apply the food being fed
    fn eat(&mut self) {
        let Some(item) = self.feeding_item else {
            return;
        };
        if !self.data.inventory.take_one(item.id) {
            log::warn!("`{}` vanished before it was eaten", item.id);
            return;
        }
        self.cue(Cue::Eat);

        let (hunger, health) = item
            .food
            .map(|f| (f.hunger_restored, f.health_impact))
            .unwrap_or((self.tuning.default_hunger_restored, 0.0));
        let stats = &mut self.data.stats;
        stats.hunger += hunger;
        stats.health += health;
        stats.happiness += self.tuning.eat_happiness_bonus;
        stats.clamp();

        self.notify(format!("Ate {}!", item.name));
        self.save();
    }

    /// Wear or remove an owned wearable
    pub fn equip_toggle(&mut self, id: &str) -> EquipOutcome {
        let Some(item) = catalog::item(id) else {
            return EquipOutcome::NotOwned;
        };
        if item.is_food() {
            return EquipOutcome::NotWearable;
        }
        if !self.data.inventory.contains(item.id) {
            return EquipOutcome::NotOwned;
        }

        let outcome = self.data.appearance.toggle(item);
        match outcome {
            EquipOutcome::Equipped => self.notify(format!("Equipped {}", item.name)),
            EquipOutcome::Removed => self.notify(format!("Removed {}", item.name)),
            _ => return outcome,
        }
        self.cue(Cue::Pop);
        self.save();
        outcome
    }

    /// Hidden money button; returns true when the bonus pays out
    pub fn secret_tap(&mut self) -> bool {
        self.cue(Cue::Click);
        let now = self.now_ms;
        let window = self.tuning.secret_tap_window_ms;
        self.secret_taps.push(now);
        self.secret_taps.retain(|t| now - t < window);

        if self.secret_taps.len() < self.tuning.secret_tap_count {
            return false;
        }
        self.secret_taps.clear();
        let bonus = self.tuning.secret_tap_bonus;
        self.data.stats.money = self.data.stats.money.saturating_add(bonus);
        self.cue(Cue::Success);
        self.notify(format!("Secret bonus: +{bonus}"));
        log::info!("Secret bonus paid");
        self.save();
        true
    }

    /// Dispatch an inbound command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => {
                self.start();
            }
            Command::Retry => {
                self.retry();
            }
            Command::Exit => self.exit(),
            Command::MovePetLeft => self.move_pet_left(),
            Command::MovePetRight => self.move_pet_right(),
            Command::Jump => {
                self.jump();
            }
            Command::ConsumeItem { id } => {
                self.consume_item(&id);
            }
            Command::PurchaseItem { id } => {
                self.purchase_item(&id);
            }
            Command::EquipToggle { id } => {
                self.equip_toggle(&id);
            }
            Command::OpenView { view } => {
                self.open_view(view);
            }
            Command::SecretTap => {
                self.secret_tap();
            }
            Command::FinishShower => {
                self.finish_shower();
            }
        }
    }

    // === Side effects ===

    fn cue(&mut self, cue: Cue) {
        if !self.muted {
            self.audio.play(cue);
        }
    }

    fn notify(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("Notice: {message}");
        self.notices.push(message);
    }

    fn save(&mut self) {
        self.data.save(self.storage.as_mut());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::audio::{RecordingAudio, SilentAudio};
    use crate::persistence::{MemoryStorage, STATS_KEY};
    use crate::sim::FlightPhase;

    /// Counts writes; clones share the counter
    #[derive(Clone, Default)]
    struct CountingStorage {
        inner: MemoryStorage,
        writes: Rc<Cell<usize>>,
    }

    impl Storage for CountingStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) {
            self.writes.set(self.writes.get() + 1);
            self.inner.set_item(key, value);
        }
    }

    /// No random poops unless a test asks for them
    fn quiet_tuning() -> Tuning {
        Tuning {
            poop_chance: 0.0,
            ..Default::default()
        }
    }

    fn pet_with(tuning: Tuning) -> (Orchestrator, RecordingAudio) {
        let audio = RecordingAudio::new();
        let pet = Orchestrator::new(
            Box::new(MemoryStorage::new()),
            Box::new(audio.clone()),
            tuning,
            42,
        );
        (pet, audio)
    }

    fn pet() -> (Orchestrator, RecordingAudio) {
        pet_with(quiet_tuning())
    }

    #[test]
    fn test_purchase_stacks_food() {
        let (mut pet, audio) = pet();
        assert_eq!(pet.purchase_item("ff1"), PurchaseOutcome::Bought);
        assert_eq!(pet.purchase_item("ff1"), PurchaseOutcome::Bought);
        assert_eq!(pet.stats().money, 70);
        assert_eq!(pet.inventory().quantity("ff1"), 2);
        assert_eq!(audio.count(Cue::Coin), 2);
        assert_eq!(pet.drain_notices(), vec!["Bought Burger!", "Bought Burger!"]);
    }

    #[test]
    fn test_failed_purchase_changes_nothing() {
        let (mut pet, audio) = pet();
        assert_eq!(pet.purchase_item("bc_stripe"), PurchaseOutcome::Bought);
        let money = pet.stats().money;
        let inventory = pet.inventory().clone();

        assert_eq!(pet.purchase_item("ac_cap"), PurchaseOutcome::InsufficientFunds);
        assert_eq!(pet.stats().money, money);
        assert_eq!(pet.inventory(), &inventory);
        assert_eq!(audio.count(Cue::Crash), 1);
        assert_eq!(
            pet.drain_notices().last().map(String::as_str),
            Some("Not enough money!")
        );
    }

    #[test]
    fn test_duplicate_wearable_is_free_rejection() {
        let (mut pet, _) = pet();
        assert_eq!(pet.purchase_item("ac_cap"), PurchaseOutcome::Bought);
        assert_eq!(pet.purchase_item("ac_cap"), PurchaseOutcome::AlreadyOwned);
        assert_eq!(pet.stats().money, 50);
        assert_eq!(pet.inventory().quantity("ac_cap"), 1);
        assert_eq!(pet.purchase_item("nope"), PurchaseOutcome::UnknownItem);
    }

    #[test]
    fn test_purchase_persists() {
        let (mut pet, _) = pet();
        pet.purchase_item("hf5");
        let json = pet.storage().get_item(STATS_KEY).unwrap();
        let saved: PetStats = serde_json::from_str(&json).unwrap();
        assert_eq!(saved.money, 95);
    }

    #[test]
    fn test_feeding_sequence() {
        let (mut pet, audio) = pet();
        pet.purchase_item("ff1");
        pet.purchase_item("ff1");
        pet.open_view(View::Inventory);

        assert_eq!(pet.consume_item("ff1"), ConsumeOutcome::Started);
        assert_eq!(pet.view(), View::Home);
        assert_eq!(pet.feed_phase(), FeedPhase::Spawned);
        assert!(pet.snapshot().mouth_open);
        assert_eq!(pet.consume_item("ff1"), ConsumeOutcome::Busy);
        assert_eq!(pet.open_view(View::Shop), ViewChange::BlockedByFeeding);

        pet.advance(100.0);
        assert_eq!(pet.feed_phase(), FeedPhase::Moving);
        assert_eq!(pet.stats().hunger, 80.0);

        pet.advance(900.0);
        assert_eq!(pet.feed_phase(), FeedPhase::Chewing);
        assert_eq!(pet.stats().hunger, 100.0);
        assert_eq!(pet.stats().health, 95.0);
        assert_eq!(pet.stats().happiness, 85.0);
        assert_eq!(pet.inventory().quantity("ff1"), 1);
        assert_eq!(pet.mood(), Mood::Excited);
        assert_eq!(audio.count(Cue::Eat), 1);

        pet.advance(1_000.0);
        assert_eq!(pet.feed_phase(), FeedPhase::Done);
        pet.advance(500.0);
        assert_eq!(pet.feed_phase(), FeedPhase::Idle);
        assert!(pet.snapshot().feeding_item.is_none());
        assert_eq!(pet.open_view(View::Shop), ViewChange::Changed);
    }

    #[test]
    fn test_consume_guards() {
        let (mut pet, _) = pet();
        assert_eq!(pet.consume_item("hf1"), ConsumeOutcome::NotOwned);
        pet.purchase_item("bc2");
        assert_eq!(pet.consume_item("bc2"), ConsumeOutcome::NotFood);
        assert_eq!(pet.feed_phase(), FeedPhase::Idle);
    }

    #[test]
    fn test_equip_toggle() {
        let (mut pet, audio) = pet();
        assert_eq!(pet.equip_toggle("ac_cap"), EquipOutcome::NotOwned);
        pet.purchase_item("ac_cap");
        pet.drain_notices();

        assert_eq!(pet.equip_toggle("ac_cap"), EquipOutcome::Equipped);
        assert_eq!(pet.appearance().hat.as_deref(), Some("ac_cap"));
        assert_eq!(pet.equip_toggle("ac_cap"), EquipOutcome::Removed);
        assert!(pet.appearance().hat.is_none());
        assert_eq!(audio.count(Cue::Pop), 2);
        assert_eq!(pet.drain_notices(), vec!["Equipped Cap", "Removed Cap"]);
    }

    #[test]
    fn test_decay_runs_on_interval() {
        let (mut pet, _) = pet();
        pet.set_epoch_ms(1_000_000.0);
        pet.advance(9_999.0);
        assert_eq!(pet.stats().hunger, 80.0);
        pet.advance(1.0);
        assert!((pet.stats().hunger - 79.8).abs() < 1e-4);
        assert_eq!(pet.stats().last_update, 1_010_000.0);
    }

    #[test]
    fn test_decay_paused_in_minigames() {
        let (mut pet, _) = pet();
        pet.advance(9_000.0);
        pet.open_view(View::Shower);
        pet.advance(60_000.0);
        assert_eq!(pet.stats().hunger, 80.0);

        // The time banked before the minigame still counts
        pet.exit();
        pet.advance(1_000.0);
        assert!((pet.stats().hunger - 79.8).abs() < 1e-4);
    }

    #[test]
    fn test_poop_sequence() {
        let (mut pet, audio) = pet_with(Tuning {
            poop_chance: 1.0,
            ..Default::default()
        });
        pet.open_view(View::Shop);
        pet.advance(10_000.0);

        assert_eq!(pet.poop_phase(), PoopPhase::Squatting);
        assert_eq!(pet.view(), View::Home);
        assert_eq!(audio.count(Cue::Loose), 1);
        assert_eq!(pet.stats().poops, 0);

        pet.advance(2_000.0);
        assert_eq!(pet.poop_phase(), PoopPhase::Resolved);
        assert_eq!(pet.stats().poops, 1);
        assert!((pet.stats().hygiene - (80.0 - 0.15 - 20.0)).abs() < 1e-3);
        assert_eq!(pet.drain_notices(), vec!["Oops!"]);
    }

    #[test]
    fn test_minigame_cancels_pending_poop() {
        let (mut pet, _) = pet_with(Tuning {
            poop_chance: 1.0,
            ..Default::default()
        });
        pet.advance(10_000.0);
        assert_eq!(pet.pending_timers(), 1);

        pet.open_view(View::Work);
        assert_eq!(pet.pending_timers(), 0);
        assert_eq!(pet.poop_phase(), PoopPhase::Idle);
        pet.advance(5_000.0);
        assert_eq!(pet.stats().poops, 0);
    }

    #[test]
    fn test_work_reward() {
        let (mut pet, audio) = pet();
        pet.data.stats.job_id = 1;
        pet.data.stats.high_score = 5;
        pet.apply_work_reward(10);

        assert_eq!(pet.stats().money, 120);
        assert_eq!(pet.stats().high_score, 10);
        assert_eq!(pet.stats().job_id, 1);
        assert_eq!(pet.stats().happiness, 70.0);
        assert_eq!(audio.count(Cue::Coin), 1);
        assert_eq!(audio.count(Cue::Success), 0);
    }

    #[test]
    fn test_promotion() {
        let (mut pet, audio) = pet();
        pet.apply_work_reward(16);
        assert_eq!(pet.stats().money, 116);
        assert_eq!(pet.current_job().title, "Senior Dev");
        assert_eq!(audio.count(Cue::Success), 1);
        assert!(pet.drain_notices().contains(&"Promoted to Senior Dev!".to_string()));

        // A worse shift never demotes
        pet.apply_work_reward(1);
        assert_eq!(pet.stats().job_id, 2);
        assert_eq!(pet.stats().money, 120);
    }

    #[test]
    fn test_flight_exit_rules() {
        let (mut pet, _) = pet();

        // From the start screen: reported as zero
        pet.open_view(View::Work);
        pet.exit();
        assert_eq!(pet.view(), View::Home);
        assert_eq!(pet.stats().happiness, 70.0);

        // Mid-shift: abandoned, no reward
        pet.open_view(View::Work);
        assert!(pet.start());
        pet.advance(50.0);
        pet.exit();
        assert_eq!(pet.stats().happiness, 70.0);
        assert!(pet.flight().is_none());
    }

    #[test]
    fn test_catch_up_saves_once() {
        let storage = CountingStorage::default();
        let writes = storage.writes.clone();
        let mut pet = Orchestrator::new(
            Box::new(storage),
            Box::new(SilentAudio),
            quiet_tuning(),
            42,
        );
        // A day in a background tab arrives as one frame
        pet.advance(86_400_000.0);
        assert_eq!(pet.stats().hunger, 0.0);
        assert_eq!(writes.get(), 3);
    }

    #[test]
    fn test_mute_silences_cues() {
        let (mut pet, audio) = pet();
        pet.set_muted(true);
        pet.purchase_item("ff1");
        assert_eq!(audio.count(Cue::Coin), 0);
        assert!(pet.snapshot().muted);

        pet.set_muted(false);
        pet.purchase_item("ff1");
        assert_eq!(audio.count(Cue::Coin), 1);
    }

    #[test]
    fn test_flight_exit_pays_final_score() {
        let (mut pet, audio) = pet();
        pet.data.stats.job_id = 1;
        pet.data.stats.high_score = 5;
        pet.open_view(View::Work);
        pet.apply(Command::Start);
        pet.flight.as_mut().unwrap().score = 10;
        for _ in 0..300 {
            pet.advance(16.0);
        }
        assert_eq!(pet.flight().map(|f| f.phase), Some(FlightPhase::Ended));

        pet.apply(Command::Exit);
        assert_eq!(pet.view(), View::Home);
        assert_eq!(pet.stats().money, 120);
        assert_eq!(pet.stats().high_score, 10);
        assert_eq!(audio.count(Cue::Coin), 1);
    }

    #[test]
    fn test_flight_crash_then_exit() {
        let (mut pet, audio) = pet();
        pet.open_view(View::Work);
        pet.apply(Command::Start);
        // Free fall hits the floor well within five seconds
        for _ in 0..300 {
            pet.advance(16.0);
        }
        assert_eq!(audio.count(Cue::Crash), 1);
        pet.apply(Command::Exit);
        assert_eq!(pet.stats().high_score, 0);
        assert_eq!(pet.view(), View::Home);
    }

    #[test]
    fn test_retry_replaces_session() {
        let (mut pet, _) = pet();
        assert!(!pet.retry());
        pet.open_view(View::Work);
        pet.start();
        pet.advance(500.0);
        assert!(pet.retry());
        let flight = pet.flight().unwrap();
        assert_eq!(flight.steps, 0);
        assert!(flight.obstacles.is_empty());
        assert_eq!(pet.stats().money, 100);
    }

    #[test]
    fn test_play_reward() {
        let (mut pet, audio) = pet();
        pet.open_view(View::Play);
        assert!(pet.catch().is_some());
        pet.move_pet_left();
        assert_eq!(pet.catch().unwrap().actor_x, 30.0);

        pet.catch.as_mut().unwrap().score = 40;
        pet.exit();
        assert_eq!(pet.view(), View::Home);
        assert!(pet.catch().is_none());
        assert_eq!(pet.stats().happiness, 88.0);
        assert_eq!(pet.stats().hunger, 75.0);
        assert_eq!(audio.count(Cue::Powerup), 1);
        assert_eq!(pet.drain_notices(), vec!["Fun! +8 Happy"]);
    }

    #[test]
    fn test_shower() {
        let (mut pet, _) = pet();
        pet.data.stats.poops = 3;
        pet.data.stats.hygiene = 10.0;
        assert!(!pet.finish_shower());

        pet.open_view(View::Shower);
        assert!(pet.finish_shower());
        assert_eq!(pet.stats().hygiene, 100.0);
        assert_eq!(pet.stats().poops, 0);
        assert_eq!(pet.stats().happiness, 90.0);
        assert_eq!(pet.view(), View::Home);
    }

    #[test]
    fn test_secret_tap() {
        let (mut pet, audio) = pet();
        for _ in 0..4 {
            assert!(!pet.secret_tap());
            pet.advance(100.0);
        }
        assert!(pet.secret_tap());
        assert_eq!(pet.stats().money, 5_100);
        assert_eq!(audio.count(Cue::Click), 5);
        assert_eq!(audio.count(Cue::Success), 1);

        // Slow taps fall out of the window
        for _ in 0..10 {
            assert!(!pet.secret_tap());
            pet.advance(600.0);
        }
        assert_eq!(pet.stats().money, 5_100);
    }

    #[test]
    fn test_command_json() {
        let command: Command =
            serde_json::from_str(r#"{"command":"purchaseItem","id":"ff3"}"#).unwrap();
        assert_eq!(command, Command::PurchaseItem { id: "ff3".into() });
        let command: Command =
            serde_json::from_str(r#"{"command":"openView","view":"Shop"}"#).unwrap();
        assert_eq!(command, Command::OpenView { view: View::Shop });

        let (mut pet, _) = pet();
        pet.apply(command);
        assert_eq!(pet.view(), View::Shop);
    }

    #[test]
    fn test_snapshot_json() {
        let (mut pet, _) = pet();
        pet.open_view(View::Work);
        let value: serde_json::Value = serde_json::from_str(&pet.snapshot_json()).unwrap();
        assert_eq!(value["view"], "Work");
        assert_eq!(value["mood"], "Happy");
        assert_eq!(value["job"]["title"], "Intern");
        assert_eq!(value["flight"]["phase"], "Idle");
        assert_eq!(value["flight_tilt"], 0.0);
        assert_eq!(value["muted"], false);
        assert!(value["catch"].is_null());
    }
}
