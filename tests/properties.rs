use pocket_pet::audio::SilentAudio;
use pocket_pet::persistence::{MemoryStorage, SaveData};
use pocket_pet::sim::decay::{apply_tick, resolve_poop};
use pocket_pet::sim::flight::{
    ACTOR_BOUNDARY_HEIGHT, FlightPhase, FlightSession, START_Y, WORLD_HEIGHT,
};
use pocket_pet::sim::{Appearance, Inventory, JobLadder, Orchestrator, PetStats, View};
use pocket_pet::{Storage, Tuning};
use proptest::prelude::*;

fn arb_stats() -> impl Strategy<Value = PetStats> {
    (
        0.0f32..=100.0,
        0.0f32..=100.0,
        0.0f32..=100.0,
        0.0f32..=100.0,
        0u64..1_000_000,
        0u32..100,
        0.0f32..50.0,
        0u8..=3,
    )
        .prop_map(
            |(hunger, hygiene, happiness, health, money, high_score, age, poops)| PetStats {
                hunger,
                hygiene,
                happiness,
                health,
                money,
                job_id: JobLadder::standard().eligible(high_score).id,
                high_score,
                last_update: 0.0,
                age,
                poops,
            },
        )
}

fn fresh_pet(tuning: Tuning, seed: u64) -> Orchestrator {
    Orchestrator::new(
        Box::new(MemoryStorage::new()),
        Box::new(SilentAudio),
        tuning,
        seed,
    )
}

fn in_range(value: f32) -> bool {
    (0.0..=100.0).contains(&value)
}

proptest! {
    #[test]
    fn decay_keeps_stats_bounded(
        mut stats in arb_stats(),
        ticks in 0usize..500,
        poops in 0usize..6,
    ) {
        let tuning = Tuning::default();
        for i in 0..ticks {
            if i < poops {
                resolve_poop(&mut stats, &tuning);
            }
            apply_tick(&mut stats, &tuning);
            prop_assert!(in_range(stats.hunger));
            prop_assert!(in_range(stats.hygiene));
            prop_assert!(in_range(stats.happiness));
            prop_assert!(in_range(stats.health));
            prop_assert!(stats.poops <= 3);
        }
    }

    #[test]
    fn orchestrator_never_exceeds_three_poops(seed in any::<u64>(), chance in 0.0f32..=1.0) {
        let tuning = Tuning { poop_chance: chance, ..Default::default() };
        let mut pet = fresh_pet(tuning, seed);
        for _ in 0..200 {
            pet.advance(5_000.0);
            prop_assert!(pet.stats().poops <= 3);
            prop_assert!(in_range(pet.stats().hygiene));
        }
    }

    #[test]
    fn promotion_is_monotonic(scores in prop::collection::vec(0u32..80, 1..40)) {
        let mut pet = fresh_pet(Tuning::default(), 7);
        let mut last_job = pet.stats().job_id;
        let mut last_high = pet.stats().high_score;
        for score in scores {
            pet.apply_work_reward(score);
            let stats = pet.stats();
            prop_assert!(stats.job_id >= last_job);
            prop_assert!(stats.high_score >= last_high);
            prop_assert_eq!(stats.job_id, pet.ladder().eligible(stats.high_score).id);
            last_job = stats.job_id;
            last_high = stats.high_score;
        }
    }

    #[test]
    fn save_round_trip_is_lossless(
        stats in arb_stats(),
        items in prop::collection::vec(0usize..15, 0..20),
        wear_cap in any::<bool>(),
    ) {
        let mut inventory = Inventory::new();
        for index in items {
            inventory.add(pocket_pet::sim::CATALOG[index].id);
        }
        let appearance = Appearance {
            hat: wear_cap.then(|| "ac_cap".to_string()),
            ..Default::default()
        };
        let data = SaveData { stats, inventory, appearance };

        let mut storage = MemoryStorage::new();
        data.save(&mut storage);
        prop_assert_eq!(SaveData::load(&storage), data);
    }

    #[test]
    fn corrupt_blobs_load_as_defaults(garbage in ".{0,40}") {
        let mut storage = MemoryStorage::new();
        storage.set_item(pocket_pet::persistence::STATS_KEY, &garbage);
        storage.set_item(pocket_pet::persistence::INVENTORY_KEY, &garbage);
        let data = SaveData::load(&storage);
        prop_assert!(in_range(data.stats.hunger));
        prop_assert!(data.stats.poops <= 3);
    }

    #[test]
    fn failed_purchase_leaves_state_unchanged(first in 0usize..15, second in 0usize..15) {
        let mut pet = fresh_pet(Tuning::default(), 1);
        pet.purchase_item(pocket_pet::sim::CATALOG[first].id);
        let money = pet.stats().money;
        let inventory = pet.inventory().clone();

        let item = &pocket_pet::sim::CATALOG[second];
        if item.cost > money {
            pet.purchase_item(item.id);
            prop_assert_eq!(pet.stats().money, money);
            prop_assert_eq!(pet.inventory(), &inventory);
        }
    }

    #[test]
    fn flight_free_fall_descends_until_boundary(seed in any::<u64>()) {
        let mut session = FlightSession::new(seed);
        prop_assert!(session.start());
        let mut last_y = session.y;
        while session.phase == FlightPhase::Running {
            session.step();
            if session.phase == FlightPhase::Running {
                prop_assert!(session.y > last_y);
                last_y = session.y;
            }
        }
        prop_assert!(session.y > WORLD_HEIGHT - ACTOR_BOUNDARY_HEIGHT);
        prop_assert_eq!(session.score, 0);
    }
}

#[test]
fn flight_zero_steps_is_unchanged() {
    let mut session = FlightSession::new(3);
    session.start();
    session.advance(0.0);
    assert_eq!(session.y, START_Y);
    assert_eq!(session.velocity, 0.0);
    assert_eq!(session.steps, 0);
}

#[test]
fn orchestrator_starts_home() {
    let pet = fresh_pet(Tuning::default(), 0);
    assert_eq!(pet.view(), View::Home);
}
