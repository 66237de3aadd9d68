//! Hot-path benchmarks: state encoding (runs once per enemy per tick) and a
//! full Double-DQN training step (runs every few ticks).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array1;

use ares::brain::DqnBrain;
use ares::config::BrainConfig;
use ares::encoder::{encode, CombatObservation, STATE_SIZE};
use ares::math::Vec2;
use ares::replay_buffer::Transition;

fn bench_encode(c: &mut Criterion) {
    let obs = CombatObservation {
        enemy_pos: Vec2::new(120.0, 340.0),
        player_pos: Vec2::new(500.0, 180.0),
        player_velocity: Vec2::new(90.0, -45.0),
        distance: 412.0,
        player_health_ratio: 0.7,
        enemy_health_ratio: 0.9,
    };

    c.bench_function("encode_state", |b| {
        b.iter(|| encode(black_box(&obs)))
    });
}

fn bench_choose_action(c: &mut Criterion) {
    let mut brain = DqnBrain::new(BrainConfig::default()).unwrap();
    brain.set_epsilon(0.0);
    let state = Array1::from_elem(STATE_SIZE, 0.3);

    c.bench_function("choose_action_greedy", |b| {
        b.iter(|| brain.choose_action(black_box(state.view())))
    });
}

fn bench_train_step(c: &mut Criterion) {
    let config = BrainConfig {
        min_replay_size: 500,
        ..BrainConfig::default()
    };
    let mut brain = DqnBrain::new(config).unwrap();

    for i in 0..1000 {
        brain.store(Transition {
            state: Array1::from_elem(STATE_SIZE, (i % 97) as f32 / 97.0),
            action: i % 8,
            reward: ((i % 13) as f32 - 6.0) / 6.0,
            next_state: Array1::from_elem(STATE_SIZE, ((i + 1) % 97) as f32 / 97.0),
            done: i % 50 == 0,
        });
    }

    c.bench_function("double_dqn_train_step", |b| {
        b.iter(|| brain.train_step().unwrap())
    });
}

criterion_group!(benches, bench_encode, bench_choose_action, bench_train_step);
criterion_main!(benches);
