#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;
    use ares::actions::Action;
    use ares::encoder::{encode, CombatObservation, STATE_SIZE};
    use ares::math::Vec2;
    use ares::replay_buffer::{ReplayBuffer, Transition};
    use ndarray::array;

    fn vec2_strategy(bound: f32) -> impl Strategy<Value = Vec2> {
        (-bound..bound, -bound..bound).prop_map(|(x, y)| Vec2::new(x, y))
    }

    proptest! {
        #[test]
        fn encoder_output_is_finite_and_bounded(
            enemy in vec2_strategy(5000.0),
            player in vec2_strategy(5000.0),
            velocity in vec2_strategy(1000.0),
            player_health in 0.0f32..=1.0,
            enemy_health in 0.0f32..=1.0,
        ) {
            let obs = CombatObservation {
                enemy_pos: enemy,
                player_pos: player,
                player_velocity: velocity,
                distance: (player - enemy).length(),
                player_health_ratio: player_health,
                enemy_health_ratio: enemy_health,
            };
            let state = encode(&obs);

            prop_assert_eq!(state.len(), STATE_SIZE);
            for &v in state.iter() {
                prop_assert!(v.is_finite());
                prop_assert!((-1.0..=1.0).contains(&v), "feature out of range: {}", v);
            }

            // One-hot groups stay one-hot for any input.
            let bucket_sum: f32 = (9..=12).map(|i| state[i]).sum();
            prop_assert_eq!(bucket_sum, 1.0);
            let moving_sum = state[13] + state[14];
            prop_assert_eq!(moving_sum, 1.0);
            prop_assert_eq!(state[15], 1.0);
        }

        #[test]
        fn encoder_is_deterministic(
            enemy in vec2_strategy(2000.0),
            player in vec2_strategy(2000.0),
            velocity in vec2_strategy(500.0),
        ) {
            let obs = CombatObservation {
                enemy_pos: enemy,
                player_pos: player,
                player_velocity: velocity,
                distance: (player - enemy).length(),
                player_health_ratio: 0.5,
                enemy_health_ratio: 0.5,
            };
            prop_assert_eq!(encode(&obs), encode(&obs));
        }

        #[test]
        fn buffer_respects_capacity_and_fifo(
            capacity in 1usize..=32,
            pushes in 1usize..=100,
        ) {
            let mut buffer = ReplayBuffer::new(capacity);
            for i in 0..pushes {
                buffer.push(Transition {
                    state: array![i as f32],
                    action: 0,
                    reward: i as f32,
                    next_state: array![i as f32 + 1.0],
                    done: false,
                });
                prop_assert!(buffer.len() <= capacity);
            }

            prop_assert_eq!(buffer.len(), pushes.min(capacity));

            // Survivors are exactly the most recent `capacity` pushes, in order.
            let first_kept = pushes.saturating_sub(capacity);
            let tags: Vec<f32> = buffer.iter().map(|t| t.reward).collect();
            let expected: Vec<f32> = (first_kept..pushes).map(|i| i as f32).collect();
            prop_assert_eq!(tags, expected);
        }

        #[test]
        fn steering_is_finite_and_bounded(
            enemy in vec2_strategy(3000.0),
            player in vec2_strategy(3000.0),
            speed in 0.0f32..500.0,
            phase in 0.0f32..100.0,
            action_index in 0usize..Action::COUNT,
        ) {
            let action = Action::from_index(action_index).unwrap();
            let v = action.steering(enemy, player, speed, phase);

            prop_assert!(v.x.is_finite() && v.y.is_finite());
            // RUSH is the fastest maneuver at 1.5x base speed.
            prop_assert!(v.length() <= 1.5 * speed + 1e-3);
        }
    }
}
