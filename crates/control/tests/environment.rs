//! Properties every environment must satisfy, checked through the trait
//! object so the same loop runs all of them.

use control::{Acrobot, CartPole, EnvError, EnvKind, Environment, Episode, Frame, Pendulum};

fn all_envs() -> Vec<Box<dyn Environment>> {
    EnvKind::ALL.iter().map(|kind| kind.make().unwrap()).collect()
}

fn expected_observation(env: &dyn Environment, state: &[f32]) -> Vec<f32> {
    let mut observation = vec![0.0; env.descriptor().observation_size()];
    match env.descriptor().name() {
        "acrobot" => Acrobot::observe(state, &mut observation),
        "cartpole" => CartPole::observe(state, &mut observation),
        "pendulum" => Pendulum::observe(state, &mut observation),
        other => panic!("unexpected environment {other}"),
    }
    observation
}

#[test]
fn reset_starts_a_fresh_episode() {
    for env in all_envs() {
        let mut rng = fastrand::Rng::with_seed(1);
        let episode = env.reset(&mut rng).unwrap();
        let d = env.descriptor();
        assert_eq!(episode.step, 0);
        assert!(!episode.ended);
        assert!(!episode.terminated);
        assert_eq!(episode.state.len(), d.state_size());
        assert_eq!(episode.observation.len(), d.observation_size());
        assert_eq!(episode.observation, expected_observation(env.as_ref(), &episode.state));
    }
}

#[test]
fn reset_in_place_clears_a_finished_episode() {
    for env in all_envs() {
        let mut rng = fastrand::Rng::with_seed(2);
        let mut episode = env.reset(&mut rng).unwrap();
        episode.step = 42;
        episode.ended = true;
        episode.terminated = true;
        episode.reward = -3.0;
        env.reset_in_place(&mut rng, &mut episode).unwrap();
        assert_eq!(episode.step, 0);
        assert!(!episode.ended && !episode.terminated);
        assert_eq!(episode.reward, 0.0);
    }
}

#[test]
fn same_seed_reproduces_trajectory_and_frames() {
    for env in all_envs() {
        let run = |seed: u64| {
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut episode = env.reset(&mut rng).unwrap();
            let mut frames = Vec::new();
            let mut trajectory = vec![episode.clone()];
            while !episode.ended && episode.step < 60 {
                let action = env.descriptor().random_action(&mut rng);
                frames.push(env.render(&episode, &action).unwrap());
                env.step_in_place(&mut rng, &mut episode, &action).unwrap();
                trajectory.push(episode.clone());
            }
            (trajectory, frames)
        };
        assert_eq!(run(17), run(17), "{}", env.descriptor().name());
        assert_ne!(run(17).0, run(18).0, "{}", env.descriptor().name());
    }
}

#[test]
fn allocating_step_matches_in_place_bit_for_bit() {
    for env in all_envs() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut episode = env.reset(&mut rng).unwrap();
        for _ in 0..50 {
            let action = env.descriptor().random_action(&mut rng);
            let mut stream_a = fastrand::Rng::with_seed(99);
            let mut stream_b = fastrand::Rng::with_seed(99);
            let allocated = env.step(&mut stream_a, &episode, &action).unwrap();
            let mut in_place = episode.clone();
            env.step_in_place(&mut stream_b, &mut in_place, &action).unwrap();
            assert_eq!(allocated, in_place);
            for (a, b) in allocated.state.iter().zip(&in_place.state) {
                assert_eq!(a.to_bits(), b.to_bits());
            }
            assert_eq!(allocated.reward.to_bits(), in_place.reward.to_bits());
            if in_place.ended {
                break;
            }
            episode = in_place;
        }
    }
}

#[test]
fn flags_and_reward_are_consistent_through_whole_episodes() {
    for env in all_envs() {
        let mut rng = fastrand::Rng::with_seed(4);
        for _ in 0..3 {
            let mut episode = env.reset(&mut rng).unwrap();
            let mut last_step = episode.step;
            while !episode.ended {
                let action = env.descriptor().random_action(&mut rng);
                env.step_in_place(&mut rng, &mut episode, &action).unwrap();
                assert!(!episode.reward.is_nan());
                assert!(!episode.terminated || episode.ended);
                assert_eq!(episode.step, last_step + 1);
                assert_eq!(episode.observation, expected_observation(env.as_ref(), &episode.state));
                last_step = episode.step;
            }
            assert!(episode.step <= 500);
        }
    }
}

#[test]
fn discrete_environments_select_by_first_maximum() {
    for env in all_envs().into_iter().filter(|e| e.descriptor().action_space().is_discrete()) {
        let mut rng = fastrand::Rng::with_seed(5);
        let episode = env.reset(&mut rng).unwrap();
        let n = env.descriptor().action_size();
        for chosen in 0..n {
            let mut one_hot = vec![0.0; n];
            one_hot[chosen] = 1.0;
            // Raising every later slot to the same maximum must not change the choice.
            let mut tied = one_hot.clone();
            for slot in tied.iter_mut().skip(chosen) {
                *slot = 1.0;
            }
            let a = env.step(&mut rng, &episode, &one_hot).unwrap();
            let b = env.step(&mut rng, &episode, &tied).unwrap();
            assert_eq!(a, b, "{} index {chosen}", env.descriptor().name());
        }
    }
}

#[test]
fn mis_sized_buffers_are_rejected() {
    for env in all_envs() {
        let d = env.descriptor();
        let mut rng = fastrand::Rng::with_seed(6);
        let mut episode = env.reset(&mut rng).unwrap();
        let action = vec![0.0; d.action_size() + 1];
        assert!(matches!(
            env.step_in_place(&mut rng, &mut episode, &action),
            Err(EnvError::ActionSize { .. })
        ));

        let mut short = Episode::new(d);
        short.state.pop();
        assert!(matches!(env.reset_in_place(&mut rng, &mut short), Err(EnvError::StateSize { .. })));

        let mut frame = Frame::new(d.render_width() + 1, d.render_height()).unwrap();
        let action = vec![0.0; d.action_size()];
        assert!(matches!(
            env.render_in_place(&episode, &action, &mut frame),
            Err(EnvError::FrameSize { .. })
        ));
    }
}

#[test]
fn render_leaves_the_episode_untouched() {
    for env in all_envs() {
        let mut rng = fastrand::Rng::with_seed(7);
        let episode = env.reset(&mut rng).unwrap();
        let before = episode.clone();
        let action = env.descriptor().random_action(&mut rng);
        let mut frame = env.descriptor().new_frame().unwrap();
        env.render_in_place(&episode, &action, &mut frame).unwrap();
        assert_eq!(episode, before);
        assert_eq!(frame, env.render(&episode, &action).unwrap());
        assert_eq!(frame.as_bytes().len(), env.descriptor().render_width() * env.descriptor().render_height() * 3);
    }
}

#[test]
fn independent_episodes_run_on_separate_threads() {
    let envs = all_envs();
    let sequential: Vec<Vec<Episode>> = (0..4u64)
        .map(|seed| rollout(envs[(seed % 3) as usize].as_ref(), seed))
        .collect();
    let parallel: Vec<Vec<Episode>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4u64)
            .map(|seed| {
                let env = envs[(seed % 3) as usize].as_ref();
                scope.spawn(move || rollout(env, seed))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(sequential, parallel);
}

fn rollout(env: &dyn Environment, seed: u64) -> Vec<Episode> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut episode = env.reset(&mut rng).unwrap();
    let mut out = vec![episode.clone()];
    while !episode.ended {
        let action = env.descriptor().random_action(&mut rng);
        env.step_in_place(&mut rng, &mut episode, &action).unwrap();
        out.push(episode.clone());
    }
    out
}
