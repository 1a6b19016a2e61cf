use octospace::agents::{self, runner, Agent, DummyAgent, GreedyAgent, RandomAgent, AGENT_NAMES};
use octospace::features::{FeatureConfig, FeatureExtractor, FEATURE_DIM};
use octospace::game::{Action, ActionType, Direction, Observation, Side, StepInfo};
use octospace::rl::{decode, encode, ACTION_COUNT};

const OPENING: &str = r#"{
    "allied_ships": [[0, 10, 10, 100, 0, 0], [1, 14, 10, 100, 0, 0]],
    "enemy_ships": [[0, 19, 10, 100, 0, 0]],
    "planets_occupation": [[9, 9, 0], [40, 10, -1], [90, 90, 100]],
    "resources": [25]
}"#;

fn opening() -> Observation {
    serde_json::from_str(OPENING).unwrap()
}

#[test]
fn every_agent_commands_each_allied_ship() {
    let obs = opening();
    for name in AGENT_NAMES {
        let mut agent = agents::by_name(name, Side::Left).unwrap().unwrap();
        let action = agent.get_action(&obs, None).unwrap();
        let mut ids: Vec<u32> = action.ships_actions.iter().map(|a| a.ship_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1], "{name}");
        assert_eq!(action.construction, 1, "{name}");
    }
}

#[test]
fn dummy_agent_output_matches_wire_format() {
    let action = DummyAgent::new(Side::Left).get_action(&opening(), None).unwrap();
    let json = serde_json::to_value(&action).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"ships_actions": [[0, 0, 0, 3], [1, 0, 0, 3]], "construction": 1})
    );
}

#[test]
fn greedy_agent_fires_and_advances() {
    let mut agent = GreedyAgent::greedy(Side::Left, FeatureConfig::default());
    let action = agent.get_action(&opening(), None).unwrap();

    // ship 1 sits 5 cells from the enemy on the same row
    let ship1 = action.for_ship(1).unwrap();
    assert_eq!(ship1.action_type, ActionType::Fire);
    assert_eq!(ship1.direction, Direction::Right);

    // ship 0 is out of range and heads for the free planet
    let ship0 = action.for_ship(0).unwrap();
    assert_eq!(ship0.action_type, ActionType::Move);
    assert_eq!(ship0.direction, Direction::Right);
}

#[test]
fn random_agent_stays_inside_action_table() {
    let mut agent = RandomAgent::random(Side::Right);
    let obs = opening();
    for _ in 0..50 {
        for cmd in agent.get_action(&obs, None).unwrap().ships_actions {
            assert!(encode(&cmd) < ACTION_COUNT);
            assert_eq!(decode(encode(&cmd), cmd.ship_id).unwrap(), cmd);
        }
    }
}

#[test]
fn feedback_step_is_accepted() {
    let obs = opening();
    let mut agent = GreedyAgent::greedy(Side::Left, FeatureConfig::default());
    let first = agent.get_action(&obs, None).unwrap();
    let info = StepInfo {
        reward: 0,
        terminated: false,
        prev_obs: obs.clone(),
        actions: first,
    };
    let second = agent.get_action(&obs, Some(&info)).unwrap();
    assert_eq!(second.ships_actions.len(), 2);
}

#[test]
fn features_for_both_sides_have_fixed_length() {
    let obs = opening();
    for side in [Side::Left, Side::Right] {
        let mut fx = FeatureExtractor::new(side, FeatureConfig::default());
        for (_, f) in fx.extract_all(&obs) {
            assert_eq!(f.len(), FEATURE_DIM);
            assert!(f.iter().all(|v| v.is_finite()));
        }
    }
}

#[test]
fn runner_round_trip_over_json_lines() {
    let request = serde_json::json!({ "obs": serde_json::from_str::<serde_json::Value>(OPENING).unwrap() });
    let input = format!("{request}\n{request}\n");
    let mut out = Vec::new();
    let mut agent = GreedyAgent::greedy(Side::Left, FeatureConfig::default());
    assert_eq!(runner::run(&mut agent, input.as_bytes(), &mut out).unwrap(), 2);

    let replies: Vec<Action> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0], replies[1]);
}
