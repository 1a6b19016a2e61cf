// Demonstration: drive the bundled agents through a short scripted episode.
//
// Build/run from this repo root:
//   cargo run --example agent_demo -- --agent greedy --steps 5

use std::env;

use octospace::agents::{self, AGENT_NAMES};
use octospace::features::{FeatureConfig, FeatureExtractor};
use octospace::game::{Action, Observation, PlanetState, ShipState, Side, StepInfo};

fn main() {
    octospace::logging::init();

    let args: Vec<String> = env::args().collect();
    let name = arg_value(&args, "--agent").unwrap_or("greedy");
    let steps: usize = arg_value(&args, "--steps")
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);

    let mut agent = match agents::by_name(name, Side::Left) {
        Ok(Some(agent)) => agent,
        Ok(None) => {
            eprintln!("Unknown --agent '{}'; expected one of {:?}.", name, AGENT_NAMES);
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("Cannot build agent '{}': {}", name, e);
            std::process::exit(1);
        }
    };

    let mut extractor = FeatureExtractor::new(Side::Left, FeatureConfig::default());
    let mut obs = opening();
    let mut info: Option<StepInfo> = None;

    for step in 0..steps {
        let action = match agent.get_action(&obs, info.as_ref()) {
            Ok(a) => a,
            Err(e) => {
                eprintln!("step {}: {}", step, e);
                std::process::exit(1);
            }
        };
        println!("step {:>2}: {}", step, describe(&action));
        if let Some(f) = extractor.extract(&obs, 0) {
            println!("         ship 0 features: {:.2?}", &f[..6]);
        }

        let next = advance(&obs, &action);
        info = Some(StepInfo {
            reward: 0,
            terminated: false,
            prev_obs: obs,
            actions: action,
        });
        obs = next;
    }
    println!("Agent: {}", agent.name());
}

fn opening() -> Observation {
    Observation {
        allied_ships: vec![ShipState::new(0, 10, 10, 100), ShipState::new(1, 12, 8, 100)],
        enemy_ships: vec![ShipState::new(0, 88, 88, 100)],
        planets_occupation: vec![
            PlanetState::new(9, 9, 0),
            PlanetState::new(30, 12, -1),
            PlanetState::new(55, 50, -1),
            PlanetState::new(90, 90, 100),
        ],
        resources: 10,
        map: None,
    }
}

// Toy stand-in for the external simulator: applies moves, ignores combat.
fn advance(obs: &Observation, action: &Action) -> Observation {
    let mut next = obs.clone();
    for ship in &mut next.allied_ships {
        if let Some(cmd) = action.for_ship(ship.id) {
            if cmd.action_type == octospace::game::ActionType::Move {
                let (dx, dy) = cmd.direction.delta();
                let speed = cmd.speed as i32;
                ship.position.x = (ship.position.x + dx * speed).clamp(0, 99);
                ship.position.y = (ship.position.y + dy * speed).clamp(0, 99);
            }
        }
    }
    next
}

fn describe(action: &Action) -> String {
    action
        .ships_actions
        .iter()
        .map(|a| format!("#{} {:?} {:?} x{}", a.ship_id, a.action_type, a.direction, a.speed))
        .collect::<Vec<_>>()
        .join(", ")
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
