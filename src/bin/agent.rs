// Serves an agent over stdin/stdout, one JSON request per line.
//
//   octospace-agent --agent greedy --side 0 [--load DIR] [--eval] [--device cpu|cuda]
//
// Logs go to stderr; stdout carries only actions.

use std::env;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use octospace::agents::{self, runner, AGENT_NAMES};
use octospace::game::Side;
use tracing::{error, info};

fn main() -> ExitCode {
    octospace::logging::init();

    let args: Vec<String> = env::args().collect();
    let name = arg_value(&args, "--agent").unwrap_or("greedy");
    let side = match arg_value(&args, "--side").unwrap_or("0").parse::<u8>() {
        Ok(i) => match Side::try_from(i) {
            Ok(side) => side,
            Err(_) => {
                eprintln!("--side must be 0 or 1.");
                return ExitCode::from(2);
            }
        },
        Err(_) => {
            eprintln!("--side must be 0 or 1.");
            return ExitCode::from(2);
        }
    };

    let mut agent = match agents::by_name(name, side) {
        Ok(Some(agent)) => agent,
        Ok(None) => {
            eprintln!("Unknown --agent '{}'; expected one of {:?}.", name, AGENT_NAMES);
            return ExitCode::from(2);
        }
        Err(e) => {
            eprintln!("Cannot build agent '{}': {e}", name);
            return ExitCode::FAILURE;
        }
    };

    if let Some(dir) = arg_value(&args, "--load") {
        if let Err(e) = agent.load(Path::new(dir)) {
            error!(dir, error = %e, "load failed");
            return ExitCode::FAILURE;
        }
    }
    if args.iter().any(|a| a == "--eval") {
        agent.eval();
    }
    if let Some(device) = arg_value(&args, "--device") {
        if let Err(msg) = place_on_device(agent.as_mut(), device) {
            eprintln!("{msg}");
            return ExitCode::from(2);
        }
    }

    info!(agent = agent.name(), %side, "serving");
    let stdin = io::stdin();
    match runner::run(agent.as_mut(), stdin.lock(), io::stdout().lock()) {
        Ok(steps) => {
            info!(steps, "input closed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "runner stopped");
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "rl-nn")]
fn place_on_device(agent: &mut dyn octospace::agents::Agent, device: &str) -> Result<(), String> {
    match device {
        "cpu" => agent.to_device(tch::Device::Cpu),
        "cuda" => agent.to_device(tch::Device::cuda_if_available()),
        other => return Err(format!("Unknown --device '{other}'; expected 'cpu' or 'cuda'.")),
    }
    Ok(())
}

#[cfg(not(feature = "rl-nn"))]
fn place_on_device(_agent: &mut dyn octospace::agents::Agent, device: &str) -> Result<(), String> {
    match device {
        "cpu" => Ok(()),
        other => Err(format!("--device '{other}' needs the 'rl-nn' feature.")),
    }
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
