// Posts a file to the competition server.
//
//   submit --endpoint task-4 --file weights.pt [--url host:port] [--token TOKEN]
//
// `--url` and `--token` fall back to OCTOSPACE_SUBMIT_URL / OCTOSPACE_TOKEN.

use std::env;
use std::process::ExitCode;

use octospace::submit::{submit, Endpoint, SubmitConfig, Submission};

fn main() -> ExitCode {
    octospace::logging::init();

    let args: Vec<String> = env::args().collect();
    let Some(file) = arg_value(&args, "--file") else {
        eprintln!("Missing --file <path>.");
        return ExitCode::from(2);
    };

    let endpoint = match (arg_value(&args, "--endpoint"), arg_value(&args, "--field")) {
        (Some(path), Some(field)) => Endpoint::Custom {
            path: path.to_string(),
            field: field.to_string(),
        },
        (Some(name), None) => match Endpoint::from_name(name) {
            Some(e) => e,
            None => {
                eprintln!(
                    "Unknown --endpoint '{}'; expected 'extra-task-trumpf' or 'task-4' (or pass --field for a custom route).",
                    name
                );
                return ExitCode::from(2);
            }
        },
        (None, _) => Endpoint::Task4,
    };

    let base_url = arg_value(&args, "--url")
        .map(str::to_string)
        .or_else(|| env::var(octospace::submit::URL_ENV).ok());
    let token = arg_value(&args, "--token")
        .map(str::to_string)
        .or_else(|| env::var(octospace::submit::TOKEN_ENV).ok());
    let (Some(base_url), Some(token)) = (base_url, token) else {
        eprintln!("Missing server URL or token; pass --url and --token or set the environment.");
        return ExitCode::from(2);
    };
    let config = SubmitConfig::new(base_url, token);

    match submit(&config, &Submission::new(endpoint, file)) {
        Ok(resp) => {
            println!("{} {}", resp.status, resp.body);
            if resp.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Submission failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
