//! Command-line host for the simulator.
//!
//! Reads a JSON [`ScheduleRequest`] from a file (or stdin) and prints the
//! JSON response, or generates a random workload and simulates it.
//!
//! Logging goes to stderr; set `U_CPUSCHED_LOG` to `error`, `warn`, `info`,
//! `debug` or `trace` (default `warn`).

use std::io::{self, Read};
use std::process::ExitCode;

use log::{error, info, LevelFilter, Log, Metadata, Record};
use serde::Serialize;

use u_cpusched::api::{schedule, ErrorResponse, ScheduleRequest};
use u_cpusched::models::Algorithm;
use u_cpusched::workload::WorkloadGenerator;

const LOG_ENV: &str = "U_CPUSCHED_LOG";

const USAGE: &str = "\
usage: u-cpusched [REQUEST.json]
       u-cpusched --generate N --algorithm ALG [--quantum Q] [--seed S]

Reads a scheduling request (stdin when no file is given) and prints the
Gantt timeline, per-process metrics, and averages as JSON.

algorithms:";

fn usage() -> String {
    let mut text = USAGE.to_string();
    for algorithm in Algorithm::ALL {
        let line = format!("\n  {:<5} {}", algorithm.as_str(), algorithm.description());
        text.push_str(&line);
    }
    text
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging() {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Request { path: Option<String> },
    Generate {
        count: usize,
        seed: u64,
        algorithm: String,
        quantum: Option<i64>,
    },
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut path = None;
    let mut count = None;
    let mut seed = 42;
    let mut algorithm = None;
    let mut quantum = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let arg = arg.as_str();
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("missing value for {name}"))
        };
        match arg {
            "-h" | "--help" => return Ok(Command::Help),
            "--generate" => count = Some(parse_number(&value(arg)?, arg)?),
            "--seed" => seed = parse_number(&value(arg)?, arg)?,
            "--algorithm" => algorithm = Some(value(arg)?),
            "--quantum" => quantum = Some(parse_number(&value(arg)?, arg)?),
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            file => {
                if path.replace(file.to_string()).is_some() {
                    return Err("only one request file may be given".to_string());
                }
            }
        }
    }

    match count {
        Some(count) => {
            if path.is_some() {
                return Err("--generate cannot be combined with a request file".to_string());
            }
            let algorithm = algorithm.ok_or("--generate requires --algorithm")?;
            Ok(Command::Generate {
                count,
                seed,
                algorithm,
                quantum,
            })
        }
        None if algorithm.is_some() || quantum.is_some() => {
            Err("--algorithm and --quantum are only valid with --generate".to_string())
        }
        None => Ok(Command::Request { path }),
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, name: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("invalid value '{raw}' for {name}"))
}

fn read_request(path: Option<&str>) -> Result<ScheduleRequest, String> {
    let raw = match path {
        Some(path) => {
            std::fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("cannot read stdin: {e}"))?;
            buf
        }
    };
    serde_json::from_str(&raw).map_err(|e| format!("invalid request JSON: {e}"))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

fn run(command: Command) -> Result<ExitCode, String> {
    let request = match command {
        Command::Help => {
            println!("{}", usage());
            return Ok(ExitCode::SUCCESS);
        }
        Command::Request { path } => read_request(path.as_deref())?,
        Command::Generate {
            count,
            seed,
            algorithm,
            quantum,
        } => {
            info!("generating {count} processes with seed {seed}");
            ScheduleRequest {
                algorithm,
                processes: WorkloadGenerator::new(count).with_seed(seed).generate(),
                quantum,
            }
        }
    };

    match schedule(&request) {
        Ok(response) => {
            print_json(&response)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!("{err}");
            print_json(&ErrorResponse::from(&err))?;
            Ok(ExitCode::from(1))
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let result = parse_args(&args).and_then(run);
    match result {
        Ok(code) => code,
        Err(message) => {
            eprintln!("error: {message}\n\n{}", usage());
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_request_file() {
        assert_eq!(
            parse_args(&args(&["req.json"])).unwrap(),
            Command::Request {
                path: Some("req.json".into())
            }
        );
        assert_eq!(
            parse_args(&args(&[])).unwrap(),
            Command::Request { path: None }
        );
    }

    #[test]
    fn test_parse_generate() {
        let cmd = parse_args(&args(&[
            "--generate", "8", "--algorithm", "RR", "--quantum", "3", "--seed", "5",
        ]))
        .unwrap();
        assert_eq!(
            cmd,
            Command::Generate {
                count: 8,
                seed: 5,
                algorithm: "RR".into(),
                quantum: Some(3),
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["--generate", "x", "--algorithm", "RR"])).is_err());
        assert!(parse_args(&args(&["--generate", "3"])).is_err());
        assert!(parse_args(&args(&["--quantum"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
        assert!(parse_args(&args(&["a.json", "b.json"])).is_err());
        assert!(parse_args(&args(&["--algorithm", "FCFS"])).is_err());
    }

    #[test]
    fn test_usage_lists_algorithms() {
        let text = usage();
        assert!(text.contains("RR    Round-Robin"));
        assert!(text.contains("SRTF  Shortest Remaining Time First"));
    }

    #[test]
    fn test_parse_help() {
        assert_eq!(parse_args(&args(&["--help"])).unwrap(), Command::Help);
    }
}
