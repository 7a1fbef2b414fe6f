//! CLI: replay a recorded editor session against an exercise and execute the resulting program.
//!
//! Usage: `run_exercise [OPTIONS]`
//! Example: run_exercise --exercise blockly2d:3
//!
//! Without `--events` the exercise's default program (or a bare entry block) is executed.
//! Exits with status 1 when the attempt does not reach the goal.
//!
//! Set RUST_LOG=robot_navigation=trace for per-action events.

use chrono::Utc;
use clap::Parser;
use robot_navigation::exercise_io::{load_events, load_exercise};
use robot_navigation::{ExerciseSession, Feedback, RunOptions, builtin_exercises, find_exercise};
use std::env;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_EXERCISE: &str = "blockly2d:0";

/// Replay and execute one robot-navigation exercise.
#[derive(Parser, Debug)]
#[command(name = "run_exercise")]
#[command(
  after_help = r#"Environment variables (override flags when set):
  NAVIGATOR_MAX_STEPS   Step ceiling for one attempt (default 10000).

Examples:
  run_exercise --list
  run_exercise --exercise blockly2d:3
  run_exercise --exercise-file my_map.json --events session.json --json"#
)]
struct Args {
  /// Built-in exercise url.
  #[arg(long, value_name = "URL", default_value = DEFAULT_EXERCISE, conflicts_with = "exercise_file")]
  exercise: String,

  /// Exercise definition file (JSON) instead of a built-in exercise.
  #[arg(long, value_name = "PATH")]
  exercise_file: Option<PathBuf>,

  /// Recorded editor events (JSON array) to replay before executing.
  #[arg(long, value_name = "PATH")]
  events: Option<PathBuf>,

  /// Step ceiling for one attempt. Overridden by NAVIGATOR_MAX_STEPS if set.
  #[arg(long, value_name = "N")]
  max_steps: Option<usize>,

  /// Print the session record as JSON.
  #[arg(long)]
  json: bool,

  /// List built-in exercises and exit.
  #[arg(long)]
  list: bool,
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  if args.list {
    for ex in builtin_exercises() {
      println!("{}\t{} ideal blocks", ex.url, ex.ideal_blocks);
    }
    return;
  }

  // Env var overrides the flag.
  let max_steps = match env::var("NAVIGATOR_MAX_STEPS").ok() {
    Some(v) => match v.trim().parse::<usize>() {
      Ok(n) => Some(n),
      Err(e) => {
        eprintln!("Invalid NAVIGATOR_MAX_STEPS {:?}: {}", v, e);
        process::exit(2);
      }
    },
    None => args.max_steps,
  };
  let mut options = RunOptions::default();
  if let Some(n) = max_steps {
    options.max_steps = n;
  }
  info!(max_steps = options.max_steps, "options (env or flags)");

  let exercise = match &args.exercise_file {
    Some(path) => load_exercise(path),
    None => find_exercise(&args.exercise),
  };
  let exercise = match exercise {
    Ok(ex) => ex,
    Err(e) => {
      eprintln!("Error loading exercise: {}", e);
      process::exit(1);
    }
  };

  let events = match &args.events {
    Some(path) => match load_events(path) {
      Ok(ev) => ev,
      Err(e) => {
        eprintln!("Error reading events {}: {}", path.display(), e);
        process::exit(1);
      }
    },
    None => Vec::new(),
  };

  let loaded_at = events.first().map(|e| e.at).unwrap_or_else(Utc::now);
  let mut session = match ExerciseSession::load(exercise, options, loaded_at) {
    Ok(s) => s,
    Err(e) => {
      eprintln!("Error loading exercise: {}", e);
      process::exit(1);
    }
  };
  for event in &events {
    session.handle_timed(event);
  }

  let executed_at = events.last().map(|e| e.at).unwrap_or_else(Utc::now);
  let report = session.execute(executed_at);
  info!(attempt = report.attempt, verdict = %report.result.verdict, "attempt executed");

  let ops: Vec<String> = report
    .result
    .operations
    .iter()
    .map(|o| o.action.to_string())
    .collect();
  println!("Exercise: {}", session.exercise().url);
  println!("  Program: {}", report.fingerprint);
  println!("  Operations: [{}]", ops.join(", "));
  println!("  Verdict: {}", report.result.verdict);
  if let Some(err) = &report.result.error {
    println!("  Error: {}", err);
  }

  let (record, summary) = session.finish(executed_at);
  if report.feedback == Feedback::Success {
    println!("{}", summary);
  }
  if args.json {
    match serde_json::to_string_pretty(&record) {
      Ok(json) => println!("{}", json),
      Err(e) => {
        eprintln!("Error serializing record: {}", e);
        process::exit(1);
      }
    }
  }
  if report.feedback != Feedback::Success {
    process::exit(1);
  }
}
