//! # Session Replay
//!
//! Command-line tool that replays a recorded session and prints what the
//! card answered.
//!
//! ```text
//! session_replay <session.sdrp> [--config game.toml] [--verbose]
//! session_replay --script <out.sdrp> <keys>
//! ```
//!
//! `--script` writes a session that sends INIT, then one INPUT followed
//! by one UPDATE per key, then GET_STATUS.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

use simdoom::{CommandDispatcher, SessionLog};
use simdoom_shared::{Command, StatusRecord, StatusWord};
use simdoom_sim::GameConfig;

fn main() {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         SIMDOOM SESSION REPLAY                                   ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        println!("Usage: session_replay <session.sdrp> [--config <game.toml>] [--verbose]");
        println!("       session_replay --script <out.sdrp> <keys>");
        return;
    }

    if args[1] == "--script" {
        match (args.get(2), args.get(3)) {
            (Some(path), Some(keys)) => write_script(path, keys),
            _ => println!("Usage: session_replay --script <out.sdrp> <keys>"),
        }
        return;
    }

    let session_path = &args[1];
    let verbose = args.iter().any(|a| a == "--verbose");
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1));

    let config = match config_path {
        Some(path) => match GameConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                println!("Error: Could not load config: {e}");
                return;
            }
        },
        None => GameConfig::default(),
    };

    let mut dispatcher = match CommandDispatcher::with_config(config) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            println!("Error: Invalid config: {e}");
            return;
        }
    };

    println!("Loading session: {session_path}");
    let log = match File::open(session_path)
        .map_err(simdoom::ReplayError::from)
        .and_then(|file| SessionLog::load(&mut BufReader::new(file)))
    {
        Ok(log) => log,
        Err(e) => {
            println!("Error: Could not load session: {e}");
            return;
        }
    };

    let statuses = log.replay(&mut dispatcher);
    let failures = statuses.iter().filter(|s| !s.is_success()).count();

    println!();
    println!("┌─ REPLAY RESULTS ───────────────────────────────────────────────┐");
    println!("│ Records:            {}", log.len());
    println!("│ Failed:             {failures}");
    println!("│ Arena high water:   {} bytes", dispatcher.arena_high_water());
    if verbose {
        for (i, (record, status)) in log.records().zip(&statuses).enumerate() {
            println!("│  #{i:<4} {record:02X?} -> {status}");
        }
    }
    println!("└────────────────────────────────────────────────────────────────┘");
    println!();

    let status = dispatcher.process(&Command::GetStatus.to_bytes()).to_vec();
    match (StatusWord::from_response(&status), StatusRecord::from_bytes(&status)) {
        (Some(word), Some(record)) if word.is_success() => {
            println!(
                "HP {}  AMMO {}  LEVEL {}  {}",
                record.health,
                record.ammo,
                record.level,
                match (record.game_over, record.victory) {
                    (0, _) => "IN PROGRESS",
                    (_, 0) => "DEAD",
                    _ => "VICTORY",
                }
            );
        }
        _ => println!("No game in progress at end of session"),
    }

    if let Some(state) = dispatcher.state() {
        println!();
        println!("{}", state.screen.to_text());
    }
}

fn write_script(path: &str, keys: &str) {
    let mut log = SessionLog::new();
    let mut commands = vec![Command::Init];
    for key in keys.bytes() {
        commands.push(Command::Input { key });
        commands.push(Command::Update);
    }
    commands.push(Command::GetStatus);

    for command in commands {
        if let Err(e) = log.push(&command.to_bytes()) {
            println!("Error: {e}");
            return;
        }
    }

    let result = File::create(path)
        .map_err(simdoom::ReplayError::from)
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            log.save(&mut writer)?;
            writer.flush().map_err(simdoom::ReplayError::from)
        });
    match result {
        Ok(()) => println!("Wrote {} records to {path}", log.len()),
        Err(e) => println!("Error: Could not write session: {e}"),
    }
}
