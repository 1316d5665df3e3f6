//! Scripted-run CLI: replay a JSON list of inputs against a level file and
//! report the final state. Useful for reproducing sessions and checking
//! determinism across builds.
//!
//! The script is a JSON array of `Input` values, e.g.
//! `[{"Move":"Right"},"Wait",{"Search":{"screen":{"y":0,"x":96}}},"Quit"]`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use game_core::{Game, Input, SharedViewport, Step, load_level};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the level text file
    #[arg(short, long)]
    level: PathBuf,

    /// Path to the JSON input script
    #[arg(short, long)]
    script: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = load_level(&args.level)
        .with_context(|| format!("failed to load level {}", args.level.display()))?;
    let script_text = fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script {}", args.script.display()))?;
    let script: Vec<Input> =
        serde_json::from_str(&script_text).context("failed to parse input script JSON")?;

    let (mut game, _views, _inputs) = Game::new(level, 0, SharedViewport::default());

    let mut applied = 0usize;
    for input in script {
        applied += 1;
        if game.step(input) == Step::Terminated {
            break;
        }
    }

    for event in &game.level().events {
        println!("> {event}");
    }

    let player = &game.level().player.actor;
    println!("Inputs applied: {applied}");
    println!("Player: ({}, {}) hp {} alive {}", player.pos.x, player.pos.y, player.hp, player.alive);
    println!("Monsters remaining: {}", game.level().monsters.len());
    println!("Snapshot hash: {}", game.level().snapshot_hash());

    Ok(())
}
