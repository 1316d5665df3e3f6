//! Interactive text front-end over the simulation core.
//!
//! Commands on stdin, one per line:
//! - `w` / `a` / `s` / `d`: move, `.`: wait
//! - `x <screen_x> <screen_y>`: search at a screen-space point
//! - `c <view>`: close the given view (0-based)
//! - `q`: quit
//!
//! One consumer thread runs per view, printing every snapshot it receives.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc::SyncSender;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use game_core::{Dir, Game, Input, Pos, SharedViewport, ViewHandle, ViewId, load_level};

mod render;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the level text file
    #[arg(short, long)]
    level: PathBuf,

    /// Number of views to open
    #[arg(short, long, default_value_t = 1)]
    views: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = load_level(&args.level)
        .with_context(|| format!("failed to load level {}", args.level.display()))?;

    let (mut game, handles, input_tx) = Game::new(level, args.views, SharedViewport::default());
    let view_ids: Vec<ViewId> = handles.iter().map(|handle| handle.id).collect();

    let mut consumers = Vec::new();
    for (index, handle) in handles.into_iter().enumerate() {
        consumers.push(thread::spawn(move || view_loop(index, handle)));
    }
    thread::spawn(move || input_loop(&view_ids, &input_tx));

    game.run();
    drop(game); // closes the remaining view channels so consumers exit
    for consumer in consumers {
        let _ = consumer.join();
    }
    Ok(())
}

fn view_loop(index: usize, handle: ViewHandle) {
    while let Ok(snapshot) = handle.levels.recv() {
        print!("{}", render::render(&format!("view {index}"), &snapshot));
    }
}

fn input_loop(view_ids: &[ViewId], input_tx: &SyncSender<Input>) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let Some(input) = parse_command(view_ids, &line) else {
            eprintln!("unrecognized command: {line}");
            continue;
        };
        let quit = input == Input::Quit;
        if input_tx.send(input).is_err() || quit {
            return; // engine is gone or going
        }
    }
    // stdin closed: ask the engine to stop rather than leaving it blocked.
    let _ = input_tx.send(Input::Quit);
}

fn parse_command(view_ids: &[ViewId], line: &str) -> Option<Input> {
    let mut parts = line.split_whitespace();
    let input = match parts.next()? {
        "w" => Input::Move(Dir::Up),
        "s" => Input::Move(Dir::Down),
        "a" => Input::Move(Dir::Left),
        "d" => Input::Move(Dir::Right),
        "." => Input::Wait,
        "q" => Input::Quit,
        "x" => {
            let x = parts.next()?.parse().ok()?;
            let y = parts.next()?.parse().ok()?;
            Input::Search { screen: Pos { y, x } }
        }
        "c" => {
            let index: usize = parts.next()?.parse().ok()?;
            Input::CloseView(*view_ids.get(index)?)
        }
        _ => return None,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(input)
}
