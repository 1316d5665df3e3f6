//! Plain-text level loading.
//!
//! One row per line, using the alphabet:
//! - `#` wall, `.` floor, `|` closed door, `/` open door
//! - space / tab / CR: empty (void, never walkable)
//! - `@` player start, `R` rat, `S` spider (the cell underneath becomes floor)
//!
//! Rows are right-padded with empty cells to the longest row's length.
//! Any other character is a fatal format error carrying its 1-indexed
//! row and column.

use std::collections::{BTreeMap, BTreeSet};
use std::error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::state::{Actor, Level, Map, Monster, Player, Tile};
use crate::types::{ActorKind, Pos, TileKind};

#[derive(Debug)]
pub enum LevelFileError {
    Io(io::Error),
    InvalidSymbol { row: usize, col: usize, found: char },
    MissingPlayer,
    DuplicatePlayer { row: usize, col: usize },
}

impl fmt::Display for LevelFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelFileError::Io(err) => write!(f, "failed to read level file: {err}"),
            LevelFileError::InvalidSymbol { row, col, found } => {
                write!(f, "invalid symbol '{found}' in level at [{row},{col}]")
            }
            LevelFileError::MissingPlayer => write!(f, "level has no player start symbol '@'"),
            LevelFileError::DuplicatePlayer { row, col } => {
                write!(f, "second player start symbol '@' at [{row},{col}]")
            }
        }
    }
}

impl error::Error for LevelFileError {}

impl From<io::Error> for LevelFileError {
    fn from(err: io::Error) -> Self {
        LevelFileError::Io(err)
    }
}

pub fn load_level(path: &Path) -> Result<Level, LevelFileError> {
    let text = fs::read_to_string(path)?;
    parse_level(&text)
}

pub fn parse_level(text: &str) -> Result<Level, LevelFileError> {
    let rows: Vec<&str> = text.lines().collect();
    let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
    let height = rows.len();

    let mut tiles = vec![Tile::EMPTY; width * height];
    let mut player: Option<Player> = None;
    let mut monsters = BTreeMap::new();
    let mut next_monster_id = 0u64;

    for (y, line) in rows.iter().enumerate() {
        for (x, symbol) in line.chars().enumerate() {
            let pos = Pos { y: y as i32, x: x as i32 };
            let kind = match symbol {
                ' ' | '\t' | '\r' => TileKind::Empty,
                '#' => TileKind::Wall,
                '.' => TileKind::Floor,
                '|' => TileKind::ClosedDoor,
                '/' => TileKind::OpenDoor,
                '@' => {
                    if player.is_some() {
                        return Err(LevelFileError::DuplicatePlayer { row: y + 1, col: x + 1 });
                    }
                    player = Some(Player { actor: Actor::spawn(ActorKind::Player, pos) });
                    TileKind::Floor
                }
                'R' => {
                    spawn_monster(&mut monsters, &mut next_monster_id, ActorKind::Rat, pos);
                    TileKind::Floor
                }
                'S' => {
                    spawn_monster(&mut monsters, &mut next_monster_id, ActorKind::Spider, pos);
                    TileKind::Floor
                }
                found => {
                    return Err(LevelFileError::InvalidSymbol { row: y + 1, col: x + 1, found });
                }
            };
            tiles[y * width + x] = Tile::of(kind);
        }
    }

    let player = player.ok_or(LevelFileError::MissingPlayer)?;
    Ok(Level {
        map: Map { width, height, tiles },
        player,
        monsters,
        debug: BTreeSet::new(),
        events: Vec::new(),
    })
}

fn spawn_monster(
    monsters: &mut BTreeMap<Pos, Monster>,
    next_id: &mut u64,
    kind: ActorKind,
    pos: Pos,
) {
    monsters.insert(pos, Monster { id: *next_id, actor: Actor::spawn(kind, pos) });
    *next_id += 1;
}
