use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct ViewId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
    ClosedDoor,
    OpenDoor,
    Empty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub fn offset(self, from: Pos) -> Pos {
        match self {
            Dir::Up => Pos { y: from.y - 1, x: from.x },
            Dir::Down => Pos { y: from.y + 1, x: from.x },
            Dir::Left => Pos { y: from.y, x: from.x - 1 },
            Dir::Right => Pos { y: from.y, x: from.x + 1 },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    Rat,
    Spider,
}

/// One abstract turn input. Production of these values (keyboard, mouse,
/// scripted) is the presentation side's concern; the engine only consumes
/// the tag plus the optional screen point or view identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    Wait,
    Move(Dir),
    Search { screen: Pos },
    Quit,
    CloseView(ViewId),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEvent {
    Hit { attacker: String, defender: String, damage: i32 },
    Died { name: String },
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEvent::Hit { attacker, defender, damage } => {
                write!(f, "{attacker} hits {defender} for {damage} damage")
            }
            LogEvent::Died { name } => write!(f, "{name} died"),
        }
    }
}
