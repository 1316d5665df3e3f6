pub mod content;
pub mod game;
pub mod level_file;
pub mod state;
pub mod types;
pub mod viewport;

pub use game::pathfinding::{PathResult, find_path};
pub use game::{Game, Step, ViewHandle};
pub use level_file::{LevelFileError, load_level, parse_level};
pub use state::{Actor, Level, Map, Monster, Player, Tile};
pub use types::*;
pub use viewport::{SharedViewport, TILE_PIXELS, Viewport, screen_to_grid};
