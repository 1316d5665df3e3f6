//! Turn engine and view fan-out.
//!
//! A single engine thread owns all mutable world state. Each consumed
//! input mutates the level, runs one monster AI pass, and then publishes a
//! snapshot to every registered view over a rendezvous channel: the send
//! blocks until the consumer takes it, so the slowest view paces the loop.
//! Closing a view arrives as an ordinary input, serialized with every
//! other mutation.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, SyncSender, sync_channel};

use slotmap::SlotMap;

use crate::state::Level;
use crate::types::{Dir, Input, Pos, TileKind, ViewId};
use crate::viewport::{SharedViewport, screen_to_grid};

pub mod combat;
mod monster;
pub mod pathfinding;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Running,
    Terminated,
}

/// The receiving half of one view's snapshot channel.
pub struct ViewHandle {
    pub id: ViewId,
    pub levels: Receiver<Arc<Level>>,
}

pub struct Game {
    level: Level,
    views: SlotMap<ViewId, SyncSender<Arc<Level>>>,
    inputs: Receiver<Input>,
    viewport: SharedViewport,
}

impl Game {
    /// Build an engine with `num_views` registered views. Returns the
    /// engine, one handle per view, and the sender for the shared input
    /// channel. Both directions are unbuffered: the engine blocks on
    /// `recv` when idle and on every publish until the view is ready.
    pub fn new(
        level: Level,
        num_views: usize,
        viewport: SharedViewport,
    ) -> (Self, Vec<ViewHandle>, SyncSender<Input>) {
        let (input_tx, input_rx) = sync_channel(0);

        let mut views = SlotMap::with_key();
        let mut handles = Vec::with_capacity(num_views);
        for _ in 0..num_views {
            let (level_tx, level_rx) = sync_channel(0);
            let id = views.insert(level_tx);
            handles.push(ViewHandle { id, levels: level_rx });
        }

        (Self { level, views, inputs: input_rx, viewport }, handles, input_tx)
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Drive the loop to completion: an initial broadcast so every view
    /// has state before the first input, then receive/mutate/publish until
    /// a quit arrives, the last view closes, or the input source drops.
    pub fn run(&mut self) {
        self.broadcast();
        while let Ok(input) = self.inputs.recv() {
            if self.step(input) == Step::Terminated {
                return;
            }
            self.broadcast();
            if self.views.is_empty() {
                return;
            }
        }
    }

    /// Apply one input to the world. Every non-terminal input is followed
    /// by one monster AI pass. Terminal inputs skip the pass and the
    /// caller's broadcast.
    pub fn step(&mut self, input: Input) -> Step {
        match input {
            Input::Quit => return Step::Terminated,
            Input::CloseView(id) => {
                // Dropping the sender closes the view's channel.
                self.views.remove(id);
                if self.views.is_empty() {
                    return Step::Terminated;
                }
            }
            Input::Move(dir) => self.move_player(dir),
            Input::Search { screen } => self.search_at(screen),
            Input::Wait => {}
        }

        monster::take_turns(&mut self.level);
        Step::Running
    }

    fn move_player(&mut self, dir: Dir) {
        let dest = dir.offset(self.level.player.actor.pos);
        if self.level.map.passable(dest) {
            self.level.player.actor.pos = dest;
        } else if self.level.map.tile_at(dest).kind == TileKind::ClosedDoor {
            // Opening the door consumes the turn; the player stays put.
            self.level.map.open_door_at(dest);
        }
    }

    fn search_at(&mut self, screen: Pos) {
        let goal = screen_to_grid(&self.viewport.get(), screen);
        match self.level.map.tile_at(goal).kind {
            TileKind::Floor => {
                let result =
                    pathfinding::find_path(&self.level.map, self.level.player.actor.pos, goal);
                // Planning preview only: the trace feeds the overlay, the
                // player does not move.
                self.level.debug = result.visited;
            }
            TileKind::ClosedDoor => self.level.map.open_door_at(goal),
            _ => {}
        }
    }

    fn broadcast(&mut self) {
        let snapshot = Arc::new(self.level.clone());
        let mut disconnected = Vec::new();
        for (id, view) in &self.views {
            if view.send(Arc::clone(&snapshot)).is_err() {
                disconnected.push(id);
            }
        }
        for id in disconnected {
            self.views.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_level;
    use crate::types::LogEvent;
    use crate::viewport::{TILE_PIXELS, Viewport};

    fn engine(text: &str, num_views: usize) -> (Game, Vec<ViewHandle>, SyncSender<Input>) {
        let level = parse_level(text).expect("level");
        Game::new(level, num_views, SharedViewport::default())
    }

    fn screen_at(grid: Pos) -> Pos {
        Pos { y: grid.y * TILE_PIXELS, x: grid.x * TILE_PIXELS }
    }

    #[test]
    fn bumping_a_closed_door_opens_it_and_costs_the_turn() {
        // Columns: floor, closed door, floor, wall, floor.
        let (mut game, _views, _inputs) = engine("@|.#.", 1);

        assert_eq!(game.step(Input::Move(Dir::Right)), Step::Running);
        assert_eq!(game.level().player.actor.pos, Pos { y: 0, x: 0 }, "opening consumed the turn");
        assert_eq!(game.level().map.tile_at(Pos { y: 0, x: 1 }).kind, TileKind::OpenDoor);

        assert_eq!(game.step(Input::Move(Dir::Right)), Step::Running);
        assert_eq!(game.level().player.actor.pos, Pos { y: 0, x: 1 });

        assert_eq!(game.step(Input::Move(Dir::Right)), Step::Running);
        assert_eq!(game.level().player.actor.pos, Pos { y: 0, x: 2 });

        // Wall ahead: the move is simply refused.
        assert_eq!(game.step(Input::Move(Dir::Right)), Step::Running);
        assert_eq!(game.level().player.actor.pos, Pos { y: 0, x: 2 });
    }

    #[test]
    fn moving_off_the_map_is_refused() {
        let (mut game, _views, _inputs) = engine("@.", 1);
        game.step(Input::Move(Dir::Up));
        game.step(Input::Move(Dir::Left));
        assert_eq!(game.level().player.actor.pos, Pos { y: 0, x: 0 });
    }

    #[test]
    fn search_on_floor_fills_the_debug_overlay_without_moving() {
        let (mut game, _views, _inputs) = engine("@....", 1);
        game.step(Input::Search { screen: screen_at(Pos { y: 0, x: 4 }) });

        assert_eq!(game.level().player.actor.pos, Pos { y: 0, x: 0 });
        assert!(game.level().debug.contains(&Pos { y: 0, x: 4 }));
        assert!(game.level().debug.contains(&Pos { y: 0, x: 0 }));
    }

    #[test]
    fn search_on_a_closed_door_opens_it_directly() {
        let (mut game, _views, _inputs) = engine("@.|.", 1);
        game.step(Input::Search { screen: screen_at(Pos { y: 0, x: 2 }) });
        assert_eq!(game.level().map.tile_at(Pos { y: 0, x: 2 }).kind, TileKind::OpenDoor);
    }

    #[test]
    fn search_respects_the_viewport_offset() {
        let level = parse_level("@.|.").expect("level");
        let viewport = SharedViewport::new(Viewport { offset_x: TILE_PIXELS, offset_y: 0 });
        let (mut game, _views, _inputs) = Game::new(level, 1, viewport);

        // Screen x for grid column 2 shifts right by one tile.
        game.step(Input::Search { screen: Pos { y: 0, x: 3 * TILE_PIXELS } });
        assert_eq!(game.level().map.tile_at(Pos { y: 0, x: 2 }).kind, TileKind::OpenDoor);
    }

    #[test]
    fn wait_still_lets_monsters_act() {
        let (mut game, _views, _inputs) = engine("@R", 1);
        game.step(Input::Wait);
        assert_eq!(game.level().player.actor.hp, 19);
        assert!(matches!(game.level().events[0], LogEvent::Hit { .. }));
    }

    #[test]
    fn quit_terminates_immediately() {
        let (mut game, _views, _inputs) = engine("@R", 1);
        assert_eq!(game.step(Input::Quit), Step::Terminated);
        // The monster pass is skipped on terminal inputs.
        assert_eq!(game.level().player.actor.hp, 20);
    }

    #[test]
    fn closing_the_last_view_terminates() {
        let (mut game, views, _inputs) = engine("@.", 2);
        let first = views[0].id;
        let second = views[1].id;

        assert_eq!(game.step(Input::CloseView(first)), Step::Running);
        assert_eq!(game.view_count(), 1);
        assert_eq!(game.step(Input::CloseView(second)), Step::Terminated);
        assert_eq!(game.view_count(), 0);
    }

    #[test]
    fn closed_view_channel_disconnects() {
        let (mut game, views, _inputs) = engine("@.", 1);
        let id = views[0].id;
        game.step(Input::CloseView(id));
        assert!(views[0].levels.recv().is_err(), "sender dropped, channel closed");
    }
}
