use std::collections::{BTreeMap, BTreeSet};

use crate::content;
use crate::types::{ActorKind, LogEvent, Pos, TileKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    pub blood_stained: bool,
}

impl Tile {
    pub const EMPTY: Tile = Tile { kind: TileKind::Empty, blood_stained: false };

    pub fn of(kind: TileKind) -> Self {
        Self { kind, blood_stained: false }
    }

    /// True for every tile an actor can ever occupy. A closed door counts:
    /// it can be opened or forced. See [`Tile::passable`] for the stricter
    /// predicate used by movement.
    pub fn walkable(&self) -> bool {
        matches!(self.kind, TileKind::Floor | TileKind::ClosedDoor | TileKind::OpenDoor)
    }

    /// True only for tiles that can be entered without opening anything.
    pub fn passable(&self) -> bool {
        matches!(self.kind, TileKind::Floor | TileKind::OpenDoor)
    }

    /// Movement cost of entering this tile. Only meaningful for walkable
    /// tiles; a closed door is priced at the cost of forcing it open.
    pub fn cost(&self) -> u32 {
        match self.kind {
            TileKind::ClosedDoor => 4,
            _ => 1,
        }
    }
}

/// Rectangular tile matrix. Rows shorter than the widest row in the source
/// text are padded with Empty cells at load, so every in-bounds index is
/// valid. Out-of-bounds reads yield Empty, which is never walkable.
#[derive(Clone, Debug)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
}

impl Map {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, tiles: vec![Tile::of(TileKind::Floor); width * height] }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn tile_at(&self, pos: Pos) -> Tile {
        if !self.in_bounds(pos) {
            return Tile::EMPTY;
        }
        self.tiles[self.index(pos)]
    }

    pub fn walkable(&self, pos: Pos) -> bool {
        self.tile_at(pos).walkable()
    }

    pub fn passable(&self, pos: Pos) -> bool {
        self.tile_at(pos).passable()
    }

    pub fn cost_at(&self, pos: Pos) -> u32 {
        self.tile_at(pos).cost()
    }

    pub fn set_tile(&mut self, pos: Pos, kind: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = Tile::of(kind);
    }

    /// Transition a closed door at `pos` to open. No-op for any other tile,
    /// so applying it twice is the same as applying it once.
    pub fn open_door_at(&mut self, pos: Pos) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        if self.tiles[idx].kind == TileKind::ClosedDoor {
            self.tiles[idx].kind = TileKind::OpenDoor;
        }
    }

    /// Mark the tile as blood-stained. Cosmetic only; walkability and cost
    /// are unaffected.
    pub fn stain(&mut self, pos: Pos) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx].blood_stained = true;
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

#[derive(Clone, Debug)]
pub struct Actor {
    pub pos: Pos,
    pub symbol: char,
    pub name: &'static str,
    pub kind: ActorKind,
    pub hp: i32,
    pub attack: i32,
    pub speed: f64,
    pub max_ap: f64,
    pub ap: f64,
    pub alive: bool,
}

impl Actor {
    pub fn spawn(kind: ActorKind, pos: Pos) -> Self {
        let stats = content::spawn_stats(kind);
        Self {
            pos,
            symbol: stats.symbol,
            name: stats.name,
            kind,
            hp: stats.hp,
            attack: stats.attack,
            speed: stats.speed,
            max_ap: stats.max_ap,
            ap: 0.0,
            alive: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub actor: Actor,
}

#[derive(Clone, Debug)]
pub struct Monster {
    pub id: u64,
    pub actor: Actor,
}

/// The authoritative world state. Mutated in place by the engine thread
/// only; views receive cloned snapshots.
///
/// Invariant: every key in `monsters` equals the monster's own
/// `actor.pos`. All position mutation goes through remove-and-reinsert in
/// the AI pass, so the two can never drift.
#[derive(Clone, Debug)]
pub struct Level {
    pub map: Map,
    pub player: Player,
    pub monsters: BTreeMap<Pos, Monster>,
    /// Positions relaxed by the most recent pathfinding call. Replaced
    /// wholesale per call; consumed only by diagnostics rendering.
    pub debug: BTreeSet<Pos>,
    pub events: Vec<LogEvent>,
}

impl Level {
    /// xxh3 over the canonical world state, for determinism checks.
    pub fn snapshot_hash(&self) -> u64 {
        use std::hash::Hasher;
        use xxhash_rust::xxh3::Xxh3;

        let mut hasher = Xxh3::new();
        hasher.write_u64(self.map.width as u64);
        hasher.write_u64(self.map.height as u64);
        for tile in &self.map.tiles {
            hasher.write_u8(tile.kind as u8);
            hasher.write_u8(u8::from(tile.blood_stained));
        }

        hasher.write_i32(self.player.actor.pos.y);
        hasher.write_i32(self.player.actor.pos.x);
        hasher.write_i32(self.player.actor.hp);
        hasher.write_u8(u8::from(self.player.actor.alive));

        hasher.write_u64(self.monsters.len() as u64);
        for (pos, monster) in &self.monsters {
            hasher.write_i32(pos.y);
            hasher.write_i32(pos.x);
            hasher.write_u64(monster.id);
            hasher.write_i32(monster.actor.hp);
            hasher.write_u64(monster.actor.ap.to_bits());
        }

        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walkable_and_passable_disagree_only_on_closed_doors() {
        let cases = [
            (TileKind::Wall, false, false),
            (TileKind::Empty, false, false),
            (TileKind::Floor, true, true),
            (TileKind::OpenDoor, true, true),
            (TileKind::ClosedDoor, true, false),
        ];
        for (kind, walkable, passable) in cases {
            let tile = Tile::of(kind);
            assert_eq!(tile.walkable(), walkable, "walkable for {kind:?}");
            assert_eq!(tile.passable(), passable, "passable for {kind:?}");
        }
    }

    #[test]
    fn closed_door_costs_more_than_floor() {
        assert_eq!(Tile::of(TileKind::Floor).cost(), 1);
        assert_eq!(Tile::of(TileKind::OpenDoor).cost(), 1);
        assert_eq!(Tile::of(TileKind::ClosedDoor).cost(), 4);
    }

    #[test]
    fn open_door_at_is_idempotent() {
        let mut map = Map::new(3, 3);
        let door = Pos { y: 1, x: 1 };
        map.set_tile(door, TileKind::ClosedDoor);

        map.open_door_at(door);
        assert_eq!(map.tile_at(door).kind, TileKind::OpenDoor);
        map.open_door_at(door);
        assert_eq!(map.tile_at(door).kind, TileKind::OpenDoor);
    }

    #[test]
    fn open_door_at_ignores_non_doors() {
        let mut map = Map::new(3, 3);
        map.set_tile(Pos { y: 0, x: 0 }, TileKind::Wall);
        map.open_door_at(Pos { y: 0, x: 0 });
        assert_eq!(map.tile_at(Pos { y: 0, x: 0 }).kind, TileKind::Wall);
    }

    #[test]
    fn out_of_bounds_reads_are_empty_and_unwalkable() {
        let map = Map::new(4, 4);
        assert_eq!(map.tile_at(Pos { y: -1, x: 2 }), Tile::EMPTY);
        assert_eq!(map.tile_at(Pos { y: 2, x: 4 }), Tile::EMPTY);
        assert!(!map.walkable(Pos { y: 4, x: 0 }));
    }

    #[test]
    fn stain_does_not_change_walkability_or_cost() {
        let mut map = Map::new(3, 3);
        let pos = Pos { y: 1, x: 1 };
        map.stain(pos);
        let tile = map.tile_at(pos);
        assert!(tile.blood_stained);
        assert!(tile.walkable());
        assert_eq!(tile.cost(), 1);
    }
}
