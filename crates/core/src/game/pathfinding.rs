//! Weighted A* over the tile grid.
//!
//! Steps are 4-directional; the cost of a step is the destination tile's
//! cost, so a closed door is a legal but expensive transit (the price of
//! forcing it). Besides the path itself, every relaxed position is
//! reported so callers can expose the search frontier as a diagnostic
//! overlay.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use crate::state::Map;
use crate::types::Pos;

#[derive(Clone, Debug)]
pub struct PathResult {
    /// Start-to-goal positions, including the start itself. Empty when no
    /// route exists; callers step from index 1.
    pub path: Vec<Pos>,
    /// Every position relaxed during this call.
    pub visited: BTreeSet<Pos>,
    pub found: bool,
}

// Ordered by f first, then by insertion sequence: equal-priority nodes pop
// in the order they were enqueued, which keeps paths deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    seq: u64,
    pos: Pos,
}

pub fn find_path(map: &Map, start: Pos, goal: Pos) -> PathResult {
    let mut visited = BTreeSet::new();
    visited.insert(start);

    if start == goal {
        return PathResult { path: vec![start], visited, found: true };
    }

    let mut open: BinaryHeap<Reverse<OpenNode>> = BinaryHeap::new();
    let mut came_from: BTreeMap<Pos, Pos> = BTreeMap::new();
    let mut g_score: BTreeMap<Pos, u32> = BTreeMap::new();
    let mut next_seq = 0u64;

    g_score.insert(start, 0);
    open.push(Reverse(OpenNode { f: manhattan(start, goal), seq: next_seq, pos: start }));

    while let Some(Reverse(node)) = open.pop() {
        let current = node.pos;
        if current == goal {
            return PathResult { path: reconstruct_path(&came_from, start, goal), visited, found: true };
        }

        let current_g = g_score.get(&current).copied().unwrap_or(u32::MAX);
        for next in neighbors(current) {
            if !map.walkable(next) {
                continue;
            }
            let tentative_g = current_g.saturating_add(map.cost_at(next));
            let existing_g = g_score.get(&next).copied().unwrap_or(u32::MAX);
            if tentative_g >= existing_g {
                continue;
            }

            came_from.insert(next, current);
            g_score.insert(next, tentative_g);
            visited.insert(next);

            next_seq += 1;
            let f = tentative_g.saturating_add(manhattan(next, goal));
            open.push(Reverse(OpenNode { f, seq: next_seq, pos: next }));
        }
    }

    PathResult { path: Vec::new(), visited, found: false }
}

fn reconstruct_path(came_from: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        let Some(prev) = came_from.get(&current).copied() else {
            return Vec::new();
        };
        current = prev;
        path.push(current);
    }
    path.reverse();
    path
}

pub(crate) fn neighbors(pos: Pos) -> [Pos; 4] {
    [
        Pos { y: pos.y - 1, x: pos.x },
        Pos { y: pos.y, x: pos.x + 1 },
        Pos { y: pos.y + 1, x: pos.x },
        Pos { y: pos.y, x: pos.x - 1 },
    ]
}

pub(crate) fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Total cost of walking `path` (the start tile is free).
pub fn path_cost(map: &Map, path: &[Pos]) -> u32 {
    path.iter().skip(1).map(|&pos| map.cost_at(pos)).sum()
}
