//! Monster turn-taking on an action-point budget.
//!
//! Each live monster re-plans a route to the player every turn, regains
//! `speed` action points, and walks the route while it can afford each
//! tile's cost. Reaching the player resolves combat and ends the turn.

use super::{combat, pathfinding};
use crate::state::Level;
use crate::types::{LogEvent, Pos};

pub(super) fn take_turns(level: &mut Level) {
    // Snapshot (position, id) pairs up front: a monster that moves into a
    // cell vacated earlier in the same pass must not act twice.
    let turns: Vec<(Pos, u64)> = level.monsters.iter().map(|(pos, m)| (*pos, m.id)).collect();

    for (pos, id) in turns {
        let Some(monster) = level.monsters.get(&pos) else {
            continue;
        };
        if monster.id != id {
            continue;
        }

        if monster.actor.hp <= 0 {
            let name = monster.actor.name;
            level.monsters.remove(&pos);
            level.map.stain(pos);
            level.events.push(LogEvent::Died { name: name.to_string() });
            continue;
        }

        chase_player(level, pos);
    }
}

fn chase_player(level: &mut Level, pos: Pos) {
    let result = pathfinding::find_path(&level.map, pos, level.player.actor.pos);
    level.debug = result.visited;

    if !result.found || !level.player.actor.alive {
        return;
    }

    // Remove-and-reinsert keeps the map key equal to the monster's own
    // position no matter how far it walks this turn.
    let Some(mut monster) = level.monsters.remove(&pos) else {
        return;
    };

    monster.actor.ap = (monster.actor.ap + monster.actor.speed).min(monster.actor.max_ap);

    let mut current = pos;
    for &step in result.path.iter().skip(1) {
        if step == level.player.actor.pos {
            let events = combat::attack(&monster.actor, &mut level.player.actor);
            level.events.extend(events);
            // Attacking consumes the rest of the intended action.
            monster.actor.ap = 0.0;
            break;
        }
        if level.monsters.contains_key(&step) {
            break;
        }
        let cost = f64::from(level.map.cost_at(step));
        if monster.actor.ap < cost {
            break;
        }
        monster.actor.ap -= cost;
        current = step;
    }

    monster.actor.pos = current;
    level.monsters.insert(current, monster);
}
