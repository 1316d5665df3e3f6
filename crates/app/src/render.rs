use std::sync::Arc;

use game_core::{Level, Pos, TileKind};

const EVENT_TAIL: usize = 5;

/// Render one level snapshot as plain text. Actors draw over tiles, the
/// debug overlay draws over plain floor, and the last few turn-log lines
/// follow the grid.
pub fn render(label: &str, level: &Arc<Level>) -> String {
    let mut out = String::new();
    out.push_str(&format!("== {label} ==\n"));

    for y in 0..level.map.height as i32 {
        for x in 0..level.map.width as i32 {
            let pos = Pos { y, x };
            out.push(glyph_at(level, pos));
        }
        out.push('\n');
    }

    let skip = level.events.len().saturating_sub(EVENT_TAIL);
    for event in &level.events[skip..] {
        out.push_str(&format!("> {event}\n"));
    }
    out
}

fn glyph_at(level: &Level, pos: Pos) -> char {
    if level.player.actor.pos == pos {
        return level.player.actor.symbol;
    }
    if let Some(monster) = level.monsters.get(&pos) {
        return monster.actor.symbol;
    }
    let tile = level.map.tile_at(pos);
    if level.debug.contains(&pos) && tile.kind == TileKind::Floor {
        return '*';
    }
    match tile.kind {
        TileKind::Wall => '#',
        TileKind::Floor => {
            if tile.blood_stained {
                ','
            } else {
                '.'
            }
        }
        TileKind::ClosedDoor => '|',
        TileKind::OpenDoor => '/',
        TileKind::Empty => ' ',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::parse_level;

    #[test]
    fn snapshot_renders_actors_over_tiles() {
        let level = Arc::new(parse_level("@.R\n...").expect("level"));
        let text = render("view 0", &level);
        assert!(text.contains("== view 0 =="));
        assert!(text.contains("@.R"));
    }

    #[test]
    fn stained_floor_uses_its_own_glyph() {
        let mut level = parse_level("@..").expect("level");
        level.map.stain(Pos { y: 0, x: 2 });
        let text = render("v", &Arc::new(level));
        assert!(text.contains("@.,"));
    }
}
