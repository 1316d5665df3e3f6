use crate::state::Actor;
use crate::types::LogEvent;

/// Resolve one attack fully within the calling turn. Hitpoints may go
/// negative; at zero or below the defender's alive flag clears and a death
/// event follows the hit event.
pub fn attack(attacker: &Actor, defender: &mut Actor) -> Vec<LogEvent> {
    let mut events = Vec::new();

    defender.hp -= attacker.attack;
    events.push(LogEvent::Hit {
        attacker: attacker.name.to_string(),
        defender: defender.name.to_string(),
        damage: attacker.attack,
    });

    if defender.hp <= 0 {
        defender.alive = false;
        events.push(LogEvent::Died { name: defender.name.to_string() });
    }

    events
}
