use crate::types::ActorKind;

pub struct SpawnStats {
    pub symbol: char,
    pub name: &'static str,
    pub hp: i32,
    pub attack: i32,
    pub speed: f64,
    pub max_ap: f64,
}

pub fn spawn_stats(kind: ActorKind) -> SpawnStats {
    match kind {
        ActorKind::Player => {
            SpawnStats { symbol: '@', name: "Player", hp: 20, attack: 5, speed: 1.0, max_ap: 10.0 }
        }
        ActorKind::Rat => {
            SpawnStats { symbol: 'R', name: "Rat", hp: 5, attack: 1, speed: 1.5, max_ap: 10.0 }
        }
        ActorKind::Spider => {
            SpawnStats { symbol: 'S', name: "Spider", hp: 7, attack: 2, speed: 1.0, max_ap: 10.0 }
        }
    }
}
