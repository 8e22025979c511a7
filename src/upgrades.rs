//! Upgrade card catalog and draw logic
//!
//! Cards apply a one-shot effect to the run's [`PlayerStats`]. The catalog is
//! static; between levels a hand is drawn without replacement, excluding
//! cards already collected this run.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::sim::PlayerStats;

/// A selectable upgrade. Effects are plain functions so the catalog can be
/// a `const` table; cards are referenced across the run by `id`.
#[derive(Debug, Clone, Copy)]
pub struct UpgradeCard {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub effect: fn(&mut PlayerStats),
}

fn jump_boost(stats: &mut PlayerStats) {
    stats.jump_power *= 1.2;
}

fn speed_boost(stats: &mut PlayerStats) {
    stats.speed *= 1.15;
}

fn damage_up(stats: &mut PlayerStats) {
    stats.damage *= 1.3;
}

fn max_energy(stats: &mut PlayerStats) {
    stats.max_energy += 30.0;
    stats.energy = (stats.energy + 30.0).min(stats.max_energy);
}

fn energy_regen(stats: &mut PlayerStats) {
    stats.energy_regen += 5.0;
}

fn max_health(stats: &mut PlayerStats) {
    stats.max_health += 25.0;
    stats.health = (stats.health + 25.0).min(stats.max_health);
}

fn heal(stats: &mut PlayerStats) {
    stats.health = stats.max_health;
}

fn energy_refill(stats: &mut PlayerStats) {
    stats.energy = stats.max_energy;
}

fn glass_cannon(stats: &mut PlayerStats) {
    stats.damage *= 2.0;
    stats.max_health = (stats.max_health * 0.8).floor();
    stats.health = stats.health.min(stats.max_health);
}

fn tank(stats: &mut PlayerStats) {
    stats.max_health = (stats.max_health * 1.5).floor();
    stats.health += 25.0;
    stats.speed *= 0.9;
}

pub const ALL_CARDS: [UpgradeCard; 10] = [
    UpgradeCard {
        id: "jump_boost",
        name: "Korkea hyppy",
        description: "+20% hyppykorkeus",
        effect: jump_boost,
    },
    UpgradeCard {
        id: "speed_boost",
        name: "Nopeus",
        description: "+15% liikkumisnopeus",
        effect: speed_boost,
    },
    UpgradeCard {
        id: "damage_up",
        name: "Voima",
        description: "+30% tulipallodamage",
        effect: damage_up,
    },
    UpgradeCard {
        id: "max_energy",
        name: "Energia+",
        description: "+30 max energiaa",
        effect: max_energy,
    },
    UpgradeCard {
        id: "energy_regen",
        name: "Regeneraatio",
        description: "+5 energiaa/sekunti",
        effect: energy_regen,
    },
    UpgradeCard {
        id: "max_health",
        name: "Kestävyys",
        description: "+25 max HP",
        effect: max_health,
    },
    UpgradeCard {
        id: "heal",
        name: "Parantuminen",
        description: "Palauta täydet HP",
        effect: heal,
    },
    UpgradeCard {
        id: "energy_refill",
        name: "Energiatäyttö",
        description: "Palauta täysi energia",
        effect: energy_refill,
    },
    UpgradeCard {
        id: "glass_cannon",
        name: "Lasitykki",
        description: "+100% damage, -20% max HP",
        effect: glass_cannon,
    },
    UpgradeCard {
        id: "tank",
        name: "Tankki",
        description: "+50% max HP, -10% nopeus",
        effect: tank,
    },
];

/// The full catalog, in definition order.
pub fn all_cards() -> &'static [UpgradeCard] {
    &ALL_CARDS
}

/// Look up a card by id.
pub fn card_by_id(id: &str) -> Option<&'static UpgradeCard> {
    ALL_CARDS.iter().find(|c| c.id == id)
}

/// Draw up to `count` distinct cards, excluding already-collected ids.
///
/// When fewer than `count` cards remain, the hand degrades to all of them.
/// Draw order comes from the caller's RNG, so the same seed and run history
/// always produce the same hand.
pub fn draw_cards<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    collected: &[String],
) -> Vec<&'static UpgradeCard> {
    let mut available: Vec<&'static UpgradeCard> = ALL_CARDS
        .iter()
        .filter(|c| !collected.iter().any(|id| id == c.id))
        .collect();
    available.shuffle(rng);
    available.truncate(count);
    available
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn catalog_ids_are_unique() {
        let mut ids: Vec<&str> = ALL_CARDS.iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), ALL_CARDS.len());
    }

    #[test]
    fn draw_excludes_collected_cards() {
        let mut rng = Pcg32::seed_from_u64(1);
        let collected = vec!["heal".to_string(), "tank".to_string()];
        for _ in 0..50 {
            let hand = draw_cards(&mut rng, 3, &collected);
            assert_eq!(hand.len(), 3);
            assert!(hand.iter().all(|c| c.id != "heal" && c.id != "tank"));
        }
    }

    #[test]
    fn draw_degrades_when_catalog_runs_low() {
        let mut rng = Pcg32::seed_from_u64(1);
        let collected: Vec<String> = ALL_CARDS[..8].iter().map(|c| c.id.to_string()).collect();
        let hand = draw_cards(&mut rng, 3, &collected);
        assert_eq!(hand.len(), 2);
        let mut ids: Vec<&str> = hand.iter().map(|c| c.id).collect();
        ids.sort();
        assert_eq!(ids, ["glass_cannon", "tank"]);
    }

    #[test]
    fn draw_is_deterministic_per_seed() {
        let hand_a: Vec<&str> = draw_cards(&mut Pcg32::seed_from_u64(9), 3, &[])
            .iter()
            .map(|c| c.id)
            .collect();
        let hand_b: Vec<&str> = draw_cards(&mut Pcg32::seed_from_u64(9), 3, &[])
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(hand_a, hand_b);
    }

    #[test]
    fn glass_cannon_drags_health_under_the_new_maximum() {
        let mut stats = PlayerStats::default();
        glass_cannon(&mut stats);
        assert_eq!(stats.damage, 20.0);
        assert_eq!(stats.max_health, 80.0);
        assert_eq!(stats.health, 80.0);
    }

    #[test]
    fn max_energy_grants_the_increase_immediately() {
        let mut stats = PlayerStats::default();
        stats.energy = 40.0;
        max_energy(&mut stats);
        assert_eq!(stats.max_energy, 130.0);
        assert_eq!(stats.energy, 70.0);
    }
}
