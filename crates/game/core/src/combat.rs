//! Melee damage resolution.
//!
//! Attack power is the attacker's strength scaled by their weapon. Each
//! defensive slot the target fills then removes its power as a fraction of
//! the remaining damage. Every multiplication is floored, matching integer
//! hitpoints, and damage never goes negative.

use std::fmt;

use crate::state::{Character, EquipSlot, ItemArena};

/// Result of one attack, already applied to the defender.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    pub damage: i32,
    pub killed: bool,
    /// Log line, e.g. `Player hits Rat causing damage 20`.
    pub description: String,
}

impl fmt::Display for AttackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

fn gear_power(character: &Character, items: &ItemArena, slot: EquipSlot) -> Option<f64> {
    character
        .equipment
        .get(slot)
        .and_then(|item| items.power(item))
}

fn scale(value: i32, factor: f64) -> i32 {
    (f64::from(value) * factor).floor() as i32
}

impl Character {
    /// Strength, multiplied by the wielded weapon's power if any.
    pub fn attack_power(&self, items: &ItemArena) -> i32 {
        match gear_power(self, items, EquipSlot::Weapon) {
            Some(power) => scale(self.strength, power),
            None => self.strength,
        }
    }

    /// Damage this character would take from an attack of `power`.
    pub fn damage_taken(&self, power: i32, items: &ItemArena) -> i32 {
        let mut damage = power;
        for slot in [EquipSlot::Helmet, EquipSlot::Armor] {
            if let Some(reduction) = gear_power(self, items, slot) {
                damage = scale(damage, 1.0 - reduction);
            }
        }
        damage.max(0)
    }

    /// Strikes `target`, subtracting the damage from its hitpoints.
    pub fn attack(&self, target: &mut Character, items: &ItemArena) -> AttackOutcome {
        let damage = target.damage_taken(self.attack_power(items), items);
        target.hitpoints -= damage;

        let killed = !target.is_alive();
        let verb = if killed { "killed" } else { "hits" };
        AttackOutcome {
            damage,
            killed,
            description: format!("{} {} {} causing damage {}", self.name, verb, target.name, damage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::CharacterTemplate;
    use crate::state::{ActorId, Equipment, ItemKind, ItemLocation, LevelId, MonsterId, Position};

    fn fighter(actor: ActorId, name: &str, hitpoints: i32, strength: i32) -> Character {
        let template = CharacterTemplate::new(name, 'x', hitpoints, strength, 1.0);
        Character::from_template(actor, &template, Position::ORIGIN)
    }

    fn rat_id() -> ActorId {
        ActorId::Monster {
            level: LevelId(0),
            monster: MonsterId(0),
        }
    }

    #[test]
    fn bare_handed_strength_is_the_damage() {
        let items = ItemArena::new();
        let player = fighter(ActorId::Player, "Player", 20, 20);
        let mut target = fighter(rat_id(), "Dummy", 100, 1);

        let outcome = player.attack(&mut target, &items);
        assert_eq!(outcome.damage, 20);
        assert!(!outcome.killed);
        assert_eq!(target.hitpoints, 80);
        assert_eq!(outcome.description, "Player hits Dummy causing damage 20");
    }

    #[test]
    fn weapon_helmet_and_armor_combine() {
        let mut items = ItemArena::new();
        let carried = |owner| ItemLocation::Carried { owner };
        let sword = items.spawn("Sword", 's', ItemKind::Weapon, 2.0, carried(ActorId::Player));
        let helmet = items.spawn("Helmet", 'h', ItemKind::Helmet, 0.1, carried(rat_id()));
        let armor = items.spawn("Armor", 'a', ItemKind::Armor, 0.2, carried(rat_id()));

        let mut player = fighter(ActorId::Player, "Player", 20, 20);
        player.equipment.replace(EquipSlot::Weapon, sword);
        let mut target = fighter(rat_id(), "Knight", 100, 1)
            .with_equipment(Equipment::builder().helmet(helmet).armor(armor).build());

        assert_eq!(player.attack_power(&items), 40);
        let outcome = player.attack(&mut target, &items);
        assert_eq!(outcome.damage, 28);
        assert_eq!(target.hitpoints, 72);
    }

    #[test]
    fn lethal_blow_is_reported_as_a_kill() {
        let items = ItemArena::new();
        let player = fighter(ActorId::Player, "Player", 20, 20);
        let mut rat = fighter(rat_id(), "Rat", 5, 5);

        let outcome = player.attack(&mut rat, &items);
        assert!(outcome.killed);
        assert_eq!(rat.hitpoints, -15);
        assert_eq!(outcome.to_string(), "Player killed Rat causing damage 20");
    }

    #[test]
    fn overpowered_armor_never_heals() {
        let mut items = ItemArena::new();
        let plate = items.spawn(
            "Plate",
            'p',
            ItemKind::Armor,
            1.5,
            ItemLocation::Carried { owner: rat_id() },
        );
        let player = fighter(ActorId::Player, "Player", 20, 20);
        let mut target = fighter(rat_id(), "Golem", 10, 1);
        target.equipment.replace(EquipSlot::Armor, plate);

        let outcome = player.attack(&mut target, &items);
        assert_eq!(outcome.damage, 0);
        assert_eq!(target.hitpoints, 10);
    }
}
