//! Monster half of a turn: action-point accrual and chase-and-bite AI.

use super::Game;
use crate::state::MonsterId;

impl Game {
    /// Updates every living monster of the active level in list order.
    /// Stops as soon as the player dies.
    pub(super) fn update_monsters(&mut self) {
        let count = self.current_level().monsters().len();
        for index in 0..count {
            if self.over {
                break;
            }
            let id = MonsterId(index as u32);
            let alive = self
                .current_level()
                .monster(id)
                .is_some_and(|monster| monster.is_alive());
            if alive {
                self.update_monster(id);
            }
        }
    }

    /// Gains `speed` action points, plans a fresh path to the player, then
    /// spends one point per attempt while at least one remains.
    ///
    /// Reaching the player's cell means biting instead of stepping, so the
    /// path does not advance. A blocked step is a pass.
    fn update_monster(&mut self, id: MonsterId) {
        let index = self.current.index();
        let level = &mut self.levels[index];
        let Some(monster) = level.monster_mut(id) else {
            return;
        };
        monster.action_points += monster.speed;
        let from = monster.position;

        let path = level.path_to(from, self.player.position, &self.config).unwrap_or_default();
        let mut cursor = 0;

        loop {
            let Some(monster) = level.monster_mut(id) else {
                return;
            };
            if monster.action_points < 1.0 {
                break;
            }
            monster.action_points -= 1.0;

            let Some(next) = path.get(cursor).copied() else {
                continue;
            };

            if next == self.player.position {
                let outcome = monster.attack(&mut self.player, &self.items);
                level.record(outcome.description);
                if !self.player.is_alive() {
                    level.record(format!("{} died", self.player.name));
                    self.over = true;
                    return;
                }
            } else if level.move_monster(id, next) {
                cursor += 1;
            }
        }
    }
}
