/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GameConfig {
    /// Number of human-readable lines kept in each level's rolling log.
    pub log_capacity: usize,

    /// Path cost of stepping into a cell held by a living monster.
    /// Regular steps cost 1, so this biases routes around crowds.
    pub occupied_step_cost: u32,

    /// Extra radius swept around the player beyond their sight range.
    pub sight_padding: i32,

    /// When true, inventory commands also advance monsters. The default keeps
    /// them free: only Move and Action inputs cost the player a turn.
    pub inventory_actions_take_turn: bool,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_LOG_CAPACITY: usize = 25;
    pub const DEFAULT_OCCUPIED_STEP_COST: u32 = 10;
    pub const DEFAULT_SIGHT_PADDING: i32 = 2;

    pub fn new() -> Self {
        Self {
            log_capacity: Self::DEFAULT_LOG_CAPACITY,
            occupied_step_cost: Self::DEFAULT_OCCUPIED_STEP_COST,
            sight_padding: Self::DEFAULT_SIGHT_PADDING,
            inventory_actions_take_turn: false,
        }
    }

    pub fn with_log_capacity(mut self, log_capacity: usize) -> Self {
        self.log_capacity = log_capacity.max(1);
        self
    }

    pub fn with_inventory_actions_take_turn(mut self, enabled: bool) -> Self {
        self.inventory_actions_take_turn = enabled;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
