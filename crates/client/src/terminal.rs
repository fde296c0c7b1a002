//! Line-driven terminal front end.
//!
//! Each turn the latest snapshot is printed and one command line is read from
//! stdin. Item commands take the 1-based number shown next to each item.
//!
//! ```text
//! w a s d      move (bump to attack or open doors)
//! W A S D      act on the neighbouring cell (toggle doors, attack)
//! g            take everything at your feet
//! take N       take item N at your feet
//! drop N       drop inventory item N
//! equip N      equip inventory item N
//! off N        take off worn item N
//! store N      put inventory item N into the chest here
//! withdraw N   take item N out of the chest here
//! q            quit
//! ```

use async_trait::async_trait;
use game_core::{Direction, Input, ItemId, Snapshot};
use runtime::{InputProvider, Result, RuntimeError};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::debug;

/// Parse one command line against the current snapshot.
pub fn parse_command(line: &str, snapshot: &Snapshot) -> Option<Input> {
    let mut words = line.split_whitespace();
    let verb = words.next()?;
    let index = words.next().and_then(|word| word.parse::<usize>().ok());

    let input = match verb {
        "w" => Input::Move(Direction::Up),
        "s" => Input::Move(Direction::Down),
        "a" => Input::Move(Direction::Left),
        "d" => Input::Move(Direction::Right),
        "W" => Input::Action(Direction::Up),
        "S" => Input::Action(Direction::Down),
        "A" => Input::Action(Direction::Left),
        "D" => Input::Action(Direction::Right),
        "g" => Input::TakeAllAtFeet,
        "q" | "quit" => Input::Quit,
        "take" => Input::TakeItem(pick(at_feet(snapshot), index?)?),
        "drop" => Input::DropItem(pick(snapshot.player.inventory.clone(), index?)?),
        "equip" => Input::EquipItem(pick(snapshot.player.inventory.clone(), index?)?),
        "off" => Input::TakeOffItem(pick(worn(snapshot), index?)?),
        "store" => Input::StoreItem(pick(snapshot.player.inventory.clone(), index?)?),
        "withdraw" => Input::WithdrawItem(pick(stored_here(snapshot), index?)?),
        _ => return None,
    };
    Some(input)
}

fn pick(items: Vec<ItemId>, number: usize) -> Option<ItemId> {
    items.get(number.checked_sub(1)?).copied()
}

fn at_feet(snapshot: &Snapshot) -> Vec<ItemId> {
    snapshot.items_at_feet().map(|item| item.id).collect()
}

fn worn(snapshot: &Snapshot) -> Vec<ItemId> {
    snapshot.player.equipment.iter().map(|(_, item)| item).collect()
}

fn stored_here(snapshot: &Snapshot) -> Vec<ItemId> {
    snapshot
        .level
        .storage_at(snapshot.player.position)
        .map(|storage| storage.items().to_vec())
        .unwrap_or_default()
}

/// Format the whole screen for one snapshot.
pub fn render_screen(snapshot: &Snapshot) -> String {
    let mut screen = snapshot.render().join("\n");
    let player = &snapshot.player;

    screen.push_str(&format!(
        "\n\n{} [{}]  HP {}  turn {}\n",
        player.name,
        snapshot.level.name(),
        player.hitpoints,
        snapshot.turn
    ));

    let listings = [
        ("At your feet", at_feet(snapshot)),
        ("Inventory", player.inventory.clone()),
        ("Worn", worn(snapshot)),
        ("Chest", stored_here(snapshot)),
    ];
    for (title, items) in listings {
        if items.is_empty() {
            continue;
        }
        let names: Vec<String> = items
            .iter()
            .enumerate()
            .filter_map(|(index, id)| snapshot.item(*id).map(|item| format!("{}:{}", index + 1, item.name)))
            .collect();
        screen.push_str(&format!("{}: {}\n", title, names.join("  ")));
    }

    for line in snapshot.level.log().lines() {
        screen.push_str(line);
        screen.push('\n');
    }
    if snapshot.over {
        screen.push_str("You died. Press q to quit.\n");
    }
    screen
}

/// Reads commands from stdin, printing the snapshot before each prompt.
pub struct StdinInputProvider {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl StdinInputProvider {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

impl Default for StdinInputProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InputProvider for StdinInputProvider {
    async fn next_input(&self, snapshot: &Snapshot) -> Result<Input> {
        println!("{}", render_screen(snapshot));

        let mut lines = self.lines.lock().await;
        loop {
            let line = lines
                .next_line()
                .await
                .map_err(|_| RuntimeError::InputProviderClosed)?;
            let Some(line) = line else {
                // EOF
                return Ok(Input::Quit);
            };
            match parse_command(&line, snapshot) {
                Some(input) => return Ok(input),
                None => {
                    debug!(target: "client::terminal", %line, "unrecognised command");
                    println!("?");
                }
            }
        }
    }
}
