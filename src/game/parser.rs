use std::collections::HashMap;

use super::world::{Direction, World};

const ALREADY_WON: &str = "Stop trying to play. You've already won!";
const UNKNOWN_COMMAND: &str = "I have no clue what you are talking about.";
const WON_THE_GAME: &str = "YOU WON THE GAME! Congratulations for finding all of the trophies.";

/// A recognised verb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Look,
    Move(Direction),
    Inventory,
    Get,
}

impl Command {
    /// Metric label
    pub fn verb(self) -> &'static str {
        match self {
            Command::Look => "look",
            Command::Move(_) => "move",
            Command::Inventory => "inventory",
            Command::Get => "get",
        }
    }
}

/// Maps player input onto world changes and a reply
#[derive(Debug, Clone)]
pub struct CommandParser {
    commands: HashMap<&'static str, Command>,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandParser {
    pub fn new() -> Self {
        let commands = HashMap::from([
            ("look", Command::Look),
            ("n", Command::Move(Direction::North)),
            ("north", Command::Move(Direction::North)),
            ("s", Command::Move(Direction::South)),
            ("south", Command::Move(Direction::South)),
            ("e", Command::Move(Direction::East)),
            ("east", Command::Move(Direction::East)),
            ("w", Command::Move(Direction::West)),
            ("west", Command::Move(Direction::West)),
            ("i", Command::Inventory),
            ("inventory", Command::Inventory),
            ("get", Command::Get),
        ]);
        Self { commands }
    }

    /// Verb and optional noun of `input`, if the verb is known
    pub fn command(&self, input: &str) -> Option<(Command, Option<String>)> {
        let input = input.to_lowercase();
        let mut tokens = input.split_whitespace();
        let command = *self.commands.get(tokens.next()?)?;
        let noun = tokens.collect::<Vec<_>>().join(" ");
        Some((command, (!noun.is_empty()).then_some(noun)))
    }

    /// Apply `input` to `world` and return the reply
    pub fn parse(&self, input: &str, world: &mut World) -> String {
        if world.has_won() {
            return ALREADY_WON.to_string();
        }

        let mut reply = match self.command(input) {
            Some((Command::Look, _)) => look(world),
            Some((Command::Move(direction), _)) => move_to(world, direction),
            Some((Command::Inventory, _)) => inventory(world),
            Some((Command::Get, noun)) => get(world, noun.as_deref()),
            None => UNKNOWN_COMMAND.to_string(),
        };

        if world.has_won() {
            reply.push_str("\r\n");
            reply.push_str(WON_THE_GAME);
        }
        reply
    }
}

fn look(world: &World) -> String {
    world.current_room().long_description()
}

fn move_to(world: &mut World, direction: Direction) -> String {
    match world.current_room().exit(direction) {
        Some(next) => {
            world.current = next;
            format!("You move {}.\r\n{}", direction, look(world))
        }
        None => "You bounce off the wall.".to_string(),
    }
}

fn inventory(world: &World) -> String {
    if world.inventory.is_empty() {
        return "You have nothing but the shirt on your back.".to_string();
    }
    let carried: Vec<&str> = world
        .inventory
        .iter()
        .map(|t| t.description.as_str())
        .collect();
    format!("You are carrying {}.", carried.join(", "))
}

fn get(world: &mut World, noun: Option<&str>) -> String {
    let room = world.current_room_mut();
    let index = match noun {
        None if room.things.is_empty() => return "You get down.".to_string(),
        None => 0,
        Some(noun) => match room
            .things
            .iter()
            .position(|t| t.name.eq_ignore_ascii_case(noun))
        {
            Some(index) => index,
            None => return format!("You don't see any {} here.", noun),
        },
    };

    let thing = room.things.remove(index);
    let reply = format!("You grab the {}.", thing.name);
    world.inventory.push(thing);
    reply
}
