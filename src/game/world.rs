use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Compass directions, in exit-table order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Slot of this direction in [`Room::exits`]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

/// Something that can be picked up. Every thing is a trophy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thing {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: String,
    pub description: String,
    /// Index of the neighbouring room per direction, `None` for a wall
    pub exits: [Option<usize>; 4],
    pub things: Vec<Thing>,
}

impl Room {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            exits: [None; 4],
            things: Vec::new(),
        }
    }

    pub fn exit(&self, direction: Direction) -> Option<usize> {
        self.exits[direction.index()]
    }

    pub fn set_exit(&mut self, direction: Direction, room: Option<usize>) {
        self.exits[direction.index()] = room;
    }

    /// Directions that lead somewhere
    pub fn open_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::iter().filter(|d| self.exit(*d).is_some())
    }

    /// Directions blocked by a wall
    pub fn walls(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::iter().filter(|d| self.exit(*d).is_none())
    }

    /// What the player sees on `look`
    pub fn long_description(&self) -> String {
        let mut text = format!("{}: {}\r\n", self.name, self.description);

        if !self.things.is_empty() {
            let things: Vec<&str> = self.things.iter().map(|t| t.description.as_str()).collect();
            text.push_str("You see ");
            text.push_str(&things.join(", and "));
            text.push_str(" on the floor.\r\n");
        }

        let exits: Vec<String> = self.open_directions().map(|d| d.to_string()).collect();
        match exits.as_slice() {
            [] => text.push_str("There are no exits"),
            [only] => {
                text.push_str("There is an exit to the ");
                text.push_str(only);
            }
            many => {
                text.push_str("You see exits in the directions: ");
                text.push_str(&many.join(", "));
            }
        }
        text.push_str(".\r\n");
        text
    }
}

/// Game state for one player
#[derive(Debug, Clone)]
pub struct World {
    pub rooms: Vec<Room>,
    pub inventory: Vec<Thing>,
    pub current: usize,
    pub trophy_count: usize,
}

impl World {
    pub fn new(rooms: Vec<Room>, current: usize, trophy_count: usize) -> Self {
        Self {
            rooms,
            inventory: Vec::new(),
            current,
            trophy_count,
        }
    }

    pub fn current_room(&self) -> &Room {
        &self.rooms[self.current]
    }

    pub fn current_room_mut(&mut self) -> &mut Room {
        &mut self.rooms[self.current]
    }

    /// All trophies collected
    pub fn has_won(&self) -> bool {
        self.inventory.len() >= self.trophy_count
    }

    /// Trophies still lying around
    pub fn trophies_left(&self) -> usize {
        self.trophy_count.saturating_sub(self.inventory.len())
    }
}
