/// Commands, input keys and the key table that maps one to the other
use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::body::RigidBox;
use crate::error::Result;

/// A face of the box to move towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// A local axis to spin about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spin {
    Yaw,
    Pitch,
    Roll,
}

/// One discrete movement of the body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Move `distance` units along a local direction.
    Translate { direction: Direction, distance: f64 },
    /// Turn `angle` radians about a local spin axis, right-handed.
    Rotate { spin: Spin, angle: f64 },
}

impl Command {
    pub fn translate(direction: Direction, distance: f64) -> Self {
        Command::Translate {
            direction,
            distance,
        }
    }

    pub fn rotate(spin: Spin, angle: f64) -> Self {
        Command::Rotate { spin, angle }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Translate {
                direction,
                distance,
            } => write!(f, "{} {}", format!("{direction:?}").to_uppercase(), distance),
            Command::Rotate { spin, angle } => {
                write!(f, "{} {}", format!("{spin:?}").to_uppercase(), angle)
            }
        }
    }
}

/// An input identifier, independent of any windowing or terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Char(char),
}

/// Step used by the default movement keys.
pub const DEFAULT_STEP: f64 = 10.0;
/// Angle in radians used by the default spin keys.
pub const DEFAULT_TURN: f64 = 0.1;

/// Table from keys to commands.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMap {
    bindings: HashMap<Key, Command>,
}

impl KeyMap {
    /// A table with no bindings.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn bind(&mut self, key: Key, command: Command) -> Option<Command> {
        self.bindings.insert(key, command)
    }

    pub fn unbind(&mut self, key: Key) -> Option<Command> {
        self.bindings.remove(&key)
    }

    /// Look up `key`. A letter with no binding of its own falls back to its
    /// lowercase form, so Shift and Caps Lock do not unbind the defaults.
    pub fn get(&self, key: Key) -> Option<Command> {
        if let Some(command) = self.bindings.get(&key) {
            return Some(*command);
        }
        match key {
            Key::Char(c) if c.is_ascii_uppercase() => {
                self.bindings.get(&Key::Char(c.to_ascii_lowercase())).copied()
            }
            _ => None,
        }
    }

    /// Overlay another table; its bindings win.
    pub fn merge(&mut self, other: KeyMap) {
        self.bindings.extend(other.bindings);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Apply the command bound to `key`, if any.
    ///
    /// Returns the command that ran. On error the body is unchanged.
    pub fn dispatch(&self, key: Key, body: &mut RigidBox) -> Result<Option<Command>> {
        let Some(command) = self.get(key) else {
            return Ok(None);
        };

        debug!(?key, %command, "dispatching");
        body.apply_command(command)?;
        Ok(Some(command))
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind(Key::Left, Command::translate(Direction::Left, DEFAULT_STEP));
        map.bind(Key::Right, Command::translate(Direction::Right, DEFAULT_STEP));
        map.bind(Key::Down, Command::translate(Direction::Backward, DEFAULT_STEP));
        map.bind(Key::Up, Command::translate(Direction::Forward, DEFAULT_STEP));
        map.bind(Key::Char('1'), Command::translate(Direction::Up, DEFAULT_STEP));
        map.bind(Key::Char('2'), Command::translate(Direction::Down, DEFAULT_STEP));
        map.bind(Key::Char('q'), Command::rotate(Spin::Pitch, DEFAULT_TURN));
        map.bind(Key::Char('w'), Command::rotate(Spin::Pitch, -DEFAULT_TURN));
        map.bind(Key::Char('a'), Command::rotate(Spin::Roll, -DEFAULT_TURN));
        map.bind(Key::Char('s'), Command::rotate(Spin::Roll, DEFAULT_TURN));
        map.bind(Key::Char('z'), Command::rotate(Spin::Yaw, -DEFAULT_TURN));
        map.bind(Key::Char('x'), Command::rotate(Spin::Yaw, DEFAULT_TURN));
        map
    }
}
