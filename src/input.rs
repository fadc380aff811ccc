//! Latest-value input state fed by whatever event source hosts the game.
//!
//! Nothing here is queued: each signal keeps only its most recent value and
//! the simulation reads a snapshot once per tick.

use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Move(MoveKey),
    Attack,
}

impl Key {
    /// Map a lower-cased key name (`"w"`, `"arrowleft"`, `" "`) to a game key.
    pub fn from_name(name: &str) -> Option<Key> {
        match name {
            "arrowup" | "w" => Some(Key::Move(MoveKey::Up)),
            "arrowdown" | "s" => Some(Key::Move(MoveKey::Down)),
            "arrowleft" | "a" => Some(Key::Move(MoveKey::Left)),
            "arrowright" | "d" => Some(Key::Move(MoveKey::Right)),
            " " | "space" => Some(Key::Attack),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    PointerMove { x: f32, y: f32 },
    PointerDown,
    PointerUp,
    TouchMove { x: f32, y: f32 },
    /// A tap: moves the pointer and attacks.
    TouchStart { x: f32, y: f32 },
}

/// Something the host must do in response to an input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Attack,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
    held: HashSet<MoveKey>,
    pub pointer_x: f32,
    pub pointer_y: f32,
    pub clicking: bool,
}

impl InputState {
    /// Start with the pointer resting at `(x, y)`, normally the player's
    /// spawn point so pointer-follow stays idle until the pointer moves.
    pub fn with_pointer(x: f32, y: f32) -> Self {
        InputState {
            pointer_x: x,
            pointer_y: y,
            ..Default::default()
        }
    }

    pub fn apply(&mut self, event: InputEvent) -> Option<Action> {
        match event {
            InputEvent::KeyDown(Key::Move(key)) => {
                self.held.insert(key);
                None
            }
            InputEvent::KeyDown(Key::Attack) => Some(Action::Attack),
            InputEvent::KeyUp(Key::Move(key)) => {
                self.held.remove(&key);
                None
            }
            InputEvent::KeyUp(Key::Attack) => None,
            InputEvent::PointerMove { x, y } | InputEvent::TouchMove { x, y } => {
                self.pointer_x = x;
                self.pointer_y = y;
                None
            }
            InputEvent::PointerDown => {
                self.clicking = true;
                None
            }
            InputEvent::PointerUp => {
                self.clicking = false;
                None
            }
            InputEvent::TouchStart { x, y } => {
                self.pointer_x = x;
                self.pointer_y = y;
                Some(Action::Attack)
            }
        }
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held.contains(&key)
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }
}
