use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A key press the game understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Letter(char),
    Backspace,
    Enter,
}

impl KeyInput {
    /// Maps a physical key name or an on-screen key label.
    /// Single letters are case-insensitive; anything else unknown is ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.to_ascii_uppercase();
        match key.as_str() {
            "ENTER" => Some(KeyInput::Enter),
            "BACKSPACE" | "DELETE" => Some(KeyInput::Backspace),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(letter), None) if letter.is_ascii_uppercase() => {
                        Some(KeyInput::Letter(letter))
                    }
                    _ => None,
                }
            }
        }
    }
}

type Listener = Box<dyn FnMut(KeyInput)>;
type Entries = Vec<(u64, Listener)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Entries,
    /// Nesting depth of `dispatch`; while non-zero the running entries are out of the cell.
    dispatching: usize,
    /// Subscriptions dropped while their listener was out of the cell.
    released: Vec<u64>,
}

/// Fan-out point for keyboard input. Listeners stay attached only while their
/// [`KeyboardSubscription`] is alive, so a session that ends cannot keep
/// receiving keys and re-attaching never stacks duplicate handlers.
///
/// Listeners may attach or release subscriptions from inside a callback. A
/// listener released mid-dispatch is not called again; one attached
/// mid-dispatch first hears the next key.
#[derive(Default, Clone)]
pub struct KeyboardHub {
    listeners: Rc<RefCell<Listeners>>,
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, listener: impl FnMut(KeyInput) + 'static) -> KeyboardSubscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Box::new(listener)));

        KeyboardSubscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Maps a raw key and forwards it. Returns false when the key is not a game key.
    pub fn dispatch(&self, raw_key: &str) -> bool {
        let Some(key) = KeyInput::from_key(raw_key) else {
            return false;
        };

        // The cell is not borrowed while listeners run
        let mut running = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.dispatching += 1;
            std::mem::take(&mut listeners.entries)
        };

        for (id, listener) in running.iter_mut() {
            if self.listeners.borrow().released.contains(id) {
                continue;
            }
            listener(key);
        }

        let released = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.dispatching -= 1;
            if listeners.dispatching == 0 {
                std::mem::take(&mut listeners.released)
            } else {
                listeners.released.clone()
            }
        };
        let (detached, kept): (Entries, Entries) = running
            .into_iter()
            .partition(|(id, _)| released.contains(id));

        {
            let mut listeners = self.listeners.borrow_mut();
            let attached = std::mem::replace(&mut listeners.entries, kept);
            listeners.entries.extend(attached);
        }
        // Dropped outside the borrow: a listener may own other subscriptions
        drop(detached);
        true
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

/// Detaches its listener when dropped.
pub struct KeyboardSubscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Drop for KeyboardSubscription {
    fn drop(&mut self) {
        let Some(listeners) = self.listeners.upgrade() else {
            return;
        };
        let detached: Entries = {
            let mut listeners = listeners.borrow_mut();
            if listeners.dispatching > 0 {
                listeners.released.push(self.id);
            }
            let (detached, kept) = std::mem::take(&mut listeners.entries)
                .into_iter()
                .partition(|(id, _)| *id == self.id);
            listeners.entries = kept;
            detached
        };
        drop(detached);
    }
}
