//! Held-key auto-repeat for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout:
//! a held key that has not produced a press or repeat event within
//! `key_release_timeout_ms` is treated as released.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::handle_key_event;
use crate::types::{Intent, KEY_RELEASE_TIMEOUT_MS, REPEAT_DELAY_MS, REPEAT_RATE_MS};

/// Upper bound on intents produced by a single [`InputHandler::update`].
pub const MAX_REPEATS_PER_UPDATE: usize = 32;

const MAX_HELD: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeldKey {
    intent: Intent,
    /// Time held since the press that registered it.
    held_ms: u32,
    /// Time past the initial delay not yet turned into repeats.
    repeat_accumulator: u32,
    /// Time since the last press/repeat event for this key.
    idle_ms: u32,
}

impl HeldKey {
    fn new(intent: Intent) -> Self {
        Self {
            intent,
            held_ms: 0,
            repeat_accumulator: 0,
            idle_ms: 0,
        }
    }
}

/// Tracks held keys and turns them into repeated intents.
#[derive(Debug, Clone)]
pub struct InputHandler {
    held: ArrayVec<HeldKey, MAX_HELD>,
    repeat_delay_ms: u32,
    repeat_rate_ms: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(REPEAT_DELAY_MS, REPEAT_RATE_MS)
    }

    pub fn with_config(repeat_delay_ms: u32, repeat_rate_ms: u32) -> Self {
        Self {
            held: ArrayVec::new(),
            repeat_delay_ms,
            // A zero rate would repeat forever within one update.
            repeat_rate_ms: repeat_rate_ms.max(1),
            key_release_timeout_ms: KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn is_held(&self, intent: Intent) -> bool {
        self.held.iter().any(|key| key.intent == intent)
    }

    /// Feed one terminal key event.
    ///
    /// Returns the intent to apply right away, if any. A press of a key that is
    /// already held only refreshes its release timeout, since terminals without
    /// enhanced keyboard reporting deliver OS auto-repeat as extra presses.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<Intent> {
        let intent = handle_key_event(key)?;
        match key.kind {
            KeyEventKind::Press => self.handle_key_press(intent),
            KeyEventKind::Repeat => {
                if !self.refresh(intent) {
                    return self.handle_key_press(intent);
                }
                None
            }
            KeyEventKind::Release => {
                self.handle_key_release(intent);
                None
            }
        }
    }

    pub fn handle_key_press(&mut self, intent: Intent) -> Option<Intent> {
        if !intent.repeats_when_held() {
            return Some(intent);
        }
        if self.refresh(intent) {
            return None;
        }

        // Left and right are mutually exclusive.
        let opposite = match intent {
            Intent::MoveLeft => Some(Intent::MoveRight),
            Intent::MoveRight => Some(Intent::MoveLeft),
            _ => None,
        };
        if let Some(opposite) = opposite {
            self.handle_key_release(opposite);
        }

        if self.held.is_full() {
            self.held.remove(0);
        }
        self.held.push(HeldKey::new(intent));
        Some(intent)
    }

    pub fn handle_key_release(&mut self, intent: Intent) {
        self.held.retain(|key| key.intent != intent);
    }

    /// Advance held-key timers by `elapsed_ms` and return the repeats due.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<Intent, MAX_REPEATS_PER_UPDATE> {
        let mut intents = ArrayVec::<Intent, MAX_REPEATS_PER_UPDATE>::new();

        // Auto-release when terminal does not emit release events.
        let timeout = self.key_release_timeout_ms;
        for key in self.held.iter_mut() {
            key.idle_ms = key.idle_ms.saturating_add(elapsed_ms);
        }
        self.held.retain(|key| key.idle_ms <= timeout);

        for key in self.held.iter_mut() {
            let prev_held = key.held_ms;
            key.held_ms = key.held_ms.saturating_add(elapsed_ms);

            if key.held_ms < self.repeat_delay_ms {
                continue;
            }

            let excess = if prev_held < self.repeat_delay_ms {
                key.held_ms - self.repeat_delay_ms
            } else {
                elapsed_ms
            };
            key.repeat_accumulator = key.repeat_accumulator.saturating_add(excess);

            while key.repeat_accumulator >= self.repeat_rate_ms {
                if intents.try_push(key.intent).is_err() {
                    key.repeat_accumulator = 0;
                    break;
                }
                key.repeat_accumulator -= self.repeat_rate_ms;
            }
        }

        intents
    }

    pub fn reset(&mut self) {
        self.held.clear();
    }

    fn refresh(&mut self, intent: Intent) -> bool {
        match self.held.iter_mut().find(|key| key.intent == intent) {
            Some(key) => {
                key.idle_ms = 0;
                true
            }
            None => false,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
