//! Keyboard handling
//!
//! Key types plus the Enter/Escape/Tab protocol every cell editor obeys.

pub mod protocol;
pub mod types;

pub use protocol::{editing_intent, idle_intent, EditingIntent, EnterGuard, IdleIntent};
pub use types::{KeyCode, Keystroke, Modifiers};
