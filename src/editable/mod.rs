//! Editing buffer shared by every overlay editor.
//!
//! - `EditBuffer`: text with a caret and selection
//! - `EditConstraints`: what input the buffer accepts
//! - `Selection`: anchor/head pair over char offsets

pub mod constraints;
pub mod selection;
pub mod state;

pub use constraints::{CharFilter, EditConstraints};
pub use selection::Selection;
pub use state::EditBuffer;
