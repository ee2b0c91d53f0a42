//! Line protocol handling.
//!
//! Implements the layout notation for positions and the command parser used
//! by the `rezzo` binary's main loop.

pub mod layout;
pub mod parser;

pub use layout::{encode_layout, parse_layout, LayoutError};
pub use parser::{parse_command, Command};
