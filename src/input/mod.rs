pub mod handler;
pub mod turn_buffer;

pub use handler::{InputHandler, KeyAction};
pub use turn_buffer::TurnBuffer;
