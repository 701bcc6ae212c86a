pub use chip8::Chip8;
pub use display::FrameBuffer;
pub use error::{Chip8Error, Result};
pub use keypad::Keypad;

mod chip8;
pub mod constants;
mod display;
mod error;
mod instruction;
mod keypad;
pub mod memory;
mod opcode;
mod operations;
pub mod random;
pub mod stack;
pub mod state;
pub mod timer;
