use thiserror::Error;

use crate::constants::STACK_SIZE;

/// Errors raised when the interpreter would step outside its fixed resources.
///
/// Unknown opcodes aren't errors; they execute as no-ops.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    #[error("memory access out of range at address {addr:#06X}")]
    AddressOutOfRange { addr: usize },

    #[error("stack overflow: more than {} nested subroutine calls", STACK_SIZE)]
    StackOverflow,

    #[error("stack underflow: return with an empty call stack")]
    StackUnderflow,

    #[error("unable to read ROM: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
