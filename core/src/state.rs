use crate::constants::{FLAG_REGISTER, PROGRAM_START, REGISTER_COUNT};
use crate::display::FrameBuffer;
use crate::memory::Memory;
use crate::random::ByteSource;
use crate::stack::Stack;
use crate::timer::Timers;

/// Everything an instruction can read or write, apart from the keypad
///
/// ## Registers
/// - (v) 16 8-bit registers V0..VF
///     - VF doubles as the carry/borrow/collision flag
/// - (i) a 16-bit index register holding a memory address
/// - (pc) a 16-bit program counter
///
/// ## Stack
/// - 16 return addresses and a stack pointer
///
/// ## Timers
/// - 8-bit delay and sound countdowns, ticked once per cycle
///
/// ## Memory
/// - 4096 bytes with the font at 0x050 and programs from 0x200
/// - 64x32 frame buffer
///
/// ## Randomness
/// - the byte source behind Cxkk, seeded once when the state is built
#[derive(Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub stack: Stack,
    pub timers: Timers,
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub rng: ByteSource,
}

impl State {
    pub fn new() -> Self {
        Self::with_rng(ByteSource::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ByteSource::with_seed(seed))
    }

    fn with_rng(rng: ByteSource) -> Self {
        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            stack: Stack::new(),
            timers: Timers::new(),
            memory: Memory::new(),
            frame_buffer: FrameBuffer::new(),
            draw_flag: false,
            rng,
        }
    }

    pub fn set_vf(&mut self, flag: bool) {
        self.v[FLAG_REGISTER] = u8::from(flag);
    }

    /// Steps over the next instruction
    pub fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
