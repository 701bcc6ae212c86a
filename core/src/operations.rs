//! Handlers for each instruction.
//!
//! Every handler runs after the program counter has already been stepped past the current
//! instruction, so jumps simply overwrite `pc` and skips add another 2 on top.
//! When Vx is VF the order of the two writes decides what's left in it: `addr`, `sub` and the
//! shifts write the flag first, `subn` writes it last.

use log::{debug, warn};

use crate::error::Result;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::state::State;

/// A single instruction's effect on the machine
pub type Operation = fn(op: &dyn Opcode, state: &mut State, keypad: &Keypad) -> Result<()>;

/// unrecognised; does nothing
pub fn nop(op: &dyn Opcode, _state: &mut State, _keypad: &Keypad) -> Result<()> {
    let (a, b, c, d) = op.nibbles();
    warn!("unknown opcode {:X}{:X}{:X}{:X}, ignoring", a, b, c, d);
    Ok(())
}

/// clear
pub fn clr(_op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.frame_buffer.clear();
    state.draw_flag = true;
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.pc = state.stack.pop()?;
    Ok(())
}

/// PC = addr
pub fn jump(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.pc = op.addr();
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.stack.push(state.pc)?;
    state.pc = op.addr();
    Ok(())
}

/// if Vx == kk then skip
pub fn ske(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    if state.v[op.x()] == op.kk() {
        state.skip();
    }
    Ok(())
}

/// if Vx != kk then skip
pub fn skne(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    if state.v[op.x()] != op.kk() {
        state.skip();
    }
    Ok(())
}

/// if Vx == Vy then skip
pub fn skre(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    if state.v[op.x()] == state.v[op.y()] {
        state.skip();
    }
    Ok(())
}

/// Vx = kk
pub fn load(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.v[op.x()] = op.kk();
    Ok(())
}

/// Vx += kk
/// Overflow wraps and VF is left alone
pub fn add(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.v[op.x()] = state.v[op.x()].wrapping_add(op.kk());
    Ok(())
}

/// Vx = Vy
pub fn mv(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.v[op.x()] = state.v[op.y()];
    Ok(())
}

/// Vx |= Vy
pub fn or(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.v[op.x()] |= state.v[op.y()];
    Ok(())
}

/// Vx &= Vy
pub fn and(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.v[op.x()] &= state.v[op.y()];
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.v[op.x()] ^= state.v[op.y()];
    Ok(())
}

/// Vx += Vy; VF = carry
pub fn addr(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    let (res, carry) = state.v[op.x()].overflowing_add(state.v[op.y()]);
    state.set_vf(carry);
    state.v[op.x()] = res;
    Ok(())
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.set_vf(vx > vy);
    state.v[op.x()] = vx.wrapping_sub(vy);
    Ok(())
}

/// VF = lsb(Vx); Vx >>= 1
pub fn shr(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.set_vf(state.v[op.x()] & 0x1 == 0x1);
    state.v[op.x()] >>= 1;
    Ok(())
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.v[op.x()] = vy.wrapping_sub(vx);
    state.set_vf(vy > vx);
    Ok(())
}

/// VF = msb(Vx); Vx <<= 1
pub fn shl(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.set_vf(state.v[op.x()] & 0x80 == 0x80);
    state.v[op.x()] <<= 1;
    Ok(())
}

/// if Vx != Vy then skip
pub fn skrne(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    if state.v[op.x()] != state.v[op.y()] {
        state.skip();
    }
    Ok(())
}

/// I = addr
pub fn loadi(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.i = op.addr();
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.pc = u16::from(state.v[0x0]) + op.addr();
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rnd(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.v[op.x()] = state.rng.next_byte() & op.kk();
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite in memory I..I+n onto the FrameBuffer at (Vx, Vy).
/// Sets VF if any pixels were erased
pub fn draw(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    let (x, y) = (state.v[op.x()], state.v[op.y()]);
    let sprite = state.memory.slice(state.i, op.n() as usize)?;
    let collision = state.frame_buffer.draw_sprite(x, y, sprite);
    state.set_vf(collision);
    state.draw_flag = true;
    Ok(())
}

/// if Vx.pressed then skip
pub fn skpr(op: &dyn Opcode, state: &mut State, keypad: &Keypad) -> Result<()> {
    if keypad.is_pressed(state.v[op.x()]) {
        state.skip();
    }
    Ok(())
}

/// if !Vx.pressed then skip
pub fn skup(op: &dyn Opcode, state: &mut State, keypad: &Keypad) -> Result<()> {
    if !keypad.is_pressed(state.v[op.x()]) {
        state.skip();
    }
    Ok(())
}

/// Vx = DT
pub fn getd(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.v[op.x()] = state.timers.delay();
    Ok(())
}

/// Vx = first pressed key, or run this instruction again next cycle
pub fn waitk(op: &dyn Opcode, state: &mut State, keypad: &Keypad) -> Result<()> {
    match keypad.first_pressed() {
        Some(key) => {
            debug!("key {:X} pressed, stored in V{:X}", key, op.x());
            state.v[op.x()] = key;
        }
        None => state.pc = state.pc.wrapping_sub(2),
    }
    Ok(())
}

/// DT = Vx
pub fn setd(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.timers.set_delay(state.v[op.x()]);
    Ok(())
}

/// ST = Vx
pub fn sets(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.timers.set_sound(state.v[op.x()]);
    Ok(())
}

/// I += Vx
pub fn addi(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.i = state.i.wrapping_add(u16::from(state.v[op.x()]));
    Ok(())
}

/// I = address of the font glyph for Vx
pub fn ldspr(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    state.i = Memory::font_address(state.v[op.x()]);
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    let vx = state.v[op.x()];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    state.memory.slice_mut(state.i, 3)?.copy_from_slice(&digits);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    let len = op.x() + 1;
    state
        .memory
        .slice_mut(state.i, len)?
        .copy_from_slice(&state.v[..len]);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<()> {
    let len = op.x() + 1;
    let bytes = state.memory.slice(state.i, len)?;
    state.v[..len].copy_from_slice(bytes);
    Ok(())
}
