use std::time::{Duration, Instant};

use anyhow::{Context, Error, Result};
use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use display::Display;
use vm8_core::Chip8;

use crate::audio::Beeper;
use crate::keymap::keymap;

/// How the driver loop should pace the machine
pub struct Config {
    /// size multiplier for each pixel
    pub scale: u32,
    /// minimum time between cycles
    pub delay: Duration,
    /// stop after this many cycles; run until quit otherwise
    pub cycles: Option<u64>,
}

/// What an SDL event means to the machine
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Quit,
    Press(u8),
    Release(u8),
    Ignored,
}

fn translate(event: &Event) -> Input {
    match event {
        Event::Quit { .. } => Input::Quit,
        Event::KeyDown {
            keycode: Some(key), ..
        } => match (*key, keymap(*key)) {
            (_, Some(kc)) => Input::Press(kc),
            (Keycode::Escape, _) => Input::Quit,
            _ => Input::Ignored,
        },
        Event::KeyUp {
            keycode: Some(key), ..
        } => match keymap(*key) {
            Some(kc) => Input::Release(kc),
            None => Input::Ignored,
        },
        _ => Input::Ignored,
    }
}

/// Drives `chip8` in a window until it's closed, the machine fails, or `config.cycles` cycles
/// have run. Returns the number of cycles executed.
///
/// Each iteration samples input into the keypad, runs one cycle, presents the frame if it
/// changed and then waits out the rest of `config.delay`.
pub fn run(chip8: &mut Chip8, config: &Config) -> Result<u64> {
    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init().map_err(Error::msg)?;
    let mut display = Display::new(&sdl, config.scale).context("failed to open a window")?;
    let mut beeper = Beeper::new(&sdl).context("failed to open an audio device")?;
    let mut events = sdl.event_pump().map_err(Error::msg)?;

    let mut last_cycle: Instant = Instant::now();
    let mut executed: u64 = 0;

    'event: while config.cycles.map_or(true, |limit| executed < limit) {
        // Handle input
        for event in events.poll_iter() {
            match translate(&event) {
                Input::Quit => break 'event,
                Input::Press(key) => chip8.key_press(key),
                Input::Release(key) => chip8.key_release(key),
                Input::Ignored => continue,
            }
        }

        // Update state
        let pc = chip8.state().pc;
        chip8
            .cycle()
            .with_context(|| format!("cycle {} failed at pc {:04X}", executed, pc))?;
        executed += 1;

        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.take_frame() {
            display.render(frame).context("failed to render frame")?;
        }
        beeper.set(chip8.sound_active());

        // Handle timing
        let elapsed_cycle_time = last_cycle.elapsed();
        if config.delay > elapsed_cycle_time {
            std::thread::sleep(config.delay - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    info!("stopped after {} cycles", executed);
    Ok(executed)
}
