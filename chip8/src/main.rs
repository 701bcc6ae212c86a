use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use vm8_core::Chip8;

use crate::run::{run, Config};

mod audio;
mod keymap;
mod run;

#[derive(Parser, Debug)]
#[command(name = "vm8", about = "Runs a Chip-8 ROM in a window.")]
struct Args {
    /// Size multiplier for each pixel.
    #[arg(value_parser = clap::value_parser!(u32).range(1..=64))]
    scale: u32,

    /// Minimum milliseconds between cycles.
    delay: u64,

    /// ROM image to load.
    rom: PathBuf,

    /// Number of cycles to execute before exiting; runs until the window is closed if omitted.
    #[arg(long)]
    cycles: Option<u64>,

    /// Seed for the random byte source; seeded from the clock if omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rom = std::fs::read(&args.rom)
        .with_context(|| format!("failed to read ROM {}", args.rom.display()))?;

    let mut chip8 = match args.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };
    chip8
        .load_rom(&rom)
        .with_context(|| format!("failed to load ROM {}", args.rom.display()))?;
    info!("loaded {}", args.rom.display());

    let config = Config {
        scale: args.scale,
        delay: Duration::from_millis(args.delay),
        cycles: args.cycles,
    };
    run(&mut chip8, &config)?;
    Ok(())
}
