use vm8_core::{Chip8, Chip8Error};

fn boot(program: &[u8]) -> Chip8 {
    let mut chip8 = Chip8::with_seed(0xC8);
    chip8.load_rom(program).unwrap();
    chip8
}

fn run(chip8: &mut Chip8, cycles: usize) {
    for _ in 0..cycles {
        chip8.cycle().unwrap();
    }
}

#[test]
fn draws_font_glyph() {
    // V1 = 0; F129 I = glyph(V1); D005 draw 5 rows at (V0, V0)
    let mut chip8 = boot(&[0x61, 0x00, 0xF1, 0x29, 0xD0, 0x05]);
    run(&mut chip8, 3);

    let frame = chip8.take_frame().unwrap();
    let glyph = [0xF0u8, 0x90, 0x90, 0x90, 0xF0];
    for (y, byte) in glyph.iter().enumerate() {
        for x in 0..8 {
            assert_eq!(frame.pixel(x, y), byte & (0x80 >> x) != 0, "({}, {})", x, y);
        }
    }
    assert_eq!(frame.lit(), 14);
    assert_eq!(chip8.state().v[0xF], 0);
}

#[test]
fn redrawing_erases_and_collides() {
    // I = glyph 8; draw; draw again
    let mut chip8 = boot(&[0x60, 0x08, 0xF0, 0x29, 0xD1, 0x15, 0xD1, 0x15]);
    run(&mut chip8, 3);
    assert_eq!(chip8.state().v[0xF], 0);
    run(&mut chip8, 1);
    assert_eq!(chip8.state().v[0xF], 1);
    assert_eq!(chip8.frame().lit(), 0);
}

#[test]
fn waits_for_key_press() {
    // V5 = key; V6 = 1
    let mut chip8 = boot(&[0xF5, 0x0A, 0x66, 0x01]);
    run(&mut chip8, 10);
    assert_eq!(chip8.state().pc, 0x200);
    assert_eq!(chip8.state().v[0x6], 0);

    chip8.key_press(0x9);
    chip8.key_press(0xC);
    run(&mut chip8, 1);
    assert_eq!(chip8.state().pc, 0x202);
    assert_eq!(chip8.state().v[0x5], 0x9);

    chip8.key_release(0x9);
    run(&mut chip8, 1);
    assert_eq!(chip8.state().v[0x6], 1);
}

#[test]
fn skips_on_held_key() {
    // V0 = 0xA; skip if pressed; V1 = 1; V2 = 2
    let program = [0x60, 0x0A, 0xE0, 0x9E, 0x61, 0x01, 0x62, 0x02];

    let mut chip8 = boot(&program);
    run(&mut chip8, 3);
    assert_eq!(chip8.state().v[0x1], 1);

    let mut chip8 = boot(&program);
    chip8.key_press(0xA);
    run(&mut chip8, 3);
    assert_eq!(chip8.state().v[0x1], 0);
    assert_eq!(chip8.state().v[0x2], 2);
}

#[test]
fn stores_bcd() {
    // V3 = 157; I = 0x300; BCD V3; V0..=V2 = mem[I..]
    let mut chip8 = boot(&[0x63, 157, 0xA3, 0x00, 0xF3, 0x33, 0xF2, 0x65]);
    run(&mut chip8, 4);
    let state = chip8.state();
    assert_eq!(state.memory.slice(0x300, 3).unwrap(), &[1, 5, 7]);
    assert_eq!(state.v[0x0..0x3], [1, 5, 7]);
}

#[test]
fn counts_down_delay_timer() {
    // V0 = 10; DT = V0; loop: V1 = DT; if V1 != 0 jump loop
    let mut chip8 = boot(&[0x60, 0x0A, 0xF0, 0x15, 0xF1, 0x07, 0x31, 0x00, 0x12, 0x04]);
    let mut cycles = 0;
    while chip8.state().pc != 0x20A {
        chip8.cycle().unwrap();
        cycles += 1;
        assert!(cycles < 100, "delay timer never reached zero");
    }
    assert_eq!(chip8.delay_timer(), 0);
    assert_eq!(chip8.state().v[0x1], 0);
}

#[test]
fn unknown_opcodes_only_advance_pc() {
    let mut chip8 = boot(&[0x01, 0x23, 0x80, 0x0F, 0xE0, 0x00, 0xF0, 0xFF]);
    let before = chip8.state().clone();
    run(&mut chip8, 4);
    let after = chip8.state();
    assert_eq!(after.pc, 0x208);
    assert_eq!(after.v, before.v);
    assert_eq!(after.i, before.i);
    assert_eq!(after.stack, before.stack);
    assert_eq!(after.frame_buffer, before.frame_buffer);
}

#[test]
fn seeded_machines_agree() {
    // loop: V0 = rand & 0xFF; V1 += V0; jump loop
    let program = [0xC0, 0xFF, 0x81, 0x04, 0x12, 0x00];
    let mut a = boot(&program);
    let mut b = boot(&program);
    run(&mut a, 30);
    run(&mut b, 30);
    assert_eq!(a.state().v, b.state().v);
}

#[test]
fn rejects_oversized_rom() {
    let mut chip8 = Chip8::new();
    let rom = vec![0xAB; 3585];
    assert!(matches!(
        chip8.load_rom(&rom),
        Err(Chip8Error::RomTooLarge {
            size: 3585,
            max: 3584
        })
    ));
    assert_eq!(chip8.state().memory.read(0x200).unwrap(), 0);
}

#[test]
fn accepts_rom_filling_memory() {
    let mut chip8 = Chip8::new();
    let rom = vec![0xAB; 3584];
    chip8.load_rom(&rom).unwrap();
    assert_eq!(chip8.state().memory.read(0xFFF).unwrap(), 0xAB);
}

#[test]
fn reports_reader_errors() {
    struct Broken;
    impl std::io::Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "unplugged"))
        }
    }
    let mut chip8 = Chip8::new();
    assert!(matches!(
        chip8.load_rom_from(&mut Broken),
        Err(Chip8Error::Io(_))
    ));
}

#[test]
fn returns_from_empty_stack_fails() {
    let mut chip8 = boot(&[0x00, 0xEE]);
    assert!(matches!(chip8.cycle(), Err(Chip8Error::StackUnderflow)));
    assert_eq!(chip8.state().pc, 0x200);
}

#[test]
fn stores_past_memory_fails() {
    // I = 0xFFE; store V0..=V3
    let mut chip8 = boot(&[0xAF, 0xFE, 0xF3, 0x55]);
    run(&mut chip8, 1);
    assert!(matches!(
        chip8.cycle(),
        Err(Chip8Error::AddressOutOfRange { .. })
    ));
    assert_eq!(chip8.state().memory.read(0xFFE).unwrap(), 0);
}
