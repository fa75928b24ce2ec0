use std::time::Duration;

use chip8_core::{Chip8, Chip8Error, Config, Keypad, Quirks};

fn boot(image: &[u8]) -> Chip8 {
    let mut chip8 = Chip8::new();
    chip8.seed_rng(0xC8);
    chip8.load_image(image).unwrap();
    chip8
}

fn steps(chip8: &mut Chip8, n: usize) {
    for _ in 0..n {
        chip8.step().unwrap();
    }
}

#[test]
fn test_cls_load_load_i() {
    // CLS; LD V0, 0x05; LD I, 0x234
    let mut chip8 = boot(&[0x00, 0xE0, 0x60, 0x05, 0xA2, 0x34]);
    steps(&mut chip8, 3);
    let state = chip8.state();
    assert_eq!(state.pc, 0x206);
    assert_eq!(state.v[0x0], 5);
    assert_eq!(state.i, 0x234);
    assert!(chip8.frame_buffer().is_blank());
}

#[test]
fn test_call_then_ret_resumes_after_call() {
    let mut image = vec![0u8; 0x102];
    // 0x200: CALL 0x300; 0x202: LD V1, 0x01
    image[0x0..0x4].copy_from_slice(&[0x23, 0x00, 0x61, 0x01]);
    // 0x300: RET
    image[0x100..0x102].copy_from_slice(&[0x00, 0xEE]);
    let mut chip8 = boot(&image);

    chip8.step().unwrap();
    assert_eq!(chip8.state().pc, 0x300);
    assert_eq!(chip8.state().stack.sp(), 1);

    chip8.step().unwrap();
    assert_eq!(chip8.state().pc, 0x202);
    assert_eq!(chip8.state().stack.sp(), 0);

    chip8.step().unwrap();
    assert_eq!(chip8.state().v[0x1], 0x01);
}

#[test]
fn test_seventeen_nested_calls_overflow() {
    // every CALL 0x202 .. 0x222 calls the next one down
    let mut image = Vec::new();
    for level in 0..17u16 {
        let target = 0x202 + level * 2;
        image.extend_from_slice(&[0x20 | (target >> 8) as u8, target as u8]);
    }
    let mut chip8 = boot(&image);
    steps(&mut chip8, 16);
    assert_eq!(chip8.state().stack.sp(), 16);
    match chip8.step() {
        Err(Chip8Error::StackOverflow { addr }) => assert_eq!(addr, 0x220),
        other => panic!("expected StackOverflow, got {:?}", other),
    }
    assert_eq!(chip8.state().stack.sp(), 16);
}

#[test]
fn test_ret_on_empty_stack_underflows() {
    let mut chip8 = boot(&[0x00, 0xEE]);
    assert!(matches!(
        chip8.step(),
        Err(Chip8Error::StackUnderflow { addr: 0x200 })
    ));
}

#[test]
fn test_sub_borrow_scenario() {
    // LD V1, 3; LD V2, 5; SUB V1, V2
    let mut chip8 = boot(&[0x61, 0x03, 0x62, 0x05, 0x81, 0x25]);
    steps(&mut chip8, 3);
    assert_eq!(chip8.state().v[0x1], 254);
    assert_eq!(chip8.state().v[0xF], 0);
}

#[test]
fn test_draws_digit_glyph_twice() {
    // LD V3, 0xA; LD F, V3; DRW V0, V0, 5; DRW V0, V0, 5
    let mut chip8 = boot(&[0x63, 0x0A, 0xF3, 0x29, 0xD0, 0x05, 0xD0, 0x05]);
    steps(&mut chip8, 3);
    assert_eq!(chip8.state().i, 50);
    // top row of A is 0xF0
    let row = &chip8.frame_buffer().rows()[0];
    assert_eq!(row[0..5], [true, true, true, true, false]);
    assert_eq!(chip8.state().v[0xF], 0);

    chip8.step().unwrap();
    assert!(chip8.frame_buffer().is_blank());
    assert_eq!(chip8.state().v[0xF], 1);
}

#[test]
fn test_bcd_then_read_back() {
    // LD V5, 0xC8 (200); LD I, 0x300; LD B, V5; LD V2, [I]
    let mut chip8 = boot(&[0x65, 0xC8, 0xA3, 0x00, 0xF5, 0x33, 0xF2, 0x65]);
    steps(&mut chip8, 4);
    assert_eq!(chip8.state().v[0x0..0x3], [2, 0, 0]);
}

#[test]
fn test_skip_on_key() {
    // LD V0, 0x7; SKP V0; LD V1, 0x1; LD V2, 0x2
    let image = [0x60, 0x07, 0xE0, 0x9E, 0x61, 0x01, 0x62, 0x02];
    let mut chip8 = boot(&image);
    chip8.key_press(0x7);
    steps(&mut chip8, 3);
    assert_eq!(chip8.state().v[0x1], 0x0);
    assert_eq!(chip8.state().v[0x2], 0x2);
}

#[test]
fn test_skip_on_key_snapshot() {
    // LD V0, 0x7; SKNP V0; LD V1, 0x1; LD V2, 0x2
    let image = [0x60, 0x07, 0xE0, 0xA1, 0x61, 0x01, 0x62, 0x02];
    let mut keys = Keypad::new();
    keys.press(0x7);

    let mut held = boot(&image);
    held.set_keys(keys);
    steps(&mut held, 3);
    assert_eq!(held.state().v[0x1], 0x1);

    let mut released = boot(&image);
    released.set_keys(keys);
    released.set_keys(Keypad::new());
    steps(&mut released, 3);
    assert_eq!(released.state().v[0x1], 0x0);
    assert_eq!(released.state().v[0x2], 0x2);
}

#[test]
fn test_delay_timer_countdown_loop() {
    // 0x200: LD V0, 0x3C; LD DT, V0
    // 0x204: LD V1, DT; SE V1, 0; JP 0x204; LD V2, 0xFF
    let image = [
        0x60, 0x3C, 0xF0, 0x15, 0xF1, 0x07, 0x31, 0x00, 0x12, 0x04, 0x62, 0xFF,
    ];
    let mut chip8 = boot(&image);
    // 60 ticks take one second; give it a little longer to reach LD V2
    for _ in 0..70 {
        chip8.run_for(Duration::from_millis(16)).unwrap();
    }
    assert_eq!(chip8.state().timers.delay, 0);
    assert_eq!(chip8.state().v[0x2], 0xFF);
}

#[test]
fn test_wait_for_key_then_continue() {
    // LD V4, K; ADD V4, 1
    let mut chip8 = boot(&[0xF4, 0x0A, 0x74, 0x01]);
    chip8.run_for(Duration::from_millis(100)).unwrap();
    assert!(chip8.is_awaiting_key());
    assert_eq!(chip8.state().pc, 0x202);

    chip8.key_press(0xB);
    chip8.run_for(Duration::from_millis(4)).unwrap();
    assert!(!chip8.is_awaiting_key());
    assert_eq!(chip8.state().v[0x4], 0xC);
}

#[test]
fn test_rnd_is_reproducible_with_seed() {
    // RND V0..=VE, 0xFF
    let image: Vec<u8> = (0..0xF).flat_map(|x| [0xC0 | x, 0xFF]).collect();
    let mut a = boot(&image);
    let mut b = boot(&image);
    let mut c = boot(&image);
    c.seed_rng(0x8C);
    steps(&mut a, 15);
    steps(&mut b, 15);
    steps(&mut c, 15);
    assert_eq!(a.state().v, b.state().v);
    assert_ne!(a.state().v, c.state().v);
    let v = a.state().v;
    assert!(v[..0xF].iter().any(|&r| r != v[0x0]));
}

#[test]
fn test_quirks_change_load_store() {
    let config = Config {
        quirks: Quirks {
            load_store_increments_i: true,
            ..Quirks::default()
        },
        ..Config::default()
    };
    let mut chip8 = Chip8::with_config(config).unwrap();
    // LD I, 0x300; LD [I], V3
    chip8.load_image(&[0xA3, 0x00, 0xF3, 0x55]).unwrap();
    steps(&mut chip8, 2);
    assert_eq!(chip8.state().i, 0x304);
}

#[test]
fn test_image_too_large() {
    let mut chip8 = Chip8::new();
    let image = vec![0x00; 4096 - 0x200 + 1];
    assert!(matches!(
        chip8.load_image(&image),
        Err(Chip8Error::ImageTooLarge { .. })
    ));
    assert!(chip8.load_image(&image[1..]).is_ok());
}

#[test]
fn test_sys_runs_through_empty_memory() {
    let mut chip8 = boot(&[]);
    steps(&mut chip8, 10);
    assert_eq!(chip8.state().pc, 0x214);
}
