use crate::helpers::*;

use common::command::Command;
use common::constants::*;
use slam_lib::SlamConfig;

#[test]
fn movement() {
    let mut host = reset_host(SlamConfig::movement());

    host.write_word_reg(CONTROL, 0x1).unwrap();

    host.write_word_reg(INPUT, 0x0005).unwrap();
    host.clock_cycles(2);
    let pos = host.read_word_reg(POSITION).unwrap();
    assert_eq!(pos & 0xffff, 5);
    assert_eq!((pos >> 16) & 0xffff, 0);
    assert_eq!(host.uo_out(), 0x05);

    host.write_word_reg(INPUT, (1 << 16) | 0x0003).unwrap();
    host.clock_cycles(2);
    let pos = host.read_word_reg(POSITION).unwrap();
    assert_eq!(pos & 0xffff, 5);
    assert_eq!((pos >> 16) & 0xffff, 3);
    assert_eq!(host.uo_out(), 0x35);
    assert!(!host.is_interrupt_asserted());

    host.write_word_reg(INPUT, 0x0400).unwrap();
    host.clock_cycles(2);
    assert!(host.is_interrupt_asserted(), "interrupt not raised when x > 1000");
    check_position(&mut host, 1029, 3);

    host.write_word_reg(INTERRUPT_ACK, 0x1).unwrap();
    host.clock_cycles(1);
    assert!(!host.is_interrupt_asserted(), "interrupt not cleared");
}

#[test]
fn spike() {
    let mut host = enabled_host(SlamConfig::spike());

    settle(&mut host, Command::east(0x20));
    check_position(&mut host, 0x20, 0);
    assert!(!host.is_interrupt_asserted());

    settle(&mut host, Command::north(0x30));
    check_position(&mut host, 0x20, 0x30);
    assert!(!host.is_interrupt_asserted());

    settle(&mut host, Command::east(0xffff));
    assert!(host.is_interrupt_asserted(), "interrupt not raised when x left 16 bits");
    check_position(&mut host, 0x1f, 0x30);

    host.write_byte_reg(INTERRUPT_ACK, 0x1).unwrap();
    assert!(!host.is_interrupt_asserted(), "interrupt not cleared");
}

// Spike packets also trip the movement threshold; only the limit differs.
#[test]
fn spike_under_movement_limit() {
    let mut host = enabled_host(SlamConfig::movement());

    settle(&mut host, Command::east(0x20));
    settle(&mut host, Command::north(0x30));
    assert!(!host.is_interrupt_asserted());
    settle(&mut host, Command::east(0xffff));
    assert!(host.is_interrupt_asserted());
    check_position(&mut host, 0x1f, 0x30);
}

#[test]
fn reset_mid_run() {
    let mut host = enabled_host(SlamConfig::movement());
    settle(&mut host, Command::east(2000));
    assert!(host.is_interrupt_asserted());

    host.reset();
    assert!(!host.is_interrupt_asserted());
    check_position(&mut host, 0, 0);

    // Reset also cleared the enable flag.
    settle(&mut host, Command::east(5));
    check_position(&mut host, 0, 0);
}
