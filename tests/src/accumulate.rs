use crate::helpers::*;

use common::command::{Command, Direction};
use common::constants::*;
use slam_lib::SlamConfig;

#[test]
fn east_then_north() {
    let mut host = enabled_host(SlamConfig::movement());
    let mut expected = 0u16;
    for m in [1u16, 7, 300, 0] {
        settle(&mut host, Command::east(m));
        settle(&mut host, Command::north(m));
        expected += m;
        check_position(&mut host, expected, expected);
    }
}

#[test]
fn west_and_south_subtract() {
    let mut host = enabled_host(SlamConfig::movement());
    settle(&mut host, Command::east(10));
    settle(&mut host, Command::north(20));
    settle(&mut host, Command::west(4));
    settle(&mut host, Command::south(5));
    check_position(&mut host, 6, 15);

    settle(&mut host, Command::west(7));
    settle(&mut host, Command::south(16));
    check_position(&mut host, 0xffff, 0xffff);
}

#[test]
fn wraps_modulo_16_bits() {
    let mut host = enabled_host(SlamConfig::movement());
    settle(&mut host, Command::north(0xfff0));
    settle(&mut host, Command::north(0x0020));
    check_position(&mut host, 0, 0x10);

    settle(&mut host, Command::east(0xffff));
    settle(&mut host, Command::east(0xffff));
    check_position(&mut host, 0xfffe, 0x10);
}

#[test]
fn disabled_ignores_commands() {
    let mut host = reset_host(SlamConfig::movement());
    for dir in Direction::ALL {
        settle(&mut host, Command::new(dir, 0x1234));
    }
    check_position(&mut host, 0, 0);
    assert!(!host.is_interrupt_asserted());

    host.write_word_reg(CONTROL, 0x1).unwrap();
    settle(&mut host, Command::east(3));
    host.write_word_reg(CONTROL, 0x0).unwrap();
    settle(&mut host, Command::east(3));
    check_position(&mut host, 3, 0);
}

#[test]
fn control_write_replaces_field() {
    let mut host = reset_host(SlamConfig::movement());
    host.write_word_reg(CONTROL, 0xff).unwrap();
    assert_eq!(host.read_word_reg(CONTROL).unwrap(), 0xff);
    host.write_byte_reg(CONTROL, 0x2).unwrap();
    assert_eq!(host.read_word_reg(CONTROL).unwrap(), 0x2);

    // Bit 0 is the only one that matters.
    settle(&mut host, Command::east(3));
    check_position(&mut host, 0, 0);
}

#[test]
fn commit_latency() {
    let mut host = enabled_host(SlamConfig::movement());
    host.write_command(Command::east(5)).unwrap();
    assert_eq!(host.uo_out(), 0x00);

    // The read samples before its own clock edge, which is the commit edge.
    assert_eq!(host.read_word_reg(POSITION).unwrap(), 0);
    assert_eq!(host.read_word_reg(POSITION).unwrap(), 5);
    assert_eq!(host.uo_out(), 0x05);
}

#[test]
fn spike_ignores_west_and_south() {
    let mut host = enabled_host(SlamConfig::spike());
    settle(&mut host, Command::east(9));
    host.write_word_reg(INPUT, 0x2_0004).unwrap();
    host.clock_cycles(COMMIT_LATENCY);
    host.write_word_reg(INPUT, 0x3_0004).unwrap();
    host.clock_cycles(COMMIT_LATENCY);
    check_position(&mut host, 9, 0);
}
