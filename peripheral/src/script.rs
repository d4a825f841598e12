//! Line-oriented scenario scripts for driving a [`Host`].
//!
//! ```text
//! reset
//! write 0x04 1        # enable updates
//! move east 5
//! wait 2
//! expect pos 5 0
//! expect out 0x05
//! ```
//!
//! `spike` is accepted as a synonym for `move`. `expect` stops the run on the
//! first mismatch.

use std::io::Write;

use common::command::{Command, Direction};
use common::constants::INPUT;

use crate::host::Host;
use crate::io::{BusError, MMIOHandler};
use crate::peripheral_state::Position;

use log::debug;
use num_traits::Num;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Position(Position),
    Irq(bool),
    Out(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Reset,
    Write(u8, u32),
    WriteByte(u8, u8),
    Read(u8),
    ReadByte(u8),
    Wait(usize),
    Move(Command),
    Irq,
    Out,
    Expect(Expectation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub num: usize, // 1-based
    pub op: Op,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Line {line}: unknown operation {op:?}")]
    UnknownOp { line: usize, op: String },

    #[error("Line {line}: {op} takes {expected} operand(s), got {got}")]
    Arity { line: usize, op: String, expected: usize, got: usize },

    #[error("Line {line}: bad number {text:?}")]
    BadNumber { line: usize, text: String },

    #[error("Line {line}: unknown direction {text:?}")]
    BadDirection { line: usize, text: String },

    #[error("Line {line}: expected on or off, got {text:?}")]
    BadSwitch { line: usize, text: String },

    #[error("Line {line}: {source}")]
    Bus { line: usize, source: BusError },

    #[error("Line {line}: expected {expected}, got {actual}")]
    Expectation { line: usize, expected: String, actual: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

////////////////////////////////////////////////////////////////////////////////
// Parse
////////////////////////////////////////////////////////////////////////////////

fn parse_num<T: Num>(line: usize, text: &str) -> Result<T, ScriptError> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => T::from_str_radix(hex, 16),
        None => T::from_str_radix(text, 10),
    };
    parsed.map_err(|_| ScriptError::BadNumber { line, text: text.to_string() })
}

fn parse_direction(line: usize, text: &str) -> Result<Direction, ScriptError> {
    if let Some(dir) = Direction::from_name(text) {
        return Ok(dir);
    }
    let code: u32 = parse_num(line, text)
        .map_err(|_| ScriptError::BadDirection { line, text: text.to_string() })?;
    Direction::ALL.into_iter()
        .find(|dir| dir.code() == code)
        .ok_or(ScriptError::BadDirection { line, text: text.to_string() })
}

fn parse_switch(line: usize, text: &str) -> Result<bool, ScriptError> {
    match text {
        "on" | "1" => Ok(true),
        "off" | "0" => Ok(false),
        _ => Err(ScriptError::BadSwitch { line, text: text.to_string() }),
    }
}

fn arity(line: usize, op: &str, args: &[&str], expected: usize) -> Result<(), ScriptError> {
    if args.len() != expected {
        return Err(ScriptError::Arity { line, op: op.to_string(), expected, got: args.len() });
    }
    Ok(())
}

fn parse_expectation(line: usize, args: &[&str]) -> Result<Expectation, ScriptError> {
    let Some((&what, rest)) = args.split_first() else {
        return Err(ScriptError::Arity { line, op: "expect".to_string(), expected: 2, got: 0 });
    };
    let op = format!("expect {what}");
    match what {
        "pos" => {
            arity(line, &op, rest, 2)?;
            let x = parse_num(line, rest[0])?;
            let y = parse_num(line, rest[1])?;
            Ok(Expectation::Position(Position::new(x, y)))
        }
        "irq" => {
            arity(line, &op, rest, 1)?;
            Ok(Expectation::Irq(parse_switch(line, rest[0])?))
        }
        "out" => {
            arity(line, &op, rest, 1)?;
            Ok(Expectation::Out(parse_num(line, rest[0])?))
        }
        _ => Err(ScriptError::UnknownOp { line, op }),
    }
}

fn parse_line(line: usize, text: &str) -> Result<Option<Op>, ScriptError> {
    let text = text.split('#').next().unwrap_or("");
    let words: Vec<&str> = text.split_whitespace().collect();
    let Some((&op, args)) = words.split_first() else {
        return Ok(None);
    };

    let op = match op {
        "reset" => {
            arity(line, op, args, 0)?;
            Op::Reset
        }
        "write" => {
            arity(line, op, args, 2)?;
            Op::Write(parse_num(line, args[0])?, parse_num(line, args[1])?)
        }
        "writeb" => {
            arity(line, op, args, 2)?;
            Op::WriteByte(parse_num(line, args[0])?, parse_num(line, args[1])?)
        }
        "read" => {
            arity(line, op, args, 1)?;
            Op::Read(parse_num(line, args[0])?)
        }
        "readb" => {
            arity(line, op, args, 1)?;
            Op::ReadByte(parse_num(line, args[0])?)
        }
        "wait" => {
            arity(line, op, args, 1)?;
            Op::Wait(parse_num(line, args[0])?)
        }
        "move" | "spike" => {
            arity(line, op, args, 2)?;
            let dir = parse_direction(line, args[0])?;
            Op::Move(Command::new(dir, parse_num(line, args[1])?))
        }
        "irq" => {
            arity(line, op, args, 0)?;
            Op::Irq
        }
        "out" => {
            arity(line, op, args, 0)?;
            Op::Out
        }
        "expect" => Op::Expect(parse_expectation(line, args)?),
        _ => return Err(ScriptError::UnknownOp { line, op: op.to_string() }),
    };
    Ok(Some(op))
}

pub fn parse(input: &str) -> Result<Vec<Line>, ScriptError> {
    let mut lines = Vec::new();
    for (i, text) in input.lines().enumerate() {
        let num = i + 1;
        if let Some(op) = parse_line(num, text)? {
            lines.push(Line { num, op });
        }
    }
    Ok(lines)
}

////////////////////////////////////////////////////////////////////////////////
// Run
////////////////////////////////////////////////////////////////////////////////

fn on_off(val: bool) -> &'static str {
    if val { "on" } else { "off" }
}

fn check<T: PartialEq + std::fmt::Debug>(line: usize, expected: T, actual: T) -> Result<(), ScriptError> {
    if expected != actual {
        return Err(ScriptError::Expectation {
            line,
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        });
    }
    Ok(())
}

fn run_line<D: MMIOHandler>(host: &mut Host<D>, line: &Line, out: &mut impl Write)
    -> Result<(), ScriptError> {

    let num = line.num;
    let bus = |source: BusError| ScriptError::Bus { line: num, source };
    debug!("Script: line {num}: {:?}", line.op);

    match line.op {
        Op::Reset => host.reset(),
        Op::Write(addr, val) => host.write_word_reg(addr, val).map_err(bus)?,
        Op::WriteByte(addr, val) => host.write_byte_reg(addr, val).map_err(bus)?,
        Op::Read(addr) => {
            let val = host.read_word_reg(addr).map_err(bus)?;
            writeln!(out, "{addr:#04x}: {val:#010x}")?;
        }
        Op::ReadByte(addr) => {
            let val = host.read_byte_reg(addr).map_err(bus)?;
            writeln!(out, "{addr:#04x}: {val:#04x}")?;
        }
        Op::Wait(n) => host.clock_cycles(n),
        Op::Move(cmd) => host.write_word_reg(INPUT, cmd.encode()).map_err(bus)?,
        Op::Irq => writeln!(out, "irq: {}", on_off(host.is_interrupt_asserted()))?,
        Op::Out => writeln!(out, "out: {:#04x}", host.uo_out())?,
        Op::Expect(Expectation::Position(pos)) => {
            check(num, pos, host.read_position().map_err(bus)?)?;
        }
        Op::Expect(Expectation::Irq(val)) => {
            check(num, on_off(val), on_off(host.is_interrupt_asserted()))?;
        }
        Op::Expect(Expectation::Out(val)) => check(num, val, host.uo_out())?,
    }
    Ok(())
}

pub fn run<D: MMIOHandler>(host: &mut Host<D>, script: &[Line], out: &mut impl Write)
    -> Result<(), ScriptError> {

    for line in script {
        run_line(host, line, out)?;
    }
    Ok(())
}
