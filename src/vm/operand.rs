//! Operand resolution.
//!
//! Maps an instruction's raw parameters (the cells immediately after
//! the instruction word) to operands, according to each parameter's
//! addressing mode and role. Read parameters resolve to values; write
//! parameters resolve to destination addresses.

use crate::vm::decode::{Mode, Op, Role};
use crate::vm::memory::{Memory, MemoryError};

/// Resolve a read parameter to its value.
pub fn read_value(
    mem: &Memory,
    mode: Mode,
    raw: i64,
    relative_base: i64,
) -> Result<i64, MemoryError> {
    match mode {
        Mode::Positional => mem.read(raw),
        Mode::Immediate => Ok(raw),
        Mode::Relative => mem.read(raw + relative_base),
    }
}

/// Resolve a write parameter to its destination address.
///
/// Positional and immediate modes are indistinguishable for writes:
/// the raw parameter is the target address either way. A negative
/// result faults at the subsequent memory write.
pub fn write_address(mode: Mode, raw: i64, relative_base: i64) -> i64 {
    match mode {
        Mode::Positional | Mode::Immediate => raw,
        Mode::Relative => raw + relative_base,
    }
}

/// Resolve every parameter an operation declares.
///
/// Raw parameters are read from the cells following the instruction
/// word at `ip`, defaulting to zero where memory has not been
/// extended that far. Unused slots of the result are zero.
pub fn resolve(
    op: Op,
    modes: [Mode; 3],
    mem: &Memory,
    ip: i64,
    relative_base: i64,
) -> Result<[i64; 3], MemoryError> {
    let mut out = [0i64; 3];
    for (i, role) in op.params().iter().enumerate() {
        let raw = mem.read(ip + 1 + i as i64)?;
        out[i] = match role {
            Role::Read => read_value(mem, modes[i], raw, relative_base)?,
            Role::Write => write_address(modes[i], raw, relative_base),
        };
    }
    Ok(out)
}
