//! Instruction decoder.
//!
//! An instruction word packs the opcode into its two low decimal
//! digits and the addressing mode of parameters 1-3 into the hundreds,
//! thousands and ten-thousands digits. Decoding the digit split never
//! fails; an opcode with no registered handler or a mode digit outside
//! 0-2 is a fatal condition raised by the execution engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameter addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Operand is the value at the address given by the raw parameter.
    Positional,
    /// Operand is the raw parameter itself.
    Immediate,
    /// Operand is the value at (raw parameter + relative base).
    Relative,
}

impl Mode {
    /// Create from a decoded mode digit.
    pub fn from_digit(digit: i64) -> Result<Self, DecodeError> {
        match digit {
            0 => Ok(Mode::Positional),
            1 => Ok(Mode::Immediate),
            2 => Ok(Mode::Relative),
            _ => Err(DecodeError::InvalidAddressingMode(digit)),
        }
    }
}

/// Role of an instruction parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Parameter resolves to a value.
    Read,
    /// Parameter resolves to a destination address.
    Write,
}

/// Decoded operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    /// dest := a + b
    Add,
    /// dest := a * b
    Mul,
    /// dest := pending input
    Input,
    /// last output := a
    Output,
    /// if a != 0 then pointer := b
    JumpIfTrue,
    /// if a == 0 then pointer := b
    JumpIfFalse,
    /// dest := 1 if a < b else 0
    LessThan,
    /// dest := 1 if a == b else 0
    Equals,
    /// relative base += a
    AdjustRelativeBase,
    /// terminate execution
    Halt,
}

impl Op {
    /// Look up the operation for an opcode, if one is registered.
    pub fn from_opcode(opcode: i64) -> Option<Self> {
        match opcode {
            1 => Some(Op::Add),
            2 => Some(Op::Mul),
            3 => Some(Op::Input),
            4 => Some(Op::Output),
            5 => Some(Op::JumpIfTrue),
            6 => Some(Op::JumpIfFalse),
            7 => Some(Op::LessThan),
            8 => Some(Op::Equals),
            9 => Some(Op::AdjustRelativeBase),
            99 => Some(Op::Halt),
            _ => None,
        }
    }

    /// The fixed parameter-role table for this operation.
    pub fn params(self) -> &'static [Role] {
        use Role::{Read, Write};
        match self {
            Op::Add | Op::Mul | Op::LessThan | Op::Equals => &[Read, Read, Write],
            Op::Input => &[Write],
            Op::Output | Op::AdjustRelativeBase => &[Read],
            Op::JumpIfTrue | Op::JumpIfFalse => &[Read, Read],
            Op::Halt => &[],
        }
    }

    /// Instruction length in cells (opcode word + parameters).
    pub fn len(self) -> i64 {
        self.params().len() as i64 + 1
    }
}

/// A decoded instruction word: the raw opcode plus the three mode
/// digits, most-significant digit mapping to the last parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub opcode: i64,
    pub mode_digits: [i64; 3],
}

/// Split an instruction word into opcode and mode digits.
///
/// Pure digit extraction with no failure modes; validity of the
/// opcode and digits is checked by the caller.
pub fn decode(word: i64) -> Decoded {
    Decoded {
        opcode: word % 100,
        mode_digits: [word / 100 % 10, word / 1_000 % 10, word / 10_000 % 10],
    }
}

/// Validate the mode digits an operation actually declares.
///
/// Undeclared digit positions are ignored, so garbage above an
/// instruction's arity cannot fault it.
pub fn modes_for(op: Op, digits: [i64; 3]) -> Result<[Mode; 3], DecodeError> {
    let mut modes = [Mode::Positional; 3];
    for i in 0..op.params().len() {
        modes[i] = Mode::from_digit(digits[i])?;
    }
    Ok(modes)
}

/// Errors that can occur while decoding an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unknown opcode: {0}")]
    UnknownOpcode(i64),

    #[error("invalid addressing mode: {0}")]
    InvalidAddressingMode(i64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_plain_opcode() {
        let d = decode(2);
        assert_eq!(d.opcode, 2);
        assert_eq!(d.mode_digits, [0, 0, 0]);
    }

    #[test]
    fn test_decode_mixed_modes() {
        // 21101: opcode 01, modes 1, 1, 2 (params 1-3)
        let d = decode(21101);
        assert_eq!(d.opcode, 1);
        assert_eq!(d.mode_digits, [1, 1, 2]);
    }

    #[test]
    fn test_decode_halt() {
        assert_eq!(decode(99).opcode, 99);
        assert_eq!(Op::from_opcode(99), Some(Op::Halt));
    }

    #[test]
    fn test_unknown_opcode() {
        assert_eq!(Op::from_opcode(0), None);
        assert_eq!(Op::from_opcode(10), None);
        assert_eq!(Op::from_opcode(98), None);
    }

    #[test]
    fn test_mode_from_digit() {
        assert_eq!(Mode::from_digit(0), Ok(Mode::Positional));
        assert_eq!(Mode::from_digit(1), Ok(Mode::Immediate));
        assert_eq!(Mode::from_digit(2), Ok(Mode::Relative));
        assert_eq!(
            Mode::from_digit(3),
            Err(DecodeError::InvalidAddressingMode(3))
        );
    }

    #[test]
    fn test_modes_ignore_undeclared_digits() {
        // Halt takes no parameters, so a garbage digit cannot fault it
        let d = decode(99_999);
        assert_eq!(d.opcode, 99);
        assert!(modes_for(Op::Halt, d.mode_digits).is_ok());
    }

    #[test]
    fn test_param_tables() {
        assert_eq!(Op::Add.len(), 4);
        assert_eq!(Op::Input.len(), 2);
        assert_eq!(Op::JumpIfTrue.len(), 3);
        assert_eq!(Op::Halt.len(), 1);
        assert_eq!(Op::Output.params(), &[Role::Read]);
    }

    proptest! {
        #[test]
        fn prop_digit_split_reassembles(opcode in 0i64..100, m1 in 0i64..10, m2 in 0i64..10, m3 in 0i64..10) {
            let word = opcode + m1 * 100 + m2 * 1_000 + m3 * 10_000;
            let d = decode(word);
            prop_assert_eq!(d.opcode, opcode);
            prop_assert_eq!(d.mode_digits, [m1, m2, m3]);
        }

        #[test]
        fn prop_opcode_is_word_mod_100(word in 0i64..1_000_000) {
            prop_assert_eq!(decode(word).opcode, word % 100);
        }
    }
}
