//! Interpreter execution engine.
//!
//! Implements the fetch-decode-execute cycle over the ten-instruction
//! set and the cooperative suspension protocol that lets a host drive
//! the machine one input/output value at a time.

use crate::vm::decode::{self, DecodeError, Op};
use crate::vm::memory::{Memory, MemoryError};
use crate::vm::operand;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Interpreter execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VmState {
    /// The interpreter can execute further cycles.
    Running,
    /// The terminating opcode (99) was reached.
    Halted,
    /// A fatal condition was raised; memory is frozen as of the fault.
    Faulted,
}

/// Why a cycle suspended execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suspension {
    /// An output instruction stored a value in the last-output slot.
    ProducedOutput,
    /// An input instruction consumed the pending input.
    ConsumedInput,
}

/// Result signal of a single instruction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// Ordinary instruction completed; the pointer auto-advanced.
    Next,
    /// A jump set the pointer explicitly; no auto-advance happened.
    JumpTaken,
    /// Execution paused for host interaction. The instruction is
    /// fully consumed; stepping again resumes at the next one.
    Suspended(Suspension),
    /// Terminal state; no further cycles are possible.
    Halted,
}

/// What stopped a run-mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    ProducedOutput,
    ConsumedInput,
    Halted,
}

/// The interpreter: memory, instruction pointer, relative base, and
/// the single-value input/output slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interpreter {
    mem: Memory,
    ip: i64,
    relative_base: i64,
    input: i64,
    output: Option<i64>,
    state: VmState,
    cycles: u64,
}

impl Interpreter {
    /// Create an interpreter with the program copied into memory,
    /// pointer and relative base at zero, and the pending-input slot
    /// primed with `initial_input`.
    pub fn new(program: &[i64], initial_input: i64) -> Self {
        Self {
            mem: Memory::from_program(program),
            ip: 0,
            relative_base: 0,
            input: initial_input,
            output: None,
            state: VmState::Running,
            cycles: 0,
        }
    }

    /// Execute a single instruction cycle.
    ///
    /// On a fatal condition the interpreter moves to [`VmState::Faulted`]
    /// and memory is never mutated again.
    pub fn step(&mut self) -> Result<Signal, ExecError> {
        if self.state != VmState::Running {
            return Err(ExecError::NotRunning(self.state));
        }
        match self.cycle() {
            Ok(signal) => {
                self.cycles += 1;
                Ok(signal)
            }
            Err(e) => {
                self.state = VmState::Faulted;
                Err(e)
            }
        }
    }

    fn cycle(&mut self) -> Result<Signal, ExecError> {
        // Fetch and decode
        let word = self.mem.read(self.ip)?;
        let decoded = decode::decode(word);
        let op = Op::from_opcode(decoded.opcode)
            .ok_or(DecodeError::UnknownOpcode(decoded.opcode))?;
        let modes = decode::modes_for(op, decoded.mode_digits)?;

        // Resolve operands: values for reads, addresses for writes
        let p = operand::resolve(op, modes, &self.mem, self.ip, self.relative_base)?;

        // Execute
        let signal = match op {
            Op::Add => {
                let sum = p[0].checked_add(p[1]).ok_or(ExecError::Overflow)?;
                self.mem.write(p[2], sum)?;
                Signal::Next
            }

            Op::Mul => {
                let product = p[0].checked_mul(p[1]).ok_or(ExecError::Overflow)?;
                self.mem.write(p[2], product)?;
                Signal::Next
            }

            Op::Input => {
                self.mem.write(p[0], self.input)?;
                Signal::Suspended(Suspension::ConsumedInput)
            }

            Op::Output => {
                self.output = Some(p[0]);
                Signal::Suspended(Suspension::ProducedOutput)
            }

            Op::JumpIfTrue => {
                if p[0] != 0 {
                    self.ip = p[1];
                    Signal::JumpTaken
                } else {
                    Signal::Next
                }
            }

            Op::JumpIfFalse => {
                if p[0] == 0 {
                    self.ip = p[1];
                    Signal::JumpTaken
                } else {
                    Signal::Next
                }
            }

            Op::LessThan => {
                self.mem.write(p[2], (p[0] < p[1]) as i64)?;
                Signal::Next
            }

            Op::Equals => {
                self.mem.write(p[2], (p[0] == p[1]) as i64)?;
                Signal::Next
            }

            Op::AdjustRelativeBase => {
                self.relative_base = self
                    .relative_base
                    .checked_add(p[0])
                    .ok_or(ExecError::Overflow)?;
                Signal::Next
            }

            Op::Halt => {
                self.state = VmState::Halted;
                Signal::Halted
            }
        };

        // Advance past the instruction unless a jump set the pointer.
        // A suspended instruction is fully consumed, so it advances
        // too; after a halt the pointer no longer matters.
        if !matches!(signal, Signal::JumpTaken | Signal::Halted) {
            self.ip += op.len();
        }

        Ok(signal)
    }

    /// Run until an output is produced or the program halts.
    ///
    /// `input` overwrites the pending-input slot before stepping
    /// resumes; it is consumed only if an input instruction executes.
    pub fn run_until_output(&mut self, input: i64) -> Result<(Option<i64>, StopReason), ExecError> {
        self.input = input;
        loop {
            match self.step()? {
                Signal::Suspended(Suspension::ProducedOutput) => {
                    return Ok((self.output, StopReason::ProducedOutput));
                }
                Signal::Halted => return Ok((self.output, StopReason::Halted)),
                _ => {}
            }
        }
    }

    /// Run until an input instruction consumes the pending input or
    /// the program halts.
    ///
    /// The returned output may be stale from an earlier output
    /// instruction; `None` means no output was ever produced.
    pub fn run_until_input_consumed(
        &mut self,
        input: i64,
    ) -> Result<(Option<i64>, StopReason), ExecError> {
        self.input = input;
        loop {
            match self.step()? {
                Signal::Suspended(Suspension::ConsumedInput) => {
                    return Ok((self.output, StopReason::ConsumedInput));
                }
                Signal::Halted => return Ok((self.output, StopReason::Halted)),
                _ => {}
            }
        }
    }

    /// Run to completion, satisfying every input request with `input`.
    ///
    /// Returns the final last-output value, or `None` if the program
    /// never produced one.
    pub fn run_until_halt(&mut self, input: i64) -> Result<Option<i64>, ExecError> {
        self.input = input;
        loop {
            if let Signal::Halted = self.step()? {
                return Ok(self.output);
            }
        }
    }

    /// Current execution state.
    pub fn state(&self) -> VmState {
        self.state
    }

    /// Check if the interpreter has halted normally.
    pub fn is_halted(&self) -> bool {
        self.state == VmState::Halted
    }

    /// Check if the interpreter can execute further cycles.
    pub fn is_running(&self) -> bool {
        self.state == VmState::Running
    }

    /// The last value stored by an output instruction, if any.
    pub fn last_output(&self) -> Option<i64> {
        self.output
    }

    /// Number of instructions executed so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Current relative base register.
    pub fn relative_base(&self) -> i64 {
        self.relative_base
    }

    /// Current instruction pointer.
    pub fn ip(&self) -> i64 {
        self.ip
    }

    /// Read-only view of memory. The interpreter is the only writer.
    pub fn memory(&self) -> &Memory {
        &self.mem
    }
}

/// Errors that can occur during execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    #[error("interpreter not running: {0:?}")]
    NotRunning(VmState),

    #[error("memory error: {0}")]
    Memory(#[from] MemoryError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("arithmetic overflow")]
    Overflow,
}
