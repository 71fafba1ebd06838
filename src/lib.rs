//! # Intcode VM
//!
//! A small virtual machine that executes programs encoded as a
//! sequence of integers stored in addressable memory. Instructions
//! carry variable parameter-addressing modes (positional, immediate,
//! relative); the machine mutates its memory in place and exposes a
//! single-value input/output channel so host code can drive it
//! interactively, one value at a time.

pub mod program;
pub mod vm;

// Re-export commonly used types
pub use program::{load_program, parse_program, ProgramError};
pub use vm::{
    ExecError, Interpreter, Memory, MemoryError, Mode, Op, Signal, StopReason, Suspension, VmState,
};
