//! The interpreter core.
//!
//! Four pieces, composed bottom-up:
//! - [`memory`]: growable integer-addressed memory with unread-is-zero
//!   semantics
//! - [`decode`]: instruction word splitting and the static opcode table
//! - [`operand`]: parameter resolution across the three addressing modes
//! - [`execute`]: the fetch-decode-execute engine and the cooperative
//!   suspension protocol

pub mod decode;
pub mod execute;
pub mod memory;
pub mod operand;

pub use decode::{DecodeError, Mode, Op, Role};
pub use execute::{ExecError, Interpreter, Signal, StopReason, Suspension, VmState};
pub use memory::{Memory, MemoryError};
