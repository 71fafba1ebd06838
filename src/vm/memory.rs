//! Interpreter memory subsystem.
//!
//! Memory is an integer-addressed array of signed 64-bit cells,
//! initialized from the program and logically infinite: any address
//! beyond the loaded length reads as zero, and writes past the end
//! zero-extend the backing buffer up to the target address.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Interpreter memory: a growable buffer of `i64` cells.
#[derive(Clone, Serialize, Deserialize)]
pub struct Memory {
    cells: Vec<i64>,
}

impl Memory {
    /// Create memory initialized from a program.
    ///
    /// The program is copied; later mutation of the caller's slice
    /// does not affect this memory.
    pub fn from_program(program: &[i64]) -> Self {
        Self {
            cells: program.to_vec(),
        }
    }

    /// Read the cell at `addr`.
    ///
    /// Addresses past the loaded length read as zero. A negative
    /// address is a fault in the running program.
    #[inline]
    pub fn read(&self, addr: i64) -> Result<i64, MemoryError> {
        let index = Self::index(addr)?;
        Ok(self.cells.get(index).copied().unwrap_or(0))
    }

    /// Write `value` to the cell at `addr`, zero-extending memory if
    /// the address lies past the current end.
    #[inline]
    pub fn write(&mut self, addr: i64, value: i64) -> Result<(), MemoryError> {
        let index = Self::index(addr)?;
        if index >= self.cells.len() {
            self.cells.resize(index + 1, 0);
        }
        self.cells[index] = value;
        Ok(())
    }

    fn index(addr: i64) -> Result<usize, MemoryError> {
        usize::try_from(addr).map_err(|_| MemoryError::NegativeAddress(addr))
    }

    /// Number of cells currently backed by storage.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if no cells are loaded.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// View the backed cells as a slice.
    pub fn cells(&self) -> &[i64] {
        &self.cells
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let non_zero = self.cells.iter().filter(|&&c| c != 0).count();
        f.debug_struct("Memory")
            .field("non_zero_cells", &non_zero)
            .field("total_cells", &self.cells.len())
            .finish()
    }
}

/// Errors that can occur during memory operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// A resolved address is negative. There is no defined memory
    /// location there; this is a defect in the source program.
    #[error("negative memory address: {0}")]
    NegativeAddress(i64),
}
