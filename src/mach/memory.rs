use super::{Address, Value, DMA_OFFSET, MAX_MEMORY_SIZE, MAX_PROGRAM_SIZE};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Machine memory
///
/// 256 cells. `[0, 200)` holds the program and refuses checked writes;
/// `[200, 256)` is free, with the pins mapped from `DMA_OFFSET` up.
#[derive(Clone, PartialEq)]
pub struct Memory {
    cells: [Value; MAX_MEMORY_SIZE],
}

impl Default for Memory {
    fn default() -> Memory {
        Memory {
            cells: [Value::Null; MAX_MEMORY_SIZE],
        }
    }
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }

    pub fn is_protected(address: Address) -> bool {
        address < MAX_PROGRAM_SIZE
    }

    fn check_bounds(address: Address) -> Result<()> {
        if address >= MAX_MEMORY_SIZE {
            Err(error!(MemoryFault, @address))
        } else {
            Ok(())
        }
    }

    pub fn read(&self, address: Address) -> Result<Value> {
        Memory::check_bounds(address)?;
        Ok(self.cells[address])
    }

    pub fn write(&mut self, address: Address, value: Value) -> Result<()> {
        Memory::check_bounds(address)?;
        if Memory::is_protected(address) {
            return Err(error!(ProtectionFault, @address));
        }
        self.cells[address] = value;
        Ok(())
    }

    /// Skips the protection check. Bounds are still enforced.
    pub fn write_no_check(&mut self, address: Address, value: Value) -> Result<()> {
        Memory::check_bounds(address)?;
        self.cells[address] = value;
        Ok(())
    }

    /// Sets every pin cell back to `Null`. The protected region is untouched.
    pub fn clear_dma(&mut self) {
        for cell in self.cells[DMA_OFFSET..].iter_mut() {
            *cell = Value::Null;
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.cells.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.cells
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.cells.iter().enumerate().filter(|(_, v)| !v.is_null()))
            .finish()
    }
}

/// One line per non-null cell.
impl std::fmt::Display for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (address, value) in self.cells.iter().enumerate() {
            if !value.is_null() {
                writeln!(f, "{}: {}", address, value)?;
            }
        }
        Ok(())
    }
}
