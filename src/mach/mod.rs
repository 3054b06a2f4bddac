/*!
## Rust Machine Module

This Rust module is the GPCD virtual machine: memory, registers and the
fetch-execute interpreter.

*/

pub type Address = usize;

pub const MAX_MEMORY_SIZE: usize = 256;
pub const MAX_PROGRAM_SIZE: usize = 200;
/// Pin 0 lives here; pin `n` at `DMA_OFFSET + n`.
pub const DMA_OFFSET: Address = 0xC9;

mod listing;
mod memory;
mod opcode;
mod register;
mod runtime;
mod stack;
mod value;

pub use listing::Listing;
pub use memory::Memory;
pub use opcode::Comparison;
pub use opcode::Opcode;
pub use register::Register;
pub use register::Registers;
pub use runtime::Event;
pub use runtime::VirtualMachine;
pub use stack::Stack;
pub use value::Value;

#[cfg(test)]
mod tests;
