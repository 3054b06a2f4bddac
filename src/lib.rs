//! # GPCD
//!
//! An 8-bit assembler and virtual machine for programmable terminals.
//!
//! Source text is assembled into a flat stream of tagged [`Value`]s, loaded
//! into the 200-cell protected region of a 256-cell [`Memory`], and run one
//! step per host tick by a [`VirtualMachine`]. Input and output go through
//! memory-mapped pins starting at address `0xC9`.
//!
//! ```
//! use gpcd::mach::{Register, VirtualMachine};
//!
//! let (program, _labels) = gpcd::assemble(
//!     "mov 10, #X\n_loop:\nsub 1, #X\ncmp #X, 4\njmc _loop\nhlt",
//! ).unwrap();
//! let mut vm = VirtualMachine::new();
//! vm.load_program(&program).unwrap();
//! while !vm.halted() {
//!     vm.fetch_and_run().unwrap();
//! }
//! assert_eq!(vm.register_get(Register::X), 0);
//! ```
//!
//! [`Value`]: mach::Value
//! [`Memory`]: mach::Memory
//! [`VirtualMachine`]: mach::VirtualMachine

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/instructions.rs"]
#[allow(non_snake_case)]
pub mod __Instructions;

pub mod lang;
pub mod mach;

use lang::{Error, LabelTable, Options, Parser};
use mach::Value;

/// Assembles `source` with the default dialect.
pub fn assemble(source: &str) -> Result<(Vec<Value>, LabelTable), Error> {
    assemble_with(source, Options::default())
}

pub fn assemble_with(source: &str, options: Options) -> Result<(Vec<Value>, LabelTable), Error> {
    let mut parser = Parser::with_options(source, options)?;
    parser.parse_all()?;
    Ok(parser.into_parts())
}
