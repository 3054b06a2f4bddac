/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of GPCD assembly.

*/

pub type Column = std::ops::Range<usize>;

#[macro_use]
mod error;
mod lex;
mod options;
mod parse;
pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::{lex, lex_with};
pub use options::Options;
pub use parse::{LabelTable, Parser};

#[cfg(test)]
mod tests;
