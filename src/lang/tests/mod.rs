use super::*;
use crate::mach::Value;

mod parse_test;

fn assemble(s: &str) -> Vec<Value> {
    let mut parser = Parser::new(s).unwrap();
    parser.parse_all().unwrap();
    parser.program_output().to_vec()
}

fn assemble_err(s: &str, options: Options) -> Error {
    match Parser::with_options(s, options) {
        Err(e) => e,
        Ok(mut parser) => parser.parse_all().unwrap_err(),
    }
}
