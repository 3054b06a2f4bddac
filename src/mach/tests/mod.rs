use super::*;
use crate::lang::{ErrorCode, Parser};

mod op_test;

fn machine(source: &str) -> VirtualMachine {
    let mut parser = Parser::new(source).unwrap();
    parser.parse_all().unwrap();
    let mut vm = VirtualMachine::new();
    vm.load_program(parser.program_output()).unwrap();
    vm
}

fn run(vm: &mut VirtualMachine) -> usize {
    run_cycles(vm, 5000)
}

// Returns the number of steps taken before halting.
fn run_cycles(vm: &mut VirtualMachine, cycles: usize) -> usize {
    for step in 0..cycles {
        if vm.halted() {
            return step;
        }
        vm.fetch_and_run().unwrap();
    }
    panic!("{} execution cycles exceeded", cycles);
}

fn step_n(vm: &mut VirtualMachine, n: usize) {
    for _ in 0..n {
        vm.fetch_and_run().unwrap();
    }
}
