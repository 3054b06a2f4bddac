use gpcd::mach::{Event, VirtualMachine};

pub fn load(source: &str) -> VirtualMachine {
    let (program, _labels) = gpcd::assemble(source).unwrap();
    let mut vm = VirtualMachine::new();
    vm.load_program(&program).unwrap();
    vm
}

pub fn exec(source: &str) -> VirtualMachine {
    exec_n(source, 5000)
}

pub fn exec_n(source: &str, cycles: usize) -> VirtualMachine {
    let mut vm = load(source);
    match vm.execute(cycles) {
        Event::Halted => vm,
        Event::Running => panic!("{} execution cycles exceeded", cycles),
        event => panic!("unexpected {:?} at pc {}", event, vm.pc()),
    }
}
