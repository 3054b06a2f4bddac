use super::*;

#[test]
fn test_mov_immediate() {
    for imm in [0u8, 1, 42, 255].iter() {
        let mut vm = machine(&format!("mov {}, #X\nhlt", imm));
        run(&mut vm);
        assert_eq!(vm.register_get(Register::X), *imm);
    }
}

#[test]
fn test_mov_from_register_and_address() {
    let mut vm = machine("mov 7, #Y\nmov #Y, #X\nmov $210, #R\nhlt");
    vm.memory_mut().write(210, Value::Immediate(99)).unwrap();
    run(&mut vm);
    assert_eq!(vm.register_get(Register::X), 7);
    assert_eq!(vm.register_get(Register::R), 99);
}

#[test]
fn test_countdown_loop() {
    let mut vm = machine("mov 100,#X\n_loop: sub 1,#X\ncmp #X,4\njmc _loop\nhlt");
    run(&mut vm);
    assert!(vm.halted());
    assert_eq!(vm.register_get(Register::X), 0);
}

#[test]
fn test_arithmetic_wraps() {
    let mut vm = machine("mov 250, #X\nadd 10, #X\nmov 3, #Y\nsub 5, #Y\nhlt");
    run(&mut vm);
    assert_eq!(vm.register_get(Register::X), 4);
    assert_eq!(vm.register_get(Register::Y), 254);
}

#[test]
fn test_sub_is_dst_minus_src() {
    let mut vm = machine("mov 10, #X\nmov 3, #Y\nsub #Y, #X\nhlt");
    run(&mut vm);
    assert_eq!(vm.register_get(Register::X), 7);
}

#[test]
fn test_bitwise() {
    let mut vm = machine(
        "mov 0x0f, #X\nand 0x3c, #X\nmov 0x0f, #Y\nor 0x30, #Y\nmov 0xff, #R\nxor 0x0f, #R\nhlt",
    );
    run(&mut vm);
    assert_eq!(vm.register_get(Register::X), 0x0c);
    assert_eq!(vm.register_get(Register::Y), 0x3f);
    assert_eq!(vm.register_get(Register::R), 0xf0);
}

#[test]
fn test_not() {
    let mut vm = machine("mov 0x0f, #X\nnot #X\nhlt");
    run(&mut vm);
    assert_eq!(vm.register_get(Register::X), 0xf0);
}

#[test]
fn test_cmp_sets_r() {
    let mut vm = machine("mov 0, #X\ncmp #X, 0\nhlt");
    run(&mut vm);
    assert_eq!(vm.register_get(Register::R), 1);
    let mut vm = machine("mov 3, #X\ncmp #X, 0\nhlt");
    run(&mut vm);
    assert_eq!(vm.register_get(Register::R), 0);
    let mut vm = machine("mov 3, #X\ncmp #X, 1\nhlt");
    run(&mut vm);
    assert_eq!(vm.register_get(Register::R), 1);
}

#[test]
fn test_jmc_not_taken() {
    let mut vm = machine("mov 0, #R\njmc 0\nmov 5, #X\nhlt");
    run(&mut vm);
    assert_eq!(vm.register_get(Register::X), 5);
}

#[test]
fn test_jmp_through_register() {
    // jmp #Y lands on `mov 9, #X` at index 9
    let mut vm = machine("mov 9, #Y\njmp #Y\nmov 1, #X\nhlt\nmov 9, #X\nhlt");
    run(&mut vm);
    assert_eq!(vm.register_get(Register::X), 9);
}

#[test]
fn test_nested_calls() {
    // 0: cal 3 / 2: hlt / 3: cal 6 / 5: ret / 6: cal 9 / 8: ret / 9: ret
    let mut vm = machine("cal 3\nhlt\ncal 6\nret\ncal 9\nret\nret");
    step_n(&mut vm, 3);
    assert_eq!(vm.pc(), 9);
    assert_eq!(vm.call_stack().len(), 3);
    step_n(&mut vm, 3);
    assert_eq!(vm.pc(), 2);
    assert!(!vm.halted());
    step_n(&mut vm, 1);
    assert!(vm.halted());
}

#[test]
fn test_unmatched_ret_halts() {
    let mut vm = machine("cal 3\nret\nret");
    step_n(&mut vm, 2);
    assert_eq!(vm.pc(), 2);
    step_n(&mut vm, 2);
    assert!(vm.halted());
}

#[test]
fn test_db_is_skipped() {
    let mut vm = machine("db \"hello\", 1, 2\nmov 1, #X\nhlt");
    step_n(&mut vm, 1);
    assert_eq!(vm.pc(), 8);
    run(&mut vm);
    assert_eq!(vm.register_get(Register::X), 1);
}

#[test]
fn test_db_at_end_stops_at_region_edge() {
    let mut vm = machine("db 1, 2, 3");
    step_n(&mut vm, 1);
    assert_eq!(vm.pc(), MAX_PROGRAM_SIZE);
}

#[test]
fn test_running_off_program_is_silent() {
    let mut vm = machine("nop");
    step_n(&mut vm, 300);
    assert!(!vm.halted());
    assert_eq!(vm.pc(), 300);
}

#[test]
fn test_halted_is_terminal() {
    let mut vm = machine("hlt\nmov 1, #X");
    run(&mut vm);
    step_n(&mut vm, 5);
    assert_eq!(vm.pc(), 1);
    assert_eq!(vm.register_get(Register::X), 0);
}

#[test]
fn test_str_to_dma() {
    let mut vm = machine("mov 77,#X\nstr #X,$0xC9+5");
    step_n(&mut vm, 1);
    step_n(&mut vm, 1);
    assert_eq!(vm.memory().read(0xC9 + 5).unwrap(), Value::Immediate(77));
}

#[test]
fn test_str_into_program_faults() {
    let mut vm = machine("mov 1,#X\nstr #X,$0");
    step_n(&mut vm, 1);
    let e = vm.fetch_and_run().unwrap_err();
    assert_eq!(e.code(), ErrorCode::ProtectionFault);
    assert_eq!(e.address(), Some(0));
    assert_eq!(vm.memory().read(0).unwrap(), Value::OpCode(Opcode::Mov as u8));
}

#[test]
fn test_operand_type_faults() {
    for source in [
        "mov 1, 2",
        "jmp $5",
        "cal @1",
        "cmp 1, 4",
        "cmp #X, #Y",
        "cmp #X, 6",
        "add 1, $5",
        "not 3",
        "wro 1, #X",
        "str 1, $210",
        "str #X, 210",
        "mov @1, #X",
        "rdi 0, 5",
    ]
    .iter()
    {
        let mut vm = machine(source);
        let e = vm.fetch_and_run().unwrap_err();
        assert_eq!(e.code(), ErrorCode::OperandTypeFault, "{}", source);
        assert_eq!(e.address(), Some(0), "{}", source);
    }
}

#[test]
fn test_bad_register_payload_faults() {
    let mut vm = VirtualMachine::new();
    vm.load_program(&[
        Value::OpCode(Opcode::Mov as u8),
        Value::Immediate(1),
        Value::Register(3),
    ])
    .unwrap();
    let e = vm.fetch_and_run().unwrap_err();
    assert_eq!(e.code(), ErrorCode::OperandTypeFault);
}

#[test]
fn test_unknown_opcode_is_nop() {
    let mut vm = VirtualMachine::new();
    vm.load_program(&[Value::OpCode(200), Value::OpCode(Opcode::Hlt as u8)])
        .unwrap();
    run(&mut vm);
    assert_eq!(vm.pc(), 2);
}

#[test]
fn test_fault_keeps_partial_progress() {
    let mut vm = machine("mov 1, 2");
    assert!(vm.fetch_and_run().is_err());
    assert_eq!(vm.pc(), 3);
}

#[test]
fn test_program_too_large() {
    let mut vm = VirtualMachine::new();
    let program = vec![Value::OpCode(0); MAX_PROGRAM_SIZE + 1];
    let e = vm.load_program(&program).unwrap_err();
    assert_eq!(e.code(), ErrorCode::ProgramTooLarge);
    assert_eq!(vm.memory().read(0).unwrap(), Value::Null);
    assert!(vm.load_program(&program[1..]).is_ok());
}
