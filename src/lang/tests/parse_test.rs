use super::*;
use crate::mach::{Opcode, Value};

fn op(opcode: Opcode) -> Value {
    Value::OpCode(opcode as u8)
}

#[test]
fn test_mov_immediate_register() {
    assert_eq!(
        assemble("mov 10, #X"),
        [op(Opcode::Mov), Value::Immediate(10), Value::Register(0)]
    );
}

#[test]
fn test_operand_kinds() {
    assert_eq!(
        assemble("str #y, $0xC9+5\nwro #R, @3"),
        [
            op(Opcode::Str),
            Value::Register(1),
            Value::Address(0xCE),
            op(Opcode::Wro),
            Value::Register(2),
            Value::Pin(3),
        ]
    );
}

#[test]
fn test_string_expands_to_immediates() {
    assert_eq!(
        assemble("db \"hi\", 0"),
        [
            op(Opcode::Db),
            Value::Immediate(b'h'),
            Value::Immediate(b'i'),
            Value::Immediate(0),
        ]
    );
}

#[test]
fn test_zero_operand_instructions() {
    assert_eq!(
        assemble("nop\nret\nrst\nhlt"),
        [op(Opcode::Nop), op(Opcode::Ret), op(Opcode::Rst), op(Opcode::Hlt)]
    );
}

#[test]
fn test_label_table() {
    let mut p = Parser::new("mov 100,#X\n_loop:\nsub 1,#X\njmc _loop\nhlt").unwrap();
    p.parse_all().unwrap();
    assert_eq!(p.label_table().get("_loop"), Some(&3));
    assert_eq!(p.program_output()[7], Value::Immediate(3));
}

#[test]
fn test_forward_reference_resolves_to_zero() {
    let v = assemble("jmp _end\nnop\n_end: hlt");
    assert_eq!(v[1], Value::Immediate(0));
}

#[test]
fn test_forward_labels_option() {
    let mut p =
        Parser::with_options("jmp _end\nnop\n_end: hlt", Options::new().forward_labels(true))
            .unwrap();
    p.parse_all().unwrap();
    assert_eq!(p.program_output()[1], Value::Immediate(3));
    assert_eq!(p.label_table().get("_end"), Some(&3));
}

#[test]
fn test_parse_all_is_repeatable() {
    let mut p = Parser::new("_a: jmp _a").unwrap();
    p.parse_all().unwrap();
    let first = p.program_output().to_vec();
    p.parse_all().unwrap();
    assert_eq!(p.program_output(), &first[..]);
}

#[test]
fn test_unknown_register() {
    let e = assemble_err("mov 1, #Q", Options::default());
    assert_eq!(e.code(), ErrorCode::SyntaxError);
    assert_eq!(e.to_string(), "SYNTAX ERROR IN 1 (8..9); UNKNOWN REGISTER");
}

#[test]
fn test_stray_token_is_error() {
    let e = assemble_err("nop\n)", Options::default());
    assert_eq!(e.line(), Some(2));
}

#[test]
fn test_pin_needs_number() {
    let e = assemble_err("wro 1, @x", Options::default());
    assert_eq!(e.to_string(), "SYNTAX ERROR IN 1 (8..9); EXPECTED PIN NUMBER");
}

#[test]
fn test_missing_right_paren() {
    let e = assemble_err("jmp (1+2", Options::default());
    assert_eq!(e.code(), ErrorCode::UnexpectedEnd);
}

#[test]
fn test_operand_missing_at_end() {
    let e = assemble_err("mov 1, $", Options::default());
    assert_eq!(e.code(), ErrorCode::UnexpectedEnd);
    assert_eq!(e.to_string(), "UNEXPECTED END OF INPUT IN 1 (8..9)");
}

#[test]
fn test_operand_after_comma_required() {
    let e = assemble_err("mov 1, hlt", Options::default());
    assert_eq!(e.code(), ErrorCode::SyntaxError);
}
