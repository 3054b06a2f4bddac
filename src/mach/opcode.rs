/// ## Instruction set
///
/// An opcode is stored in memory as `Value::OpCode(n)` and its operands
/// follow it as separate cells. How many operands an opcode takes is known
/// only to its handler in the runtime.
///
/// | Opcode | Operands | Effect |
/// |--------|----------|--------|
/// | `nop`  | | nothing |
/// | `mov`  | src, #reg | reg = src |
/// | `jmp`  | target | pc = target |
/// | `cal`  | target | push pc, pc = target |
/// | `ret`  | | pop pc, or halt when the stack is empty |
/// | `cmp`  | #reg, code | R = reg `<code>` 0 |
/// | `jmc`  | target | jump when R is 1 |
/// | `add` `sub` `and` `or` `xor` | src, #reg | reg = reg `op` src |
/// | `not`  | #reg | reg = !reg |
/// | `wro`  | src, @pin | pin = src |
/// | `rdi`  | src, #reg | blocking read of pin `src` into reg |
/// | `rst`  | | reset the machine |
/// | `hlt`  | | halt |
/// | `db`   | data... | skipped at run time |
/// | `str`  | #reg, $addr | memory\[addr\] = reg |

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Nop = 0,
    Mov,
    Jmp,
    Cal,
    Ret,
    Cmp,
    Jmc,
    Add,
    Sub,
    Not,
    And,
    Or,
    Xor,
    Wro,
    Rdi,
    Rst,
    Hlt,
    Db,
    Str,
}

const OPCODES: [Opcode; 19] = [
    Opcode::Nop,
    Opcode::Mov,
    Opcode::Jmp,
    Opcode::Cal,
    Opcode::Ret,
    Opcode::Cmp,
    Opcode::Jmc,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Not,
    Opcode::And,
    Opcode::Or,
    Opcode::Xor,
    Opcode::Wro,
    Opcode::Rdi,
    Opcode::Rst,
    Opcode::Hlt,
    Opcode::Db,
    Opcode::Str,
];

impl Opcode {
    pub fn from_u8(n: u8) -> Option<Opcode> {
        OPCODES.get(n as usize).copied()
    }

    pub fn from_mnemonic(s: &str) -> Option<Opcode> {
        let s = s.to_ascii_lowercase();
        OPCODES.iter().copied().find(|op| op.mnemonic() == s)
    }

    pub fn mnemonic(&self) -> &'static str {
        use Opcode::*;
        match self {
            Nop => "nop",
            Mov => "mov",
            Jmp => "jmp",
            Cal => "cal",
            Ret => "ret",
            Cmp => "cmp",
            Jmc => "jmc",
            Add => "add",
            Sub => "sub",
            Not => "not",
            And => "and",
            Or => "or",
            Xor => "xor",
            Wro => "wro",
            Rdi => "rdi",
            Rst => "rst",
            Hlt => "hlt",
            Db => "db",
            Str => "str",
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// Second operand of `cmp`. The register is always compared against zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq = 0,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparison {
    pub fn from_u8(n: u8) -> Option<Comparison> {
        use Comparison::*;
        match n {
            0 => Some(Eq),
            1 => Some(Ne),
            2 => Some(Lt),
            3 => Some(Le),
            4 => Some(Gt),
            5 => Some(Ge),
            _ => None,
        }
    }

    pub fn test_zero(&self, n: u8) -> bool {
        use Comparison::*;
        match self {
            Eq => n == 0,
            Ne => n != 0,
            Lt => false,
            Le => n == 0,
            Gt => n > 0,
            Ge => true,
        }
    }
}
