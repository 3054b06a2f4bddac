/// Register names as encoded in a `Value::Register` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    X = 0,
    Y,
    R,
}

impl Register {
    pub const ALL: [Register; 3] = [Register::X, Register::Y, Register::R];

    pub fn from_u8(n: u8) -> Option<Register> {
        Register::ALL.get(n as usize).copied()
    }

    pub fn from_name(s: &str) -> Option<Register> {
        match s.to_ascii_uppercase().as_str() {
            "X" => Some(Register::X),
            "Y" => Some(Register::Y),
            "R" => Some(Register::R),
            _ => None,
        }
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Register::X => write!(f, "X"),
            Register::Y => write!(f, "Y"),
            Register::R => write!(f, "R"),
        }
    }
}

/// ## Register file
///
/// Three 8-bit registers. `R` receives the result of `cmp` but is
/// otherwise an ordinary register.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registers {
    regs: [u8; 3],
}

impl Registers {
    pub fn new() -> Registers {
        Registers::default()
    }

    pub fn get(&self, reg: Register) -> u8 {
        self.regs[reg as usize]
    }

    pub fn set(&mut self, reg: Register, value: u8) {
        self.regs[reg as usize] = value;
    }

    pub fn clear(&mut self) {
        self.regs = [0; 3];
    }
}

impl std::fmt::Display for Registers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "X={:<3} Y={:<3} R={:<3}",
            self.get(Register::X),
            self.get(Register::Y),
            self.get(Register::R)
        )
    }
}
