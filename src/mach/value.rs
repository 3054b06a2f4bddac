/// ## Tagged machine datum
///
/// Every memory cell holds one `Value`. The payload is a `u8`, so no value
/// can carry a byte outside 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Null,
    Immediate(u8),
    OpCode(u8),
    Register(u8),
    Address(u8),
    Pin(u8),
}

impl Default for Value {
    fn default() -> Value {
        Value::Null
    }
}

impl Value {
    pub fn payload(&self) -> u8 {
        use Value::*;
        match *self {
            Null => 0,
            Immediate(n) | OpCode(n) | Register(n) | Address(n) | Pin(n) => n,
        }
    }

    pub fn tag_name(&self) -> &'static str {
        use Value::*;
        match self {
            Null => "Null",
            Immediate(_) => "Immediate",
            OpCode(_) => "OpCode",
            Register(_) => "Register",
            Address(_) => "Address",
            Pin(_) => "Pin",
        }
    }

    pub fn is_opcode(&self) -> bool {
        matches!(self, Value::OpCode(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({})", self.tag_name(), self.payload())
    }
}
