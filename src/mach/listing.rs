use super::{Address, Memory, Opcode, Register, Value, MAX_PROGRAM_SIZE};
use crate::lang::LabelTable;
use std::collections::BTreeMap;

/// ## Disassembly
///
/// Renders a value stream back into assembly, one instruction per line.
/// Each opcode takes every following non-opcode value as its operands,
/// which is also how `db` data is shown.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    lines: Vec<(Address, String)>,
}

fn operand(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Immediate(n) => n.to_string(),
        Value::OpCode(n) => format!("opcode({})", n),
        Value::Register(n) => match Register::from_u8(*n) {
            Some(reg) => format!("#{}", reg),
            None => format!("#?{}", n),
        },
        Value::Address(n) => format!("$0x{:02X}", n),
        Value::Pin(n) => format!("@{}", n),
    }
}

impl Listing {
    pub fn new(values: &[Value], labels: &LabelTable) -> Listing {
        let mut by_address: BTreeMap<Address, Vec<&str>> = BTreeMap::new();
        for (name, address) in labels.iter() {
            by_address.entry(*address).or_default().push(name);
        }
        let mut lines = vec![];
        let mut index = 0;
        while index < values.len() {
            if let Some(names) = by_address.get(&index) {
                for name in names {
                    lines.push((index, format!("{}:", name)));
                }
            }
            let start = index;
            let head = match values[index] {
                Value::OpCode(n) => match Opcode::from_u8(n) {
                    Some(op) => op.to_string(),
                    None => format!("opcode({})", n),
                },
                other => {
                    lines.push((start, format!("    {}", operand(&other))));
                    index += 1;
                    continue;
                }
            };
            index += 1;
            let mut operands = vec![];
            while index < values.len()
                && !values[index].is_opcode()
                && !by_address.contains_key(&index)
            {
                operands.push(operand(&values[index]));
                index += 1;
            }
            if operands.is_empty() {
                lines.push((start, format!("    {}", head)));
            } else {
                lines.push((start, format!("    {} {}", head, operands.join(", "))));
            }
        }
        if let Some(names) = by_address.get(&values.len()) {
            for name in names {
                lines.push((values.len(), format!("{}:", name)));
            }
        }
        Listing { lines }
    }

    /// Lists the protected region, ignoring trailing `Null` cells.
    pub fn from_memory(memory: &Memory, labels: &LabelTable) -> Listing {
        let program = &memory.as_slice()[..MAX_PROGRAM_SIZE];
        let len = program
            .iter()
            .rposition(|v| !v.is_null())
            .map_or(0, |last| last + 1);
        Listing::new(&program[..len], labels)
    }

    pub fn lines(&self) -> &[(Address, String)] {
        &self.lines
    }
}

impl std::fmt::Display for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (address, line) in &self.lines {
            writeln!(f, "{:3} {}", address, line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Parser;

    fn listing(s: &str) -> String {
        let mut p = Parser::new(s).unwrap();
        p.parse_all().unwrap();
        Listing::new(p.program_output(), p.label_table()).to_string()
    }

    #[test]
    fn test_round_trip_syntax() {
        assert_eq!(
            listing("mov 10, #X\n_loop: sub 1,#x\nstr #Y, $0xC9\nwro 5, @2\nhlt"),
            concat!(
                "  0     mov 10, #X\n",
                "  3 _loop:\n",
                "  3     sub 1, #X\n",
                "  6     str #Y, $0xC9\n",
                "  9     wro 5, @2\n",
                " 12     hlt\n",
            )
        );
    }

    #[test]
    fn test_data() {
        assert_eq!(listing("db \"AB\"\nhlt"), "  0     db 65, 66\n  3     hlt\n");
    }

    #[test]
    fn test_loose_values_and_trailing_label() {
        let mut labels = LabelTable::new();
        labels.insert("_end".to_string(), 1);
        let l = Listing::new(&[Value::Immediate(7)], &labels);
        assert_eq!(l.to_string(), "  0     7\n  1 _end:\n");
    }
}
