use super::token::{Token, TokenKind};
use super::{lex_with, Error, Options};
use crate::error;
use crate::mach::{Register, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

type Result<T> = std::result::Result<T, Error>;

pub type LabelTable = BTreeMap<String, usize>;

/// ## Single pass assembler
///
/// Consumes the token stream once, emitting a flat sequence of [`Value`]s.
/// Each mnemonic becomes one `OpCode` value followed by its operands in
/// source order. Arity is not checked here; the machine faults when an
/// operand has the wrong tag.
///
/// A label is known from the point it is declared onwards. Unless
/// [`Options::forward_labels`] is set, a reference above the declaration
/// resolves to 0.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    options: Options,
    collecting: bool,
    label_table: LabelTable,
    program_output: Vec<Value>,
}

impl Parser {
    pub fn new(source: &str) -> Result<Parser> {
        Parser::with_options(source, Options::default())
    }

    pub fn with_options(source: &str, options: Options) -> Result<Parser> {
        Ok(Parser {
            tokens: lex_with(source, &options)?,
            pos: 0,
            options,
            collecting: false,
            label_table: LabelTable::new(),
            program_output: vec![],
        })
    }

    pub fn parse_all(&mut self) -> Result<()> {
        self.label_table.clear();
        if self.options.forward_labels {
            self.collecting = true;
            let collected = self.pass();
            self.collecting = false;
            collected?;
        }
        self.pass()?;
        debug!(
            values = self.program_output.len(),
            labels = self.label_table.len(),
            "assembled"
        );
        Ok(())
    }

    pub fn program_output(&self) -> &[Value] {
        &self.program_output
    }

    pub fn label_table(&self) -> &LabelTable {
        &self.label_table
    }

    pub fn into_parts(self) -> (Vec<Value>, LabelTable) {
        (self.program_output, self.label_table)
    }

    fn pass(&mut self) -> Result<()> {
        self.pos = 0;
        self.program_output.clear();
        while self.peek().is_some() {
            self.instruction()?;
        }
        Ok(())
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&Token> {
        let t = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(t)
    }

    fn accept(&mut self, kind: TokenKind) -> Option<Token> {
        match self.peek() {
            Some(t) if t.is(kind) => {
                let t = t.clone();
                self.pos += 1;
                Some(t)
            }
            _ => None,
        }
    }

    fn expect(&mut self, kind: TokenKind, msg: &'static str) -> Result<Token> {
        match self.accept(kind) {
            Some(t) => Ok(t),
            None => Err(self.unexpected(msg)),
        }
    }

    /// Error located at the current token, or the last one at end of input.
    fn unexpected(&self, msg: &'static str) -> Error {
        match self.peek() {
            Some(t) => error!(SyntaxError, t.line, ..&t.column; msg),
            None => match self.tokens.last() {
                Some(t) => error!(UnexpectedEnd, t.line, ..&(t.column.end..t.column.end + 1)),
                None => error!(UnexpectedEnd),
            },
        }
    }

    fn instruction(&mut self) -> Result<()> {
        if let Some(label) = self.accept(TokenKind::Label) {
            self.label_table
                .insert(label.lexeme, self.program_output.len());
            return Ok(());
        }
        let opcode = match self.peek().and_then(|t| t.opcode()) {
            Some(op) => op,
            None => return Err(self.unexpected("EXPECTED INSTRUCTION OR LABEL")),
        };
        self.next();
        self.program_output.push(Value::OpCode(opcode as u8));
        if !self.peek().map_or(false, Token::starts_operand) {
            return Ok(());
        }
        loop {
            self.operand()?;
            if self.accept(TokenKind::Comma).is_none() || self.peek().is_none() {
                return Ok(());
            }
        }
    }

    fn operand(&mut self) -> Result<()> {
        if let Some(s) = self.accept(TokenKind::String) {
            for c in s.lexeme.chars() {
                self.program_output
                    .push(Value::Immediate((c as u32 & 0xFF) as u8));
            }
            return Ok(());
        }
        let value = if self.accept(TokenKind::Hash).is_some() {
            let name = self.expect(TokenKind::Identifier, "EXPECTED REGISTER")?;
            match Register::from_name(&name.lexeme) {
                Some(reg) => Value::Register(reg as u8),
                None => return Err(error!(SyntaxError, name.line, ..&name.column; "UNKNOWN REGISTER")),
            }
        } else if self.accept(TokenKind::Dollar).is_some() {
            Value::Address(self.expression()?)
        } else if self.accept(TokenKind::At).is_some() {
            Value::Pin(self.expect(TokenKind::Number, "EXPECTED PIN NUMBER")?.value)
        } else {
            Value::Immediate(self.expression()?)
        };
        self.program_output.push(value);
        Ok(())
    }

    // Right recursive: `a - b + c` is `a - (b + c)`.
    fn expression(&mut self) -> Result<u8> {
        let lhs = self.atom()?;
        if self.accept(TokenKind::Add).is_some() {
            return Ok(lhs.wrapping_add(self.expression()?));
        }
        if self.accept(TokenKind::Sub).is_some() {
            return Ok(lhs.wrapping_sub(self.expression()?));
        }
        Ok(lhs)
    }

    fn atom(&mut self) -> Result<u8> {
        if let Some(n) = self.accept(TokenKind::Number) {
            return Ok(n.value);
        }
        if let Some(id) = self.accept(TokenKind::Identifier) {
            return Ok(self.label_ref(&id));
        }
        if self.accept(TokenKind::LParen).is_some() {
            let value = self.expression()?;
            self.expect(TokenKind::RParen, "EXPECTED RIGHT PARENTHESIS")?;
            return Ok(value);
        }
        Err(self.unexpected("EXPECTED NUMBER OR IDENTIFIER"))
    }

    fn label_ref(&self, id: &Token) -> u8 {
        match self.label_table.get(&id.lexeme) {
            Some(index) => (index & 0xFF) as u8,
            None => {
                if !self.collecting {
                    warn!(label = %id.lexeme, line = id.line, "label used before declaration, resolving to 0");
                }
                0
            }
        }
    }
}
