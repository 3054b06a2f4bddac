use super::Column;
use crate::mach::Opcode;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    Identifier,
    Number,
    String,
    Add,
    Sub,
    LParen,
    RParen,
    Label,
    Comma,
    At,
    Dollar,
    Hash,
    Keyword,
}

/// A lexeme with its kind and, for numbers, the decoded value.
///
/// Tokens live only between the tokenizer and the parser. `line` and
/// `column` locate the lexeme for error reporting.
#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub value: u8,
    pub line: usize,
    pub column: Column,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: &str, value: u8) -> Token {
        Token {
            kind,
            lexeme: lexeme.to_string(),
            value,
            line: 0,
            column: 0..0,
        }
    }

    pub fn at(self, line: usize, column: Column) -> Token {
        Token {
            line,
            column,
            ..self
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// The opcode named by a `Keyword` token.
    pub fn opcode(&self) -> Option<Opcode> {
        match self.kind {
            TokenKind::Keyword => Opcode::from_mnemonic(&self.lexeme),
            _ => None,
        }
    }

    /// True when this token can begin an operand.
    pub fn starts_operand(&self) -> bool {
        use TokenKind::*;
        match self.kind {
            String | Hash | Dollar | At | Number | Identifier | LParen => true,
            Add | Sub | RParen | Label | Comma | Keyword => false,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use TokenKind::*;
        match self.kind {
            String => write!(f, "\"{}\"", self.lexeme),
            Label => write!(f, "{}:", self.lexeme),
            _ => write!(f, "{}", self.lexeme),
        }
    }
}
