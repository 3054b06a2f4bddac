use super::token::{Token, TokenKind};
use super::{Error, Options};
use crate::error;
use crate::mach::Opcode;

type Result<T> = std::result::Result<T, Error>;

pub fn lex(s: &str) -> Result<Vec<Token>> {
    lex_with(s, &Options::default())
}

pub fn lex_with(s: &str, options: &Options) -> Result<Vec<Token>> {
    Tokenizer::new(s, options).collect()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_hexdigit() || c == 'x' || c == 'X'
}

/// Decodes a numeric lexeme the way the terminal always has: hexadecimal
/// when it contains an `x` or a hex letter, decimal otherwise. Digits are
/// accumulated modulo 256.
fn shape_number(s: &str) -> u8 {
    let lower = s.to_ascii_lowercase();
    if lower.contains(|c: char| c == 'x' || ('a'..='f').contains(&c)) {
        let digits = lower.strip_prefix("0x").unwrap_or(&lower);
        accumulate(digits, 16)
    } else {
        accumulate(&lower, 10)
    }
}

fn strict_number(s: &str) -> Option<u8> {
    let lower = s.to_ascii_lowercase();
    match lower.strip_prefix("0x") {
        Some(digits) => {
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit()) {
                Some(accumulate(digits, 16))
            } else {
                None
            }
        }
        None => {
            if lower.chars().all(|c| c.is_ascii_digit()) {
                Some(accumulate(&lower, 10))
            } else {
                None
            }
        }
    }
}

// Stops at the first character that is not a digit in `radix`.
fn accumulate(digits: &str, radix: u32) -> u8 {
    let mut value: u8 = 0;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => value = value.wrapping_mul(radix as u8).wrapping_add(d as u8),
            None => break,
        }
    }
    value
}

struct Tokenizer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    options: Options,
    line: usize,
    col: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(s: &'a str, options: &Options) -> Tokenizer<'a> {
        Tokenizer {
            chars: s.chars().peekable(),
            options: *options,
            line: 1,
            col: 0,
        }
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn take_while(&mut self, pred: fn(char) -> bool) -> String {
        let mut s = String::new();
        while let Some(&pk) = self.chars.peek() {
            if !pred(pk) {
                break;
            }
            s.push(pk);
            self.next_char();
        }
        s
    }

    fn string(&mut self) -> Result<Token> {
        let (line, start) = (self.line, self.col);
        self.next_char();
        let mut s = String::new();
        // An unterminated string is reported on its opening line only.
        let mut end = self.col;
        loop {
            match self.next_char() {
                Some('"') => {
                    return Ok(Token::new(TokenKind::String, &s, 0).at(line, start..self.col))
                }
                Some(ch) => s.push(ch),
                None => return Err(error!(UnterminatedString, line, ..&(start..end))),
            }
            if self.line == line {
                end = self.col;
            }
        }
    }

    fn number(&mut self) -> Result<Token> {
        let (line, start) = (self.line, self.col);
        let s = self.take_while(is_number_char);
        let column = start..self.col;
        let value = if self.options.strict_radix {
            match strict_number(&s) {
                Some(v) => v,
                None => return Err(error!(SyntaxError, line, ..&column; "INVALID NUMBER")),
            }
        } else {
            shape_number(&s)
        };
        Ok(Token::new(TokenKind::Number, &s, value).at(line, column))
    }

    fn word(&mut self) -> Token {
        let (line, start) = (self.line, self.col);
        let s = self.take_while(is_ident_char);
        if Opcode::from_mnemonic(&s).is_some() {
            return Token::new(TokenKind::Keyword, &s, 0).at(line, start..self.col);
        }
        if let Some(':') = self.chars.peek() {
            self.next_char();
            return Token::new(TokenKind::Label, &s, 0).at(line, start..self.col);
        }
        Token::new(TokenKind::Identifier, &s, 0).at(line, start..self.col)
    }

    fn minutia(&mut self, kind: TokenKind) -> Token {
        let (line, start) = (self.line, self.col);
        let ch = self.next_char().unwrap_or_default();
        Token::new(kind, &ch.to_string(), 0).at(line, start..self.col)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let pk = *self.chars.peek()?;
            let kind = match pk {
                '"' => return Some(self.string()),
                '0'..='9' => return Some(self.number()),
                c if is_ident_char(c) => return Some(Ok(self.word())),
                '+' => TokenKind::Add,
                '-' => TokenKind::Sub,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                ',' => TokenKind::Comma,
                '@' => TokenKind::At,
                '$' => TokenKind::Dollar,
                '#' => TokenKind::Hash,
                _ => {
                    self.next_char();
                    continue;
                }
            };
            return Some(Ok(self.minutia(kind)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_number() {
        assert_eq!(shape_number("10"), 10);
        assert_eq!(shape_number("0x10"), 16);
        assert_eq!(shape_number("0XC9"), 0xC9);
        assert_eq!(shape_number("1f"), 31);
        assert_eq!(shape_number("300"), 44);
        assert_eq!(shape_number("1x2"), 1);
        assert_eq!(shape_number("0x"), 0);
    }

    #[test]
    fn test_strict_number() {
        assert_eq!(strict_number("0x1f"), Some(31));
        assert_eq!(strict_number("42"), Some(42));
        assert_eq!(strict_number("1f"), None);
        assert_eq!(strict_number("0x"), None);
    }

    #[test]
    fn test_positions() {
        let tokens = lex("nop\n  mov").unwrap();
        assert_eq!(tokens[1].line, 2);
        assert_eq!(tokens[1].column, 2..5);
    }
}
