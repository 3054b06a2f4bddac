use super::Column;

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line: Option<usize>,
    column: Column,
    address: Option<usize>,
    message: &'static str,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident, @$addr:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).at_address($addr)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
    ($err:ident, @$addr:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .at_address($addr)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line($line)
            .in_column($col)
    };
    ($err:ident, $line:expr, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line($line)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line: None,
            column: 0..0,
            address: None,
            message: "",
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn column(&self) -> Column {
        self.column.clone()
    }

    pub fn address(&self) -> Option<usize> {
        self.address
    }

    /// Faults happen while the machine steps; everything else is raised
    /// by the assembler before a program exists.
    pub fn is_fault(&self) -> bool {
        use ErrorCode::*;
        match self.code {
            MemoryFault | ProtectionFault | OperandTypeFault | ProgramTooLarge => true,
            UnterminatedString | UnexpectedEnd | SyntaxError => false,
        }
    }

    pub fn in_line(&self, line: usize) -> Error {
        debug_assert!(self.line.is_none());
        Error {
            line: Some(line),
            ..self.clone()
        }
    }

    pub fn in_column(&self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        Error {
            column: column.clone(),
            ..self.clone()
        }
    }

    pub fn at_address(&self, address: usize) -> Error {
        Error {
            address: Some(address),
            ..self.clone()
        }
    }

    pub fn message(&self, message: &'static str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            message,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UnterminatedString,
    UnexpectedEnd,
    SyntaxError,
    MemoryFault,
    ProtectionFault,
    OperandTypeFault,
    ProgramTooLarge,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let s = match self {
            UnterminatedString => "UNTERMINATED STRING",
            UnexpectedEnd => "UNEXPECTED END OF INPUT",
            SyntaxError => "SYNTAX ERROR",
            MemoryFault => "MEMORY FAULT",
            ProtectionFault => "PROTECTION FAULT",
            OperandTypeFault => "OPERAND TYPE FAULT",
            ProgramTooLarge => "PROGRAM TOO LARGE",
        };
        write!(f, "{}", s)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut suffix = String::new();
        if let Some(line) = self.line {
            suffix.push_str(&format!(" IN {}", line));
        }
        if (0..0) != self.column {
            suffix.push_str(&format!(" ({}..{})", self.column.start, self.column.end));
        }
        if let Some(address) = self.address {
            suffix.push_str(&format!(" AT {}", address));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        write!(f, "{}{}", self.code, suffix)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_position() {
        let e = error!(SyntaxError, 3, ..&(4..7); "EXPECTED IDENTIFIER");
        assert_eq!(e.to_string(), "SYNTAX ERROR IN 3 (4..7); EXPECTED IDENTIFIER");
    }

    #[test]
    fn test_display_with_address() {
        let e = error!(ProtectionFault, @12);
        assert_eq!(e.to_string(), "PROTECTION FAULT AT 12");
        assert!(e.is_fault());
        assert_eq!(e.address(), Some(12));
    }

    #[test]
    fn test_bare_code() {
        let e = error!(UnterminatedString);
        assert_eq!(e.to_string(), "UNTERMINATED STRING");
        assert!(!e.is_fault());
        assert_eq!(e.code(), ErrorCode::UnterminatedString);
    }
}
