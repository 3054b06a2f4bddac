/// ## Assembler dialect switches
///
/// The default reproduces the terminal's historical dialect: labels resolve
/// in a single pass and numeric literals pick their base from their shape.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    /// Collect every label before resolving operands, so a label may be
    /// referenced above its declaration.
    pub forward_labels: bool,
    /// Only `0x`-prefixed literals are hexadecimal. `1f` becomes an error
    /// instead of silently meaning 31.
    pub strict_radix: bool,
}

impl Options {
    pub fn new() -> Options {
        Options::default()
    }

    pub fn forward_labels(self, forward_labels: bool) -> Options {
        Options {
            forward_labels,
            ..self
        }
    }

    pub fn strict_radix(self, strict_radix: bool) -> Options {
        Options {
            strict_radix,
            ..self
        }
    }
}
