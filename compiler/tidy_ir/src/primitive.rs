//! Built-in operator identifiers.

/// A built-in operator.
///
/// Primitives are bound by name in the base environment, and can also be
/// inlined directly as the callee of a call so that evaluation bypasses any
/// binding that shadows the name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `~`: builds a formula capturing the calling environment.
    Tilde,
    /// `quote`: returns its argument unevaluated.
    Quote,
    /// `+`
    Add,
    /// `-` (binary subtraction or unary negation)
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `$`: member access, the member is taken as a symbol.
    Dollar,
}

impl Primitive {
    /// Every primitive, in base-environment binding order.
    pub const ALL: [Primitive; 7] = [
        Primitive::Tilde,
        Primitive::Quote,
        Primitive::Add,
        Primitive::Sub,
        Primitive::Mul,
        Primitive::Div,
        Primitive::Dollar,
    ];

    /// The symbol this primitive is bound to.
    pub const fn symbol(self) -> &'static str {
        match self {
            Primitive::Tilde => "~",
            Primitive::Quote => "quote",
            Primitive::Add => "+",
            Primitive::Sub => "-",
            Primitive::Mul => "*",
            Primitive::Div => "/",
            Primitive::Dollar => "$",
        }
    }

    /// Whether the primitive receives its arguments unevaluated.
    pub const fn is_special(self) -> bool {
        matches!(self, Primitive::Tilde | Primitive::Quote | Primitive::Dollar)
    }

    /// Whether the primitive is a numeric operator.
    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Primitive::Add | Primitive::Sub | Primitive::Mul | Primitive::Div
        )
    }
}

#[cfg(test)]
mod tests;
