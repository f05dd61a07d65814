//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use std::cell::{Cell, OnceCell};

use tidy_ir::{Primitive, StringInterner};

use super::{Interpreter, MaskNames};
use crate::{Env, EvalMode, Value};

/// Builder for creating Interpreter instances.
///
/// The default mode is `Interpret`; use `EvalMode::Restricted` to cap nesting.
pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    mode: EvalMode,
    globals: Vec<(&'a str, Value)>,
}

impl<'a> InterpreterBuilder<'a> {
    /// Create a new builder with default `Interpret` mode.
    pub fn new(interner: &'a StringInterner) -> Self {
        Self {
            interner,
            mode: EvalMode::default(),
            globals: Vec::new(),
        }
    }

    /// Set the evaluation mode.
    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Pre-bind a variable in the global environment.
    #[must_use]
    pub fn global(mut self, name: &'a str, value: Value) -> Self {
        self.globals.push((name, value));
        self
    }

    /// Build the interpreter.
    ///
    /// Creates the base environment holding every primitive, and the global
    /// environment as its child.
    pub fn build(self) -> Interpreter<'a> {
        let base = Env::empty();
        for primitive in Primitive::ALL {
            base.define(
                self.interner.intern(primitive.symbol()),
                Value::Builtin(primitive),
            );
        }

        let global = base.child();
        for (name, value) in self.globals {
            global.define(self.interner.intern(name), value);
        }

        Interpreter {
            interner: self.interner,
            names: MaskNames::new(self.interner),
            base,
            global,
            mode: self.mode,
            depth: Cell::new(0),
            tilde_primitive: OnceCell::new(),
        }
    }
}
