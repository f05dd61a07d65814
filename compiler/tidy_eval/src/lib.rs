//! Tidy Eval - quosures and overscopes.
//!
//! This crate provides a small expression runtime whose central operation is
//! evaluating *quosures* (an expression paired with the environment it was
//! written in) inside *overscopes* (environments that inject extra bindings,
//! such as data columns, ahead of the quosure's own scope).
//!
//! # Architecture
//!
//! - `Env`: binding frames with a single rewirable parent slot
//! - `ParentSwap` / `BindingSwap`: RAII guards that undo rewiring on drop
//! - `Expr` / `Formula`: immutable code, with quosures as formula objects
//! - `Interpreter`: symbol lookup, call dispatch, primitives
//! - `Interpreter::tilde_eval`: the quosure evaluator (`tilde.rs`)
//! - `Interpreter::new_data_mask` & co: data masks (`data_mask.rs`)
//! - `Interpreter::eval_tidy`: evaluation against data (`eval_tidy.rs`)
//!
//! # Example
//!
//! ```
//! use tidy_eval::{Expr, Interpreter, Value};
//! use tidy_ir::StringInterner;
//!
//! let interner = StringInterner::new();
//! let interp = Interpreter::new(&interner);
//!
//! // `x + 1` captured where x = 41
//! let env = interp.global_env().child();
//! env.define(interp.intern("x"), Value::Int(41));
//! let quo = interp.quosure(
//!     interp.call("+", vec![interp.sym("x"), Expr::int(1)]),
//!     Some(&env),
//! );
//!
//! let result = interp.eval_tidy(&quo, &Value::Null, interp.global_env());
//! assert_eq!(result, Ok(Value::Int(42)));
//! ```

mod data_mask;
mod environment;
pub mod errors;
mod eval_mode;
mod eval_tidy;
pub mod interpreter;
mod lang;
mod tilde;
mod tracing_setup;
mod value;

pub use environment::{Ancestors, BindingSwap, Env, ParentSwap, WeakEnv};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use eval_mode::EvalMode;
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use lang::{Call, Callee, Expr, Formula, FormulaKind};
pub use tracing_setup::init_tracing;
pub use value::{DataPronoun, ListKind, NamedList, PronounSource, TildeThunk, Value};
