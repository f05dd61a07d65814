//! Stack safety for recursive evaluation.
//!
//! Evaluating a quosure can re-enter the evaluator through the mask's `~`
//! binding, so nesting depth follows the nesting of the user's expressions
//! and quosures, not a fixed bound. Wrapping each recursive step in
//! [`ensure_sufficient_stack`] grows the stack on demand.
//!
//! - **Native targets**: the `stacker` crate grows the stack.
//! - **WASM targets**: passthrough.

/// Remaining stack below which we grow (128KB red zone).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment (2MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
