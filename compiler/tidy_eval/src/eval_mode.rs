//! Evaluation modes.
//!
//! Parameterizes the interpreter via an `EvalMode` enum so embedders can
//! bound recursion (e.g. when evaluating untrusted expressions) without a
//! separate interpreter type.

/// Evaluation mode: determines interpreter limits via match dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Unbounded nesting; the stack is grown on demand.
    #[default]
    Interpret,
    /// Nesting of calls is capped at `max_depth`.
    Restricted {
        /// Maximum number of nested calls before aborting.
        max_depth: usize,
    },
}

impl EvalMode {
    /// Maximum call nesting, or `None` for unlimited.
    ///
    /// - `Interpret`: `None` on native (stacker grows the stack), 200 on WASM
    /// - `Restricted`: the configured depth
    #[inline]
    pub fn max_recursion_depth(&self) -> Option<usize> {
        match self {
            Self::Interpret => {
                #[cfg(target_arch = "wasm32")]
                {
                    Some(200)
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    None
                }
            }
            Self::Restricted { max_depth } => Some(*max_depth),
        }
    }
}
