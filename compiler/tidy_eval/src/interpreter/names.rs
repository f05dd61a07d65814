//! Pre-interned symbols for hot-path comparisons.
//!
//! Interned once at `Interpreter` construction so the tilde evaluator and the
//! data-mask helpers compare `Name`s (`u32 == u32`) instead of re-interning
//! `"~"` or `".env"` on every call.

use tidy_ir::{Name, StringInterner};

/// Symbols with fixed meaning inside overscopes and data masks.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MaskNames {
    /// The canonical `~` operator symbol.
    pub(crate) tilde: Name,
    /// `.env`: the environment a quosure without its own falls back to.
    pub(crate) env: Name,
    /// `.top_env`: the mask frame whose parent gets rewired.
    pub(crate) top_env: Name,
    /// `.data`: the data pronoun.
    pub(crate) data: Name,
    /// Marks a frame as a data mask.
    pub(crate) mask_flag: Name,
}

impl MaskNames {
    pub(crate) fn new(interner: &StringInterner) -> Self {
        Self {
            tilde: interner.intern("~"),
            env: interner.intern(".env"),
            top_env: interner.intern(".top_env"),
            data: interner.intern(".data"),
            mask_flag: interner.intern(".__tidyeval_data_mask__."),
        }
    }

    /// Bindings a data mask installs in its own frame.
    pub(crate) fn mask_objects(&self) -> [Name; 4] {
        [self.mask_flag, self.tilde, self.top_env, self.env]
    }
}
