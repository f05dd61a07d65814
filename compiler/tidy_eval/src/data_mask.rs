//! Data masks: overscopes that expose data as variables.
//!
//! A data mask is a chain of frames sitting between the evaluation and the
//! caller's environment:
//!
//! ```text
//! mask (`~`, flag, `.env`, `.top_env`) -> bottom (data, `.data`) -> ... -> top -> parent
//! ```
//!
//! The mask frame holds only the mask objects, so clearing it never touches
//! objects created by evaluated code in `bottom`. `top` is the frame whose
//! parent gets rewired by tilde evaluation.

use std::rc::Rc;

use crate::errors::{invalid_data_mask, EvalError};
use crate::{DataPronoun, Env, Interpreter, NamedList, PronounSource, TildeThunk, Value};

const OBJECT_IN_DATA: &str = "Object `%s` not found in data";
const COLUMN_IN_DATA: &str = "Column `%s` not found in data";
const OBJECT_IN_ENV: &str = "Object `%s` not found in environment";

impl Interpreter<'_> {
    /// Build a data mask over `bottom`..`top`, falling back to `parent`.
    ///
    /// Without `bottom`, an empty frame under `parent` is used. Without
    /// `top`, `top` is `bottom`. `top` must be on `bottom`'s chain.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn new_data_mask(
        &self,
        bottom: Option<&Env>,
        top: Option<&Env>,
        parent: &Env,
    ) -> Result<Env, EvalError> {
        let bottom = bottom
            .cloned()
            .unwrap_or_else(|| Env::new(Some(parent.clone())));
        let top = top.cloned().unwrap_or_else(|| bottom.clone());
        if !bottom.has_ancestor(&top) {
            return Err(invalid_data_mask(
                "Can't create data mask because `top` is not an ancestor of `bottom`",
            ));
        }

        let mask = bottom.child();
        mask.define(
            self.names.tilde,
            Value::TildeThunk(TildeThunk::new(&mask, &top)),
        );
        mask.define(self.names.mask_flag, Value::Bool(true));
        mask.define(self.names.env, Value::Env(parent.clone()));
        mask.define(self.names.top_env, Value::Env(top));
        tracing::debug!(bottom_bindings = bottom.len(), "data mask created");
        Ok(mask)
    }

    /// Build a data mask from `data`.
    ///
    /// - `Null`: an empty mask.
    /// - `Env`: the environment's bindings, copied into a frame under `parent`.
    /// - `List`: each named entry; names must be unique.
    ///
    /// The data is also reachable through the read-only `.data` pronoun.
    pub fn as_data_mask(&self, data: &Value, parent: &Env) -> Result<Env, EvalError> {
        let (bottom, pronoun) = match data {
            Value::Null => return self.new_data_mask(None, None, parent),
            Value::Env(env) => (
                env.clone_frame(Some(parent.clone())),
                DataPronoun::new(PronounSource::Env(env.clone()), OBJECT_IN_ENV),
            ),
            Value::List(list) => {
                check_unique_names(list)?;
                let bottom = Env::new(Some(parent.clone()));
                for (name, value) in list.named_entries() {
                    bottom.define(name, value.clone());
                }
                let lookup_msg = if list.is_data_frame() {
                    COLUMN_IN_DATA
                } else {
                    OBJECT_IN_DATA
                };
                (
                    bottom,
                    DataPronoun::new(PronounSource::List(Rc::clone(list)), lookup_msg),
                )
            }
            other => {
                return Err(invalid_data_mask(format!(
                    "`data` must be a list, data frame, or environment, not {}",
                    other.type_name()
                )))
            }
        };

        bottom.define(self.names.data, Value::DataPronoun(Rc::new(pronoun)));
        self.new_data_mask(Some(&bottom), Some(&bottom), parent)
    }

    /// Lightweight overscope that only makes quosures self-evaluate.
    ///
    /// The mask is its own top frame, and `.env` points at `env`.
    pub fn new_quosure_mask(&self, env: &Env) -> Env {
        let mask = env.child();
        mask.define(
            self.names.tilde,
            Value::TildeThunk(TildeThunk::new(&mask, &mask)),
        );
        mask.define(self.names.env, Value::Env(env.clone()));
        mask
    }

    /// Whether `env` is a data mask frame.
    pub fn is_data_mask(&self, env: &Env) -> bool {
        env.has_local(self.names.mask_flag)
    }

    /// Strip a data mask.
    ///
    /// Removes the mask objects from the mask frame and every binding from
    /// the frames between the mask and its top (inclusive). Frames above
    /// `top` are never touched.
    pub fn data_mask_clean(&self, mask: &Env) {
        let bottom = mask.parent();
        let top = match mask.get_local(self.names.top_env) {
            Some(Value::Env(top)) => Some(top),
            _ => bottom.clone(),
        };

        for name in self.names.mask_objects() {
            mask.remove(name);
        }

        let (Some(bottom), Some(top)) = (bottom, top) else {
            return;
        };
        if !bottom.has_ancestor(&top) {
            return;
        }
        for frame in bottom.ancestors() {
            frame.clear();
            if frame.ptr_eq(&top) {
                break;
            }
        }
    }
}

fn check_unique_names(list: &NamedList) -> Result<(), EvalError> {
    if list.is_empty() {
        return Ok(());
    }
    if !list.has_names() {
        return Err(invalid_data_mask(
            "`data` must be uniquely named but does not have names",
        ));
    }
    if list.first_duplicate_name().is_some() {
        return Err(invalid_data_mask(
            "`data` must be uniquely named but has duplicate elements",
        ));
    }
    Ok(())
}
