//! Runtime values.

use std::rc::Rc;

use tidy_ir::{Name, Primitive};

use crate::environment::WeakEnv;
use crate::errors::{mask_dropped, EvalError};
use crate::{Env, Expr, Formula};

/// Runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The null object.
    Null,
    /// Sentinel for an absent argument.
    Missing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    /// Named list or data frame.
    List(Rc<NamedList>),
    /// Quoted code.
    Lang(Rc<Expr>),
    /// Formula or quosure.
    Formula(Rc<Formula>),
    /// Environment handle.
    Env(Env),
    /// A built-in operator.
    Builtin(Primitive),
    /// The `~` override installed in a data mask.
    TildeThunk(TildeThunk),
    /// The `.data` pronoun of a data mask.
    DataPronoun(Rc<DataPronoun>),
}

impl Value {
    /// String value.
    pub fn string(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    /// Quoted code value.
    pub fn lang(expr: Expr) -> Self {
        Value::Lang(Rc::new(expr))
    }

    /// Wrap a formula object.
    pub fn formula(formula: Formula) -> Self {
        Value::Formula(Rc::new(formula))
    }

    /// Named list value.
    pub fn list(list: NamedList) -> Self {
        Value::List(Rc::new(list))
    }

    /// Name of the value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Missing => "missing argument",
            Value::Bool(_) => "logical",
            Value::Int(_) => "integer",
            Value::Float(_) => "double",
            Value::Str(_) => "character",
            Value::List(list) if list.is_data_frame() => "data frame",
            Value::List(_) => "list",
            Value::Lang(_) => "language",
            Value::Formula(f) if f.is_quosure() => "quosure",
            Value::Formula(_) => "formula",
            Value::Env(_) => "environment",
            Value::Builtin(_) => "primitive",
            Value::TildeThunk(_) => "function",
            Value::DataPronoun(_) => "data pronoun",
        }
    }

    /// Whether the value can appear in function position.
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Builtin(_) | Value::TildeThunk(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_env(&self) -> Option<&Env> {
        match self {
            Value::Env(env) => Some(env),
            _ => None,
        }
    }

    pub fn as_formula(&self) -> Option<&Rc<Formula>> {
        match self {
            Value::Formula(formula) => Some(formula),
            _ => None,
        }
    }

    /// The formula object, if it is a quosure.
    pub fn as_quosure(&self) -> Option<&Rc<Formula>> {
        self.as_formula().filter(|formula| formula.is_quosure())
    }
}

/// Whether a list is a plain list or a data frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    List,
    DataFrame,
}

/// Ordered list of optionally named entries.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedList {
    entries: Vec<(Option<Name>, Value)>,
    kind: ListKind,
}

impl NamedList {
    /// Plain list.
    pub fn new(entries: Vec<(Option<Name>, Value)>) -> Self {
        NamedList {
            entries,
            kind: ListKind::List,
        }
    }

    /// Data frame whose entries are its columns.
    pub fn data_frame(columns: Vec<(Name, Value)>) -> Self {
        NamedList {
            entries: columns
                .into_iter()
                .map(|(name, column)| (Some(name), column))
                .collect(),
            kind: ListKind::DataFrame,
        }
    }

    pub fn entries(&self) -> &[(Option<Name>, Value)] {
        &self.entries
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn is_data_frame(&self) -> bool {
        self.kind == ListKind::DataFrame
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry named `name`.
    pub fn get(&self, name: Name) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == Some(name))
            .map(|(_, value)| value)
    }

    /// Entries with a usable name. The empty name counts as unnamed.
    pub fn named_entries(&self) -> impl Iterator<Item = (Name, &Value)> + '_ {
        self.entries.iter().filter_map(|(name, value)| match name {
            Some(name) if *name != Name::EMPTY => Some((*name, value)),
            _ => None,
        })
    }

    /// Whether any entry carries a usable name.
    pub fn has_names(&self) -> bool {
        self.named_entries().next().is_some()
    }

    /// First name that appears more than once. Unnamed entries never clash.
    pub fn first_duplicate_name(&self) -> Option<Name> {
        let mut seen = rustc_hash::FxHashSet::default();
        self.named_entries()
            .map(|(name, _)| name)
            .find(|name| !seen.insert(*name))
    }
}

/// What a data pronoun reads from.
#[derive(Clone, Debug, PartialEq)]
pub enum PronounSource {
    List(Rc<NamedList>),
    Env(Env),
}

/// Read-only view of the data behind a data mask (`.data`).
///
/// Lookups go to the data only, never to the enclosing scopes, and an
/// absent name is an error rather than a fallthrough.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPronoun {
    source: PronounSource,
    lookup_msg: &'static str,
}

impl DataPronoun {
    /// Pronoun over `source`; `lookup_msg` has one `%s` for the missing name.
    pub fn new(source: PronounSource, lookup_msg: &'static str) -> Self {
        DataPronoun { source, lookup_msg }
    }

    /// Template used when a lookup fails.
    pub fn lookup_msg(&self) -> &'static str {
        self.lookup_msg
    }

    /// Read `name` from the data.
    pub fn get(&self, name: Name) -> Option<Value> {
        match &self.source {
            PronounSource::List(list) => list.get(name).cloned(),
            PronounSource::Env(env) => env.get_local(name),
        }
    }
}

/// The `~` binding of a mask: routes `~` calls to tilde evaluation with the
/// mask and its top frame.
///
/// Holds weak handles because it is stored inside the mask it refers to.
#[derive(Clone, Debug, PartialEq)]
pub struct TildeThunk {
    mask: WeakEnv,
    top: WeakEnv,
}

impl TildeThunk {
    pub fn new(mask: &Env, top: &Env) -> Self {
        TildeThunk {
            mask: mask.downgrade(),
            top: top.downgrade(),
        }
    }

    /// Strong handles to the mask and its top frame.
    pub fn resolve(&self) -> Result<(Env, Env), EvalError> {
        match (self.mask.upgrade(), self.top.upgrade()) {
            (Some(mask), Some(top)) => Ok((mask, top)),
            _ => Err(mask_dropped()),
        }
    }
}

#[cfg(test)]
mod tests;
