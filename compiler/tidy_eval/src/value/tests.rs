use super::*;
use pretty_assertions::assert_eq;
use tidy_ir::StringInterner;

#[test]
fn test_type_names() {
    assert_eq!(Value::Int(1).type_name(), "integer");
    assert_eq!(Value::string("a").type_name(), "character");
    assert_eq!(Value::Env(Env::empty()).type_name(), "environment");
    assert_eq!(
        Value::list(NamedList::data_frame(vec![])).type_name(),
        "data frame"
    );
}

#[test]
fn test_as_quosure_filters_formulas() {
    let interner = StringInterner::new();
    let tilde = interner.intern("~");
    let x = interner.intern("x");

    let quo = Value::formula(Formula::quosure(tilde, Expr::Symbol(x), None));
    assert!(quo.as_quosure().is_some());

    let call = std::rc::Rc::new(crate::Call::new(
        crate::Callee::Symbol(tilde),
        vec![Expr::Symbol(x)],
    ));
    let formula = Value::formula(Formula::new(call, None, crate::FormulaKind::Formula));
    assert!(formula.as_formula().is_some());
    assert!(formula.as_quosure().is_none());
}

#[test]
fn test_named_list_lookup_and_duplicates() {
    let interner = StringInterner::new();
    let a = interner.intern("a");
    let b = interner.intern("b");

    let list = NamedList::new(vec![
        (Some(a), Value::Int(1)),
        (None, Value::Int(2)),
        (Some(Name::EMPTY), Value::Int(3)),
        (Some(b), Value::Int(4)),
    ]);
    assert_eq!(list.get(b), Some(&Value::Int(4)));
    assert_eq!(list.named_entries().count(), 2);
    assert!(list.has_names());
    assert_eq!(list.first_duplicate_name(), None);

    let dup = NamedList::new(vec![(Some(a), Value::Int(1)), (Some(a), Value::Int(2))]);
    assert_eq!(dup.first_duplicate_name(), Some(a));
}

#[test]
fn test_unnamed_entries_never_clash() {
    let list = NamedList::new(vec![(None, Value::Int(1)), (None, Value::Int(2))]);
    assert!(!list.has_names());
    assert_eq!(list.first_duplicate_name(), None);
}

#[test]
fn test_data_pronoun_reads_source_only() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let y = interner.intern("y");

    let parent = Env::empty();
    parent.define(y, Value::Int(2));
    let data = parent.child();
    data.define(x, Value::Int(1));

    let pronoun = DataPronoun::new(PronounSource::Env(data), "Object `%s` not found");
    assert_eq!(pronoun.get(x), Some(Value::Int(1)));
    assert_eq!(pronoun.get(y), None);
}

#[test]
fn test_tilde_thunk_resolve_after_drop() {
    let mask = Env::empty();
    let thunk = TildeThunk::new(&mask, &mask);
    assert!(thunk.resolve().is_ok());

    drop(mask);
    assert_eq!(thunk.resolve(), Err(mask_dropped()));
}
