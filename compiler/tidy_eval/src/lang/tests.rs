use super::*;
use pretty_assertions::assert_eq;
use tidy_ir::StringInterner;

#[test]
fn test_is_symbolic() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let tilde = interner.intern("~");

    assert!(Expr::Symbol(x).is_symbolic());
    assert!(Expr::apply(x, vec![]).is_symbolic());
    assert!(!Expr::int(1).is_symbolic());
    assert!(!Expr::MissingArg.is_symbolic());

    let quo = Formula::quosure(tilde, Expr::Symbol(x), None);
    assert!(Expr::Const(Value::formula(quo)).is_symbolic());
}

#[test]
fn test_quosure_shape() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let tilde = interner.intern("~");
    let env = Env::empty();

    let quo = Formula::quosure(tilde, Expr::Symbol(x), Some(env.clone()));
    assert!(quo.is_quosure());
    assert_eq!(quo.kind(), FormulaKind::Quosure);
    assert_eq!(quo.call().callee(), Callee::Symbol(tilde));
    assert_eq!(quo.rhs(), Some(&Expr::Symbol(x)));
    assert_eq!(quo.lhs(), None);
    assert_eq!(quo.env(), Some(&env));
    assert!(!quo.is_missing_quosure());
}

#[test]
fn test_missing_quosure() {
    let interner = StringInterner::new();
    let tilde = interner.intern("~");

    let quo = Formula::quosure(tilde, Expr::MissingArg, None);
    assert!(quo.is_missing_quosure());
}

#[test]
fn test_two_sided_formula() {
    let interner = StringInterner::new();
    let y = interner.intern("y");
    let x = interner.intern("x");
    let tilde = interner.intern("~");

    let call = Rc::new(Call::new(
        Callee::Symbol(tilde),
        vec![Expr::Symbol(y), Expr::Symbol(x)],
    ));
    let formula = Formula::new(call, None, FormulaKind::Formula);

    assert_eq!(formula.lhs(), Some(&Expr::Symbol(y)));
    assert_eq!(formula.rhs(), Some(&Expr::Symbol(x)));
    assert!(!formula.is_missing_quosure());
}

#[test]
fn test_with_callee_keeps_operands_and_env() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let tilde = interner.intern("~");
    let env = Env::empty();

    let call = Rc::new(Call::new(
        Callee::Primitive(Primitive::Tilde),
        vec![Expr::Symbol(x)],
    ));
    let formula = Formula::new(Rc::clone(&call), Some(env.clone()), FormulaKind::Formula);
    let renamed = formula.with_callee(Callee::Symbol(tilde));

    assert_eq!(renamed.call().callee(), Callee::Symbol(tilde));
    assert_eq!(renamed.call().args(), call.args());
    assert_eq!(renamed.env(), Some(&env));
    // The original node is untouched
    assert_eq!(formula.call().callee(), Callee::Primitive(Primitive::Tilde));
}
