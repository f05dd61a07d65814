use super::*;

#[test]
fn test_symbols_are_unique() {
    use std::collections::HashSet;
    let symbols: HashSet<_> = Primitive::ALL.iter().map(|p| p.symbol()).collect();
    assert_eq!(symbols.len(), Primitive::ALL.len());
}

#[test]
fn test_special_primitives() {
    assert!(Primitive::Tilde.is_special());
    assert!(Primitive::Quote.is_special());
    assert!(Primitive::Dollar.is_special());
    assert!(!Primitive::Add.is_special());
}

#[test]
fn test_arithmetic_primitives() {
    let arithmetic: Vec<_> = Primitive::ALL
        .into_iter()
        .filter(|p| p.is_arithmetic())
        .collect();
    assert_eq!(
        arithmetic,
        vec![Primitive::Add, Primitive::Sub, Primitive::Mul, Primitive::Div]
    );
}
