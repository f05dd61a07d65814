use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_undefined_variable_message() {
    let err = undefined_variable(".env");
    assert_eq!(err.to_string(), "object `.env` not found");
    assert_eq!(
        err.kind(),
        &EvalErrorKind::UndefinedVariable {
            name: ".env".to_string()
        }
    );
}

#[test]
fn test_not_found_in_data_formats_name() {
    let err = not_found_in_data("Column `%s` not found in data", "height");
    assert_eq!(err.to_string(), "Column `height` not found in data");
}

#[test]
fn test_arity_message() {
    let err = wrong_arg_count("quote", "1 argument", 3);
    assert_eq!(err.to_string(), "`quote` expects 1 argument, got 3");
}

#[test]
fn test_from_kind_roundtrip() {
    let err: EvalError = EvalErrorKind::CyclicScope.into();
    assert_eq!(err, cyclic_scope());
    assert_eq!(
        err.to_string(),
        "re-parenting would make an environment its own ancestor"
    );
}

#[test]
fn test_recursion_limit_message() {
    assert_eq!(
        recursion_limit_exceeded(64).to_string(),
        "maximum recursion depth exceeded (limit: 64)"
    );
}
