use super::*;

#[test]
fn test_intern_and_lookup() {
    let interner = StringInterner::new();

    let hello = interner.intern("hello");
    let world = interner.intern("world");
    let hello2 = interner.intern("hello");

    assert_eq!(hello, hello2);
    assert_ne!(hello, world);

    assert_eq!(interner.lookup(hello), "hello");
    assert_eq!(interner.lookup(world), "world");
}

#[test]
fn test_empty_string() {
    let interner = StringInterner::new();
    let empty = interner.intern("");
    assert_eq!(empty, Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn test_symbols_pre_interned() {
    let interner = StringInterner::new();
    let before = interner.len();

    let tilde = interner.intern("~");
    let env = interner.intern(".env");
    let flag = interner.intern(".__tidyeval_data_mask__.");

    assert_eq!(interner.len(), before);
    assert_eq!(interner.lookup(tilde), "~");
    assert_eq!(interner.lookup(env), ".env");
    assert_eq!(interner.lookup(flag), ".__tidyeval_data_mask__.");
}

#[test]
fn test_unknown_name_reads_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(u32::MAX)), "");
}
