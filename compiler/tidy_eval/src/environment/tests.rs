use super::*;
use pretty_assertions::assert_eq;
use tidy_ir::StringInterner;

#[test]
fn test_define_lookup() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let env = Env::empty();
    env.define(x, Value::Int(42));
    assert_eq!(env.lookup(x), Some(Value::Int(42)));
    assert_eq!(env.get_local(x), Some(Value::Int(42)));
}

#[test]
fn test_lookup_walks_parents() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let grandparent = Env::empty();
    grandparent.define(x, Value::Int(1));
    let child = grandparent.child().child();

    assert_eq!(child.lookup(x), Some(Value::Int(1)));
    assert_eq!(child.get_local(x), None);
}

#[test]
fn test_shadowing() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let parent = Env::empty();
    parent.define(x, Value::Int(1));
    let child = parent.child();
    child.define(x, Value::Int(2));

    // Child's binding shadows parent's
    assert_eq!(child.lookup(x), Some(Value::Int(2)));
    assert_eq!(parent.lookup(x), Some(Value::Int(1)));
}

#[test]
fn test_lookup_where_skips_rejected_bindings() {
    let interner = StringInterner::new();
    let plus = interner.intern("+");

    let parent = Env::empty();
    parent.define(plus, Value::Builtin(tidy_ir::Primitive::Add));
    let child = parent.child();
    child.define(plus, Value::Int(3));

    assert_eq!(
        child.lookup_where(plus, Value::is_callable),
        Some(Value::Builtin(tidy_ir::Primitive::Add))
    );
    assert_eq!(child.lookup(plus), Some(Value::Int(3)));
}

#[test]
fn test_clones_share_frame() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let env = Env::empty();
    let alias = env.clone();
    alias.define(x, Value::Int(5));

    assert!(env.ptr_eq(&alias));
    assert_eq!(env.get_local(x), Some(Value::Int(5)));
    assert_ne!(env, Env::empty());
}

#[test]
fn test_remove_and_clear() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let y = interner.intern("y");

    let parent = Env::empty();
    let env = parent.child();
    env.define(x, Value::Int(1));
    env.define(y, Value::Int(2));

    assert_eq!(env.remove(x), Some(Value::Int(1)));
    assert_eq!(env.names(), vec![y]);

    env.clear();
    assert!(env.is_empty());
    assert_eq!(env.parent(), Some(parent));
}

#[test]
fn test_set_parent_returns_previous() {
    let a = Env::empty();
    let b = Env::empty();
    let env = a.child();

    let previous = env.set_parent(Some(b.clone()));
    assert_eq!(previous, Ok(Some(a)));
    assert_eq!(env.parent(), Some(b));
}

#[test]
fn test_set_parent_rejects_cycle() {
    let root = Env::empty();
    let middle = root.child();
    let leaf = middle.child();

    assert_eq!(root.set_parent(Some(leaf.clone())), Err(cyclic_scope()));
    assert_eq!(root.set_parent(Some(root.clone())), Err(cyclic_scope()));
    // Chain untouched
    assert_eq!(root.parent(), None);
    assert!(leaf.has_ancestor(&root));
}

#[test]
fn test_reparent_restores_on_drop() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let original = Env::empty();
    let spliced = Env::empty();
    spliced.define(x, Value::Int(7));
    let top = original.child();
    let overscope = top.child();

    {
        let guard = top.reparent(spliced.clone());
        assert!(guard.is_ok());
        assert_eq!(overscope.lookup(x), Some(Value::Int(7)));
    }

    assert_eq!(top.parent(), Some(original));
    assert_eq!(overscope.lookup(x), None);
}

#[test]
fn test_reparent_guard_reports_previous() {
    let original = Env::empty();
    let top = original.child();

    let Ok(guard) = top.reparent(Env::empty()) else {
        panic!("re-parenting an unrelated frame must succeed");
    };
    assert_eq!(guard.previous(), Some(&original));
}

#[test]
fn test_nested_reparent_is_lifo() {
    let p = Env::empty();
    let a = Env::empty();
    let b = Env::empty();
    let top = p.child();

    let outer = top.reparent(a.clone());
    assert_eq!(top.parent().as_ref(), Some(&a));
    {
        let _inner = top.reparent(b.clone());
        assert_eq!(top.parent().as_ref(), Some(&b));
    }
    // Inner restore leaves the outer splice in place
    assert_eq!(top.parent().as_ref(), Some(&a));
    drop(outer);
    assert_eq!(top.parent(), Some(p));
}

#[test]
fn test_reparent_restores_on_panic() {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    let original = Env::empty();
    let top = original.child();

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _guard = top.reparent(Env::empty());
        panic!("evaluation panicked");
    }));

    assert!(result.is_err());
    assert_eq!(top.parent(), Some(original));
}

#[test]
fn test_rebind_restores_previous_value() {
    let interner = StringInterner::new();
    let dot_env = interner.intern(".env");

    let env = Env::empty();
    env.define(dot_env, Value::Int(1));
    {
        let _swap = env.rebind(dot_env, Value::Int(2));
        assert_eq!(env.get_local(dot_env), Some(Value::Int(2)));
    }
    assert_eq!(env.get_local(dot_env), Some(Value::Int(1)));
}

#[test]
fn test_rebind_removes_fresh_binding() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let env = Env::empty();
    {
        let _swap = env.rebind(x, Value::Null);
        assert!(env.has_local(x));
    }
    assert!(!env.has_local(x));
}

#[test]
fn test_clone_frame_copies_bindings() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let source = Env::empty();
    source.define(x, Value::Int(1));
    let parent = Env::empty();
    let copy = source.clone_frame(Some(parent.clone()));

    copy.define(x, Value::Int(2));
    assert_eq!(source.get_local(x), Some(Value::Int(1)));
    assert_eq!(copy.parent(), Some(parent));
}

#[test]
fn test_ancestors_innermost_first() {
    let root = Env::empty();
    let middle = root.child();
    let leaf = middle.child();

    let chain: Vec<Env> = leaf.ancestors().collect();
    assert_eq!(chain, vec![leaf, middle, root]);
}

#[test]
fn test_weak_env_upgrade() {
    let env = Env::empty();
    let weak = env.downgrade();
    assert_eq!(weak.upgrade(), Some(env.clone()));

    drop(env);
    assert_eq!(weak.upgrade(), None);
}
