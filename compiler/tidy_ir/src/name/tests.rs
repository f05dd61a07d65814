use super::*;

#[test]
fn test_name_from_raw_index() {
    let name = Name::from_raw(1000);
    assert_eq!(name.index(), 1000);
}

#[test]
fn test_name_empty() {
    assert_eq!(Name::EMPTY.index(), 0);
    assert_eq!(Name::default(), Name::EMPTY);
}

#[test]
fn test_name_hash() {
    use std::collections::HashSet;
    let mut set = HashSet::new();
    set.insert(Name::from_raw(1));
    set.insert(Name::from_raw(1)); // duplicate
    set.insert(Name::from_raw(2));
    assert_eq!(set.len(), 2);
}

#[test]
fn test_name_debug() {
    assert_eq!(format!("{:?}", Name::from_raw(7)), "Name(7)");
}
