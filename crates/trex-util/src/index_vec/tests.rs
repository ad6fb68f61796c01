use super::*;
use crate::define_idx;

define_idx!(TestId);

#[test]
fn push_returns_sequential_indices() {
    let mut v: IndexVec<TestId, i32> = IndexVec::new();
    let a = v.push(10);
    let b = v.push(20);
    assert_eq!(a, TestId(0));
    assert_eq!(b, TestId(1));
    assert_eq!(v.len(), 2);
}

#[test]
fn indexing_round_trips() {
    let mut v: IndexVec<TestId, &str> = IndexVec::new();
    let id = v.push("x");
    assert_eq!(v[id], "x");
    v[id] = "y";
    assert_eq!(v.get(id), Some(&"y"));
}

#[test]
fn get_out_of_bounds_is_none() {
    let v: IndexVec<TestId, i32> = IndexVec::new();
    assert_eq!(v.get(TestId(3)), None);
}

#[test]
fn iter_enumerated_yields_typed_indices() {
    let mut v: IndexVec<TestId, char> = IndexVec::new();
    v.push('a');
    v.push('b');
    let pairs: Vec<_> = v.iter_enumerated().collect();
    assert_eq!(pairs, vec![(TestId(0), &'a'), (TestId(1), &'b')]);
}

#[test]
fn idx_round_trip() {
    let id = TestId::from_usize(7);
    assert_eq!(id.index(), 7);
}
