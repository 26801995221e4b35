use ember_ecs::{EntityAllocator, SparseSet};
use rstest::rstest;

#[derive(Debug, PartialEq)]
struct Label(&'static str);

#[test]
fn despawned_slot_reuse_does_not_leak_components() {
    let mut alloc = EntityAllocator::new();
    let mut labels = SparseSet::new();

    let a = alloc.allocate();
    let b = alloc.allocate();
    labels.insert(a.index(), Label("a"));
    labels.insert(b.index(), Label("b"));

    assert!(alloc.deallocate(a));
    labels.remove(a.index());

    let c = alloc.allocate();
    assert_eq!(c.index(), a.index());
    assert!(labels.get(c.index()).is_none());
    assert_eq!(labels.get(b.index()), Some(&Label("b")));
}

#[rstest]
#[case::few(4)]
#[case::many(64)]
#[case::odd(33)]
fn every_other_entity_removed(#[case] count: usize) {
    let mut alloc = EntityAllocator::new();
    let mut values = SparseSet::new();

    let entities: Vec<_> = (0..count).map(|_| alloc.allocate()).collect();
    for (i, e) in entities.iter().enumerate() {
        values.insert(e.index(), i);
    }
    for e in entities.iter().step_by(2) {
        values.remove(e.index());
    }

    assert_eq!(values.len(), count / 2);
    for (i, e) in entities.iter().enumerate() {
        assert_eq!(values.get(e.index()).copied(), (i % 2 == 1).then_some(i));
    }
}
