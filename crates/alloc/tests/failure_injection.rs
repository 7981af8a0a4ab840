mod common;

use std::panic::{self, AssertUnwindSafe};

use common::{Limited, Tracked};
use tinystl_alloc::{AllocError, ConstructError, Vec};

fn two_full() -> Vec<Tracked> {
    let mut v = Vec::new();
    v.push(Tracked::new(1));
    v.push(Tracked::new(2));
    assert_eq!(v.capacity(), 2);
    v
}

#[test]
fn growth_with_failing_clone_keeps_array() {
    common::reset();
    let mut v = two_full();
    let src = [Tracked::new(3), Tracked::new(4)];
    let before = v.as_ptr();

    common::fail_after(1);
    let result = panic::catch_unwind(AssertUnwindSafe(|| v.extend_from_slice(&src)));
    assert!(result.is_err());

    assert_eq!(common::values(&v), [1, 2]);
    assert_eq!(v.capacity(), 2);
    assert_eq!(v.as_ptr(), before);
    // two in `v`, two in `src`; the one clone that succeeded was destroyed
    assert_eq!(common::live(), 4);
    assert_eq!(common::constructions(), 5);
    assert_eq!(common::destructions(), 1);

    drop(v);
    drop(src);
    assert_eq!(common::live(), 0);
}

#[test]
fn in_place_insert_with_failing_clone_keeps_order() {
    common::reset();
    let mut v = Vec::with_capacity(8);
    for i in 0..4 {
        v.push(Tracked::new(i));
    }
    let src = [Tracked::new(10), Tracked::new(11), Tracked::new(12)];

    common::fail_after(2);
    let result = panic::catch_unwind(AssertUnwindSafe(|| v.insert_slice(1, &src)));
    assert!(result.is_err());

    assert_eq!(common::values(&v), [0, 1, 2, 3]);
    assert_eq!(v.capacity(), 8);
    assert_eq!(common::live(), 7);

    v.insert_slice(1, &src);
    assert_eq!(common::values(&v), [0, 10, 11, 12, 1, 2, 3]);
}

#[test]
fn failing_insert_n_in_place() {
    common::reset();
    let mut v = Vec::with_capacity(6);
    v.push(Tracked::new(1));
    v.push(Tracked::new(2));
    let value = Tracked::new(0);

    common::fail_after(2);
    let result = panic::catch_unwind(AssertUnwindSafe(|| v.insert_n(0, 3, value)));
    assert!(result.is_err());
    assert_eq!(common::values(&v), [1, 2]);
    drop(v);
    assert_eq!(common::live(), 0);
}

#[test]
fn panicking_emplace_leaves_array() {
    common::reset();
    let mut v = two_full();
    v.reserve(4);

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        v.emplace(1, || panic!("no value today"));
    }));
    assert!(result.is_err());
    assert_eq!(common::values(&v), [1, 2]);

    // the same through the reallocating path
    let mut full = two_full();
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        full.emplace_back(|| panic!("no value today"));
    }));
    assert!(result.is_err());
    assert_eq!(common::values(&full), [1, 2]);
    assert_eq!(full.capacity(), 2);
}

#[test]
fn failing_construction_from_elem_releases_everything() {
    common::reset();
    let value = Tracked::new(7);
    common::fail_after(3);
    let result = panic::catch_unwind(|| Vec::from_elem(5, &value));
    assert!(result.is_err());
    assert_eq!(common::live(), 1);
    assert_eq!(common::destructions(), 3);
}

#[test]
fn failing_clone_of_whole_array() {
    common::reset();
    let v = Vec::from_fn(4, |i| Tracked::new(i as u32));
    common::fail_after(2);
    let result = panic::catch_unwind(AssertUnwindSafe(|| v.clone()));
    assert!(result.is_err());
    assert_eq!(common::live(), 4);
}

#[test]
fn fallible_producer_reports_position() {
    common::reset();
    let result = Vec::<Tracked>::try_from_fn(5, |i| {
        if i < 3 {
            Ok(Tracked::new(i as u32))
        } else {
            Err(format!("stopped at {i}"))
        }
    });
    match result {
        Err(ConstructError::Element(err)) => {
            assert_eq!(err.index, 3);
            assert_eq!(err.error, "stopped at 3");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(common::live(), 0);
}

#[test]
fn failing_drop_during_erase_still_closes_gap() {
    struct Bomb(u32);
    impl Drop for Bomb {
        fn drop(&mut self) {
            if self.0 == 2 && !std::thread::panicking() {
                panic!("bomb");
            }
        }
    }

    let mut v = Vec::from_fn(5, |i| Bomb(i as u32));
    let result = panic::catch_unwind(AssertUnwindSafe(|| v.erase(1..3)));
    assert!(result.is_err());
    let left: std::vec::Vec<u32> = v.iter().map(|b| b.0).collect();
    assert_eq!(left, [0, 3, 4]);
}

#[test]
fn allocation_failure_on_push_keeps_array() {
    Limited::set_budget(1);
    let mut v: Vec<u32, Limited> = Vec::new_in();
    v.push(1);
    let err = v.try_push(2).unwrap_err();
    assert!(matches!(err, AllocError::OutOfMemory { .. }));
    assert_eq!(v, [1]);
    assert_eq!(v.capacity(), 1);
}

#[test]
fn allocation_failure_on_bulk_insert_and_reserve() {
    Limited::set_budget(1);
    let mut v: Vec<u32, Limited> = Vec::from_fn_in(3, |i| i as u32);
    let ptr = v.as_ptr();
    assert!(v.try_insert_slice(1, &[7, 8]).is_err());
    assert!(v.try_reserve(10).is_err());
    assert!(v.try_reserve_exact(1).is_err());
    assert_eq!(v, [0, 1, 2]);
    assert_eq!(v.as_ptr(), ptr);

    // in-place inserts never allocate
    v.reserve_exact(0);
    v.truncate(1);
    assert!(v.try_insert_slice(0, &[5, 6]).is_ok());
    assert_eq!(v, [5, 6, 0]);
}

#[test]
fn allocation_failure_on_shrink_keeps_allocation() {
    Limited::set_budget(1);
    let mut v: Vec<String, Limited> = Vec::with_capacity_in(8);
    v.push("a".into());
    assert!(v.try_shrink_to_fit().is_err());
    assert_eq!(v.capacity(), 8);
    assert_eq!(v, ["a"]);
}

#[test]
fn allocation_failure_on_construction() {
    Limited::set_budget(0);
    assert!(Vec::<u8, Limited>::try_with_capacity(4).is_err());
    assert!(Vec::<u8, Limited>::try_from_elem(4, &1).is_err());
    let err = Vec::<u8, Limited>::try_from_fn(4, |_| Ok::<u8, ()>(0)).unwrap_err();
    assert!(matches!(err, ConstructError::Alloc(_)));
    // empty arrays never ask
    assert!(Vec::<u8, Limited>::try_with_capacity(0).is_ok());
}

#[test]
fn capacity_overflow_is_reported() {
    let mut v = Vec::<u64>::new();
    assert_eq!(
        v.try_reserve(usize::MAX / 4),
        Err(AllocError::CapacityOverflow)
    );
    assert!(v.is_empty());
}

#[test]
fn failing_assign_into_fresh_allocation_keeps_array() {
    common::reset();
    let mut v = two_full();
    let value = Tracked::new(9);

    common::fail_after(2);
    let result = panic::catch_unwind(AssertUnwindSafe(|| v.assign(5, &value)));
    assert!(result.is_err());
    assert_eq!(common::values(&v), [1, 2]);
    assert_eq!(v.capacity(), 2);
    assert_eq!(common::live(), 3);
    assert_eq!(common::destructions(), 2);
}

#[test]
fn failing_clone_from_longer_source_keeps_array() {
    common::reset();
    let mut dst = two_full();
    let src = Vec::from_fn(4, |i| Tracked::new(10 + i as u32));

    common::fail_after(3);
    let result = panic::catch_unwind(AssertUnwindSafe(|| dst.clone_from(&src)));
    assert!(result.is_err());
    assert_eq!(common::values(&dst), [1, 2]);
    assert_eq!(dst.capacity(), 2);
    assert_eq!(common::live(), 6);

    dst.clone_from(&src);
    assert_eq!(common::values(&dst), [10, 11, 12, 13]);
}

#[test]
fn panicking_iterator_leaves_array() {
    common::reset();
    let mut v = two_full();
    v.reserve(6);
    let cap = v.capacity();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        v.insert_iter(
            1,
            (0..5).map(|i| {
                if i == 2 {
                    panic!("iterator gave up");
                }
                Tracked::new(10 + i)
            }),
        );
    }));
    assert!(result.is_err());
    assert_eq!(common::values(&v), [1, 2]);
    assert_eq!(v.capacity(), cap);
    // the two staged items were dropped with the panic
    assert_eq!(common::live(), 2);
    assert_eq!(common::destructions(), 2);
}
