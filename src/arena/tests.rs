/*
** This file is a part of Xmlvet (XML document and schema library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlvet is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::*;

#[test]
fn it_works() {
    let mut arena = Arena::new();
    assert!(arena.is_empty());

    let a = arena.alloc("a".to_string()).unwrap();
    let b = arena.alloc("b".to_string()).unwrap();
    assert_eq!(arena.len(), 2);
    assert_eq!(arena.get(a).map(String::as_str), Some("a"));
    assert_eq!(arena.get(b).map(String::as_str), Some("b"));

    arena.get_mut(a).unwrap().push_str("bc");
    assert_eq!(arena.get(a).map(String::as_str), Some("abc"));
}

#[test]
fn stale_index() {
    let mut arena = Arena::new();
    let a = arena.alloc(1).unwrap();
    assert_eq!(arena.free(a), Some(1));
    assert_eq!(arena.free(a), None);
    assert!(arena.get(a).is_none());
    assert!(!arena.contains(a));

    // Same slot, new generation
    let b = arena.alloc(2).unwrap();
    assert_ne!(a, b);
    assert!(arena.get(a).is_none());
    assert!(arena.get_mut(a).is_none());
    assert_eq!(arena.get(b), Some(&2));
    assert_eq!(arena.stats().nr_slots, 1);
}

#[test]
fn clear_recycles() {
    let mut arena = Arena::with_capacity(4).unwrap();
    let old: Vec<ArenaIndex> = (0..100).map(|i| arena.alloc(i).unwrap()).collect();
    assert_eq!(arena.len(), 100);

    arena.clear();
    assert!(arena.is_empty());
    assert!(old.iter().all(|index| arena.get(*index).is_none()));

    for i in 0..100 {
        arena.alloc(i).unwrap();
    }
    assert_eq!(arena.stats().nr_slots, 100);
}

#[test]
fn stats() {
    let mut arena = Arena::new();
    assert_eq!(arena.stats().nr_allocated_bytes, 0);

    let a = arena.alloc(7u64).unwrap();
    let _b = arena.alloc(8u64).unwrap();
    let stats = arena.stats();
    assert_eq!(stats.nr_slots, 2);
    assert_eq!(stats.nr_live, 2);
    assert!(stats.nr_allocated_bytes >= stats.nr_used_bytes);

    arena.free(a);
    let stats2 = arena.stats();
    assert_eq!(stats2.nr_live, 1);
    assert!(stats2.nr_used_bytes < stats.nr_used_bytes);
    assert!(format!("{}", stats2).starts_with("2 slots (1 live)"));
}
