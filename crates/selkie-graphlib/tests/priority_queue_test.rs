use selkie_graphlib::PriorityQueue;

#[test]
fn min_tracks_the_smallest_priority() {
    let mut pq = PriorityQueue::new();
    pq.add("b", 2);
    pq.add("a", 1);
    pq.add("c", 3);

    assert_eq!(pq.len(), 3);
    assert_eq!(pq.min(), Some("a"));
    assert_eq!(pq.priority("c"), Some(3));
}

#[test]
fn remove_min_drains_in_priority_order() {
    let mut pq = PriorityQueue::new();
    pq.add("c", 3);
    pq.add("a", 1);
    pq.add("b", 2);

    assert_eq!(pq.remove_min(), Some("a".to_string()));
    assert_eq!(pq.remove_min(), Some("b".to_string()));
    assert_eq!(pq.remove_min(), Some("c".to_string()));
    assert_eq!(pq.remove_min(), None);
    assert!(pq.is_empty());
}

#[test]
fn ties_break_by_insertion_order() {
    let mut pq = PriorityQueue::new();
    pq.add("x", 1);
    pq.add("y", 1);
    pq.add("z", 1);

    assert_eq!(pq.remove_min(), Some("x".to_string()));
    assert_eq!(pq.remove_min(), Some("y".to_string()));
    assert_eq!(pq.remove_min(), Some("z".to_string()));
}

#[test]
fn decrease_moves_an_entry_up() {
    let mut pq = PriorityQueue::new();
    pq.add("a", 5);
    pq.add("b", 3);

    assert!(pq.decrease("a", 1));
    assert_eq!(pq.min(), Some("a"));
    assert_eq!(pq.priority("a"), Some(1));
}

#[test]
fn decrease_rejects_increases_and_unknown_keys() {
    let mut pq = PriorityQueue::new();
    pq.add("a", 1);

    assert!(!pq.decrease("a", 2));
    assert_eq!(pq.priority("a"), Some(1));
    assert!(!pq.decrease("missing", 0));
}

#[test]
fn duplicate_adds_are_rejected() {
    let mut pq = PriorityQueue::new();
    assert!(pq.add("a", 1));
    assert!(!pq.add("a", 7));
    assert_eq!(pq.priority("a"), Some(1));
    assert!(pq.contains("a"));
}
