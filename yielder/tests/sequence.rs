mod common;

use yielder::producer::replay;
use yielder::{CursorState, Generator, GeneratorError, ProducerStatus, Yielder};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[yielder::test]
fn empty_generator_is_exhausted_immediately() {
    let generator = Generator::<u32>::from_fn(|_| Ok(()));
    let mut cursor = generator.cursor();

    assert!(!cursor.has_more().unwrap());
    assert!(matches!(cursor.take_next(), Err(GeneratorError::EndOfSequence)));
    assert_eq!(cursor.state(), CursorState::Exhausted);
}

#[yielder::test]
fn one_element_generator() {
    let generator = Generator::new(replay([1]));

    let items: Vec<i32> = generator.cursor().collect::<Result<_, _>>().unwrap();
    assert_eq!(items, vec![1]);
}

#[yielder::test]
fn two_element_generator() {
    let generator = Generator::new(replay([1, 2]));

    let items: Vec<i32> = generator.cursor().collect::<Result<_, _>>().unwrap();
    assert_eq!(items, vec![1, 2]);
}

#[yielder::test]
fn finite_sequences_are_replayed_exactly() {
    let cases: Vec<Vec<u64>> = vec![
        vec![],
        vec![7],
        vec![3, 1, 4, 1, 5, 9, 2, 6],
        (0..257).rev().collect(),
    ];

    for case in cases {
        let expected = case.clone();
        let generator = Generator::from_fn(move |co| {
            for &value in &case {
                co.publish(value)?;
            }
            Ok(())
        });

        let mut cursor = generator.cursor();
        assert_eq!(common::drain(&mut cursor), expected);
        assert!(matches!(cursor.take_next(), Err(GeneratorError::EndOfSequence)));
    }
}

#[yielder::test]
fn take_next_past_exhaustion_keeps_failing() {
    let mut cursor = Generator::new(replay(["a"])).cursor();

    assert_eq!(cursor.take_next().unwrap(), "a");
    for _ in 0..3 {
        assert!(cursor.take_next().unwrap_err().is_end_of_sequence());
    }
}

#[yielder::test]
fn nothing_runs_before_demand() {
    let started = Arc::new(AtomicUsize::new(0));
    let counter = started.clone();

    let generator = Generator::from_fn(move |co: &Yielder<u32>| {
        counter.fetch_add(1, Ordering::SeqCst);
        co.publish(1)?;
        Ok(())
    });

    let mut cursor = generator.cursor();
    assert_eq!(cursor.state(), CursorState::NotStarted);
    assert_eq!(cursor.producer_status(), ProducerStatus::NotStarted);
    assert_eq!(started.load(Ordering::SeqCst), 0);

    assert!(cursor.has_more().unwrap());
    assert_eq!(started.load(Ordering::SeqCst), 1);
}

#[yielder::test]
fn has_more_does_not_consume() {
    let published = Arc::new(AtomicUsize::new(0));
    let counter = published.clone();

    let generator = Generator::from_fn(move |co| {
        for i in 0..5u32 {
            counter.fetch_add(1, Ordering::SeqCst);
            co.publish(i)?;
        }
        Ok(())
    });

    let mut cursor = generator.cursor();
    for _ in 0..3 {
        assert!(cursor.has_more().unwrap());
        assert_eq!(cursor.state(), CursorState::ItemReady);
    }

    assert_eq!(published.load(Ordering::SeqCst), 1);
    assert_eq!(cursor.take_next().unwrap(), 0);
    assert_eq!(cursor.state(), CursorState::Running);
    assert_eq!(cursor.take_next().unwrap(), 1);
}

#[yielder::test]
fn producer_does_not_run_ahead_of_consumer() {
    let published = Arc::new(AtomicUsize::new(0));
    let counter = published.clone();

    let generator = Generator::from_fn(move |co| {
        for i in 0.. {
            counter.fetch_add(1, Ordering::SeqCst);
            co.publish(i)?;
        }
        Ok(())
    });

    let mut cursor = generator.cursor();
    for expected in 0..10u64 {
        assert_eq!(cursor.take_next().unwrap(), expected);
    }

    std::thread::sleep(std::time::Duration::from_millis(20));
    assert_eq!(published.load(Ordering::SeqCst), 10);
}

#[yielder::test]
fn remove_is_unsupported() {
    let mut cursor = Generator::new(replay([1, 2])).cursor();

    assert!(matches!(cursor.remove(), Err(GeneratorError::Unsupported("remove"))));
    assert_eq!(cursor.take_next().unwrap(), 1);
    assert!(matches!(cursor.remove(), Err(GeneratorError::Unsupported(_))));
}

#[yielder::test]
fn generator_reference_is_iterable() {
    let generator = Generator::new(replay(vec!['x', 'y', 'z']));

    let mut seen = String::new();
    for item in &generator {
        seen.push(item.unwrap());
    }

    assert_eq!(seen, "xyz");
}

#[yielder::test]
fn publish_all_preserves_order() {
    let generator = Generator::from_fn(|co| {
        co.publish_all(10..15)?;
        co.publish_all(vec![1, 2])?;
        Ok(())
    });

    let items: Vec<i32> = generator.cursor().collect::<Result<_, _>>().unwrap();
    assert_eq!(items, vec![10, 11, 12, 13, 14, 1, 2]);
}

#[yielder::test]
fn recursive_traversal() {
    enum Tree {
        Leaf(u32),
        Node(Vec<Tree>),
    }

    fn walk(tree: &Tree, co: &Yielder<u32>) -> Result<(), yielder::Cancelled> {
        match tree {
            Tree::Leaf(value) => co.publish(*value),
            Tree::Node(children) => children.iter().try_for_each(|child| walk(child, co)),
        }
    }

    let tree = Tree::Node(vec![
        Tree::Leaf(1),
        Tree::Node(vec![Tree::Leaf(2), Tree::Node(vec![Tree::Leaf(3)])]),
        Tree::Leaf(4),
    ]);

    let generator = Generator::from_fn(move |co| Ok(walk(&tree, co)?));

    let items: Vec<u32> = generator.cursor().collect::<Result<_, _>>().unwrap();
    assert_eq!(items, vec![1, 2, 3, 4]);
}
