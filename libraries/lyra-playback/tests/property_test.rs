//! Property-based tests for the playback core
//!
//! Uses proptest to verify the queue-permutation and loop-policy invariants
//! across many random inputs. Every property here is a contract the engine
//! relies on, not a smoke test.

use lyra_core::{Track, TrackId};
use lyra_playback::{advance, wrap_target, Direction, LoopMode, Outcome, Queue};
use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

// ===== Helpers =====

fn track(id: usize) -> Track {
    Track::new(
        TrackId::new(format!("t{}", id)),
        format!("Track {}", id),
        format!("Artist {}", id % 7),
        Duration::from_secs(60 + (id as u64 % 300)),
        format!("https://cdn.lyra.fm/audio/t{}.m4a", id),
    )
}

fn tracks(n: usize) -> Vec<Track> {
    (0..n).map(track).collect()
}

fn arbitrary_loop_mode() -> impl Strategy<Value = LoopMode> {
    prop_oneof![
        Just(LoopMode::Off),
        Just(LoopMode::One),
        Just(LoopMode::All),
    ]
}

fn arbitrary_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Forward), Just(Direction::Backward)]
}

// ===== Queue / Shuffle Properties =====

proptest! {
    /// Property: the shuffled order is a permutation of the original order
    /// (same id multiset, same length) with the current track at slot 0
    #[test]
    fn shuffle_is_a_pinned_permutation(
        len in 1usize..60,
        start in 0usize..60,
    ) {
        let start = start % len;
        let mut queue = Queue::new();
        queue.set_queue(tracks(len), start).unwrap();
        let current = queue.current_track().unwrap().id.clone();

        queue.enable_shuffle(true);

        let active: Vec<String> = queue
            .active_tracks()
            .iter()
            .map(|t| t.id.to_string())
            .collect();
        let unique: HashSet<&String> = active.iter().collect();

        prop_assert_eq!(active.len(), len);
        prop_assert_eq!(unique.len(), len);
        prop_assert_eq!(queue.position(), 0);
        prop_assert_eq!(&queue.current_track().unwrap().id, &current);
        prop_assert_eq!(active[0].as_str(), current.as_str());
    }

    /// Property: disabling shuffle restores the exact original order and
    /// keeps the same current track, wherever traversal had moved to
    #[test]
    fn unshuffle_restores_original_order(
        len in 1usize..60,
        start in 0usize..60,
        walk in 0usize..60,
    ) {
        let start = start % len;
        let mut queue = Queue::new();
        queue.set_queue(tracks(len), start).unwrap();

        queue.enable_shuffle(true);
        queue.set_position(walk % len).unwrap();
        let current = queue.current_track().unwrap().id.clone();

        queue.enable_shuffle(false);

        let restored: Vec<String> = queue
            .active_tracks()
            .iter()
            .map(|t| t.id.to_string())
            .collect();
        let expected: Vec<String> = (0..len).map(|i| format!("t{}", i)).collect();

        prop_assert_eq!(restored, expected);
        prop_assert_eq!(&queue.current_track().unwrap().id, &current);
    }

    /// Property: index_of_track agrees with the active order under any
    /// shuffle state
    #[test]
    fn index_of_track_is_consistent(
        len in 1usize..40,
        start in 0usize..40,
        shuffled in any::<bool>(),
    ) {
        let start = start % len;
        let mut queue = Queue::new();
        queue.set_queue(tracks(len), start).unwrap();
        queue.enable_shuffle(shuffled);

        for (slot, t) in queue.active_tracks().iter().enumerate() {
            prop_assert_eq!(queue.index_of_track(&t.id), Some(slot));
        }
    }
}

// ===== Loop Policy Properties =====

proptest! {
    /// Property: repeat-one always repeats, regardless of index or direction
    #[test]
    fn repeat_one_always_repeats(
        len in 1usize..100,
        index in 0usize..100,
        direction in arbitrary_direction(),
    ) {
        let index = index % len;
        prop_assert_eq!(advance(direction, index, len, LoopMode::One), Outcome::RepeatSame);
    }

    /// Property: interior indices step by exactly one in the direction of
    /// travel, regardless of loop mode (off/all)
    #[test]
    fn interior_steps_are_unit_steps(
        len in 2usize..100,
        index in 0usize..100,
        mode in arbitrary_loop_mode(),
        direction in arbitrary_direction(),
    ) {
        prop_assume!(mode != LoopMode::One);
        let index = index % len;
        let interior = match direction {
            Direction::Forward => index + 1 < len,
            Direction::Backward => index > 0,
        };
        prop_assume!(interior);

        let expected = match direction {
            Direction::Forward => index + 1,
            Direction::Backward => index - 1,
        };
        prop_assert_eq!(advance(direction, index, len, mode), Outcome::Index(expected));
    }

    /// Property: boundary behavior depends only on loop mode — all wraps to
    /// the far end, off stops
    #[test]
    fn boundary_resolution(
        len in 1usize..100,
        direction in arbitrary_direction(),
    ) {
        let boundary = match direction {
            Direction::Forward => len - 1,
            Direction::Backward => 0,
        };

        prop_assert_eq!(advance(direction, boundary, len, LoopMode::All), Outcome::WrapAll);
        prop_assert_eq!(advance(direction, boundary, len, LoopMode::Off), Outcome::StopAtBoundary);

        let target = wrap_target(direction, len);
        match direction {
            Direction::Forward => prop_assert_eq!(target, 0),
            Direction::Backward => prop_assert_eq!(target, len - 1),
        }
    }

    /// Property: every outcome index stays inside the queue
    #[test]
    fn outcomes_stay_in_bounds(
        len in 1usize..100,
        index in 0usize..100,
        mode in arbitrary_loop_mode(),
        direction in arbitrary_direction(),
    ) {
        let index = index % len;
        match advance(direction, index, len, mode) {
            Outcome::Index(i) => prop_assert!(i < len),
            Outcome::WrapAll => prop_assert!(wrap_target(direction, len) < len),
            Outcome::StopAtBoundary | Outcome::RepeatSame => {}
        }
    }
}
