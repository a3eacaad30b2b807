//! Loop policy: boundary arithmetic for queue traversal
//!
//! Pure and deterministic. Shuffle is invisible here — it only changes which
//! track occupies each index, never the arithmetic.

use crate::types::{Direction, LoopMode};

/// Result of resolving a traversal step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Move to this index of the active order
    Index(usize),

    /// Queue boundary crossed with loop-all: wrap around
    /// (forward resolves to index 0, backward to the last index)
    WrapAll,

    /// Queue boundary crossed without looping: traversal stops here
    StopAtBoundary,

    /// Replay the current track from position zero
    RepeatSame,
}

/// Resolve one traversal step
///
/// Natural end-of-track is an implicit forward advance through this same
/// function. Repeat-one never leaves the current track, for either direction
/// and at any index.
pub fn advance(
    direction: Direction,
    current_index: usize,
    queue_len: usize,
    loop_mode: LoopMode,
) -> Outcome {
    if queue_len == 0 {
        return Outcome::StopAtBoundary;
    }

    if loop_mode == LoopMode::One {
        return Outcome::RepeatSame;
    }

    match direction {
        Direction::Forward => {
            if current_index + 1 < queue_len {
                Outcome::Index(current_index + 1)
            } else if loop_mode == LoopMode::All {
                Outcome::WrapAll
            } else {
                Outcome::StopAtBoundary
            }
        }
        Direction::Backward => {
            if current_index > 0 {
                Outcome::Index(current_index - 1)
            } else if loop_mode == LoopMode::All {
                Outcome::WrapAll
            } else {
                Outcome::StopAtBoundary
            }
        }
    }
}

/// Index a `WrapAll` outcome lands on
pub fn wrap_target(direction: Direction, queue_len: usize) -> usize {
    match direction {
        Direction::Forward => 0,
        Direction::Backward => queue_len.saturating_sub(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction::{Backward, Forward};
    use crate::types::LoopMode::{All, Off, One};

    #[test]
    fn forward_interior_steps_regardless_of_wrap_setting() {
        assert_eq!(advance(Forward, 0, 3, Off), Outcome::Index(1));
        assert_eq!(advance(Forward, 1, 3, All), Outcome::Index(2));
    }

    #[test]
    fn forward_last_index_wraps_with_loop_all() {
        assert_eq!(advance(Forward, 2, 3, All), Outcome::WrapAll);
        assert_eq!(wrap_target(Forward, 3), 0);
    }

    #[test]
    fn forward_last_index_stops_without_loop() {
        assert_eq!(advance(Forward, 2, 3, Off), Outcome::StopAtBoundary);
    }

    #[test]
    fn repeat_one_never_leaves_current_track() {
        for i in 0..5 {
            assert_eq!(advance(Forward, i, 5, One), Outcome::RepeatSame);
            assert_eq!(advance(Backward, i, 5, One), Outcome::RepeatSame);
        }
    }

    #[test]
    fn backward_mirrors_forward_at_index_zero() {
        assert_eq!(advance(Backward, 2, 3, Off), Outcome::Index(1));
        assert_eq!(advance(Backward, 0, 3, All), Outcome::WrapAll);
        assert_eq!(wrap_target(Backward, 3), 2);
        assert_eq!(advance(Backward, 0, 3, Off), Outcome::StopAtBoundary);
    }

    #[test]
    fn empty_queue_always_stops() {
        assert_eq!(advance(Forward, 0, 0, All), Outcome::StopAtBoundary);
        assert_eq!(advance(Backward, 0, 0, One), Outcome::StopAtBoundary);
    }

    #[test]
    fn single_track_queue() {
        assert_eq!(advance(Forward, 0, 1, Off), Outcome::StopAtBoundary);
        assert_eq!(advance(Forward, 0, 1, All), Outcome::WrapAll);
        assert_eq!(advance(Forward, 0, 1, One), Outcome::RepeatSame);
    }
}
