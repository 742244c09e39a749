use crate::game::Direction;

/// One-slot mailbox between key events and the next tick.
///
/// Requests are validated against the snake's committed direction, not the
/// one already waiting here, and the last accepted request wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectionQueue {
    pending: Option<Direction>,
}

impl DirectionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a turn. Returns false if it would reverse `committed`.
    pub fn push(&mut self, committed: Direction, requested: Direction) -> bool {
        if committed.is_opposite(requested) {
            return false;
        }
        self.pending = Some(requested);
        true
    }

    /// Drain the slot at a tick boundary
    pub fn take(&mut self) -> Option<Direction> {
        self.pending.take()
    }

    pub fn peek(&self) -> Option<Direction> {
        self.pending
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
