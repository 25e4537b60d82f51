use crate::game::Direction;

/// Collects steering requests between two ticks.
///
/// Every request is checked against the heading the snake moved with on its
/// last tick, not against earlier requests, so a burst like Up-Left while
/// moving Right cannot fold the snake back onto itself. The last accepted
/// request is the one applied.
#[derive(Debug, Default)]
pub struct TurnBuffer {
    pending: Option<Direction>,
}

impl TurnBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `requested` unless it reverses `current`. Returns whether it was queued.
    pub fn request(&mut self, requested: Direction, current: Direction) -> bool {
        if current.is_opposite(requested) {
            return false;
        }
        self.pending = Some(requested);
        true
    }

    /// The direction to apply on this tick, leaving the buffer empty
    pub fn take(&mut self) -> Option<Direction> {
        self.pending.take()
    }

    pub fn peek(&self) -> Option<Direction> {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_valid_request_wins() {
        let mut buffer = TurnBuffer::new();
        assert!(buffer.request(Direction::Up, Direction::Right));
        assert!(buffer.request(Direction::Down, Direction::Right));
        assert_eq!(buffer.take(), Some(Direction::Down));
        assert_eq!(buffer.take(), None);
    }

    #[test]
    fn test_reversal_dropped() {
        let mut buffer = TurnBuffer::new();
        assert!(buffer.request(Direction::Up, Direction::Right));
        assert!(!buffer.request(Direction::Left, Direction::Right));
        assert_eq!(buffer.peek(), Some(Direction::Up));
    }

    #[test]
    fn test_reversal_alone_leaves_buffer_empty() {
        let mut buffer = TurnBuffer::new();
        assert!(!buffer.request(Direction::Down, Direction::Up));
        assert_eq!(buffer.take(), None);
    }
}
