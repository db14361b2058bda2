//! The snake: body cells, heading, queued input and pending growth.

use std::collections::VecDeque;

use tracing::trace;

use crate::game::{Board, CheatMode, Direction, GridPosition};

/// Outcome of [`Snake::advance`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AdvanceResult {
    Moved,
    AteSelf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    /// Head first.
    segments: VecDeque<GridPosition>,
    heading: Direction,
    /// Latest accepted input, consumed by the next advance.
    queued: Direction,
    /// Advances left during which the tail stays put.
    growth_pending: u32,
}

impl Snake {
    /// A straight snake with its head on `head`, body trailing opposite to
    /// `heading`.
    pub fn new(head: GridPosition, length: usize, heading: Direction) -> Self {
        let mut segments = VecDeque::with_capacity(length.max(1));
        let mut cell = head;
        for _ in 0..length.max(1) {
            segments.push_back(cell);
            cell = cell.step(heading.opposite());
        }
        Snake::from_segments(segments, heading)
    }

    /// The default starting snake: head on the board center, heading right.
    pub fn spawn(board: Board, length: usize) -> Self {
        Snake::new(board.center(), length, Direction::Right)
    }

    /// Builds a snake from explicit cells, head first. Panics on an empty body.
    pub fn from_segments(segments: impl IntoIterator<Item = GridPosition>, heading: Direction) -> Self {
        let segments: VecDeque<_> = segments.into_iter().collect();
        assert!(!segments.is_empty(), "a snake needs at least a head");
        Snake {
            segments,
            heading,
            queued: heading,
            growth_pending: 0,
        }
    }

    pub fn head(&self) -> GridPosition {
        self.segments[0]
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = GridPosition> + '_ {
        self.segments.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn queued(&self) -> Direction {
        self.queued
    }

    pub fn growth_pending(&self) -> u32 {
        self.growth_pending
    }

    pub fn occupies(&self, pos: GridPosition) -> bool {
        self.segments.contains(&pos)
    }

    /// Queues `direction` for the next advance. A reversal onto the neck is
    /// ignored while there is a neck to run into.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.len() > 1 && direction == self.heading.opposite() {
            trace!(?direction, heading = ?self.heading, "reversal ignored");
            return false;
        }
        self.queued = direction;
        true
    }

    /// Queues `direction` without the reversal rule.
    pub fn force_direction(&mut self, direction: Direction) {
        self.queued = direction;
    }

    pub fn grow(&mut self, n: u32) {
        self.growth_pending = self.growth_pending.saturating_add(n);
    }

    /// The cell the next [`advance`](Self::advance) moves the head into.
    pub fn next_head(&self, board: Board, cheat: CheatMode) -> GridPosition {
        let next = self.head().step(self.queued);
        if cheat.is_active() { board.wrap(next) } else { next }
    }

    /// Moves one cell along the queued direction. Walls are the caller's
    /// business; with cheat mode on the head wraps and never bites.
    pub fn advance(&mut self, board: Board, cheat: CheatMode) -> AdvanceResult {
        let new_head = self.next_head(board, cheat);
        self.heading = self.queued;

        if !cheat.is_active() {
            // The tail cell frees up this tick unless the snake is growing.
            let solid = if self.growth_pending > 0 {
                self.len()
            } else {
                self.len() - 1
            };
            if self.segments.iter().take(solid).any(|&cell| cell == new_head) {
                return AdvanceResult::AteSelf;
            }
        }

        self.segments.push_front(new_head);
        if self.growth_pending > 0 {
            self.growth_pending -= 1;
        } else {
            self.segments.pop_back();
        }
        AdvanceResult::Moved
    }

    /// Facing of every segment, head first: the head looks along the
    /// heading, each body cell towards the cell ahead of it.
    pub fn segment_headings(&self, board: Board) -> Vec<Direction> {
        let mut headings = Vec::with_capacity(self.len());
        let mut facing = self.heading;
        headings.push(facing);
        for (behind, ahead) in self.segments.iter().skip(1).zip(self.segments.iter()) {
            // Overlapping cells (cheat mode) keep the previous facing.
            facing = Direction::between(*behind, *ahead, board).unwrap_or(facing);
            headings.push(facing);
        }
        headings
    }
}
