//! Position of the triage session within the catalog.

/// Where the next forward scan starts, and which entry (if any) is
/// currently on screen waiting for a decision.
///
/// `next == 0` with nothing presented is "before start"; `next >= len` is
/// "past end".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    next: usize,
    presented: Option<usize>,
}

impl Cursor {
    /// Cursor positioned just before `first_unresolved`, or past the end of a
    /// catalog of `len` entries when nothing is left to decide.
    pub fn rewound(first_unresolved: Option<usize>, len: usize) -> Self {
        Self {
            next: first_unresolved.unwrap_or(len),
            presented: None,
        }
    }

    /// The entry waiting for a decision
    pub fn presented(&self) -> Option<usize> {
        self.presented
    }

    /// Take the next index to examine, if any
    pub fn advance(&mut self, len: usize) -> Option<usize> {
        if self.next < len {
            let index = self.next;
            self.next += 1;
            Some(index)
        } else {
            None
        }
    }

    pub fn present(&mut self, index: usize) {
        self.presented = Some(index);
        self.next = index + 1;
    }

    /// The presented entry was decided
    pub fn release(&mut self) {
        self.presented = None;
    }

    pub fn is_exhausted(&self, len: usize) -> bool {
        self.presented.is_none() && self.next >= len
    }
}
