/// Sequence number of a handled map event.
///
/// Every event gets the next frame. Work derived from an event carries its
/// frame, so results from an older event can be recognized and dropped once a
/// newer one has been applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Frame {
    /// 0-based index.
    pub index: u64,
}

impl Frame {
    pub fn new(index: u64) -> Self {
        Self { index }
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1)
    }

    pub fn is_newer_than(self, other: Frame) -> bool {
        self.index > other.index
    }
}
