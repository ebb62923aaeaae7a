//! Saturating confirmation counter.

/// Counts sensor polls that argue for flipping the output.
///
/// Bounded to `[0, depth]`. Evidence for a flip pushes it up, evidence against
/// pulls it back toward zero, and it saturates at both ends instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HysteresisCounter {
    count: u8,
    depth: u8,
}

impl HysteresisCounter {
    /// Creates an empty counter that fills after `depth` confirmations.
    pub const fn new(depth: u8) -> Self {
        Self { count: 0, depth }
    }

    /// Records one poll in favour of flipping. Returns true once the counter is full.
    #[inline]
    pub fn confirm(&mut self) -> bool {
        if self.count < self.depth {
            self.count += 1;
        }
        self.is_full()
    }

    /// Records one poll against flipping.
    #[inline]
    pub fn retreat(&mut self) {
        self.count = self.count.saturating_sub(1);
    }

    /// Empties the counter.
    #[inline]
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Returns true once `depth` confirmations have accumulated.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count >= self.depth
    }

    /// Current count.
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Number of confirmations needed to fill the counter.
    pub fn depth(&self) -> u8 {
        self.depth
    }
}
