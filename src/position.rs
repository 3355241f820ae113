use std::fmt::Debug;

/// A Positioned has a position in the genome. It is a bed-like (half-open) interval.
pub trait Positioned: Debug {
    fn chrom(&self) -> &str;

    /// 0-based start position.
    fn start(&self) -> u64;

    /// non-inclusive end.
    fn stop(&self) -> u64;

    /// length of the interval in bases.
    #[inline]
    fn len(&self) -> u64 {
        self.stop().saturating_sub(self.start())
    }

    /// half-open overlap on the same chromosome: `start_a < end_b && start_b < end_a`.
    #[inline]
    fn overlaps(&self, other: &dyn Positioned) -> bool {
        self.chrom() == other.chrom()
            && self.start() < other.stop()
            && other.start() < self.stop()
    }
}
