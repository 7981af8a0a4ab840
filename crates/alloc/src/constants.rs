/// Factor by which capacity grows when an array runs out of spare slots.
pub const GROWTH_FACTOR: usize = 2;
/// Smallest capacity ever allocated for a non-empty array.
pub const MIN_NON_ZERO_CAP: usize = 1;
