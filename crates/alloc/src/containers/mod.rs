pub mod raw;
pub mod vec;
