//! Input validation and normalization.

pub mod numeric;

pub use numeric::{optional_decimal, optional_int, NumericInput};
