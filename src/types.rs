/// Type alias for the name of an unknown or a simplification (see
/// [`Declaration`][crate::Declaration]). Always exactly one ASCII letter.
pub type Identifier = char;

/// Type alias for the coarse order of operations computed by
/// [`operator_order`][crate::expression::operator_order]
pub type Order = i32;
