/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss. Integer-to-float
/// promotion in the evaluator goes through these helpers so that a value that
/// cannot be represented exactly is reported instead of rounded.
pub mod num;
/// Stack growth for deeply recursive parsing and evaluation.
pub mod stack;
