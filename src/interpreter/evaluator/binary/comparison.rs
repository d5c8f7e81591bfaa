use crate::{ast::InfixOperator, interpreter::evaluator::core::Evaluator};

impl Evaluator {
    /// Applies a comparison operator to two operands of the same type.
    ///
    /// Integers, floats and strings all compare through this helper, so the
    /// six comparison operators behave the same way for every ordered type.
    /// Floats follow IEEE semantics: every ordering against `NaN` is false.
    ///
    /// # Returns
    /// `Some(result)` for `<`, `>`, `<=`, `>=`, `==` and `!=`, or `None` if
    /// `op` is not a comparison.
    ///
    /// # Example
    /// ```
    /// use jet::{ast::InfixOperator, interpreter::evaluator::core::Evaluator};
    ///
    /// assert_eq!(Evaluator::compare(InfixOperator::Less, &1, &2), Some(true));
    /// assert_eq!(Evaluator::compare(InfixOperator::GreaterEqual, "a", "b"), Some(false));
    /// assert_eq!(Evaluator::compare(InfixOperator::Add, &1, &2), None);
    /// ```
    pub fn compare<T>(op: InfixOperator, left: &T, right: &T) -> Option<bool>
        where T: PartialOrd + ?Sized
    {
        if !op.is_comparison() {
            return None;
        }

        Some(match op {
                 InfixOperator::Less => left < right,
                 InfixOperator::Greater => left > right,
                 InfixOperator::LessEqual => left <= right,
                 InfixOperator::GreaterEqual => left >= right,
                 InfixOperator::Equal => left == right,
                 _ => left != right,
             })
    }
}
