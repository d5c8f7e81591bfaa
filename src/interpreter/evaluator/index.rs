use std::collections::BTreeMap;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Evaluator},
        lexer::Position,
        value::{core::Value, hash_key::HashKey},
    },
    util::num::i64_to_index,
};

impl Evaluator {
    pub(in crate::interpreter::evaluator) fn eval_array(&mut self,
                                                        elements: &[Expr],
                                                        env: &Environment)
                                                        -> EvalResult<Value> {
        Ok(Value::from(self.eval_expressions(elements, env)?))
    }

    /// Evaluates a hash literal. Pairs are evaluated in source order, key
    /// before value; a later duplicate key overwrites the earlier value.
    ///
    /// # Errors
    /// `UnusableHashKey` if a key evaluates to a function, builtin, array or
    /// hash.
    pub(in crate::interpreter::evaluator) fn eval_hash(&mut self,
                                                       pairs: &[(Expr, Expr)],
                                                       env: &Environment,
                                                       position: Position)
                                                       -> EvalResult<Value> {
        let mut map = BTreeMap::new();

        for (key, value) in pairs {
            let key = self.eval_expression(key, env)?;
            let key = Self::hash_key(&key, position)?;
            let value = self.eval_expression(value, env)?;
            map.insert(key, value);
        }

        Ok(Value::from(map))
    }

    pub(in crate::interpreter::evaluator) fn eval_index(&mut self,
                                                        left: &Expr,
                                                        index: &Expr,
                                                        env: &Environment,
                                                        position: Position)
                                                        -> EvalResult<Value> {
        let left = self.eval_expression(left, env)?;
        let index = self.eval_expression(index, env)?;
        Ok(Self::index_value(&left, &index, position)?)
    }

    /// Looks up `index` in `left`.
    ///
    /// - `array[int]`: the element, or `null` when out of range (negative
    ///   indices included).
    /// - `hash[key]`: the value, or `null` when the key is missing.
    /// - `string[int]`: the character at that position as a one-character
    ///   string, or `null` when out of range.
    ///
    /// # Errors
    /// - `UnusableHashKey` when indexing a hash with a non-scalar.
    /// - `IndexNotSupported` for any other combination.
    ///
    /// # Example
    /// ```
    /// use jet::interpreter::{evaluator::core::Evaluator, lexer::Position, value::core::Value};
    ///
    /// let at = Position::default();
    /// let array = Value::from(vec![Value::Integer(10), Value::Integer(20)]);
    ///
    /// assert_eq!(Evaluator::index_value(&array, &Value::Integer(1), at), Ok(Value::Integer(20)));
    /// assert_eq!(Evaluator::index_value(&array, &Value::Integer(-1), at), Ok(Value::Null));
    /// assert_eq!(Evaluator::index_value(&Value::from("jet"), &Value::Integer(0), at),
    ///            Ok(Value::from("j")));
    /// ```
    pub fn index_value(left: &Value, index: &Value, position: Position) -> Result<Value, RuntimeError> {
        match (left, index) {
            (Value::Array(elements), Value::Integer(i)) => {
                Ok(i64_to_index(*i).and_then(|i| elements.get(i))
                                   .cloned()
                                   .unwrap_or(Value::Null))
            },
            (Value::Hash(pairs), key) => {
                let key = Self::hash_key(key, position)?;
                Ok(pairs.get(&key).cloned().unwrap_or(Value::Null))
            },
            (Value::Str(s), Value::Integer(i)) => {
                Ok(i64_to_index(*i).and_then(|i| s.chars().nth(i))
                                   .map_or(Value::Null, |c| Value::Str(c.to_string())))
            },
            _ => Err(RuntimeError::IndexNotSupported { left: left.type_name(),
                                                       index: index.type_name(),
                                                       position }),
        }
    }

    fn hash_key(value: &Value, position: Position) -> Result<HashKey, RuntimeError> {
        HashKey::from_value(value).ok_or(RuntimeError::UnusableHashKey { type_name: value.type_name(),
                                                                         position })
    }
}
