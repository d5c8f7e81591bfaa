use std::{
    cell::RefCell,
    collections::HashMap,
    fmt,
    rc::{Rc, Weak},
};

use crate::interpreter::value::core::Value;

/// Reclaims scopes that only reference cycles keep alive.
///
/// A closure bound in the scope it captured holds that scope through its own
/// binding, so reference counting alone never frees it. The collector finds
/// and clears such scopes.
pub mod collector;

/// A shared handle to a scope in the environment chain.
///
/// Cloning an `Environment` clones the handle, not the bindings: every clone
/// observes and mutates the same scope. A scope stays alive as long as any
/// handle to it exists, whether held by a running call, a nested scope, or a
/// function value that captured it.
#[derive(Clone, Default)]
pub struct Environment(Rc<RefCell<Scope>>);

/// A non-owning handle to a scope. It does not keep the scope alive.
#[derive(Clone, Debug)]
pub struct WeakEnvironment(Weak<RefCell<Scope>>);

#[derive(Default)]
struct Scope {
    bindings: HashMap<String, Value>,
    outer:    Option<Environment>,
}

impl Environment {
    /// Creates a root environment with no bindings and no enclosing scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty scope enclosed by `outer`.
    ///
    /// # Example
    /// ```
    /// use jet::interpreter::{environment::Environment, value::core::Value};
    ///
    /// let global = Environment::new();
    /// global.define("x", Value::Integer(1));
    ///
    /// let local = Environment::enclosed(&global);
    /// local.define("x", Value::Integer(2));
    ///
    /// assert_eq!(local.get("x"), Some(Value::Integer(2)));
    /// assert_eq!(global.get("x"), Some(Value::Integer(1)));
    /// ```
    #[must_use]
    pub fn enclosed(outer: &Self) -> Self {
        Self(Rc::new(RefCell::new(Scope { bindings: HashMap::new(),
                                          outer:    Some(outer.clone()), })))
    }

    /// Looks `name` up, walking outward through the enclosing scopes.
    ///
    /// # Returns
    /// A copy of the nearest binding, or `None` if no scope in the chain
    /// binds `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        let mut scope = self.clone();
        loop {
            let outer = {
                let inner = scope.0.borrow();
                if let Some(value) = inner.bindings.get(name) {
                    return Some(value.clone());
                }
                inner.outer.clone()
            };
            scope = outer?;
        }
    }

    /// Binds `name` in this scope, shadowing any binding in enclosing scopes
    /// and replacing an existing binding in this one.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().bindings.insert(name.into(), value);
    }

    /// Updates the nearest existing binding of `name`.
    ///
    /// # Returns
    /// `true` if a binding was found and updated, `false` if no scope in the
    /// chain binds `name`. Nothing is created in that case.
    ///
    /// # Example
    /// ```
    /// use jet::interpreter::{environment::Environment, value::core::Value};
    ///
    /// let global = Environment::new();
    /// global.define("count", Value::Integer(0));
    ///
    /// let local = Environment::enclosed(&global);
    /// assert!(local.assign("count", Value::Integer(1)));
    /// assert!(!local.assign("missing", Value::Null));
    ///
    /// assert_eq!(global.get("count"), Some(Value::Integer(1)));
    /// ```
    pub fn assign(&self, name: &str, value: Value) -> bool {
        let mut scope = self.clone();
        loop {
            let outer = {
                let mut inner = scope.0.borrow_mut();
                if let Some(slot) = inner.bindings.get_mut(name) {
                    *slot = value;
                    return true;
                }
                inner.outer.clone()
            };
            match outer {
                Some(outer) => scope = outer,
                None => return false,
            }
        }
    }

    /// Creates a handle that observes this scope without keeping it alive.
    ///
    /// # Example
    /// ```
    /// use jet::interpreter::environment::Environment;
    ///
    /// let scope = Environment::new();
    /// let weak = scope.downgrade();
    /// assert!(weak.is_alive());
    ///
    /// drop(scope);
    /// assert!(weak.upgrade().is_none());
    /// ```
    #[must_use]
    pub fn downgrade(&self) -> WeakEnvironment {
        WeakEnvironment(Rc::downgrade(&self.0))
    }

    /// Returns `true` if both handles refer to the same scope.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// The number of scopes from this one to the root, inclusive.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut outer = self.0.borrow().outer.clone();
        while let Some(scope) = outer {
            depth += 1;
            outer = scope.0.borrow().outer.clone();
        }
        depth
    }
}

impl WeakEnvironment {
    /// Returns a strong handle if the scope is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Environment> {
        self.0.upgrade().map(Environment)
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

// Scopes can be reachable from the functions they bind, so the debug output
// lists names only and never recurses into values.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.0.borrow();
        let mut names: Vec<&String> = scope.bindings.keys().collect();
        names.sort();
        f.debug_struct("Environment")
         .field("names", &names)
         .field("depth", &self.depth())
         .finish()
    }
}
