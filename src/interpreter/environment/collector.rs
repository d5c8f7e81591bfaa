use std::{collections::HashMap, mem, rc::Rc};

use crate::{
    interpreter::{
        environment::{Environment, WeakEnvironment},
        value::core::Value,
    },
    util::stack::ensure_sufficient_stack,
};

/// Tracked scopes needed before the first collection.
const MIN_THRESHOLD: usize = 1024;

/// Tracks the scopes created by calls and blocks and frees the ones that
/// nothing outside a reference cycle can reach.
///
/// ## Algorithm
///
/// [`ScopeCollector::collect`] counts, for every tracked scope, the handles
/// that come from other tracked scopes: their `outer` links and the closures
/// and collections in their bindings. A scope with more strong handles than
/// that is held from outside, by the root environment, a running call or a
/// value the caller kept. Everything reachable from such a scope survives.
/// The bindings of the remaining scopes are cleared, which breaks their
/// cycles and lets reference counting free them.
///
/// Scopes that were never tracked, like the root environment, are never
/// cleared and always count as held from outside.
#[derive(Debug)]
pub struct ScopeCollector {
    scopes:    Vec<WeakEnvironment>,
    threshold: usize,
}

impl Default for ScopeCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeCollector {
    #[must_use]
    pub const fn new() -> Self {
        Self { scopes:    Vec::new(),
               threshold: MIN_THRESHOLD, }
    }

    /// Registers a scope for future collections. The collector does not keep
    /// it alive.
    pub fn track(&mut self, scope: &Environment) {
        self.scopes.push(scope.downgrade());
    }

    /// Returns `true` once enough scopes were tracked since the last
    /// collection to make another one worthwhile.
    #[must_use]
    pub fn should_collect(&self) -> bool {
        self.scopes.len() >= self.threshold
    }

    /// The number of tracked scopes that are still alive.
    #[must_use]
    pub fn live(&self) -> usize {
        self.scopes.iter().filter(|scope| scope.is_alive()).count()
    }

    /// Clears every tracked scope that is only reachable through reference
    /// cycles.
    ///
    /// # Returns
    /// The number of scopes released.
    ///
    /// # Example
    /// ```
    /// use jet::{
    ///     interpreter::{
    ///         environment::{Environment, collector::ScopeCollector},
    ///         evaluator::core::Evaluator,
    ///     },
    ///     lex, parse,
    /// };
    ///
    /// let mut collector = ScopeCollector::new();
    /// let scope = Environment::enclosed(&Environment::new());
    /// collector.track(&scope);
    ///
    /// // `f` captures the scope it is bound in.
    /// let (program, _) = parse(lex("let f = fn() { 1 };"));
    /// Evaluator::new().eval_program(&program, &scope).unwrap();
    /// let weak = scope.downgrade();
    /// drop(scope);
    ///
    /// assert!(weak.is_alive());
    /// assert_eq!(collector.collect(), 1);
    /// assert!(!weak.is_alive());
    /// ```
    pub fn collect(&mut self) -> usize {
        let live: Vec<Environment> = self.scopes
                                         .iter()
                                         .filter_map(WeakEnvironment::upgrade)
                                         .collect();

        let mut graph = Graph::default();
        for scope in &live {
            // The handle in `live` is ours, not a reference from outside.
            graph.insert(scope.address(), scope.strong_count() - 1);
        }
        for (id, scope) in live.iter().enumerate() {
            let inner = scope.0.borrow();
            if let Some(outer) = &inner.outer {
                let to = graph.scope(outer);
                graph.edge(id, to);
            }
            for value in inner.bindings.values() {
                graph.visit(id, value);
            }
        }

        let reachable = graph.mark();
        let mut trash = Vec::new();
        for (scope, _) in live.iter().zip(&reachable).filter(|(_, reachable)| !**reachable) {
            let mut inner = scope.0.borrow_mut();
            trash.push((mem::take(&mut inner.bindings), inner.outer.take()));
        }
        let released = trash.len();
        // Dropping the bindings may drop other scopes; no borrow is held here.
        drop(trash);

        self.scopes = live.iter()
                          .zip(&reachable)
                          .filter(|(_, reachable)| **reachable)
                          .map(|(scope, _)| scope.downgrade())
                          .collect();
        self.threshold = MIN_THRESHOLD.max(2 * self.scopes.len());

        released
    }
}

impl Environment {
    fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    fn strong_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

/// A reference graph over scopes and the shared collections between them.
#[derive(Default)]
struct Graph {
    ids:   HashMap<usize, usize>,
    nodes: Vec<Node>,
}

struct Node {
    /// Strong handles to the allocation, excluding the collector's own.
    strong:   usize,
    /// Handles to the allocation found while scanning tracked scopes.
    internal: usize,
    edges:    Vec<usize>,
}

impl Graph {
    /// Returns the node for `address`, and whether it was just created.
    fn insert(&mut self, address: usize, strong: usize) -> (usize, bool) {
        if let Some(&id) = self.ids.get(&address) {
            return (id, false);
        }
        let id = self.nodes.len();
        self.nodes.push(Node { strong,
                               internal: 0,
                               edges: Vec::new() });
        self.ids.insert(address, id);
        (id, true)
    }

    fn scope(&mut self, scope: &Environment) -> usize {
        self.insert(scope.address(), scope.strong_count()).0
    }

    fn edge(&mut self, from: usize, to: usize) {
        self.nodes[from].edges.push(to);
        self.nodes[to].internal += 1;
    }

    /// Adds the handles held by `value` to the edges of `from`. Collections
    /// are shared, so each one becomes its own node and is scanned once.
    fn visit(&mut self, from: usize, value: &Value) {
        ensure_sufficient_stack(|| match value {
            Value::Function(function) => {
                let to = self.scope(&function.env);
                self.edge(from, to);
            },
            Value::Array(elements) => {
                let (to, fresh) = self.insert(Rc::as_ptr(elements) as usize,
                                              Rc::strong_count(elements));
                self.edge(from, to);
                if fresh {
                    for element in elements.iter() {
                        self.visit(to, element);
                    }
                }
            },
            Value::Hash(pairs) => {
                let (to, fresh) = self.insert(Rc::as_ptr(pairs) as usize,
                                              Rc::strong_count(pairs));
                self.edge(from, to);
                if fresh {
                    for value in pairs.values() {
                        self.visit(to, value);
                    }
                }
            },
            _ => {},
        });
    }

    /// Marks every node reachable from one held from outside the graph.
    fn mark(&self) -> Vec<bool> {
        let mut reachable = vec![false; self.nodes.len()];
        let mut pending: Vec<usize> = (0..self.nodes.len()).filter(|&id| {
                                                               let node = &self.nodes[id];
                                                               node.strong > node.internal
                                                           })
                                                           .collect();
        while let Some(id) = pending.pop() {
            if mem::replace(&mut reachable[id], true) {
                continue;
            }
            pending.extend(&self.nodes[id].edges);
        }
        reachable
    }
}
