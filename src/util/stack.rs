//! Grows the native stack on demand while recursing through nested source.
//!
//! Both the parser and the evaluator recurse once per nesting level of the
//! input. Wrapping those recursion points in [`ensure_sufficient_stack`] keeps
//! deeply nested programs from overflowing the thread stack; the evaluator's
//! own call-depth limit then decides when a program has recursed too far.

/// Minimum stack space to keep available before recursing further (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate each time the stack is grown (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, first allocating a new stack segment if the remaining stack is
/// below the red zone.
///
/// ## Example
/// ```
/// use jet::util::stack::ensure_sufficient_stack;
///
/// fn depth(n: u32) -> u32 {
///     ensure_sufficient_stack(|| if n == 0 { 0 } else { 1 + depth(n - 1) })
/// }
///
/// assert_eq!(depth(50_000), 50_000);
/// ```
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
