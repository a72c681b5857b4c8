//! Stack safety for deep recursion.
//!
//! The parser recurses on nested parentheses and the evaluator recurses
//! through macro bodies; neither bounds its depth (macro self-recursion is a
//! documented divergence). Growing the stack on demand turns "deep input"
//! from undefined behavior into plain memory consumption.

/// Minimum stack space to keep available (64KB red zone).
const RED_ZONE: usize = 64 * 1024;

/// Stack space to allocate when growing (1MB per growth).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// If the remaining stack is below the red zone threshold, additional stack
/// is allocated before calling `f`. Wrap the recursive entry point:
///
/// ```text
/// fn eval_expr(&mut self, id: ExprId) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_expr_inner(id))
/// }
/// ```
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_recursion_does_not_overflow() {
        fn countdown(n: u32) -> u32 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { countdown(n - 1) + 1 })
        }
        assert_eq!(countdown(200_000), 200_000);
    }

    #[test]
    fn passes_return_value_through() {
        let value = ensure_sufficient_stack(|| 41 + 1);
        assert_eq!(value, 42);
    }
}
