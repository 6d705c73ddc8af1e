//! Stack safety for deep recursion.
//!
//! The dispatcher recurses once per AST node, so a deeply nested source
//! expression (or deep interpreted recursion) can exhaust the native
//! stack. `stacker` grows it on demand instead.

/// Ensure sufficient stack space is available before executing `f`.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (100KB red zone).
    const RED_ZONE: usize = 100 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
