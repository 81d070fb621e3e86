//! Unit tests for tabular-view.

mod normalize_tests;
mod perf_tests;
mod sort_tests;
