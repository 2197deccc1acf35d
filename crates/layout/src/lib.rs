//! Pure layout engines for trace visualization.
//!
//! Every entry point takes an immutable span snapshot and returns a freshly
//! computed layout; nothing is cached between calls and identical input
//! always yields identical output. Malformed spans are dropped individually,
//! cycles are broken at the second visit, and empty input produces empty
//! (renderable) output rather than an error.

pub mod classify;
pub mod flame;
pub mod graph;
pub mod summary;
pub mod tree;
pub mod waterfall;

pub use classify::{DurationBucket, classify_duration, classify_duration_with, duration_ratio};
pub use flame::{FlameBlock, FlameLayout, build_flame_layout, build_flame_timeline};
pub use graph::{DependencyGraph, GraphEdge, GraphNode, build_dependency_graph};
pub use summary::{TraceSummary, summarize_trace};
pub use tree::SpanTree;
pub use waterfall::{WaterfallRow, build_waterfall_layout};
