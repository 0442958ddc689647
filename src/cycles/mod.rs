pub mod detector;
pub mod pools;
pub mod weeks;

pub use detector::CycleDetector;
pub use pools::{build_pools, retain_long_cycles, SamplingPools};
pub use weeks::organize_all;
