pub mod math;

// Foundation crate: pure coordinate math shared by the catalog and tools.
pub use math::*;
