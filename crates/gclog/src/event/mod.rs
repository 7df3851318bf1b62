/// Normalized GC events and the builder that produces them

pub mod builder;
pub mod model;
pub mod render;

pub use builder::{build_event, EventBuilder};
pub use model::{CpuTimes, Event, MemoryRegion, Trigger};
pub use render::render;
