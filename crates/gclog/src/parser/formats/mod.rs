/// Grammar tables, one module per collector family or line kind

pub mod header;
pub mod marker;
pub mod safepoint;
pub mod serial;
pub mod parallel;
pub mod cms;
pub mod g1;
pub mod shenandoah;
pub mod zgc;
pub mod unified;
pub mod verbose;

pub use marker::BlankLine;
