pub mod dataset;
pub mod descriptor;
pub mod label;
pub mod merge;
pub mod operations;

pub use dataset::*;
pub use descriptor::*;
pub use label::*;
pub use merge::*;
pub use operations::*;
