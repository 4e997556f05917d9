pub mod aggregators;
pub mod sampling;
pub mod statistical;

pub use aggregators::*;
pub use sampling::*;
pub use statistical::*;
