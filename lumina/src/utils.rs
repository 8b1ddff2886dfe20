mod axis;
mod bounding_box;
mod metrics;
mod triangle_ext;

pub use self::axis::*;
pub use self::bounding_box::*;
pub use self::metrics::*;
pub use self::triangle_ext::*;
