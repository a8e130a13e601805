pub mod coord;
pub mod planar;
pub mod sphere;
pub mod spiral;
pub mod vec;

pub use coord::*;
pub use planar::*;
pub use sphere::*;
pub use spiral::*;
pub use vec::*;
