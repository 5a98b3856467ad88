pub mod attach;
pub mod camera;
pub mod constants;
pub mod counter;
pub mod geometry;
pub mod lifecycle;
pub mod lights;
pub mod orbit;
pub mod reveal;
pub mod scroll;
pub mod stars;
pub mod stl;
pub mod viewer;

pub use attach::*;
pub use camera::*;
pub use geometry::*;
pub use lifecycle::*;
pub use lights::*;
pub use orbit::*;
pub use stars::*;
pub use stl::*;
pub use viewer::*;
