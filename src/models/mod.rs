pub mod backdrop;
pub mod current;
pub mod day_boundary;
pub mod forecast;
pub mod units;

pub use backdrop::*;
pub use current::*;
pub use day_boundary::*;
pub use forecast::*;
pub use units::*;
