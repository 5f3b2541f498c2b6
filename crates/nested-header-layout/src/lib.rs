//! Layout contracts for Nested Header

mod constraints;
mod measurable;

pub use constraints::*;
pub use measurable::*;

pub mod prelude {
    pub use crate::constraints::Constraints;
    pub use crate::measurable::Measurable;
}
