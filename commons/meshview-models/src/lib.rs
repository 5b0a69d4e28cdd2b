pub mod namespace;
pub mod validation;

pub use namespace::*;
pub use validation::*;
