pub mod admission;
pub mod model;
pub mod registry;

pub use admission::admit;
pub use model::{CREATOR, Property, Transaction};
pub use registry::Registry;
