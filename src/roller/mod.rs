pub mod resolver;
pub mod selector;

pub use resolver::Resolver;
pub use selector::{pick_uniform, pick_weighted, Weighted};
