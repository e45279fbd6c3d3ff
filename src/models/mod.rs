mod item;
mod session;

pub use item::{Catalog, Category, Item, ProteinItem};
pub use session::{MealSession, RollOutcome};
