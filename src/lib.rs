pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod roller;
pub mod state;

pub use error::{DiceError, Result};
pub use models::{Catalog, Category, Item, MealSession, ProteinItem, RollOutcome};
