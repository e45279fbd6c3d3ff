mod manager;
mod store;

pub use manager::MealDataManager;
pub use store::{
    JsonFileStore, KvStore, MemoryStore, KEY_CUISINE_LIST, KEY_CUISINE_SETTINGS,
    KEY_FILTER_IN_STOCK, KEY_MEAL_DATA, KEY_PROTEIN_SETTINGS,
};
