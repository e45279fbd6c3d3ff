use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{DiceError, Result};
use crate::models::{Catalog, Category, Item, ProteinItem};
use crate::state::store::{
    KvStore, KEY_CUISINE_LIST, KEY_CUISINE_SETTINGS, KEY_FILTER_IN_STOCK, KEY_MEAL_DATA,
    KEY_PROTEIN_SETTINGS,
};

/// Shared catalog/settings context.
///
/// Constructed once at startup from the persistence boundary and passed
/// by reference to the resolver and the interface; written back only on
/// explicit save actions. Settings maps are keyed by lowercase name.
pub struct MealDataManager {
    catalog: Catalog,
    filter_in_stock: bool,
    protein_settings: HashMap<String, bool>,
    cuisine_settings: HashMap<String, bool>,
    cuisine_list: Vec<String>,
}

fn lowercase_keys(map: HashMap<String, bool>) -> HashMap<String, bool> {
    map.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect()
}

impl MealDataManager {
    /// Fresh context with default settings: filter off, no explicit
    /// enablement overrides, cuisine list derived from the catalog.
    pub fn new(catalog: Catalog) -> Self {
        let cuisine_list = catalog.referenced_cuisines();
        Self {
            catalog,
            filter_in_stock: false,
            protein_settings: HashMap::new(),
            cuisine_settings: HashMap::new(),
            cuisine_list,
        }
    }

    /// Load the context from a store, seeding the catalog from the
    /// static JSON resource on first run. The store takes precedence on
    /// every later run.
    pub fn load<S: KvStore>(store: &mut S, catalog_path: &Path) -> Result<Self> {
        let catalog: Catalog = match store.get_json(KEY_MEAL_DATA)? {
            Some(catalog) => catalog,
            None => {
                let content = fs::read_to_string(catalog_path)?;
                let catalog: Catalog = serde_json::from_str(&content)?;
                store.set_json(KEY_MEAL_DATA, &catalog)?;
                catalog
            }
        };

        let filter_in_stock = store.get_json(KEY_FILTER_IN_STOCK)?.unwrap_or(false);
        let protein_settings = store
            .get_json(KEY_PROTEIN_SETTINGS)?
            .map(lowercase_keys)
            .unwrap_or_default();
        let cuisine_settings = store
            .get_json(KEY_CUISINE_SETTINGS)?
            .map(lowercase_keys)
            .unwrap_or_default();
        let cuisine_list = match store.get_json(KEY_CUISINE_LIST)? {
            Some(list) => list,
            None => catalog.referenced_cuisines(),
        };

        Ok(Self {
            catalog,
            filter_in_stock,
            protein_settings,
            cuisine_settings,
            cuisine_list,
        })
    }

    /// Write every key back to the store wholesale.
    pub fn save<S: KvStore>(&self, store: &mut S) -> Result<()> {
        store.set_json(KEY_MEAL_DATA, &self.catalog)?;
        store.set_json(KEY_FILTER_IN_STOCK, &self.filter_in_stock)?;
        store.set_json(KEY_PROTEIN_SETTINGS, &self.protein_settings)?;
        store.set_json(KEY_CUISINE_SETTINGS, &self.cuisine_settings)?;
        store.set_json(KEY_CUISINE_LIST, &self.cuisine_list)?;
        Ok(())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
    }

    pub fn filter_in_stock(&self) -> bool {
        self.filter_in_stock
    }

    pub fn set_filter_in_stock(&mut self, on: bool) {
        self.filter_in_stock = on;
    }

    /// Flip the global in-stock filter; returns the new value.
    pub fn toggle_filter_in_stock(&mut self) -> bool {
        self.filter_in_stock = !self.filter_in_stock;
        self.filter_in_stock
    }

    /// Whether a protein is enabled: explicit setting if present,
    /// otherwise the protein's own default.
    pub fn protein_enabled(&self, protein: &ProteinItem) -> bool {
        self.protein_settings
            .get(&protein.key())
            .copied()
            .unwrap_or(protein.enabled_by_default)
    }

    pub fn set_protein_enabled(&mut self, name: &str, enabled: bool) {
        self.protein_settings.insert(name.to_lowercase(), enabled);
    }

    /// Flip a protein's enablement; returns the new value.
    pub fn toggle_protein(&mut self, name: &str) -> Result<bool> {
        let current = self
            .catalog
            .get_protein(name)
            .map(|p| self.protein_enabled(p))
            .ok_or_else(|| DiceError::ProteinNotFound(name.to_string()))?;
        self.set_protein_enabled(name, !current);
        Ok(!current)
    }

    /// Whether a cuisine is enabled: explicit setting if present,
    /// otherwise enabled.
    pub fn cuisine_enabled(&self, name: &str) -> bool {
        self.cuisine_settings
            .get(&name.to_lowercase())
            .copied()
            .unwrap_or(true)
    }

    pub fn set_cuisine_enabled(&mut self, name: &str, enabled: bool) {
        self.cuisine_settings.insert(name.to_lowercase(), enabled);
    }

    /// Flip a cuisine's enablement; returns the new value.
    pub fn toggle_cuisine(&mut self, name: &str) -> Result<bool> {
        if !self.cuisine_list.iter().any(|c| c.eq_ignore_ascii_case(name)) {
            return Err(DiceError::InvalidInput(format!("unknown cuisine: {}", name)));
        }
        let next = !self.cuisine_enabled(name);
        self.set_cuisine_enabled(name, next);
        Ok(next)
    }

    pub fn cuisine_list(&self) -> &[String] {
        &self.cuisine_list
    }

    /// The currently enabled cuisines, in list order.
    pub fn enabled_cuisines(&self) -> Vec<String> {
        self.cuisine_list
            .iter()
            .filter(|c| self.cuisine_enabled(c))
            .cloned()
            .collect()
    }

    /// Add an item to a category. `protein` names the sub-list for the
    /// cuts category and is ignored elsewhere.
    pub fn add_item(&mut self, category: Category, item: Item, protein: Option<&str>) -> Result<()> {
        if item.name.trim().is_empty() {
            return Err(DiceError::InvalidInput("item name must not be empty".to_string()));
        }
        if item.weight < 0.0 {
            return Err(DiceError::InvalidInput("weight must not be negative".to_string()));
        }

        match category {
            Category::FatSource => self.catalog.fat_source.push(item),
            Category::Finisher => self.catalog.finisher.push(item),
            Category::MainProtein => {
                let protein_item = ProteinItem::new(&item.name, item.weight, item.in_stock);
                self.catalog.main_protein.push(protein_item);
            }
            Category::Cuts => {
                let protein = protein.ok_or_else(|| {
                    DiceError::InvalidInput("cuts require a protein name".to_string())
                })?;
                let key = self
                    .catalog
                    .get_protein(protein)
                    .map(|p| p.name.clone())
                    .ok_or_else(|| DiceError::ProteinNotFound(protein.to_string()))?;
                self.catalog.cuts.entry(key).or_default().push(item);
            }
            Category::Cuisine => {
                return Err(DiceError::InvalidInput(
                    "cuisines are added with add-cuisine".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Add a new cuisine and tag the associated proteins with it.
    ///
    /// All validation runs before any mutation, so a failure leaves the
    /// catalog untouched.
    pub fn add_cuisine(&mut self, name: &str, proteins: &[String]) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DiceError::InvalidInput("cuisine name must not be empty".to_string()));
        }
        if self.cuisine_list.iter().any(|c| c.eq_ignore_ascii_case(name)) {
            return Err(DiceError::DuplicateCuisine(name.to_string()));
        }
        if proteins.is_empty() {
            return Err(DiceError::InvalidInput(
                "a cuisine needs at least one associated protein".to_string(),
            ));
        }
        for protein in proteins {
            if self.catalog.get_protein(protein).is_none() {
                return Err(DiceError::ProteinNotFound(protein.clone()));
            }
        }

        for protein in proteins {
            let entry = self.catalog.get_protein_mut(protein).unwrap();
            if !entry.has_cuisine(name) {
                entry.cuisine.push(name.to_string());
            }
        }
        self.cuisine_list.push(name.to_string());
        Ok(())
    }
}
