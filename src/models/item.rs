use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DiceError;

/// A selectable meal component with a relative selection weight.
///
/// Zero weight means never selected, except as the documented
/// last-candidate fallback when every candidate weighs zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: String,

    pub weight: f64,

    pub in_stock: bool,
}

impl Item {
    pub fn new(name: &str, weight: f64, in_stock: bool) -> Self {
        Self {
            name: name.to_string(),
            weight,
            in_stock,
        }
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// A protein option, tagged with the cuisines it suits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProteinItem {
    pub name: String,

    pub weight: f64,

    pub in_stock: bool,

    /// Cuisines this protein is associated with. Order is user-visible.
    #[serde(default)]
    pub cuisine: Vec<String>,

    /// Whether the protein is enabled when no explicit setting exists.
    #[serde(default = "default_enabled")]
    pub enabled_by_default: bool,
}

fn default_enabled() -> bool {
    true
}

impl ProteinItem {
    pub fn new(name: &str, weight: f64, in_stock: bool) -> Self {
        Self {
            name: name.to_string(),
            weight,
            in_stock,
            cuisine: Vec::new(),
            enabled_by_default: true,
        }
    }

    pub fn with_cuisines(mut self, cuisines: &[&str]) -> Self {
        self.cuisine = cuisines.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Whether any of this protein's cuisine tags matches the given name
    /// (case-insensitive).
    pub fn has_cuisine(&self, name: &str) -> bool {
        self.cuisine.iter().any(|c| c.eq_ignore_ascii_case(name))
    }
}

/// All selectable items per category, in the shape of the persisted
/// catalog JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub main_protein: Vec<ProteinItem>,

    /// Cut lists keyed by protein name.
    pub cuts: HashMap<String, Vec<Item>>,

    pub fat_source: Vec<Item>,

    pub finisher: Vec<Item>,
}

impl Catalog {
    /// Get a protein by name (case-insensitive).
    pub fn get_protein(&self, name: &str) -> Option<&ProteinItem> {
        self.main_protein
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Get a protein mutably by name (case-insensitive).
    pub fn get_protein_mut(&mut self, name: &str) -> Option<&mut ProteinItem> {
        self.main_protein
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Cut list for a protein (case-insensitive key lookup).
    pub fn cuts_for(&self, protein: &str) -> &[Item] {
        self.cuts
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(protein))
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    /// Every cuisine tag referenced by any protein, in first-seen order,
    /// deduplicated case-insensitively.
    pub fn referenced_cuisines(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for protein in &self.main_protein {
            for tag in &protein.cuisine {
                if !seen.iter().any(|s| s.eq_ignore_ascii_case(tag)) {
                    seen.push(tag.clone());
                }
            }
        }
        seen
    }
}

/// The five meal dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    MainProtein,
    Cuts,
    FatSource,
    Finisher,
    Cuisine,
}

impl Category {
    /// Fixed resolution order: dependents roll after their dependency.
    pub const ROLL_ORDER: [Category; 5] = [
        Category::MainProtein,
        Category::Cuts,
        Category::FatSource,
        Category::Finisher,
        Category::Cuisine,
    ];

    /// Whether this category's candidate set is a function of the
    /// resolved protein.
    pub fn depends_on_protein(self) -> bool {
        matches!(self, Category::Cuts | Category::Cuisine)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::MainProtein => "mainProtein",
            Category::Cuts => "cuts",
            Category::FatSource => "fatSource",
            Category::Finisher => "finisher",
            Category::Cuisine => "cuisine",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Category {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "mainprotein" | "protein" => Ok(Category::MainProtein),
            "cuts" | "cut" => Ok(Category::Cuts),
            "fatsource" | "fat" => Ok(Category::FatSource),
            "finisher" => Ok(Category::Finisher),
            "cuisine" => Ok(Category::Cuisine),
            _ => Err(DiceError::UnknownCategory(s.to_string())),
        }
    }
}
