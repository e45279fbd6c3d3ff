use rand::Rng;

use crate::models::{Category, Item, RollOutcome};
use crate::roller::selector::{pick_uniform, pick_weighted};
use crate::state::MealDataManager;

/// Computes eligible candidate sets per category and delegates the draw
/// to the weighted selector.
///
/// Borrows the shared catalog/settings context; holds no state of its
/// own, so every roll reflects the settings at call time.
pub struct Resolver<'a> {
    data: &'a MealDataManager,
}

impl<'a> Resolver<'a> {
    pub fn new(data: &'a MealDataManager) -> Self {
        Self { data }
    }

    /// Apply the global in-stock filter to a flat item list.
    fn filter_stock<'b>(&self, items: &'b [Item]) -> Vec<&'b Item> {
        if self.data.filter_in_stock() {
            items.iter().filter(|i| i.in_stock).collect()
        } else {
            items.iter().collect()
        }
    }

    /// Roll the protein category.
    ///
    /// Enablement and cuisine filters run before any randomness: an
    /// empty set after those yields `NoProteinsMatch` without consulting
    /// the rng. The in-stock filter applies afterwards and maps to the
    /// ordinary `NoCandidates` outcome, matching the flat categories.
    pub fn roll_main_protein<R: Rng + ?Sized>(&self, rng: &mut R) -> RollOutcome {
        let catalog = self.data.catalog();
        let enabled_cuisines = self.data.enabled_cuisines();

        let eligible: Vec<_> = catalog
            .main_protein
            .iter()
            .filter(|p| self.data.protein_enabled(p))
            .filter(|p| {
                enabled_cuisines.is_empty()
                    || p.cuisine
                        .iter()
                        .any(|tag| enabled_cuisines.iter().any(|e| e.eq_ignore_ascii_case(tag)))
            })
            .collect();

        if eligible.is_empty() {
            return RollOutcome::NoProteinsMatch;
        }

        let candidates: Vec<_> = if self.data.filter_in_stock() {
            eligible.into_iter().filter(|p| p.in_stock).collect()
        } else {
            eligible
        };

        match pick_weighted(&candidates, rng) {
            Some(protein) => RollOutcome::Picked(protein.name.clone()),
            None => RollOutcome::NoCandidates,
        }
    }

    /// Roll a cut for the already-resolved protein.
    pub fn roll_cuts<R: Rng + ?Sized>(&self, protein: &str, rng: &mut R) -> RollOutcome {
        let cuts = self.data.catalog().cuts_for(protein);
        let candidates = self.filter_stock(cuts);

        match pick_weighted(&candidates, rng) {
            Some(cut) => RollOutcome::Picked(cut.name.clone()),
            None => RollOutcome::NoCandidates,
        }
    }

    /// Roll a cuisine from the resolved protein's tag list.
    ///
    /// Tags carry no weights and are not stock-filtered; the pick is
    /// uniform.
    pub fn roll_cuisine<R: Rng + ?Sized>(&self, protein: &str, rng: &mut R) -> RollOutcome {
        let tags = match self.data.catalog().get_protein(protein) {
            Some(p) => &p.cuisine,
            None => return RollOutcome::NoCandidates,
        };

        match pick_uniform(tags, rng) {
            Some(tag) => RollOutcome::Picked(tag.clone()),
            None => RollOutcome::NoCandidates,
        }
    }

    /// Roll an independent flat category (fat source or finisher).
    pub fn roll_flat<R: Rng + ?Sized>(&self, category: Category, rng: &mut R) -> RollOutcome {
        let catalog = self.data.catalog();
        let items = match category {
            Category::FatSource => &catalog.fat_source,
            Category::Finisher => &catalog.finisher,
            // Dependent categories have dedicated entry points.
            _ => return RollOutcome::NoCandidates,
        };

        let candidates = self.filter_stock(items);
        match pick_weighted(&candidates, rng) {
            Some(item) => RollOutcome::Picked(item.name.clone()),
            None => RollOutcome::NoCandidates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::models::{Catalog, ProteinItem};

    /// Rng that panics on use, to prove a path never consults the
    /// random source.
    struct PanicRng;

    impl rand::RngCore for PanicRng {
        fn next_u32(&mut self) -> u32 {
            panic!("random source must not be consulted");
        }

        fn next_u64(&mut self) -> u64 {
            panic!("random source must not be consulted");
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            panic!("random source must not be consulted");
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            panic!("random source must not be consulted");
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog {
            main_protein: vec![
                ProteinItem::new("Beef", 5.0, true).with_cuisines(&["American", "Mexican"]),
                ProteinItem {
                    enabled_by_default: false,
                    ..ProteinItem::new("Pork", 3.0, true).with_cuisines(&["American"])
                },
            ],
            cuts: HashMap::from([(
                "Beef".to_string(),
                vec![
                    Item::new("Ribeye", 3.0, true),
                    Item::new("Brisket", 2.0, false),
                ],
            )]),
            fat_source: vec![
                Item::new("Tallow", 3.0, true),
                Item::new("Butter", 1.0, false),
            ],
            finisher: vec![Item::new("Sear", 1.0, true)],
        }
    }

    fn manager() -> MealDataManager {
        MealDataManager::new(sample_catalog())
    }

    #[test]
    fn test_enabled_by_default_fallback() {
        // Pork is disabled by default and has no explicit setting, so
        // Beef is the only candidate.
        let data = manager();
        let resolver = Resolver::new(&data);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..50 {
            let outcome = resolver.roll_main_protein(&mut rng);
            assert_eq!(outcome, RollOutcome::Picked("Beef".to_string()));
        }
    }

    #[test]
    fn test_explicit_setting_overrides_default() {
        let mut data = manager();
        data.set_protein_enabled("Pork", true);
        data.set_protein_enabled("Beef", false);
        let resolver = Resolver::new(&data);
        let mut rng = StdRng::seed_from_u64(2);

        let outcome = resolver.roll_main_protein(&mut rng);
        assert_eq!(outcome, RollOutcome::Picked("Pork".to_string()));
    }

    #[test]
    fn test_no_proteins_match_skips_rng() {
        let mut data = manager();
        data.set_protein_enabled("Beef", false);
        let resolver = Resolver::new(&data);

        let outcome = resolver.roll_main_protein(&mut PanicRng);
        assert_eq!(outcome, RollOutcome::NoProteinsMatch);
    }

    #[test]
    fn test_cuisine_filter_excludes_nonmatching_proteins() {
        let mut data = manager();
        data.set_protein_enabled("Pork", true);
        // Only Mexican enabled; Pork is American-only.
        data.set_cuisine_enabled("American", false);
        let resolver = Resolver::new(&data);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..50 {
            let outcome = resolver.roll_main_protein(&mut rng);
            assert_eq!(outcome, RollOutcome::Picked("Beef".to_string()));
        }
    }

    #[test]
    fn test_all_cuisines_disabled_disables_cuisine_filter() {
        let mut data = manager();
        data.set_cuisine_enabled("American", false);
        data.set_cuisine_enabled("Mexican", false);
        let resolver = Resolver::new(&data);
        let mut rng = StdRng::seed_from_u64(4);

        // Beef still rolls: with no cuisine enabled, no cuisine
        // filtering is applied at all.
        let outcome = resolver.roll_main_protein(&mut rng);
        assert_eq!(outcome, RollOutcome::Picked("Beef".to_string()));
    }

    #[test]
    fn test_in_stock_filter_on_flat_category() {
        let mut data = manager();
        data.set_filter_in_stock(true);
        let resolver = Resolver::new(&data);
        let mut rng = StdRng::seed_from_u64(5);

        // Butter is out of stock, so the roll must only ever hit Tallow.
        for _ in 0..100 {
            let outcome = resolver.roll_flat(Category::FatSource, &mut rng);
            assert_eq!(outcome, RollOutcome::Picked("Tallow".to_string()));
        }
    }

    #[test]
    fn test_in_stock_filter_empties_set_without_fallback() {
        let mut catalog = sample_catalog();
        catalog.fat_source = vec![Item::new("Butter", 1.0, false)];
        let mut data = MealDataManager::new(catalog);
        data.set_filter_in_stock(true);
        let resolver = Resolver::new(&data);
        let mut rng = StdRng::seed_from_u64(6);

        let outcome = resolver.roll_flat(Category::FatSource, &mut rng);
        assert_eq!(outcome, RollOutcome::NoCandidates);
    }

    #[test]
    fn test_cuts_for_unknown_protein() {
        let data = manager();
        let resolver = Resolver::new(&data);
        let mut rng = StdRng::seed_from_u64(7);

        let outcome = resolver.roll_cuts("Venison", &mut rng);
        assert_eq!(outcome, RollOutcome::NoCandidates);
    }

    #[test]
    fn test_cuisine_uniform_over_tags() {
        let data = manager();
        let resolver = Resolver::new(&data);
        let mut rng = StdRng::seed_from_u64(8);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            match resolver.roll_cuisine("Beef", &mut rng) {
                RollOutcome::Picked(tag) => {
                    seen.insert(tag);
                }
                other => panic!("unexpected outcome: {:?}", other),
            }
        }
        assert!(seen.contains("American"));
        assert!(seen.contains("Mexican"));
    }

    #[test]
    fn test_cuisine_without_tags() {
        let mut catalog = sample_catalog();
        catalog.get_protein_mut("Beef").unwrap().cuisine.clear();
        let data = MealDataManager::new(catalog);
        let resolver = Resolver::new(&data);

        let outcome = resolver.roll_cuisine("Beef", &mut PanicRng);
        assert_eq!(outcome, RollOutcome::NoCandidates);
    }
}
