use std::fmt;

use rand::Rng;

use crate::models::Category;
use crate::roller::Resolver;

/// Outcome of rolling a single category.
///
/// Soft failures are values, not errors: they flow through the session
/// and are rendered as display strings only at the interface boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollOutcome {
    /// A concrete selection.
    Picked(String),
    /// The candidate set was empty after filtering.
    NoCandidates,
    /// No protein passed the enablement and cuisine filters.
    NoProteinsMatch,
}

impl RollOutcome {
    pub fn is_picked(&self) -> bool {
        matches!(self, RollOutcome::Picked(_))
    }

    /// The picked name, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            RollOutcome::Picked(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollOutcome::Picked(name) => write!(f, "{}", name),
            RollOutcome::NoCandidates => write!(f, "N/A"),
            RollOutcome::NoProteinsMatch => write!(f, "No proteins match!"),
        }
    }
}

/// The currently rolled meal: one slot per category, all unset at start.
///
/// Transient state owned by the active interaction session; never
/// persisted.
#[derive(Debug, Clone, Default)]
pub struct MealSession {
    main_protein: Option<RollOutcome>,
    cuts: Option<RollOutcome>,
    fat_source: Option<RollOutcome>,
    finisher: Option<RollOutcome>,
    cuisine: Option<RollOutcome>,
}

impl MealSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, category: Category) -> Option<&RollOutcome> {
        match category {
            Category::MainProtein => self.main_protein.as_ref(),
            Category::Cuts => self.cuts.as_ref(),
            Category::FatSource => self.fat_source.as_ref(),
            Category::Finisher => self.finisher.as_ref(),
            Category::Cuisine => self.cuisine.as_ref(),
        }
    }

    fn set_slot(&mut self, category: Category, outcome: RollOutcome) {
        let slot = match category {
            Category::MainProtein => &mut self.main_protein,
            Category::Cuts => &mut self.cuts,
            Category::FatSource => &mut self.fat_source,
            Category::Finisher => &mut self.finisher,
            Category::Cuisine => &mut self.cuisine,
        };
        *slot = Some(outcome);
    }

    /// The resolved protein name, if the protein slot holds a pick.
    pub fn protein_name(&self) -> Option<&str> {
        self.main_protein.as_ref().and_then(|o| o.name())
    }

    /// Roll one category, resolving the protein dependency first when
    /// needed.
    ///
    /// Re-rolling `mainProtein` invalidates `cuts` and `cuisine`, since
    /// both are functions of the protein choice.
    pub fn roll_category<R: Rng + ?Sized>(
        &mut self,
        category: Category,
        resolver: &Resolver<'_>,
        rng: &mut R,
    ) -> &RollOutcome {
        // A dependent roll re-resolves the protein when it is unset or a
        // sentinel, once; a repeated failure leaves the dependent at N/A.
        if category.depends_on_protein()
            && !self.main_protein.as_ref().is_some_and(|o| o.is_picked())
        {
            let protein = resolver.roll_main_protein(rng);
            self.main_protein = Some(protein);
        }

        let outcome = match category {
            Category::MainProtein => resolver.roll_main_protein(rng),
            Category::Cuts => match self.protein_name() {
                Some(protein) => resolver.roll_cuts(protein, rng),
                None => RollOutcome::NoCandidates,
            },
            Category::Cuisine => match self.protein_name() {
                Some(protein) => resolver.roll_cuisine(protein, rng),
                None => RollOutcome::NoCandidates,
            },
            Category::FatSource | Category::Finisher => resolver.roll_flat(category, rng),
        };

        if category == Category::MainProtein {
            self.cuts = None;
            self.cuisine = None;
        }
        self.set_slot(category, outcome);
        self.slot(category).unwrap()
    }

    /// Roll every category in the fixed resolution order.
    pub fn roll_all<R: Rng + ?Sized>(&mut self, resolver: &Resolver<'_>, rng: &mut R) {
        for category in Category::ROLL_ORDER {
            self.roll_category(category, resolver, rng);
        }
    }

    /// Clear all slots back to unset.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Clear only the cuisine slot.
    pub fn remove_cuisine(&mut self) {
        self.cuisine = None;
    }

    /// Human-readable meal description, once the four required slots are
    /// set.
    ///
    /// A failed protein roll yields a configuration-error message
    /// instead; cuisine is mentioned only when actually picked.
    pub fn summarize(&self) -> Option<String> {
        let protein = self.main_protein.as_ref()?;
        if !protein.is_picked() {
            return Some(
                "No proteins match! Check your protein and cuisine settings.".to_string(),
            );
        }

        let cuts = self.cuts.as_ref()?;
        let fat_source = self.fat_source.as_ref()?;
        let finisher = self.finisher.as_ref()?;

        let cuisine_part = match &self.cuisine {
            Some(RollOutcome::Picked(name)) => format!(", {} style", name),
            _ => String::new(),
        };

        Some(format!(
            "You're having {} (from {}) cooked with {} and finished with {}{}. Enjoy!",
            cuts, protein, fat_source, finisher, cuisine_part
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(
        protein: Option<RollOutcome>,
        cuts: Option<RollOutcome>,
        fat: Option<RollOutcome>,
        finisher: Option<RollOutcome>,
        cuisine: Option<RollOutcome>,
    ) -> MealSession {
        MealSession {
            main_protein: protein,
            cuts,
            fat_source: fat,
            finisher,
            cuisine,
        }
    }

    fn picked(name: &str) -> Option<RollOutcome> {
        Some(RollOutcome::Picked(name.to_string()))
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(RollOutcome::Picked("Ribeye".to_string()).to_string(), "Ribeye");
        assert_eq!(RollOutcome::NoCandidates.to_string(), "N/A");
        assert_eq!(RollOutcome::NoProteinsMatch.to_string(), "No proteins match!");
    }

    #[test]
    fn test_summarize_requires_all_four_slots() {
        let session = session_with(picked("Beef"), picked("Ribeye"), picked("Tallow"), None, None);
        assert!(session.summarize().is_none());
    }

    #[test]
    fn test_summarize_full_meal() {
        let session = session_with(
            picked("Beef"),
            picked("Ribeye"),
            picked("Tallow"),
            picked("Sear"),
            None,
        );
        let summary = session.summarize().unwrap();
        for name in ["Beef", "Ribeye", "Tallow", "Sear"] {
            assert!(summary.contains(name), "summary missing {}: {}", name, summary);
        }
        assert!(!summary.contains("style"));
    }

    #[test]
    fn test_summarize_includes_picked_cuisine() {
        let session = session_with(
            picked("Beef"),
            picked("Ribeye"),
            picked("Tallow"),
            picked("Sear"),
            picked("Mexican"),
        );
        assert!(session.summarize().unwrap().contains("Mexican style"));
    }

    #[test]
    fn test_summarize_skips_na_cuisine() {
        let session = session_with(
            picked("Beef"),
            picked("Ribeye"),
            picked("Tallow"),
            picked("Sear"),
            Some(RollOutcome::NoCandidates),
        );
        assert!(!session.summarize().unwrap().contains("style"));
    }

    #[test]
    fn test_summarize_failed_protein_overrides_other_slots() {
        let session = session_with(
            Some(RollOutcome::NoProteinsMatch),
            picked("Ribeye"),
            picked("Tallow"),
            picked("Sear"),
            None,
        );
        let summary = session.summarize().unwrap();
        assert!(summary.contains("No proteins match!"));
        assert!(!summary.contains("Ribeye"));
    }

    #[test]
    fn test_reset_and_remove_cuisine() {
        let mut session = session_with(
            picked("Beef"),
            picked("Ribeye"),
            picked("Tallow"),
            picked("Sear"),
            picked("Mexican"),
        );

        session.remove_cuisine();
        assert!(session.slot(Category::Cuisine).is_none());
        assert!(session.slot(Category::MainProtein).is_some());

        session.reset();
        for category in Category::ROLL_ORDER {
            assert!(session.slot(category).is_none());
        }
    }
}
