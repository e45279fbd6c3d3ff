use crate::models::{Category, MealSession};
use crate::state::MealDataManager;

fn category_label(category: Category) -> &'static str {
    match category {
        Category::MainProtein => "Main protein",
        Category::Cuts => "Cut",
        Category::FatSource => "Fat source",
        Category::Finisher => "Finisher",
        Category::Cuisine => "Cuisine",
    }
}

/// Display the current meal slots and, when complete, the summary line.
pub fn display_meal(session: &MealSession) {
    println!();
    println!("=== Your Meal ===");

    for category in Category::ROLL_ORDER {
        let value = match session.slot(category) {
            Some(outcome) => outcome.to_string(),
            None => "—".to_string(),
        };
        println!("  {:<13} {}", format!("{}:", category_label(category)), value);
    }

    println!();
    match session.summarize() {
        Some(summary) => println!("{}", summary),
        None => println!("Roll all categories to see your meal!"),
    }
    println!();
}

/// Report lines for a single-category roll.
///
/// A dependent category may have resolved the protein implicitly, so
/// the protein line is included there — the cut alone doesn't tell the
/// user which protein constrained it.
pub fn roll_report(session: &MealSession, category: Category) -> Vec<String> {
    let mut lines = Vec::new();

    if category.depends_on_protein() {
        if let Some(protein) = session.slot(Category::MainProtein) {
            lines.push(format!("{}: {}", Category::MainProtein, protein));
        }
    }
    if let Some(outcome) = session.slot(category) {
        lines.push(format!("{}: {}", category, outcome));
    }

    lines
}

fn stock_marker(in_stock: bool) -> &'static str {
    if in_stock {
        "in stock"
    } else {
        "out of stock"
    }
}

/// Display the full catalog with weights, stock and enablement flags.
pub fn display_catalog(data: &MealDataManager) {
    let catalog = data.catalog();

    println!();
    println!("=== Proteins ===");
    for protein in &catalog.main_protein {
        let enabled = if data.protein_enabled(protein) {
            "enabled"
        } else {
            "disabled"
        };
        let cuisines = if protein.cuisine.is_empty() {
            String::new()
        } else {
            format!(" [{}]", protein.cuisine.join(", "))
        };
        println!(
            "  {} - weight {}, {}, {}{}",
            protein.name,
            protein.weight,
            stock_marker(protein.in_stock),
            enabled,
            cuisines
        );

        for cut in catalog.cuts_for(&protein.name) {
            println!(
                "      {} - weight {}, {}",
                cut.name,
                cut.weight,
                stock_marker(cut.in_stock)
            );
        }
    }

    println!();
    println!("=== Fat Sources ===");
    for item in &catalog.fat_source {
        println!(
            "  {} - weight {}, {}",
            item.name,
            item.weight,
            stock_marker(item.in_stock)
        );
    }

    println!();
    println!("=== Finishers ===");
    for item in &catalog.finisher {
        println!(
            "  {} - weight {}, {}",
            item.name,
            item.weight,
            stock_marker(item.in_stock)
        );
    }

    println!();
    println!("=== Cuisines ===");
    for cuisine in data.cuisine_list() {
        let enabled = if data.cuisine_enabled(cuisine) {
            "enabled"
        } else {
            "disabled"
        };
        println!("  {} - {}", cuisine, enabled);
    }

    println!();
    println!(
        "In-stock filter: {}",
        if data.filter_in_stock() { "on" } else { "off" }
    );
    println!();
}
