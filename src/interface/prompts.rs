use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::Result;
use crate::models::{Category, ProteinItem};

/// An action in the interactive rolling session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    RollAll,
    RollOne,
    Reset,
    RemoveCuisine,
    ToggleFilter,
    SaveSettings,
    Quit,
}

/// Prompt for the next session action.
pub fn prompt_session_action() -> Result<SessionAction> {
    let options = [
        "Roll all",
        "Roll one category",
        "Reset",
        "Remove cuisine",
        "Toggle in-stock filter",
        "Save settings",
        "Quit",
    ];

    let selection = Select::new()
        .with_prompt("What next?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(match selection {
        0 => SessionAction::RollAll,
        1 => SessionAction::RollOne,
        2 => SessionAction::Reset,
        3 => SessionAction::RemoveCuisine,
        4 => SessionAction::ToggleFilter,
        5 => SessionAction::SaveSettings,
        _ => SessionAction::Quit,
    })
}

/// Prompt for a single category to roll.
pub fn prompt_category() -> Result<Category> {
    let options: Vec<String> = Category::ROLL_ORDER.iter().map(|c| c.to_string()).collect();

    let selection = Select::new()
        .with_prompt("Which category?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(Category::ROLL_ORDER[selection])
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Collect protein names to associate with a new cuisine, with fuzzy
/// matching against the catalog.
pub fn prompt_associated_proteins(proteins: &[ProteinItem]) -> Result<Vec<String>> {
    let mut selected = Vec::new();

    loop {
        let input: String = Input::new()
            .with_prompt("Protein to associate (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        // Try exact match first (case-insensitive)
        let exact_match = proteins
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(input));

        if let Some(protein) = exact_match {
            if !selected.contains(&protein.name) {
                selected.push(protein.name.clone());
            }
            println!("Added: {}", protein.name);
            continue;
        }

        // Try fuzzy matching
        let mut candidates: Vec<(&ProteinItem, f64)> = proteins
            .iter()
            .map(|p| (p, jaro_winkler(&p.name.to_lowercase(), &input.to_lowercase())))
            .filter(|(_, score)| *score > 0.7)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        if candidates.is_empty() {
            println!("No matching protein found for '{}'", input);
            continue;
        }

        if candidates.len() == 1 {
            let protein = candidates[0].0;
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", protein.name))
                .default(true)
                .interact()?;

            if confirm {
                if !selected.contains(&protein.name) {
                    selected.push(protein.name.clone());
                }
                println!("Added: {}", protein.name);
            }
        } else {
            let options: Vec<String> = candidates
                .iter()
                .take(5)
                .map(|(p, _)| p.name.clone())
                .collect();

            let mut selection_options = options.clone();
            selection_options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&selection_options)
                .default(0)
                .interact()?;

            if selection < options.len() {
                if !selected.contains(&options[selection]) {
                    selected.push(options[selection].clone());
                }
                println!("Added: {}", options[selection]);
            }
        }
    }

    Ok(selected)
}
