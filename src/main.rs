use std::path::Path;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use carnivore_dice_rs::cli::{Cli, Command};
use carnivore_dice_rs::error::Result;
use carnivore_dice_rs::interface::{
    display_catalog, display_meal, prompt_associated_proteins, prompt_category,
    prompt_session_action, prompt_yes_no, roll_report, SessionAction,
};
use carnivore_dice_rs::models::{Category, Item, MealSession};
use carnivore_dice_rs::roller::Resolver;
use carnivore_dice_rs::state::{JsonFileStore, KvStore, MealDataManager, KEY_MEAL_DATA};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    let mut rng: StdRng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut store = JsonFileStore::open(&cli.store)?;

    if !store.contains(KEY_MEAL_DATA) && !Path::new(&cli.catalog).exists() {
        eprintln!("Catalog file not found: {}", cli.catalog);
        eprintln!("Provide an items.json or point --catalog at one.");
        return Ok(());
    }

    let mut data = MealDataManager::load(&mut store, Path::new(&cli.catalog))?;

    match command {
        Command::Roll { category } => cmd_roll(&data, &mut rng, category.as_deref()),
        Command::Session => cmd_session(&mut store, &mut data, &mut rng),
        Command::Show => {
            display_catalog(&data);
            Ok(())
        }
        Command::AddItem {
            category,
            name,
            weight,
            out_of_stock,
            protein,
        } => cmd_add_item(
            &mut store,
            &mut data,
            &category,
            &name,
            weight,
            out_of_stock,
            protein.as_deref(),
        ),
        Command::AddCuisine { name, proteins } => {
            cmd_add_cuisine(&mut store, &mut data, &name, proteins)
        }
        Command::Toggle {
            in_stock,
            protein,
            cuisine,
        } => cmd_toggle(
            &mut store,
            &mut data,
            in_stock,
            protein.as_deref(),
            cuisine.as_deref(),
        ),
    }
}

/// Save the context back through the store and flush it to disk.
fn persist(store: &mut JsonFileStore, data: &MealDataManager) -> Result<()> {
    data.save(store)?;
    store.save()
}

/// Roll a full meal, or a single category.
fn cmd_roll(data: &MealDataManager, rng: &mut StdRng, category: Option<&str>) -> Result<()> {
    let resolver = Resolver::new(data);
    let mut session = MealSession::new();

    match category {
        Some(raw) => {
            let category: Category = raw.parse()?;
            session.roll_category(category, &resolver, rng);
            for line in roll_report(&session, category) {
                println!("{}", line);
            }
        }
        None => {
            session.roll_all(&resolver, rng);
            display_meal(&session);
        }
    }

    Ok(())
}

/// Interactive rolling session.
fn cmd_session(
    store: &mut JsonFileStore,
    data: &mut MealDataManager,
    rng: &mut StdRng,
) -> Result<()> {
    let mut session = MealSession::new();

    println!(
        "Loaded {} proteins, {} cuisines",
        data.catalog().main_protein.len(),
        data.cuisine_list().len()
    );

    loop {
        match prompt_session_action()? {
            SessionAction::RollAll => {
                let resolver = Resolver::new(data);
                session.roll_all(&resolver, rng);
                display_meal(&session);
            }
            SessionAction::RollOne => {
                let category = prompt_category()?;
                let resolver = Resolver::new(data);
                session.roll_category(category, &resolver, rng);
                display_meal(&session);
            }
            SessionAction::Reset => {
                session.reset();
                display_meal(&session);
            }
            SessionAction::RemoveCuisine => {
                session.remove_cuisine();
                display_meal(&session);
            }
            SessionAction::ToggleFilter => {
                let on = data.toggle_filter_in_stock();
                println!("In-stock filter {}", if on { "on" } else { "off" });
            }
            SessionAction::SaveSettings => {
                persist(store, data)?;
                println!("Settings saved.");
            }
            SessionAction::Quit => {
                if prompt_yes_no("Save settings before quitting?", false)? {
                    persist(store, data)?;
                    println!("Settings saved.");
                }
                break;
            }
        }
    }

    Ok(())
}

/// Add an item to a category and persist the catalog.
fn cmd_add_item(
    store: &mut JsonFileStore,
    data: &mut MealDataManager,
    category: &str,
    name: &str,
    weight: f64,
    out_of_stock: bool,
    protein: Option<&str>,
) -> Result<()> {
    let category: Category = category.parse()?;
    let item = Item::new(name, weight, !out_of_stock);

    data.add_item(category, item, protein)?;
    persist(store, data)?;

    println!("Added {} to {}.", name, category);
    Ok(())
}

/// Add a cuisine, prompting for protein associations when none were
/// given on the command line.
fn cmd_add_cuisine(
    store: &mut JsonFileStore,
    data: &mut MealDataManager,
    name: &str,
    proteins: Vec<String>,
) -> Result<()> {
    let proteins = if proteins.is_empty() {
        prompt_associated_proteins(&data.catalog().main_protein)?
    } else {
        proteins
    };

    data.add_cuisine(name, &proteins)?;
    persist(store, data)?;

    println!("Added cuisine {} ({} proteins tagged).", name, proteins.len());
    Ok(())
}

/// Flip settings flags and persist them.
fn cmd_toggle(
    store: &mut JsonFileStore,
    data: &mut MealDataManager,
    in_stock: bool,
    protein: Option<&str>,
    cuisine: Option<&str>,
) -> Result<()> {
    if !in_stock && protein.is_none() && cuisine.is_none() {
        println!("Please specify at least one toggle option:");
        println!("  --in-stock       Flip the global in-stock filter");
        println!("  --protein NAME   Enable/disable a protein");
        println!("  --cuisine NAME   Enable/disable a cuisine");
        return Ok(());
    }

    if in_stock {
        let on = data.toggle_filter_in_stock();
        println!("In-stock filter {}", if on { "on" } else { "off" });
    }

    if let Some(name) = protein {
        let enabled = data.toggle_protein(name)?;
        println!("Protein {} {}", name, if enabled { "enabled" } else { "disabled" });
    }

    if let Some(name) = cuisine {
        let enabled = data.toggle_cuisine(name)?;
        println!("Cuisine {} {}", name, if enabled { "enabled" } else { "disabled" });
    }

    persist(store, data)
}
