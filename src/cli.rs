use clap::{Parser, Subcommand};

/// CarnivoreDice — a meal randomizer CLI that rolls weighted meal components.
#[derive(Parser, Debug)]
#[command(name = "carnivore_dice")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the key-value store JSON file.
    #[arg(short, long, default_value = "meal_store.json")]
    pub store: String,

    /// Path to the default catalog JSON used to seed a fresh store.
    #[arg(short, long, default_value = "items.json")]
    pub catalog: String,

    /// Seed for the random number generator, for reproducible rolls.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Roll a full meal, or a single category.
    Roll {
        /// Category to roll (mainProtein, cuts, fatSource, finisher, cuisine).
        #[arg(long)]
        category: Option<String>,
    },

    /// Interactive rolling session.
    Session,

    /// Show the catalog, settings and cuisine list.
    Show,

    /// Add an item to a category.
    AddItem {
        /// Target category.
        category: String,

        /// Item name.
        name: String,

        /// Relative selection weight.
        #[arg(long, default_value_t = 1.0)]
        weight: f64,

        /// Mark the item out of stock.
        #[arg(long)]
        out_of_stock: bool,

        /// Protein whose cut list receives the item (cuts only).
        #[arg(long)]
        protein: Option<String>,
    },

    /// Add a cuisine and tag the proteins it belongs to.
    AddCuisine {
        /// Cuisine name.
        name: String,

        /// Associated proteins; prompted for interactively when omitted.
        #[arg(long)]
        proteins: Vec<String>,
    },

    /// Flip the in-stock filter or a protein/cuisine enablement flag.
    Toggle {
        /// Toggle the global in-stock filter.
        #[arg(long)]
        in_stock: bool,

        /// Protein to enable or disable.
        #[arg(long)]
        protein: Option<String>,

        /// Cuisine to enable or disable.
        #[arg(long)]
        cuisine: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Roll { category: None }
    }
}
