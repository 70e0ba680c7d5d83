mod logging;
mod report;
mod tui;

use aisles_core::{CuisineFilter, Query, SortKey, StoreId, ViewMode};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "aisles")]
#[command(about = "Eastern Aisles: discover Asian groceries near you")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the directory interactively (default)
    Browse {
        #[command(flatten)]
        filters: FilterArgs,
        /// Initial view: grid or map
        #[arg(long, default_value = "grid")]
        view: ViewMode,
    },
    /// Print the filtered, sorted store listing
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Emit a JSON array instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Open map directions to a store
    Directions {
        /// Store id, as shown by `list`
        id: StoreId,
        /// Print the URL instead of opening a browser
        #[arg(long)]
        print: bool,
    },
}

/// Filter and sort flags shared by `browse` and `list`.
#[derive(Debug, Clone, Default, Args)]
struct FilterArgs {
    /// Cuisine filter (All, Japanese, Chinese, Indian, Korean, Thai, Vietnamese)
    #[arg(long, default_value = "All")]
    cuisine: CuisineFilter,
    /// Case-insensitive search over name, cuisine and address
    #[arg(long, default_value = "")]
    search: String,
    /// Sort key: name, rating or type
    #[arg(long, default_value = "name")]
    sort: SortKey,
}

impl From<FilterArgs> for Query {
    fn from(args: FilterArgs) -> Self {
        Query {
            cuisine: args.cuisine,
            search: args.search,
            sort: args.sort,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = aisles_core::load_app_config()?;
    let catalog = aisles_core::Catalog::seed()?;

    match cli.command {
        None => {
            logging::init(&config, logging::LogTarget::Session)?;
            tui::run(catalog, Query::default(), ViewMode::Grid, &config)
        }
        Some(Commands::Browse { filters, view }) => {
            logging::init(&config, logging::LogTarget::Session)?;
            tui::run(catalog, filters.into(), view, &config)
        }
        Some(Commands::List { filters, json }) => {
            logging::init(&config, logging::LogTarget::Stderr)?;
            report::run_list(&catalog, &filters.into(), json)
        }
        Some(Commands::Directions { id, print }) => {
            logging::init(&config, logging::LogTarget::Stderr)?;
            report::run_directions(&catalog, &config, id, print)
        }
    }
}
