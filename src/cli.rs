use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::engine::{DEFAULT_SEARCH_LIMIT, RankConfig};
use crate::models::{Food, Portion};

/// nutri-swap: ingest nutrition tables and find macro-equivalent food substitutes.
#[derive(Parser, Debug)]
#[command(name = "nutri-swap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Food catalog: a delimited nutrition table or a JSON snapshot.
    #[arg(short, long, global = true, default_value = "catalog.json")]
    pub catalog: PathBuf,

    /// JSON file holding approved substitutes.
    #[arg(long, global = true, default_value = "allowed_substitutes.json")]
    pub allowed: PathBuf,

    /// JSON file with ranking parameters; flags override it.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a nutrition table and optionally write a JSON snapshot.
    Ingest {
        /// Delimited table (`;` or `,`).
        file: PathBuf,

        /// Where to write the catalog snapshot.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print every ingested food.
        #[arg(long)]
        list: bool,
    },

    /// Search foods by name, brand or origin.
    Search {
        query: String,

        #[arg(short, long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },

    /// Show nutrients for a portion of a food.
    Nutrients {
        food_id: String,

        #[command(flatten)]
        portion: PortionArgs,
    },

    /// Rank substitutes for a portion of a food.
    Substitutes {
        food_id: String,

        #[command(flatten)]
        portion: PortionArgs,

        /// Patient whose approved substitutes are listed.
        #[arg(short, long, default_value = "default")]
        patient: String,

        /// Interactively approve one of the suggestions for the patient.
        #[arg(long)]
        approve: bool,

        #[command(flatten)]
        rank: RankArgs,
    },

    /// Manage approved substitutes.
    Allow {
        #[command(subcommand)]
        action: AllowCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum AllowCommand {
    /// Approve a substitute; re-adding the same food replaces its portion.
    Add {
        patient: String,
        original: String,
        substitute: String,

        #[command(flatten)]
        portion: PortionArgs,
    },

    /// Withdraw an approved substitute.
    Remove {
        patient: String,
        original: String,
        substitute: String,
    },

    /// List approved substitutes.
    List { patient: String, original: String },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PortionArgs {
    /// Portion in grams.
    #[arg(long, conflicts_with = "ml")]
    pub grams: Option<f64>,

    /// Portion in milliliters.
    #[arg(long)]
    pub ml: Option<f64>,
}

impl PortionArgs {
    /// The requested portion, else the food's first declared or reference portion.
    pub fn resolve(&self, food: &Food) -> Portion {
        match (self.grams, self.ml) {
            (Some(g), _) => Portion::grams(g),
            (None, Some(ml)) => Portion::milliliters(ml),
            (None, None) => food
                .portions
                .first()
                .cloned()
                .unwrap_or_else(|| food.base_unit.reference_portion()),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct RankArgs {
    /// Maximum suggestions per list.
    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long)]
    pub w_carbs: Option<f64>,

    #[arg(long)]
    pub w_protein: Option<f64>,

    #[arg(long)]
    pub w_fat: Option<f64>,

    /// Weight on |Δkcal| in the macro+energy list.
    #[arg(long)]
    pub kcal_weight: Option<f64>,
}

impl RankArgs {
    /// Overlay the flags that were given onto `base`.
    pub fn apply(&self, base: RankConfig) -> RankConfig {
        let mut config = base;
        if let Some(limit) = self.limit {
            config.limit = limit;
        }
        if let Some(w) = self.w_carbs {
            config.weights.carbs = w;
        }
        if let Some(w) = self.w_protein {
            config.weights.protein = w;
        }
        if let Some(w) = self.w_fat {
            config.weights.fat = w;
        }
        if self.kcal_weight.is_some() {
            config.kcal_weight = self.kcal_weight;
        }
        config
    }
}
