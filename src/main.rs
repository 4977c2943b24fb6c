use std::fs;
use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nutri_swap_rs::cli::{AllowCommand, Cli, Command, PortionArgs, RankArgs};
use nutri_swap_rs::engine::RankConfig;
use nutri_swap_rs::error::{NutriError, Result};
use nutri_swap_rs::ingest::ingest_path;
use nutri_swap_rs::interface::{
    display_allowed, display_food_list, display_nutrients, display_report, display_substitution,
    prompt_approval, prompt_yes_no,
};
use nutri_swap_rs::models::Food;
use nutri_swap_rs::repository::{
    FoodCatalog, InMemoryAllowedSubstitutes, InMemoryCatalog, load_allowed, load_catalog,
    save_allowed, save_foods, similar_names,
};
use nutri_swap_rs::substitution::SubstitutionService;

type Service = SubstitutionService<InMemoryCatalog, InMemoryAllowedSubstitutes>;

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("nutri_swap_rs=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Ingest { ref file, ref out, list } => cmd_ingest(file, out.as_deref(), list),
        Command::Search { ref query, limit } => {
            let service = open_service(&cli, RankConfig::default())?;
            let hits = service.search(query, limit);
            display_food_list(&hits, &format!("Results for '{query}'"));
            Ok(())
        }
        Command::Nutrients { ref food_id, ref portion } => {
            let service = open_service(&cli, RankConfig::default())?;
            cmd_nutrients(&service, food_id, portion)
        }
        Command::Substitutes {
            ref food_id,
            ref portion,
            ref patient,
            approve,
            ref rank,
        } => {
            let config = rank_config(cli.config.as_deref(), rank)?;
            let mut service = open_service(&cli, config)?;
            cmd_substitutes(&mut service, &cli.allowed, food_id, portion, patient, approve)
        }
        Command::Allow { ref action } => {
            let mut service = open_service(&cli, RankConfig::default())?;
            cmd_allow(&mut service, &cli.allowed, action)
        }
    }
}

fn rank_config(path: Option<&Path>, flags: &RankArgs) -> Result<RankConfig> {
    let base = match path {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => RankConfig::default(),
    };
    Ok(flags.apply(base))
}

fn open_service(cli: &Cli, config: RankConfig) -> Result<Service> {
    if !cli.catalog.exists() {
        return Err(NutriError::InvalidInput(format!(
            "catalog not found: {} (run 'ingest <table> --out {}' first)",
            cli.catalog.display(),
            cli.catalog.display()
        )));
    }
    let catalog = InMemoryCatalog::new(load_catalog(&cli.catalog)?);
    let allowed = InMemoryAllowedSubstitutes::new(load_allowed(&cli.allowed)?);
    Ok(SubstitutionService::new(catalog, allowed, config))
}

/// Look up a food, suggesting close names when the id is unknown.
fn require_food(service: &Service, food_id: &str) -> Result<Food> {
    if let Some(food) = service.catalog().find(food_id) {
        return Ok(food);
    }
    let hints = similar_names(service.catalog().foods(), food_id, 3);
    if !hints.is_empty() {
        eprintln!("Did you mean:");
        for food in hints {
            eprintln!("  [{}] {}", food.id, food.name);
        }
    }
    Err(NutriError::FoodNotFound(food_id.to_string()))
}

fn cmd_ingest(file: &Path, out: Option<&Path>, list: bool) -> Result<()> {
    let ingested = ingest_path(file)?;
    display_report(&ingested.report, ingested.foods.len());

    if list {
        display_food_list(&ingested.foods, "Catalog");
    }

    if let Some(out) = out {
        save_foods(out, &ingested.foods)?;
        println!("Catalog saved to {}.", out.display());
    }
    Ok(())
}

fn cmd_nutrients(service: &Service, food_id: &str, portion: &PortionArgs) -> Result<()> {
    let food = require_food(service, food_id)?;
    let portion = portion.resolve(&food);
    let nutrients = food.nutrients_for(&portion)?;
    display_nutrients(&format!("{} [{}], {}:", food.name, food.id, portion.label()), &nutrients);
    Ok(())
}

fn cmd_substitutes(
    service: &mut Service,
    allowed_path: &Path,
    food_id: &str,
    portion: &PortionArgs,
    patient: &str,
    approve: bool,
) -> Result<()> {
    let food = require_food(service, food_id)?;
    let portion = portion.resolve(&food);
    let result = service.find_substitutes(patient, &food.id, portion)?;
    display_substitution(&result);

    if !approve {
        return Ok(());
    }

    let Some(index) = prompt_approval(&result.by_macros_and_kcal)? else {
        return Ok(());
    };
    let picked = &result.by_macros_and_kcal[index];
    let prompt = format!(
        "Approve {} ({}) for patient {patient}?",
        picked.food.name,
        picked.portion.label()
    );
    if prompt_yes_no(&prompt, true)? {
        service.add_allowed_substitute(patient, &food.id, &picked.food.id, picked.portion.clone())?;
        save_allowed(allowed_path, service.allowed_store().entries())?;
        println!("Approved substitutes saved.");
    }
    Ok(())
}

fn cmd_allow(service: &mut Service, allowed_path: &Path, action: &AllowCommand) -> Result<()> {
    match action {
        AllowCommand::Add {
            patient,
            original,
            substitute,
            portion,
        } => {
            let food = require_food(service, substitute)?;
            let portion = portion.resolve(&food);
            let choice = service.add_allowed_substitute(patient, original, &food.id, portion)?;
            save_allowed(allowed_path, service.allowed_store().entries())?;
            println!(
                "Approved {} ({}) in place of '{original}'.",
                choice.food.name,
                choice.portion.label()
            );
        }
        AllowCommand::Remove {
            patient,
            original,
            substitute,
        } => {
            if service.remove_allowed_substitute(patient, original, substitute) {
                save_allowed(allowed_path, service.allowed_store().entries())?;
                println!("Removed '{substitute}'.");
            } else {
                println!("'{substitute}' was not approved for '{original}'.");
            }
        }
        AllowCommand::List { patient, original } => {
            display_allowed(patient, original, &service.get_allowed_substitutes(patient, original));
        }
    }
    Ok(())
}
