use crate::ingest::IngestionReport;
use crate::models::{Food, MealItemChoice, Nutrients, SubstituteSuggestion};
use crate::substitution::{SubstitutionResult, Target};

/// Format a signed delta with an explicit `+`.
fn signed(v: f64) -> String {
    if v >= 0.0 { format!("+{v:.1}") } else { format!("{v:.1}") }
}

/// Display a ranked list of substitutes in a formatted table.
pub fn display_suggestions(title: &str, suggestions: &[SubstituteSuggestion]) {
    println!();
    println!("=== {title} ===");

    if suggestions.is_empty() {
        println!("  (no candidates)");
        return;
    }

    let name_width = suggestions.iter().map(|s| s.food.name.len()).max().unwrap_or(10);
    let portion_width = suggestions.iter().map(|s| s.portion.label().len()).max().unwrap_or(5);

    for (i, s) in suggestions.iter().enumerate() {
        let kcal_delta = s
            .delta_kcal
            .map(|d| format!(" kcal {}", signed(d)))
            .unwrap_or_default();
        println!(
            "{:>3}. {:<nw$}  {:<pw$} | {:>5.0} kcal | C {} P {} F {}{} | score {:.2}",
            i + 1,
            s.food.name,
            s.portion.label(),
            s.kcal,
            signed(s.delta_carbs),
            signed(s.delta_protein),
            signed(s.delta_fat),
            kcal_delta,
            s.score,
            nw = name_width,
            pw = portion_width,
        );
    }
}

pub fn display_nutrients(label: &str, n: &Nutrients) {
    let n = n.rounded(1);
    println!("{label}");
    println!("  Energy:    {:.0} kcal", n.energy_kcal());
    println!("  Protein:   {} g", n.protein);
    println!("  Carbs:     {} g", n.carbs);
    println!("  Fat:       {} g", n.fat);
    println!("  Fiber:     {} g", n.fiber);
    println!("  Sodium:    {} mg", n.sodium);
    println!("  Potassium: {} mg", n.potassium);
    println!("  Calcium:   {} mg", n.calcium);
    println!("  Iron:      {} mg", n.iron);
    println!("  Vitamin C: {} mg", n.vitamin_c);
}

pub fn display_target(target: &Target) {
    display_nutrients(
        &format!("{} [{}], {}:", target.food.name, target.food.id, target.portion.label()),
        &target.nutrients,
    );
}

/// Display the full result of a substitute search.
pub fn display_substitution(result: &SubstitutionResult) {
    println!();
    display_target(&result.target);
    display_suggestions("Closest by macros", &result.by_macros);
    display_suggestions("Closest by macros and energy", &result.by_macros_and_kcal);
    if !result.allowed.is_empty() {
        display_suggestions("Approved for this patient", &result.allowed);
    }
    println!();
}

/// Display a simple list of foods with their details.
pub fn display_food_list(foods: &[Food], title: &str) {
    if foods.is_empty() {
        println!("{title}: (none)");
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    for food in foods {
        let n = food.nutrients_base.rounded(1);
        let extra = [food.brand.as_deref(), food.origin.as_deref(), food.group.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        let extra = if extra.is_empty() { extra } else { format!(" ({extra})") };
        println!(
            "  [{}] {}{} - per {}: {:.0} kcal, P:{} C:{} F:{}",
            food.id,
            food.name,
            extra,
            food.base_unit,
            n.energy_kcal(),
            n.protein,
            n.carbs,
            n.fat
        );
    }

    println!();
}

pub fn display_allowed(patient_id: &str, original: &str, choices: &[MealItemChoice]) {
    if choices.is_empty() {
        println!("No approved substitutes for '{original}' (patient {patient_id}).");
        return;
    }
    println!("Approved substitutes for '{original}' (patient {patient_id}):");
    for c in choices {
        println!("  [{}] {} - {}", c.food.id, c.food.name, c.portion.label());
    }
}

pub fn display_report(report: &IngestionReport, foods: usize) {
    println!("Ingested {foods} foods from {} rows", report.rows_read);
    if report.rows_dropped_blank > 0 {
        println!("  {} rows dropped (blank description)", report.rows_dropped_blank);
    }
    if report.rows_unreadable > 0 {
        println!("  {} rows unreadable", report.rows_unreadable);
    }
    if report.values_defaulted > 0 {
        println!("  {} numeric cells unparsable, read as 0", report.values_defaulted);
    }
    if report.duplicate_ids > 0 {
        println!("  {} duplicate ids suffixed", report.duplicate_ids);
    }
}
