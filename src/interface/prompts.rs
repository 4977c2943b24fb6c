use dialoguer::{Confirm, Select};

use crate::error::Result;
use crate::models::SubstituteSuggestion;

/// Ask which suggestion to approve. `None` means the user picked none.
pub fn prompt_approval(suggestions: &[SubstituteSuggestion]) -> Result<Option<usize>> {
    if suggestions.is_empty() {
        return Ok(None);
    }

    let mut options: Vec<String> = suggestions
        .iter()
        .map(|s| format!("{} - {} (score {:.2})", s.food.name, s.portion.label(), s.score))
        .collect();
    options.push("None of these".to_string());

    let selection = Select::new()
        .with_prompt("Approve which substitute for this patient?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok((selection < suggestions.len()).then_some(selection))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
