pub mod prompts;
pub mod render;

pub use prompts::{prompt_approval, prompt_yes_no};
pub use render::{
    display_allowed, display_food_list, display_nutrients, display_report, display_substitution,
    display_suggestions, display_target,
};
