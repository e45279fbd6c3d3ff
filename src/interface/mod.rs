pub mod prompts;
pub mod render;

pub use prompts::{
    prompt_associated_proteins, prompt_category, prompt_session_action, prompt_yes_no,
    SessionAction,
};
pub use render::{display_catalog, display_meal, roll_report};
