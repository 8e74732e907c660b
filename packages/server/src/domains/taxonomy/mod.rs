pub mod matcher;
pub mod models;
pub mod rules;

pub use matcher::match_categories;
pub use models::Category;
pub use rules::{CategoryRule, CATEGORY_RULES, DEFAULT_CATEGORIES};
