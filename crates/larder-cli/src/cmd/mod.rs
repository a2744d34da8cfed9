pub mod buy;
pub mod completions;
pub mod config;
pub mod export;
pub mod groceries;
pub mod plan;
pub mod recipes;
pub mod search;
pub mod select;
pub mod slug;
