pub mod entities;
pub mod keywords;
pub mod summarize;
pub mod system;
