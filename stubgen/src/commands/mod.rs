pub mod fetch;
pub mod generate;
