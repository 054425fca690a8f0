pub mod generate;
pub mod plan;
