pub mod action_reader;
pub mod catalog_writer;
pub mod user_benefit_writer;
