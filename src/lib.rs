pub mod cli;
pub mod error;
pub mod exec;
pub mod filtering;
pub mod lang;
pub mod layout;
pub mod logging;
pub mod pipelines;
pub mod processing;
pub mod recipe;
pub mod sources;
pub mod tasks;
pub mod tools;
