pub mod analysis;
pub mod codegen;
pub mod models;
pub mod processor;
pub mod refine;
pub mod sampling;
