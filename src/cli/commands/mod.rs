pub mod config;
pub mod docstring;
pub mod generate;
pub mod serve;
pub mod standardize;
