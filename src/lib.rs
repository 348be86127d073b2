//! Search index for the UDLex articles section: metadata extraction from
//! article sources, the per-article/aggregate JSON build, and the
//! filter/sort engine that runs over the aggregate index.

pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod parser;
pub mod search;
