pub mod classifier;
pub mod executable_utils;
pub mod model;
pub mod schema;
pub mod scorers;
