pub mod badges;
pub mod geo;
pub mod listing;
pub mod query;
pub mod scoring;
pub mod stats;
