pub mod repairshopr;

pub use repairshopr::RepairShoprApi;
