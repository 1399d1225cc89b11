pub mod browser;
pub mod case_detail;
pub mod combos;
pub mod generator;
pub mod stats_dashboard;
