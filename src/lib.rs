pub mod config;
pub mod domain;
pub mod lead_client;
pub mod routes;
pub mod spreadsheet;
pub mod startup;
pub mod submission;
pub mod telemetry;
