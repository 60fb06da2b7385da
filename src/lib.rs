pub mod ai;
pub mod config;
pub mod db;
pub mod error;
pub mod estimator;
pub mod handlers;
pub mod ledger;
pub mod middleware;
pub mod migrations;
pub mod models;
pub mod program;
pub mod repositories;
pub mod routes;
pub mod session;
