pub mod cache;
pub mod clock;
pub mod config;
pub mod db;
pub mod http;
pub mod marketplace;
pub mod middleware;
pub mod repositories;
