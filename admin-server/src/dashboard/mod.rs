//! Admin dashboard counters

pub mod service;

pub use service::DashboardService;
