pub mod auth;
pub use auth::SessionService;
pub mod manager;
pub mod customers;
pub mod machines;
pub mod catalog;
pub mod service_reports;
pub mod submit_guard;
pub use submit_guard::SubmitGuard;
pub mod dashboard;
pub use dashboard::DashboardService;
