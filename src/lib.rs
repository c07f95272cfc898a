pub mod app;
pub mod config;
pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod store;
pub mod validation;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::Persistence;
pub use store::Store;
