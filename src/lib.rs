pub mod db;
pub mod models;
pub mod service;
pub mod transfer;
pub mod tui;
pub mod utils;
pub mod view;
pub mod weather;

pub use db::Database;
pub use models::{Note, NoteId, SortBy, SortOption, SortOrder};
pub use service::NoteService;
pub use transfer::TransferError;
pub use weather::{WeatherClient, WeatherClientBuilder, WeatherError, WeatherProvider};
