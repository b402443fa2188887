//! Client for the flashcard store and the collection page built on it.

pub mod config;
pub mod launcher;
pub mod page;
pub mod store;

pub use config::ClientConfig;
pub use launcher::{Launcher, StdoutLauncher};
pub use page::FlashcardsPage;
pub use store::{StoreClient, StoreError};
