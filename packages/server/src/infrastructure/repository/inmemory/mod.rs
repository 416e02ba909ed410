//! In-memory repository implementations.

pub mod lobby;

pub use lobby::InMemoryLobbyRepository;
