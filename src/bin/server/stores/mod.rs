pub mod messages;
pub mod settings;

pub use messages::MessageStore;
pub use settings::SettingsStore;
