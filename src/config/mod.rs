pub mod credentials;
pub mod environment;
pub mod loader;
pub mod settings;

pub use credentials::Credentials;
pub use environment::Environment;
pub use settings::ClientConfig;
