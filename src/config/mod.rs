pub mod defaults;
pub mod discovery;
pub mod resolver;
pub mod settings;
