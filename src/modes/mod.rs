pub mod interactive;
pub mod terminal;

pub use interactive::InteractiveMode;
