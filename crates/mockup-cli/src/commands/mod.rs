pub mod choices;
pub mod config;
pub mod generate;
pub mod inspect;
pub mod options;
pub mod prompt;
pub mod studio;
