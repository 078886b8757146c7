pub mod defaults;
mod settings;

pub use settings::{default_print_date, Settings};
