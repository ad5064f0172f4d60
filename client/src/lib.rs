pub mod args;
pub mod input;
pub mod run;
pub mod state;
pub mod ui;

#[cfg(test)]
mod test_helpers;

pub use run::run_client;
