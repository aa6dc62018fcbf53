pub mod ai;
pub mod damage;
pub mod engine;
pub mod narration;
pub mod phase;
pub mod runner;
pub mod state;

#[cfg(test)]
pub(crate) mod tests;
