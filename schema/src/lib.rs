// Poke-Go Schema - Shared type definitions
// This crate contains the small closed enums that describe the battle rules:
// elemental types and their effectiveness triangle, move classes, player sides
// and the four move slots every character carries.

// Re-export the main types
pub use battle_data::*;
pub use element_types::*;

pub mod battle_data;
pub mod element_types;
