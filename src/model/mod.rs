//! Domain model for the comic inventory.
//!
//! One persisted entity (`Comic`) plus the two payload shapes that feed it:
//! `NewComic` for creation and `ComicPatch` for partial updates.

mod comic;

pub use comic::{Comic, ComicPatch, Condition, NewComic};
