//! Meld detection.
//!
//! - `find_sets`: same rank, three or four distinct suits
//! - `find_runs`: same suit, three or more consecutive ranks
//! - `MeldSet`: both results for one hand snapshot
//!
//! All finders are pure and may be called any number of times on the same
//! hand. Melds are derived data: recompute after every hand change rather
//! than updating them.

pub mod finder;
pub mod meld;

pub use finder::{find_melds, find_runs, find_sets, MeldSet};
pub use meld::{Meld, MeldKind, MIN_MELD_LEN};
