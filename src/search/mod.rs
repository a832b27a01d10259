//! # Candidate Search
//!
//! Filters over the substance library:
//!
//! 1. **Name search**: case-insensitive substring match on substance names
//! 2. **RT window**: substances whose method RT lies in a symmetric
//!    percentage window around the observed RT
//! 3. **Fragment filter**: substances whose fragment set contains every
//!    observed fragment
//!
//! The RT window and fragment filter are applied in that order by
//! [`crate::screen::Screener`]; each is usable on its own.

mod fragment;
mod name;
mod window;

pub use fragment::{FragmentFilter, FragmentMatches};
pub use name::{search_by_name, NameSearch};
pub use window::{filter_by_window, RtWindow};
