mod select;
mod types;

pub use select::{compatible_releases, find_suggested, pick_release, resolve_update};
pub use types::{Candidate, Selection};
