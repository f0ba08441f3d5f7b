use pinwheel_core::{Product, Release, Repository};

/// One repository's offering of a package, as produced by the index.
pub type Candidate = (Product, Repository);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<'a> {
    pub product: &'a Product,
    pub repository: &'a Repository,
    pub release: Option<&'a Release>,
}
