mod installed;
mod platform;
mod preference;
mod product;
mod repository;

pub use installed::InstalledItem;
pub use platform::Platform;
pub use preference::PreferenceRecord;
pub use product::{Product, Release};
pub use repository::Repository;
