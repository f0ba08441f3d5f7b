mod dispatch;

pub use dispatch::{DispatchHandle, DispatchOutcome, UpdateDispatcher};
