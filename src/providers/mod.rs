mod custom;
mod facebook;

pub use crate::provider::GraphProvider;
pub use custom::CustomProvider;
pub use facebook::FacebookProvider;
