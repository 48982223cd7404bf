pub mod bmkg;
pub mod cache;
pub mod normalize;
pub mod provinces;
pub mod service;
pub mod types;

pub use bmkg::BmkgClient;
pub use cache::ForecastStore;
pub use service::{AreaIndex, ForecastService};
