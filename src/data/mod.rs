pub mod types;

pub use types::{zip_series, GrowthSample, Observation, Window, MS_PER_YEAR};
