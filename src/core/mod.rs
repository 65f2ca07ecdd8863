pub mod venue_service;

pub use crate::domain::model::{SmokingPolicy, Venue, VenueReview};
pub use crate::domain::ports::{ConfigProvider, VenueApi};
pub use crate::utils::error::Result;
