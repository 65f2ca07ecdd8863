use crate::domain::model::{Venue, VenueReview};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn default_headers(&self) -> &HashMap<String, String>;
}

/// 場所 API 的三個遠端操作；每次呼叫只產生一個 HTTP 請求
#[async_trait]
pub trait VenueApi: Send + Sync {
    async fn get_venue(&self, google_maps_id: &str) -> Result<Venue>;
    async fn get_venues(&self, google_maps_ids: &[String]) -> Result<Vec<Venue>>;
    async fn post_venue_review(&self, review: &VenueReview) -> Result<Venue>;
}
