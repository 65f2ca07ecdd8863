use crate::utils::error::{Result, VenueError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 場所的吸菸政策，線上格式為整數（0-3）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SmokingPolicy {
    #[default]
    Unknown,
    SmokingAllowed,
    SmokingProhibited,
    PartialSmokingAllowed,
}

impl TryFrom<u8> for SmokingPolicy {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(SmokingPolicy::Unknown),
            1 => Ok(SmokingPolicy::SmokingAllowed),
            2 => Ok(SmokingPolicy::SmokingProhibited),
            3 => Ok(SmokingPolicy::PartialSmokingAllowed),
            other => Err(format!("unknown smoking policy: {}", other)),
        }
    }
}

impl From<SmokingPolicy> for u8 {
    fn from(policy: SmokingPolicy) -> Self {
        match policy {
            SmokingPolicy::Unknown => 0,
            SmokingPolicy::SmokingAllowed => 1,
            SmokingPolicy::SmokingProhibited => 2,
            SmokingPolicy::PartialSmokingAllowed => 3,
        }
    }
}

impl fmt::Display for SmokingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SmokingPolicy::Unknown => "unknown",
            SmokingPolicy::SmokingAllowed => "allowed",
            SmokingPolicy::SmokingProhibited => "prohibited",
            SmokingPolicy::PartialSmokingAllowed => "partial",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for SmokingPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unknown" => Ok(SmokingPolicy::Unknown),
            "allowed" => Ok(SmokingPolicy::SmokingAllowed),
            "prohibited" => Ok(SmokingPolicy::SmokingProhibited),
            "partial" => Ok(SmokingPolicy::PartialSmokingAllowed),
            other => Err(format!(
                "unknown smoking policy '{}', expected one of: unknown, allowed, prohibited, partial",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Venue {
    pub google_maps_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoking_policy: Option<SmokingPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_quality_smokers: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_quality_nonsmokers: Option<f64>,
}

impl Venue {
    pub fn new(google_maps_id: impl Into<String>) -> Self {
        Self {
            google_maps_id: google_maps_id.into(),
            name: None,
            address: None,
            location: None,
            smoking_policy: None,
            air_quality_smokers: None,
            air_quality_nonsmokers: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_location(mut self, lat: f64, lng: f64) -> Self {
        self.location = Some(Location { lat, lng });
        self
    }
}

/// 使用者提交的評論：場所欄位加上三個「是否有填寫」旗標。
///
/// 旗標只能透過 `with_*` 設定，保證旗標為 true 時對應欄位一定有值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VenueReview {
    #[serde(flatten)]
    venue: Venue,
    smoking_policy_specified: bool,
    air_quality_smokers_specified: bool,
    air_quality_nonsmokers_specified: bool,
}

impl VenueReview {
    pub fn new(google_maps_id: impl Into<String>) -> Self {
        Self::for_venue(Venue::new(google_maps_id))
    }

    /// 以既有場所資料為基礎建立評論，所有旗標預設為 false
    pub fn for_venue(venue: Venue) -> Self {
        Self {
            venue,
            smoking_policy_specified: false,
            air_quality_smokers_specified: false,
            air_quality_nonsmokers_specified: false,
        }
    }

    pub fn with_smoking_policy(mut self, policy: SmokingPolicy) -> Self {
        self.venue.smoking_policy = Some(policy);
        self.smoking_policy_specified = true;
        self
    }

    /// 評分必須是有限數值；NaN 或無限大無法以 JSON 表示
    pub fn with_air_quality_smokers(mut self, rating: f64) -> Result<Self> {
        self.venue.air_quality_smokers = Some(finite_rating("air_quality_smokers", rating)?);
        self.air_quality_smokers_specified = true;
        Ok(self)
    }

    pub fn with_air_quality_nonsmokers(mut self, rating: f64) -> Result<Self> {
        self.venue.air_quality_nonsmokers = Some(finite_rating("air_quality_nonsmokers", rating)?);
        self.air_quality_nonsmokers_specified = true;
        Ok(self)
    }

    pub fn google_maps_id(&self) -> &str {
        &self.venue.google_maps_id
    }

    pub fn venue(&self) -> &Venue {
        &self.venue
    }

    pub fn smoking_policy_specified(&self) -> bool {
        self.smoking_policy_specified
    }

    pub fn air_quality_smokers_specified(&self) -> bool {
        self.air_quality_smokers_specified
    }

    pub fn air_quality_nonsmokers_specified(&self) -> bool {
        self.air_quality_nonsmokers_specified
    }
}

fn finite_rating(field_name: &str, rating: f64) -> Result<f64> {
    if !rating.is_finite() {
        return Err(VenueError::ValidationError {
            message: format!("{} must be a finite number (got {})", field_name, rating),
        });
    }
    Ok(rating)
}

/// 所有 API 回應都包在 `{"data": ...}` 內
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}
