use crate::core::{SmokingPolicy, Venue, VenueApi, VenueReview};
use crate::utils::error::{Result, VenueError};
use crate::utils::validation::validate_range;
use clap::Subcommand;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Fetch a single venue by its Google Maps id
    Get { id: String },

    /// Fetch several venues (ids separated by spaces or commas)
    List {
        #[arg(value_delimiter = ',')]
        ids: Vec<String>,
    },

    /// Submit a review for a venue
    Review {
        id: String,

        #[arg(long, help = "unknown | allowed | prohibited | partial")]
        smoking_policy: Option<SmokingPolicy>,

        #[arg(long, help = "Air quality for smokers (0-10)")]
        air_quality_smokers: Option<f64>,

        #[arg(long, help = "Air quality for non-smokers (0-10)")]
        air_quality_nonsmokers: Option<f64>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Venue(Venue),
    Venues(Vec<Venue>),
}

impl CommandOutput {
    pub fn venues(&self) -> &[Venue] {
        match self {
            CommandOutput::Venue(venue) => std::slice::from_ref(venue),
            CommandOutput::Venues(venues) => venues,
        }
    }
}

/// 由命令列參數組出評論；評分範圍在送出前檢查
pub fn build_review(
    id: &str,
    smoking_policy: Option<SmokingPolicy>,
    air_quality_smokers: Option<f64>,
    air_quality_nonsmokers: Option<f64>,
) -> Result<VenueReview> {
    if smoking_policy.is_none() && air_quality_smokers.is_none() && air_quality_nonsmokers.is_none()
    {
        return Err(VenueError::ValidationError {
            message: "A review needs at least one of --smoking-policy, --air-quality-smokers or --air-quality-nonsmokers".to_string(),
        });
    }

    let mut review = VenueReview::new(id);
    if let Some(policy) = smoking_policy {
        review = review.with_smoking_policy(policy);
    }
    if let Some(rating) = air_quality_smokers {
        validate_range("air_quality_smokers", rating, MIN_RATING, MAX_RATING)?;
        review = review.with_air_quality_smokers(rating)?;
    }
    if let Some(rating) = air_quality_nonsmokers {
        validate_range("air_quality_nonsmokers", rating, MIN_RATING, MAX_RATING)?;
        review = review.with_air_quality_nonsmokers(rating)?;
    }
    Ok(review)
}

pub async fn run_command<A: VenueApi + ?Sized>(api: &A, command: &Command) -> Result<CommandOutput> {
    match command {
        Command::Get { id } => {
            tracing::info!("🔍 Fetching venue {}", id);
            let venue = api.get_venue(id).await?;
            Ok(CommandOutput::Venue(venue))
        }
        Command::List { ids } => {
            tracing::info!("🔍 Fetching {} venue(s)", ids.len());
            let venues = api.get_venues(ids).await?;
            tracing::info!("📋 Received {} venue(s)", venues.len());
            Ok(CommandOutput::Venues(venues))
        }
        Command::Review {
            id,
            smoking_policy,
            air_quality_smokers,
            air_quality_nonsmokers,
        } => {
            let review = build_review(
                id,
                *smoking_policy,
                *air_quality_smokers,
                *air_quality_nonsmokers,
            )?;
            tracing::info!("📝 Submitting review for venue {}", id);
            let venue = api.post_venue_review(&review).await?;
            tracing::info!("✅ Review accepted for venue {}", venue.google_maps_id);
            Ok(CommandOutput::Venue(venue))
        }
    }
}
