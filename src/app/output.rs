use crate::app::commands::CommandOutput;
use crate::config::OutputFormat;
use crate::core::Venue;
use crate::utils::error::{Result, VenueError};

const HEADER: [&str; 8] = [
    "google_maps_id",
    "name",
    "address",
    "lat",
    "lng",
    "smoking_policy",
    "air_quality_smokers",
    "air_quality_nonsmokers",
];

pub fn render(output: &CommandOutput, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(output),
        OutputFormat::Csv => render_delimited(output.venues(), b','),
        OutputFormat::Tsv => render_delimited(output.venues(), b'\t'),
    }
}

fn render_json(output: &CommandOutput) -> Result<String> {
    let json = match output {
        CommandOutput::Venue(venue) => serde_json::to_string_pretty(venue)?,
        CommandOutput::Venues(venues) => serde_json::to_string_pretty(venues)?,
    };
    Ok(json)
}

fn venue_row(venue: &Venue) -> [String; 8] {
    fn cell<T: ToString>(value: Option<T>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    [
        venue.google_maps_id.clone(),
        cell(venue.name.as_deref()),
        cell(venue.address.as_deref()),
        cell(venue.location.map(|l| l.lat)),
        cell(venue.location.map(|l| l.lng)),
        cell(venue.smoking_policy),
        cell(venue.air_quality_smokers),
        cell(venue.air_quality_nonsmokers),
    ]
}

fn render_delimited(venues: &[Venue], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for venue in venues {
        writer.write_record(venue_row(venue))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| VenueError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| VenueError::ValidationError {
        message: format!("Rendered output is not valid UTF-8: {}", e),
    })
}
