use crate::app::commands::Command;
use crate::config::toml_config::TomlConfig;
use crate::config::{OutputFormat, ResolvedConfig};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "venue-client")]
#[command(about = "Look up venues and submit smoking / air quality reviews")]
pub struct CliConfig {
    #[arg(long, env = "VENUE_API_BASE_URL", help = "Base URL of the venue API")]
    pub api_base_url: Option<String>,

    #[arg(long, help = "TOML config file with [api] and [output] sections")]
    pub config: Option<PathBuf>,

    #[arg(
        long = "header",
        value_parser = parse_header,
        help = "Extra request header as KEY=VALUE (repeatable)"
    )]
    pub headers: Vec<(String, String)>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading config file: {}", path.display());
                Some(TomlConfig::from_file(path)?)
            }
            None => None,
        };

        ResolvedConfig::merge(
            file,
            self.api_base_url.clone(),
            self.headers.clone(),
            self.format,
        )
    }
}

fn parse_header(raw: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("header name cannot be empty".to_string());
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("Authorization=Bearer a=b").unwrap(),
            ("Authorization".to_string(), "Bearer a=b".to_string())
        );
        assert!(parse_header("no-separator").is_err());
        assert!(parse_header("=value").is_err());
    }

    #[test]
    fn test_parse_get_command() {
        let config = CliConfig::try_parse_from([
            "venue-client",
            "--api-base-url",
            "https://example.com",
            "--header",
            "X-Api-Key=abc",
            "--format",
            "csv",
            "get",
            "ChIJ123",
        ])
        .unwrap();

        assert_eq!(config.format, Some(OutputFormat::Csv));
        assert_eq!(config.headers.len(), 1);
        assert!(matches!(config.command, Command::Get { ref id } if id == "ChIJ123"));

        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.api_base_url, "https://example.com");
        assert_eq!(resolved.headers["X-Api-Key"], "abc");
    }

    #[test]
    fn test_parse_list_command_with_comma_ids() {
        let config = CliConfig::try_parse_from([
            "venue-client",
            "--api-base-url",
            "https://example.com",
            "list",
            "a,b",
            "c",
        ])
        .unwrap();

        match config.command {
            Command::List { ids } => assert_eq!(ids, vec!["a", "b", "c"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
