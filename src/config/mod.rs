#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_api_settings, validate_required_field, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use toml_config::TomlConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Tsv,
}

/// 合併設定檔與命令列參數後的最終設定
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub headers: HashMap<String, String>,
    pub format: OutputFormat,
}

impl ResolvedConfig {
    /// 命令列參數優先於設定檔；標頭逐一合併，名稱不分大小寫，同名時以命令列為準
    pub fn merge(
        file: Option<TomlConfig>,
        api_base_url: Option<String>,
        headers: Vec<(String, String)>,
        format: Option<OutputFormat>,
    ) -> Result<Self> {
        let file_format = file.as_ref().and_then(TomlConfig::output_format);
        let (file_base_url, mut merged_headers) = match file {
            Some(config) => (Some(config.api.base_url), config.api.headers),
            None => (None, HashMap::new()),
        };

        let api_base_url = api_base_url.or(file_base_url);
        let api_base_url = validate_required_field("api.base_url", &api_base_url)?.clone();

        for (name, value) in headers {
            merged_headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
            merged_headers.insert(name, value);
        }

        Ok(Self {
            api_base_url,
            headers: merged_headers,
            format: format.or(file_format).unwrap_or_default(),
        })
    }
}

impl ConfigProvider for ResolvedConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn default_headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

impl Validate for ResolvedConfig {
    fn validate(&self) -> Result<()> {
        validate_api_settings(&self.api_base_url, &self.headers)
    }
}
