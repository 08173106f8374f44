use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub web: WebConfig,
    pub youtube: YoutubeConfig,
    pub featured: FeaturedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoutubeConfig {
    /// API key for the video metadata API; overridden by `YOUTUBE_API_KEY`
    pub api_key: String,
    pub api_base_url: String,
    pub feed_base_url: String,
}

/// Offices whose live broadcasts are promoted to the shared floor pointer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturedConfig {
    pub office_ids: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite://./domewatch-sync.db".to_string(),
                max_connections: Some(10),
            },
            web: WebConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            youtube: YoutubeConfig {
                api_key: String::new(),
                api_base_url: "https://youtube.googleapis.com/youtube/v3".to_string(),
                feed_base_url: "https://www.youtube.com".to_string(),
            },
            featured: FeaturedConfig {
                // the two chambers whose floor feeds drive the default video
                office_ids: vec!["27".to_string(), "14".to_string()],
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());

        let mut config = if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(&config_file)?;
            toml::from_str(&contents)?
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(&config_file, contents)?;
            default_config
        };

        // The API credential normally arrives from the environment rather
        // than the config file, matching how the deployment provisions it
        if let Ok(api_key) = std::env::var("YOUTUBE_API_KEY") {
            config.youtube.api_key = api_key;
        }

        Ok(config)
    }
}
