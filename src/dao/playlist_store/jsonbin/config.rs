use super::error::{JsonBinDaoError, JsonBinResult};

/// Public JSONBin API root used when `JSONBIN_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://api.jsonbin.io/v3/b";

/// Runtime configuration describing which bin holds the playlist and how to authenticate.
#[derive(Debug, Clone)]
pub struct JsonBinConfig {
    /// API root, e.g. `https://api.jsonbin.io/v3/b`.
    pub base_url: String,
    /// Identifier of the bin holding the playlist.
    pub bin_id: String,
    /// Value sent in the `X-Master-Key` header.
    pub api_key: String,
}

impl JsonBinConfig {
    /// Construct a configuration from explicit values.
    pub fn new(
        base_url: impl Into<String>,
        bin_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            bin_id: bin_id.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a configuration by reading the expected environment variables.
    pub fn from_env() -> JsonBinResult<Self> {
        let base_url = std::env::var("JSONBIN_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let bin_id = std::env::var("JSONBIN_BIN_ID").map_err(|_| JsonBinDaoError::MissingEnvVar {
            var: "JSONBIN_BIN_ID",
        })?;
        let api_key =
            std::env::var("JSONBIN_API_KEY").map_err(|_| JsonBinDaoError::MissingEnvVar {
                var: "JSONBIN_API_KEY",
            })?;

        Ok(Self::new(base_url, bin_id, api_key))
    }

    /// Full URL of the bin document.
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.bin_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_bin_without_double_slash() {
        let config = JsonBinConfig::new("http://localhost:9000/v3/b/", "bin42", "key");
        assert_eq!(config.endpoint(), "http://localhost:9000/v3/b/bin42");
    }
}
