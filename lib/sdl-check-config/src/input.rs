use human_size::Size;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// File extensions accepted when importing a schema file, without the leading dot.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,

    /// Largest schema file that will be imported, as a human readable size (for example `512 kB` or `5 MB`).
    ///
    /// `kB` and `MB` are decimal units; `KB` is read as 1024 bytes, like `KiB`.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: default_allowed_extensions(),
            max_file_size: default_max_file_size(),
        }
    }
}

fn default_allowed_extensions() -> Vec<String> {
    ["graphql", "gql", "json", "txt"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_max_file_size() -> String {
    "5 MB".to_string()
}

impl InputConfig {
    pub fn max_file_size_bytes(&self) -> Result<u64, String> {
        self.max_file_size
            .parse::<Size>()
            .map(|size| size.to_bytes() as u64)
            .map_err(|err| format!("Invalid input.max_file_size '{}': {}", self.max_file_size, err))
    }
}
