use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_location")]
    pub default_location: String,
    #[serde(default = "default_list_order")]
    pub list_order: String,
    #[serde(default = "default_placeholder_name")]
    pub placeholder_worker_name: String,
}

fn default_location() -> String {
    String::new()
}
fn default_list_order() -> String {
    "desc".to_string()
}
fn default_placeholder_name() -> String {
    "(unknown worker)".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            default_location: default_location(),
            list_order: default_list_order(),
            placeholder_worker_name: default_placeholder_name(),
        }
    }
}

impl Config {
    /// Standard configuration directory depending on the platform.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".punchlog")
    }

    /// Full path of the config file.
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("punchlog.conf")
    }

    /// Full path of the SQLite database.
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("punchlog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
                Err(_) => Config::default(),
            }
        } else {
            Config::default()
        }
    }

    /// Report missing or unreadable fields without touching the file.
    pub fn check() -> Vec<String> {
        let path = Self::config_file();
        let mut problems = Vec::new();

        if !path.exists() {
            problems.push(format!("config file not found: {:?}", path));
            return problems;
        }

        match fs::read_to_string(&path) {
            Ok(content) => {
                if serde_yaml::from_str::<Config>(&content).is_err() {
                    problems.push("config file is not valid YAML for this version".to_string());
                }
            }
            Err(e) => problems.push(format!("cannot read config file: {}", e)),
        }

        problems
    }

    /// Initialize configuration and database files.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> io::Result<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = if let Some(name) = custom_db {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::other(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if !db_path.exists() {
            if let Some(parent) = db_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}
