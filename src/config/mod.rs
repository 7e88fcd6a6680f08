use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub const DEFAULT_PDF_TITLE: &str = "Registro de Paros e Incidencias";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_export_format")]
    pub export_format: ExportFormat,
    #[serde(default = "default_pdf_title")]
    pub pdf_title: String,
    /// Side, in pixels, of the photo thumbnails embedded in PDF exports.
    #[serde(default = "default_thumbnail_size")]
    pub thumbnail_size: u32,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_export_format() -> ExportFormat {
    ExportFormat::Pdf
}
fn default_pdf_title() -> String {
    DEFAULT_PDF_TITLE.to_string()
}
fn default_thumbnail_size() -> u32 {
    96
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            export_format: default_export_format(),
            pdf_title: default_pdf_title(),
            thumbnail_size: default_thumbnail_size(),
            separator_char: default_separator_char(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rstoplogger")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".rstoplogger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rstoplogger.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rstoplogger.sqlite")
    }

    /// Path given with `--db`: `~/` expanded, relative paths anchored to
    /// the working directory.
    pub fn resolve_db_path(name: &str) -> PathBuf {
        let p = expand_tilde(name.trim());
        if p.is_absolute() {
            return p;
        }
        env::current_dir().map(|cwd| cwd.join(&p)).unwrap_or(p)
    }

    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))
    }

    /// Create the config directory and file; return the database path.
    ///
    /// In test mode the config file is left untouched.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_name {
            Some(name) => Self::resolve_db_path(&name),
            None => Self::database_file(),
        };

        if !is_test {
            let config = Self::with_database(db_path.clone());
            let yaml =
                serde_yaml::to_string(&config).map_err(|e| AppError::Config(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        Ok(db_path)
    }
}
