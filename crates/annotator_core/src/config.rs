use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
    pub database_url: String,
    pub static_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8888".into(),
            database_url: "sqlite://./data/annotator.db".into(),
            static_url: None,
        }
    }
}

impl Settings {
    /// Base URL for image assets; unless overridden they are served from the
    /// backend's `/static` tree.
    pub fn static_url(&self) -> String {
        match &self.static_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("{}/static", self.server_url.trim_end_matches('/')),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("annotator.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("server_url") {
                settings.server_url = v.clone();
            }
            if let Some(v) = file_cfg.get("database_url") {
                settings.database_url = v.clone();
            }
            if let Some(v) = file_cfg.get("static_url") {
                settings.static_url = Some(v.clone());
            }
        }
    }

    if let Ok(v) = std::env::var("ANNOTATOR_SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("ANNOTATOR_DATABASE_URL") {
        settings.database_url = v;
    }
    if let Ok(v) = std::env::var("ANNOTATOR_STATIC_URL") {
        settings.static_url = Some(v);
    }

    settings.database_url = normalize_database_url(&settings.database_url);
    settings
}

pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        let path = path.replace('\\', "/");
        return format!("sqlite://{path}");
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let settings = Settings::default();
        assert_eq!(settings.server_url, "http://localhost:8888");
        assert_eq!(settings.database_url, "sqlite://./data/annotator.db");
        assert_eq!(settings.static_url, None);
    }

    #[test]
    fn static_url_derives_from_server_url() {
        let settings = Settings {
            server_url: "http://tags.example:9000/".into(),
            ..Settings::default()
        };
        assert_eq!(settings.static_url(), "http://tags.example:9000/static");
    }

    #[test]
    fn explicit_static_url_wins_and_loses_trailing_slash() {
        let settings = Settings {
            static_url: Some("http://cdn.example/assets/".into()),
            ..Settings::default()
        };
        assert_eq!(settings.static_url(), "http://cdn.example/assets");
    }

    #[test]
    fn normalizes_plain_file_path_to_sqlite_url() {
        assert_eq!(
            normalize_database_url("./data/pairs.db"),
            "sqlite://./data/pairs.db"
        );
    }

    #[test]
    fn normalizes_sqlite_prefixed_path() {
        assert_eq!(
            normalize_database_url("sqlite:pairs.db"),
            "sqlite://pairs.db"
        );
    }

    #[test]
    fn keeps_memory_and_full_urls_untouched() {
        assert_eq!(
            normalize_database_url("sqlite::memory:"),
            "sqlite::memory:"
        );
        assert_eq!(
            normalize_database_url("sqlite://./pairs.db"),
            "sqlite://./pairs.db"
        );
    }

    #[test]
    fn empty_database_url_falls_back_to_default() {
        assert_eq!(
            normalize_database_url("  "),
            Settings::default().database_url
        );
    }
}
