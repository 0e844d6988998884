use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

pub const SETTINGS_FILE: &str = "catering.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the backend. Not validated; empty when nothing sets it.
    pub backend_url: String,
    pub organization_id: Option<String>,
    pub user_role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    backend_url: Option<String>,
    organization_id: Option<String>,
    user_role: Option<String>,
}

pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

/// Layers defaults, the optional settings file and then environment
/// variables. Later layers win.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        let file_cfg: FileSettings = toml::from_str(&raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?;
        if let Some(v) = file_cfg.backend_url {
            settings.backend_url = v;
        }
        settings.organization_id = file_cfg.organization_id.or(settings.organization_id);
        settings.user_role = file_cfg.user_role.or(settings.user_role);
    }

    if let Some(v) = env("CATERING_BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = env("APP__BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = env("CATERING_ORGANIZATION_ID") {
        settings.organization_id = Some(v);
    }
    if let Some(v) = env("CATERING_USER_ROLE") {
        settings.user_role = Some(v);
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn temp_settings_path(tag: &str) -> std::path::PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        env::temp_dir().join(format!("catering_settings_{tag}_{suffix}.toml"))
    }

    #[test]
    fn missing_file_and_env_leave_backend_url_empty() {
        let settings =
            load_settings_from(&temp_settings_path("absent"), |_| None).expect("settings");
        assert_eq!(settings, Settings::default());
        assert!(settings.backend_url.is_empty());
    }

    #[test]
    fn env_overrides_file_values() {
        let path = temp_settings_path("layered");
        fs::write(
            &path,
            "backend_url = \"http://file:8000\"\norganization_id = \"org-file\"\nuser_role = \"admin\"\n",
        )
        .expect("write settings");

        let env_vars: HashMap<&str, &str> = [
            ("CATERING_BACKEND_URL", "http://env:8000"),
            ("CATERING_ORGANIZATION_ID", "org-env"),
        ]
        .into_iter()
        .collect();
        let settings = load_settings_from(&path, |name| env_vars.get(name).map(|v| v.to_string()))
            .expect("settings");

        assert_eq!(settings.backend_url, "http://env:8000");
        assert_eq!(settings.organization_id.as_deref(), Some("org-env"));
        assert_eq!(settings.user_role.as_deref(), Some("admin"));

        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn app_prefixed_backend_url_wins() {
        let settings = load_settings_from(&temp_settings_path("prefixed"), |name| match name {
            "CATERING_BACKEND_URL" => Some("http://first".to_string()),
            "APP__BACKEND_URL" => Some("http://second".to_string()),
            _ => None,
        })
        .expect("settings");
        assert_eq!(settings.backend_url, "http://second");
    }

    #[test]
    fn malformed_file_is_reported() {
        let path = temp_settings_path("broken");
        fs::write(&path, "backend_url = [").expect("write settings");
        let err = load_settings_from(&path, |_| None).expect_err("invalid toml");
        assert!(err.to_string().contains("invalid settings file"));
        fs::remove_file(path).expect("cleanup");
    }
}
