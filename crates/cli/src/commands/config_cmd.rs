//! `r2skill config` — Configuration management commands.

use r2skill_config::AppConfig;
use std::path::Path;

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let warnings = warnings(&config);
            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Backend:   {}", config.persistence.backend);
            println!("   Table:     {}", config.persistence.table_name);
            println!("   Region:    {}", config.persistence.region);
            println!("   Data:      {}", config.persistence.region_dir().display());
            println!(
                "   Gateway:   {}:{}",
                config.gateway.host, config.gateway.port
            );
            println!("   Locale:    {}", config.skill.locale);
            println!(
                "   Clips:     {}",
                if config.skill.audio_sources.is_empty() {
                    "built-in".to_string()
                } else {
                    config.skill.audio_sources.len().to_string()
                }
            );
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

/// Settings that are valid but probably not what was intended.
fn warnings(config: &AppConfig) -> Vec<&'static str> {
    let mut warnings = Vec::new();

    if config.persistence.backend == "memory" {
        warnings.push("Memory backend: playback state is lost when the process exits");
    }

    if config.gateway.host == "0.0.0.0" {
        warnings.push("Gateway bound to 0.0.0.0; request signatures are not verified");
    }

    if config
        .skill
        .audio_sources
        .iter()
        .any(|s| !s.starts_with("https://"))
    {
        warnings.push("Audio sources should be https URLs for the platform to play them");
    }

    warnings
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_dir().join("config.toml");
    println!("{}", config_path.display());
    Ok(())
}

pub async fn init(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_dir().join("config.toml");
    if write_default(&config_path, force)? {
        println!("✅ Wrote default config: {}", config_path.display());
    } else {
        println!(
            "   Config already exists: {} (use --force to overwrite)",
            config_path.display()
        );
    }
    Ok(())
}

fn write_default(path: &Path, force: bool) -> std::io::Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, AppConfig::default_toml())?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_is_valid() {
        let path = AppConfig::config_dir().join("config.toml");
        assert!(path.to_str().unwrap().contains("config.toml"));
    }

    #[test]
    fn defaults_have_no_warnings() {
        assert!(warnings(&AppConfig::default()).is_empty());
    }

    #[test]
    fn memory_backend_warns() {
        let mut config = AppConfig::default();
        config.persistence.backend = "memory".into();
        assert_eq!(warnings(&config).len(), 1);
    }

    #[test]
    fn init_does_not_clobber() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert!(write_default(&path, false).unwrap());
        std::fs::write(&path, "[gateway]\nport = 9000\n").unwrap();
        assert!(!write_default(&path, false).unwrap());
        assert_eq!(
            AppConfig::load_from(&path).unwrap().gateway.port,
            9000
        );

        assert!(write_default(&path, true).unwrap());
        let written = AppConfig::load_from(&path).unwrap();
        assert_eq!(written.gateway.port, 8080);
    }
}
