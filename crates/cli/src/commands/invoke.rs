//! `r2skill invoke` — Run one request through the skill without HTTP.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use r2skill_config::AppConfig;
use r2skill_core::envelope::RequestEnvelope;
use r2skill_handlers::{AudioCatalog, seeded_chain};
use r2skill_runtime::Skill;

/// Where the request envelope comes from.
pub enum Source {
    File(PathBuf),
    Stdin,
    Launch,
    Intent(String),
}

impl Source {
    pub fn from_args(file: Option<PathBuf>, launch: bool, intent: Option<String>) -> Self {
        match (file, launch, intent) {
            (Some(path), _, _) if path.as_os_str() == "-" => Source::Stdin,
            (Some(path), _, _) => Source::File(path),
            (None, false, Some(name)) => Source::Intent(name),
            _ => Source::Launch,
        }
    }

    fn envelope(self, user: &str, locale: &str) -> Result<RequestEnvelope, Box<dyn std::error::Error>> {
        let mut envelope = match self {
            Source::File(path) => {
                let raw = std::fs::read_to_string(&path)
                    .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
                return Ok(serde_json::from_str(&raw)?);
            }
            Source::Stdin => {
                let mut raw = String::new();
                std::io::stdin().read_to_string(&mut raw)?;
                return Ok(serde_json::from_str(&raw)?);
            }
            Source::Launch => RequestEnvelope::launch(user),
            Source::Intent(name) => RequestEnvelope::intent(user, name),
        };
        envelope.request.locale = Some(locale.to_string());
        Ok(envelope)
    }
}

pub async fn run(
    source: Source,
    user: String,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let envelope = source.envelope(&user, &config.skill.locale)?;

    let store = r2skill_persistence::build_from_config(&config).await?;
    let skill = build(&config, store, seed)?;

    let reply = skill.invoke(envelope).await?;
    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(())
}

fn build(
    config: &AppConfig,
    store: Arc<dyn r2skill_core::store::AttributeStore>,
    seed: Option<u64>,
) -> Result<Skill, Box<dyn std::error::Error>> {
    let skill = match seed {
        Some(seed) => {
            let catalog = AudioCatalog::from_config(&config.skill.audio_sources)?;
            r2skill_runtime::build_skill_with_chain(config, store, seeded_chain(catalog, seed))?
        }
        None => r2skill_runtime::build_skill(config, store)?,
    };
    Ok(skill)
}
