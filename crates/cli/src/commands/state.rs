//! `r2skill state` — Inspect or reset a user's stored attributes.

use r2skill_config::AppConfig;
use r2skill_core::playback::PlaybackInfo;
use r2skill_core::store::AttributeStore;

pub async fn show(user: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let store = r2skill_persistence::build_from_config(&config).await?;

    let attributes = store.load(user).await?;
    if attributes.is_empty() {
        println!("No stored state for {user}");
        return Ok(());
    }

    println!("📼 Stored state for {user} ({})", store.name());
    match PlaybackInfo::from_attributes(&attributes) {
        Ok(Some(info)) => {
            println!("  Token:            {}", info.token);
            println!("  Offset:           {} ms", info.offset_in_milliseconds);
            println!("  In playback:      {}", info.in_playback_session);
            println!("  Previous session: {}", info.has_previous_playback_session);
        }
        Ok(None) => println!("  (no playbackInfo record)"),
        Err(e) => println!("  ⚠️  playbackInfo unreadable: {e}"),
    }
    println!();
    println!("{}", serde_json::to_string_pretty(&attributes)?);
    Ok(())
}

pub async fn reset(user: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let store = r2skill_persistence::build_from_config(&config).await?;

    if store.delete(user).await? {
        println!("✅ Removed stored state for {user}");
    } else {
        println!("   No stored state for {user}");
    }
    Ok(())
}
