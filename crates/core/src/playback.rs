//! Playback state persisted per user between sessions.

use serde::{Deserialize, Serialize};

use crate::store::Attributes;

/// Key of the playback record inside the persisted attribute bundle.
pub const PLAYBACK_INFO_KEY: &str = "playbackInfo";

/// Token assigned to freshly initialized records.
pub const DEFAULT_TOKEN: &str = "sample-audio-token";

/// Resume position and session flags for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackInfo {
    /// Resume position of the current audio resource.
    pub offset_in_milliseconds: u64,

    /// Opaque identifier of the selected audio resource.
    pub token: String,

    /// True while audio is associated with the live session.
    pub in_playback_session: bool,

    /// True once any session has been set up for this user.
    pub has_previous_playback_session: bool,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            offset_in_milliseconds: 0,
            token: DEFAULT_TOKEN.into(),
            in_playback_session: false,
            has_previous_playback_session: false,
        }
    }
}

impl PlaybackInfo {
    /// Read the record out of a bundle. `Ok(None)` when the key is absent.
    pub fn from_attributes(attributes: &Attributes) -> Result<Option<Self>, serde_json::Error> {
        attributes
            .get(PLAYBACK_INFO_KEY)
            .map(|value| serde_json::from_value(value.clone()))
            .transpose()
    }

    /// Write the record into a bundle, leaving other keys untouched.
    pub fn write_into(&self, attributes: &mut Attributes) -> Result<(), serde_json::Error> {
        attributes.insert(PLAYBACK_INFO_KEY.into(), serde_json::to_value(self)?);
        Ok(())
    }

    /// A fresh bundle holding only the default record.
    pub fn default_attributes() -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert(
            PLAYBACK_INFO_KEY.into(),
            serde_json::json!({
                "offsetInMilliseconds": 0,
                "token": DEFAULT_TOKEN,
                "inPlaybackSession": false,
                "hasPreviousPlaybackSession": false,
            }),
        );
        attributes
    }
}
