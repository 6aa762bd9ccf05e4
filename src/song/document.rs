//! Serde model of a LovelyComposer song
//!
//! Only the fields the converter reads are modelled; everything else in the
//! record is ignored.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One slot of a bar
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Voice {
    /// Sounding slot; inactive slots hold the previous note
    #[serde(rename = "__LCVoice__", default, deserialize_with = "truthy")]
    pub active: bool,
    /// Pitch code
    #[serde(rename = "n", default, deserialize_with = "lenient_int")]
    pub pitch: Option<i64>,
    /// Timbre (tone) id
    #[serde(rename = "id", default, deserialize_with = "lenient_int")]
    pub timbre: Option<i64>,
}

impl Voice {
    /// Active note without a timbre
    pub fn note(pitch: i64) -> Self {
        Self {
            active: true,
            pitch: Some(pitch),
            timbre: None,
        }
    }

    /// Active slot without pitch
    pub fn rest() -> Self {
        Self {
            active: true,
            pitch: None,
            timbre: None,
        }
    }

    /// Inactive placeholder
    pub fn hold() -> Self {
        Self::default()
    }

    pub fn with_timbre(mut self, id: i64) -> Self {
        self.timbre = Some(id);
        self
    }
}

/// One bar of a channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Bar {
    #[serde(rename = "vl")]
    pub voices: Vec<Voice>,
    /// Number of leading slots that are played (all of them if absent)
    #[serde(default)]
    pub play_notes: Option<usize>,
}

impl Bar {
    pub fn new(voices: Vec<Voice>) -> Self {
        Self {
            voices,
            play_notes: None,
        }
    }

    pub fn with_play_notes(mut self, count: usize) -> Self {
        self.play_notes = Some(count);
        self
    }

    pub fn play_count(&self) -> usize {
        self.play_notes.unwrap_or(self.voices.len())
    }

    /// The playable slots, clipped to what the bar actually holds
    pub fn playable(&self) -> &[Voice] {
        &self.voices[..self.play_count().min(self.voices.len())]
    }
}

/// One playback channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Channel {
    #[serde(rename = "sl")]
    pub bars: Vec<Bar>,
}

impl Channel {
    pub fn new(bars: Vec<Bar>) -> Self {
        Self { bars }
    }
}

/// `{"channels": [...]}` object nested in the song record
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChannelList {
    pub channels: Vec<Channel>,
}

/// Parsed song: channels, each a list of bars
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Song {
    pub channels: Vec<Channel>,
}

impl Song {
    pub fn new(channels: Vec<Channel>) -> Self {
        Self { channels }
    }

    /// Check that the song has the shape the converter iterates
    pub fn check(&self, channel_count: usize) -> Result<()> {
        if self.channels.len() < channel_count {
            return Err(Error::Structure(format!(
                "expected {} channels, found {}",
                channel_count,
                self.channels.len()
            )));
        }

        for (c, channel) in self.channels.iter().take(channel_count).enumerate() {
            for (b, bar) in channel.bars.iter().enumerate() {
                if bar.play_count() > bar.voices.len() {
                    return Err(Error::Structure(format!(
                        "channel {} bar {}: play_notes {} exceeds {} notes",
                        c,
                        b,
                        bar.play_count(),
                        bar.voices.len()
                    )));
                }
            }
        }

        Ok(())
    }
}

/// JSON truthiness: false, null, 0, "", [] and {} are false
fn truthy<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    })
}

/// Integer field that reads anything non-integral as absent
fn lenient_int<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_i64())
}
