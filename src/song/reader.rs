//! Line-delimited JSON song reader

use super::document::{ChannelList, Song};
use crate::error::{Error, Result};
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

impl Song {
    /// Read a song from `.jsonl` input
    ///
    /// The song is the first record holding a `channels` object with an
    /// inner `channels` array. Other records are skipped.
    pub fn from_reader<R: Read>(input: R) -> Result<Self> {
        let reader = BufReader::new(input);

        for line in reader.lines() {
            let line = line?;
            let line = line.trim_start_matches('\u{FEFF}').trim();
            if line.is_empty() {
                continue;
            }

            let record: Value = serde_json::from_str(line)?;
            if let Some(list) = record.get("channels").filter(|v| v.get("channels").is_some()) {
                let list: ChannelList = serde_json::from_value(list.clone())
                    .map_err(|e| Error::Structure(e.to_string()))?;
                return Ok(Song::new(list.channels));
            }
        }

        Err(Error::Structure("no record with channel data".to_string()))
    }

    /// Read a song from a file
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to open '{}': {}", path.display(), e),
            ))
        })?;
        Self::from_reader(file)
    }
}

impl FromStr for Song {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::Voice;

    const SONG: &str = r#"{"version": 1, "channels": 3}
{"channels": {"channels": [{"sl": [{"vl": [{"__LCVoice__": true, "n": 60, "id": 17}, {"__LCVoice__": false}], "play_notes": 2}]}, {"sl": []}, {"sl": []}]}}
"#;

    #[test]
    fn test_reads_second_record() {
        let song: Song = SONG.parse().unwrap();
        assert_eq!(song.channels.len(), 3);
        let bar = &song.channels[0].bars[0];
        assert_eq!(bar.play_notes, Some(2));
        assert_eq!(bar.voices[0], Voice::note(60).with_timbre(17));
        assert_eq!(bar.voices[1], Voice::hold());
    }

    #[test]
    fn test_skips_blank_lines_and_bom() {
        let text = "\u{FEFF}\n\n{\"channels\": {\"channels\": []}}\n";
        let song: Song = text.parse().unwrap();
        assert!(song.channels.is_empty());
    }

    #[test]
    fn test_missing_song_record() {
        let err = "{\"title\": \"x\"}\n".parse::<Song>().unwrap_err();
        assert!(matches!(err, Error::Structure(_)));
    }

    #[test]
    fn test_channel_without_bars() {
        let err = r#"{"channels": {"channels": [{}, {}, {}]}}"#.parse::<Song>().unwrap_err();
        assert!(matches!(err, Error::Structure(ref m) if m.contains("sl")), "{}", err);
    }

    #[test]
    fn test_bar_without_voices() {
        let text = r#"{"channels": {"channels": [{"sl": [{"play_notes": 0}]}, {"sl": []}, {"sl": []}]}}"#;
        let err = text.parse::<Song>().unwrap_err();
        assert!(matches!(err, Error::Structure(ref m) if m.contains("vl")), "{}", err);
    }

    #[test]
    fn test_channels_not_an_array() {
        let err = r#"{"channels": {"channels": 3}}"#.parse::<Song>().unwrap_err();
        assert!(matches!(err, Error::Structure(_)));
    }

    #[test]
    fn test_invalid_json() {
        let err = "{not json\n".parse::<Song>().unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
