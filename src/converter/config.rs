//! Conversion parameters and MSX format tables

use crate::error::{Error, Result};

/// Defaults used when a parameter is not given
pub mod defaults {
    pub const START_LINE: u32 = 10;
    pub const STEP: u32 = 10;
    pub const NOTE_LENGTH: u32 = 32;
    pub const TEMPO: u32 = 140;
    pub const VOLUME: u32 = 12;
}

/// Accepted parameter ranges (inclusive)
pub mod limits {
    /// Highest line number MSX-BASIC accepts
    pub const MAX_LINE: u32 = 65529;
    pub const NOTE_LENGTH: (u32, u32) = (1, 64);
    pub const TEMPO: (u32, u32) = (32, 255);
    pub const VOLUME: (u32, u32) = (0, 15);
}

/// What to do when channels end up with different line counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum UnevenChannels {
    /// Shorter channels contribute empty strings
    #[default]
    Pad,
    /// Drop rows past the shortest channel
    Truncate,
    /// Fail the conversion
    Reject,
}

/// Format constants for the LovelyComposer source and the MSX target
#[derive(Debug, Clone)]
pub struct Tables {
    /// Scale names by semitone, starting at C
    pub scales: [&'static str; 12],
    pub rest_macro: &'static str,
    pub octave_macro: &'static str,
    pub absolute_macro: &'static str,
    /// Lowest and highest pitch codes that sound
    pub min_pitch: i64,
    pub max_pitch: i64,
    /// Semitones per octave
    pub scale_steps: i64,
    /// Timbre ids that drive the noise generator
    pub noise_ids: &'static [i64],
    /// Mixer bits for channel 0; channel `c` uses them shifted left by `c`
    pub tone_mask: u8,
    pub noise_mask: u8,
    /// Mixer value before any channel is seen
    pub all_mask: u8,
    /// Notes per PLAY string
    pub line_notes: usize,
    /// PSG voices
    pub channels: usize,
}

impl Tables {
    pub fn msx() -> Self {
        Self {
            scales: ["C", "C+", "D", "D+", "E", "F", "F+", "G", "G+", "A", "A+", "B"],
            rest_macro: "R",
            octave_macro: "O",
            absolute_macro: "N",
            min_pitch: 24,
            max_pitch: 107,
            scale_steps: 12,
            noise_ids: &[3, 7, 15, 33],
            tone_mask: 0b000001,
            noise_mask: 0b001000,
            all_mask: 0b111111,
            line_notes: 8,
            channels: 3,
        }
    }
}

impl Tables {
    /// Reject tables the encoder and mixer cannot work with
    pub fn validate(&self) -> Result<()> {
        check("scale steps", self.scale_steps, (1, self.scales.len() as i64))?;
        check("maximum pitch", self.max_pitch, (self.min_pitch, i64::MAX))?;
        check("notes per line", self.line_notes as i64, (1, i64::MAX))?;

        // every channel needs its own tone and noise bit inside the register
        let max_channels = (1..=8)
            .take_while(|&count| {
                let (tone, noise) = (0..count).fold((0u32, 0u32), |(t, n), c| {
                    (t | ((self.tone_mask as u32) << c), n | ((self.noise_mask as u32) << c))
                });
                (tone | noise) <= 0xFF && (tone & noise) == 0
            })
            .count() as i64;
        check("channel count", self.channels as i64, (1, max_channels))?;
        Ok(())
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self::msx()
    }
}

/// Conversion parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// First BASIC line number
    pub start_line: u32,
    /// Line number increment
    pub step: u32,
    /// Default note length (`L`), also used for rests
    pub note_length: u32,
    pub tempo: u32,
    pub volume: u32,
    /// Emit MSX-MUSIC (`_MUSIC`, `PLAY#0`) statements
    pub extended: bool,
    /// Encode pitches with the `N` macro instead of octave + scale
    pub absolute_level: bool,
    pub uneven: UnevenChannels,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_line: defaults::START_LINE,
            step: defaults::STEP,
            note_length: defaults::NOTE_LENGTH,
            tempo: defaults::TEMPO,
            volume: defaults::VOLUME,
            extended: false,
            absolute_level: false,
            uneven: UnevenChannels::default(),
        }
    }
}

impl Config {
    /// Reject out-of-range values
    pub fn validate(&self) -> Result<()> {
        check_u32("start line", self.start_line, (1, limits::MAX_LINE))?;
        check_u32("step", self.step, (1, limits::MAX_LINE))?;
        check_u32("note length", self.note_length, limits::NOTE_LENGTH)?;
        check_u32("tempo", self.tempo, limits::TEMPO)?;
        check_u32("volume", self.volume, limits::VOLUME)?;
        Ok(())
    }
}

fn check_u32(field: &'static str, value: u32, (min, max): (u32, u32)) -> Result<()> {
    check(field, value as i64, (min as i64, max as i64))
}

fn check(field: &'static str, value: i64, (min, max): (i64, i64)) -> Result<()> {
    if value < min || value > max {
        return Err(Error::Config {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let cases = [
            Config { start_line: 0, ..Config::default() },
            Config { step: 0, ..Config::default() },
            Config { note_length: 65, ..Config::default() },
            Config { tempo: 31, ..Config::default() },
            Config { tempo: 256, ..Config::default() },
            Config { volume: 16, ..Config::default() },
        ];
        for config in cases {
            assert!(matches!(config.validate(), Err(Error::Config { .. })), "{:?}", config);
        }
    }

    #[test]
    fn test_accepts_bounds() {
        let config = Config {
            start_line: 1,
            step: 1,
            note_length: 64,
            tempo: 32,
            volume: 0,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_msx_tables_are_valid() {
        assert!(Tables::msx().validate().is_ok());
    }

    #[test]
    fn test_rejects_unusable_tables() {
        let cases = [
            Tables { scale_steps: 0, ..Tables::msx() },
            Tables { scale_steps: 13, ..Tables::msx() },
            Tables { line_notes: 0, ..Tables::msx() },
            Tables { channels: 0, ..Tables::msx() },
            Tables { channels: 4, ..Tables::msx() },
            Tables { max_pitch: 10, ..Tables::msx() },
        ];
        for tables in cases {
            assert!(matches!(tables.validate(), Err(Error::Config { .. })), "{:?}", tables);
        }
    }

    #[test]
    fn test_channel_limit_follows_masks() {
        let tables = Tables {
            tone_mask: 0b0000_0001,
            noise_mask: 0b0001_0000,
            all_mask: 0xFF,
            channels: 4,
            ..Tables::msx()
        };
        assert!(tables.validate().is_ok());
    }

    #[test]
    fn test_error_names_field() {
        let err = Config { volume: 20, ..Config::default() }.validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid volume: 20 (expected 0-15)");
    }
}
