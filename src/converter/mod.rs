//! LovelyComposer to MSX-BASIC converter
//!
//! Runs the stages in order: note encoding and channel flattening, mixer
//! and preamble generation, then numbering and channel interleaving.

pub mod channel;
pub mod config;
pub mod mixer;
pub mod note;
pub mod program;

pub use config::{Config, Tables, UnevenChannels};
pub use program::{Program, ProgramLine};

use crate::error::Result;
use crate::song::Song;
use note::NoteEncoder;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::info;

/// Converter for one configuration
///
/// Holds no per-run state, so one instance can convert any number of songs.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: Config,
    tables: Tables,
}

impl Converter {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            tables: Tables::msx(),
        }
    }

    pub fn with_tables(config: Config, tables: Tables) -> Self {
        Self { config, tables }
    }

    /// Convert a parsed song to a BASIC program
    pub fn convert(&self, song: &Song) -> Result<Program> {
        self.config.validate()?;
        self.tables.validate()?;
        song.check(self.tables.channels)?;

        let encoder = NoteEncoder::new(
            &self.tables,
            self.config.note_length,
            self.config.absolute_level,
        );
        let flattened = channel::flatten(&song.channels, &encoder);
        let preamble = mixer::preamble(flattened.mixer, &self.config, &self.tables);
        let program = program::assemble(&flattened.lines, preamble, &self.config)?;

        info!(
            lines = program.len(),
            mixer = %flattened.mixer.literal(),
            "conversion complete"
        );
        Ok(program)
    }

    /// Convert `.jsonl` input
    pub fn convert_reader<R: Read>(&self, input: R) -> Result<Program> {
        let song = Song::from_reader(input)?;
        self.convert(&song)
    }

    /// Convert a `.jsonl` file and write the listing to `output`
    ///
    /// Nothing is written unless the whole conversion succeeds.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<Program> {
        let song = Song::from_path(input)?;
        let program = self.convert(&song)?;

        let mut out = BufWriter::new(File::create(output)?);
        program.write_to(&mut out)?;
        out.flush()?;

        Ok(program)
    }
}
