//! Note code to MML token encoding

use super::config::Tables;

/// MML command a token starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Macro {
    /// `R<length>`
    Rest,
    /// `O<octave><scale>`
    Octave,
    /// `N<level>`
    Absolute,
}

/// One encoded note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: Macro,
    /// Rest length, octave number or absolute level
    pub value: i64,
    /// Scale letter(s); empty for rests and absolute levels
    pub scale: &'static str,
}

impl Token {
    /// Render as MML text. Without `prefix` only the scale part is written.
    pub fn render(&self, tables: &Tables, prefix: bool) -> String {
        if !prefix {
            return self.scale.to_string();
        }
        let name = match self.kind {
            Macro::Rest => tables.rest_macro,
            Macro::Octave => tables.octave_macro,
            Macro::Absolute => tables.absolute_macro,
        };
        format!("{}{}{}", name, self.value, self.scale)
    }
}

/// Maps pitch codes to tokens
#[derive(Debug, Clone)]
pub struct NoteEncoder<'a> {
    tables: &'a Tables,
    note_length: u32,
    absolute: bool,
}

impl<'a> NoteEncoder<'a> {
    pub fn new(tables: &'a Tables, note_length: u32, absolute: bool) -> Self {
        Self {
            tables,
            note_length,
            absolute,
        }
    }

    pub fn tables(&self) -> &'a Tables {
        self.tables
    }

    /// The token for a slot with no usable pitch
    pub fn rest(&self) -> Token {
        Token {
            kind: Macro::Rest,
            value: self.note_length as i64,
            scale: "",
        }
    }

    /// Encode a pitch code. Absent or out-of-range codes become rests.
    pub fn encode(&self, pitch: Option<i64>) -> Token {
        let t = self.tables;
        let pitch = match pitch {
            Some(p) if p >= t.min_pitch && p <= t.max_pitch => p,
            _ => return self.rest(),
        };

        if self.absolute {
            return Token {
                kind: Macro::Absolute,
                value: pitch - t.min_pitch,
                scale: "",
            };
        }

        let octave = (pitch - t.min_pitch).div_euclid(t.scale_steps) + 1;
        let index = (pitch - t.scale_steps).rem_euclid(t.scale_steps) as usize;
        Token {
            kind: Macro::Octave,
            value: octave,
            scale: t.scales.get(index).copied().unwrap_or(""),
        }
    }
}
