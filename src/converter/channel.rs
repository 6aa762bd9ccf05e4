//! Channel flattening: bars of notes to PLAY strings

use super::mixer::MixerMask;
use super::note::{Macro, NoteEncoder};
use crate::song::Channel;
use tracing::debug;

/// Per-channel state, reset for every channel
#[derive(Debug, Clone, Default)]
struct ChannelState {
    /// Octave last written with an `O` macro
    last_octave: Option<i64>,
}

/// Output of the flattening pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flattened {
    /// PLAY strings per channel
    pub lines: Vec<Vec<String>>,
    pub mixer: MixerMask,
}

/// Flatten every channel, accumulating the mixer value
pub fn flatten(channels: &[Channel], encoder: &NoteEncoder) -> Flattened {
    let tables = encoder.tables();
    let mut mixer = MixerMask::new(tables);
    let mut lines = Vec::with_capacity(tables.channels);

    for (index, channel) in channels.iter().take(tables.channels).enumerate() {
        let channel_lines = flatten_channel(index, channel, encoder, &mut mixer);
        debug!(
            channel = index,
            lines = channel_lines.len(),
            mixer = mixer.value(),
            "flattened channel"
        );
        lines.push(channel_lines);
    }

    Flattened { lines, mixer }
}

/// Flatten one channel into PLAY strings of at most `line_notes` notes
///
/// Inactive slots are skipped and do not count towards a line. A bar never
/// shares a line with the next one.
pub fn flatten_channel(
    index: usize,
    channel: &Channel,
    encoder: &NoteEncoder,
    mixer: &mut MixerMask,
) -> Vec<String> {
    let tables = encoder.tables();
    let mut state = ChannelState::default();
    let mut lines = Vec::new();

    for bar in &channel.bars {
        let mut line = String::new();
        let mut emitted = 0usize;

        for voice in bar.playable().iter().filter(|v| v.active) {
            let token = encoder.encode(voice.pitch);

            let prefix = match token.kind {
                Macro::Octave if state.last_octave == Some(token.value) => false,
                Macro::Octave => {
                    state.last_octave = Some(token.value);
                    true
                }
                _ => true,
            };
            line.push_str(&token.render(tables, prefix));

            if let Some(id) = voice.timbre {
                mixer.observe(tables, index, id);
            }

            emitted += 1;
            if emitted % tables.line_notes == 0 {
                lines.push(std::mem::take(&mut line));
            }
        }

        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines
}
