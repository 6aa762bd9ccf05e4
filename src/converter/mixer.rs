//! PSG mixer register value and program preamble

use super::config::{Config, Tables};

/// Value written to PSG register 7
///
/// Starts with every bit set and only ever clears bits: a channel's tone
/// bit once a tonal note is seen on it, its noise bit once a noise note is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixerMask {
    value: u8,
}

impl MixerMask {
    pub fn new(tables: &Tables) -> Self {
        Self {
            value: tables.all_mask,
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Account for a note with timbre `id` on `channel`
    pub fn observe(&mut self, tables: &Tables, channel: usize, id: i64) {
        let mask = if tables.noise_ids.contains(&id) {
            tables.noise_mask
        } else {
            tables.tone_mask
        };
        self.value &= !(mask << channel);
    }

    /// Six-digit binary literal, e.g. `&B110110`
    pub fn literal(&self) -> String {
        format!("&B{:06b}", self.value)
    }
}

/// PLAY statement head for the configured dialect
pub fn play_keyword(config: &Config) -> &'static str {
    if config.extended {
        "PLAY#0,"
    } else {
        "PLAY"
    }
}

/// Initialization statements, one per line number
pub fn preamble(mixer: MixerMask, config: &Config, tables: &Tables) -> Vec<String> {
    let mut lines = Vec::with_capacity(3);

    if config.extended {
        lines.push("_MUSIC".to_string());
    }
    lines.push(format!("SOUND7,{}", mixer.literal()));

    let setup = format!(
        "\"T{}V{}L{}\"",
        config.tempo, config.volume, config.note_length
    );
    let voices = vec![setup; tables.channels];
    lines.push(format!("{}{}", play_keyword(config), voices.join(",")));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_clears_bits() {
        let tables = Tables::msx();
        let mut mixer = MixerMask::new(&tables);
        assert_eq!(mixer.value(), 0b111111);

        mixer.observe(&tables, 0, 17);
        assert_eq!(mixer.value(), 0b111110);

        mixer.observe(&tables, 1, 7);
        assert_eq!(mixer.value(), 0b101110);

        mixer.observe(&tables, 2, 1);
        mixer.observe(&tables, 2, 33);
        assert_eq!(mixer.value(), 0b001010);
    }

    #[test]
    fn test_observe_never_sets() {
        let tables = Tables::msx();
        let mut mixer = MixerMask::new(&tables);
        let mut last = mixer.value();
        for (channel, id) in [(0, 1), (0, 1), (1, 3), (0, 15), (2, 8), (1, 3)] {
            mixer.observe(&tables, channel, id);
            assert_eq!(mixer.value() & !last, 0);
            last = mixer.value();
        }
    }

    #[test]
    fn test_literal() {
        let tables = Tables::msx();
        let mut mixer = MixerMask::new(&tables);
        mixer.observe(&tables, 0, 1);
        mixer.observe(&tables, 1, 1);
        mixer.observe(&tables, 2, 1);
        assert_eq!(mixer.literal(), "&B111000");
    }

    #[test]
    fn test_preamble() {
        let tables = Tables::msx();
        let config = Config::default();
        let lines = preamble(MixerMask::new(&tables), &config, &tables);
        assert_eq!(
            lines,
            vec![
                "SOUND7,&B111111".to_string(),
                "PLAY\"T140V12L32\",\"T140V12L32\",\"T140V12L32\"".to_string(),
            ]
        );
    }

    #[test]
    fn test_preamble_extended() {
        let tables = Tables::msx();
        let config = Config {
            extended: true,
            tempo: 120,
            volume: 15,
            note_length: 16,
            ..Config::default()
        };
        let lines = preamble(MixerMask::new(&tables), &config, &tables);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "_MUSIC");
        assert_eq!(lines[2], "PLAY#0,\"T120V15L16\",\"T120V15L16\",\"T120V15L16\"");
    }
}
