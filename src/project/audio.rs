use std::f64::consts::TAU;

/// C5, E5, G5.
pub const VICTORY_NOTES_HZ: [f64; 3] = [523.0, 659.0, 784.0];

const AMPLITUDE: f64 = 0.3;
const FADE_IN: f64 = 0.1;
const FADE_OUT: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JingleSpec {
    pub duration_s: f64,
    pub sample_rate: u32,
}

impl Default for JingleSpec {
    fn default() -> Self {
        Self {
            duration_s: 0.6,
            sample_rate: 44_100,
        }
    }
}

/// Mono 16-bit samples of three ascending notes, each with a short
/// fade-in and a longer fade-out.
pub fn victory_samples(spec: JingleSpec) -> Vec<i16> {
    let note_s = spec.duration_s / VICTORY_NOTES_HZ.len() as f64;
    let per_note = (f64::from(spec.sample_rate) * note_s).round() as usize;
    let mut out = Vec::with_capacity(per_note * VICTORY_NOTES_HZ.len());
    for freq in VICTORY_NOTES_HZ {
        for i in 0..per_note {
            let t = i as f64 / f64::from(spec.sample_rate);
            let n = per_note as f64;
            let envelope = (i as f64 / (n * FADE_IN))
                .min((n - i as f64) / (n * FADE_OUT))
                .min(1.0);
            let v = i16::MAX as f64 * AMPLITUDE * envelope * (TAU * freq * t).sin();
            out.push(v as i16);
        }
    }
    out
}

/// Encodes mono 16-bit PCM as a RIFF/WAVE byte stream.
pub fn encode_wav_mono16(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_len = u32::try_from(samples.len() * 2).unwrap_or(u32::MAX);
    let mut out = Vec::with_capacity(44 + samples.len() * 2);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36u32.saturating_add(data_len)).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for s in samples {
        out.extend_from_slice(&s.to_le_bytes());
    }
    out
}

pub fn victory_wav(spec: JingleSpec) -> Vec<u8> {
    encode_wav_mono16(&victory_samples(spec), spec.sample_rate)
}

#[cfg(test)]
#[path = "../../tests/unit/project/audio.rs"]
mod tests;
