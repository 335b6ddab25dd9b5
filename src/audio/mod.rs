use crate::models::Settings;
use crate::utils::logging::log_error_with_context;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use rodio::source::SineWave;
use rodio::{OutputStream, OutputStreamHandle, Source};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One note of a synthesized tune.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub start: Duration,
    pub length: Duration,
    /// Peak amplitude before the master volume is applied
    pub gain: f32,
}

impl Tone {
    const fn new(frequency: f32, start_ms: u64, length_ms: u64, gain: f32) -> Self {
        Self {
            frequency,
            start: Duration::from_millis(start_ms),
            length: Duration::from_millis(length_ms),
            gain,
        }
    }

    pub fn end(&self) -> Duration {
        self.start + self.length
    }
}

/// Slow rising bass line with a few tension notes over a low drone.
pub fn intro_tune() -> Vec<Tone> {
    vec![
        // drone, low A
        Tone::new(55.0, 0, 4000, 0.08),
        // bass C2 D2 E2 F2 G2
        Tone::new(65.41, 0, 1200, 0.15),
        Tone::new(73.42, 1000, 1200, 0.15),
        Tone::new(82.41, 2000, 1200, 0.15),
        Tone::new(87.31, 3000, 1200, 0.15),
        Tone::new(98.00, 4000, 1200, 0.15),
        // tension A3 B3 C4
        Tone::new(220.0, 1500, 400, 0.1),
        Tone::new(247.0, 2500, 400, 0.1),
        Tone::new(262.0, 3500, 400, 0.1),
    ]
}

/// Rising C major arpeggio, C5 E5 G5 C6.
pub fn celebration_tune() -> Vec<Tone> {
    vec![
        Tone::new(523.25, 0, 300, 0.3),
        Tone::new(659.25, 150, 300, 0.3),
        Tone::new(783.99, 300, 300, 0.3),
        Tone::new(1046.50, 500, 300, 0.3),
    ]
}

pub fn tune_length(tones: &[Tone]) -> Duration {
    tones.iter().map(Tone::end).max().unwrap_or_default()
}

/// Best-effort sound output. Playback runs on the blocking pool and failures
/// are logged, never returned to the screen flow.
#[derive(Clone)]
pub struct AudioManager {
    volume: Arc<Mutex<f32>>,
    enabled: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Result<Self> {
        info!("Initializing audio system");

        let manager = AudioManager {
            volume: Arc::new(Mutex::new(0.7)),
            enabled: settings.sound_enabled,
        };
        manager.set_volume(settings.volume)?;
        if !manager.enabled {
            info!("Sound disabled in settings");
        }
        Ok(manager)
    }

    /// Create a dummy audio manager that does nothing.
    /// Used when audio is unavailable and in tests.
    pub fn new_dummy() -> Self {
        warn!("Using dummy audio manager - audio features will be disabled");

        AudioManager {
            volume: Arc::new(Mutex::new(0.0)),
            enabled: false,
        }
    }

    pub fn set_volume(&self, volume: f32) -> Result<()> {
        if !volume.is_finite() {
            anyhow::bail!("Volume must be a finite number, got {}", volume);
        }
        let vol = volume.clamp(0.0, 1.0);
        *self.volume.lock().unwrap_or_else(|e| e.into_inner()) = vol;
        info!("Set audio volume to {:.0}%", vol * 100.0);
        Ok(())
    }

    pub fn get_volume(&self) -> f32 {
        *self.volume.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn play_intro(&self) -> Result<()> {
        self.play_tune("intro", intro_tune())
    }

    pub fn play_celebration(&self) -> Result<()> {
        self.play_tune("celebration", celebration_tune())
    }

    fn play_tune(&self, name: &'static str, tones: Vec<Tone>) -> Result<()> {
        if !self.enabled {
            debug!("Audio disabled, skipping {} tune", name);
            return Ok(());
        }

        let volume = self.get_volume();
        let runtime = tokio::runtime::Handle::try_current()
            .context("Audio playback needs a running tokio runtime")?;

        runtime.spawn_blocking(move || {
            if let Err(e) = Self::play_tones(&tones, volume) {
                log_error_with_context(&e, &format!("{} tune", name));
            }
        });

        Ok(())
    }

    fn play_tones(tones: &[Tone], volume: f32) -> Result<()> {
        // Create output stream on each call (OutputStream is not Send + Sync)
        let (stream, stream_handle) =
            OutputStream::try_default().context("Failed to create audio output stream")?;

        for tone in tones {
            Self::schedule_tone(&stream_handle, tone, volume)?;
        }

        // Keep stream alive until the last note has finished
        std::thread::sleep(tune_length(tones));
        drop(stream);

        Ok(())
    }

    fn schedule_tone(stream_handle: &OutputStreamHandle, tone: &Tone, volume: f32) -> Result<()> {
        let source = SineWave::new(tone.frequency)
            .take_duration(tone.length)
            .fade_in(Duration::from_millis(10))
            .amplify(tone.gain * volume)
            .delay(tone.start);

        stream_handle
            .play_raw(source.convert_samples())
            .context("Failed to queue tone")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celebration_tune_notes() {
        let tune = celebration_tune();
        let freqs: Vec<f32> = tune.iter().map(|t| t.frequency).collect();
        assert_eq!(freqs, vec![523.25, 659.25, 783.99, 1046.50]);
        assert_eq!(tune_length(&tune), Duration::from_millis(800));
    }

    #[test]
    fn test_intro_tune_fits_inside_intro() {
        let tune = intro_tune();
        assert!(tune.iter().any(|t| t.frequency == 220.0));
        assert!(tune_length(&tune) < Settings::default().intro_duration());
    }

    #[test]
    fn test_empty_tune_has_no_length() {
        assert_eq!(tune_length(&[]), Duration::ZERO);
    }

    #[test]
    fn test_volume_is_clamped() {
        let audio = AudioManager::new_dummy();
        audio.set_volume(1.5).unwrap();
        assert_eq!(audio.get_volume(), 1.0);
        audio.set_volume(-0.2).unwrap();
        assert_eq!(audio.get_volume(), 0.0);
        assert!(audio.set_volume(f32::NAN).is_err());
    }

    #[test]
    fn test_disabled_audio_is_silent_noop() {
        let settings = Settings {
            sound_enabled: false,
            ..Settings::default()
        };
        let audio = AudioManager::new(&settings).unwrap();
        assert!(!audio.is_enabled());
        // No runtime needed when nothing plays
        assert!(audio.play_intro().is_ok());
        assert!(audio.play_celebration().is_ok());
    }

    #[test]
    fn test_dummy_never_plays() {
        let audio = AudioManager::new_dummy();
        assert!(!audio.is_enabled());
        assert!(audio.play_celebration().is_ok());
    }
}
