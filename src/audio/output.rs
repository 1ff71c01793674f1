//! Audio output backends.
//!
//! With the `audio` feature an `oddio` mixer is run from the default `cpal`
//! output device's callback. Without it, opening an output fails with
//! [`AudioError::Unsupported`] and the game runs silent.

use super::SoundCue;
use thiserror::Error;

/// Errors that can occur while opening an audio output.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Built without the `audio` feature.
    #[error("audio support is not compiled in")]
    Unsupported,

    #[error("no audio output device available")]
    NoDevice,

    /// The device rejected or could not report a configuration.
    #[error("audio device configuration failed: {0}")]
    Config(String),

    #[error("could not start audio stream: {0}")]
    Stream(String),
}

/// Something that can play sound cues.
pub trait ToneSink {
    fn play(&mut self, cue: SoundCue);
}

/// Open the default output device.
pub fn open_default() -> Result<Box<dyn ToneSink>, AudioError> {
    #[cfg(feature = "audio")]
    {
        Ok(Box::new(cpal_backend::CpalOutput::open()?))
    }
    #[cfg(not(feature = "audio"))]
    {
        Err(AudioError::Unsupported)
    }
}

#[cfg(feature = "audio")]
mod cpal_backend {
    use super::{AudioError, ToneSink};
    use crate::audio::synth::{play_cue, CueMixer};
    use crate::audio::SoundCue;
    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

    /// Live output stream. The stream stops when this is dropped.
    pub struct CpalOutput {
        mixer_handle: oddio::Handle<CueMixer>,
        _stream: cpal::Stream,
    }

    impl CpalOutput {
        pub fn open() -> Result<Self, AudioError> {
            let host = cpal::default_host();
            let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
            let sample_rate = device
                .default_output_config()
                .map_err(|e| AudioError::Config(e.to_string()))?
                .sample_rate();
            let config = cpal::StreamConfig {
                channels: 2,
                sample_rate,
                buffer_size: cpal::BufferSize::Default,
            };
            log::info!(
                "audio output: {} ({} Hz stereo)",
                device.name().unwrap_or_else(|_| "unknown".to_string()),
                sample_rate.0
            );

            let (mixer_handle, mixer) = oddio::split(CueMixer::new());
            let stream = device
                .build_output_stream(
                    &config,
                    move |out_flat: &mut [f32], _: &cpal::OutputCallbackInfo| {
                        let out_stereo: &mut [[f32; 2]] = oddio::frame_stereo(out_flat);
                        oddio::run(&mixer, sample_rate.0, out_stereo);
                    },
                    |err| log::error!("audio stream error: {}", err),
                    None,
                )
                .map_err(|e| AudioError::Stream(e.to_string()))?;
            stream
                .play()
                .map_err(|e| AudioError::Stream(e.to_string()))?;

            Ok(Self {
                mixer_handle,
                _stream: stream,
            })
        }
    }

    impl ToneSink for CpalOutput {
        fn play(&mut self, cue: SoundCue) {
            play_cue(&mut self.mixer_handle, cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "audio"))]
    #[test]
    fn test_open_without_feature_is_unsupported() {
        assert!(matches!(open_default(), Err(AudioError::Unsupported)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AudioError::Unsupported.to_string(),
            "audio support is not compiled in"
        );
        assert_eq!(
            AudioError::Config("bad rate".into()).to_string(),
            "audio device configuration failed: bad rate"
        );
    }
}
