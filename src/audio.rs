// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shutter click.
//!
//! Purely cosmetic: the click is synthesized on the fly and played on a
//! short-lived thread. Every failure (no device, unsupported format, no
//! `shutter-sound` feature) is logged at debug level and otherwise ignored.

#[cfg(any(test, feature = "shutter-sound"))]
use rand::rngs::StdRng;
#[cfg(any(test, feature = "shutter-sound"))]
use rand::{Rng, SeedableRng};

/// Length of the click in seconds.
#[cfg(any(test, feature = "shutter-sound"))]
const CLICK_SECONDS: f32 = 0.12;
/// Second blade snap, relative to the start.
#[cfg(any(test, feature = "shutter-sound"))]
const SECOND_SNAP_SECONDS: f32 = 0.045;
#[cfg(any(test, feature = "shutter-sound"))]
const PEAK: f32 = 0.6;

/// Mono samples of a two-snap mechanical shutter click at `sample_rate`.
#[cfg(any(test, feature = "shutter-sound"))]
pub fn shutter_click(sample_rate: u32) -> Vec<f32> {
    let rate = sample_rate as f32;
    let len = (CLICK_SECONDS * rate) as usize;
    let second = (SECOND_SNAP_SECONDS * rate) as usize;
    // Fixed seed so every click sounds the same
    let mut rng = StdRng::seed_from_u64(0x5eed);

    (0..len)
        .map(|i| {
            let noise: f32 = rng.gen_range(-1.0..1.0);
            let first = snap_envelope(i as f32 / rate, 900.0);
            let later = if i >= second {
                0.7 * snap_envelope((i - second) as f32 / rate, 1200.0)
            } else {
                0.0
            };
            (noise * PEAK * (first + later)).clamp(-1.0, 1.0)
        })
        .collect()
}

/// Exponential decay starting at 1.
#[cfg(any(test, feature = "shutter-sound"))]
fn snap_envelope(seconds: f32, decay: f32) -> f32 {
    (-seconds * decay / 10.0).exp()
}

/// Play the shutter click without blocking the caller.
pub fn play_shutter_cue() {
    #[cfg(feature = "shutter-sound")]
    {
        let spawned = std::thread::Builder::new()
            .name("shutter-sound".to_string())
            .spawn(|| {
                if let Err(e) = output::play_click() {
                    log::debug!("Shutter sound unavailable: {:#}", e);
                }
            });
        if let Err(e) = spawned {
            log::debug!("Failed to spawn shutter sound thread: {}", e);
        }
    }
    #[cfg(not(feature = "shutter-sound"))]
    {
        log::trace!("Built without shutter sound");
    }
}

#[cfg(feature = "shutter-sound")]
mod output {
    use super::{shutter_click, CLICK_SECONDS};
    use anyhow::{anyhow, Context, Result};
    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use std::sync::Arc;
    use std::time::Duration;

    pub(super) fn play_click() -> Result<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("No audio output device found"))?;
        let supported = device
            .default_output_config()
            .context("Failed to get audio config")?;

        let channels = supported.channels() as usize;
        let samples = Arc::new(shutter_click(supported.sample_rate().0));
        let config: cpal::StreamConfig = supported.config();

        let stream = match supported.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, samples, channels)?,
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, samples, channels)?,
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, samples, channels)?,
            other => return Err(anyhow!("Unsupported audio sample format {:?}", other)),
        };
        stream.play().context("Failed to start audio stream")?;

        // Keep the stream alive until the click has been rendered
        std::thread::sleep(Duration::from_secs_f32(CLICK_SECONDS) + Duration::from_millis(80));
        Ok(())
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        samples: Arc<Vec<f32>>,
        channels: usize,
    ) -> Result<cpal::Stream> {
        let mut position = 0;
        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    for frame in data.chunks_mut(channels.max(1)) {
                        let value = samples.get(position).copied().unwrap_or(0.0);
                        position += 1;
                        for sample in frame.iter_mut() {
                            *sample = T::from_sample(value);
                        }
                    }
                },
                |err| log::debug!("Audio output error: {}", err),
                None,
            )
            .context("Failed to build audio stream")?;
        Ok(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_length_follows_sample_rate() {
        assert!((5_759..=5_760).contains(&shutter_click(48_000).len()));
        assert!((5_291..=5_292).contains(&shutter_click(44_100).len()));
    }

    #[test]
    fn test_click_stays_in_range() {
        assert!(shutter_click(48_000).iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    #[test]
    fn test_click_fades_out() {
        let click = shutter_click(48_000);
        let energy = |range: std::ops::Range<usize>| -> f32 {
            click[range].iter().map(|s| s * s).sum()
        };

        assert!(energy(0..480) > energy(5_200..5_700) * 10.0);
    }

    #[test]
    fn test_click_is_deterministic() {
        assert_eq!(shutter_click(22_050), shutter_click(22_050));
    }
}
