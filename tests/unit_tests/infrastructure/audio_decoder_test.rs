use std::path::PathBuf;

use whisper_gateway::application::ports::TranscriptionError;
use whisper_gateway::infrastructure::audio::audio_decoder::{TARGET_SAMPLE_RATE, decode_file_to_pcm};

fn build_wav(sample_rate: u32, channels: u16, samples: &[i16]) -> Vec<u8> {
    let data_size = (samples.len() * 2) as u32;
    let block_align = channels * 2;
    let byte_rate = sample_rate * block_align as u32;

    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_size).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for &s in samples {
        wav.extend_from_slice(&s.to_le_bytes());
    }
    wav
}

fn write_file(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn given_16khz_mono_wav_when_decoding_then_returns_samples_and_duration() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "clip.wav", &build_wav(16_000, 1, &vec![1000i16; 16_000]));

    let decoded = decode_file_to_pcm(&path).unwrap();

    assert_eq!(decoded.samples.len(), 16_000);
    assert!((decoded.duration_seconds - 1.0).abs() < 0.01);
}

#[test]
fn given_44100hz_wav_when_decoding_then_resamples_to_target_rate() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "clip.wav", &build_wav(44_100, 1, &vec![0i16; 44_100]));

    let decoded = decode_file_to_pcm(&path).unwrap();

    let expected = TARGET_SAMPLE_RATE as usize;
    assert!(decoded.samples.len().abs_diff(expected) <= 2);
    assert!((decoded.duration_seconds - 1.0).abs() < 0.01);
}

#[test]
fn given_stereo_wav_when_decoding_then_downmixes_to_mono() {
    let dir = tempfile::tempdir().unwrap();
    let interleaved: Vec<i16> = (0..8000).flat_map(|_| [16_384i16, 0i16]).collect();
    let path = write_file(&dir, "stereo.wav", &build_wav(16_000, 2, &interleaved));

    let decoded = decode_file_to_pcm(&path).unwrap();

    assert_eq!(decoded.samples.len(), 8000);
    assert!((decoded.samples[0] - 0.25).abs() < 0.01);
}

#[test]
fn given_garbage_bytes_when_decoding_then_returns_unsupported_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "noise.webm", &[0x42u8; 2048]);

    let result = decode_file_to_pcm(&path);

    assert!(matches!(result, Err(TranscriptionError::UnsupportedFormat(_))));
}

#[test]
fn given_missing_file_when_decoding_then_returns_decoding_failed() {
    let result = decode_file_to_pcm(std::path::Path::new("/nonexistent/clip.wav"));
    assert!(matches!(result, Err(TranscriptionError::DecodingFailed(_))));
}
