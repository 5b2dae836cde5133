use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;

use crate::application::ports::{
    DecodingOptions, EngineOutput, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{AudioInfo, LanguageHint, TranscriptSegment};

use super::audio_decoder::{TARGET_SAMPLE_RATE, decode_file_to_pcm};

const MAX_DECODE_TOKENS: usize = 224;
const MEL_FILTERS_REPO: &str = "FL33TW00D-HF/whisper-base";

/// Whisper running in-process on Candle.
///
/// Decoding is greedy, which is what zero temperature asks for; beam width is
/// not honoured. Audio is split into 30 s windows and the KV cache is reset
/// between them, so no window is conditioned on the text of the previous one.
/// Decoding and inference run on the blocking pool.
pub struct CandleWhisperEngine {
    runtime: Arc<WhisperRuntime>,
    device_name: String,
    model_id: String,
}

struct WhisperRuntime {
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    dtype: DType,
    mel_filters: Vec<f32>,
}

impl CandleWhisperEngine {
    pub fn new(model_id: &str, device: &str) -> Result<Self, TranscriptionError> {
        let device = Self::select_device(device);
        let dtype = Self::select_dtype(&device);

        tracing::info!(
            device = ?device,
            model = model_id,
            "Initializing Candle Whisper transcription engine"
        );

        let api = Api::new().map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer.json: {}", e)))?;
        let weights_path = repo.get("model.safetensors").map_err(|e| {
            TranscriptionError::ModelLoadFailed(format!("model.safetensors: {}", e))
        })?;

        let mel_repo = api.repo(Repo::new(MEL_FILTERS_REPO.to_string(), RepoType::Model));
        let mel_bytes_path = mel_repo
            .get("melfilters.bytes")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("melfilters.bytes: {}", e)))?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: Config = serde_json::from_str(&config_contents)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        let mel_bytes = std::fs::read(&mel_bytes_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("mel filters: {}", e)))?;
        let mel_filters = read_mel_filters(&mel_bytes, &config)?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], dtype, &device)
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("model: {}", e)))?;

        let device_name = if device.is_cpu() { "cpu" } else { "gpu" }.to_string();

        tracing::info!(device = %device_name, "Candle Whisper engine loaded successfully");

        Ok(Self {
            runtime: Arc::new(WhisperRuntime {
                model: Mutex::new(model),
                tokenizer,
                config,
                device,
                dtype,
                mel_filters,
            }),
            device_name,
            model_id: model_id.to_string(),
        })
    }

    /// Resolves `"cuda"` / `"metal"` when compiled in, otherwise the CPU.
    pub fn select_device(name: &str) -> Device {
        let selected = match name.to_ascii_lowercase().as_str() {
            "cuda" => Device::new_cuda(0),
            "metal" => Device::new_metal(0),
            _ => Ok(Device::Cpu),
        };
        selected.unwrap_or_else(|e| {
            tracing::warn!(requested = name, error = %e, "Falling back to CPU device");
            Device::Cpu
        })
    }

    pub fn select_dtype(device: &Device) -> DType {
        if device.is_cpu() {
            DType::F32
        } else {
            DType::F16
        }
    }
}

#[async_trait]
impl TranscriptionEngine for CandleWhisperEngine {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: &LanguageHint,
        options: &DecodingOptions,
    ) -> Result<EngineOutput, TranscriptionError> {
        let runtime = Arc::clone(&self.runtime);
        let audio_path = audio_path.to_path_buf();
        let language = language.clone();
        let no_speech_threshold = options.no_speech_threshold;

        tokio::task::spawn_blocking(move || {
            runtime.transcribe(&audio_path, &language, no_speech_threshold)
        })
        .await
        .map_err(|e| TranscriptionError::TranscriptionFailed(format!("inference task: {}", e)))?
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn device(&self) -> &str {
        &self.device_name
    }
}

impl WhisperRuntime {
    fn transcribe(
        &self,
        audio_path: &Path,
        language: &LanguageHint,
        no_speech_threshold: f32,
    ) -> Result<EngineOutput, TranscriptionError> {
        let audio = decode_file_to_pcm(audio_path)?;

        let chunk_samples = m::N_SAMPLES;
        let window_seconds = chunk_samples as f32 / TARGET_SAMPLE_RATE as f32;
        let mut mel_tensors = Vec::new();

        for (i, chunk) in audio.samples.chunks(chunk_samples).enumerate() {
            let mut samples = chunk.to_vec();
            samples.resize(chunk_samples, 0.0);

            let mel_data = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
            let n_mel = self.config.num_mel_bins;
            let n_frames = mel_data.len() / n_mel;

            let mel_tensor = Tensor::from_vec(mel_data, (1, n_mel, n_frames), &self.device)
                .and_then(|t| t.to_dtype(self.dtype))
                .map_err(|e| {
                    TranscriptionError::TranscriptionFailed(format!("mel tensor: {}", e))
                })?;

            let start = i as f32 * window_seconds;
            let end = (start + chunk.len() as f32 / TARGET_SAMPLE_RATE as f32)
                .min(audio.duration_seconds.max(start));
            mel_tensors.push((i, start, end, mel_tensor));
        }

        let prompt = self.prompt_tokens(language)?;
        let decoder = SegmentDecoder {
            tokenizer: &self.tokenizer,
            device: &self.device,
            prompt: &prompt,
            eot_token: token_id(&self.tokenizer, m::EOT_TOKEN)?,
            no_speech_token: self.no_speech_token(),
            no_speech_threshold,
        };

        let mut model = self.model.lock().map_err(|_| {
            TranscriptionError::TranscriptionFailed("model lock poisoned".to_string())
        })?;
        let mut segments = Vec::new();

        for (i, start, end, mel_tensor) in mel_tensors {
            tracing::debug!(segment = i, "Transcribing audio window");
            let text = decoder.decode(&mut model, &mel_tensor)?;
            if !text.is_empty() {
                segments.push(TranscriptSegment::timed(text, start, end));
            }
        }

        tracing::debug!(segments = segments.len(), "Candle Whisper decoding finished");

        Ok(EngineOutput {
            segments,
            info: AudioInfo::new(language.as_str(), 1.0, audio.duration_seconds),
        })
    }

    fn prompt_tokens(&self, language: &LanguageHint) -> Result<Vec<u32>, TranscriptionError> {
        let mut tokens = vec![token_id(&self.tokenizer, m::SOT_TOKEN)?];
        if let Some(lang) = self.tokenizer.token_to_id(&format!("<|{}|>", language.as_str())) {
            tokens.push(lang);
        }
        tokens.push(token_id(&self.tokenizer, m::TRANSCRIBE_TOKEN)?);
        tokens.push(token_id(&self.tokenizer, m::NO_TIMESTAMPS_TOKEN)?);
        Ok(tokens)
    }

    fn no_speech_token(&self) -> Option<u32> {
        m::NO_SPEECH_TOKENS
            .iter()
            .find_map(|token| self.tokenizer.token_to_id(token))
    }
}

struct SegmentDecoder<'a> {
    tokenizer: &'a Tokenizer,
    device: &'a Device,
    prompt: &'a [u32],
    eot_token: u32,
    no_speech_token: Option<u32>,
    no_speech_threshold: f32,
}

impl SegmentDecoder<'_> {
    fn decode(
        &self,
        model: &mut m::model::Whisper,
        mel: &Tensor,
    ) -> Result<String, TranscriptionError> {
        let audio_features = model
            .encoder
            .forward(mel, true)
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("encoder: {}", e)))?;

        let mut tokens = self.prompt.to_vec();
        let mut decoded_text = String::new();

        for step in 0..MAX_DECODE_TOKENS {
            let token_tensor = Tensor::new(tokens.as_slice(), self.device)
                .and_then(|t| t.unsqueeze(0))
                .map_err(failed)?;

            let decoder_output = model
                .decoder
                .forward(&token_tensor, &audio_features, step == 0)
                .map_err(|e| TranscriptionError::TranscriptionFailed(format!("decoder: {}", e)))?;

            let logits = model
                .decoder
                .final_linear(&decoder_output.squeeze(0).map_err(failed)?)
                .map_err(|e| TranscriptionError::TranscriptionFailed(format!("linear: {}", e)))?;

            if step == 0 && self.is_silent(&logits)? {
                tracing::debug!("Window classified as no speech");
                break;
            }

            let seq_len = logits.dim(0).map_err(failed)?;
            let next_token = logits
                .get(seq_len - 1)
                .and_then(|l| l.argmax(0))
                .and_then(|t| t.to_scalar::<u32>())
                .map_err(failed)?;

            if next_token == self.eot_token {
                break;
            }

            tokens.push(next_token);

            if let Some(text) = self.tokenizer.id_to_token(next_token) {
                decoded_text.push_str(&text.replace('Ġ', " ").replace('▁', " "));
            }
        }

        model.reset_kv_cache();

        Ok(decoded_text.trim().to_string())
    }

    fn is_silent(&self, logits: &Tensor) -> Result<bool, TranscriptionError> {
        let Some(no_speech_token) = self.no_speech_token else {
            return Ok(false);
        };
        let probability = logits
            .get(0)
            .and_then(|first| first.to_dtype(DType::F32))
            .and_then(|first| candle_nn::ops::softmax(&first, 0))
            .and_then(|probs| probs.get(no_speech_token as usize))
            .and_then(|p| p.to_scalar::<f32>())
            .map_err(failed)?;
        Ok(probability > self.no_speech_threshold)
    }
}

fn failed(e: candle_core::Error) -> TranscriptionError {
    TranscriptionError::TranscriptionFailed(e.to_string())
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, TranscriptionError> {
    tokenizer.token_to_id(token).ok_or_else(|| {
        TranscriptionError::TranscriptionFailed(format!("token not found: {}", token))
    })
}

fn read_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, TranscriptionError> {
    let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(TranscriptionError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    let filters: Vec<f32> = bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    Ok(filters)
}
