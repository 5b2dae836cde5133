mod base64_audio_test;
mod envelope_test;
mod settings_test;
