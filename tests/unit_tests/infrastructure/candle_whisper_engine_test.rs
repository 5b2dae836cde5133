use candle_core::{DType, Device};
use whisper_gateway::infrastructure::audio::CandleWhisperEngine;

#[test]
fn given_cpu_device_when_selecting_dtype_then_returns_f32() {
    let dtype = CandleWhisperEngine::select_dtype(&Device::Cpu);
    assert!(matches!(dtype, DType::F32));
}

#[test]
fn given_cpu_name_when_selecting_device_then_returns_cpu() {
    assert!(CandleWhisperEngine::select_device("cpu").is_cpu());
    assert!(CandleWhisperEngine::select_device("CPU").is_cpu());
}

#[test]
fn given_unknown_device_name_when_selecting_device_then_falls_back_to_cpu() {
    assert!(CandleWhisperEngine::select_device("tpu").is_cpu());
}

#[test]
fn given_metal_name_when_selecting_device_then_uses_matching_dtype() {
    let device = CandleWhisperEngine::select_device("metal");
    let expected = if device.is_cpu() {
        DType::F32
    } else {
        DType::F16
    };
    assert_eq!(CandleWhisperEngine::select_dtype(&device), expected);
}

fn assert_shareable_across_threads<T: Send + Sync + 'static>() {}

#[test]
fn given_engine_type_when_shared_with_blocking_pool_then_is_send_and_sync() {
    assert_shareable_across_threads::<CandleWhisperEngine>();
}
