use whisper_gateway::application::ports::AudioStore;
use whisper_gateway::domain::{AudioFormat, AudioPayload};
use whisper_gateway::infrastructure::storage::TempAudioStore;

use crate::helpers::staged_files;

#[tokio::test]
async fn given_payload_when_staged_then_file_holds_bytes_with_format_suffix() {
    let dir = tempfile::tempdir().unwrap();
    let store = TempAudioStore::new(dir.path().to_path_buf()).unwrap();
    let payload = AudioPayload::new(vec![1, 2, 3, 4], AudioFormat::from_hint("ogg", "webm")).unwrap();

    let staged = store.stage(&payload).await.unwrap();

    assert_eq!(std::fs::read(staged.path()).unwrap(), vec![1, 2, 3, 4]);
    assert_eq!(
        staged.path().extension().and_then(|e| e.to_str()),
        Some("ogg")
    );
    assert!(staged.path().starts_with(dir.path()));
}

#[tokio::test]
async fn given_staged_audio_when_released_then_file_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let store = TempAudioStore::new(dir.path().to_path_buf()).unwrap();
    let payload = AudioPayload::new(vec![5; 16], AudioFormat::default()).unwrap();

    let staged = store.stage(&payload).await.unwrap();
    let path = staged.path().to_path_buf();
    staged.release();

    assert!(!path.exists());
    assert!(staged_files(dir.path()).is_empty());
}

#[tokio::test]
async fn given_staged_audio_when_dropped_then_file_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let store = TempAudioStore::new(dir.path().to_path_buf()).unwrap();
    let payload = AudioPayload::new(vec![5; 16], AudioFormat::default()).unwrap();

    let path = {
        let staged = store.stage(&payload).await.unwrap();
        staged.path().to_path_buf()
    };

    assert!(!path.exists());
}

#[tokio::test]
async fn given_file_already_deleted_when_released_then_does_not_panic() {
    let dir = tempfile::tempdir().unwrap();
    let store = TempAudioStore::new(dir.path().to_path_buf()).unwrap();
    let payload = AudioPayload::new(vec![5; 16], AudioFormat::default()).unwrap();

    let staged = store.stage(&payload).await.unwrap();
    std::fs::remove_file(staged.path()).unwrap();

    staged.release();
}

#[test]
fn given_missing_directory_when_creating_store_then_creates_it() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");

    TempAudioStore::new(nested.clone()).unwrap();

    assert!(nested.is_dir());
}
