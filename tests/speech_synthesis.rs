//! Speech synthesis against a mock text-to-speech endpoint.

mod common;

use common::{silent_mp3, MockServerFixture};
use elevenlabs_nodes::audio::decode_mp3;
use elevenlabs_nodes::{Error, ModelId};
use mockito::Matcher;

#[tokio::test]
async fn test_hello_decodes_to_batch_channel_samples() {
    let mut fx = MockServerFixture::new().await;
    let mp3 = silent_mp3(20);
    let reference = decode_mp3(mp3.clone()).unwrap();
    let mock = fx
        .server
        .mock("POST", "/v1/text-to-speech/abc123")
        .match_header("xi-api-key", "test-key")
        .match_query(Matcher::UrlEncoded(
            "output_format".into(),
            "mp3_44100_128".into(),
        ))
        .match_body(Matcher::Json(serde_json::json!({
            "text": "hello",
            "model_id": "eleven_turbo_v2"
        })))
        .with_status(200)
        .with_header("content-type", "audio/mpeg")
        .with_body(mp3)
        .expect(1)
        .create_async()
        .await;

    let audio = fx
        .client()
        .speech_synthesis()
        .synthesize("test-key", "hello", "abc123", ModelId::ElevenTurboV2)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(audio.shape(), [1, 1, reference.samples.len()]);
    assert_eq!(audio.sample_rate(), reference.sample_rate);
    assert_eq!(audio.sample_rate(), 44_100);
}

#[tokio::test]
async fn test_voice_id_is_path_encoded() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx.mock_tts("id%20with%20space", 200, silent_mp3(3), 1).await;

    fx.client()
        .speech_synthesis()
        .synthesize("test-key", "hi", "id with space", ModelId::default())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_blank_credentials_never_reach_server() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx.mock_tts("abc123", 200, silent_mp3(3), 0).await;
    let tts = fx.client().speech_synthesis();

    let err = tts
        .synthesize("", "hello", "abc123", ModelId::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));

    let err = tts
        .synthesize("test-key", "hello", "\t", ModelId::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_undecodable_audio_is_retried_then_surfaced() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .mock_tts("abc123", 200, b"this is not an mp3 stream".to_vec(), 3)
        .await;

    let err = fx
        .client()
        .speech_synthesis()
        .synthesize("test-key", "hello", "abc123", ModelId::default())
        .await
        .unwrap_err();

    mock.assert_async().await;
    match err {
        Error::RetriesExhausted {
            operation,
            attempts,
            source,
        } => {
            assert_eq!(operation, "speech synthesis");
            assert_eq!(attempts, 3);
            assert!(matches!(*source, Error::Decode { .. }));
        }
        other => panic!("expected exhausted retries, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_is_retried() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .mock_tts("abc123", 401, br#"{"detail":"invalid api key"}"#.to_vec(), 3)
        .await;

    let err = fx
        .client()
        .speech_synthesis()
        .synthesize("test-key", "hello", "abc123", ModelId::default())
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert_eq!(err.attempts(), Some(3));
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_empty_body_is_a_synthesis_error() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx.mock_tts("abc123", 200, Vec::new(), 3).await;

    let err = fx
        .client()
        .speech_synthesis()
        .synthesize("test-key", "hello", "abc123", ModelId::default())
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(matches!(
        err,
        Error::RetriesExhausted { ref source, .. } if matches!(**source, Error::Synthesis { .. })
    ));
}
