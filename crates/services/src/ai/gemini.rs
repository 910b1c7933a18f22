use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use reqwest::Client;
use reqwest_eventsource::{Error as EventSourceError, Event, EventSource};
use serde::{Deserialize, Serialize};
use tracing::debug;

use flashdeck_core::generation::ChunkAccumulator;

use super::{GenerationOptions, TextModel};
use crate::error::ModelError;

/// Gemini `streamGenerateContent` backend.
///
/// The reply is delivered as server-sent events, each holding one text
/// fragment; fragments are joined in arrival order before returning.
/// The event source is closed once the stream ends, so the prompt is never
/// re-sent by a reconnect.
#[derive(Clone)]
pub struct GeminiModel {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiModel {
    #[must_use]
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{model}:streamGenerateContent", self.base_url)
    }
}

#[async_trait]
impl TextModel for GeminiModel {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ModelError> {
        let payload = StreamRequest::new(prompt, options);

        let request = self
            .client
            .post(self.endpoint(&options.model))
            .query(&[("alt", "sse")])
            .header("x-goog-api-key", &self.api_key)
            .json(&payload);

        let mut events =
            EventSource::new(request).map_err(|err| ModelError::Stream(err.to_string()))?;
        let collected = collect_fragments(&mut events).await;
        events.close();
        let text = collected?;

        debug!(fragments = text.chunk_count(), "gemini stream finished");
        Ok(text.finish())
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

//
// ─── REQUEST ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StreamRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

impl<'a> StreamRequest<'a> {
    fn new(prompt: &'a str, options: &GenerationOptions) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_output_tokens,
                response_mime_type: "text/plain",
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

//
// ─── RESPONSE STREAM ───────────────────────────────────────────────────────────
//

#[derive(Debug, Default, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl StreamChunk {
    // Only the first candidate is read; fragments without text contribute "".
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Read text fragments until the server ends the stream.
async fn collect_fragments<S>(events: &mut S) -> Result<ChunkAccumulator, ModelError>
where
    S: Stream<Item = Result<Event, EventSourceError>> + Unpin,
{
    let mut text = ChunkAccumulator::new();
    while let Some(event) = events.next().await {
        match event {
            Ok(Event::Open) => {}
            Ok(Event::Message(message)) => {
                let chunk: StreamChunk = serde_json::from_str(&message.data)?;
                text.push(&chunk.into_text());
            }
            Err(EventSourceError::StreamEnded) => break,
            Err(err) => return Err(stream_error(err)),
        }
    }
    Ok(text)
}

fn stream_error(err: EventSourceError) -> ModelError {
    match err {
        EventSourceError::InvalidStatusCode(status, _) => ModelError::HttpStatus(status),
        EventSourceError::Transport(err) => ModelError::Http(err),
        other => ModelError::Stream(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use eventsource_stream::Event as MessageEvent;
    use futures_util::stream;

    use super::*;

    fn raw(data: &str) -> Result<Event, EventSourceError> {
        Ok(Event::Message(MessageEvent {
            event: "message".into(),
            data: data.into(),
            id: String::new(),
            retry: None,
        }))
    }

    fn message(text: &str) -> Result<Event, EventSourceError> {
        let data = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}]
        });
        raw(&data.to_string())
    }

    #[test]
    fn request_uses_camel_case_generation_config() {
        let options = GenerationOptions {
            model: "gemini-2.0-flash-lite".into(),
            temperature: 0.7,
            max_output_tokens: 2000,
        };
        let body = serde_json::to_value(StreamRequest::new("hello", &options)).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 2000);
        assert_eq!(body["generationConfig"]["responseMimeType"], "text/plain");
    }

    #[test]
    fn endpoint_names_the_model() {
        let model = GeminiModel::new("https://example.test/v1beta/", "k");
        assert_eq!(
            model.endpoint("gemini-2.0-flash-lite"),
            "https://example.test/v1beta/models/gemini-2.0-flash-lite:streamGenerateContent"
        );
    }

    #[tokio::test]
    async fn fragments_are_joined_in_arrival_order() {
        let mut events = stream::iter(vec![
            Ok(Event::Open),
            message("[{\"id\":"),
            message("\"1\"}"),
            message("]"),
            Err(EventSourceError::StreamEnded),
        ]);
        let text = collect_fragments(&mut events).await.unwrap();
        assert_eq!(text.chunk_count(), 3);
        assert_eq!(text.finish(), "[{\"id\":\"1\"}]");
    }

    #[tokio::test]
    async fn event_without_text_contributes_nothing() {
        let mut events = stream::iter(vec![
            message("tail"),
            raw(r#"{"candidates":[{"finishReason":"STOP"}]}"#),
        ]);
        let text = collect_fragments(&mut events).await.unwrap();
        assert_eq!(text.chunk_count(), 2);
        assert_eq!(text.finish(), "tail");
    }

    #[tokio::test]
    async fn garbage_event_data_is_a_decode_error() {
        let mut events = stream::iter(vec![raw("not json")]);
        let err = collect_fragments(&mut events).await.unwrap_err();
        assert!(matches!(err, ModelError::Decode(_)));
    }

    #[tokio::test]
    async fn stream_failure_stops_collection() {
        let mut events = stream::iter(vec![
            message("partial"),
            Err(EventSourceError::InvalidLastEventId("\0".into())),
            message("never read"),
        ]);
        let err = collect_fragments(&mut events).await.unwrap_err();
        assert!(matches!(err, ModelError::Stream(_)));
    }
}
