use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use wortschatz_config::genai::GenAiConfig;
use wortschatz_types::WordDraft;

use crate::schema::{
    AssistPayload, GenerateContentRequest, GenerateContentResponse, assist_response_schema,
    sample_rate_from_mime,
};
use crate::{EntryAssistant, GenAiError, SpeechClip, SpeechSynthesizer};

const DEFAULT_SAMPLE_RATE: u32 = 24_000;

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    text_model: String,
    speech_model: String,
    voice: String,
    source_language: String,
    learner_language: String,
    /// Used when the audio mime type carries no `rate=`
    fallback_sample_rate: u32,
}

impl GeminiClient {
    pub fn new(config: &GenAiConfig) -> Result<Self, GenAiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            speech_model: config.speech_model.clone(),
            voice: config.voice.clone(),
            source_language: config.source_language.clone(),
            learner_language: config.learner_language.clone(),
            fallback_sample_rate: DEFAULT_SAMPLE_RATE,
        })
    }

    pub fn with_fallback_sample_rate(mut self, sample_rate: u32) -> Self {
        if sample_rate > 0 {
            self.fallback_sample_rate = sample_rate;
        }
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_url, model)
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenAiError> {
        if self.api_key.is_empty() {
            return Err(GenAiError::MissingApiKey);
        }

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == 429 {
            return Err(GenAiError::RateLimitExceeded);
        }

        if status == 401 || status == 403 {
            return Err(GenAiError::AuthenticationError);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenAiError::ApiError {
                status: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        let body = response.text().await.map_err(map_transport_error)?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn map_transport_error(e: reqwest::Error) -> GenAiError {
    if e.is_timeout() {
        GenAiError::Timeout
    } else {
        GenAiError::NetworkError(e)
    }
}

#[async_trait]
impl EntryAssistant for GeminiClient {
    async fn suggest_entry(&self, hint: &str) -> Result<WordDraft, GenAiError> {
        let prompt = format!(
            "Translate the following word/phrase into {} and provide linguistic context: \"{}\". \
             Give the translation and the example translation in {}.",
            self.source_language, hint, self.learner_language
        );
        let request = GenerateContentRequest::text(
            prompt,
            json!({
                "responseMimeType": "application/json",
                "responseSchema": assist_response_schema(),
            }),
        );

        let response = self.generate(&self.text_model, &request).await?;
        let text = response.text().ok_or_else(|| {
            GenAiError::EmptyResponse(format!(
                "no text part (finish reason: {})",
                response.finish_reason().unwrap_or("unknown")
            ))
        })?;

        let payload: AssistPayload = serde_json::from_str(&text)?;
        tracing::debug!("Assist suggested '{}' for '{}'", payload.source_term, hint);
        Ok(payload.into())
    }
}

#[async_trait]
impl SpeechSynthesizer for GeminiClient {
    async fn synthesize(&self, text: &str) -> Result<SpeechClip, GenAiError> {
        let prompt = format!("Speak naturally in {}: {}", self.source_language, text);
        let request = GenerateContentRequest::text(
            prompt,
            json!({
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": { "voiceName": self.voice }
                    }
                }
            }),
        );

        let response = self.generate(&self.speech_model, &request).await?;
        let inline = response
            .inline_data()
            .ok_or_else(|| GenAiError::EmptyResponse("no audio part".to_string()))?;

        let sample_rate = inline
            .mime_type
            .as_deref()
            .and_then(sample_rate_from_mime)
            .unwrap_or(self.fallback_sample_rate);

        Ok(SpeechClip {
            pcm_base64: inline.data.clone(),
            mime_type: inline.mime_type.clone(),
            sample_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};
    use wortschatz_types::{Gender, PartOfSpeech};

    use super::*;

    fn client(server: &MockServer) -> GeminiClient {
        let config = GenAiConfig {
            api_key: "test-key".to_string(),
            api_url: format!("{}/v1beta/", server.uri()),
            timeout_seconds: 5,
            ..GenAiConfig::default()
        };
        GeminiClient::new(&config).unwrap()
    }

    fn text_response(text: &str) -> Value {
        json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }], "role": "model" },
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn suggest_entry_sends_schema_and_parses_the_answer() {
        let server = MockServer::start().await;
        let answer = json!({
            "sourceTerm": "der Apfel",
            "translation": "apple",
            "partOfSpeech": "Noun",
            "grammaticalGender": "der",
            "exampleSentence": "Der Apfel ist rot.",
            "exampleTranslation": "The apple is red."
        });

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-3-flash-preview:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(text_response(&answer.to_string())),
            )
            .expect(1)
            .mount(&server)
            .await;

        let draft = client(&server).suggest_entry("apple").await.unwrap();
        assert_eq!(draft.source_term.as_deref(), Some("der Apfel"));
        assert_eq!(draft.part_of_speech, Some(PartOfSpeech::Noun));
        assert_eq!(draft.grammatical_gender, Some(Gender::Der));

        let requests: Vec<Request> = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("\"apple\""));
        assert!(prompt.contains("into German"));
        assert!(prompt.contains("example translation in English."));
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        let schema = &body["generationConfig"]["responseSchema"];
        assert_eq!(schema["properties"]["grammaticalGender"]["enum"][3], "none");
    }

    #[tokio::test]
    async fn suggest_entry_drops_none_gender() {
        let server = MockServer::start().await;
        let answer = json!({
            "sourceTerm": "schnell",
            "translation": "fast",
            "partOfSpeech": "Adjective",
            "grammaticalGender": "none",
            "exampleSentence": "Das Auto ist schnell.",
            "exampleTranslation": "The car is fast."
        });

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(text_response(&answer.to_string())),
            )
            .mount(&server)
            .await;

        let draft = client(&server).suggest_entry("fast").await.unwrap();
        assert_eq!(draft.grammatical_gender, None);
    }

    #[tokio::test]
    async fn malformed_answers_are_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(text_response("{\"sourceTerm\": 4")),
            )
            .mount(&server)
            .await;

        let err = client(&server).suggest_entry("x").await.unwrap_err();
        assert!(matches!(err, GenAiError::SchemaError(_)));
    }

    #[tokio::test]
    async fn http_failures_map_to_typed_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-3-flash-preview:generateContent"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash-preview-tts:generateContent"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let gemini = client(&server);
        assert!(matches!(
            gemini.suggest_entry("x").await,
            Err(GenAiError::RateLimitExceeded)
        ));
        assert!(matches!(
            gemini.synthesize("x").await,
            Err(GenAiError::ApiError { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn missing_key_fails_without_a_request() {
        let server = MockServer::start().await;
        let config = GenAiConfig {
            api_key: String::new(),
            api_url: server.uri(),
            ..GenAiConfig::default()
        };

        let err = GeminiClient::new(&config).unwrap().suggest_entry("x").await.unwrap_err();
        assert!(matches!(err, GenAiError::MissingApiKey));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn synthesize_returns_inline_audio() {
        let server = MockServer::start().await;
        let response = json!({
            "candidates": [{
                "content": { "parts": [{
                    "inlineData": {
                        "mimeType": "audio/L16;codec=pcm;rate=16000",
                        "data": "AAD/fw=="
                    }
                }]}
            }]
        });

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash-preview-tts:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .mount(&server)
            .await;

        let clip = client(&server).synthesize("Hallo").await.unwrap();
        assert_eq!(clip.pcm_base64, "AAD/fw==");
        assert_eq!(clip.sample_rate, 16_000);

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["generationConfig"]["responseModalities"][0], "AUDIO");
        let voice = &body["generationConfig"]["speechConfig"]["voiceConfig"];
        assert_eq!(voice["prebuiltVoiceConfig"]["voiceName"], "Kore");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Speak naturally in German: Hallo");
    }

    #[tokio::test]
    async fn audio_without_rate_uses_the_fallback() {
        let server = MockServer::start().await;
        let response = json!({
            "candidates": [{
                "content": { "parts": [{
                    "inlineData": { "mimeType": "audio/pcm", "data": "AAA=" }
                }]}
            }]
        });

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .mount(&server)
            .await;

        let gemini = client(&server).with_fallback_sample_rate(22_050);
        assert_eq!(gemini.synthesize("x").await.unwrap().sample_rate, 22_050);
    }

    #[tokio::test]
    async fn empty_candidates_are_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let gemini = client(&server);
        assert!(matches!(
            gemini.synthesize("x").await,
            Err(GenAiError::EmptyResponse(_))
        ));
        assert!(matches!(
            gemini.suggest_entry("x").await,
            Err(GenAiError::EmptyResponse(_))
        ));
    }
}
