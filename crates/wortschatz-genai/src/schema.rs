use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use wortschatz_types::{Gender, PartOfSpeech, WordDraft};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: Value,
}

impl GenerateContentRequest {
    pub fn text(prompt: String, generation_config: Value) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt),
                    inline_data: None,
                }],
            }],
            generation_config,
        }
    }
}

#[derive(Serialize, Deserialize, Default)]
pub(crate) struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    #[serde(default)]
    pub mime_type: Option<String>,
    pub data: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> Option<&[Part]> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
    }

    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()?
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }

    pub fn inline_data(&self) -> Option<&InlineData> {
        self.first_parts()?.iter().find_map(|p| p.inline_data.as_ref())
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }
}

/// Gender as the service may answer it, `none` included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistGender {
    Der,
    Die,
    Das,
    None,
}

/// Structured completion returned for an assist request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistPayload {
    pub source_term: String,
    pub translation: String,
    pub part_of_speech: PartOfSpeech,
    #[serde(default)]
    pub grammatical_gender: Option<AssistGender>,
    pub example_sentence: String,
    pub example_translation: String,
}

impl From<AssistPayload> for WordDraft {
    fn from(payload: AssistPayload) -> Self {
        let grammatical_gender = match payload.grammatical_gender {
            Some(AssistGender::Der) => Some(Gender::Der),
            Some(AssistGender::Die) => Some(Gender::Die),
            Some(AssistGender::Das) => Some(Gender::Das),
            Some(AssistGender::None) | None => None,
        };

        WordDraft {
            source_term: Some(payload.source_term),
            translation: Some(payload.translation),
            part_of_speech: Some(payload.part_of_speech),
            grammatical_gender,
            example_sentence: Some(payload.example_sentence),
            example_translation: Some(payload.example_translation),
        }
    }
}

/// Response schema sent with assist requests.
pub(crate) fn assist_response_schema() -> Value {
    let parts_of_speech: Vec<&str> = PartOfSpeech::ALL.iter().map(|p| p.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "sourceTerm": { "type": "STRING" },
            "translation": { "type": "STRING" },
            "partOfSpeech": { "type": "STRING", "enum": parts_of_speech },
            "grammaticalGender": { "type": "STRING", "enum": ["der", "die", "das", "none"] },
            "exampleSentence": { "type": "STRING" },
            "exampleTranslation": { "type": "STRING" }
        },
        "required": [
            "sourceTerm",
            "translation",
            "partOfSpeech",
            "exampleSentence",
            "exampleTranslation"
        ]
    })
}

/// Reads `rate=N` from a mime type such as `audio/L16;codec=pcm;rate=24000`.
pub(crate) fn sample_rate_from_mime(mime: &str) -> Option<u32> {
    mime.split(';')
        .filter_map(|param| param.trim().split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("rate"))
        .and_then(|(_, value)| value.trim().parse().ok())
}
