//! Outbound response envelope
//!
//! The only structure ever handed back to the voice platform. Values are
//! built once per turn and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Opaque session state round-tripped between request and response
pub type SessionAttributes = serde_json::Map<String, serde_json::Value>;

/// Top-level response document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// Response protocol version
    pub version: String,
    /// Session attributes to keep for the next turn
    pub session_attributes: SessionAttributes,
    /// The speech, card and session-continuation payload
    pub response: SpeechletResponse,
}

/// Spoken text, visual card and reprompt for a single turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechletResponse {
    /// What the device says
    pub output_speech: OutputSpeech,
    /// What the companion app shows
    pub card: Card,
    /// What the device says if the user stays silent
    pub reprompt: Reprompt,
    /// Whether the conversation is over after this turn
    pub should_end_session: bool,
}

impl SpeechletResponse {
    /// The spoken text of this response
    #[must_use]
    pub fn speech_text(&self) -> &str {
        &self.output_speech.text
    }
}

/// Kind of speech output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeechType {
    /// Unformatted text
    PlainText,
}

/// A piece of speech
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpeech {
    /// Speech format
    #[serde(rename = "type")]
    pub kind: SpeechType,
    /// Text to speak
    pub text: String,
}

impl OutputSpeech {
    /// Create plain-text speech
    #[must_use]
    pub fn plain_text(text: impl Into<String>) -> Self {
        Self {
            kind: SpeechType::PlainText,
            text: text.into(),
        }
    }
}

/// Kind of card shown in the companion app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardType {
    /// Title plus plain content
    Simple,
}

/// Visual card accompanying the speech
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card layout
    #[serde(rename = "type")]
    pub kind: CardType,
    /// Card title
    pub title: String,
    /// Card body
    pub content: String,
}

/// Speech used when the user does not answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    /// Reprompt speech
    pub output_speech: OutputSpeech,
}
