//! Response construction
//!
//! Pure constructors for the speechlet response and the envelope around it.

use domain::{
    Card, CardType, OutputSpeech, Reprompt, ResponseEnvelope, SessionAttributes, SpeechletResponse,
};

/// Protocol version stamped on every envelope
pub const RESPONSE_VERSION: &str = "0.1";

/// Label prefixed to card titles and card content
pub const CARD_SECTION_LABEL: &str = "SessionSpeechlet";

/// Build a plain-text speechlet response with a simple card
#[must_use]
pub fn build_speechlet_response(
    title: &str,
    output: &str,
    reprompt: &str,
    should_end_session: bool,
) -> SpeechletResponse {
    SpeechletResponse {
        output_speech: OutputSpeech::plain_text(output),
        card: Card {
            kind: CardType::Simple,
            title: format!("{CARD_SECTION_LABEL} - {title}"),
            content: format!("{CARD_SECTION_LABEL} - {output}"),
        },
        reprompt: Reprompt {
            output_speech: OutputSpeech::plain_text(reprompt),
        },
        should_end_session,
    }
}

/// Wrap a speechlet response into the envelope returned to the platform
#[must_use]
pub fn build_envelope(
    session_attributes: SessionAttributes,
    response: SpeechletResponse,
) -> ResponseEnvelope {
    ResponseEnvelope {
        version: RESPONSE_VERSION.to_string(),
        session_attributes,
        response,
    }
}
