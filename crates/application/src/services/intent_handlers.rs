//! Intent handlers
//!
//! Per-intent business logic: slot checks, the departure lookup and the
//! spoken answer built from its result.

use domain::{DepartureBoard, Intent, SpeechletResponse};
use tracing::{debug, info, instrument, warn};

use super::response_builder::build_speechlet_response;
use crate::{error::ApplicationError, ports::DeparturePort};

/// Departures at a station named in the `Station` slot
pub const NEXT_TRAIN_INTENT: &str = "NextTrain";
/// Departures at the user's home station
pub const NEXT_LOCAL_TRAIN_INTENT: &str = "NextLocalTrain";

/// Slot holding the station name
pub const STATION_SLOT: &str = "Station";
/// Slot holding a destination (not supported yet)
pub const DESTINATION_SLOT: &str = "Destination";

const WELCOME_CARD_TITLE: &str = "Welcome";
const STATION_CARD_TITLE: &str = "MVG Station";

const WELCOME_TEXT: &str = "Welcome to the Munich Transit Info app. \
                            You request the next train departure time for a specific station or your home station.";
const WELCOME_REPROMPT: &str = "For which station do you want to get the upcoming departures?";

const UNKNOWN_STATION_TEXT: &str = "I'm not sure which station you asked for, please try again";
const DESTINATION_UNSUPPORTED_TEXT: &str =
    "I cannot yet handle destinations. Try simply asking for the next train!";
const STATION_REPROMPT: &str =
    "I didn't get that. You can ask when the next train leaves at a station.";

const LOOKUP_FAILURE_TEXT: &str =
    "I could not receive information from the transit system, please try again later.";

/// Greeting for a launch without intent
#[must_use]
pub fn welcome_response() -> SpeechletResponse {
    build_speechlet_response(WELCOME_CARD_TITLE, WELCOME_TEXT, WELCOME_REPROMPT, false)
}

/// Handle `NextTrain`
///
/// Asks again when no station was understood and refuses destinations,
/// both without contacting the provider.
#[instrument(skip(intent, departures), fields(intent = %intent.name))]
pub async fn station_departures(
    intent: &Intent,
    departures: &dyn DeparturePort,
) -> Result<SpeechletResponse, ApplicationError> {
    let Some(station) = intent.slot_value(STATION_SLOT) else {
        debug!("No station slot, asking again");
        return Ok(build_speechlet_response(
            STATION_CARD_TITLE,
            UNKNOWN_STATION_TEXT,
            STATION_REPROMPT,
            false,
        ));
    };

    if intent.has_slot(DESTINATION_SLOT) {
        debug!(%station, "Destination slot present, not supported");
        return Ok(build_speechlet_response(
            STATION_CARD_TITLE,
            DESTINATION_UNSUPPORTED_TEXT,
            STATION_REPROMPT,
            false,
        ));
    }

    lookup_and_format(departures, station).await
}

/// Handle `NextLocalTrain`
///
/// Slots are ignored; the lookup always targets `home_station`.
#[instrument(skip(departures))]
pub async fn local_departures(
    departures: &dyn DeparturePort,
    home_station: &str,
) -> Result<SpeechletResponse, ApplicationError> {
    lookup_and_format(departures, home_station).await
}

/// Turn a departure board into the spoken answer
///
/// Only the soonest departure is read out. A board without a station or
/// without departures yields the lookup failure answer.
#[must_use]
pub fn format_departure_result(board: &DepartureBoard) -> SpeechletResponse {
    let (Some(station), Some(next)) = (board.station_name(), board.next_departure()) else {
        return lookup_failure_response();
    };

    let output = format!(
        "The next train at {station} is the {} to {} and leaves in {} minutes.",
        next.line, next.destination, next.minutes
    );
    build_speechlet_response(STATION_CARD_TITLE, &output, STATION_REPROMPT, true)
}

/// Apology spoken when the transit system gave no usable answer
#[must_use]
pub fn lookup_failure_response() -> SpeechletResponse {
    build_speechlet_response(STATION_CARD_TITLE, LOOKUP_FAILURE_TEXT, STATION_REPROMPT, true)
}

async fn lookup_and_format(
    departures: &dyn DeparturePort,
    station: &str,
) -> Result<SpeechletResponse, ApplicationError> {
    match departures.departures(station).await {
        Ok(board) => {
            info!(
                %station,
                resolved = ?board.station_name(),
                count = board.departures.len(),
                "Departures received"
            );
            Ok(format_departure_result(&board))
        },
        Err(ApplicationError::LookupFailure(reason)) => {
            warn!(%station, %reason, "Departure lookup failed");
            Ok(lookup_failure_response())
        },
        Err(e) => Err(e),
    }
}
