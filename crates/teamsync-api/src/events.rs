//! Handler for `GET /events`: store notifications as Server-Sent Events.
//!
//! Each frame's event name is the [`TeamEvent`] kind (`status_changed` or
//! `appended`) and its data is the JSON-encoded event. Subscribers that fall
//! too far behind skip the missed frames and carry on.

use std::convert::Infallible;

use axum::{
  extract::State,
  response::sse::{Event, KeepAlive, Sse},
};
use teamsync_core::{advisory::TextGenerator, event::TeamEvent, store::TeamStore};
use tokio_stream::{
  Stream, StreamExt as _,
  wrappers::{BroadcastStream, errors::BroadcastStreamRecvError},
};

use crate::ApiState;

/// `GET /events`
pub async fn stream<S, G>(
  State(state): State<ApiState<S, G>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static>
where
  S: TeamStore + 'static,
  G: TextGenerator + 'static,
{
  let frames = BroadcastStream::new(state.store.subscribe()).filter_map(frame_for);
  Sse::new(frames).keep_alive(KeepAlive::default())
}

fn frame_for(
  msg: Result<TeamEvent, BroadcastStreamRecvError>,
) -> Option<Result<Event, Infallible>> {
  match msg {
    Ok(event) => to_frame(&event).map(Ok),
    Err(BroadcastStreamRecvError::Lagged(skipped)) => {
      tracing::warn!(skipped, "event subscriber lagged");
      None
    }
  }
}

fn to_frame(event: &TeamEvent) -> Option<Event> {
  let name = match event {
    TeamEvent::StatusChanged { .. } => "status_changed",
    TeamEvent::Appended { .. } => "appended",
  };
  Event::default().event(name).json_data(event).ok()
}

#[cfg(test)]
mod tests {
  use axum::response::IntoResponse;
  use chrono::{TimeZone, Utc};
  use teamsync_core::log::{LogEntry, Role};
  use tokio_stream::StreamExt as _;

  use super::*;

  fn appended(sequence: u64) -> TeamEvent {
    TeamEvent::Appended {
      entry: LogEntry {
        sequence,
        role: Role::User,
        content: "[박민수] 도착".into(),
        recorded_at: Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap(),
      },
    }
  }

  async fn render(msgs: Vec<Result<TeamEvent, BroadcastStreamRecvError>>) -> String {
    let frames = tokio_stream::iter(msgs).filter_map(frame_for);
    let resp = Sse::new(frames).into_response();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  #[tokio::test]
  async fn frame_is_named_after_the_event_kind() {
    let text = render(vec![Ok(appended(7))]).await;
    assert!(text.starts_with("event: appended\n"), "{text}");
    assert!(text.contains(r#""kind":"appended""#), "{text}");
    assert!(text.contains(r#""sequence":7"#), "{text}");
  }

  #[tokio::test]
  async fn lag_is_skipped_and_the_stream_continues() {
    let msgs = vec![
      Ok(appended(1)),
      Err(BroadcastStreamRecvError::Lagged(40)),
      Ok(appended(42)),
    ];
    let text = render(msgs).await;
    assert_eq!(text.matches("event: appended").count(), 2, "{text}");
    assert!(text.contains(r#""sequence":1"#));
    assert!(text.contains(r#""sequence":42"#));
  }

  #[test]
  fn lagged_message_yields_no_frame() {
    assert!(frame_for(Err(BroadcastStreamRecvError::Lagged(3))).is_none());
    assert!(matches!(frame_for(Ok(appended(1))), Some(Ok(_))));
  }
}
