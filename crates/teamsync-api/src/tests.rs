//! Router tests against an in-memory store.

use std::{sync::Arc, time::Duration};

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use teamsync_core::{advisory::TextGenerator, dispatch, member::default_team};
use teamsync_store_memory::{EVENT_CAPACITY, MemoryStore};
use tokio_stream::StreamExt as _;
use tower::ServiceExt as _;

use crate::api_router;

/// Replies with a fixed text, or fails when `reply` is `None`.
struct Canned {
  reply: Option<&'static str>,
}

impl TextGenerator for Canned {
  type Error = std::io::Error;

  async fn generate(&self, _prompt: String) -> Result<String, Self::Error> {
    self
      .reply
      .map(str::to_owned)
      .ok_or_else(|| std::io::Error::other("quota exhausted"))
  }
}

const LEE_YOUNGHEE: &str = "%EC%9D%B4%EC%98%81%ED%9D%AC";

struct Harness {
  store:   Arc<MemoryStore>,
  advisor: Arc<Canned>,
}

impl Harness {
  fn new(reply: Option<&'static str>) -> Self {
    Self {
      store:   Arc::new(MemoryStore::new(default_team()).unwrap()),
      advisor: Arc::new(Canned { reply }),
    }
  }

  fn router(&self) -> Router { api_router(self.store.clone(), self.advisor.clone()) }

  async fn call(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(b) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(b.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    let resp = self.router().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
  }
}

// ── Members ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn lists_members_in_seed_order() {
  let h = Harness::new(None);
  let (status, body) = h.call("GET", "/members", None).await;
  assert_eq!(status, StatusCode::OK);
  let names: Vec<_> = body
    .as_array()
    .unwrap()
    .iter()
    .map(|m| m["name"].as_str().unwrap().to_string())
    .collect();
  assert_eq!(names, ["김철수", "이영희", "박민수"]);
  assert_eq!(body[0]["is_admin"], json!(true));
}

#[tokio::test]
async fn gets_one_member_by_encoded_name() {
  let h = Harness::new(None);
  let (status, body) = h.call("GET", &format!("/members/{LEE_YOUNGHEE}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["name"], "이영희");
  assert_eq!(body["status"], "in_meeting");
}

#[tokio::test]
async fn unknown_member_is_404_not_found() {
  let h = Harness::new(None);
  let (status, body) = h.call("GET", "/members/nobody", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn statuses_lists_the_fixed_set() {
  let h = Harness::new(None);
  let (status, body) = h.call("GET", "/statuses", None).await;
  assert_eq!(status, StatusCode::OK);
  let options = body.as_array().unwrap();
  assert_eq!(options.len(), 5);
  assert_eq!(options[2], json!({ "status": "out_of_office", "label": "외근" }));
}

// ── Status ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn status_change_is_visible_to_later_reads() {
  let h = Harness::new(None);
  let (status, body) = h
    .call("POST", "/status", Some(json!({ "actor": "이영희", "status": "외근" })))
    .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], "out_of_office");

  let (_, member) = h.call("GET", &format!("/members/{LEE_YOUNGHEE}"), None).await;
  assert_eq!(member["status"], "out_of_office");
  assert_eq!(member["last_updated"], body["last_updated"]);
}

#[tokio::test]
async fn invalid_status_is_422() {
  let h = Harness::new(None);
  let (status, body) = h
    .call("POST", "/status", Some(json!({ "actor": "이영희", "status": "napping" })))
    .await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(body["error"], "invalid_status");
}

#[tokio::test]
async fn malformed_body_is_400_with_json_error() {
  let h = Harness::new(None);
  let (status, body) = h.call("POST", "/status", Some(json!({ "actor": "이영희" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "bad_request");
  assert!(body["message"].as_str().unwrap().contains("status"), "{body}");

  let (status, body) = h.call("POST", "/message", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "bad_request");

  let (_, log) = h.call("GET", "/log", None).await;
  assert_eq!(log, json!([]));
}

#[tokio::test]
async fn unknown_actor_is_404() {
  let h = Harness::new(None);
  let (status, body) = h
    .call("POST", "/status", Some(json!({ "actor": "누군가", "status": "away" })))
    .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "unknown_actor");
}

// ── Support ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn support_request_creates_system_entry() {
  let h = Harness::new(None);
  let (status, body) = h
    .call("POST", "/support", Some(json!({ "actor": "김철수", "target": "이영희" })))
    .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["role"], "system");
  assert_eq!(body["sequence"], 1);
  let content = body["content"].as_str().unwrap();
  assert!(content.contains("김철수") && content.contains("이영희"));
}

#[tokio::test]
async fn support_request_against_admin_is_403_and_logs_nothing() {
  let h = Harness::new(None);
  let (status, body) = h
    .call("POST", "/support", Some(json!({ "actor": "누군가", "target": "김철수" })))
    .await;
  assert_eq!(status, StatusCode::FORBIDDEN);
  assert_eq!(body["error"], "admin_not_targetable");

  let (_, log) = h.call("GET", "/log", None).await;
  assert_eq!(log, json!([]));
}

#[tokio::test]
async fn support_request_against_unknown_target_is_404() {
  let h = Harness::new(None);
  let (status, body) = h
    .call("POST", "/support", Some(json!({ "actor": "김철수", "target": "nobody" })))
    .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "unknown_target");
}

// ── Log ───────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn messages_and_photos_append_in_order() {
  let h = Harness::new(None);
  let (status, _) = h
    .call("POST", "/message", Some(json!({ "actor": "박민수", "content": "도착" })))
    .await;
  assert_eq!(status, StatusCode::CREATED);
  let (status, _) = h.call("POST", "/photo", Some(json!({ "actor": "박민수" }))).await;
  assert_eq!(status, StatusCode::CREATED);

  let (_, log) = h.call("GET", "/log", None).await;
  assert_eq!(log[0]["content"], "[박민수] 도착");
  assert_eq!(log[0]["role"], "user");
  assert_eq!(log[1]["content"], "박민수님이 사진을 공유했습니다.");

  let (_, tail) = h.call("GET", "/log?after=1", None).await;
  assert_eq!(tail.as_array().unwrap().len(), 1);
  assert_eq!(tail[0]["sequence"], 2);
}

#[tokio::test]
async fn empty_message_is_422() {
  let h = Harness::new(None);
  let (status, body) = h
    .call("POST", "/message", Some(json!({ "actor": "박민수", "content": "  " })))
    .await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(body["error"], "empty_message");
}

// ── Advisory ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn advisory_returns_generator_text() {
  let h = Harness::new(Some("점심 이후 회의를 잡으세요."));
  let (status, body) = h.call("POST", "/advisory", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "text": "점심 이후 회의를 잡으세요." }));
}

#[tokio::test]
async fn advisory_failure_is_503() {
  let h = Harness::new(None);
  let (status, body) = h.call("POST", "/advisory", None).await;
  assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
  assert_eq!(body["error"], "advisory_unavailable");
  assert!(body["message"].as_str().unwrap().contains("quota exhausted"));
}

// ── Events ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn events_endpoint_is_an_event_stream() {
  let h = Harness::new(None);
  let req = Request::builder().uri("/events").body(Body::empty()).unwrap();
  let resp = h.router().oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  let ct = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
  assert!(ct.starts_with("text/event-stream"), "Content-Type: {ct}");
}

async fn first_frame(body: Body) -> String {
  let mut chunks = body.into_data_stream();
  let chunk = tokio::time::timeout(Duration::from_secs(5), chunks.next())
    .await
    .expect("frame within timeout")
    .expect("stream open")
    .unwrap();
  String::from_utf8(chunk.to_vec()).unwrap()
}

#[tokio::test]
async fn events_endpoint_streams_log_appends() {
  let h = Harness::new(None);
  let req = Request::builder().uri("/events").body(Body::empty()).unwrap();
  let resp = h.router().oneshot(req).await.unwrap();

  let entry = dispatch::post_message(h.store.as_ref(), "박민수", "도착")
    .await
    .unwrap();

  let frame = first_frame(resp.into_body()).await;
  assert!(frame.starts_with("event: appended\n"), "{frame}");
  let data = frame
    .lines()
    .find_map(|l| l.strip_prefix("data: "))
    .unwrap();
  let event: Value = serde_json::from_str(data).unwrap();
  assert_eq!(event["kind"], "appended");
  assert_eq!(event["entry"]["sequence"], entry.sequence);
  assert_eq!(event["entry"]["content"], "[박민수] 도착");
}

#[tokio::test]
async fn events_endpoint_streams_status_changes() {
  let h = Harness::new(None);
  let req = Request::builder().uri("/events").body(Body::empty()).unwrap();
  let resp = h.router().oneshot(req).await.unwrap();

  let (status, _) = h
    .call("POST", "/status", Some(json!({ "actor": "이영희", "status": "away" })))
    .await;
  assert_eq!(status, StatusCode::OK);

  let frame = first_frame(resp.into_body()).await;
  assert!(frame.starts_with("event: status_changed\n"), "{frame}");
  assert!(frame.contains(r#""name":"이영희""#), "{frame}");
}

#[tokio::test]
async fn lagging_subscriber_resumes_at_oldest_retained_event() {
  let h = Harness::new(None);
  let req = Request::builder().uri("/events").body(Body::empty()).unwrap();
  let resp = h.router().oneshot(req).await.unwrap();

  let total = EVENT_CAPACITY as u64 + 44;
  for i in 0..total {
    dispatch::post_message(h.store.as_ref(), "박민수", &format!("m{i}"))
      .await
      .unwrap();
  }

  let frame = first_frame(resp.into_body()).await;
  let oldest = total - EVENT_CAPACITY as u64 + 1;
  assert!(frame.contains(&format!(r#""sequence":{oldest},"#)), "{frame}");
}
