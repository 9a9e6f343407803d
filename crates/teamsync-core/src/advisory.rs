//! Advisory summarizer: turns a registry snapshot into a prompt for an
//! external text generator and hands back whatever it says.
//!
//! The reply is opaque. It is never parsed, trimmed or checked here, and it
//! is never written back into the registry or the log.

use std::{fmt::Write as _, future::Future};

use tracing::{debug, warn};

use crate::{Error, Result, member::MemberRecord, store::TeamStore};

const INSTRUCTION: &str =
  "다음 팀원들의 현황을 보고 협업을 위한 짧은 조언을 해줘:";

/// A remote service that completes a prompt. Possibly slow, possibly down.
pub trait TextGenerator: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn generate(
    &self,
    prompt: String,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + '_;
}

/// Render a snapshot as a natural-language prompt, one member per line.
pub fn build_prompt(members: &[MemberRecord]) -> String {
  let mut prompt = String::from(INSTRUCTION);
  for m in members {
    let _ = write!(
      prompt,
      "\n- {} ({}{}): {}, {} 업데이트",
      m.name,
      m.position,
      if m.is_admin { ", 관리자" } else { "" },
      m.status.label(),
      m.last_updated.format("%H:%M"),
    );
  }
  prompt
}

/// Ask `generator` for advice about `snapshot`.
///
/// Generator failures surface as [`Error::AdvisoryUnavailable`].
pub async fn summarize<G: TextGenerator>(
  snapshot: &[MemberRecord],
  generator: &G,
) -> Result<String> {
  let prompt = build_prompt(snapshot);
  debug!(members = snapshot.len(), prompt_len = prompt.len(), "requesting advisory");
  generator.generate(prompt).await.map_err(|e| {
    warn!(error = %e, "advisory generator failed");
    Error::AdvisoryUnavailable(Box::new(e))
  })
}

/// Snapshot `store` and summarize it. No store lock is held while the
/// generator runs.
pub async fn brief_team<S, G>(store: &S, generator: &G) -> Result<String>
where
  S: TeamStore,
  G: TextGenerator,
{
  let snapshot = store.list_members().await;
  summarize(&snapshot, generator).await
}
