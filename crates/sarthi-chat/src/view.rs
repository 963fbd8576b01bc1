use sarthi_backend::{BackendError, QueryBackend};
use sarthi_core::{BackendReply, ChatMessage, Query};
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

use crate::transcript::Transcript;
use crate::typing::{TypingGuard, TypingIndicator};

/// Blocking message shown to the user when a submission does not produce a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Input was blank; nothing was sent.
    InvalidQuery,
    /// Transport failure, non-2xx status, or an unusable body.
    SendFailed,
    /// The backend answered but reported `success: false`.
    ServerFailure,
}

impl Notice {
    pub fn text(&self) -> &'static str {
        match self {
            Notice::InvalidQuery => "Please enter a valid query.",
            Notice::SendFailed => "There was an error sending your message. Please try again.",
            Notice::ServerFailure => "There was an error with the response from the server.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub notice: Option<Notice>,
    /// Transcript entries added by this submission (0, 1 or 2).
    pub appended: usize,
}

/// A submission whose user entry is in the transcript and whose reply is
/// still outstanding. Keeps the typing flag raised until it is completed
/// or dropped.
#[derive(Debug)]
pub struct PendingSubmit {
    query: Query,
    _typing: TypingGuard,
}

impl PendingSubmit {
    /// The trimmed query to send.
    pub fn query(&self) -> &Query {
        &self.query
    }
}

/// View-layer state for one chat session.
///
/// Created fresh per session and never persisted. Submissions may overlap:
/// [`ChatView::begin`] any number of times, send each pending query, and
/// [`ChatView::complete`] them in whatever order the replies arrive.
#[derive(Debug, Default)]
pub struct ChatView {
    transcript: Transcript,
    typing: TypingIndicator,
}

impl ChatView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Shared handle on the typing flag, readable while a send is in flight.
    pub fn typing(&self) -> TypingIndicator {
        self.typing.clone()
    }

    pub fn is_typing(&self) -> bool {
        self.typing.is_active()
    }

    /// Validate `input` and record it as a user entry.
    ///
    /// Blank input yields [`Notice::InvalidQuery`] and leaves the transcript
    /// untouched; nothing should be sent.
    pub fn begin(&mut self, input: &str) -> Result<PendingSubmit, Notice> {
        let query = Query::parse(input).map_err(|_| Notice::InvalidQuery)?;
        let typing = self.typing.begin();
        self.transcript.push(ChatMessage::user(query.as_str()));
        Ok(PendingSubmit {
            query,
            _typing: typing,
        })
    }

    /// Settle a pending submission with the backend's result.
    ///
    /// A bot entry is appended only when the backend answered
    /// `success: true` with a string `response`.
    pub fn complete(
        &mut self,
        pending: PendingSubmit,
        result: Result<Value, BackendError>,
    ) -> SubmitOutcome {
        let notice = match result {
            Err(e) => {
                warn!(error = %e, code = e.code(), "error sending message");
                Some(Notice::SendFailed)
            }
            Ok(body) => match BackendReply::from_value(&body) {
                BackendReply::Answer { text } => {
                    self.transcript.push(ChatMessage::bot(text));
                    None
                }
                BackendReply::Declined { raw } => {
                    warn!(body = %raw, "backend response indicates failure");
                    Some(Notice::ServerFailure)
                }
                BackendReply::Malformed { reason } => {
                    warn!(%reason, "unusable backend response");
                    Some(Notice::SendFailed)
                }
            },
        };
        drop(pending);

        SubmitOutcome {
            appended: if notice.is_none() { 2 } else { 1 },
            notice,
        }
    }

    /// [`begin`](Self::begin), send once, then [`complete`](Self::complete).
    pub async fn submit(&mut self, backend: &dyn QueryBackend, input: &str) -> SubmitOutcome {
        let pending = match self.begin(input) {
            Ok(p) => p,
            Err(notice) => {
                return SubmitOutcome {
                    notice: Some(notice),
                    appended: 0,
                }
            }
        };

        debug!(backend = backend.name(), query = %pending.query(), "sending message");
        let result = backend.query(pending.query()).await;
        self.complete(pending, result)
    }
}
