//! Session-scoped state: the loaded video, its transcript, and the chat
//! history. One instance per run, mutated by exactly one event at a time;
//! nothing survives the process.

use crate::core::video::VideoId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Invariant: `messages` is non-empty only while `transcript` is present.
/// Loading a different video replaces transcript, history, and the view flag
/// together; `reset` drops everything at once.
#[derive(Debug, Default)]
pub struct Session {
    pending_video_id: Option<VideoId>,
    video_id: Option<VideoId>,
    transcript: Option<String>,
    messages: Vec<Message>,
    show_transcript: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pending_video(&mut self, id: VideoId) {
        self.pending_video_id = Some(id);
    }

    #[allow(dead_code)]
    pub fn pending_video_id(&self) -> Option<&VideoId> {
        self.pending_video_id.as_ref()
    }

    pub fn video_id(&self) -> Option<&VideoId> {
        self.video_id.as_ref()
    }

    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn show_transcript(&self) -> bool {
        self.show_transcript
    }

    /// Session-local memoization check: the requested video is already loaded,
    /// so a refetch can be skipped.
    pub fn is_loaded(&self, id: &VideoId) -> bool {
        self.video_id.as_ref() == Some(id)
    }

    /// Store a freshly fetched transcript. A different identifier replaces the
    /// prior transcript, chat history, and view flag in one step; the same
    /// identifier is a no-op (the existing session stands). Returns whether
    /// the session changed.
    pub fn commit_loaded_video(&mut self, id: VideoId, transcript: String) -> bool {
        if self.is_loaded(&id) {
            return false;
        }

        self.transcript = Some(transcript);
        self.video_id = Some(id);
        self.messages.clear();
        self.show_transcript = false;
        true
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        debug_assert!(self.transcript.is_some(), "chat requires a loaded transcript");
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        debug_assert!(self.transcript.is_some(), "chat requires a loaded transcript");
        self.messages.push(Message::assistant(content));
    }

    /// Empty the chat history; the stored transcript is untouched.
    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    pub fn toggle_transcript(&mut self) {
        self.show_transcript = !self.show_transcript;
    }

    /// Back to the initial empty state: pending id, loaded id, transcript,
    /// history, and view flag all go together.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
