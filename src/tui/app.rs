use crate::core::{AnswerService, TranscriptService, extract_video_id, video::VideoId};
use crate::error::{Error, Result};
use crate::session::Session;
use crate::tui::components::{BannerKind, ChatLog, InputField, StatusBanner, TranscriptView};
use crate::tui::events::AppEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    /// Waiting for a URL.
    Home,
    /// Transcript fetch in flight.
    Loading { video_id: VideoId },
    /// Transcript loaded; Q&A available.
    Chat,
}

/// Results reported back from spawned background tasks. Answer events carry
/// the generation they were requested under; a result from an earlier
/// generation belongs to a session the user has since abandoned.
#[derive(Debug)]
pub enum WorkerEvent {
    TranscriptLoaded {
        video_id: VideoId,
        transcript: String,
    },
    TranscriptFailed {
        message: String,
    },
    AnswerReady {
        generation: u64,
        content: String,
    },
    AnswerFailed {
        generation: u64,
        message: String,
    },
}

pub struct App {
    pub state: AppState,
    pub should_quit: bool,
    pub session: Session,

    pub url_input: InputField,
    pub chat_input: InputField,
    pub chat_log: ChatLog,
    pub transcript_view: Option<TranscriptView>,
    pub banner: StatusBanner,

    /// An answer or summary request is in flight; chat submits are gated on it.
    pub awaiting_answer: bool,
    /// Bumped whenever the loaded video changes; answer results stamped with
    /// an older value are dropped.
    answer_generation: u64,

    transcript_service: TranscriptService,
    answer_service: AnswerService,

    pub worker_tx: Option<mpsc::UnboundedSender<WorkerEvent>>,
    pub worker_rx: Option<mpsc::UnboundedReceiver<WorkerEvent>>,
}

impl App {
    pub fn new() -> Result<Self> {
        let transcript_service = TranscriptService::new()?;
        let answer_service = AnswerService::new();

        let mut url_input = InputField::new("YouTube URL", "https://www.youtube.com/watch?v=...");
        url_input.focused = true;
        let mut chat_input = InputField::new("Your question", "Type your question here...");
        chat_input.focused = true;

        Ok(Self {
            state: AppState::Home,
            should_quit: false,
            session: Session::new(),

            url_input,
            chat_input,
            chat_log: ChatLog::new(),
            transcript_view: None,
            banner: StatusBanner::new(),

            awaiting_answer: false,
            answer_generation: 0,

            transcript_service,
            answer_service,

            worker_tx: None,
            worker_rx: None,
        })
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Quit => {
                self.should_quit = true;
            }
            AppEvent::Key(key) => {
                self.handle_key(key);
            }
            AppEvent::Tick => {
                self.handle_tick();
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match &self.state {
            AppState::Home => self.handle_home_key(key),
            AppState::Loading { .. } => self.handle_loading_key(key),
            AppState::Chat => self.handle_chat_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Enter => {
                self.submit_url();
            }
            _ => {
                self.url_input.handle_key(key);
            }
        }
    }

    fn handle_loading_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            // Back to URL entry; a late fetch result for this video is
            // dropped in handle_tick because the state no longer matches.
            self.state = AppState::Home;
            self.banner.clear();
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => self.request_summary(),
                KeyCode::Char('l') => {
                    self.session.clear_messages();
                    self.chat_log.reset();
                    self.banner.set(BannerKind::Info, "Chat cleared.");
                }
                KeyCode::Char('t') => self.toggle_transcript_view(),
                KeyCode::Char('n') => self.load_different_video(),
                _ => {}
            }
            return;
        }

        if self.session.show_transcript() {
            match key.code {
                KeyCode::Esc => self.toggle_transcript_view(),
                _ => {
                    if let Some(view) = &mut self.transcript_view {
                        view.handle_key(key);
                    }
                }
            }
            return;
        }

        match key.code {
            KeyCode::Enter => self.submit_question(),
            KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown => {
                self.chat_log.handle_key(key);
            }
            _ => {
                self.chat_input.handle_key(key);
            }
        }
    }

    /// Parse the entered URL and kick off a transcript fetch, unless the same
    /// video is already loaded.
    fn submit_url(&mut self) {
        let url = self.url_input.value.trim().to_string();

        if url.is_empty() {
            self.banner
                .set(BannerKind::Warning, Error::EmptyUrl.to_string());
            return;
        }

        let Some(video_id) = extract_video_id(&url) else {
            self.banner
                .set(BannerKind::Error, Error::InvalidUrl.to_string());
            return;
        };

        self.session.set_pending_video(video_id.clone());

        if self.session.is_loaded(&video_id) {
            self.banner.set(
                BannerKind::Success,
                format!(
                    "Transcript already loaded! ({} words)",
                    self.transcript_words()
                ),
            );
            self.state = AppState::Chat;
            return;
        }

        self.banner
            .set(BannerKind::Info, "Fetching transcript... please wait");
        self.state = AppState::Loading {
            video_id: video_id.clone(),
        };
        self.start_fetch(video_id);
    }

    fn start_fetch(&self, video_id: VideoId) {
        let Some(tx) = self.worker_tx.clone() else {
            return;
        };
        let service = self.transcript_service.clone();

        tokio::spawn(async move {
            let event = match service.fetch(&video_id).await {
                Ok(transcript) => WorkerEvent::TranscriptLoaded {
                    video_id,
                    transcript,
                },
                Err(e) => WorkerEvent::TranscriptFailed {
                    message: e.to_string(),
                },
            };
            let _ = tx.send(event);
        });
    }

    fn submit_question(&mut self) {
        if self.awaiting_answer || !self.chat_input.is_valid() {
            return;
        }
        let Some(transcript) = self.session.transcript().map(str::to_string) else {
            return;
        };
        let Some(tx) = self.worker_tx.clone() else {
            return;
        };

        let question = self.chat_input.take().trim().to_string();
        self.session.push_user(question.clone());
        self.chat_log.follow_bottom();
        self.awaiting_answer = true;
        self.banner.clear();

        let generation = self.answer_generation;
        let service = self.answer_service.clone();
        tokio::spawn(async move {
            let event = match service.ask(&transcript, &question).await {
                Ok(content) => WorkerEvent::AnswerReady {
                    generation,
                    content,
                },
                Err(e) => WorkerEvent::AnswerFailed {
                    generation,
                    message: e.to_string(),
                },
            };
            let _ = tx.send(event);
        });
    }

    fn request_summary(&mut self) {
        if self.awaiting_answer {
            return;
        }
        let Some(transcript) = self.session.transcript().map(str::to_string) else {
            return;
        };
        let Some(tx) = self.worker_tx.clone() else {
            return;
        };

        self.awaiting_answer = true;
        self.chat_log.follow_bottom();
        self.banner.set(BannerKind::Info, "Summarizing...");

        let generation = self.answer_generation;
        let service = self.answer_service.clone();
        tokio::spawn(async move {
            let event = match service.summarize(&transcript).await {
                Ok(summary) => WorkerEvent::AnswerReady {
                    generation,
                    content: format!("**Video Summary**\n\n{summary}"),
                },
                Err(e) => WorkerEvent::AnswerFailed {
                    generation,
                    message: e.to_string(),
                },
            };
            let _ = tx.send(event);
        });
    }

    fn toggle_transcript_view(&mut self) {
        self.session.toggle_transcript();
        if self.session.show_transcript() {
            let content = self.session.transcript().unwrap_or_default().to_string();
            self.transcript_view = Some(TranscriptView::new(content));
        } else {
            self.transcript_view = None;
        }
    }

    /// "Load a different video": drop the whole session and start over.
    fn load_different_video(&mut self) {
        self.session.reset();
        self.chat_log.reset();
        self.transcript_view = None;
        self.chat_input.clear();
        self.url_input.clear();
        self.banner.clear();
        self.awaiting_answer = false;
        self.answer_generation += 1;
        self.state = AppState::Home;
    }

    fn handle_tick(&mut self) {
        let mut events = Vec::new();
        if let Some(rx) = &mut self.worker_rx {
            while let Ok(event) = rx.try_recv() {
                events.push(event);
            }
        }

        for event in events {
            self.handle_worker_event(event);
        }
    }

    fn handle_worker_event(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::TranscriptLoaded {
                video_id,
                transcript,
            } => {
                // Ignore results for fetches the user backed out of.
                let expected = matches!(&self.state, AppState::Loading { video_id: current }
                    if *current == video_id);
                if !expected {
                    return;
                }

                if self.session.commit_loaded_video(video_id, transcript) {
                    self.answer_generation += 1;
                    self.awaiting_answer = false;
                }
                self.chat_log.reset();
                self.transcript_view = None;
                self.banner.set(
                    BannerKind::Success,
                    format!("Transcript loaded! ({} words)", self.transcript_words()),
                );
                self.state = AppState::Chat;
            }
            WorkerEvent::TranscriptFailed { message } => {
                if !matches!(self.state, AppState::Loading { .. }) {
                    return;
                }
                self.banner.set(BannerKind::Error, message);
                self.state = AppState::Home;
            }
            WorkerEvent::AnswerReady {
                generation,
                content,
            } => {
                if generation != self.answer_generation {
                    return;
                }
                self.awaiting_answer = false;
                if self.session.transcript().is_some() {
                    self.session.push_assistant(content);
                    self.chat_log.follow_bottom();
                }
            }
            WorkerEvent::AnswerFailed {
                generation,
                message,
            } => {
                if generation != self.answer_generation {
                    return;
                }
                self.awaiting_answer = false;
                self.banner.set(BannerKind::Error, message);
            }
        }
    }

    fn transcript_words(&self) -> usize {
        self.session
            .transcript()
            .map(|t| t.split_whitespace().count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::{App, AppState, WorkerEvent};
    use crate::core::video::VideoId;
    use crate::tui::components::BannerKind;

    // No worker channel is wired up, so submits that would spawn a fetch
    // stop at the state change and nothing touches the network.
    fn app() -> App {
        App::new().expect("app construction")
    }

    fn app_with_loaded_video(id: &str) -> App {
        let mut app = app();
        app.state = AppState::Loading {
            video_id: VideoId::new(id),
        };
        app.handle_worker_event(WorkerEvent::TranscriptLoaded {
            video_id: VideoId::new(id),
            transcript: "one two three".to_string(),
        });
        app
    }

    #[test]
    fn submitting_an_empty_url_warns_and_stays_home() {
        let mut app = app();
        app.url_input.value = "   ".to_string();

        app.submit_url();

        assert_eq!(app.state, AppState::Home);
        let (kind, message) = app.banner.current().expect("banner set");
        assert_eq!(kind, BannerKind::Warning);
        assert!(message.contains("paste a YouTube URL"));
        assert!(app.session.pending_video_id().is_none());
    }

    #[test]
    fn submitting_an_unparseable_url_errors_and_stays_home() {
        let mut app = app();
        app.url_input.value = "https://vimeo.com/123456789".to_string();

        app.submit_url();

        assert_eq!(app.state, AppState::Home);
        let (kind, message) = app.banner.current().expect("banner set");
        assert_eq!(kind, BannerKind::Error);
        assert!(message.contains("Invalid YouTube URL"));
        assert!(app.session.pending_video_id().is_none());
    }

    #[test]
    fn resubmitting_the_loaded_video_skips_the_fetch() {
        let mut app = app_with_loaded_video("dQw4w9WgXcQ");
        app.session.push_user("q1");
        app.url_input.value = "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string();

        app.submit_url();

        // Straight to chat, never through Loading, session intact.
        assert_eq!(app.state, AppState::Chat);
        assert_eq!(app.session.messages().len(), 1);
        let (kind, message) = app.banner.current().expect("banner set");
        assert_eq!(kind, BannerKind::Success);
        assert!(message.contains("already loaded"));
    }

    #[test]
    fn an_answer_for_the_current_video_is_appended() {
        let mut app = app_with_loaded_video("dQw4w9WgXcQ");
        app.session.push_user("what is this about?");
        app.awaiting_answer = true;

        app.handle_worker_event(WorkerEvent::AnswerReady {
            generation: app.answer_generation,
            content: "It is about testing.".to_string(),
        });

        assert!(!app.awaiting_answer);
        assert_eq!(app.session.messages().len(), 2);
        assert_eq!(app.session.messages()[1].content, "It is about testing.");
    }

    #[test]
    fn an_answer_for_an_abandoned_video_is_dropped() {
        let mut app = app_with_loaded_video("dQw4w9WgXcQ");
        app.session.push_user("what is this about?");
        app.awaiting_answer = true;
        let stale_generation = app.answer_generation;

        // Ctrl+N, then a second video finishes loading while the first
        // video's answer is still in flight.
        app.load_different_video();
        app.state = AppState::Loading {
            video_id: VideoId::new("5_EJwYeQusM"),
        };
        app.handle_worker_event(WorkerEvent::TranscriptLoaded {
            video_id: VideoId::new("5_EJwYeQusM"),
            transcript: "a different transcript".to_string(),
        });

        app.handle_worker_event(WorkerEvent::AnswerReady {
            generation: stale_generation,
            content: "an answer about the first video".to_string(),
        });

        assert!(app.session.messages().is_empty());
    }

    #[test]
    fn a_failure_for_an_abandoned_request_leaves_the_banner_alone() {
        let mut app = app_with_loaded_video("dQw4w9WgXcQ");
        app.awaiting_answer = true;
        let stale_generation = app.answer_generation;
        app.load_different_video();

        app.handle_worker_event(WorkerEvent::AnswerFailed {
            generation: stale_generation,
            message: "request timed out".to_string(),
        });

        assert!(app.banner.current().is_none());
    }
}
