use dioxus::prelude::*;

use crate::models::{Lesson, Message, MessageLog};
use crate::wizard::WizardOutcome;

pub type AppSignal = Signal<AppState>;

/// Fallback assistant turn appended when the lesson chat call fails.
const LESSON_ERROR_CONTENT: &str = "抱歉，发生了一些错误，请稍后再试。";
const LESSON_ERROR_DISPLAY: &str = "# 出错了\n\n抱歉，在处理您的消息时遇到了问题。请稍后重试。";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppView {
    Home,
    Courses,
    Practice,
    Assessment,
    Lesson,
}

impl Default for AppView {
    fn default() -> Self {
        AppView::Home
    }
}

/// Hosting-application state: which view is active, the lesson under chat,
/// and its conversation log. The wizard owns its own state separately and
/// hands (lesson, messages) over here on completion.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub view: AppView,
    pub messages: MessageLog,
    pub lesson: Option<Lesson>,
    pub is_loading: bool,
    pub loading_status: String,
}

#[derive(Clone, Copy)]
pub struct AppActions {
    state: AppSignal,
}

impl AppActions {
    pub fn set_view(&self, view: AppView) {
        let mut signal = self.state;
        signal.write().view = view;
    }

    pub fn begin_loading(&self, status: impl Into<String>) {
        let mut signal = self.state;
        let mut state = signal.write();
        state.is_loading = true;
        state.loading_status = status.into();
    }

    pub fn settle_loading(&self) {
        let mut signal = self.state;
        let mut state = signal.write();
        state.is_loading = false;
        state.loading_status.clear();
    }

    /// Installs a freshly created lesson and its opening conversation, then
    /// switches to the tutoring chat.
    pub fn install_lesson(&self, lesson: Lesson, history: Vec<Message>) {
        let mut signal = self.state;
        let mut state = signal.write();
        state.lesson = Some(lesson);
        state.messages = MessageLog::from(history);
        state.view = AppView::Lesson;
        state.is_loading = false;
        state.loading_status.clear();
    }

    /// Completion handoff from the assessment wizard: the wizard's log is
    /// adopted as this session's conversation.
    pub fn adopt_assessment(&self, outcome: WizardOutcome) {
        let mut signal = self.state;
        let mut state = signal.write();
        state.lesson = Some(outcome.lesson);
        state.messages = outcome.messages;
        state.view = AppView::Lesson;
        state.is_loading = false;
        state.loading_status.clear();
    }

    pub fn append_message(&self, message: Message) {
        let mut signal = self.state;
        signal.write().messages.append(message);
    }

    /// The backend returned the authoritative history: adopt it as a new
    /// log instance. Clones handed out earlier remain valid snapshots.
    pub fn replace_conversation(&self, history: Vec<Message>) {
        let mut signal = self.state;
        signal.write().messages = MessageLog::from(history);
    }

    /// Appends the bilingual apology turn shown when a lesson chat call
    /// fails; the lesson view has no error banner.
    pub fn push_lesson_error_reply(&self) {
        self.append_message(Message::assistant_rich(
            LESSON_ERROR_CONTENT,
            Some(LESSON_ERROR_CONTENT.to_string()),
            Some(LESSON_ERROR_DISPLAY.to_string()),
        ));
    }
}

pub fn use_app_state() -> AppSignal {
    use_context::<AppSignal>()
}

pub fn use_app_actions() -> AppActions {
    let state = use_app_state();
    AppActions { state }
}
