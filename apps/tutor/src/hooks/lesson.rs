use dioxus::prelude::*;

use crate::hooks::api_client;
use crate::models::{LessonChatRequest, LessonCreateRequest, Message};
use crate::state::{use_app_actions, use_app_state, AppActions, AppSignal};

const STATUS_CREATING: &str = "正在创建课程...";
const STATUS_REPLYING: &str = "正在等待回复...";

/// Drives lesson creation and the tutoring chat against the hosting state.
/// No wizard involvement: the lesson view reuses the message log and the
/// transport directly.
#[derive(Clone, Copy)]
pub struct LessonSessionHandle {
    state: AppSignal,
    actions: AppActions,
}

pub fn use_lesson_session() -> LessonSessionHandle {
    let state = use_app_state();
    let actions = use_app_actions();
    LessonSessionHandle { state, actions }
}

impl LessonSessionHandle {
    /// Creates a lesson from a course card or the practice form and switches
    /// to the tutoring chat with its opening conversation.
    pub fn create_lesson(&self, request: LessonCreateRequest) {
        let handle = *self;
        if handle.state.peek().is_loading {
            return;
        }
        spawn(async move {
            handle.actions.begin_loading(STATUS_CREATING);

            let Some(client) = api_client() else {
                tracing::error!("lesson create attempted without an API client");
                handle.actions.settle_loading();
                return;
            };

            match client.create_lesson(&request).await {
                Ok(response) => {
                    handle
                        .actions
                        .install_lesson(response.lesson, response.conversation_history);
                }
                Err(err) => {
                    tracing::error!(error = %err, topic = %request.topic, "lesson create failed");
                    handle.actions.settle_loading();
                }
            }
        });
    }

    /// One tutoring chat round. The backend may return the authoritative
    /// conversation history; otherwise its single reply is appended.
    pub fn send_message(&self, input: String) {
        let handle = *self;
        let text = input.trim().to_string();
        if text.is_empty() {
            return;
        }

        let (lesson, in_flight) = {
            let snapshot = handle.state.peek();
            (snapshot.lesson.clone(), snapshot.is_loading)
        };
        if in_flight {
            return;
        }
        let Some(lesson) = lesson else {
            return;
        };

        spawn(async move {
            handle.actions.append_message(Message::user(text.clone()));
            handle.actions.begin_loading(STATUS_REPLYING);

            let Some(client) = api_client() else {
                tracing::error!("lesson chat attempted without an API client");
                handle.actions.push_lesson_error_reply();
                handle.actions.settle_loading();
                return;
            };

            let request = LessonChatRequest {
                lesson,
                conversation_history: handle.state.peek().messages.all().to_vec(),
                user_input: text,
            };

            match client.lesson_chat(&request).await {
                Ok(response) => {
                    if let Some(history) = response.conversation_history {
                        handle.actions.replace_conversation(history);
                    } else if let Some(content) = response.content {
                        let speech = response
                            .speech_text
                            .clone()
                            .or_else(|| Some(content.clone()));
                        let display = response
                            .display_text
                            .clone()
                            .or_else(|| Some(content.clone()));
                        handle
                            .actions
                            .append_message(Message::assistant_rich(content, speech, display));
                    } else {
                        handle.actions.push_lesson_error_reply();
                    }
                    handle.actions.settle_loading();
                }
                Err(err) => {
                    tracing::error!(error = %err, "lesson chat failed");
                    handle.actions.push_lesson_error_reply();
                    handle.actions.settle_loading();
                }
            }
        });
    }
}
