use dioxus::prelude::*;

use crate::hooks::lesson::use_lesson_session;
use crate::state::use_app_state;
use crate::ui::chat::{ChatInput, MessageList};

/// Chat-based tutoring view. Reuses the conversation handed over by the
/// wizard or installed by lesson creation; every turn goes through the
/// lesson-chat operation.
#[component]
pub fn LessonPanel() -> Element {
    let state = use_app_state();
    let session = use_lesson_session();

    let snapshot = state.read();
    let messages: Vec<_> = snapshot.messages.visible().cloned().collect();
    let is_loading = snapshot.is_loading;
    let loading_status = snapshot.loading_status.clone();
    let topic = snapshot
        .lesson
        .as_ref()
        .map(|lesson| lesson.topic().to_string())
        .unwrap_or_else(|| "AI English Tutor".to_string());
    drop(snapshot);

    rsx! {
        div { class: "flex h-[600px] flex-col bg-gray-50",
            div { class: "flex items-center justify-between border-b bg-white px-6 py-4",
                h2 { class: "text-xl font-semibold text-gray-800", "{topic}" }
                if is_loading {
                    div { class: "flex items-center text-gray-600",
                        div { class: "mr-2 h-5 w-5 animate-spin rounded-full border-2 border-blue-500 border-t-transparent" }
                        "{loading_status}"
                    }
                }
            }
            MessageList { messages }
            ChatInput {
                placeholder: "Type your message...",
                is_loading,
                on_send: move |text| session.send_message(text),
            }
        }
    }
}
