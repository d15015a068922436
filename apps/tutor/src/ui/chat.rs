use dioxus::prelude::*;

use crate::models::{Message, MessageRole};
use crate::services::markdown::render_markdown;

/// One chat bubble. Assistant turns render their markdown display variant
/// above the spoken text; user turns render the raw content.
#[component]
pub fn MessageBubble(message: Message) -> Element {
    match message.role {
        MessageRole::System => rsx! {},
        MessageRole::User => rsx! {
            div { class: "flex justify-end",
                div { class: "max-w-[80%] whitespace-pre-wrap rounded-lg bg-blue-100 p-3",
                    "{message.content}"
                }
            }
        },
        MessageRole::Assistant => {
            let spoken = message
                .speech_text
                .clone()
                .unwrap_or_else(|| message.content.clone());
            let display_html = message
                .display_text
                .as_deref()
                .filter(|text| !text.trim().is_empty())
                .map(render_markdown);

            rsx! {
                div { class: "flex justify-start",
                    div { class: "max-w-[80%] rounded-lg bg-gray-100 p-3",
                        if let Some(html) = display_html {
                            div {
                                class: "markdown-content prose mb-2 max-w-none",
                                dangerous_inner_html: "{html}",
                            }
                        }
                        div { class: "whitespace-pre-wrap", "{spoken}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn MessageList(messages: Vec<Message>) -> Element {
    rsx! {
        div { class: "flex-1 space-y-4 overflow-y-auto p-4",
            for (index, message) in messages.into_iter().enumerate() {
                MessageBubble { key: "{index}", message }
            }
        }
    }
}

#[component]
pub fn ChatInput(placeholder: String, is_loading: bool, on_send: EventHandler<String>) -> Element {
    let mut draft = use_signal(String::new);

    rsx! {
        form {
            class: "flex space-x-2 border-t p-4",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                let text = draft.peek().trim().to_string();
                if text.is_empty() {
                    return;
                }
                draft.set(String::new());
                on_send.call(text);
            },
            input {
                class: "flex-1 rounded-lg border px-4 py-2 focus:outline-none focus:ring-2 focus:ring-blue-500",
                r#type: "text",
                placeholder: "{placeholder}",
                value: "{draft}",
                disabled: is_loading,
                oninput: move |evt| draft.set(evt.value()),
            }
            button {
                class: "rounded-lg bg-blue-600 px-6 py-2 font-semibold text-white hover:bg-blue-700 disabled:opacity-50",
                r#type: "submit",
                disabled: is_loading,
                if is_loading { "Sending..." } else { "Send" }
            }
        }
    }
}

#[component]
pub fn LoadingIndicator(status: String) -> Element {
    rsx! {
        div { class: "flex h-64 items-center justify-center",
            div { class: "h-8 w-8 animate-spin rounded-full border-4 border-blue-500 border-t-transparent" }
            span { class: "ml-2 text-gray-600", "{status}" }
        }
    }
}
