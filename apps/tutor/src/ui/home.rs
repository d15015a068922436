use dioxus::prelude::*;

use crate::state::{use_app_actions, AppView};

#[component]
pub fn HomePanel() -> Element {
    let actions = use_app_actions();
    let api_endpoint = crate::APP_CONFIG
        .get()
        .map(|config| config.api_base_url.clone())
        .unwrap_or_else(|| "未配置 API 地址".to_string());

    rsx! {
        div { class: "p-8 text-center",
            h1 { class: "mb-8 text-3xl font-bold", "Welcome to AI English Tutor" }
            div { class: "space-y-4",
                button {
                    class: "w-full max-w-md rounded-lg bg-blue-600 px-6 py-3 text-white hover:bg-blue-700",
                    onclick: move |_| actions.set_view(AppView::Assessment),
                    "Start Assessment"
                }
                button {
                    class: "w-full max-w-md rounded-lg bg-green-600 px-6 py-3 text-white hover:bg-green-700",
                    onclick: move |_| actions.set_view(AppView::Courses),
                    "Browse Courses"
                }
                button {
                    class: "w-full max-w-md rounded-lg bg-purple-600 px-6 py-3 text-white hover:bg-purple-700",
                    onclick: move |_| actions.set_view(AppView::Practice),
                    "Custom Practice"
                }
            }
            p { class: "mt-6 text-xs text-gray-400", "API: {api_endpoint}" }
        }
    }
}
