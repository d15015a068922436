use dioxus::prelude::*;

use crate::hooks::lesson::use_lesson_session;
use crate::models::{LessonCreateRequest, LessonMode, Scene};
use crate::state::{use_app_actions, use_app_state, AppView};

/// Custom role-play setup form. Required fields gate the submit; the scene
/// goes to lesson-create verbatim.
#[component]
pub fn PracticePanel() -> Element {
    let state = use_app_state();
    let actions = use_app_actions();
    let session = use_lesson_session();
    let is_loading = state.read().is_loading;

    let mut topic = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut your_role = use_signal(String::new);
    let mut student_role = use_signal(String::new);
    let mut additional_info = use_signal(String::new);
    let mut current_situation = use_signal(String::new);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let topic = topic.peek().trim().to_string();
        let scene = Scene {
            description: description.peek().trim().to_string(),
            your_role: your_role.peek().trim().to_string(),
            student_role: student_role.peek().trim().to_string(),
            additional_info: additional_info.peek().trim().to_string(),
            current_situation: current_situation.peek().trim().to_string(),
            resources: vec![],
        };

        let incomplete = topic.is_empty()
            || scene.description.is_empty()
            || scene.your_role.is_empty()
            || scene.student_role.is_empty()
            || scene.current_situation.is_empty();
        if incomplete {
            return;
        }

        session.create_lesson(LessonCreateRequest {
            mode: LessonMode::Practice,
            topic,
            scene: Some(scene),
            assessment_day: None,
        });
    };

    rsx! {
        div { class: "p-8",
            h3 { class: "mb-4 text-center text-xl", "Customize Your Practice Session" }
            form { class: "space-y-4", onsubmit: on_submit,
                div {
                    label { class: "mb-1 block text-sm font-medium", "Topic" }
                    input {
                        class: "w-full rounded border p-2",
                        r#type: "text",
                        placeholder: "例如：商务会议、日常对话等",
                        required: true,
                        value: "{topic}",
                        oninput: move |evt| topic.set(evt.value()),
                    }
                }
                div {
                    label { class: "mb-1 block text-sm font-medium", "场景描述" }
                    textarea {
                        class: "w-full rounded border p-2",
                        rows: "3",
                        placeholder: "描述练习场景的具体情况",
                        required: true,
                        value: "{description}",
                        oninput: move |evt| description.set(evt.value()),
                    }
                }
                div {
                    label { class: "mb-1 block text-sm font-medium", "你的角色" }
                    input {
                        class: "w-full rounded border p-2",
                        r#type: "text",
                        placeholder: "例如：面试官、客户等",
                        required: true,
                        value: "{your_role}",
                        oninput: move |evt| your_role.set(evt.value()),
                    }
                }
                div {
                    label { class: "mb-1 block text-sm font-medium", "学生角色" }
                    input {
                        class: "w-full rounded border p-2",
                        r#type: "text",
                        placeholder: "例如：求职者、顾客等",
                        required: true,
                        value: "{student_role}",
                        oninput: move |evt| student_role.set(evt.value()),
                    }
                }
                div {
                    label { class: "mb-1 block text-sm font-medium", "补充信息" }
                    textarea {
                        class: "w-full rounded border p-2",
                        rows: "2",
                        placeholder: "任何需要补充的背景信息",
                        value: "{additional_info}",
                        oninput: move |evt| additional_info.set(evt.value()),
                    }
                }
                div {
                    label { class: "mb-1 block text-sm font-medium", "当前情况" }
                    textarea {
                        class: "w-full rounded border p-2",
                        rows: "2",
                        placeholder: "描述当前的具体情况",
                        required: true,
                        value: "{current_situation}",
                        oninput: move |evt| current_situation.set(evt.value()),
                    }
                }
                div { class: "flex justify-end space-x-4",
                    button {
                        class: "rounded-lg bg-gray-300 px-4 py-2 text-gray-700 hover:bg-gray-400",
                        r#type: "button",
                        onclick: move |_| actions.set_view(AppView::Home),
                        "Cancel"
                    }
                    button {
                        class: "rounded-lg bg-blue-600 px-6 py-2 text-white hover:bg-blue-700 disabled:opacity-50",
                        r#type: "submit",
                        disabled: is_loading,
                        if is_loading { "Creating..." } else { "Start Practice" }
                    }
                }
            }
        }
    }
}
