use dioxus::prelude::*;

use crate::fixtures::courses::sample_courses;
use crate::hooks::lesson::use_lesson_session;
use crate::models::{Lesson, LessonCreateRequest};
use crate::state::{use_app_actions, use_app_state, AppView};

struct CourseCard {
    badge: &'static str,
    badge_class: &'static str,
    topic: String,
    summary: String,
    time_hint: String,
    request: LessonCreateRequest,
}

impl CourseCard {
    fn from_lesson(lesson: &Lesson) -> Self {
        let request = LessonCreateRequest::from_lesson(lesson);
        match lesson {
            Lesson::Study(study) => Self {
                badge: "学习模式",
                badge_class: "mb-2 inline-block rounded bg-blue-100 px-2 py-1 text-xs font-semibold text-blue-800",
                topic: study.topic.clone(),
                summary: format!(
                    "知识点: {}",
                    study
                        .knowledge_points
                        .iter()
                        .map(|point| point.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
                time_hint: format!("预计时间: {} minutes", study.estimated_time),
                request,
            },
            Lesson::Practice(practice) => Self {
                badge: "练习模式",
                badge_class: "mb-2 inline-block rounded bg-green-100 px-2 py-1 text-xs font-semibold text-green-800",
                topic: practice.topic.clone(),
                summary: practice.scene.description.clone(),
                time_hint: "预计时间: 30 minutes".to_string(),
                request,
            },
        }
    }
}

#[component]
pub fn CoursesPanel() -> Element {
    let state = use_app_state();
    let actions = use_app_actions();
    let session = use_lesson_session();
    let is_loading = state.read().is_loading;

    let cards: Vec<CourseCard> = sample_courses()
        .iter()
        .map(CourseCard::from_lesson)
        .collect();

    rsx! {
        div { class: "p-8",
            h3 { class: "mb-4 text-center text-xl", "Available Courses" }
            div { class: "grid gap-4 md:grid-cols-2",
                for (index, card) in cards.into_iter().enumerate() {
                    div {
                        key: "{index}",
                        class: "cursor-pointer rounded-lg border bg-white p-4 transition-shadow hover:shadow-lg",
                        onclick: {
                            let request = card.request.clone();
                            move |_| {
                                if !is_loading {
                                    session.create_lesson(request.clone());
                                }
                            }
                        },
                        div { class: card.badge_class, "{card.badge}" }
                        h4 { class: "mb-2 font-medium", "{card.topic}" }
                        p { class: "text-sm text-gray-600", "{card.summary}" }
                        p { class: "mt-2 text-sm text-gray-500", "{card.time_hint}" }
                    }
                }
            }
            div { class: "mt-6 text-center",
                button {
                    class: "px-4 py-2 text-gray-600 hover:text-gray-800",
                    onclick: move |_| actions.set_view(AppView::Home),
                    "Back"
                }
            }
        }
    }
}
