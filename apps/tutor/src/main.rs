#![allow(non_snake_case)]

mod api;
mod config;
mod fixtures;
mod hooks;
mod models;
mod services;
mod state;
mod ui;
mod wizard;

use api::{ClientError, TutorApiClient};
use config::AppConfig;
use dioxus::prelude::*;
use dioxus_router::prelude::*;
use once_cell::sync::OnceCell;
use state::{use_app_actions, use_app_state, AppState, AppView};
use tracing::{error, info};
use ui::assessment::AssessmentPanel;
use ui::courses::CoursesPanel;
use ui::home::HomePanel;
use ui::lesson::LessonPanel;
use ui::practice::PracticePanel;

pub(crate) static APP_CONFIG: OnceCell<AppConfig> = OnceCell::new();
pub(crate) static API_CLIENT: OnceCell<TutorApiClient> = OnceCell::new();

fn main() {
    console_error_panic_hook::set_once();
    init_logging();
    bootstrap_infrastructure();
    launch(App);
}

fn init_logging() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = dioxus_logger::init(tracing::Level::INFO);
    });
}

fn bootstrap_infrastructure() {
    let config = AppConfig::from_env();
    let profile = config.profile;
    let _ = APP_CONFIG.set(config.clone());

    match TutorApiClient::new(config) {
        Ok(client) => {
            let _ = API_CLIENT.set(client);
            info!(?profile, "tutor API client initialized");
        }
        Err(err) => {
            report_client_error("初始化 API 客户端失败", &err);
        }
    }
}

fn report_client_error(context: &str, err: &ClientError) {
    error!(%context, ?err, status = ?err.status(), "api bootstrap error");
}

#[component]
fn App() -> Element {
    let app_state = use_signal(AppState::default);

    use_context_provider(|| app_state.clone());

    rsx! {
        Router::<Route> {}
    }
}

#[derive(Clone, Routable, Debug, PartialEq)]
enum Route {
    #[route("/")]
    Shell {},
}

#[component]
fn Shell() -> Element {
    let state = use_app_state();
    let actions = use_app_actions();
    let view = state.read().view;

    rsx! {
        div { class: "min-h-screen bg-gray-100 p-4",
            div { class: "mx-auto max-w-4xl overflow-hidden rounded-lg bg-white shadow-lg",
                div { class: "bg-blue-600 p-4 text-white",
                    h1 { class: "text-2xl font-bold", "AI English Tutor" }
                }
                {match view {
                    AppView::Home => rsx! { HomePanel {} },
                    AppView::Courses => rsx! { CoursesPanel {} },
                    AppView::Practice => rsx! { PracticePanel {} },
                    AppView::Assessment => rsx! {
                        AssessmentPanel {
                            on_complete: move |outcome| actions.adopt_assessment(outcome),
                            on_cancel: move |_| actions.set_view(AppView::Home),
                        }
                    },
                    AppView::Lesson => rsx! { LessonPanel {} },
                }}
            }
        }
    }
}
