use dioxus::prelude::*;

use crate::hooks::assessment::{use_assessment_wizard, WizardHandle};
use crate::models::EnglishLevel;
use crate::ui::chat::{ChatInput, LoadingIndicator, MessageList};
use crate::wizard::{ProfileEdit, WizardOutcome, WizardState, WizardStep};

const LEVEL_OPTIONS: &[(EnglishLevel, &str)] = &[
    (EnglishLevel::None, "None - Complete beginner"),
    (EnglishLevel::Beginner, "Beginner"),
    (EnglishLevel::Intermediate, "Intermediate"),
    (EnglishLevel::Advanced, "Advanced"),
];

/// The four-step assessment wizard. Owns its wizard instance for the
/// lifetime of the panel; completion and cancellation exit through the two
/// handlers supplied by the hosting shell.
#[component]
pub fn AssessmentPanel(
    on_complete: EventHandler<WizardOutcome>,
    on_cancel: EventHandler<()>,
) -> Element {
    let wizard = use_assessment_wizard(on_complete);
    let snapshot = wizard.state.read().clone();

    rsx! {
        div { class: "min-h-screen bg-gray-50",
            StepIndicator { current: snapshot.step }
            div { class: "relative mx-auto max-w-4xl overflow-hidden rounded-lg bg-white shadow-lg",
                {match snapshot.step {
                    WizardStep::Chatting => rsx! { ChatStep { wizard, snapshot } },
                    WizardStep::ProfileReview => rsx! { ProfileStep { wizard, snapshot } },
                    WizardStep::PlanSelection => rsx! { PlanStep { wizard, snapshot } },
                    WizardStep::WeeklyPlanGenerating => rsx! { WeeklyStep { wizard, snapshot } },
                }}
            }
            div { class: "mx-auto mt-4 flex max-w-4xl justify-between px-4",
                button {
                    class: "px-4 py-2 text-gray-600 hover:text-gray-800",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}

#[component]
fn StepIndicator(current: WizardStep) -> Element {
    let progress = f64::from(current.position() - 1) * 33.33;
    let steps: Vec<(u8, &'static str, bool)> = WizardStep::ALL
        .iter()
        .map(|step| {
            (
                step.position(),
                step.label(),
                current.position() >= step.position(),
            )
        })
        .collect();

    rsx! {
        div { class: "relative mb-8 flex items-center justify-between px-6 pt-6",
            for (position, label, reached) in steps {
                div { key: "{position}", class: "flex flex-col items-center",
                    div {
                        class: if reached {
                            "flex h-10 w-10 items-center justify-center rounded-full bg-blue-600 text-white"
                        } else {
                            "flex h-10 w-10 items-center justify-center rounded-full bg-gray-200 text-gray-600"
                        },
                        "{position}"
                    }
                    span { class: "mt-1 text-center text-xs", "{label}" }
                }
            }
            div { class: "absolute left-0 right-0 top-[4.5rem] z-0 px-6",
                div { class: "relative h-1 bg-gray-200",
                    div {
                        class: "absolute left-0 top-0 h-1 bg-blue-600 transition-all duration-500",
                        style: "width: {progress}%",
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone)]
#[props(no_eq)]
struct StepProps {
    wizard: WizardHandle,
    snapshot: WizardState,
}

impl PartialEq for StepProps {
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

impl Eq for StepProps {}

#[component]
fn ChatStep(props: StepProps) -> Element {
    let wizard = props.wizard;
    let snapshot = props.snapshot;
    let messages: Vec<_> = snapshot.messages.visible().cloned().collect();
    let is_loading = snapshot.is_loading;
    let status = if snapshot.loading_status.is_empty() {
        "Loading...".to_string()
    } else {
        snapshot.loading_status.clone()
    };

    rsx! {
        div { class: "flex h-full flex-col",
            if is_loading && messages.is_empty() {
                LoadingIndicator { status }
            } else {
                MessageList { messages }
            }
            if let Some(error) = snapshot.error {
                ErrorPanel { message: error }
            }
            ChatInput {
                placeholder: "Type your message...",
                is_loading,
                on_send: move |text| wizard.send_message(text),
            }
        }
    }
}

#[component]
fn ProfileStep(props: StepProps) -> Element {
    let wizard = props.wizard;
    let snapshot = props.snapshot;
    let status = if snapshot.loading_status.is_empty() {
        "Analyzing your profile...".to_string()
    } else {
        snapshot.loading_status.clone()
    };

    rsx! {
        div { class: "space-y-6 p-6",
            h2 { class: "text-2xl font-bold text-blue-800", "Your English Learning Profile" }
            if let Some(profile) = snapshot.profile {
                div { class: "rounded-lg bg-white p-6 shadow-md",
                    div { class: "space-y-4",
                        div {
                            h3 { class: "text-lg font-semibold", "English Level" }
                            select {
                                class: "mt-1 block w-full rounded-md border border-gray-300 p-2",
                                value: profile.english_level.as_str(),
                                onchange: move |evt| {
                                    if let Some(level) = EnglishLevel::parse(evt.value().as_str()) {
                                        wizard.edit_profile(ProfileEdit::Level(level));
                                    }
                                },
                                for (level, label) in LEVEL_OPTIONS.iter().copied() {
                                    option {
                                        value: level.as_str(),
                                        selected: profile.english_level == level,
                                        "{label}"
                                    }
                                }
                            }
                        }
                        TagEditor {
                            label: "Interests",
                            chip_class: "flex items-center rounded-full bg-blue-100 px-3 py-1",
                            placeholder: "Add interest...",
                            entries: profile.interests.clone(),
                            on_add: move |value| wizard.edit_profile(ProfileEdit::AddInterest(value)),
                            on_remove: move |index| wizard.edit_profile(ProfileEdit::RemoveInterest(index)),
                        }
                        TagEditor {
                            label: "Learning Goals",
                            chip_class: "flex items-center rounded-full bg-green-100 px-3 py-1",
                            placeholder: "Add goal...",
                            entries: profile.learning_goals.clone(),
                            on_add: move |value| wizard.edit_profile(ProfileEdit::AddGoal(value)),
                            on_remove: move |index| wizard.edit_profile(ProfileEdit::RemoveGoal(index)),
                        }
                        div {
                            h3 { class: "text-lg font-semibold", "Daily Study Time (minutes)" }
                            input {
                                class: "mt-1 block w-full rounded-md border border-gray-300 p-2",
                                r#type: "number",
                                min: "5",
                                max: "240",
                                value: "{profile.study_time_per_day}",
                                onchange: move |evt| {
                                    wizard.edit_profile(ProfileEdit::StudyTime(evt.value()));
                                },
                            }
                        }
                        div {
                            h3 { class: "text-lg font-semibold", "Total Study Days" }
                            input {
                                class: "mt-1 block w-full rounded-md border border-gray-300 p-2",
                                r#type: "number",
                                min: "7",
                                max: "365",
                                value: "{profile.total_study_day}",
                                onchange: move |evt| {
                                    wizard.edit_profile(ProfileEdit::TotalDays(evt.value()));
                                },
                            }
                        }
                    }
                    div { class: "mt-6 flex justify-between",
                        button {
                            class: "rounded-md bg-gray-300 px-4 py-2 text-gray-800 transition-colors hover:bg-gray-400",
                            onclick: move |_| wizard.back_to_chat(),
                            "Back to Chat"
                        }
                        button {
                            class: "rounded-md bg-blue-600 px-4 py-2 text-white transition-colors hover:bg-blue-700",
                            disabled: snapshot.is_loading,
                            onclick: move |_| wizard.generate_plan(),
                            "Generate Learning Plan"
                        }
                    }
                }
            } else {
                LoadingIndicator { status }
            }
            if let Some(error) = snapshot.error {
                ErrorPanel { message: error }
            }
        }
    }
}

#[derive(Props, Clone)]
#[props(no_eq)]
struct TagEditorProps {
    label: String,
    chip_class: String,
    placeholder: String,
    entries: Vec<String>,
    on_add: EventHandler<String>,
    on_remove: EventHandler<usize>,
}

impl PartialEq for TagEditorProps {
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

impl Eq for TagEditorProps {}

/// Editable chip list: entries append on Enter and remove by position
/// without disturbing the rest.
#[component]
fn TagEditor(props: TagEditorProps) -> Element {
    let mut draft = use_signal(String::new);
    let on_add = props.on_add;
    let on_remove = props.on_remove;

    rsx! {
        div {
            h3 { class: "text-lg font-semibold", "{props.label}" }
            div { class: "mt-1 flex flex-wrap gap-2",
                for (index, entry) in props.entries.iter().enumerate() {
                    div { key: "{index}", class: "{props.chip_class}",
                        span { "{entry}" }
                        button {
                            class: "ml-2 text-red-500",
                            onclick: move |_| on_remove.call(index),
                            "×"
                        }
                    }
                }
                input {
                    class: "rounded-full border border-gray-300 px-3 py-1",
                    placeholder: "{props.placeholder}",
                    value: "{draft}",
                    oninput: move |evt| draft.set(evt.value()),
                    onkeydown: move |evt| {
                        if evt.key() == Key::Enter {
                            let value = draft.peek().trim().to_string();
                            if !value.is_empty() {
                                on_add.call(value);
                                draft.set(String::new());
                            }
                        }
                    },
                }
            }
        }
    }
}

struct ProfileSummary {
    level: &'static str,
    interests: String,
    goals: String,
    study_time: u32,
    study_days: u32,
}

impl From<&crate::models::UserProfile> for ProfileSummary {
    fn from(profile: &crate::models::UserProfile) -> Self {
        Self {
            level: profile.english_level.as_str(),
            interests: profile.interests.join(", "),
            goals: profile.learning_goals.join(", "),
            study_time: profile.study_time_per_day,
            study_days: profile.total_study_day,
        }
    }
}

#[component]
fn PlanStep(props: StepProps) -> Element {
    let wizard = props.wizard;
    let snapshot = props.snapshot;
    let status = if snapshot.loading_status.is_empty() {
        "Generating learning plan...".to_string()
    } else {
        snapshot.loading_status.clone()
    };

    rsx! {
        div { class: "space-y-6 p-6",
            h2 { class: "text-2xl font-bold text-blue-800", "Your Learning Plan" }
            if let Some(plan) = snapshot.total_plan {
                div { class: "rounded-lg bg-white p-6 shadow-md",
                    if let Some(summary) = snapshot.profile.as_ref().map(ProfileSummary::from) {
                        div { class: "mb-6",
                            h3 { class: "mb-2 text-lg font-semibold", "Your Profile Summary" }
                            div { class: "rounded-md bg-blue-50 p-4",
                                p { strong { "Level: " } "{summary.level}" }
                                p { strong { "Interests: " } "{summary.interests}" }
                                p { strong { "Goals: " } "{summary.goals}" }
                                p { strong { "Daily study time: " } "{summary.study_time} minutes" }
                                p { strong { "Total study days: " } "{summary.study_days} days" }
                            }
                        }
                    }
                    h3 { class: "mb-4 text-lg font-semibold", "Select a Topic to Start With" }
                    div { class: "grid grid-cols-1 gap-4 md:grid-cols-2",
                        for topic in plan.topics {
                            div {
                                key: "{topic.day_number}",
                                class: "cursor-pointer rounded-lg border border-gray-200 p-4 transition-colors hover:bg-blue-50",
                                onclick: {
                                    let day_number = topic.day_number;
                                    move |_| wizard.select_topic(day_number)
                                },
                                h4 { class: "font-medium text-blue-800",
                                    "Day {topic.day_number}: {topic.topic}"
                                }
                                p { class: "mt-2 text-gray-600", "{topic.description}" }
                            }
                        }
                    }
                    div { class: "mt-6 flex justify-between",
                        button {
                            class: "rounded-md bg-gray-300 px-4 py-2 text-gray-800 transition-colors hover:bg-gray-400",
                            onclick: move |_| wizard.back_to_profile(),
                            "Back to Profile"
                        }
                    }
                }
            } else {
                LoadingIndicator { status }
            }
            if let Some(error) = snapshot.error {
                ErrorPanel { message: error }
            }
        }
    }
}

#[component]
fn WeeklyStep(props: StepProps) -> Element {
    let wizard = props.wizard;
    let snapshot = props.snapshot;
    let status = if snapshot.loading_status.is_empty() {
        "Creating your personalized weekly plan...".to_string()
    } else {
        snapshot.loading_status.clone()
    };

    rsx! {
        div { class: "space-y-6 p-6",
            h2 { class: "text-2xl font-bold text-blue-800", "Generating Your Weekly Plan" }
            if snapshot.error.is_none() {
                LoadingIndicator { status }
            }
            if let Some(error) = snapshot.error {
                div { class: "mt-4 rounded border border-red-400 bg-red-100 px-4 py-3 text-red-700",
                    "{error}"
                    button {
                        class: "mt-2 block rounded-md bg-red-200 px-4 py-2 text-red-800 transition-colors hover:bg-red-300",
                        onclick: move |_| wizard.back_to_plan(),
                        "Go Back"
                    }
                }
            }
        }
    }
}

#[component]
fn ErrorPanel(message: String) -> Element {
    rsx! {
        div { class: "mt-4 rounded border border-red-400 bg-red-100 px-4 py-3 text-red-700",
            "{message}"
        }
    }
}
