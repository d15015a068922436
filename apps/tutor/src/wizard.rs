use async_trait::async_trait;

use crate::api::ClientResult;
use crate::models::{
    ChatTurn, Lesson, Message, MessageLog, TotalPlan, UserProfile, WeeklyPlanDay,
    WeeklyPlanRequest,
};
use crate::services::lesson::synthesize_study_lesson;
use crate::services::storage::{keys, save_json, SessionStore};

/// Sentinel the backend embeds in chat output once the assessment phase is
/// finished. Matched as a case-sensitive literal substring; there is no
/// fallback heuristic if the backend phrasing changes.
pub const ASSESSMENT_COMPLETE_MARKER: &str = "<ASSESSMENT_COMPLETE>";

/// Greeting synthesized on behalf of the user when the wizard starts.
pub const ASSESSMENT_GREETING: &str =
    "Hello, I would like to improve my English. Can you help me assess my current level?";

pub const STATUS_PREPARING: &str = "正在准备评估...";
pub const STATUS_WAITING: &str = "正在等待回复...";
pub const STATUS_ANALYZING: &str = "正在分析对话内容...";
pub const STATUS_PLANNING: &str = "正在生成学习计划...";
pub const STATUS_WEEKLY: &str = "正在生成每周学习计划...";

const ERROR_START: &str = "Failed to start assessment. Please try again.";
const ERROR_SEND: &str = "Failed to send message. Please try again.";
const ERROR_ANALYZE: &str = "Failed to analyze your profile. Please try again.";
const ERROR_PLAN: &str = "Failed to generate learning plan. Please try again.";
const ERROR_WEEKLY: &str = "Failed to generate weekly plan. Please try again.";
const ERROR_NO_PROFILE: &str = "User profile is missing.";

/// The four operations the wizard drives, in order. Implemented by the HTTP
/// client and by scripted fakes in tests.
#[async_trait(?Send)]
pub trait AssessmentTransport {
    async fn initial_chat(&self, messages: &[Message]) -> ClientResult<ChatTurn>;
    async fn analyze_profile(&self, messages: &[Message]) -> ClientResult<UserProfile>;
    async fn generate_total_plan(&self, profile: &UserProfile) -> ClientResult<TotalPlan>;
    async fn generate_weekly_plan(
        &self,
        request: &WeeklyPlanRequest,
    ) -> ClientResult<Vec<WeeklyPlanDay>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardStep {
    Chatting,
    ProfileReview,
    PlanSelection,
    WeeklyPlanGenerating,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Chatting,
        WizardStep::ProfileReview,
        WizardStep::PlanSelection,
        WizardStep::WeeklyPlanGenerating,
    ];

    pub fn position(self) -> u8 {
        match self {
            WizardStep::Chatting => 1,
            WizardStep::ProfileReview => 2,
            WizardStep::PlanSelection => 3,
            WizardStep::WeeklyPlanGenerating => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Chatting => "Assessment",
            WizardStep::ProfileReview => "Profile",
            WizardStep::PlanSelection => "Learning Plan",
            WizardStep::WeeklyPlanGenerating => "Weekly Plan",
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        WizardStep::Chatting
    }
}

/// A single committed change to the profile under review. Values arrive as
/// raw input strings and are validated here, not in the UI.
#[derive(Clone, Debug, PartialEq)]
pub enum ProfileEdit {
    Level(crate::models::EnglishLevel),
    AddInterest(String),
    RemoveInterest(usize),
    AddGoal(String),
    RemoveGoal(usize),
    StudyTime(String),
    TotalDays(String),
}

/// Delivered to the hosting application when the wizard exits: the finished
/// lesson plus the accumulated conversation, ownership transferred.
#[derive(Clone, Debug, PartialEq)]
pub struct WizardOutcome {
    pub lesson: Lesson,
    pub messages: MessageLog,
}

/// State owned by one wizard instance. The wizard is the single writer; UI
/// code only reads. Step only advances forward except for the explicit back
/// transitions and the step-4 error recovery.
#[derive(Clone, Debug, Default)]
pub struct WizardState {
    pub step: WizardStep,
    pub messages: MessageLog,
    pub profile: Option<UserProfile>,
    pub total_plan: Option<TotalPlan>,
    pub selected_topic_day: Option<u32>,
    pub weekly_plan: Option<Vec<WeeklyPlanDay>>,
    pub is_loading: bool,
    pub loading_status: String,
    pub error: Option<String>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, status: &str) {
        self.is_loading = true;
        self.loading_status = status.to_string();
        self.error = None;
    }

    pub fn settle(&mut self) {
        self.is_loading = false;
        self.loading_status.clear();
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.is_loading = false;
        self.loading_status.clear();
    }

    /// Appends a user turn if the text is non-empty after trimming and no
    /// call is in flight. Returns whether the turn was accepted.
    pub fn push_user_message(&mut self, text: &str) -> bool {
        if self.is_loading || self.step != WizardStep::Chatting {
            return false;
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.messages.append(Message::user(trimmed));
        true
    }

    /// Wizard start: synthesize the greeting and run the first exchange.
    /// Does nothing if the conversation has already begun.
    pub async fn start(
        &mut self,
        transport: &dyn AssessmentTransport,
        store: &dyn SessionStore,
    ) {
        if !self.messages.is_empty() {
            return;
        }
        self.begin(STATUS_PREPARING);
        self.messages.append(Message::user(ASSESSMENT_GREETING));

        match transport.initial_chat(self.messages.all()).await {
            Ok(turn) => {
                let completed = turn.content.contains(ASSESSMENT_COMPLETE_MARKER);
                self.messages.append(Message::assistant(turn.content));
                self.settle();
                if completed {
                    self.advance_to_profile(transport, store).await;
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "initial assessment chat failed");
                self.fail(ERROR_START);
            }
        }
    }

    /// One chat round: send the full log, append the assistant turn, and
    /// advance to profile review when the completion marker appears.
    pub async fn exchange(
        &mut self,
        transport: &dyn AssessmentTransport,
        store: &dyn SessionStore,
    ) {
        self.begin(STATUS_WAITING);

        match transport.initial_chat(self.messages.all()).await {
            Ok(turn) => {
                let completed = turn.content.contains(ASSESSMENT_COMPLETE_MARKER);
                self.messages.append(Message::assistant(turn.content));
                self.settle();
                if completed {
                    self.advance_to_profile(transport, store).await;
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "assessment chat failed");
                self.fail(ERROR_SEND);
            }
        }
    }

    async fn advance_to_profile(
        &mut self,
        transport: &dyn AssessmentTransport,
        store: &dyn SessionStore,
    ) {
        save_json(store, keys::CONVERSATION, &self.messages.all());
        self.step = WizardStep::ProfileReview;
        self.begin(STATUS_ANALYZING);

        match transport.analyze_profile(self.messages.all()).await {
            Ok(mut profile) => {
                profile.normalize();
                save_json(store, keys::PROFILE, &profile);
                self.profile = Some(profile);
                self.settle();
            }
            Err(err) => {
                tracing::error!(error = %err, "profile analysis failed");
                self.fail(ERROR_ANALYZE);
            }
        }
    }

    /// Validates and commits an edit to the profile under review, persisting
    /// the result. Returns whether anything was committed; the caller then
    /// triggers exactly one plan regeneration.
    pub fn apply_profile_edit(&mut self, edit: ProfileEdit, store: &dyn SessionStore) -> bool {
        let Some(profile) = self.profile.as_mut() else {
            return false;
        };

        let committed = match edit {
            ProfileEdit::Level(level) => {
                profile.english_level = level;
                true
            }
            ProfileEdit::AddInterest(raw) => push_trimmed(&mut profile.interests, &raw),
            ProfileEdit::RemoveInterest(index) => remove_at(&mut profile.interests, index),
            ProfileEdit::AddGoal(raw) => push_trimmed(&mut profile.learning_goals, &raw),
            ProfileEdit::RemoveGoal(index) => remove_at(&mut profile.learning_goals, index),
            ProfileEdit::StudyTime(raw) => {
                profile.study_time_per_day = UserProfile::parse_study_time(&raw);
                true
            }
            ProfileEdit::TotalDays(raw) => {
                profile.total_study_day = UserProfile::parse_study_days(&raw);
                true
            }
        };

        if committed {
            save_json(store, keys::PROFILE, profile);
        }
        committed
    }

    /// Regenerates the total plan from the current profile, in place. The
    /// plan is superseded wholesale, never merged.
    pub async fn regenerate_plan(
        &mut self,
        transport: &dyn AssessmentTransport,
        store: &dyn SessionStore,
    ) {
        let Some(profile) = self.profile.clone() else {
            self.fail(ERROR_NO_PROFILE);
            return;
        };
        self.begin(STATUS_PLANNING);

        match transport.generate_total_plan(&profile).await {
            Ok(plan) => {
                save_json(store, keys::TOTAL_PLAN, &plan);
                self.total_plan = Some(plan);
                self.settle();
            }
            Err(err) => {
                tracing::error!(error = %err, "total plan generation failed");
                self.fail(ERROR_PLAN);
            }
        }
    }

    /// "Generate Learning Plan": leaves profile review for topic selection.
    pub async fn request_plan(
        &mut self,
        transport: &dyn AssessmentTransport,
        store: &dyn SessionStore,
    ) {
        self.step = WizardStep::PlanSelection;
        self.regenerate_plan(transport, store).await;
    }

    /// Sync prefix of topic selection, separated out so the UI can paint the
    /// step change before the transport call suspends.
    pub fn begin_weekly_generation(&mut self, day_number: u32) {
        self.selected_topic_day = Some(day_number);
        self.step = WizardStep::WeeklyPlanGenerating;
        self.begin(STATUS_WEEKLY);
    }

    /// Topic chosen: materialize the weekly plan and synthesize the lesson
    /// handed to the hosting application. `Some` means the wizard is done.
    pub async fn select_topic(
        &mut self,
        day_number: u32,
        transport: &dyn AssessmentTransport,
        store: &dyn SessionStore,
    ) -> Option<WizardOutcome> {
        let Some(profile) = self.profile.clone() else {
            self.fail(ERROR_NO_PROFILE);
            return None;
        };

        self.begin_weekly_generation(day_number);

        let request = WeeklyPlanRequest {
            profile,
            selected_day: day_number,
        };

        match transport.generate_weekly_plan(&request).await {
            Ok(week) => {
                save_json(store, keys::WEEKLY_PLAN, &week);
                let Some(lesson) = synthesize_study_lesson(&request.profile, &week) else {
                    self.fail(ERROR_WEEKLY);
                    return None;
                };
                self.weekly_plan = Some(week);
                self.settle();
                Some(WizardOutcome {
                    lesson,
                    messages: self.messages.clone(),
                })
            }
            Err(err) => {
                tracing::error!(error = %err, "weekly plan generation failed");
                self.fail(ERROR_WEEKLY);
                None
            }
        }
    }

    pub fn back_to_chat(&mut self) {
        if self.step == WizardStep::ProfileReview && !self.is_loading {
            self.step = WizardStep::Chatting;
            self.error = None;
        }
    }

    pub fn back_to_profile(&mut self) {
        if self.step == WizardStep::PlanSelection && !self.is_loading {
            self.step = WizardStep::ProfileReview;
            self.error = None;
        }
    }

    /// Step-4 error recovery back to topic selection.
    pub fn back_to_plan(&mut self) {
        if self.step == WizardStep::WeeklyPlanGenerating && !self.is_loading {
            self.step = WizardStep::PlanSelection;
            self.error = None;
        }
    }
}

fn push_trimmed(entries: &mut Vec<String>, raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return false;
    }
    entries.push(trimmed.to_string());
    true
}

fn remove_at(entries: &mut Vec<String>, index: usize) -> bool {
    if index >= entries.len() {
        return false;
    }
    entries.remove(index);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ClientError;
    use crate::models::{EnglishLevel, KnowledgePoint, PlanTopic};
    use crate::services::storage::{load_json, MemorySessionStore};
    use futures::executor::block_on;
    use reqwest::StatusCode;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    fn transport_error() -> ClientError {
        ClientError::EmptyResponse(StatusCode::BAD_GATEWAY)
    }

    #[derive(Default)]
    struct ScriptedTransport {
        chat_replies: RefCell<VecDeque<ClientResult<ChatTurn>>>,
        profile_replies: RefCell<VecDeque<ClientResult<UserProfile>>>,
        plan_replies: RefCell<VecDeque<ClientResult<TotalPlan>>>,
        week_replies: RefCell<VecDeque<ClientResult<Vec<WeeklyPlanDay>>>>,
        chat_requests: RefCell<Vec<Vec<Message>>>,
        analyze_requests: RefCell<Vec<Vec<Message>>>,
        plan_requests: RefCell<Vec<UserProfile>>,
        week_requests: RefCell<Vec<WeeklyPlanRequest>>,
    }

    impl ScriptedTransport {
        fn reply_chat(self, content: &str) -> Self {
            self.chat_replies.borrow_mut().push_back(Ok(ChatTurn {
                content: content.to_string(),
            }));
            self
        }

        fn reply_profile(self, profile: UserProfile) -> Self {
            self.profile_replies.borrow_mut().push_back(Ok(profile));
            self
        }

        fn reply_plan(self, plan: TotalPlan) -> Self {
            self.plan_replies.borrow_mut().push_back(Ok(plan));
            self
        }

        fn reply_week(self, week: Vec<WeeklyPlanDay>) -> Self {
            self.week_replies.borrow_mut().push_back(Ok(week));
            self
        }

        fn fail_chat(self) -> Self {
            self.chat_replies
                .borrow_mut()
                .push_back(Err(transport_error()));
            self
        }

        fn fail_week(self) -> Self {
            self.week_replies
                .borrow_mut()
                .push_back(Err(transport_error()));
            self
        }
    }

    #[async_trait(?Send)]
    impl AssessmentTransport for ScriptedTransport {
        async fn initial_chat(&self, messages: &[Message]) -> ClientResult<ChatTurn> {
            self.chat_requests.borrow_mut().push(messages.to_vec());
            self.chat_replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(transport_error()))
        }

        async fn analyze_profile(&self, messages: &[Message]) -> ClientResult<UserProfile> {
            self.analyze_requests.borrow_mut().push(messages.to_vec());
            self.profile_replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(transport_error()))
        }

        async fn generate_total_plan(&self, profile: &UserProfile) -> ClientResult<TotalPlan> {
            self.plan_requests.borrow_mut().push(profile.clone());
            self.plan_replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(transport_error()))
        }

        async fn generate_weekly_plan(
            &self,
            request: &WeeklyPlanRequest,
        ) -> ClientResult<Vec<WeeklyPlanDay>> {
            self.week_requests.borrow_mut().push(request.clone());
            self.week_replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(transport_error()))
        }
    }

    fn sample_profile() -> UserProfile {
        UserProfile {
            english_level: EnglishLevel::Beginner,
            interests: vec!["movies".to_string()],
            learning_goals: vec!["travel".to_string()],
            study_time_per_day: 30,
            total_study_day: 30,
        }
    }

    fn sample_week() -> Vec<WeeklyPlanDay> {
        vec![WeeklyPlanDay {
            day_number: 1,
            topic: "Greetings".to_string(),
            materials: vec![],
            knowledge_points: vec![KnowledgePoint {
                name: "Basic greetings".to_string(),
                level: 1,
                examples: vec![],
                exercises: vec![],
                scenario: None,
            }],
            review_activities: vec![],
            estimated_time: 20,
        }]
    }

    fn review_state() -> WizardState {
        let mut state = WizardState::new();
        state.step = WizardStep::ProfileReview;
        state.messages.append(Message::user(ASSESSMENT_GREETING));
        state.messages.append(Message::assistant("Tell me more."));
        state.profile = Some(sample_profile());
        state
    }

    #[test]
    fn start_without_marker_stays_in_chat_with_two_messages() {
        let transport = ScriptedTransport::default().reply_chat("Nice to meet you!");
        let store = MemorySessionStore::default();
        let mut state = WizardState::new();

        block_on(state.start(&transport, &store));

        assert_eq!(state.step, WizardStep::Chatting);
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages.all()[0].content, ASSESSMENT_GREETING);
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert!(transport.analyze_requests.borrow().is_empty());
    }

    #[test]
    fn marker_in_first_reply_advances_to_profile_review() {
        let transport = ScriptedTransport::default()
            .reply_chat("Great, we are done. <ASSESSMENT_COMPLETE>")
            .reply_profile(sample_profile());
        let store = MemorySessionStore::default();
        let mut state = WizardState::new();

        block_on(state.start(&transport, &store));

        assert_eq!(state.step, WizardStep::ProfileReview);
        assert!(state.profile.is_some());
        // analyze-profile saw exactly the two turns of the conversation
        let analyzed = transport.analyze_requests.borrow();
        assert_eq!(analyzed.len(), 1);
        assert_eq!(analyzed[0].len(), 2);
        // the full conversation was persisted before analysis
        let persisted: Vec<Message> = load_json(&store, keys::CONVERSATION).unwrap();
        assert_eq!(persisted.len(), 2);
    }

    #[test]
    fn marker_check_is_case_sensitive() {
        let transport = ScriptedTransport::default().reply_chat("done <assessment_complete>");
        let store = MemorySessionStore::default();
        let mut state = WizardState::new();

        block_on(state.start(&transport, &store));

        assert_eq!(state.step, WizardStep::Chatting);
        assert!(transport.analyze_requests.borrow().is_empty());
    }

    #[test]
    fn marker_inside_formatting_still_counts() {
        let transport = ScriptedTransport::default()
            .reply_chat("All set! `<ASSESSMENT_COMPLETE>` Let's continue.")
            .reply_profile(sample_profile());
        let store = MemorySessionStore::default();
        let mut state = WizardState::new();

        block_on(state.start(&transport, &store));

        assert_eq!(state.step, WizardStep::ProfileReview);
    }

    #[test]
    fn start_is_a_no_op_once_conversation_exists() {
        let transport = ScriptedTransport::default();
        let store = MemorySessionStore::default();
        let mut state = review_state();
        let before = state.messages.len();

        block_on(state.start(&transport, &store));

        assert_eq!(state.messages.len(), before);
        assert!(transport.chat_requests.borrow().is_empty());
    }

    #[test]
    fn exchange_sends_the_unfiltered_full_log() {
        let transport = ScriptedTransport::default()
            .reply_chat("Hi there!")
            .reply_chat("Tell me about your hobbies.");
        let store = MemorySessionStore::default();
        let mut state = WizardState::new();

        block_on(state.start(&transport, &store));
        assert!(state.push_user_message("  I like movies.  "));
        block_on(state.exchange(&transport, &store));

        assert_eq!(state.messages.len(), 4);
        assert_eq!(state.messages.all()[2].content, "I like movies.");
        let requests = transport.chat_requests.borrow();
        assert_eq!(requests[1].len(), 3);
    }

    #[test]
    fn user_turns_are_rejected_while_loading_or_empty() {
        let mut state = WizardState::new();
        assert!(!state.push_user_message("   "));

        state.is_loading = true;
        assert!(!state.push_user_message("hello"));

        state.is_loading = false;
        state.step = WizardStep::ProfileReview;
        assert!(!state.push_user_message("hello"));
    }

    #[test]
    fn chat_failure_sets_error_and_keeps_step() {
        let transport = ScriptedTransport::default().fail_chat();
        let store = MemorySessionStore::default();
        let mut state = WizardState::new();

        block_on(state.start(&transport, &store));

        assert_eq!(state.step, WizardStep::Chatting);
        assert!(!state.is_loading);
        assert!(state.error.as_deref().unwrap_or_default().len() > 0);
        // retry is a fresh user action, never automatic
        assert_eq!(transport.chat_requests.borrow().len(), 1);
    }

    #[test]
    fn level_edit_regenerates_plan_from_updated_profile() {
        let transport = ScriptedTransport::default().reply_plan(TotalPlan {
            topics: vec![PlanTopic {
                day_number: 1,
                topic: "Workplace English".to_string(),
                description: "Meetings and email".to_string(),
            }],
        });
        let store = MemorySessionStore::default();
        let mut state = review_state();
        state.total_plan = Some(TotalPlan::default());

        let committed =
            state.apply_profile_edit(ProfileEdit::Level(EnglishLevel::Advanced), &store);
        assert!(committed);
        block_on(state.regenerate_plan(&transport, &store));

        assert_eq!(state.step, WizardStep::ProfileReview);
        let requests = transport.plan_requests.borrow();
        assert_eq!(requests[0].english_level, EnglishLevel::Advanced);
        assert_eq!(state.total_plan.as_ref().unwrap().topics.len(), 1);
        // the edit was persisted before the call
        let persisted: UserProfile = load_json(&store, keys::PROFILE).unwrap();
        assert_eq!(persisted.english_level, EnglishLevel::Advanced);
    }

    #[test]
    fn numeric_edits_stay_in_range_for_any_input() {
        let store = MemorySessionStore::default();
        let mut state = review_state();

        for raw in ["banana", "", "0", "-3", "2", "99999", "60"] {
            state.apply_profile_edit(ProfileEdit::StudyTime(raw.to_string()), &store);
            let minutes = state.profile.as_ref().unwrap().study_time_per_day;
            assert!((5..=240).contains(&minutes), "out of range for {raw:?}");

            state.apply_profile_edit(ProfileEdit::TotalDays(raw.to_string()), &store);
            let days = state.profile.as_ref().unwrap().total_study_day;
            assert!((7..=365).contains(&days), "out of range for {raw:?}");
        }
    }

    #[test]
    fn interest_edits_trim_reject_empty_and_keep_order() {
        let store = MemorySessionStore::default();
        let mut state = review_state();

        assert!(state.apply_profile_edit(ProfileEdit::AddInterest("  cooking ".into()), &store));
        assert!(!state.apply_profile_edit(ProfileEdit::AddInterest("   ".into()), &store));
        assert!(state.apply_profile_edit(ProfileEdit::AddInterest("hiking".into()), &store));

        let profile = state.profile.as_ref().unwrap();
        assert_eq!(profile.interests, vec!["movies", "cooking", "hiking"]);

        assert!(state.apply_profile_edit(ProfileEdit::RemoveInterest(1), &store));
        assert!(!state.apply_profile_edit(ProfileEdit::RemoveInterest(9), &store));
        let profile = state.profile.as_ref().unwrap();
        assert_eq!(profile.interests, vec!["movies", "hiking"]);
    }

    #[test]
    fn topic_selection_completes_with_day_zero_lesson() {
        let transport = ScriptedTransport::default().reply_week(sample_week());
        let store = MemorySessionStore::default();
        let mut state = review_state();
        state.step = WizardStep::PlanSelection;

        let outcome = block_on(state.select_topic(3, &transport, &store));

        let requests = transport.week_requests.borrow();
        assert_eq!(requests[0].selected_day, 3);
        assert_eq!(requests[0].profile, sample_profile());

        let outcome = outcome.expect("wizard should complete");
        let Lesson::Study(study) = &outcome.lesson else {
            panic!("expected a study lesson");
        };
        assert_eq!(study.estimated_time, 20);
        assert_eq!(study.knowledge_points[0].name, "Basic greetings");
        assert_eq!(outcome.messages.len(), state.messages.len());
        assert_eq!(state.selected_topic_day, Some(3));

        let persisted: Vec<WeeklyPlanDay> = load_json(&store, keys::WEEKLY_PLAN).unwrap();
        assert_eq!(persisted, sample_week());
    }

    #[test]
    fn weekly_failure_offers_recovery_back_to_selection() {
        let transport = ScriptedTransport::default().fail_week();
        let store = MemorySessionStore::default();
        let mut state = review_state();
        state.step = WizardStep::PlanSelection;

        let outcome = block_on(state.select_topic(2, &transport, &store));

        assert!(outcome.is_none());
        assert_eq!(state.step, WizardStep::WeeklyPlanGenerating);
        assert!(!state.is_loading);
        assert!(state.error.is_some());

        state.back_to_plan();
        assert_eq!(state.step, WizardStep::PlanSelection);
        assert!(state.error.is_none());
    }

    #[test]
    fn empty_weekly_plan_is_a_failure_not_a_lesson() {
        let transport = ScriptedTransport::default().reply_week(vec![]);
        let store = MemorySessionStore::default();
        let mut state = review_state();
        state.step = WizardStep::PlanSelection;

        let outcome = block_on(state.select_topic(1, &transport, &store));

        assert!(outcome.is_none());
        assert!(state.error.is_some());
        assert!(state.weekly_plan.is_none());
    }

    #[test]
    fn selection_without_profile_aborts() {
        let transport = ScriptedTransport::default().reply_week(sample_week());
        let store = MemorySessionStore::default();
        let mut state = WizardState::new();
        state.step = WizardStep::PlanSelection;

        let outcome = block_on(state.select_topic(1, &transport, &store));

        assert!(outcome.is_none());
        assert!(state.error.is_some());
        assert!(transport.week_requests.borrow().is_empty());
    }

    #[test]
    fn back_transitions_only_fire_from_their_step() {
        let mut state = review_state();
        state.back_to_profile();
        assert_eq!(state.step, WizardStep::ProfileReview);

        state.back_to_chat();
        assert_eq!(state.step, WizardStep::Chatting);

        state.back_to_chat();
        assert_eq!(state.step, WizardStep::Chatting);

        state.step = WizardStep::PlanSelection;
        state.back_to_profile();
        assert_eq!(state.step, WizardStep::ProfileReview);
    }

    #[test]
    fn log_only_ever_grows_across_a_session() {
        let transport = ScriptedTransport::default()
            .reply_chat("Hello!")
            .reply_chat("Interesting.")
            .fail_chat();
        let store = MemorySessionStore::default();
        let mut state = WizardState::new();
        let mut seen = 0;

        block_on(state.start(&transport, &store));
        assert!(state.messages.len() >= seen);
        seen = state.messages.len();

        state.push_user_message("I watch films.");
        block_on(state.exchange(&transport, &store));
        assert!(state.messages.len() >= seen);
        seen = state.messages.len();

        state.push_user_message("Again?");
        block_on(state.exchange(&transport, &store));
        assert!(state.messages.len() >= seen);
    }

    #[test]
    fn analyzed_profile_is_normalized_on_receipt() {
        let out_of_range = UserProfile {
            english_level: EnglishLevel::Advanced,
            interests: vec![],
            learning_goals: vec![],
            study_time_per_day: 600,
            total_study_day: 2,
        };
        let transport = ScriptedTransport::default()
            .reply_chat("<ASSESSMENT_COMPLETE>")
            .reply_profile(out_of_range);
        let store = MemorySessionStore::default();
        let mut state = WizardState::new();

        block_on(state.start(&transport, &store));

        let profile = state.profile.as_ref().unwrap();
        assert_eq!(profile.study_time_per_day, 240);
        assert_eq!(profile.total_study_day, 7);
    }
}
