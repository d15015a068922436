use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// One conversation turn. `content` is always present; the speech/display
/// variants only carry data for assistant turns.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    #[serde(rename = "speechText", default, skip_serializing_if = "Option::is_none")]
    pub speech_text: Option<String>,
    #[serde(rename = "displayText", default, skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            speech_text: None,
            display_text: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            speech_text: None,
            display_text: None,
        }
    }

    pub fn assistant_rich(
        content: impl Into<String>,
        speech_text: Option<String>,
        display_text: Option<String>,
    ) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            speech_text,
            display_text,
        }
    }
}

/// Ordered, append-only conversation log. A new session builds a new log
/// instead of clearing this one, so handed-out clones stay valid snapshots.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct MessageLog {
    entries: Vec<Message>,
}

impl MessageLog {
    pub fn append(&mut self, message: Message) {
        self.entries.push(message);
    }

    /// Full log in insertion order. Transport payloads always use this view.
    pub fn all(&self) -> &[Message] {
        &self.entries
    }

    /// Rendering view: system turns are never shown.
    pub fn visible(&self) -> impl Iterator<Item = &Message> + '_ {
        self.entries
            .iter()
            .filter(|message| message.role != MessageRole::System)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<Message>> for MessageLog {
    fn from(entries: Vec<Message>) -> Self {
        Self { entries }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnglishLevel {
    None,
    Beginner,
    Intermediate,
    Advanced,
}

impl EnglishLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            EnglishLevel::None => "none",
            EnglishLevel::Beginner => "beginner",
            EnglishLevel::Intermediate => "intermediate",
            EnglishLevel::Advanced => "advanced",
        }
    }

    /// First-letter-capitalized form used in lesson titles and summaries.
    pub fn title_case(self) -> &'static str {
        match self {
            EnglishLevel::None => "None",
            EnglishLevel::Beginner => "Beginner",
            EnglishLevel::Intermediate => "Intermediate",
            EnglishLevel::Advanced => "Advanced",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(EnglishLevel::None),
            "beginner" => Some(EnglishLevel::Beginner),
            "intermediate" => Some(EnglishLevel::Intermediate),
            "advanced" => Some(EnglishLevel::Advanced),
            _ => None,
        }
    }
}

impl Default for EnglishLevel {
    fn default() -> Self {
        EnglishLevel::Beginner
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub english_level: EnglishLevel,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub learning_goals: Vec<String>,
    pub study_time_per_day: u32,
    pub total_study_day: u32,
}

impl UserProfile {
    pub const STUDY_TIME_MIN: u32 = 5;
    pub const STUDY_TIME_MAX: u32 = 240;
    pub const STUDY_DAYS_MIN: u32 = 7;
    pub const STUDY_DAYS_MAX: u32 = 365;
    const DEFAULT_STUDY_TIME: u32 = 30;
    const DEFAULT_STUDY_DAYS: u32 = 30;

    /// Daily minutes from a raw input string: anything that is not a valid
    /// positive integer falls back to the default, then clamps to [5, 240].
    pub fn parse_study_time(raw: &str) -> u32 {
        parse_clamped(
            raw,
            Self::DEFAULT_STUDY_TIME,
            Self::STUDY_TIME_MIN,
            Self::STUDY_TIME_MAX,
        )
    }

    /// Total study days from a raw input string, defaulting to 30 and
    /// clamping to [7, 365].
    pub fn parse_study_days(raw: &str) -> u32 {
        parse_clamped(
            raw,
            Self::DEFAULT_STUDY_DAYS,
            Self::STUDY_DAYS_MIN,
            Self::STUDY_DAYS_MAX,
        )
    }

    /// Re-clamps both numeric fields. Applied to every profile the wizard
    /// accepts, whether analyzed from the conversation or edited by hand.
    pub fn normalize(&mut self) {
        self.study_time_per_day = self
            .study_time_per_day
            .clamp(Self::STUDY_TIME_MIN, Self::STUDY_TIME_MAX);
        self.total_study_day = self
            .total_study_day
            .clamp(Self::STUDY_DAYS_MIN, Self::STUDY_DAYS_MAX);
    }
}

fn parse_clamped(raw: &str, fallback: u32, min: u32, max: u32) -> u32 {
    let value = match raw.trim().parse::<u32>() {
        Ok(parsed) if parsed > 0 => parsed,
        _ => fallback,
    };
    value.clamp(min, max)
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TotalPlan {
    #[serde(default)]
    pub topics: Vec<PlanTopic>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlanTopic {
    pub day_number: u32,
    pub topic: String,
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeeklyPlanDay {
    pub day_number: u32,
    pub topic: String,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub knowledge_points: Vec<KnowledgePoint>,
    #[serde(default)]
    pub review_activities: Vec<ReviewActivity>,
    pub estimated_time: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Material {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub segment: String,
    pub content: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct KnowledgePoint {
    pub name: String,
    pub level: u32,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub exercises: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReviewActivity {
    pub point: String,
    pub context: String,
    pub difficulty: u32,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Menu,
    Document,
    Image,
    List,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    Markdown,
    Text,
    Table,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SceneResource {
    pub resource_type: ResourceType,
    pub title: String,
    pub content: String,
    pub display_format: DisplayFormat,
    #[serde(rename = "speechText", default, skip_serializing_if = "Option::is_none")]
    pub speech_text: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub description: String,
    pub your_role: String,
    pub student_role: String,
    #[serde(default)]
    pub additional_info: String,
    pub current_situation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<SceneResource>,
}

/// The unit handed to the chat-based tutoring view. The `mode` tag on the
/// wire selects the variant; every consumer matches exhaustively.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Lesson {
    Study(StudyLesson),
    Practice(PracticeLesson),
}

impl Lesson {
    pub fn topic(&self) -> &str {
        match self {
            Lesson::Study(lesson) => &lesson.topic,
            Lesson::Practice(lesson) => &lesson.topic,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct StudyLesson {
    pub topic: String,
    #[serde(rename = "speechText", default)]
    pub speech_text: String,
    #[serde(rename = "displayText", default)]
    pub display_text: String,
    #[serde(default)]
    pub knowledge_points: Vec<KnowledgePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_number: Option<u32>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub review_activities: Vec<ReviewActivity>,
    #[serde(default)]
    pub estimated_time: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PracticeLesson {
    pub topic: String,
    #[serde(rename = "speechText", default)]
    pub speech_text: String,
    #[serde(rename = "displayText", default)]
    pub display_text: String,
    pub scene: Scene,
}

/// Response body of `assessment/initial-chat`: the next assistant turn.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ChatTurn {
    pub content: String,
}

/// Request body of `assessment/generate-weekly-plan`: the profile fields
/// flattened alongside the chosen plan day.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct WeeklyPlanRequest {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub selected_day: u32,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LessonMode {
    Study,
    Practice,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct LessonCreateRequest {
    pub mode: LessonMode,
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_day: Option<StudyLesson>,
}

impl LessonCreateRequest {
    pub fn from_lesson(lesson: &Lesson) -> Self {
        match lesson {
            Lesson::Study(study) => Self {
                mode: LessonMode::Study,
                topic: study.topic.clone(),
                scene: None,
                assessment_day: Some(study.clone()),
            },
            Lesson::Practice(practice) => Self {
                mode: LessonMode::Practice,
                topic: practice.topic.clone(),
                scene: Some(practice.scene.clone()),
                assessment_day: None,
            },
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LessonCreateResponse {
    pub lesson: Lesson,
    #[serde(default)]
    pub conversation_history: Vec<Message>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct LessonChatRequest {
    pub lesson: Lesson,
    pub conversation_history: Vec<Message>,
    pub user_input: String,
}

/// `lesson/chat` either echoes the full history back or returns a single
/// assistant turn for the caller to append.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct LessonChatResponse {
    #[serde(default)]
    pub conversation_history: Option<Vec<Message>>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(rename = "speechText", default)]
    pub speech_text: Option<String>,
    #[serde(rename = "displayText", default)]
    pub display_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_wire_names_are_camel_case_for_variants_only() {
        let message = Message::assistant_rich(
            "Hello",
            Some("Hello".to_string()),
            Some("# Hello".to_string()),
        );
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["speechText"], "Hello");
        assert_eq!(json["displayText"], "# Hello");
        assert!(json.get("speech_text").is_none());
    }

    #[test]
    fn message_log_visible_filters_system_turns() {
        let mut log = MessageLog::default();
        log.append(Message {
            role: MessageRole::System,
            content: "prompt".to_string(),
            speech_text: None,
            display_text: None,
        });
        log.append(Message::user("hi"));
        log.append(Message::assistant("hello"));

        assert_eq!(log.all().len(), 3);
        let visible: Vec<_> = log.visible().collect();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|m| m.role != MessageRole::System));
    }

    #[test]
    fn study_time_parsing_defaults_and_clamps() {
        assert_eq!(UserProfile::parse_study_time("60"), 60);
        assert_eq!(UserProfile::parse_study_time("abc"), 30);
        assert_eq!(UserProfile::parse_study_time(""), 30);
        assert_eq!(UserProfile::parse_study_time("0"), 30);
        assert_eq!(UserProfile::parse_study_time("-12"), 30);
        assert_eq!(UserProfile::parse_study_time("3"), 5);
        assert_eq!(UserProfile::parse_study_time("9999"), 240);
    }

    #[test]
    fn study_days_parsing_defaults_and_clamps() {
        assert_eq!(UserProfile::parse_study_days("90"), 90);
        assert_eq!(UserProfile::parse_study_days("two weeks"), 30);
        assert_eq!(UserProfile::parse_study_days("2"), 7);
        assert_eq!(UserProfile::parse_study_days("1000"), 365);
    }

    #[test]
    fn profile_round_trips_preserving_list_order() {
        let profile = UserProfile {
            english_level: EnglishLevel::Intermediate,
            interests: vec!["movies".to_string(), "cooking".to_string()],
            learning_goals: vec!["travel".to_string(), "business".to_string()],
            study_time_per_day: 45,
            total_study_day: 60,
        };
        let json = serde_json::to_string(&profile).unwrap();
        let restored: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, profile);
        assert_eq!(restored.interests, vec!["movies", "cooking"]);
    }

    #[test]
    fn lesson_mode_tag_selects_variant() {
        let json = r##"{
            "mode": "practice",
            "topic": "Ordering food",
            "speechText": "Let's practice ordering.",
            "displayText": "# Practice",
            "scene": {
                "description": "A cafe",
                "your_role": "Waiter",
                "student_role": "Customer",
                "additional_info": "",
                "current_situation": "The customer just sat down"
            }
        }"##;
        let lesson: Lesson = serde_json::from_str(json).unwrap();
        match lesson {
            Lesson::Practice(practice) => {
                assert_eq!(practice.topic, "Ordering food");
                assert_eq!(practice.scene.your_role, "Waiter");
                assert!(practice.scene.resources.is_empty());
            }
            Lesson::Study(_) => panic!("expected practice variant"),
        }
    }

    #[test]
    fn lesson_rejects_unknown_mode() {
        let json = r#"{"mode": "review", "topic": "x"}"#;
        assert!(serde_json::from_str::<Lesson>(json).is_err());
    }

    #[test]
    fn study_lesson_serializes_with_mode_tag() {
        let lesson = Lesson::Study(StudyLesson {
            topic: "Small talk".to_string(),
            estimated_time: 30,
            ..StudyLesson::default()
        });
        let json = serde_json::to_value(&lesson).unwrap();
        assert_eq!(json["mode"], "study");
        assert_eq!(json["topic"], "Small talk");
    }

    #[test]
    fn weekly_plan_request_flattens_profile() {
        let request = WeeklyPlanRequest {
            profile: UserProfile {
                english_level: EnglishLevel::Beginner,
                interests: vec!["music".to_string()],
                learning_goals: vec![],
                study_time_per_day: 30,
                total_study_day: 30,
            },
            selected_day: 3,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["english_level"], "beginner");
        assert_eq!(json["selected_day"], 3);
        assert!(json.get("profile").is_none());
    }
}
