use crate::models::{Lesson, StudyLesson, UserProfile, WeeklyPlanDay};

/// Builds the study lesson handed to the tutoring view once a weekly plan
/// exists. The lesson body comes from day index 0; the remaining days only
/// appear in the display summary, since the tutoring chat consumes day-0
/// fields alone. Returns `None` when the plan came back empty.
pub fn synthesize_study_lesson(
    profile: &UserProfile,
    weekly_plan: &[WeeklyPlanDay],
) -> Option<Lesson> {
    let first_day = weekly_plan.first()?;

    let topic = format!(
        "English Learning for {} Level",
        profile.english_level.title_case()
    );

    let speech_text = format!(
        "Welcome to your personalized English learning journey! Based on your {} level \
         and interests in {}, we've created a custom plan for you.",
        profile.english_level.as_str(),
        profile.interests.join(", ")
    );

    let week_overview = weekly_plan
        .iter()
        .map(|day| format!("### Day {}: {}", day.day_number, day.topic))
        .collect::<Vec<_>>()
        .join("\n");

    let display_text = format!(
        "# Your Personalized English Learning Plan\n\n\
         ## Based on Your Profile:\n\
         - Level: {}\n\
         - Interests: {}\n\
         - Goals: {}\n\
         - Daily study time: {} minutes\n\n\
         ## This Week's Focus:\n{}",
        profile.english_level.as_str(),
        profile.interests.join(", "),
        profile.learning_goals.join(", "),
        profile.study_time_per_day,
        week_overview
    );

    Some(Lesson::Study(StudyLesson {
        topic,
        speech_text,
        display_text,
        knowledge_points: first_day.knowledge_points.clone(),
        day_number: None,
        materials: first_day.materials.clone(),
        review_activities: first_day.review_activities.clone(),
        estimated_time: first_day.estimated_time,
    }))
}
