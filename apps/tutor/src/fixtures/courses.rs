use crate::models::{KnowledgePoint, Lesson, PracticeLesson, Scene, StudyLesson};

/// Built-in demonstration courses for the browse view: one study unit and
/// one role-play scenario over the same topic.
pub fn sample_courses() -> Vec<Lesson> {
    vec![
        Lesson::Study(StudyLesson {
            topic: "Greetings and Introductions in the Workplace".to_string(),
            speech_text: "Let me introduce you to basic workplace greetings and introductions..."
                .to_string(),
            display_text: "# Workplace Greetings and Introductions\n\n## Key Points:\n- Basic greetings\n- Self-introduction\n- Professional etiquette"
                .to_string(),
            knowledge_points: vec![
                KnowledgePoint {
                    name: "Basic Greetings".to_string(),
                    level: 1,
                    examples: vec!["Good morning".to_string(), "Hello everyone".to_string()],
                    exercises: vec!["Practice formal greetings".to_string()],
                    scenario: None,
                },
                KnowledgePoint {
                    name: "Self Introduction".to_string(),
                    level: 1,
                    examples: vec!["My name is...".to_string(), "I work in...".to_string()],
                    exercises: vec!["Introduce yourself to the team".to_string()],
                    scenario: None,
                },
            ],
            day_number: None,
            materials: vec![],
            review_activities: vec![],
            estimated_time: 30,
        }),
        Lesson::Practice(PracticeLesson {
            topic: "Greetings and Introductions in the Workplace".to_string(),
            speech_text: "Now, let's practice introducing yourself in a professional setting..."
                .to_string(),
            display_text: "# Practice Scenario\n\nYou are a new employee attending your first team meeting.\n\n## Key Phrases:\n- \"Hello everyone, I'm [name]\"\n- \"I'm excited to join the team\""
                .to_string(),
            scene: Scene {
                description: "First day at a new office".to_string(),
                your_role: "New employee".to_string(),
                student_role: "Team member".to_string(),
                additional_info: "This is your first team meeting".to_string(),
                current_situation: "You just entered the meeting room where your new team is waiting"
                    .to_string(),
                resources: vec![],
            },
        }),
    ]
}
