use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::llm::sanitize::parse_typed;
use crate::util::is_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Basic => "basic",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCourse {
    pub title: String,
    pub short_summary: String,
    pub difficulty: Difficulty,
    pub estimated_total_minutes: u32,
    pub modules: Vec<CourseModule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseModule {
    pub title: String,
    pub summary: String,
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub title: String,
    pub objective: String,
    pub key_points: Vec<String>,
    pub estimated_minutes: u32,
    pub practice_task: String,
    pub quiz_question: String,
}

impl GeneratedCourse {
    /// Structural checks serde cannot express: non-empty module and lesson
    /// lists and non-blank titles.
    pub fn validate(&self) -> CoreResult<()> {
        if is_blank(&self.title) {
            return Err(CoreError::schema("course title must not be empty"));
        }
        if self.modules.is_empty() {
            return Err(CoreError::schema("course must have at least one module"));
        }
        for (m, module) in self.modules.iter().enumerate() {
            if is_blank(&module.title) {
                return Err(CoreError::schema(format!("modules[{}].title must not be empty", m)));
            }
            if module.lessons.is_empty() {
                return Err(CoreError::schema(format!(
                    "modules[{}] must have at least one lesson",
                    m
                )));
            }
            for (l, lesson) in module.lessons.iter().enumerate() {
                if is_blank(&lesson.title) {
                    return Err(CoreError::schema(format!(
                        "modules[{}].lessons[{}].title must not be empty",
                        m, l
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Sanitize, decode and validate a course-generation response.
pub fn parse_course(raw: &str, excerpt_chars: usize) -> CoreResult<GeneratedCourse> {
    let course: GeneratedCourse = parse_typed(raw, excerpt_chars)?;
    course.validate()?;
    Ok(course)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn valid() -> Value {
        json!({
            "title": "Rust",
            "short_summary": "Intro",
            "difficulty": "intermediate",
            "estimated_total_minutes": 60,
            "modules": [{
                "title": "Ownership",
                "summary": "Moves",
                "lessons": [{
                    "title": "Moves",
                    "objective": "Understand moves",
                    "key_points": ["one owner"],
                    "estimated_minutes": 15,
                    "practice_task": "Write a function",
                    "quiz_question": "What moves?"
                }]
            }]
        })
    }

    #[test]
    fn test_valid_course_parses() {
        let course = parse_course(&valid().to_string(), 200).unwrap();
        assert_eq!(course.difficulty, Difficulty::Intermediate);
        assert_eq!(course.modules[0].lessons[0].estimated_minutes, 15);
    }

    #[test]
    fn test_fenced_course_parses() {
        let raw = format!("```json\n{}\n```", valid());
        assert!(parse_course(&raw, 200).is_ok());
    }

    #[test]
    fn test_missing_modules_is_schema_error() {
        let mut value = valid();
        value.as_object_mut().unwrap().remove("modules");
        let err = parse_course(&value.to_string(), 200).unwrap_err();
        assert_eq!(err.kind(), "schema_validation_error");
    }

    #[test]
    fn test_empty_modules_is_schema_error() {
        let mut value = valid();
        value["modules"] = json!([]);
        let err = parse_course(&value.to_string(), 200).unwrap_err();
        assert_eq!(err.kind(), "schema_validation_error");
    }

    #[test]
    fn test_module_without_lessons_is_schema_error() {
        let mut value = valid();
        value["modules"][0]["lessons"] = json!([]);
        let err = parse_course(&value.to_string(), 200).unwrap_err();
        assert!(err.to_string().contains("modules[0]"));
    }

    #[test]
    fn test_unknown_difficulty_is_schema_error() {
        let mut value = valid();
        value["difficulty"] = json!("expert");
        let err = parse_course(&value.to_string(), 200).unwrap_err();
        assert_eq!(err.kind(), "schema_validation_error");
    }

    #[test]
    fn test_lesson_missing_quiz_question_is_schema_error() {
        let mut value = valid();
        value["modules"][0]["lessons"][0]
            .as_object_mut()
            .unwrap()
            .remove("quiz_question");
        assert!(parse_course(&value.to_string(), 200).is_err());
    }

    #[test]
    fn test_non_json_is_malformed_output() {
        let err = parse_course("I could not build a course.", 200).unwrap_err();
        assert_eq!(err.kind(), "malformed_model_output");
    }
}
