//! Course generation for a learning topic: prompt, strict validation, then
//! ordered persistence through a `CourseStore`.

pub mod schema;
pub mod store;

pub use schema::{parse_course, CourseModule, Difficulty, GeneratedCourse, Lesson};
pub use store::{CourseStore, LearningTopic, MemoryCourseStore, NewCourse, NewLesson, NewModule};

use tracing::{debug, info};

use crate::error::{CoreError, CoreResult};
use crate::llm::{prompts, FallbackClient, GenerationRequest};
use crate::util::is_blank;

/// Generate and persist a course for `topic_id`, returning the new course id.
///
/// The model output is fully validated before the first insert, so a schema
/// failure never leaves a partial course behind.
pub async fn generate_course(
    llm: &FallbackClient,
    store: &dyn CourseStore,
    topic_id: &str,
    excerpt_chars: usize,
) -> CoreResult<String> {
    if is_blank(topic_id) {
        return Err(CoreError::invalid_input("Topic ID is required"));
    }

    let topic = store
        .fetch_topic(topic_id)
        .await?
        .ok_or_else(|| CoreError::NotFound("Topic not found".to_string()))?;

    let topic_prompt = prompts::course_topic_prompt(
        &topic.title,
        topic.description.as_deref().filter(|s| !is_blank(s)),
        topic.context_area.as_deref().filter(|s| !is_blank(s)),
        &topic.difficulty,
    );

    info!("Generating course for topic {}", topic.id);
    let request = GenerationRequest::text(prompts::COURSE_SYSTEM_PROMPT)
        .with_text(topic_prompt.clone())
        .json();
    let raw = llm.invoke(&request).await?;
    let course = parse_course(&raw, excerpt_chars)?;

    persist_course(store, &topic.id, &topic_prompt, course).await
}

async fn persist_course(
    store: &dyn CourseStore,
    topic_id: &str,
    source_prompt: &str,
    course: GeneratedCourse,
) -> CoreResult<String> {
    let course_id = store
        .insert_course(NewCourse {
            learning_topic_id: topic_id.to_string(),
            title: course.title,
            short_summary: course.short_summary,
            difficulty: course.difficulty,
            estimated_total_minutes: course.estimated_total_minutes,
            status: "active".to_string(),
            source_prompt: source_prompt.to_string(),
        })
        .await?;

    for (module_index, module) in course.modules.into_iter().enumerate() {
        let module_id = store
            .insert_module(NewModule {
                course_id: course_id.clone(),
                order_index: module_index,
                title: module.title,
                summary: module.summary,
            })
            .await?;

        let lessons: Vec<NewLesson> = module
            .lessons
            .into_iter()
            .enumerate()
            .map(|(lesson_index, lesson)| NewLesson {
                module_id: module_id.clone(),
                order_index: lesson_index,
                title: lesson.title,
                objective: lesson.objective,
                key_points: lesson.key_points,
                estimated_minutes: lesson.estimated_minutes,
                practice_task: lesson.practice_task,
                quiz_question: lesson.quiz_question,
            })
            .collect();
        debug!("Inserting {} lessons for module {}", lessons.len(), module_id);
        store.insert_lessons(lessons).await?;
    }

    info!("Stored course {}", course_id);
    Ok(course_id)
}
