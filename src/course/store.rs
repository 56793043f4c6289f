//! Persistence seam for generated courses.
//!
//! Storage is parent/child: topic → course → module → lesson, with modules
//! and lessons carrying an explicit `order_index`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::schema::Difficulty;
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningTopic {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub context_area: Option<String>,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

fn default_difficulty() -> String {
    "basic".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCourse {
    pub learning_topic_id: String,
    pub title: String,
    pub short_summary: String,
    pub difficulty: Difficulty,
    pub estimated_total_minutes: u32,
    pub status: String,
    pub source_prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewModule {
    pub course_id: String,
    pub order_index: usize,
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewLesson {
    pub module_id: String,
    pub order_index: usize,
    pub title: String,
    pub objective: String,
    pub key_points: Vec<String>,
    pub estimated_minutes: u32,
    pub practice_task: String,
    pub quiz_question: String,
}

#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn fetch_topic(&self, topic_id: &str) -> CoreResult<Option<LearningTopic>>;

    /// Returns the new course id.
    async fn insert_course(&self, course: NewCourse) -> CoreResult<String>;

    /// Returns the new module id.
    async fn insert_module(&self, module: NewModule) -> CoreResult<String>;

    async fn insert_lessons(&self, lessons: Vec<NewLesson>) -> CoreResult<()>;
}

#[derive(Debug, Default)]
struct Tables {
    courses: Vec<(String, NewCourse)>,
    modules: Vec<(String, NewModule)>,
    lessons: Vec<NewLesson>,
    inserts: usize,
}

/// In-process store, seeded with topics. Used by `serve` and by tests.
#[derive(Debug, Default)]
pub struct MemoryCourseStore {
    topics: HashMap<String, LearningTopic>,
    tables: Mutex<Tables>,
    next_id: AtomicU64,
}

impl MemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_topics(topics: Vec<LearningTopic>) -> Self {
        Self {
            topics: topics.into_iter().map(|t| (t.id.clone(), t)).collect(),
            ..Self::default()
        }
    }

    /// Load seed topics from a JSON array file.
    pub fn from_topics_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read topics file {}", path.display()))?;
        let topics: Vec<LearningTopic> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse topics file {}", path.display()))?;
        Ok(Self::with_topics(topics))
    }

    fn lock(&self) -> CoreResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| CoreError::Persistence("course store lock poisoned".to_string()))
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Total insert calls so far, across all tables.
    pub fn insert_count(&self) -> usize {
        self.tables.lock().map(|t| t.inserts).unwrap_or(0)
    }

    pub fn courses(&self) -> Vec<(String, NewCourse)> {
        self.tables
            .lock()
            .map(|t| t.courses.clone())
            .unwrap_or_default()
    }

    pub fn modules(&self) -> Vec<(String, NewModule)> {
        self.tables
            .lock()
            .map(|t| t.modules.clone())
            .unwrap_or_default()
    }

    pub fn lessons(&self) -> Vec<NewLesson> {
        self.tables
            .lock()
            .map(|t| t.lessons.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CourseStore for MemoryCourseStore {
    async fn fetch_topic(&self, topic_id: &str) -> CoreResult<Option<LearningTopic>> {
        Ok(self.topics.get(topic_id).cloned())
    }

    async fn insert_course(&self, course: NewCourse) -> CoreResult<String> {
        let id = self.next_id("course");
        let mut tables = self.lock()?;
        tables.inserts += 1;
        tables.courses.push((id.clone(), course));
        Ok(id)
    }

    async fn insert_module(&self, module: NewModule) -> CoreResult<String> {
        let id = self.next_id("module");
        let mut tables = self.lock()?;
        tables.inserts += 1;
        tables.modules.push((id.clone(), module));
        Ok(id)
    }

    async fn insert_lessons(&self, lessons: Vec<NewLesson>) -> CoreResult<()> {
        let mut tables = self.lock()?;
        tables.inserts += 1;
        tables.lessons.extend(lessons);
        Ok(())
    }
}
