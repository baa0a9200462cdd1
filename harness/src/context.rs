use crate::config::RunConfig;
use crate::results::TestResults;
use client::{ApiTransport, ResourceApi, ResourceKind};
use std::sync::Arc;

/// Everything a run mutates, passed explicitly through each suite.
pub struct RunContext {
    pub api: ResourceApi,
    pub results: TestResults,
    pub created_teachers: Vec<String>,
    pub created_students: Vec<String>,
    pub config: RunConfig,
}

impl RunContext {
    pub fn new(transport: Arc<dyn ApiTransport>, config: RunConfig) -> Self {
        Self {
            api: ResourceApi::new(transport),
            results: TestResults::new(),
            created_teachers: Vec::new(),
            created_students: Vec::new(),
            config,
        }
    }

    pub fn created(&self, kind: ResourceKind) -> &[String] {
        match kind {
            ResourceKind::Teacher => &self.created_teachers,
            ResourceKind::Student => &self.created_students,
        }
    }

    /// First record of `kind` created in this run, used by later steps.
    pub fn primary_id(&self, kind: ResourceKind) -> Option<String> {
        self.created(kind).first().cloned()
    }

    pub fn remember(&mut self, kind: ResourceKind, id: impl Into<String>) {
        match kind {
            ResourceKind::Teacher => self.created_teachers.push(id.into()),
            ResourceKind::Student => self.created_students.push(id.into()),
        }
    }
}
