//! Session storage for the web server.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use surveyprep::{PipelineState, SourceMetadata, SurveyPrep};

use super::error::ApiError;

/// One uploaded table and its pipeline.
#[derive(Debug)]
pub struct Session {
    pub pipeline: PipelineState,
    pub source: SourceMetadata,
    /// Bumped on every applied operation.
    pub version: u64,
}

impl Session {
    pub fn new(pipeline: PipelineState, source: SourceMetadata) -> Self {
        Self {
            pipeline,
            source,
            version: 0,
        }
    }
}

/// Shared application state.
///
/// The map lock is only held to look sessions up; each session has its own
/// mutex, held across read, compute and write of one operation.
#[derive(Clone)]
pub struct AppState {
    sessions: Arc<RwLock<HashMap<String, Arc<Mutex<Session>>>>>,
    /// Ingestion front end shared by all uploads.
    pub prep: Arc<SurveyPrep>,
    /// Largest accepted request body.
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(max_upload_bytes: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            prep: Arc::new(SurveyPrep::new()),
            max_upload_bytes,
        }
    }

    /// Store a session and return its id.
    pub async fn insert(&self, session: Session) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions
            .write()
            .await
            .insert(id.clone(), Arc::new(Mutex::new(session)));
        id
    }

    pub async fn get(&self, id: &str) -> Result<Arc<Mutex<Session>>, ApiError> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Session not found: {}", id)))
    }

    pub async fn remove(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
