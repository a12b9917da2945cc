//! Chat session for one JD assessment: the seeded history plus every exchange after it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::assessment::prompts::{
    ASSESSMENT_QUESTIONS, EMPTY_RESPONSE_WARNING, SEED_HEADER, SEED_JD_TEMPLATE, WELCOME_MESSAGE,
};
use crate::errors::AppError;
use crate::llm_client::ChatBackend;
use crate::models::chat::Turn;

/// Number of turns every session starts with.
pub const SEED_TURNS: usize = 2;

/// Sidebar content for a JD: the JD itself plus the fixed assessment questions.
#[derive(Debug, Clone, Serialize)]
pub struct JdHighlights {
    pub job_description: String,
    pub assessment_questions: Vec<String>,
}

pub fn jd_highlights(jd_text: &str) -> JdHighlights {
    JdHighlights {
        job_description: jd_text.to_string(),
        assessment_questions: ASSESSMENT_QUESTIONS.iter().map(|q| q.to_string()).collect(),
    }
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    pub id: Uuid,
    pub job_description: String,
    pub history: Vec<Turn>,
    pub created_at: DateTime<Utc>,
}

/// Opens a session seeded with the JD user turn and the welcome model turn.
/// The JD is embedded verbatim; its content is not inspected.
pub fn start_jd_assessment(jd_text: &str) -> ChatSession {
    let history = vec![
        Turn::user(vec![
            SEED_HEADER.to_string(),
            SEED_JD_TEMPLATE.replace("{jd_text}", jd_text),
        ]),
        Turn::model(WELCOME_MESSAGE),
    ];

    ChatSession {
        id: Uuid::new_v4(),
        job_description: jd_text.to_string(),
        history,
        created_at: Utc::now(),
    }
}

impl ChatSession {
    /// Appends `response` as a user turn, sends the whole history, and records the reply.
    ///
    /// Empty input never reaches the backend. If the backend fails, the pending
    /// user turn is dropped so the history only holds completed exchanges.
    pub async fn send_message(
        &mut self,
        backend: &dyn ChatBackend,
        response: &str,
    ) -> Result<String, AppError> {
        if response.is_empty() {
            return Err(AppError::Validation(EMPTY_RESPONSE_WARNING.to_string()));
        }

        self.history.push(Turn::user(vec![response.to_string()]));
        debug!(
            "Session {}: sending {} turns to model",
            self.id,
            self.history.len()
        );

        match backend.generate(&self.history).await {
            Ok(reply) => {
                self.history.push(Turn::model(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                warn!("Session {}: model call failed, discarding pending turn", self.id);
                self.history.pop();
                Err(AppError::Llm(e))
            }
        }
    }

    /// Number of answers the user has submitted successfully.
    pub fn exchange_count(&self) -> usize {
        self.history.len().saturating_sub(SEED_TURNS) / 2
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::models::chat::Role;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Backend that replays canned replies and records every history it was sent.
    #[derive(Default)]
    pub struct ScriptedBackend {
        pub replies: Mutex<Vec<Result<String, LlmError>>>,
        pub calls: Mutex<Vec<Vec<Turn>>>,
    }

    impl ScriptedBackend {
        pub fn replying(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().rev().map(|r| Ok(r.to_string())).collect()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                replies: Mutex::new(vec![Err(LlmError::EmptyContent)]),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn generate(&self, history: &[Turn]) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push(history.to_vec());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(LlmError::EmptyContent))
        }
    }

    const JD: &str = "Senior Backend Engineer, 5 years Go experience";

    #[test]
    fn test_start_seeds_exactly_two_turns() {
        let session = start_jd_assessment(JD);
        assert_eq!(session.history.len(), SEED_TURNS);
        assert_eq!(session.history[0].role, Role::User);
        assert_eq!(session.history[1].role, Role::Model);
        assert_eq!(session.exchange_count(), 0);
    }

    #[test]
    fn test_seed_user_turn_embeds_jd_verbatim() {
        let session = start_jd_assessment(JD);
        let parts = &session.history[0].parts;
        assert_eq!(parts[0], "Job Description Based Assessment Simulation\n\n");
        assert_eq!(
            parts[1],
            "**Job Description:**\nSenior Backend Engineer, 5 years Go experience\n\n"
        );
        assert_eq!(session.job_description, JD);
    }

    #[test]
    fn test_seed_model_turn_is_welcome_message() {
        let session = start_jd_assessment(JD);
        let welcome = session.history[1].parts.concat();
        assert!(welcome.starts_with("Welcome to the Job Description Based Assessment Simulation!\n"));
        assert!(welcome.ends_with("aligns with the provided JD."));
    }

    #[test]
    fn test_malformed_jd_passes_through_unchanged() {
        let jd = "{jd_text} <b>unclosed\n\n\t".repeat(500);
        let session = start_jd_assessment(&jd);
        assert!(session.history[0].parts[1].contains(&jd));
    }

    #[test]
    fn test_highlights_echo_jd_and_five_questions() {
        let highlights = jd_highlights(JD);
        assert_eq!(highlights.job_description, JD);
        assert_eq!(
            highlights.assessment_questions,
            vec![
                "1. How does your experience align with the responsibilities listed in the JD?",
                "2. Which key skills from the JD do you excel at?",
                "3. Can you share a project or experience demonstrating your fit for this role?",
                "4. What challenges do you foresee in this role, and how would you address them?",
                "5. What unique value can you bring to this position?",
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_response_never_calls_backend() {
        let backend = ScriptedBackend::replying(&["unused"]);
        let mut session = start_jd_assessment(JD);

        let err = session.send_message(&backend, "").await.unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert_eq!(msg, "Please enter a response before submitting.")
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert_eq!(backend.call_count(), 0);
        assert_eq!(session.history.len(), SEED_TURNS);
    }

    #[tokio::test]
    async fn test_whitespace_response_is_forwarded_verbatim() {
        let backend = ScriptedBackend::replying(&["ok"]);
        let mut session = start_jd_assessment(JD);

        let reply = session.send_message(&backend, "   ").await.unwrap();

        assert_eq!(reply, "ok");
        assert_eq!(backend.call_count(), 1);
        assert_eq!(session.history.len(), SEED_TURNS + 2);
        assert_eq!(session.history[SEED_TURNS].parts, vec!["   ".to_string()]);
        assert_eq!(session.history[SEED_TURNS + 1].role, Role::Model);
    }

    #[tokio::test]
    async fn test_response_appended_before_remote_call() {
        let backend = ScriptedBackend::replying(&["Solid answer."]);
        let mut session = start_jd_assessment(JD);

        let reply = session.send_message(&backend, "I built Go services").await.unwrap();
        assert_eq!(reply, "Solid answer.");

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), SEED_TURNS + 1);
        let last = calls[0].last().unwrap();
        assert_eq!(last.role, Role::User);
        assert_eq!(last.parts, vec!["I built Go services".to_string()]);
    }

    #[tokio::test]
    async fn test_two_responses_grow_history_by_four_turns() {
        let backend = ScriptedBackend::replying(&["first", "second"]);
        let mut session = start_jd_assessment(JD);

        session.send_message(&backend, "answer one").await.unwrap();
        let second = session.send_message(&backend, "answer two").await.unwrap();

        assert_eq!(second, "second");
        assert_eq!(session.history.len(), SEED_TURNS + 4);
        assert_eq!(session.exchange_count(), 2);
        let roles: Vec<Role> = session.history.iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Model, Role::User, Role::Model, Role::User, Role::Model]
        );
        // The second call carries the first exchange as context.
        assert_eq!(backend.calls.lock().unwrap()[1].len(), SEED_TURNS + 3);
    }

    #[tokio::test]
    async fn test_backend_failure_propagates_and_drops_pending_turn() {
        let backend = ScriptedBackend::failing();
        let mut session = start_jd_assessment(JD);

        let err = session.send_message(&backend, "answer").await.unwrap_err();
        assert!(matches!(err, AppError::Llm(LlmError::EmptyContent)));
        assert_eq!(backend.call_count(), 1);
        assert_eq!(session.history.len(), SEED_TURNS);
    }
}
