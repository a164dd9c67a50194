//! Teacher-model workflows: critique a student sample, or draft a fresh example.
//!
//! Flow: prompt (built by the caller from a store snapshot) → one model call →
//! marker parse → acrostic verdict. Nothing here touches the store; the operator
//! decides whether to admit the result through the regular add path.

use serde::Serialize;
use tracing::{info, warn};

use crate::acrostic::{validate_acrostic, AcrosticMatch, Keyword};
use crate::curation::models::{ExampleFields, StudentSample};
use crate::curation::prompts::TEACHER_SYSTEM;
use crate::curation::response_parser::{parse_critique_response, parse_draft_response};
use crate::errors::AppError;
use crate::llm_client::CompletionProvider;

/// Expected vs. detected initials, for display side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcrosticVerdict {
    pub compliant: bool,
    pub expected: String,
    pub detected: String,
    pub message: String,
}

impl AcrosticVerdict {
    pub fn passed(matched: &AcrosticMatch) -> Self {
        Self {
            compliant: true,
            expected: matched.keyword.clone(),
            detected: matched.initials.clone(),
            message: format!("{}-compliant", matched.keyword),
        }
    }

    /// Runs the acrostic rule (only) on `fields.rewrite`.
    pub fn of(fields: &ExampleFields, keyword: &Keyword) -> Self {
        match validate_acrostic(&fields.rewrite, keyword) {
            Ok(matched) => Self::passed(&matched),
            Err(e) => {
                let (expected, detected) = e.initials().unwrap_or((keyword.as_str(), ""));
                Self {
                    compliant: false,
                    expected: expected.to_string(),
                    detected: detected.to_string(),
                    message: e.to_string(),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CritiqueOutcome {
    pub full_prompt: String,
    pub raw_output: String,
    pub critique: String,
    pub rewrite: String,
    pub verdict: AcrosticVerdict,
}

#[derive(Debug, Clone, Serialize)]
pub struct DraftOutcome {
    pub raw_output: String,
    pub fields: ExampleFields,
    pub verdict: AcrosticVerdict,
}

/// Asks the teacher model to critique and rewrite `sample`.
pub async fn critique_sample(
    llm: &dyn CompletionProvider,
    full_prompt: String,
    sample: &StudentSample,
    keyword: &Keyword,
) -> Result<CritiqueOutcome, AppError> {
    let raw_output = llm.complete(TEACHER_SYSTEM, &full_prompt).await?;
    let parsed = parse_critique_response(&raw_output)?;

    let fields = ExampleFields {
        prompt: sample.user.clone(),
        student_response: sample.bot.clone(),
        critique: parsed.critique,
        rewrite: parsed.rewrite,
    };
    let verdict = AcrosticVerdict::of(&fields, keyword);
    if verdict.compliant {
        info!("Teacher rewrite is {keyword}-compliant");
    } else {
        warn!(
            "Teacher rewrite failed the acrostic: expected {}, detected {}",
            verdict.expected, verdict.detected
        );
    }

    Ok(CritiqueOutcome {
        full_prompt,
        raw_output,
        critique: fields.critique,
        rewrite: fields.rewrite,
        verdict,
    })
}

/// Asks the teacher model for a brand-new example in the few-shot style.
pub async fn draft_example(
    llm: &dyn CompletionProvider,
    full_prompt: &str,
    keyword: &Keyword,
) -> Result<DraftOutcome, AppError> {
    let raw_output = llm.complete(TEACHER_SYSTEM, full_prompt).await?;
    let fields = parse_draft_response(&raw_output)?;
    let verdict = AcrosticVerdict::of(&fields, keyword);
    info!(
        "Drafted example (compliant={}, detected={})",
        verdict.compliant, verdict.detected
    );

    Ok(DraftOutcome {
        raw_output,
        fields,
        verdict,
    })
}

#[cfg(test)]
pub(crate) mod stub {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{CompletionProvider, LlmError};

    /// Replays canned replies in order and records every prompt it receives.
    #[derive(Default)]
    pub struct ScriptedProvider {
        replies: Mutex<Vec<Result<String, LlmError>>>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        pub fn replying(mut replies: Vec<Result<String, LlmError>>) -> Self {
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn with_text(text: &str) -> Self {
            Self::replying(vec![Ok(text.to_string())])
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn complete(&self, _system: &str, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(LlmError::EmptyContent))
        }
    }
}
