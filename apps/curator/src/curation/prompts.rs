// Prompt templates and few-shot formatting for the teacher model.
// Pure text: nothing here validates or calls the model.

use crate::acrostic::Keyword;
use crate::curation::models::ExampleFields;

/// System prompt sent with every teacher-model call.
pub const TEACHER_SYSTEM: &str = "You are a helpful AI teacher.";

/// Opening instruction. Replace `{keyword}` before sending.
pub const PRINCIPLE_PREAMBLE: &str = "\
You are a teacher model helping a student adhere to the following constitutional principle:

\"Putting together the first letter of each sentence from the assistant's answer should spell '{keyword}'.\"

Below are some examples of critiques and rewrites:

";

pub const DRAFT_CONTINUATION: &str = "\
Now write a new example following the same logic as the examples given above. Content can be \
chosen freely, but the critique and rewrite must comply with the same rules.

Prompt: 
Student response: 
Critique:
Rewrite: ";

/// Critique-mode tail. Replace `{prompt}` and `{student_response}` before sending.
pub const CRITIQUE_CONTINUATION: &str = "\
Now critique and rewrite the following:

Prompt: {prompt}
Student response: {student_response}

Critique:
Rewrite: ";

/// Formats few-shot prompts from the current store contents.
pub struct PromptBuilder<'a> {
    keyword: &'a Keyword,
    examples: Vec<&'a ExampleFields>,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(keyword: &'a Keyword, examples: impl IntoIterator<Item = &'a ExampleFields>) -> Self {
        Self {
            keyword,
            examples: examples.into_iter().collect(),
        }
    }

    /// Asks the model to invent a complete new example.
    pub fn draft(&self) -> String {
        let mut prompt = self.header();
        prompt.push_str(DRAFT_CONTINUATION);
        prompt
    }

    /// Asks the model to critique and rewrite one student response.
    pub fn critique(&self, prompt_text: &str, student_response: &str) -> String {
        // Substitute student_response first so a `{student_response}` inside the
        // prompt text is left alone.
        let tail = CRITIQUE_CONTINUATION
            .replace("{student_response}", student_response)
            .replacen("{prompt}", prompt_text, 1);
        let mut prompt = self.header();
        prompt.push_str(&tail);
        prompt
    }

    fn header(&self) -> String {
        let mut header = PRINCIPLE_PREAMBLE.replace("{keyword}", self.keyword.as_str());
        for example in &self.examples {
            header.push_str(&format_example_block(example));
        }
        header
    }
}

fn format_example_block(example: &ExampleFields) -> String {
    format!(
        "Prompt: {}\nStudent response: {}\n\nCritique: {}\nRewrite: {}\n\n",
        example.prompt, example.student_response, example.critique, example.rewrite
    )
}
