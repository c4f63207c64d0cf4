//! Instruction prompt sent to the model.
//!
//! The quiz backend that consumes `/question` splits the generated text on the
//! markers below, so the default template pins the model to that layout.

use std::fmt;

/// Separator the consumer splits questions on.
pub const NEXT_QUESTION_MARKER: &str = "*Следующий вопрос*";
pub const CORRECT_ANSWER_MARKER: &str = "*правильный ответ*";
pub const EXPLANATION_MARKER: &str = "*объяснение*";

const PROMPT_PLACEHOLDER: &str = "{prompt}";
const NUMBER_PLACEHOLDER: &str = "{number}";

pub const DEFAULT_TEMPLATE: &str = "\
Generate {number} multiple-choice quiz questions on the topic: {prompt}.
Write the questions in the language of the topic.
Use exactly this layout for every question and nothing else:
*<question text>*
1)*<option>*
2)*<option>*
3)*<option>*
4)*<option>*
*правильный ответ*
<number of the correct option>
*объяснение*
<one sentence explaining the correct option>
*Следующий вопрос*";

/// Renders the model instruction from a template with `{prompt}` and
/// `{number}` placeholders.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl PromptBuilder {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn render(&self, prompt: &str, number: impl fmt::Display) -> String {
        // Number first: a prompt containing "{number}" must stay literal.
        self.template
            .replace(NUMBER_PLACEHOLDER, &number.to_string())
            .replace(PROMPT_PLACEHOLDER, prompt)
    }
}
