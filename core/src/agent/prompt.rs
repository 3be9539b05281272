//! Prompt templates for the agent loop

use crate::agent::round_log::RoundLog;
use crate::tools::ToolRegistry;

/// System prompt used for the answer-only round after the budget runs out
pub const FORCED_FINAL_SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant. Provide a clear, concise answer.";

const SYSTEM_PROMPT_HEADER: &str = "You are an AI assistant with access to tools. When a user asks a question, you should:

1. Analyze what the user needs
2. Decide which tool(s) to use
3. Call the appropriate tool(s)
4. Provide a helpful response based on the tool results";

const SYSTEM_PROMPT_FOOTER: &str = r#"To use a tool, respond with a JSON object like this:
{
  "tool": "tool_name",
  "input": "tool input"
}

If you need multiple tools, you can call them sequentially.

If you have enough information to answer directly without tools, just provide the answer.

Be helpful, concise, and accurate."#;

/// Build the default system prompt, listing every registered tool in registration order
pub fn build_system_prompt(registry: &ToolRegistry) -> String {
    let tools: String = registry
        .iter()
        .map(|tool| format!("- {}: {}\n", tool.name(), first_sentence(tool.description())))
        .collect();

    format!(
        "{}\n\nAvailable tools:\n{}\n{}",
        SYSTEM_PROMPT_HEADER, tools, SYSTEM_PROMPT_FOOTER
    )
}

/// Build the user message for a regular round
///
/// The first round carries only the question; later rounds add every previous action.
pub fn build_round_prompt(user_prompt: &str, log: &RoundLog) -> String {
    if log.is_empty() {
        return format!("User question: {}\n\nWhat should I do?", user_prompt);
    }

    format!(
        "User question: {}\n\nPrevious actions:\n{}\nWhat should I do next? If you have enough information, provide the final answer.",
        user_prompt,
        log.to_bullets()
    )
}

/// Build the user message for the forced final round
pub fn build_final_prompt(user_prompt: &str, log: &RoundLog) -> String {
    format!(
        "User question: {}\n\nHere's what we found:\n{}\nPlease provide a final answer to the user's question based on this information.",
        user_prompt,
        log.to_bullets()
    )
}

fn first_sentence(description: &str) -> &str {
    match description.find(". ") {
        Some(idx) => &description[..idx + 1],
        None => description,
    }
}
