//! AgentCore implementation

use super::config::AgentConfig;
use crate::agent::interpreter::{interpret, ParsedResponse};
use crate::agent::prompt::{
    build_final_prompt, build_round_prompt, build_system_prompt, FORCED_FINAL_SYSTEM_PROMPT,
};
use crate::agent::round_log::{RoundLog, RoundRecord};
use crate::agent::{Agent, AgentExecution, AgentResult};
use crate::error::Result;
use crate::llm::{ChatOptions, LlmClient, LlmMessage};
use crate::output::{AgentEvent, AgentOutput};
use crate::tools::utils::truncate_chars;
use crate::tools::{ToolCall, ToolRegistry};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Characters of raw model text written to debug logs
const LOG_EXCERPT_CHARS: usize = 200;

/// The tool orchestration loop
///
/// Holds only shared, read-only collaborators. Every call to [`AgentCore::execute_task`]
/// builds its own round log, so one instance can serve concurrent requests.
pub struct AgentCore {
    config: AgentConfig,
    llm_client: Arc<dyn LlmClient>,
    registry: Arc<ToolRegistry>,
    output: Arc<dyn AgentOutput>,
    default_system_prompt: String,
}

/// State of a single task invocation
struct Invocation<'a> {
    task_id: String,
    user_prompt: &'a str,
    system_prompt: &'a str,
    options: ChatOptions,
    round_log: RoundLog,
    started: Instant,
}

impl AgentCore {
    pub fn new(
        config: AgentConfig,
        llm_client: Arc<dyn LlmClient>,
        registry: Arc<ToolRegistry>,
        output: Arc<dyn AgentOutput>,
    ) -> Self {
        let default_system_prompt = config
            .system_prompt
            .clone()
            .unwrap_or_else(|| build_system_prompt(&registry));

        Self {
            config,
            llm_client,
            registry,
            output,
            default_system_prompt,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn llm_client(&self) -> &Arc<dyn LlmClient> {
        &self.llm_client
    }

    /// Get the system prompt used when a task brings no instructions of its own
    pub fn default_system_prompt(&self) -> &str {
        &self.default_system_prompt
    }

    async fn emit(&self, event: AgentEvent) {
        if let Err(e) = self.output.emit_event(event).await {
            tracing::debug!("Failed to emit agent event: {}", e);
        }
    }

    /// Run the loop for one task and return the full execution record.
    ///
    /// Model failures propagate; unknown tools and tool errors are recorded and the loop
    /// carries on.
    pub async fn execute_task(
        &self,
        user_prompt: &str,
        system_instructions: Option<&str>,
        model: Option<&str>,
    ) -> Result<AgentExecution> {
        let mut invocation = Invocation {
            task_id: uuid::Uuid::new_v4().to_string(),
            user_prompt,
            system_prompt: system_instructions.unwrap_or(&self.default_system_prompt),
            options: ChatOptions::with_temperature(self.config.temperature)
                .model(model.map(str::to_string)),
            round_log: RoundLog::new(),
            started: Instant::now(),
        };

        tracing::info!(
            task_id = %invocation.task_id,
            "Starting task: '{}'",
            user_prompt
        );
        self.emit(AgentEvent::TaskStarted {
            task_id: invocation.task_id.clone(),
            prompt: user_prompt.to_string(),
            max_iterations: self.config.max_iterations,
        })
        .await;

        for round in 1..=self.config.max_iterations {
            self.emit(AgentEvent::RoundStarted {
                round,
                max_iterations: self.config.max_iterations,
            })
            .await;

            let prompt = build_round_prompt(invocation.user_prompt, &invocation.round_log);
            let raw = self
                .ask(invocation.system_prompt, prompt, &invocation.options)
                .await?;

            match interpret(&raw) {
                ParsedResponse::FinalAnswer { text } => {
                    tracing::info!(task_id = %invocation.task_id, "Final answer after {} round(s)", round);
                    return Ok(self.finish(invocation, text, round, false).await);
                }
                ParsedResponse::ToolCall(call) => {
                    let record = self.dispatch(round, &call).await;
                    invocation.round_log.push(record);
                }
            }
        }

        let rounds = self.config.max_iterations;
        tracing::info!(
            task_id = %invocation.task_id,
            "Max iterations ({}) reached, requesting final answer",
            rounds
        );
        self.emit(AgentEvent::ForcedFinal { rounds }).await;

        let prompt = build_final_prompt(invocation.user_prompt, &invocation.round_log);
        let answer = self
            .ask(FORCED_FINAL_SYSTEM_PROMPT, prompt, &invocation.options)
            .await?;

        Ok(self.finish(invocation, answer, rounds, true).await)
    }

    /// Run a task and always come back with text for the user.
    ///
    /// Any error escaping the loop is logged and turned into an apology.
    pub async fn run_task(
        &self,
        user_prompt: &str,
        system_instructions: Option<&str>,
        model: Option<&str>,
    ) -> String {
        match self
            .execute_task(user_prompt, system_instructions, model)
            .await
        {
            Ok(execution) => execution.final_answer,
            Err(e) => {
                tracing::error!("Error during agentic processing: {:?}", e);
                format!(
                    "I encountered an error: {}\n\nPlease try rephrasing your query.",
                    e
                )
            }
        }
    }

    async fn ask(&self, system_prompt: &str, prompt: String, options: &ChatOptions) -> Result<String> {
        tracing::debug!("Prompt: {}", prompt);

        let messages = vec![LlmMessage::system(system_prompt), LlmMessage::user(prompt)];
        let response = self
            .llm_client
            .chat_completion(messages, Some(options.clone()))
            .await?;

        tracing::debug!(
            "LLM response: {}",
            truncate_chars(&response.text, LOG_EXCERPT_CHARS)
        );
        Ok(response.text)
    }

    /// Resolve and invoke one tool; the outcome always becomes a round record
    async fn dispatch(&self, round: usize, call: &ToolCall) -> RoundRecord {
        let Some(tool) = self.registry.resolve(&call.tool) else {
            tracing::warn!("Unknown tool requested: {}", call.tool);
            self.emit(AgentEvent::UnknownTool {
                round,
                tool: call.tool.clone(),
            })
            .await;
            return RoundRecord::unknown(&call.tool);
        };

        tracing::info!("Dispatching {}('{}')", call.tool, call.input);
        self.emit(AgentEvent::ToolDispatched {
            round,
            tool: call.tool.clone(),
            input: call.input.clone(),
        })
        .await;

        match tool.execute(&call.input).await {
            Ok(output) => {
                let record =
                    RoundRecord::success(&call.tool, &call.input, &output, self.config.excerpt_chars);
                if let RoundRecord::ToolSuccess { output_excerpt, .. } = &record {
                    self.emit(AgentEvent::ToolCompleted {
                        round,
                        tool: call.tool.clone(),
                        excerpt: output_excerpt.clone(),
                    })
                    .await;
                }
                record
            }
            Err(e) => {
                tracing::warn!("Tool {} failed: {}", call.tool, e);
                self.emit(AgentEvent::ToolFailed {
                    round,
                    tool: call.tool.clone(),
                    error: e.to_string(),
                })
                .await;
                RoundRecord::failure(&call.tool, &call.input, e)
            }
        }
    }

    async fn finish(
        &self,
        invocation: Invocation<'_>,
        final_answer: String,
        rounds: usize,
        forced_final: bool,
    ) -> AgentExecution {
        let duration_ms = invocation.started.elapsed().as_millis() as u64;

        self.emit(AgentEvent::TaskCompleted {
            task_id: invocation.task_id.clone(),
            rounds,
            forced_final,
            duration_ms,
        })
        .await;

        AgentExecution {
            task_id: invocation.task_id,
            final_answer,
            rounds,
            forced_final,
            round_log: invocation.round_log,
            duration_ms,
        }
    }
}

#[async_trait]
impl Agent for AgentCore {
    async fn execute_task(
        &self,
        user_prompt: &str,
        system_instructions: Option<&str>,
        model: Option<&str>,
    ) -> AgentResult<AgentExecution> {
        AgentCore::execute_task(self, user_prompt, system_instructions, model).await
    }

    async fn run_task(
        &self,
        user_prompt: &str,
        system_instructions: Option<&str>,
        model: Option<&str>,
    ) -> String {
        AgentCore::run_task(self, user_prompt, system_instructions, model).await
    }

    fn config(&self) -> &AgentConfig {
        &self.config
    }

    fn agent_type(&self) -> &str {
        "wayfinder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, LlmError, ToolError};
    use crate::llm::{LlmResponse, MessageRole};
    use crate::output::OutputError;
    use crate::tools::builtin::CalculatorTool;
    use crate::tools::Tool;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Model client that replays scripted replies and records every request
    struct ScriptedLlm {
        replies: Mutex<VecDeque<std::result::Result<String, String>>>,
        fallback: Option<String>,
        requests: Mutex<Vec<(Vec<LlmMessage>, ChatOptions)>>,
    }

    impl ScriptedLlm {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(|r| Ok(r.to_string())).collect()),
                fallback: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Reply with the same text forever
        fn always(reply: &str) -> Self {
            Self {
                replies: Mutex::new(VecDeque::new()),
                fallback: Some(reply.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from([Err(message.to_string())])),
                fallback: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<(Vec<LlmMessage>, ChatOptions)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn chat_completion(
            &self,
            messages: Vec<LlmMessage>,
            options: Option<ChatOptions>,
        ) -> Result<LlmResponse> {
            self.requests
                .lock()
                .unwrap()
                .push((messages, options.unwrap_or_default()));

            let next = self.replies.lock().unwrap().pop_front();
            match next.or_else(|| self.fallback.clone().map(Ok)) {
                Some(Ok(text)) => Ok(LlmResponse::text(text, "scripted".to_string())),
                Some(Err(message)) => Err(Error::Llm(LlmError::Network { message })),
                None => panic!("scripted model ran out of replies"),
            }
        }

        fn model_name(&self) -> &str {
            "scripted"
        }

        fn provider_name(&self) -> &str {
            "mock"
        }
    }

    /// Tool that counts calls and fails with the configured message
    struct FlakyTool {
        name: &'static str,
        error: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl FlakyTool {
        fn ok(name: &'static str) -> Self {
            Self {
                name,
                error: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(name: &'static str, error: &'static str) -> Self {
            Self {
                name,
                error: Some(error),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Tool for FlakyTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "Test tool"
        }

        async fn execute(&self, input: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.error {
                Some(message) => Err(ToolError::ExecutionFailed {
                    name: self.name.to_string(),
                    message: message.to_string(),
                }
                .into()),
                None => Ok(format!("echo: {}", input)),
            }
        }
    }

    #[derive(Default)]
    struct CollectingOutput(Mutex<Vec<AgentEvent>>);

    #[async_trait]
    impl AgentOutput for CollectingOutput {
        async fn emit_event(&self, event: AgentEvent) -> std::result::Result<(), OutputError> {
            self.0.lock().unwrap().push(event);
            Ok(())
        }
    }

    fn agent_with(llm: Arc<ScriptedLlm>, tools: Vec<Arc<dyn Tool>>) -> AgentCore {
        let mut registry = ToolRegistry::new();
        for tool in tools {
            registry.register(tool).unwrap();
        }
        AgentCore::new(
            AgentConfig::default(),
            llm,
            Arc::new(registry),
            Arc::new(crate::output::NullOutput),
        )
    }

    fn user_prompt_of(request: &(Vec<LlmMessage>, ChatOptions)) -> &str {
        assert_eq!(request.0.len(), 2);
        assert_eq!(request.0[0].role, MessageRole::System);
        assert_eq!(request.0[1].role, MessageRole::User);
        &request.0[1].content
    }

    #[tokio::test]
    async fn test_calculator_round_trip() {
        let llm = Arc::new(ScriptedLlm::new(&[
            r#"{"tool": "calculator", "input": "144/12"}"#,
            "12",
        ]));
        let agent = agent_with(llm.clone(), vec![Arc::new(CalculatorTool::new())]);

        let execution = agent
            .execute_task("What is 144 / 12?", None, None)
            .await
            .unwrap();

        assert_eq!(execution.final_answer, "12");
        assert_eq!(execution.rounds, 2);
        assert!(!execution.forced_final);
        assert_eq!(
            execution.round_log.records(),
            &[RoundRecord::ToolSuccess {
                tool: "calculator".to_string(),
                input: "144/12".to_string(),
                output_excerpt: "The result is: **12**".to_string(),
            }]
        );

        let requests = llm.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            user_prompt_of(&requests[0]),
            "User question: What is 144 / 12?\n\nWhat should I do?"
        );
        assert!(user_prompt_of(&requests[1])
            .contains("- Used calculator('144/12') → The result is: **12**...\n"));
    }

    #[tokio::test]
    async fn test_plain_answer_returns_after_one_round() {
        let llm = Arc::new(ScriptedLlm::new(&["I don't understand"]));
        let agent = agent_with(llm.clone(), vec![]);

        let answer = agent.run_task("asdkjasd", None, None).await;

        assert_eq!(answer, "I don't understand");
        assert_eq!(llm.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_tool_every_round_forces_final() {
        let llm = Arc::new(ScriptedLlm::new(&[
            r#"{"tool": "teleporter", "input": "Mars"}"#,
            r#"{"tool": "teleporter", "input": "Mars"}"#,
            r#"{"tool": "teleporter", "input": "Mars"}"#,
            "I could not teleport you.",
        ]));
        let decoy = Arc::new(FlakyTool::ok("calculator"));
        let agent = agent_with(llm.clone(), vec![decoy.clone()]);

        let execution = agent.execute_task("Send me to Mars", None, None).await.unwrap();

        assert!(execution.forced_final);
        assert_eq!(execution.rounds, 3);
        assert_eq!(execution.final_answer, "I could not teleport you.");
        assert_eq!(execution.round_log.len(), 3);
        assert!(execution
            .round_log
            .records()
            .iter()
            .all(|r| *r == RoundRecord::unknown("teleporter")));
        assert!(execution.tools_used().is_empty());
        assert_eq!(decoy.calls.load(Ordering::SeqCst), 0);

        let requests = llm.requests();
        assert_eq!(requests.len(), 4);
        let last = &requests[3];
        assert_eq!(last.0[0].content, FORCED_FINAL_SYSTEM_PROMPT);
        assert!(user_prompt_of(last).contains("Here's what we found:\n"));
    }

    #[tokio::test]
    async fn test_numeric_tool_name_is_recorded_as_unknown() {
        let llm = Arc::new(ScriptedLlm::new(&[
            r#"{"tool": 42, "input": "x"}"#,
            "Sorry, I could not help with that.",
        ]));
        let agent = agent_with(llm.clone(), vec![Arc::new(CalculatorTool::new())]);

        let execution = agent.execute_task("Do the thing", None, None).await.unwrap();

        assert!(!execution.forced_final);
        assert_eq!(execution.rounds, 2);
        assert_eq!(execution.final_answer, "Sorry, I could not help with that.");
        assert_eq!(execution.round_log.records(), &[RoundRecord::unknown("42")]);
        assert!(user_prompt_of(&llm.requests()[1])
            .contains("- Tried to use 42 but it doesn't exist"));
    }

    #[tokio::test]
    async fn test_forced_final_reply_is_not_interpreted() {
        let tool_call = r#"{"tool": "calculator", "input": "1+1"}"#;
        let llm = Arc::new(ScriptedLlm::always(tool_call));
        let agent = agent_with(llm.clone(), vec![Arc::new(CalculatorTool::new())]);

        let execution = agent.execute_task("loop forever", None, None).await.unwrap();

        assert!(execution.forced_final);
        assert_eq!(execution.final_answer, tool_call);
        assert_eq!(execution.round_log.len(), 3);
        assert_eq!(llm.requests().len(), 4);
    }

    #[tokio::test]
    async fn test_tool_failure_is_recorded_and_loop_continues() {
        let llm = Arc::new(ScriptedLlm::new(&[
            r#"{"tool": "web_search", "input": "rust"}"#,
            "Search is unavailable right now.",
        ]));
        let tool = Arc::new(FlakyTool::failing("web_search", "timeout"));
        let agent = agent_with(llm.clone(), vec![tool.clone()]);

        let execution = agent.execute_task("Find rust", None, None).await.unwrap();

        assert_eq!(tool.calls.load(Ordering::SeqCst), 1);
        assert_eq!(execution.rounds, 2);
        assert_eq!(execution.final_answer, "Search is unavailable right now.");
        match &execution.round_log.records()[0] {
            RoundRecord::ToolFailure { tool, error, .. } => {
                assert_eq!(tool, "web_search");
                assert!(error.contains("timeout"));
            }
            other => panic!("unexpected record {:?}", other),
        }
        assert!(user_prompt_of(&llm.requests()[1]).contains("Tried web_search but got error:"));
    }

    #[tokio::test]
    async fn test_round_log_never_exceeds_budget() {
        for max_iterations in [0, 1, 2, 5] {
            let llm = Arc::new(ScriptedLlm::always(r#"{"tool": "echo", "input": "x"}"#));
            let mut registry = ToolRegistry::new();
            registry.register(Arc::new(FlakyTool::ok("echo"))).unwrap();
            let config = AgentConfig {
                max_iterations,
                ..Default::default()
            };
            let agent = AgentCore::new(
                config,
                llm.clone(),
                Arc::new(registry),
                Arc::new(crate::output::NullOutput),
            );

            let execution = agent.execute_task("q", None, None).await.unwrap();

            assert_eq!(execution.round_log.len(), max_iterations);
            assert!(execution.forced_final);
            // exactly one forced final call after the regular rounds
            assert_eq!(llm.requests().len(), max_iterations + 1);
        }
    }

    #[tokio::test]
    async fn test_model_failure_becomes_apology() {
        let llm = Arc::new(ScriptedLlm::failing("connection refused"));
        let agent = agent_with(llm, vec![]);

        let answer = agent.run_task("hello", None, None).await;

        assert!(answer.starts_with("I encountered an error: "));
        assert!(answer.contains("connection refused"));
        assert!(answer.ends_with("\n\nPlease try rephrasing your query."));
    }

    #[tokio::test]
    async fn test_model_failure_propagates_from_execute_task() {
        let llm = Arc::new(ScriptedLlm::failing("boom"));
        let agent = agent_with(llm, vec![]);

        let err = agent.execute_task("hello", None, None).await.unwrap_err();
        assert!(matches!(err, Error::Llm(LlmError::Network { .. })));
    }

    #[tokio::test]
    async fn test_instructions_model_and_temperature_are_forwarded() {
        let llm = Arc::new(ScriptedLlm::new(&["done"]));
        let agent = agent_with(llm.clone(), vec![]);

        agent
            .execute_task("hi", Some("Answer in French."), Some("gpt-4o"))
            .await
            .unwrap();

        let requests = llm.requests();
        let (messages, options) = &requests[0];
        assert_eq!(messages[0].content, "Answer in French.");
        assert_eq!(options.model.as_deref(), Some("gpt-4o"));
        assert_eq!(options.temperature, Some(0.2));
    }

    #[tokio::test]
    async fn test_default_system_prompt_lists_tools() {
        let llm = Arc::new(ScriptedLlm::new(&["done"]));
        let agent = agent_with(llm.clone(), vec![Arc::new(CalculatorTool::new())]);

        agent.execute_task("hi", None, None).await.unwrap();

        let system = &llm.requests()[0].0[0].content;
        assert!(system.contains("- calculator: "));
        assert_eq!(system, agent.default_system_prompt());
    }

    #[tokio::test]
    async fn test_long_tool_output_is_excerpted() {
        struct Verbose;

        #[async_trait]
        impl Tool for Verbose {
            fn name(&self) -> &str {
                "verbose"
            }
            fn description(&self) -> &str {
                "Talks a lot"
            }
            async fn execute(&self, _input: &str) -> Result<String> {
                Ok("ü".repeat(500))
            }
        }

        let llm = Arc::new(ScriptedLlm::new(&[r#"{"tool": "verbose", "input": ""}"#, "ok"]));
        let agent = agent_with(llm, vec![Arc::new(Verbose)]);

        let execution = agent.execute_task("talk", None, None).await.unwrap();
        match &execution.round_log.records()[0] {
            RoundRecord::ToolSuccess { output_excerpt, .. } => {
                assert_eq!(output_excerpt.chars().count(), 100)
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_events_follow_the_loop() {
        let llm = Arc::new(ScriptedLlm::new(&[
            r#"{"tool": "teleporter", "input": "x"}"#,
            r#"{"tool": "echo", "input": "hi"}"#,
            "bye",
        ]));
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FlakyTool::ok("echo"))).unwrap();
        let output = Arc::new(CollectingOutput::default());
        let agent = AgentCore::new(
            AgentConfig::default(),
            llm,
            Arc::new(registry),
            output.clone(),
        );

        agent.execute_task("go", None, None).await.unwrap();

        let events = output.0.lock().unwrap();
        let kinds: Vec<&str> = events
            .iter()
            .map(|e| match e {
                AgentEvent::TaskStarted { .. } => "task_started",
                AgentEvent::RoundStarted { .. } => "round",
                AgentEvent::ToolDispatched { .. } => "dispatched",
                AgentEvent::ToolCompleted { .. } => "completed",
                AgentEvent::ToolFailed { .. } => "failed",
                AgentEvent::UnknownTool { .. } => "unknown",
                AgentEvent::ForcedFinal { .. } => "forced",
                AgentEvent::TaskCompleted { .. } => "task_completed",
                AgentEvent::Message { .. } => "message",
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "task_started",
                "round",
                "unknown",
                "round",
                "dispatched",
                "completed",
                "round",
                "task_completed",
            ]
        );
    }

    #[tokio::test]
    async fn test_concurrent_tasks_keep_separate_logs() {
        /// Answers with a tool call on the first round, then repeats the question
        struct EchoLlm;

        #[async_trait]
        impl LlmClient for EchoLlm {
            async fn chat_completion(
                &self,
                messages: Vec<LlmMessage>,
                _options: Option<ChatOptions>,
            ) -> Result<LlmResponse> {
                let prompt = &messages[1].content;
                let text = if prompt.contains("Previous actions") {
                    prompt.clone()
                } else {
                    r#"{"tool": "echo", "input": "ping"}"#.to_string()
                };
                Ok(LlmResponse::text(text, "echo".to_string()))
            }

            fn model_name(&self) -> &str {
                "echo"
            }

            fn provider_name(&self) -> &str {
                "mock"
            }
        }

        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FlakyTool::ok("echo"))).unwrap();
        let agent = Arc::new(AgentCore::new(
            AgentConfig::default(),
            Arc::new(EchoLlm),
            Arc::new(registry),
            Arc::new(crate::output::NullOutput),
        ));

        let (a, b) = tokio::join!(
            agent.execute_task("first", None, None),
            agent.execute_task("second", None, None)
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_eq!(a.round_log.len(), 1);
        assert_eq!(b.round_log.len(), 1);
        assert!(a.final_answer.starts_with("User question: first"));
        assert!(b.final_answer.starts_with("User question: second"));
        assert_ne!(a.task_id, b.task_id);
    }
}
