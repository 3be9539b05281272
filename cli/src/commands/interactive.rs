//! Interactive mode command

use super::{build_agent, AgentOptions};
use crate::config::CliConfigLoader;
use crate::output::CliOutputHandler;
use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// What a line typed at the prompt asks for
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Exit,
    Empty,
    Task(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    match line.trim() {
        "" => Line::Empty,
        "exit" | "quit" | "q" => Line::Exit,
        task => Line::Task(task),
    }
}

/// Start interactive mode
pub async fn interactive_command(
    config_loader: CliConfigLoader,
    options: AgentOptions,
) -> Result<()> {
    let output = Arc::new(CliOutputHandler::default());
    let agent = build_agent(&config_loader, &options, output).await?;

    println!("{}", "Wayfinder interactive mode".bold());
    println!("{}", "Type a question, or 'exit' to quit.\n".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".cyan().bold());
        std::io::stdout().flush()?;

        // Ctrl-D
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match classify(&line) {
            Line::Exit => break,
            Line::Empty => {
                println!("{}", "Please enter a question.".yellow());
            }
            Line::Task(task) => {
                debug!("Interactive task: {}", task);
                let answer = agent.run_task(task, None, None).await;
                println!("\n{}\n", answer);
            }
        }
    }

    println!("👋 Goodbye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_words() {
        for word in ["exit", "quit", "q", "  q  "] {
            assert_eq!(classify(word), Line::Exit);
        }
    }

    #[test]
    fn test_blank_lines_are_empty() {
        assert_eq!(classify(""), Line::Empty);
        assert_eq!(classify("   \t"), Line::Empty);
    }

    #[test]
    fn test_tasks_are_trimmed() {
        assert_eq!(classify("  What is 2+2?\n"), Line::Task("What is 2+2?"));
        assert_eq!(classify("quite"), Line::Task("quite"));
    }
}
