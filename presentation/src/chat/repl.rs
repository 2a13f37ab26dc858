//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::formatter::OutputFormatter;
use crate::{ConsoleFormatter, ProgressReporter};
use colored::Colorize;
use concierge_application::{HandleTurnUseCase, NoTurnProgress, TurnProgressNotifier};
use concierge_domain::{ConversationHistory, Role};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::sync::Arc;
use tracing::debug;

/// Slash commands understood by the REPL.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Help,
    History,
    Clear,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    fn parse(line: &str) -> Option<Self> {
        let cmd = line.strip_prefix('/')?;
        Some(match cmd.trim() {
            "help" | "h" | "?" => ReplCommand::Help,
            "history" => ReplCommand::History,
            "clear" | "new" => ReplCommand::Clear,
            "quit" | "exit" | "q" => ReplCommand::Quit,
            other => ReplCommand::Unknown(other.to_string()),
        })
    }
}

/// Interactive chat REPL
///
/// Holds one conversation session. A line consisting of a number picks the
/// matching suggestion from the previous answer.
pub struct ChatRepl {
    use_case: Arc<HandleTurnUseCase>,
    formatter: Box<dyn OutputFormatter + Send + Sync>,
    show_progress: bool,
    history: ConversationHistory,
    suggestions: Vec<String>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(use_case: Arc<HandleTurnUseCase>) -> Self {
        Self {
            use_case,
            formatter: Box::new(ConsoleFormatter),
            show_progress: true,
            history: ConversationHistory::new(),
            suggestions: Vec::new(),
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_formatter(mut self, formatter: Box<dyn OutputFormatter + Send + Sync>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> rustyline::Result<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("ev-concierge").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline(">>> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if let Some(command) = ReplCommand::parse(line) {
                        if self.handle_command(command) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    let input = resolve_input(line, &self.suggestions);
                    if input != line {
                        println!("{} {}", ">".dimmed(), input);
                    }
                    self.process_input(&input).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          EV Concierge - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /history          - Show the conversation so far");
        println!("  /clear            - Start a new conversation");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
        println!("Type a number to pick a suggestion from the last answer.");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                true
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
                false
            }
            ReplCommand::History => {
                self.print_history();
                false
            }
            ReplCommand::Clear => {
                self.history = ConversationHistory::new();
                self.suggestions.clear();
                println!("Started a new conversation.");
                false
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: /{}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    fn print_history(&self) {
        println!();
        if self.history.is_empty() {
            println!("{}", "No conversation yet.".dimmed());
        }
        for turn in self.history.turns() {
            let speaker = match turn.role() {
                Role::User => "You:".cyan().bold(),
                Role::Assistant => "Concierge:".green().bold(),
            };
            println!("{} {}", speaker, turn.content());
        }
        println!();
    }

    async fn process_input(&mut self, input: &str) {
        println!();

        let progress: Box<dyn TurnProgressNotifier> = if self.show_progress {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(NoTurnProgress)
        };

        match self
            .use_case
            .execute(&mut self.history, input, progress.as_ref())
            .await
        {
            Ok(outcome) => {
                println!("{}", self.formatter.format_outcome(&outcome));
                self.suggestions = outcome.response.key_words;
            }
            Err(e) => {
                debug!(error = %e, "Turn failed");
                eprintln!("{}", self.formatter.format_error(&e));
            }
        }
        println!();
    }
}

/// A bare number selects the matching suggestion (1-based); anything else
/// is taken as typed.
fn resolve_input(line: &str, suggestions: &[String]) -> String {
    line.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| suggestions.get(i))
        .cloned()
        .unwrap_or_else(|| line.to_string())
}
