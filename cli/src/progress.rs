//! Console progress reporter.
//!
//! Prints interview transitions as they happen. Kept out of the application
//! layer so the engine itself never touches the terminal.

use colored::Colorize;
use roundtable_application::InterviewProgress;
use roundtable_domain::{Editor, Message, RouteDecision};

/// Prints one line per transition.
pub struct ConsoleProgress;

fn preview(text: &str) -> String {
    let mut short: String = text.chars().take(80).collect();
    if short.len() < text.len() {
        short.push('…');
    }
    short.replace('\n', " ")
}

impl InterviewProgress for ConsoleProgress {
    fn on_interview_start(&self, editor: &Editor) {
        println!("{} {}", "interview:".cyan().bold(), editor);
    }

    fn on_question(&self, editor: &Editor, message: &Message) {
        println!(
            "  {} {}",
            format!("{}:", editor.name).blue().bold(),
            preview(&message.content)
        );
    }

    fn on_answer(&self, _editor: &Editor, message: &Message) {
        println!(
            "  {} {}",
            "expert:".green().bold(),
            preview(&message.content)
        );
    }

    fn on_route(&self, _editor: &Editor, decision: RouteDecision) {
        if decision != RouteDecision::AskQuestion {
            println!("  {} {}", "route:".dimmed(), decision.to_string().dimmed());
        }
    }

    fn on_interview_complete(&self, editor: &Editor, success: bool) {
        let status = if success {
            "done".green()
        } else {
            "failed".red()
        };
        println!("{} {} - {}", "interview:".cyan().bold(), editor, status);
    }
}
