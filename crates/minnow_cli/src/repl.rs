//! The interactive read-eval-print loop.
//!
//! Lines are accumulated until the text parses cleanly or a blank line is
//! entered, then submitted to the session as one fragment. Lines starting
//! with `#` at the start of a submission are meta commands.

use crate::render::{Output, GREEN};
use crate::run::{execute, Origin};
use minnow_compiler::Session;
use minnow_evaluator::Host;
use minnow_parser::SyntaxTree;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "» ";
const CONTINUATION_PROMPT: &str = "· ";

/// A `#` command understood by the REPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand {
    ShowTree,
    ShowProgram,
    Reset,
    Cls,
    Exit,
}

impl MetaCommand {
    pub fn parse(line: &str) -> Option<MetaCommand> {
        match line.trim() {
            "#showTree" => Some(MetaCommand::ShowTree),
            "#showProgram" => Some(MetaCommand::ShowProgram),
            "#reset" => Some(MetaCommand::Reset),
            "#cls" => Some(MetaCommand::Cls),
            "#exit" => Some(MetaCommand::Exit),
            _ => None,
        }
    }
}

/// What to do with the text accumulated so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Keep reading continuation lines.
    Incomplete,
    /// Submit the text as one fragment.
    Complete,
}

/// A blank line forces submission; otherwise wait until the text parses.
pub fn classify(text: &str, last_line_blank: bool) -> (Submission, SyntaxTree) {
    let tree = SyntaxTree::parse(text);
    if last_line_blank || !tree.has_errors() {
        (Submission::Complete, tree)
    } else {
        (Submission::Incomplete, tree)
    }
}

pub fn run<H: Host>(session: &mut Session<H>, output: &Output) {
    let mut text = String::new();
    let stdin = io::stdin();

    loop {
        let prompt = if text.is_empty() { PROMPT } else { CONTINUATION_PROMPT };
        print!("{}", output.paint(GREEN, prompt));
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim_end_matches(['\r', '\n']);
        let is_blank = line.trim().is_empty();

        if text.is_empty() {
            if is_blank {
                continue;
            }
            if line.starts_with('#') {
                match MetaCommand::parse(line) {
                    Some(MetaCommand::Exit) => break,
                    Some(command) => apply(session, command, output),
                    None => output.error(&format!("invalid command {}", line.trim())),
                }
                continue;
            }
        }

        text.push_str(line);
        text.push('\n');

        let (submission, tree) = classify(&text, is_blank);
        if submission == Submission::Complete {
            execute(session, Origin::Repl, "repl", tree, output);
            text.clear();
        }
    }
}

fn apply<H: Host>(session: &mut Session<H>, command: MetaCommand, output: &Output) {
    match command {
        MetaCommand::ShowTree => {
            let options = session.options_mut();
            options.show_tree = !options.show_tree;
            let state = if options.show_tree { "Showing" } else { "Not showing" };
            output.info(&format!("{} parse trees.", state));
        }
        MetaCommand::ShowProgram => {
            let options = session.options_mut();
            options.show_program = !options.show_program;
            let state = if options.show_program { "Showing" } else { "Not showing" };
            output.info(&format!("{} bound trees.", state));
        }
        MetaCommand::Reset => {
            session.reset();
            output.info("Session reset.");
        }
        MetaCommand::Cls => {
            print!("\x1b[2J\x1b[H");
            let _ = io::stdout().flush();
        }
        MetaCommand::Exit => {}
    }
}
