//! Command table, full-line interpreter, and tab completion.
//!
//! Commands are matched as whole lines after trimming and case folding;
//! `cd dashboard` is one atomic command string, not a command with an
//! argument. The table is configuration data: adding a command means adding
//! one [`CommandSpec`] entry, not another branch of dispatch logic.

use chrono::{DateTime, Utc};
use terminal_contract::{CommandResult, PanelId};

/// Behavior associated with one recognized command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Help,
    Clear,
    Navigate(PanelId),
    Ls,
    Whoami,
    Pwd,
    Neofetch,
    Exit,
}

/// One entry of the recognized command table.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    /// Full normalized command line.
    pub name: &'static str,
    /// One-line summary shown by `help`.
    pub summary: &'static str,
    kind: CommandKind,
}

/// The recognized command vocabulary, in help-display order.
pub const COMMANDS: [CommandSpec; 10] = [
    CommandSpec {
        name: "help",
        summary: "Show this help message",
        kind: CommandKind::Help,
    },
    CommandSpec {
        name: "clear",
        summary: "Clear terminal screen",
        kind: CommandKind::Clear,
    },
    CommandSpec {
        name: "cd dashboard",
        summary: "Access admin dashboard",
        kind: CommandKind::Navigate(PanelId::Dashboard),
    },
    CommandSpec {
        name: "cd msg",
        summary: "Open system communications",
        kind: CommandKind::Navigate(PanelId::Messages),
    },
    CommandSpec {
        name: "cd important",
        summary: "Review critical notifications",
        kind: CommandKind::Navigate(PanelId::Important),
    },
    CommandSpec {
        name: "ls",
        summary: "List available sections",
        kind: CommandKind::Ls,
    },
    CommandSpec {
        name: "whoami",
        summary: "Display current user",
        kind: CommandKind::Whoami,
    },
    CommandSpec {
        name: "pwd",
        summary: "Show current directory",
        kind: CommandKind::Pwd,
    },
    CommandSpec {
        name: "neofetch",
        summary: "Display system information",
        kind: CommandKind::Neofetch,
    },
    CommandSpec {
        name: "exit",
        summary: "Exit terminal",
        kind: CommandKind::Exit,
    },
];

const USER: &str = "arch_004@admybrand.com";
const WORKING_DIR: &str = "/home/arch_004/admybrand.com";

const LS_OUTPUT: &str = "admybrand.com/
├── dashboard/
├── messages/
├── important/
├── analytics/
└── settings/";

/// Classifies one raw input line into exactly one [`CommandResult`].
///
/// The line is trimmed and compared case-insensitively against the command
/// table; anything unmatched becomes [`CommandResult::Unknown`] carrying the
/// trimmed input. `at` is the submission instant, used only by commands whose
/// output embeds time; given identical inputs the result is identical.
pub fn interpret(raw: &str, at: DateTime<Utc>) -> CommandResult {
    let trimmed = raw.trim();
    let normalized = trimmed.to_lowercase();
    for spec in &COMMANDS {
        if spec.name == normalized {
            return run(spec.kind, at);
        }
    }
    CommandResult::Unknown {
        input: trimmed.to_string(),
    }
}

/// Renders the transcript output for an unrecognized input.
pub fn unknown_output(input: &str) -> String {
    format!("Command not found: {input}. Type 'help' for available commands.")
}

/// Returns the table entries whose names start with `prefix`
/// (case-insensitively), in table order.
pub fn completions(prefix: &str) -> Vec<&'static str> {
    let needle = prefix.to_lowercase();
    COMMANDS
        .iter()
        .map(|spec| spec.name)
        .filter(|name| name.starts_with(&needle))
        .collect()
}

/// Resolves a tab-completion request: the replacement command when `input`
/// prefixes exactly one table entry, `None` otherwise.
pub fn complete(input: &str) -> Option<&'static str> {
    match completions(input).as_slice() {
        [only] => Some(only),
        _ => None,
    }
}

fn run(kind: CommandKind, at: DateTime<Utc>) -> CommandResult {
    match kind {
        CommandKind::Help => CommandResult::Text {
            output: help_output(),
        },
        CommandKind::Clear => CommandResult::ClearTranscript,
        CommandKind::Navigate(panel) => CommandResult::Navigate { panel },
        CommandKind::Ls => CommandResult::Text {
            output: LS_OUTPUT.to_string(),
        },
        CommandKind::Whoami => CommandResult::Text {
            output: USER.to_string(),
        },
        CommandKind::Pwd => CommandResult::Text {
            output: WORKING_DIR.to_string(),
        },
        CommandKind::Neofetch => CommandResult::Text {
            output: neofetch_output(at),
        },
        CommandKind::Exit => CommandResult::Terminate,
    }
}

fn help_output() -> String {
    let mut lines = vec!["Available commands:".to_string()];
    for spec in &COMMANDS {
        lines.push(format!("  {:<12}- {}", spec.name, spec.summary));
    }
    lines.join("\n")
}

fn neofetch_output(at: DateTime<Utc>) -> String {
    let uptime_minutes = at.timestamp() / 60;
    format!(
        "
         ▄▄▄▄▄▄▄▄▄    {USER}
       ▄█████████████▄  ──────────────────────
     ▄███████████████▄  OS: ArchLinux Dashboard
    ████████▀▀▀████████ Host: Terminal Dashboard
   ███████▀     ▀██████ Kernel: Web 6.9.0-LTS
  ████████       ██████ Uptime: {uptime_minutes} mins
  ███████▄     ▄██████  Shell: terminal-dash
   ████████▄▄▄████████  Resolution: Responsive
    ▀███████████████▀   Theme: Catppuccin Mocha
     ▀█████████████▀    Terminal: admybrand.com
       ▀▀▀▀▀▀▀▀▀▀▀
                        CPU: Rust Engine
                        Memory: Unknown"
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).single().expect("valid date")
    }

    #[test]
    fn recognized_commands_match_case_insensitively_after_trimming() {
        assert_eq!(
            interpret("  CD DASHBOARD  ", at()),
            CommandResult::Navigate {
                panel: PanelId::Dashboard
            }
        );
        assert_eq!(
            interpret("Cd Msg", at()),
            CommandResult::Navigate {
                panel: PanelId::Messages
            }
        );
        assert_eq!(interpret("EXIT", at()), CommandResult::Terminate);
        assert_eq!(interpret("clear", at()), CommandResult::ClearTranscript);
    }

    #[test]
    fn unknown_input_preserves_trimmed_original_text() {
        assert_eq!(
            interpret("  Foo Bar  ", at()),
            CommandResult::Unknown {
                input: "Foo Bar".to_string()
            }
        );
        assert_eq!(
            unknown_output("foo"),
            "Command not found: foo. Type 'help' for available commands."
        );
    }

    #[test]
    fn interpretation_is_deterministic_across_repeated_calls() {
        for input in ["help", "neofetch", "cd important", "nonsense"] {
            assert_eq!(interpret(input, at()), interpret(input, at()));
        }
    }

    #[test]
    fn help_enumerates_the_full_command_table() {
        let CommandResult::Text { output } = interpret("help", at()) else {
            panic!("help must produce text");
        };
        assert!(output.starts_with("Available commands:"));
        for spec in &COMMANDS {
            assert!(output.contains(spec.name), "help missing `{}`", spec.name);
        }
        assert!(output.contains("  help        - Show this help message"));
        assert!(output.contains("  cd dashboard- Access admin dashboard"));
    }

    #[test]
    fn whoami_and_pwd_report_the_session_identity() {
        assert_eq!(
            interpret("whoami", at()),
            CommandResult::Text {
                output: "arch_004@admybrand.com".to_string()
            }
        );
        assert_eq!(
            interpret("pwd", at()),
            CommandResult::Text {
                output: "/home/arch_004/admybrand.com".to_string()
            }
        );
    }

    #[test]
    fn neofetch_uptime_derives_from_the_submission_instant() {
        let CommandResult::Text { output } = interpret("neofetch", at()) else {
            panic!("neofetch must produce text");
        };
        let expected_minutes = at().timestamp() / 60;
        assert!(output.contains(&format!("Uptime: {expected_minutes} mins")));
        assert!(output.contains("arch_004@admybrand.com"));
    }

    #[test]
    fn unique_prefix_completes_to_the_single_match() {
        assert_eq!(complete("cd d"), Some("cd dashboard"));
        assert_eq!(complete("ne"), Some("neofetch"));
        assert_eq!(complete("CD I"), Some("cd important"));
    }

    #[test]
    fn ambiguous_or_empty_prefixes_do_not_complete() {
        // `cd` prefixes three commands.
        assert_eq!(completions("cd").len(), 3);
        assert_eq!(complete("cd"), None);
        // `zzz` prefixes none.
        assert_eq!(complete("zzz"), None);
        // The empty prefix matches the whole table.
        assert_eq!(completions("").len(), COMMANDS.len());
        assert_eq!(complete(""), None);
    }
}
