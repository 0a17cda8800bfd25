use super::MenuChoice;
use crate::cli_style;
use crate::movie::{format_movie_line, MovieInfo};
use anyhow::Result;
use rustyline::{error::ReadlineError, DefaultEditor};

/// Input and output of an interactive session.
pub trait Terminal {
    /// Reads one line. `None` means the user closed the input.
    fn read_line(&mut self, prompt: &str) -> Option<String>;

    fn info(&mut self, message: &str);
    fn success(&mut self, message: &str);
    fn warning(&mut self, message: &str);
    fn error(&mut self, message: &str);

    fn movie(&mut self, title: &str, info: &MovieInfo) {
        self.info(&format_movie_line(title, info));
    }

    fn show_menu(&mut self) {
        self.info("Menu:");
        for choice in MenuChoice::ALL {
            self.info(&format!("{}. {}", choice.key(), choice.label()));
        }
    }

    fn goodbye(&mut self) {
        self.info("Bye! See you later.");
    }
}

/// Line editing terminal backed by rustyline.
pub struct RustylineTerminal {
    editor: DefaultEditor,
}

impl RustylineTerminal {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl Terminal for RustylineTerminal {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Some(line)
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                None
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                None
            }
            Err(e) => {
                println!("Error: {:?}", e);
                None
            }
        }
    }

    fn info(&mut self, message: &str) {
        cli_style::print_info(message);
    }

    fn success(&mut self, message: &str) {
        cli_style::print_success(message);
    }

    fn warning(&mut self, message: &str) {
        cli_style::print_warning(message);
    }

    fn error(&mut self, message: &str) {
        cli_style::print_error(message);
    }

    fn movie(&mut self, title: &str, info: &MovieInfo) {
        cli_style::print_movie(title, info.year, info.rating);
    }

    fn show_menu(&mut self) {
        cli_style::print_section_header("Menu");
        for choice in MenuChoice::ALL {
            cli_style::print_menu_entry(choice.key(), choice.label());
        }
        cli_style::print_section_footer();
    }

    fn goodbye(&mut self) {
        cli_style::print_goodbye();
    }
}
