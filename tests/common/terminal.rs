use movie_catalog::menu::Terminal;
use std::collections::VecDeque;

/// Replays `inputs` one line per prompt. Once they run out, input counts as closed.
#[derive(Default)]
pub struct ScriptedTerminal {
    inputs: VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
    pub errors: Vec<String>,
}

impl ScriptedTerminal {
    pub fn new(inputs: &[&str]) -> Self {
        ScriptedTerminal {
            inputs: inputs.iter().map(|line| line.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn printed(&self, line: &str) -> bool {
        self.output.iter().any(|printed| printed == line)
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

impl Terminal for ScriptedTerminal {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        self.inputs.pop_front()
    }

    fn info(&mut self, message: &str) {
        self.output.push(message.to_string());
    }

    fn success(&mut self, message: &str) {
        self.output.push(message.to_string());
    }

    fn warning(&mut self, message: &str) {
        self.output.push(message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.output.push(message.to_string());
        self.errors.push(message.to_string());
    }
}
