//! # Command Bar
//!
//! The `:` command line: a single-line [`CommandInput`] text field and the
//! parser that splits what was typed into a command and its argument.
//!
//! Parsing never fails. Whether a command exists, and whether its argument
//! makes sense, is decided at dispatch time in `update()`.

/// Split on the first run of whitespace: `"mv new name.txt"` → `("mv", "new name.txt")`.
/// Empty input gives `("", "")`.
pub fn parse_command(line: &str) -> (String, String) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command.to_string(), rest.trim_start().to_string()),
        None => (line.to_string(), String::new()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Nothing typed.
    Empty,
    MakeDirectory(String),
    Touch(String),
    /// `mv` / `rename`: move the selected entry to the given name/path.
    Rename(String),
    Copy(String),
    /// `rm` / `delete`: remove the selected entry.
    Delete,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let (command, arg) = parse_command(line);
        match command.as_str() {
            "" => Command::Empty,
            "mkdir" => Command::MakeDirectory(arg),
            "touch" => Command::Touch(arg),
            "mv" | "rename" => Command::Rename(arg),
            "cp" => Command::Copy(arg),
            "rm" | "delete" => Command::Delete,
            _ => Command::Unknown(command),
        }
    }
}

pub const PROMPT: &str = "❯ ";
pub const CHAR_LIMIT: usize = 250;

/// Single-line text field backing the command bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandInput {
    value: String,
    /// Byte offset into `value`, always on a char boundary.
    cursor: usize,
    focused: bool,
    pub placeholder: String,
}

impl CommandInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self, placeholder: &str) {
        self.focused = true;
        self.placeholder = placeholder.to_string();
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn reset(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn insert(&mut self, c: char) {
        if self.value.chars().count() >= CHAR_LIMIT {
            return;
        }
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = prev_char_boundary(&self.value, self.cursor);
            self.value.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            let next = next_char_boundary(&self.value, self.cursor);
            self.value.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = prev_char_boundary(&self.value, self.cursor);
    }

    pub fn move_right(&mut self) {
        self.cursor = next_char_boundary(&self.value, self.cursor);
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Prompt plus the typed text, or the placeholder when nothing is typed.
    pub fn view(&self) -> String {
        if self.value.is_empty() {
            format!("{PROMPT}{}", self.placeholder)
        } else {
            format!("{PROMPT}{}", self.value)
        }
    }
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
