//! Interaction scripts
//!
//! A line-oriented replay format for driving a grid without a window:
//!
//! ```text
//! # open row 0, replace the name, commit with Enter
//! click 0 name
//! tick
//! key a ctrl
//! type Renamed
//! key Enter
//! tick
//! ```
//!
//! Columns are given by name or by index. `type` and `paste` take the rest
//! of the line as text, with `\n` and `\t` escapes.

use crate::keymap::{KeyCode, Keystroke, Modifiers};
use crate::messages::GridMsg;

/// Error parsing a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "script error at line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ScriptError {}

/// Parses scripts against a fixed column list
pub struct ScriptParser<'a> {
    columns: &'a [String],
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Split off the first whitespace-delimited word
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((i, c)) => (&s[..i], &s[i + c.len_utf8()..]),
        None => (s, ""),
    }
}

impl<'a> ScriptParser<'a> {
    pub fn new(columns: &'a [String]) -> Self {
        Self { columns }
    }

    pub fn parse(&self, text: &str) -> Result<Vec<GridMsg>, ScriptError> {
        let mut messages = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim_end();
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let msg = self.parse_line(line).map_err(|message| ScriptError {
                line: index + 1,
                message,
            })?;
            messages.push(msg);
        }
        Ok(messages)
    }

    fn column(&self, word: &str) -> Result<usize, String> {
        if let Ok(index) = word.parse::<usize>() {
            return if index < self.columns.len() {
                Ok(index)
            } else {
                Err(format!("column index {} out of range", index))
            };
        }
        self.columns
            .iter()
            .position(|c| c == word)
            .ok_or_else(|| format!("unknown column '{}'", word))
    }

    /// `R COL` followed by the rest of the line
    fn cell<'l>(&self, args: &'l str) -> Result<(usize, usize, &'l str), String> {
        let (row, rest) = split_word(args);
        let (col, rest) = split_word(rest);
        if row.is_empty() || col.is_empty() {
            return Err("expected ROW COLUMN".to_string());
        }
        let row = row
            .parse::<usize>()
            .map_err(|_| format!("invalid row '{}'", row))?;
        Ok((row, self.column(col)?, rest))
    }

    fn number(word: &str) -> Result<f32, String> {
        word.parse::<f32>()
            .map_err(|_| format!("invalid number '{}'", word))
    }

    fn parse_line(&self, line: &str) -> Result<GridMsg, String> {
        let (command, args) = split_word(line);
        let msg = match command {
            "click" => {
                let (row, col, _) = self.cell(args)?;
                GridMsg::Click { row, col }
            }
            "dblclick" => {
                let (row, col, _) = self.cell(args)?;
                GridMsg::DoubleClick { row, col }
            }
            "focus" => {
                let (row, col, _) = self.cell(args)?;
                GridMsg::Focus { row, col }
            }
            "toggle" => {
                let (row, col, _) = self.cell(args)?;
                GridMsg::Toggle { row, col }
            }
            "paste" => {
                let (row, col, text) = self.cell(args)?;
                GridMsg::Paste {
                    row,
                    col,
                    text: unescape(text),
                }
            }
            "key" => {
                let mut words = args.split_whitespace();
                let name = words.next().ok_or("expected a key name")?;
                let key = KeyCode::from_name(name)
                    .ok_or_else(|| format!("unknown key '{}'", name))?;
                let mut mods = Modifiers::NONE;
                for word in words {
                    mods = mods
                        | Modifiers::from_name(word)
                            .ok_or_else(|| format!("unknown modifier '{}'", word))?;
                }
                GridMsg::Key(Keystroke::new(key, mods))
            }
            "type" => GridMsg::Type(unescape(args)),
            "blur" => GridMsg::Blur,
            "outside" => GridMsg::OutsideClick,
            "scroll" => {
                let (dy, rest) = split_word(args);
                let (dx, _) = split_word(rest);
                GridMsg::Scroll {
                    dy: Self::number(dy)?,
                    dx: if dx.is_empty() { 0.0 } else { Self::number(dx)? },
                }
            }
            "resize" => {
                let (width, rest) = split_word(args);
                let (height, _) = split_word(rest);
                GridMsg::Resize {
                    width: Self::number(width)?,
                    height: Self::number(height)?,
                }
            }
            "pick" => GridMsg::Pick(args.trim().to_string()),
            "unpick" => GridMsg::Unpick(args.trim().to_string()),
            "clear" => GridMsg::ClearSelection,
            "tick" => GridMsg::Tick,
            other => return Err(format!("unknown command '{}'", other)),
        };
        Ok(msg)
    }
}

/// Parse a script against `columns`
pub fn parse(text: &str, columns: &[String]) -> Result<Vec<GridMsg>, ScriptError> {
    ScriptParser::new(columns).parse(text)
}
