#![allow(clippy::module_inception)]

use std::{fs, path::PathBuf, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod grammar;
pub mod lexer;
pub mod lower;
pub mod macros;

extern crate regex;

/// Location of a token or node in its source file. Lines start at 1,
/// columns at 0; `length` is measured in bytes of source text.
#[derive(Debug, Clone)]
pub struct SourcePosition {
    pub file: Rc<String>,
    pub line: u32,
    pub column: u32,
    pub length: u32,
}

impl SourcePosition {
    pub fn new(file: Rc<String>, line: u32, column: u32, length: u32) -> Self {
        SourcePosition {
            file,
            line,
            column,
            length,
        }
    }

    /// Sentinel for synthesized nodes with no source origin, such as the
    /// builtin type references.
    pub fn empty() -> Self {
        SourcePosition {
            file: Rc::new(String::new()),
            line: 0,
            column: 0,
            length: 0,
        }
    }
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

pub fn get_line(file: PathBuf, line_number: u32) -> String {
    let content = fs::read_to_string(&file).unwrap();

    for (index, line) in content.lines().enumerate() {
        if index as u32 + 1 == line_number {
            return line.to_string();
        }
    }

    panic!("Failed to find line {} in file", line_number);
}

pub fn display_error(error: Error, file: PathBuf) {
    /*
        error: message
        -> final.vsp
           |
        20 | let a = #;
           | --------^
    */

    let position = error.get_position();
    let line_text = get_line(file.clone(), position.line);

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> {}", file.as_os_str().to_string_lossy());
    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_string, line_text_removed.trim());

    let arrows = position.column as usize - removed_whitespace + 1;

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    #[test]
    fn test_source_position_display() {
        let position = super::SourcePosition::new(Rc::new(String::from("test.vsp")), 4, 8, 3);
        assert_eq!(position.to_string(), "4:8");
    }

    #[test]
    fn test_empty_position() {
        let position = super::SourcePosition::empty();
        assert_eq!(position.line, 0);
        assert_eq!(position.column, 0);
        assert_eq!(position.length, 0);
        assert_eq!(*position.file, "");
    }
}
