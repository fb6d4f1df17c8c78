use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  query <text>   set the question for the mentor
  file [<path>]  attach a zip file (no path clears it)
  run            send the query and file to the backend
  retry          check the backend connection again
  copy           copy the response to the clipboard
  status         show the current screen again
  help           show this list
  quit           leave";

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(String),
    File(Option<PathBuf>),
    Run,
    Retry,
    Copy,
    Status,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse(line: &str) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "query" | "q" => Command::Query(rest.to_string()),
        "file" | "f" => {
            if rest.is_empty() {
                Command::File(None)
            } else {
                Command::File(Some(PathBuf::from(rest)))
            }
        }
        "run" | "r" => Command::Run,
        "retry" => Command::Retry,
        "copy" | "c" => Command::Copy,
        "status" | "s" => Command::Status,
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(word.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_keeps_inner_whitespace() {
        assert_eq!(
            parse("query   why did  tests fail  "),
            Command::Query("why did  tests fail".to_string())
        );
    }

    #[test]
    fn file_with_and_without_path() {
        assert_eq!(
            parse("file ./report.zip"),
            Command::File(Some(PathBuf::from("./report.zip")))
        );
        assert_eq!(parse("file"), Command::File(None));
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(parse("RUN"), Command::Run);
        assert_eq!(parse("Retry"), Command::Retry);
        assert_eq!(parse("   "), Command::Empty);
        assert_eq!(parse("launch"), Command::Unknown("launch".to_string()));
    }
}
