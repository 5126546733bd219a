// Training configuration line grammar (spec §6):
//   <ProcessorName> <window> <arg1> <arg2> …
// Tokens are separated by runs of whitespace, mirroring the gazetteer-file
// rule ("whitespace-separated tokens, runs of spaces collapsed") and the
// teacher's own BNF-commented grammars in `imap.rs`.

use crate::error::{Error, Result};

pub struct ConfigLine {
  pub name: String,
  pub window: u32,
  pub args: Vec<String>,
}

peg::parser! {
  grammar parser() for str {
    rule whitespace() = [' ' | '\t']+
    // A bare token: any run of non-whitespace characters.
    rule token() -> String
      = s:$((!['\u{0}'..=' '][_])+)
      { s.to_string() }
    pub rule line() -> (String, String, Vec<String>)
      = whitespace()? name:token() whitespace() window:token() args:(whitespace() a:token() { a })* whitespace()?
      { (name, window, args) }
  }
}

pub fn parse_line(line: &str) -> Result<ConfigLine> {
  let (name, window_text, args) = parser::line(line).map_err(|_| Error::FileFormat {
    path: "<config>".into(),
    line: 0,
    message: format!("malformed training configuration line: {line:?}"),
  })?;
  let window: u32 = window_text
    .parse()
    .map_err(|source| Error::BadInteger {
      processor: name.clone(),
      argument: window_text,
      source,
    })?;
  Ok(ConfigLine { name, window, args })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_name_window_and_args() {
    let parsed = parse_line("Gazetteers 2 cities.txt people.txt").unwrap();
    assert_eq!("Gazetteers", parsed.name);
    assert_eq!(2, parsed.window);
    assert_eq!(vec!["cities.txt", "people.txt"], parsed.args);
  }

  #[test]
  fn parses_with_no_args() {
    let parsed = parse_line("Form 3").unwrap();
    assert_eq!("Form", parsed.name);
    assert_eq!(3, parsed.window);
    assert!(parsed.args.is_empty());
  }

  #[test]
  fn collapses_repeated_whitespace() {
    let parsed = parse_line("  Tag   1   a   b  ").unwrap();
    assert_eq!("Tag", parsed.name);
    assert_eq!(1, parsed.window);
    assert_eq!(vec!["a", "b"], parsed.args);
  }

  #[test]
  fn rejects_non_numeric_window() {
    assert!(parse_line("Form notanumber").is_err());
  }
}
