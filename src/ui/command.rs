//! Interactive shell commands.

use thiserror::Error;

/// One line typed at the shell prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Connect,
    Disconnect,
    Status,
    /// Set the domain name field.
    Name(String),
    /// Set the record field. May contain spaces.
    Record(String),
    Price,
    Mint,
    /// Placeholder control; records are set as part of `mint`.
    SetData,
    SwitchNetwork,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{0}' needs a value")]
    MissingValue(&'static str),
}

pub const HELP: &str = "\
commands:
  connect            ask the wallet for account access
  disconnect         forget the connected account
  status             show account, network and form
  name <domain>      set the domain to mint
  record <text>      set the record to attach
  price              show the price for the current domain
  mint               register the domain, then set its record
  set-data           (not available)
  switch-network     move the wallet to the target network
  help               this list
  quit               leave";

impl Command {
    /// Parse a line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "connect" => Command::Connect,
            "disconnect" => Command::Disconnect,
            "status" => Command::Status,
            "name" | "domain" => {
                if rest.is_empty() {
                    return Err(ParseError::MissingValue("name"));
                }
                Command::Name(rest.to_string())
            }
            // An empty record is allowed; it clears the field.
            "record" => Command::Record(rest.to_string()),
            "price" => Command::Price,
            "mint" => Command::Mint,
            "set-data" => Command::SetData,
            "switch-network" | "switch" => Command::SwitchNetwork,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        assert_eq!(Command::parse("mint"), Ok(Some(Command::Mint)));
        assert_eq!(Command::parse("  STATUS "), Ok(Some(Command::Status)));
        assert_eq!(Command::parse(""), Ok(None));
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(Command::parse("name abc"), Ok(Some(Command::Name("abc".into()))));
        assert_eq!(
            Command::parse("record hello   world"),
            Ok(Some(Command::Record("hello   world".into())))
        );
        assert_eq!(Command::parse("record"), Ok(Some(Command::Record(String::new()))));
        assert_eq!(Command::parse("name"), Err(ParseError::MissingValue("name")));
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(Command::parse("fly away"), Err(ParseError::Unknown(w)) if w == "fly"));
    }
}
