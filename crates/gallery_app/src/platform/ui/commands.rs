pub const HELP: &str = "\
Commands:
  <Enter> | more        load the next page (scroll to the end of the list)
  jump <n> | <n>        jump to page n
  show <row>            open the artwork on that row of the list
  back                  close the artwork view
  list                  print the whole list again
  help                  show this help
  quit                  exit";

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    More,
    /// Raw page text; validated against the current page count later.
    Jump(String),
    Show(usize),
    Back,
    List,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::More;
        }
        if line.chars().all(|c| c.is_ascii_digit()) {
            return Command::Jump(line.to_string());
        }

        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

        match verb.to_ascii_lowercase().as_str() {
            "more" | "m" | "next" | "n" => Command::More,
            "jump" | "j" | "go" => Command::Jump(rest.to_string()),
            "show" | "s" | "open" => match rest.parse::<usize>() {
                Ok(row) if row >= 1 => Command::Show(row),
                _ => Command::Unknown(line.to_string()),
            },
            "back" | "b" => Command::Back,
            "list" | "ls" | "l" => Command::List,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}
