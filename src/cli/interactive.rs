use crate::browser::Event;
use crate::filter::Facet;

pub const HELP: &str = "\
commands:
  search <text>      search pack names (by:<creator> filters creators); empty clears
  res <tier|all>     resolution facet
  type <type|all>    type facet
  featured <v|all>   any value other than all shows featured packs only
  page <n>           jump to page n
  next | prev        move one page
  info <id>          show the detail view of a pack
  facets             list resolutions and types in the catalog
  show               render the current page again
  help               this text
  quit               leave";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Event(Event),
    Info(String),
    Facets,
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let command = match word.to_ascii_lowercase().as_str() {
        "search" | "s" | "/" => Command::Event(Event::Search(rest.to_string())),
        "res" | "resolution" => Command::Event(Event::Resolution(Facet::parse(rest))),
        "type" => Command::Event(Event::Type(Facet::parse(rest))),
        "featured" => Command::Event(Event::Featured(Facet::parse(rest))),
        "page" | "p" => {
            let n = rest
                .parse::<usize>()
                .map_err(|_| format!("invalid page '{rest}'"))?;
            Command::Event(Event::GoToPage(n))
        }
        "next" | "n" => Command::Event(Event::NextPage),
        "prev" => Command::Event(Event::PrevPage),
        "info" | "i" => {
            if rest.is_empty() {
                return Err("info needs a pack id".to_string());
            }
            Command::Info(rest.to_string())
        }
        "facets" => Command::Facets,
        "show" | "ls" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}' (try help)")),
    };
    Ok(Some(command))
}
