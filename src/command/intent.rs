// src/command/intent.rs
//! Turning a transcribed phrase into a typed intent.

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandIntent {
    OpenRecent,
    DeleteSelected,
    /// "search file" was heard. The term is never taken from the phrase;
    /// it has to be asked for in a second step.
    SearchRequested,
    /// Search for a term supplied by that second step.
    Search(String),
    OpenByName(String),
    Unrecognized,
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    OpenRecent,
    Delete,
    Search,
    Open,
}

// Rank order matters: it breaks ties between phrases starting at the same
// offset.
const RULES: [(&str, Rule); 4] = [
    ("open recent file", Rule::OpenRecent),
    ("delete file", Rule::Delete),
    ("search file", Rule::Search),
    ("open file", Rule::Open),
];

/// Parse a phrase, case-insensitively.
///
/// The command phrase that occurs first in the text wins, so
/// "delete file now and open recent file" is a delete. The same rule makes
/// "open file delete file dot txt" an attempt to open `delete file.txt`,
/// because "open file" starts earlier than "delete file".
pub fn parse(text: &str) -> CommandIntent {
    let text = text.to_lowercase();

    let first = RULES
        .iter()
        .filter_map(|&(phrase, rule)| text.find(phrase).map(|pos| (pos, phrase, rule)))
        .min_by_key(|(pos, _, _)| *pos);

    match first {
        Some((_, _, Rule::OpenRecent)) => CommandIntent::OpenRecent,
        Some((_, _, Rule::Delete)) => CommandIntent::DeleteSelected,
        Some((_, _, Rule::Search)) => CommandIntent::SearchRequested,
        Some((_, phrase, Rule::Open)) => {
            CommandIntent::OpenByName(spoken_name(&text.replace(phrase, "")))
        }
        None => CommandIntent::Unrecognized,
    }
}

/// Clean up a dictated file name: "report dot pdf" becomes "report.pdf".
fn spoken_name(raw: &str) -> String {
    raw.trim().replace(" dot ", ".")
}
