use crate::constants::PLACEHOLDER_CATEGORY;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Select(String), // Switch the slideshow to this category
    Stop,
    List,
    Quit,
    Ignore, // Blank line or the selection prompt itself
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let line = line.trim();
        match line {
            "" | PLACEHOLDER_CATEGORY => Command::Ignore,
            "stop" => Command::Stop,
            "list" => Command::List,
            "quit" | "exit" => Command::Quit,
            category => Command::Select(category.to_lowercase()),
        }
    }
}
