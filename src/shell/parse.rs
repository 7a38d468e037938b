use std::fmt;

use crate::shell::command::Command;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    Unknown(String),
    Usage(&'static str), // 参数个数不对，不会调用文件系统
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty command"),
            Self::Unknown(cmd) => write!(f, "Command not found: {}", cmd),
            Self::Usage(usage) => write!(f, "{}", usage),
        }
    }
}

impl std::error::Error for ParseError {}

const CREATE_USAGE: &str = "create needs 2 arguments: file name and content";
const UPDATE_USAGE: &str = "update needs 2 arguments: file name and content";
const READ_USAGE: &str = "read needs 1 argument: file name";
const RM_USAGE: &str = "rm needs 1 argument: file name";
const STAT_USAGE: &str = "stat needs 1 argument: file name";

/// 所有命令名（含别名），供补全使用
pub const COMMAND_NAMES: &[&str] = &[
    "help", "clear", "echo", "ls", "create", "mk", "read", "cat", "update", "write", "rm",
    "delete", "stat", "df", "disk", "format", "exit", "quit",
];

pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let input = input.trim();
    let tokens: Vec<&str> = input.split_ascii_whitespace().collect();
    let Some((&cmd, args)) = tokens.split_first() else {
        return Err(ParseError::Empty);
    };

    let one = |usage: &'static str| match args {
        [name] => Ok(name.to_string()),
        _ => Err(ParseError::Usage(usage)),
    };
    let two = |usage: &'static str| match args {
        [name, content] => Ok((name.to_string(), content.to_string())),
        _ => Err(ParseError::Usage(usage)),
    };

    match cmd.to_ascii_lowercase().as_str() {
        "help" => Ok(Command::Help),
        "clear" => Ok(Command::Clear),
        // echo 原样输出关键字之后的内容
        "echo" => Ok(Command::Echo(
            input[cmd.len()..].trim_start().to_string(),
        )),
        "ls" => Ok(Command::Ls),
        "create" | "mk" => two(CREATE_USAGE).map(|(name, content)| Command::Create(name, content)),
        "read" | "cat" => one(READ_USAGE).map(Command::Read),
        "update" | "write" => {
            two(UPDATE_USAGE).map(|(name, content)| Command::Update(name, content))
        }
        "rm" | "delete" => one(RM_USAGE).map(Command::Rm),
        "stat" => one(STAT_USAGE).map(Command::Stat),
        "df" => Ok(Command::Df),
        "disk" => Ok(Command::Disk),
        "format" => Ok(Command::Format),
        "exit" | "quit" => Ok(Command::Exit),
        _ => Err(ParseError::Unknown(cmd.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_file_commands_and_aliases() {
        assert_eq!(
            parse_command("create f.txt Hi"),
            Ok(Command::Create("f.txt".into(), "Hi".into()))
        );
        assert_eq!(
            parse_command("mk f.txt Hi"),
            Ok(Command::Create("f.txt".into(), "Hi".into()))
        );
        assert_eq!(parse_command("cat f.txt"), Ok(Command::Read("f.txt".into())));
        assert_eq!(parse_command("  rm   f.txt "), Ok(Command::Rm("f.txt".into())));
        assert_eq!(
            parse_command("write f.txt Bye"),
            Ok(Command::Update("f.txt".into(), "Bye".into()))
        );
        assert_eq!(parse_command("LS"), Ok(Command::Ls));
    }

    #[test]
    fn wrong_argument_count_gives_usage() {
        assert_eq!(parse_command("create f.txt"), Err(ParseError::Usage(CREATE_USAGE)));
        assert_eq!(
            parse_command("create f.txt two words"),
            Err(ParseError::Usage(CREATE_USAGE))
        );
        assert_eq!(parse_command("read"), Err(ParseError::Usage(READ_USAGE)));
        assert_eq!(parse_command("rm a b"), Err(ParseError::Usage(RM_USAGE)));
    }

    #[test]
    fn echo_keeps_the_rest_of_the_line() {
        assert_eq!(
            parse_command("echo hello   world"),
            Ok(Command::Echo("hello   world".into()))
        );
        assert_eq!(parse_command("echo"), Ok(Command::Echo(String::new())));
    }

    #[test]
    fn unknown_and_empty_input() {
        assert_eq!(parse_command("   "), Err(ParseError::Empty));
        assert_eq!(
            parse_command("frobnicate x"),
            Err(ParseError::Unknown("frobnicate".into()))
        );
    }
}
