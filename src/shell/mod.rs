pub mod command;
pub mod parse;
pub mod render;

use crate::shell::{
    command::{execute_command, Command},
    parse::{parse_command, ParseError, COMMAND_NAMES},
};
use colored::*;
use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use mini_fat::{
    disk::init::{perform_disk_initialization, BootProgress},
    fs::error::{FileSystemError, Result},
    FileSystem, FsConfig,
};
use reedline::{
    default_emacs_keybindings, ColumnarMenu, DefaultCompleter, DefaultPrompt,
    DefaultPromptSegment, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder,
    Reedline, ReedlineEvent, ReedlineMenu, Signal,
};
use std::{io::stdout, path::PathBuf, sync::mpsc, thread};

const HISTORY_FILE: &str = ".minifat_history";
const HISTORY_SIZE: usize = 100;

pub fn start_shell() {
    let mut stdout = stdout();
    let _ = execute!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0));
    println!("{}", "[MiniFAT Booting...]".bright_yellow().bold());

    let mut fs = match mount_with_progress(FsConfig::default()) {
        Ok(fs) => fs,
        Err(e) => {
            println!("{} {}", "❌ Boot failed:".red().bold(), e);
            return;
        }
    };

    let _ = execute!(
        stdout,
        SetForegroundColor(Color::Cyan),
        Print("Welcome to MiniFAT v0.1.0\n"),
        ResetColor
    );

    let username = whoami::username();
    let hostname = whoami::fallible::hostname().unwrap_or_else(|_| "localhost".to_string());

    println!(
        "{}",
        "Type 'help' for available commands. Use ↑↓ for history, Tab for auto-completion.\n"
            .bright_black()
    );

    let mut line_editor = build_line_editor();

    loop {
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(format!("{}@{}", username, hostname)),
            DefaultPromptSegment::Basic("MiniFAT".to_string()),
        );

        match line_editor.read_line(&prompt) {
            Ok(Signal::Success(buffer)) => {
                let trimmed = buffer.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_command(trimmed) {
                    Ok(cmd) => {
                        if let Err(e) = execute_command(&cmd, &mut fs) {
                            println!("{} {}", "❌ Error:".red().bold(), e);
                        }
                        if matches!(cmd, Command::Exit) {
                            break;
                        }
                    }
                    Err(ParseError::Empty) => continue,
                    Err(e @ ParseError::Usage(_)) => println!("{} {}", "⚠️ ".yellow(), e),
                    Err(e) => println!(
                        "{} {}",
                        format!("⚠️  {}.", e).yellow(),
                        "Type 'help' for command list.".bright_black()
                    ),
                }
            }
            Ok(Signal::CtrlC) => {
                println!();
                continue;
            }
            Ok(Signal::CtrlD) => {
                println!("{}", "Exiting MiniFAT...".yellow());
                break;
            }
            Err(e) => {
                println!("Error reading line: {}", e);
                break;
            }
        }
    }

    println!("{}", "GoodBye!".bright_yellow());
}

fn build_line_editor() -> Reedline {
    let mut line_editor = Reedline::create();

    // 历史记录保存在用户主目录
    let history_path = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(HISTORY_FILE);
    match FileBackedHistory::with_file(HISTORY_SIZE, history_path) {
        Ok(history) => line_editor = line_editor.with_history(Box::new(history)),
        Err(e) => warn!("command history disabled: {}", e),
    }

    // 命令补全
    let commands: Vec<String> = COMMAND_NAMES.iter().map(|c| c.to_string()).collect();
    let completer = DefaultCompleter::new_with_wordlen(commands, 2);
    let completion_menu = Box::new(ColumnarMenu::default().with_name("completion_menu"));

    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );

    line_editor
        .with_completer(Box::new(completer))
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_edit_mode(Box::new(Emacs::new(keybindings)))
}

/// 在后台线程里初始化磁盘，前台用进度条显示进度，返回挂载好的文件系统
pub fn mount_with_progress(config: FsConfig) -> Result<FileSystem> {
    let (tx, rx) = mpsc::channel();
    let worker = thread::spawn(move || perform_disk_initialization(config, tx));

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut result = None;
    for message in rx {
        match message {
            BootProgress::Step(step) => pb.set_message(step),
            BootProgress::Progress(i) => pb.set_position(i),
            BootProgress::Finished(fs) => {
                result = Some(fs);
                break;
            }
        }
    }
    let _ = worker.join();

    match result {
        Some(Ok(fs)) => {
            pb.finish_with_message("✅ Ready!");
            Ok(fs)
        }
        Some(Err(e)) => {
            pb.abandon_with_message("❌ Mount failed");
            Err(e)
        }
        None => {
            pb.abandon_with_message("❌ Mount failed");
            Err(FileSystemError::Config(
                "disk initialization stopped unexpectedly".to_string(),
            ))
        }
    }
}
