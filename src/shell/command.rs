use colored::*;
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::{error::Error, io::stdout};

use mini_fat::{disk::Snapshot, utils::format_timestamp, FileSystem, FsConfig};

use crate::shell::{
    mount_with_progress,
    render::{render_disk, render_usage},
};

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Clear,
    Echo(String),
    Ls,
    Create(String, String),
    Read(String),
    Update(String, String),
    Rm(String),
    Stat(String),
    Df,
    Disk,
    Format,
    Exit,
}

/// 执行一条命令。文件系统的错误原样返回，由调用方显示。
pub fn execute_command(cmd: &Command, fs: &mut FileSystem) -> Result<(), Box<dyn Error>> {
    match cmd {
        Command::Help => print_help(),
        Command::Clear => {
            let mut stdout = stdout();
            execute!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        }
        Command::Echo(message) => println!("{}", message),
        Command::Ls => {
            let names = fs.list();
            if names.is_empty() {
                println!("{}", "(no files)".bright_black());
            }
            for name in names {
                println!("📄  {}", name);
            }
        }
        Command::Create(name, content) => {
            let snapshot = fs.create(name, content)?;
            println!("📝 Created file: {}", name.green());
            show_disk(&snapshot, fs);
        }
        Command::Read(name) => {
            let content = fs.read(name)?;
            println!("{}", content);
        }
        Command::Update(name, content) => {
            let snapshot = fs.update(name, content)?;
            println!("✏️  Updated file: {}", name.cyan());
            show_disk(&snapshot, fs);
        }
        Command::Rm(name) => {
            let snapshot = fs.delete(name)?;
            println!("❌ Deleted file: {}", name.red());
            show_disk(&snapshot, fs);
        }
        Command::Stat(name) => {
            let meta = fs.stat(name)?;
            let chain = fs.chain(name)?;
            let chain = if chain.is_empty() {
                "(none)".to_string()
            } else {
                chain
                    .iter()
                    .map(|b| b.to_string())
                    .collect::<Vec<_>>()
                    .join(" → ")
            };
            println!(
                "{}\n{}: {}\n{}: {} bytes\n{}: {}\n{}: {}\n{}: {}",
                "📊 File Info".bright_yellow().bold(),
                "Name".blue(),
                name,
                "Size".blue(),
                meta.length,
                "Blocks".blue(),
                chain,
                "Created".blue(),
                format_timestamp(&meta.created),
                "Modified".blue(),
                format_timestamp(&meta.modified),
            );
        }
        Command::Df => println!("{}", render_usage(&fs.usage())),
        Command::Disk => show_disk(&fs.snapshot(), fs),
        Command::Format => format_disk(fs)?,
        Command::Exit => println!("{}", "👋 Exiting MiniFAT shell...".yellow().bold()),
    }

    Ok(())
}

fn show_disk(snapshot: &Snapshot, fs: &FileSystem) {
    print!("{}", render_disk(snapshot, fs.fat(), fs.block_size()));
}

/// 询问新的磁盘参数，确认后用一块全新的磁盘替换当前文件系统
fn format_disk(fs: &mut FileSystem) -> Result<(), Box<dyn Error>> {
    let theme = ColorfulTheme::default();
    let confirmed = Confirm::with_theme(&theme)
        .with_prompt("Formatting erases every file. Continue?")
        .default(false)
        .interact()?;
    if !confirmed {
        println!("{}", "Format cancelled.".bright_black());
        return Ok(());
    }

    let capacity_bits: usize = Input::with_theme(&theme)
        .with_prompt("Disk capacity (bits)")
        .default(fs.capacity_bits())
        .interact_text()?;
    let block_size: usize = Input::with_theme(&theme)
        .with_prompt("Block size (bits)")
        .default(fs.block_size())
        .interact_text()?;

    *fs = mount_with_progress(FsConfig::new(capacity_bits, block_size))?;
    println!("{}", "✅ Disk formatted successfully!".green());
    Ok(())
}

fn print_help() {
    println!("{}", "📘 MiniFAT Commands".bright_cyan().bold());
    println!(
        "{}",
        "
  ls                         List files
  create|mk <file> <str>     Create a file holding <str>
  read|cat <file>            Print file content
  update|write <file> <str>  Replace file content
  rm|delete <file>           Delete a file
  stat <file>                Show file info and its block chain
  df                         Show block usage
  disk                       Draw the disk bitmap
  format                     Re-create the disk (erases everything)
  echo <message>             Print a message
  clear                      Clear the screen
  help                       Show this help message
  exit                       Quit the shell
"
        .bright_black()
    );
}
