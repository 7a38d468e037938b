use colored::*;

use mini_fat::fs::{
    fat::{AllocationTable, FatEntry},
    Usage,
};

const USED_CELL: &str = "█";
const FREE_CELL: &str = "·";
const USAGE_BAR_WIDTH: usize = 32;

/// 把磁盘快照画成一块一行：块号、每个比特的使用情况、该块的 FAT 表项
pub fn render_disk(snapshot: &[bool], fat: &AllocationTable, block_size: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "💽 Hard Disk".bright_cyan().bold()));

    if block_size == 0 {
        return out;
    }
    let width = fat.block_count().saturating_sub(1).to_string().len();

    for (block, bits) in snapshot.chunks(block_size).enumerate() {
        let cells: String = bits
            .iter()
            .map(|&bit| {
                if bit {
                    USED_CELL.green().to_string()
                } else {
                    FREE_CELL.bright_black().to_string()
                }
            })
            .collect();

        let state = match fat.entry(block) {
            Some(FatEntry::Free) | None => "free".bright_black(),
            Some(FatEntry::EndOfChain) => "end".yellow(),
            Some(FatEntry::Next(next)) => format!("→ {}", next).cyan(),
        };
        out.push_str(&format!("{:>width$} │ {} │ {}\n", block, cells, state, width = width));
    }
    out
}

/// 形如 `[####------] 4/32 blocks used (12.5%), 28 free, 2 files`
pub fn render_usage(usage: &Usage) -> String {
    let filled = if usage.total_blocks == 0 {
        0
    } else {
        usage.used_blocks * USAGE_BAR_WIDTH / usage.total_blocks
    };
    let percent = if usage.total_blocks == 0 {
        0.0
    } else {
        usage.used_blocks as f64 * 100.0 / usage.total_blocks as f64
    };
    format!(
        "[{}{}] {}/{} blocks used ({:.1}%), {} free, {} files",
        "#".repeat(filled).green(),
        "-".repeat(USAGE_BAR_WIDTH - filled).bright_black(),
        usage.used_blocks,
        usage.total_blocks,
        percent,
        usage.free_blocks,
        usage.files
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mini_fat::FileSystem;

    #[test]
    fn one_row_per_block_with_fat_state() {
        colored::control::set_override(false);
        let mut fs = FileSystem::new(32, 8).unwrap();
        let snapshot = fs.create("a", "Hi").unwrap();

        let text = render_disk(&snapshot, fs.fat(), fs.block_size());
        let rows: Vec<&str> = text.lines().skip(1).collect();
        assert_eq!(rows.len(), 4);
        // 'H' = 01001000
        assert_eq!(rows[0], "0 │ ·█··█··· │ → 1");
        assert!(rows[1].ends_with("│ end"));
        assert_eq!(rows[3], "3 │ ········ │ free");
    }

    #[test]
    fn usage_bar_reports_counts() {
        colored::control::set_override(false);
        let usage = Usage {
            total_blocks: 32,
            used_blocks: 8,
            free_blocks: 24,
            files: 3,
        };
        let text = render_usage(&usage);
        assert!(text.starts_with(&format!("[{}{}]", "#".repeat(8), "-".repeat(24))));
        assert!(text.contains("8/32 blocks used (25.0%), 24 free, 3 files"));
    }
}
