//! 文件名规则
//!
//! 文章文件名：`<两位、从 1 开始的序号> <清理后的标题>.<扩展名>`，
//! 期刊目录：`<输出根目录>/<数据源>/<期刊目录名>/`。

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::models::catalog::Journal;

const FALLBACK_NAME: &str = "untitled";

fn illegal_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[\\/:*?"<>|\x00-\x1f]"#).expect("合法的正则表达式"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("合法的正则表达式"))
}

/// 把任意标题清理成可用的文件名
pub fn sanitize_file_name(raw: &str) -> String {
    let collapsed = whitespace_runs().replace_all(raw, " ");
    let replaced = illegal_chars().replace_all(&collapsed, "_");
    let trimmed = replaced
        .trim()
        .trim_end_matches(|c: char| c == '.' || c == ' ');

    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// 文章保存的文件名，`index` 从 0 开始
pub fn artifact_file_name(index: usize, title: &str, extension: &str) -> String {
    format!("{:02} {}.{}", index + 1, sanitize_file_name(title), extension)
}

/// 期刊的输出目录
pub fn journal_dir(output_dir: &Path, source_name: &str, journal: &Journal) -> PathBuf {
    output_dir
        .join(sanitize_file_name(source_name))
        .join(journal.folder_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_illegal_characters() {
        assert_eq!(sanitize_file_name("a/b:c*d?"), "a_b_c_d_");
        assert_eq!(sanitize_file_name("  spaced\t\nout  "), "spaced out");
    }

    #[test]
    fn sanitize_trims_trailing_dots() {
        assert_eq!(sanitize_file_name("Title..."), "Title");
    }

    #[test]
    fn sanitize_falls_back_when_empty() {
        assert_eq!(sanitize_file_name("   "), "untitled");
        assert_eq!(sanitize_file_name("..."), "untitled");
    }

    #[test]
    fn artifact_name_pads_single_digits_only() {
        assert_eq!(artifact_file_name(0, "Intro", "pdf"), "01 Intro.pdf");
        assert_eq!(artifact_file_name(9, "Ten", "pdf"), "10 Ten.pdf");
        assert_eq!(artifact_file_name(99, "Hundred", "pdf"), "100 Hundred.pdf");
    }

    #[test]
    fn journal_dir_joins_source_and_folder() {
        let journal = Journal::new("J", "3", "4").with_date("2023");
        let dir = journal_dir(Path::new("/out"), "Site", &journal);
        assert_eq!(dir, PathBuf::from("/out/Site/2023 Vol.3 No.4"));
    }
}
