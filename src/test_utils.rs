//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

/// リソースファイルを作成する
///
/// 親ディレクトリがなければ作成する。
///
/// # Arguments
/// * `root` - リソースディレクトリ
/// * `relative` - `root` からの相対パス（例: "`zh_CN/menu.lang`"）
/// * `content` - ファイルの内容
///
/// # Returns
/// 作成したファイルのパス
pub(crate) fn write_resource(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}
