//! リソースディレクトリの走査

use std::path::Path;

use ignore::{
    DirEntry,
    WalkBuilder,
};

use crate::config::FileMatcher;
use crate::indexer::types::{
    IndexerError,
    ResourceFile,
    ResourceKind,
};
use crate::types::{
    KeyPath,
    LocaleId,
};

/// 自動読み込みの対象となるリソースファイルを探す
///
/// ```text
/// root
/// ├── en_US.lang        -> en_US
/// ├── zh_CN.json        -> zh_CN
/// ├── sheet.csv         -> 行ごとのロケール
/// └── ja_JP
///     ├── menu.lang     -> ja_JP, superiors = menu
///     └── common.json   -> ja_JP
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ResourceIndexer;

impl ResourceIndexer {
    /// 新しいインデクサーを作成
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// リソースファイルを検索
    ///
    /// `locale` を指定した場合はルート直下のファイルだけを対象とし、すべて
    /// そのロケールとして読み込む。`.lang` ファイルはファイル名を superiors にする。
    ///
    /// # Errors
    /// - ルートがディレクトリではない
    /// - ディレクトリの走査に失敗
    pub fn find_resources(
        &self,
        matcher: &FileMatcher,
        locale: Option<&LocaleId>,
    ) -> Result<Vec<ResourceFile>, IndexerError> {
        let root = matcher.resource_root();
        if !root.is_dir() {
            return Err(IndexerError::InvalidPath(root.to_path_buf()));
        }
        tracing::debug!(root = %root.display(), ?locale, "Discovering resources");

        let max_depth = if locale.is_some() { 1 } else { 2 };
        let mut found = Vec::new();

        // ignore クレートでファイルを走査
        for result in WalkBuilder::new(root)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .max_depth(Some(max_depth))
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            // ファイルのみを対象
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            if !matcher.is_resource_file(path) {
                tracing::debug!(path = %path.display(), "Skipping non-resource file");
                continue;
            }

            if let Some(resource) = Self::classify(&entry, locale) {
                found.push(resource);
            }
        }

        tracing::debug!(count = found.len(), "Resource discovery finished");
        Ok(found)
    }

    /// ファイルの位置と拡張子からロケールと superiors を決める
    fn classify(entry: &DirEntry, locale: Option<&LocaleId>) -> Option<ResourceFile> {
        let path = entry.path();
        let kind = ResourceKind::from_path(path)?;
        let stem = path.file_stem().and_then(|stem| stem.to_str())?;

        if kind == ResourceKind::Csv {
            let path = path.to_path_buf();
            return Some(ResourceFile { path, kind, locale: None, superiors: None });
        }

        let (locale, superiors) = match (locale, entry.depth()) {
            (Some(locale), _) => (locale.clone(), Self::lang_superiors(kind, stem)?),
            // root/<locale>.lang
            (None, 1) => (Self::locale_from_name(path, stem)?, None),
            // root/<locale>/<name>.lang
            (None, _) => {
                let dir_name = path.parent().and_then(Path::file_name).and_then(|n| n.to_str())?;
                (Self::locale_from_name(path, dir_name)?, Self::lang_superiors(kind, stem)?)
            }
        };

        Some(ResourceFile { path: path.to_path_buf(), kind, locale: Some(locale), superiors })
    }

    /// `.lang` ファイルはファイル名を superiors にする。JSON は接頭辞なし
    fn lang_superiors(kind: ResourceKind, stem: &str) -> Option<Option<KeyPath>> {
        if kind != ResourceKind::Lang {
            return Some(None);
        }
        match KeyPath::parse(stem) {
            Ok(superiors) => Some(Some(superiors)),
            Err(err) => {
                tracing::warn!(%stem, %err, "Skipping resource with unusable file name");
                None
            }
        }
    }

    /// Reads a locale from a file or directory name, warning when it is not one.
    fn locale_from_name(path: &Path, name: &str) -> Option<LocaleId> {
        match LocaleId::new(name) {
            Ok(locale) => Some(locale),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "Skipping resource without a locale");
                None
            }
        }
    }
}
