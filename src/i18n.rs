//! The translation context applications talk to.
//!
//! [`Internationalization`] owns a [`TranslationTable`] together with a first
//! and a second locale. Lookups try the first locale, then the second, and
//! finally hand back the key itself, so a missing translation never turns
//! into an error at the call site.
//!
//! ```
//! use i18nco::i18n::Internationalization;
//! use i18nco::types::LocaleId;
//!
//! let en = LocaleId::new("en_US").unwrap();
//! let zh = LocaleId::new("zh_CN").unwrap();
//! let mut i18n = Internationalization::with_locales(en.clone(), zh.clone()).unwrap();
//! i18n.load_lang_str("#define superiors mode\nsingleton = Singleton Mode", Some(en), None).unwrap();
//! i18n.load_lang_str("hello = 你好", Some(zh), None).unwrap();
//!
//! assert_eq!(i18n.translation("mode", None).child("singleton").to_string(), "Singleton Mode");
//! assert_eq!(i18n.translation("hello", None).to_string(), "你好");
//! assert_eq!(i18n.translation("missing.key", None).to_string(), "missing.key");
//! ```

/// Lookup results.
mod string;

use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;
use thiserror::Error;

pub use string::I18nString;

use crate::config::{
    ConfigError,
    FileMatcher,
    I18nSettings,
    MatcherError,
};
use crate::indexer::{
    IndexerError,
    ResourceFile,
    ResourceIndexer,
    ResourceKind,
};
use crate::input::{
    self,
    InputError,
};
use crate::lang::{
    ParseError,
    ParseErrorKind,
    parse_lang,
};
use crate::locale::{
    DEFAULT_FIRST_LOCALE,
    DEFAULT_SECOND_LOCALE,
    detect_system_locale,
    match_best_locale,
    system_locale_or_default,
};
use crate::table::{
    Entry,
    TranslationTable,
};
use crate::types::{
    KeyPath,
    LocaleId,
    TypeError,
};

#[derive(Error, Debug)]
pub enum LoadError {
    /// A resource file failed to compile.
    #[error("{}:{line}: {kind}", path.display())]
    Parse { path: PathBuf, line: usize, kind: ParseErrorKind },

    #[error("{}: {source}", path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: InputError,
    },

    /// Source text loaded without a file behind it.
    #[error(transparent)]
    Lang(#[from] ParseError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("first and second locale must differ, both are '{0}'")]
    SameLocale(LocaleId),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Indexer(#[from] IndexerError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Matcher(#[from] MatcherError),
}

impl LoadError {
    /// Attaches the file path, keeping the line of compile errors.
    fn from_resource(path: &Path, error: InputError) -> Self {
        match error {
            InputError::Lang(ParseError { line, kind }) => {
                Self::Parse { path: path.to_path_buf(), line, kind }
            }
            source => Self::Resource { path: path.to_path_buf(), source },
        }
    }
}

/// Translations plus the locales they are read in.
#[derive(Debug, Clone)]
pub struct Internationalization {
    /// Every loaded translation.
    table: TranslationTable,
    /// Locale looked up first.
    first_locale: LocaleId,
    /// Locale looked up when the first has no text.
    second_locale: LocaleId,
}

impl Default for Internationalization {
    fn default() -> Self {
        Self::new()
    }
}

impl Internationalization {
    /// Empty context reading the system locale first.
    ///
    /// The second locale is `zh_CN`, or `en_US` when the system already is `zh_CN`.
    #[must_use]
    pub fn new() -> Self {
        let first_locale = system_locale_or_default();
        let second_locale = default_second_locale(&first_locale);
        Self { table: TranslationTable::new(), first_locale, second_locale }
    }

    /// Empty context with explicit locales.
    ///
    /// # Errors
    /// [`LoadError::SameLocale`] when both locales are equal.
    pub fn with_locales(first_locale: LocaleId, second_locale: LocaleId) -> Result<Self, LoadError> {
        if first_locale == second_locale {
            return Err(LoadError::SameLocale(first_locale));
        }
        Ok(Self { table: TranslationTable::new(), first_locale, second_locale })
    }

    /// Builds a context from a resource directory and its `.i18nco.json`.
    ///
    /// Every resource below `resource_root` is loaded. With `autoAdjust` the
    /// second locale then moves to the best loaded match for the first.
    ///
    /// # Errors
    /// Invalid settings, or the first resource that fails to load.
    pub fn open(resource_root: &Path) -> Result<Self, LoadError> {
        let settings = I18nSettings::load(resource_root)?;

        let first_locale = settings.first_locale_id().unwrap_or_else(system_locale_or_default);
        let second_locale = settings
            .second_locale_id()
            .filter(|second| *second != first_locale)
            .unwrap_or_else(|| default_second_locale(&first_locale));
        let mut i18n = Self::with_locales(first_locale, second_locale)?;

        let count = i18n.auto_load_with(resource_root, &settings, None)?;
        if settings.auto_adjust {
            i18n.adjust_second_locale();
        }

        tracing::info!(
            root = %resource_root.display(),
            count,
            first = %i18n.first_locale,
            second = %i18n.second_locale,
            "Opened resource directory"
        );
        Ok(i18n)
    }

    #[must_use]
    pub const fn table(&self) -> &TranslationTable {
        &self.table
    }

    #[must_use]
    pub const fn first_locale(&self) -> &LocaleId {
        &self.first_locale
    }

    #[must_use]
    pub const fn second_locale(&self) -> &LocaleId {
        &self.second_locale
    }

    /// The locale lookups try first.
    #[must_use]
    pub const fn get_locale(&self) -> &LocaleId {
        &self.first_locale
    }

    /// Locales with at least one translation, sorted.
    #[must_use]
    pub fn available_locales(&self) -> Vec<&LocaleId> {
        self.table.locales()
    }

    /// Changes the first and/or the second locale.
    ///
    /// Setting one locale to the current value of the other swaps them. With
    /// `auto_adjust` and no explicit `second`, the second locale becomes the
    /// best available match for the first one, if any.
    ///
    /// # Errors
    /// [`LoadError::SameLocale`] when `first` and `second` are both given and equal.
    pub fn set_locale(
        &mut self,
        first: Option<LocaleId>,
        second: Option<LocaleId>,
        auto_adjust: bool,
    ) -> Result<(), LoadError> {
        if let (Some(first), Some(second)) = (&first, &second)
            && first == second
        {
            return Err(LoadError::SameLocale(first.clone()));
        }

        let adjust = auto_adjust && second.is_none();
        if let Some(first) = first {
            self.set_first_locale(first);
        }
        if let Some(second) = second {
            self.set_second_locale(second);
        }
        if adjust {
            self.adjust_second_locale();
        }
        Ok(())
    }

    /// Sets the first locale, swapping when it is the current second one.
    pub fn set_first_locale(&mut self, locale: LocaleId) {
        if locale == self.second_locale {
            std::mem::swap(&mut self.first_locale, &mut self.second_locale);
        } else {
            self.first_locale = locale;
        }
    }

    /// Sets the second locale, swapping when it is the current first one.
    pub fn set_second_locale(&mut self, locale: LocaleId) {
        if locale == self.first_locale {
            std::mem::swap(&mut self.first_locale, &mut self.second_locale);
        } else {
            self.second_locale = locale;
        }
    }

    /// Moves the first locale to the best loaded match for the system locale.
    pub fn auto_set_best_locale(&mut self) {
        let Some(system) = detect_system_locale() else {
            return;
        };
        let best = match_best_locale(&system, &self.table.locales()).cloned();
        if let Some(best) = best {
            self.set_first_locale(best);
        }
    }

    /// Moves both locales to their best loaded matches.
    pub fn auto_adjust_best_locale(&mut self) {
        let available = self.table.locales();
        let first = match_best_locale(&self.first_locale, &available).cloned();
        let second = match_best_locale(&self.second_locale, &available).cloned();

        if let Some(first) = first {
            self.set_first_locale(first);
        }
        if let Some(second) = second {
            self.set_second_locale(second);
        }
    }

    /// Points the second locale at the loaded locale closest to the first one.
    fn adjust_second_locale(&mut self) {
        let candidates: Vec<&LocaleId> =
            self.table.locales().into_iter().filter(|locale| **locale != self.first_locale).collect();
        let best = match_best_locale(&self.first_locale, &candidates).cloned();

        if let Some(best) = best {
            tracing::debug!(first = %self.first_locale, second = %best, "Adjusted second locale");
            self.second_locale = best;
        }
    }

    /// Stores `text` under `key` for every locale in `locales`.
    ///
    /// # Errors
    /// [`LoadError::Type`] when `key` is not a valid key path.
    pub fn set_translation(
        &mut self,
        locales: &[LocaleId],
        key: &str,
        text: &str,
    ) -> Result<(), LoadError> {
        let key = KeyPath::parse(key)?.dotted();
        for locale in locales {
            self.table.set(locale.clone(), key.as_str(), text);
        }
        Ok(())
    }

    pub fn remove_translation(&mut self, locale: &str, key: &str) -> Option<String> {
        self.table.remove(locale, key)
    }

    /// Drops every translation of `locale`, returning how many there were.
    pub fn clear_locale(&mut self, locale: &str) -> usize {
        self.table.clear_locale(locale)
    }

    /// Looks up `key`.
    ///
    /// Tries `locale` when given, then the first and the second locale. When
    /// none has the key the returned text is the key itself.
    #[must_use]
    pub fn translation<'a>(&'a self, key: &str, locale: Option<&'a LocaleId>) -> I18nString<'a> {
        I18nString::new(key.to_string(), self, locale)
    }

    /// The first stored text for `key` along the lookup order.
    pub(crate) fn resolve(&self, key: &str, locale: Option<&LocaleId>) -> Option<&str> {
        locale
            .into_iter()
            .chain([&self.first_locale, &self.second_locale])
            .find_map(|locale| self.table.get(locale.as_str(), key))
    }

    /// Compiles `.lang` source text and stores its translations.
    ///
    /// Nothing is stored when the source has an error.
    ///
    /// # Errors
    /// [`LoadError::Lang`] with the offending line.
    pub fn load_lang_str(
        &mut self,
        source: &str,
        locale: Option<LocaleId>,
        superiors: Option<KeyPath>,
    ) -> Result<usize, LoadError> {
        let entries = parse_lang(source, locale, superiors)?;
        Ok(self.commit(entries))
    }

    /// Loads a `.lang` file.
    ///
    /// # Errors
    /// [`LoadError::Parse`] names the file and line of a compile error.
    pub fn load_lang(
        &mut self,
        path: &Path,
        locale: Option<LocaleId>,
        superiors: Option<KeyPath>,
    ) -> Result<usize, LoadError> {
        let entries = input::load_lang_file(path, locale, superiors)
            .map_err(|err| LoadError::from_resource(path, err))?;
        Ok(self.commit(entries))
    }

    /// Loads a JSON file holding the translations of one locale.
    pub fn load_json(
        &mut self,
        path: &Path,
        locale: &LocaleId,
        superiors: Option<&KeyPath>,
    ) -> Result<usize, LoadError> {
        let entries = input::load_json_file(path, locale, superiors)
            .map_err(|err| LoadError::from_resource(path, err))?;
        Ok(self.commit(entries))
    }

    /// Loads a JSON file keyed by locale.
    pub fn load_json_i18n(&mut self, path: &Path) -> Result<usize, LoadError> {
        let entries =
            input::load_json_i18n_file(path).map_err(|err| LoadError::from_resource(path, err))?;
        Ok(self.commit(entries))
    }

    /// Loads a `locale,key,value` sheet.
    pub fn load_csv_i18n(&mut self, path: &Path) -> Result<usize, LoadError> {
        let entries =
            input::load_csv_i18n_file(path).map_err(|err| LoadError::from_resource(path, err))?;
        Ok(self.commit(entries))
    }

    /// Loads an in-memory JSON object.
    ///
    /// With `locale` the object holds that locale's translations, otherwise
    /// its top-level keys are locales.
    pub fn load_dict(
        &mut self,
        dict: &Value,
        locale: Option<&LocaleId>,
        superiors: Option<&KeyPath>,
    ) -> Result<usize, LoadError> {
        let entries = match locale {
            Some(locale) => input::load_json_value(dict, locale, superiors)?,
            None => input::load_json_i18n_value(dict)?,
        };
        Ok(self.commit(entries))
    }

    /// Loads every resource below `directory` using the default patterns.
    ///
    /// `directory/en_US.lang` loads into `en_US`, `directory/en_US/menu.lang`
    /// into `en_US` below `menu`, and sheets name their own locales. With
    /// `locale`, every file directly in `directory` loads into it.
    ///
    /// # Errors
    /// The directory cannot be walked, or a resource fails to load. Resources
    /// loaded before the failing one stay loaded.
    pub fn auto_load(
        &mut self,
        directory: &Path,
        locale: Option<&LocaleId>,
    ) -> Result<usize, LoadError> {
        self.auto_load_with(directory, &I18nSettings::default(), locale)
    }

    /// [`Self::auto_load`] with the exclude patterns of `settings`.
    fn auto_load_with(
        &mut self,
        directory: &Path,
        settings: &I18nSettings,
        locale: Option<&LocaleId>,
    ) -> Result<usize, LoadError> {
        let matcher = FileMatcher::new(directory.to_path_buf(), settings)?;
        let files = ResourceIndexer::new().find_resources(&matcher, locale)?;

        files
            .iter()
            .try_fold(0, |count, file| Ok::<_, LoadError>(count + self.load_resource(file)?))
    }

    /// Loads one discovered file according to its kind.
    fn load_resource(&mut self, file: &ResourceFile) -> Result<usize, LoadError> {
        let path = file.path.as_path();
        match (file.kind, &file.locale) {
            (ResourceKind::Lang, locale) => {
                self.load_lang(path, locale.clone(), file.superiors.clone())
            }
            (ResourceKind::Json, Some(locale)) => {
                self.load_json(path, locale, file.superiors.as_ref())
            }
            (ResourceKind::Json, None) => self.load_json_i18n(path),
            (ResourceKind::Csv, _) => self.load_csv_i18n(path),
        }
    }

    /// Adds compiled entries to the table.
    fn commit(&mut self, entries: Vec<Entry>) -> usize {
        let count = entries.len();
        self.table.extend(entries);
        count
    }
}

/// `zh_CN`, unless that is the first locale.
fn default_second_locale(first_locale: &LocaleId) -> LocaleId {
    if first_locale.as_str() == DEFAULT_SECOND_LOCALE {
        LocaleId::from_static(DEFAULT_FIRST_LOCALE)
    } else {
        LocaleId::from_static(DEFAULT_SECOND_LOCALE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::{
        fixture,
        rstest,
    };
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::test_utils::write_resource;

    fn locale(id: &str) -> LocaleId {
        LocaleId::new(id).unwrap()
    }

    #[fixture]
    fn i18n() -> Internationalization {
        Internationalization::with_locales(locale("en_US"), locale("zh_CN")).unwrap()
    }

    #[fixture]
    fn loaded(mut i18n: Internationalization) -> Internationalization {
        i18n.load_lang_str(
            "#define locale en_US\n\
             hello = Hello\n\
             mode.singleton = Singleton Mode\n\
             #define locale zh_CN\n\
             hello = 你好\n\
             only.zh = 仅中文\n\
             #define locale ja_JP\n\
             hello = こんにちは\n",
            None,
            None,
        )
        .unwrap();
        i18n
    }

    #[gtest]
    #[rstest]
    #[case::first_locale("hello", None, "Hello")]
    #[case::second_locale("only.zh", None, "仅中文")]
    #[case::key_itself("no.such.key", None, "no.such.key")]
    #[case::explicit_locale("hello", Some("ja_JP"), "こんにちは")]
    #[case::explicit_then_first("mode.singleton", Some("ja_JP"), "Singleton Mode")]
    fn test_translation_fallback(
        loaded: Internationalization,
        #[case] key: &str,
        #[case] explicit: Option<&str>,
        #[case] expected: &str,
    ) {
        let explicit = explicit.map(locale);

        let text = loaded.translation(key, explicit.as_ref());

        assert_eq!(text.to_string(), expected);
    }

    #[gtest]
    #[rstest]
    fn test_translation_child(loaded: Internationalization) {
        let mode = loaded.translation("mode", None);

        expect_that!(mode.is_fallback(), eq(true));
        expect_that!(mode.child("singleton").to_string(), eq("Singleton Mode"));
        expect_that!(mode.child("singleton").key(), eq("mode.singleton"));
        expect_that!(mode.child("missing").is_fallback(), eq(true));
    }

    #[gtest]
    #[rstest]
    fn test_translation_format(mut i18n: Internationalization) {
        i18n.set_translation(&[locale("en_US")], "greet", "Hi {name}, you have {0} messages")
            .unwrap();

        let text = i18n.translation("greet", None).format(&[&3], &[("name", &"Ada")]);

        assert_eq!(text, "Hi Ada, you have 3 messages");
    }

    #[gtest]
    #[rstest]
    fn test_set_translation_fans_out(mut i18n: Internationalization) {
        i18n.set_translation(&[locale("en_US"), locale("en_GB")], "colour", "Colour").unwrap();

        expect_that!(i18n.table().get("en_US", "colour"), some(eq("Colour")));
        expect_that!(i18n.table().get("en_GB", "colour"), some(eq("Colour")));
    }

    #[gtest]
    #[rstest]
    #[case::empty_segment("a..b")]
    #[case::empty_key("")]
    fn test_set_translation_rejects_bad_key(mut i18n: Internationalization, #[case] key: &str) {
        let result = i18n.set_translation(&[locale("en_US")], key, "x");

        expect_that!(matches!(result, Err(LoadError::Type(_))), eq(true));
        expect_that!(i18n.table().is_empty(), eq(true));
    }

    #[gtest]
    #[rstest]
    fn test_remove_and_clear(mut loaded: Internationalization) {
        assert_eq!(loaded.remove_translation("en_US", "hello").as_deref(), Some("Hello"));
        expect_that!(loaded.translation("hello", None).to_string(), eq("你好"));

        expect_that!(loaded.clear_locale("zh_CN"), eq(2));
        expect_that!(loaded.translation("hello", None).to_string(), eq("hello"));
    }

    #[gtest]
    #[rstest]
    fn test_set_locale_swaps_when_equal_to_other(mut i18n: Internationalization) {
        i18n.set_locale(Some(locale("zh_CN")), None, false).unwrap();

        expect_that!(i18n.first_locale().as_str(), eq("zh_CN"));
        expect_that!(i18n.second_locale().as_str(), eq("en_US"));

        i18n.set_second_locale(locale("zh_CN"));

        expect_that!(i18n.first_locale().as_str(), eq("en_US"));
        expect_that!(i18n.second_locale().as_str(), eq("zh_CN"));
    }

    #[gtest]
    #[rstest]
    fn test_set_locale_rejects_equal_pair(mut i18n: Internationalization) {
        let result = i18n.set_locale(Some(locale("ja_JP")), Some(locale("ja_JP")), false);

        expect_that!(matches!(result, Err(LoadError::SameLocale(_))), eq(true));
        expect_that!(i18n.get_locale().as_str(), eq("en_US"));
    }

    #[gtest]
    #[rstest]
    fn test_set_locale_sets_both(mut i18n: Internationalization) {
        i18n.set_locale(Some(locale("fr_FR")), Some(locale("de_DE")), true).unwrap();

        expect_that!(i18n.first_locale().as_str(), eq("fr_FR"));
        expect_that!(i18n.second_locale().as_str(), eq("de_DE"));
    }

    #[gtest]
    #[rstest]
    fn test_set_locale_auto_adjust(mut i18n: Internationalization) {
        i18n.load_lang_str("#define locale en_GB fr_FR\nhello = Hello", None, None).unwrap();

        i18n.set_locale(Some(locale("en_US")), None, true).unwrap();

        expect_that!(i18n.second_locale().as_str(), eq("en_GB"));
    }

    #[gtest]
    #[rstest]
    fn test_set_locale_auto_adjust_keeps_second_without_match(mut loaded: Internationalization) {
        loaded.set_locale(Some(locale("en_US")), None, true).unwrap();

        expect_that!(loaded.second_locale().as_str(), eq("zh_CN"));
    }

    #[gtest]
    #[rstest]
    fn test_auto_adjust_best_locale(mut i18n: Internationalization) {
        i18n.load_lang_str("#define locale en_GB zh_TW\nhello = Hello", None, None).unwrap();

        i18n.auto_adjust_best_locale();

        expect_that!(i18n.first_locale().as_str(), eq("en_GB"));
        expect_that!(i18n.second_locale().as_str(), eq("zh_TW"));
    }

    #[gtest]
    #[rstest]
    fn test_available_locales(loaded: Internationalization) {
        let locales: Vec<&str> = loaded.available_locales().into_iter().map(LocaleId::as_str).collect();

        assert_eq!(locales, vec!["en_US", "ja_JP", "zh_CN"]);
    }

    #[gtest]
    #[rstest]
    fn test_load_lang_str_is_all_or_nothing(mut i18n: Internationalization) {
        let result = i18n.load_lang_str("a = 1\nb = 2\n#define locale\n", None, None);

        match result {
            Err(LoadError::Lang(err)) => {
                expect_that!(err.line, eq(3));
                expect_that!(err.kind == ParseErrorKind::EmptyLocaleDirective, eq(true));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        expect_that!(i18n.table().is_empty(), eq(true));
    }

    #[gtest]
    #[rstest]
    fn test_load_lang_reports_path_and_line(mut i18n: Internationalization) {
        let temp_dir = TempDir::new().unwrap();
        let path = write_resource(temp_dir.path(), "broken.lang", "ok = fine\nvalue = \"open\n");

        let err = i18n.load_lang(&path, None, None).unwrap_err();

        expect_that!(err.to_string(), eq(&format!("{}:2: unterminated quoted string", path.display())));
        expect_that!(matches!(err, LoadError::Parse { line: 2, .. }), eq(true));
    }

    #[gtest]
    #[rstest]
    fn test_load_missing_file_is_resource_error(mut i18n: Internationalization) {
        let temp_dir = TempDir::new().unwrap();

        let result = i18n.load_json_i18n(&temp_dir.path().join("missing.json"));

        expect_that!(
            matches!(result, Err(LoadError::Resource { source: InputError::Io(_), .. })),
            eq(true)
        );
    }

    #[gtest]
    #[rstest]
    fn test_load_dict(mut i18n: Internationalization) {
        let superiors = KeyPath::parse("menu").unwrap();

        i18n.load_dict(&json!({"open": "Open"}), Some(&locale("en_US")), Some(&superiors))
            .unwrap();
        i18n.load_dict(&json!({"zh_CN": {"menu": {"open": "打开"}}}), None, None).unwrap();

        expect_that!(i18n.translation("menu.open", None).to_string(), eq("Open"));
        expect_that!(i18n.table().get("zh_CN", "menu.open"), some(eq("打开")));
    }

    #[gtest]
    #[rstest]
    fn test_load_json_and_csv_files(mut i18n: Internationalization) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let json = write_resource(root, "en_US.json", r#"{"title": "Title"}"#);
        let sheet = write_resource(root, "sheet.csv", "locale,key,value\nzh_CN,title,标题\n");

        expect_that!(i18n.load_json(&json, &locale("en_US"), None).unwrap(), eq(1));
        expect_that!(i18n.load_csv_i18n(&sheet).unwrap(), eq(1));

        expect_that!(i18n.table().get("en_US", "title"), some(eq("Title")));
        expect_that!(i18n.table().get("zh_CN", "title"), some(eq("标题")));
    }

    #[gtest]
    #[rstest]
    fn test_auto_load_directory(mut i18n: Internationalization) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_resource(root, "en_US.lang", "hello = Hello");
        write_resource(root, "zh_CN/menu.lang", "open = 打开");
        write_resource(root, "zh_CN/common.json", r#"{"ok": "好"}"#);
        write_resource(root, "sheet.csv", "locale,key,value\nja_JP,hello,こんにちは\n");

        let count = i18n.auto_load(root, None).unwrap();

        expect_that!(count, eq(4));
        expect_that!(i18n.table().get("en_US", "hello"), some(eq("Hello")));
        expect_that!(i18n.table().get("zh_CN", "menu.open"), some(eq("打开")));
        expect_that!(i18n.table().get("zh_CN", "ok"), some(eq("好")));
        expect_that!(i18n.table().get("ja_JP", "hello"), some(eq("こんにちは")));
    }

    #[gtest]
    #[rstest]
    fn test_auto_load_keeps_earlier_files_on_failure(mut i18n: Internationalization) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_resource(root, "a_good.lang", "#define locale en_US\nhello = Hello");
        write_resource(root, "b_bad.lang", "#define locale en_US\nnot a statement");

        let err = i18n.auto_load(root, Some(&locale("en_US"))).unwrap_err();

        expect_that!(matches!(err, LoadError::Parse { line: 2, .. }), eq(true));
        expect_that!(i18n.table().get("en_US", "a_good.hello"), some(eq("Hello")));
    }

    #[googletest::test]
    fn test_open_with_settings() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_resource(root, ".i18nco.json", r#"{"firstLocale": "fr_FR", "secondLocale": "zh_CN"}"#);
        write_resource(root, "fr_FR.lang", "hello = Bonjour");
        write_resource(root, "fr_CA.lang", "hello = Allô\nbye = Salut");

        let i18n = Internationalization::open(root).unwrap();

        expect_that!(i18n.first_locale().as_str(), eq("fr_FR"));
        expect_that!(i18n.second_locale().as_str(), eq("fr_CA"));
        expect_that!(i18n.translation("bye", None).to_string(), eq("Salut"));
    }

    #[googletest::test]
    fn test_open_without_auto_adjust() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_resource(
            root,
            ".i18nco.json",
            r#"{"firstLocale": "fr_FR", "secondLocale": "de_DE", "autoAdjust": false}"#,
        );
        write_resource(root, "fr_CA.lang", "hello = Allô");

        let i18n = Internationalization::open(root).unwrap();

        expect_that!(i18n.second_locale().as_str(), eq("de_DE"));
    }

    #[googletest::test]
    fn test_open_rejects_invalid_settings() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_resource(root, ".i18nco.json", r#"{"firstLocale": "en_US", "secondLocale": "en_US"}"#);

        let result = Internationalization::open(root);

        expect_that!(matches!(result, Err(LoadError::Config(_))), eq(true));
    }

    #[googletest::test]
    fn test_open_with_first_locale_only() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_resource(root, ".i18nco.json", r#"{"firstLocale": "zh_CN"}"#);
        write_resource(root, "zh_CN.lang", "hello = 你好");
        write_resource(root, "en_US.lang", "hello = Hello\nbye = Bye");

        let i18n = Internationalization::open(root).unwrap();

        expect_that!(i18n.first_locale().as_str(), eq("zh_CN"));
        expect_that!(i18n.second_locale().as_str(), eq("en_US"));
        expect_that!(i18n.translation("bye", None).to_string(), eq("Bye"));
    }

    #[googletest::test]
    fn test_default_second_locale() {
        expect_that!(default_second_locale(&locale("en_US")).as_str(), eq("zh_CN"));
        expect_that!(default_second_locale(&locale("zh_CN")).as_str(), eq("en_US"));
    }
}
