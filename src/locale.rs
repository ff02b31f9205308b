//! Locale detection and matching.

use crate::types::LocaleId;

/// Primary locale used when nothing else is known.
pub const DEFAULT_FIRST_LOCALE: &str = "en_US";
/// Secondary locale used when nothing else is known.
pub const DEFAULT_SECOND_LOCALE: &str = "zh_CN";

/// Normalizes an OS locale string to the `ll_CC` form used by resources.
///
/// `en-US` becomes `en_US` and encoding or modifier suffixes
/// (`.UTF-8`, `@euro`) are dropped. `C` and `POSIX` carry no language and
/// yield `None`.
#[must_use]
pub fn normalize_locale(raw: &str) -> Option<String> {
    let base = raw.trim().split(['.', '@']).next().unwrap_or_default();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('-', "_"))
}

/// Locale reported by the operating system, if any.
#[must_use]
pub fn detect_system_locale() -> Option<LocaleId> {
    let raw = sys_locale::get_locale()?;
    let locale = normalize_locale(&raw).and_then(|normalized| LocaleId::new(normalized).ok());
    tracing::debug!(%raw, ?locale, "Detected system locale");
    locale
}

/// [`detect_system_locale`], falling back to [`DEFAULT_FIRST_LOCALE`].
#[must_use]
pub fn system_locale_or_default() -> LocaleId {
    detect_system_locale().unwrap_or_else(|| LocaleId::from_static(DEFAULT_FIRST_LOCALE))
}

/// Script family used to pick a readable fallback locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WritingSystem {
    Latin,
    ChineseCharacters,
    Cyrillic,
    Arabic,
    Devanagari,
    Greek,
    JapaneseKana,
    Hangul,
    Thai,
    Hebrew,
    Khmer,
    Ethiopic,
    Georgian,
    Tamil,
}

impl WritingSystem {
    /// Search order for [`writing_system`] and [`display_name`].
    pub const ALL: [Self; 14] = [
        Self::Latin,
        Self::ChineseCharacters,
        Self::Cyrillic,
        Self::Arabic,
        Self::Devanagari,
        Self::Greek,
        Self::JapaneseKana,
        Self::Hangul,
        Self::Thai,
        Self::Hebrew,
        Self::Khmer,
        Self::Ethiopic,
        Self::Georgian,
        Self::Tamil,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Latin => "Latin Alphabet",
            Self::ChineseCharacters => "Chinese Characters",
            Self::Cyrillic => "Cyrillic Alphabet",
            Self::Arabic => "Arabic Alphabet",
            Self::Devanagari => "Devanagari Alphabet",
            Self::Greek => "Greek Alphabet",
            Self::JapaneseKana => "Japanese Kana",
            Self::Hangul => "Hangul",
            Self::Thai => "Thai Alphabet",
            Self::Hebrew => "Hebrew Alphabet",
            Self::Khmer => "Khmer Alphabet",
            Self::Ethiopic => "Ethiopic or Ge'ez Script",
            Self::Georgian => "Georgian Alphabet",
            Self::Tamil => "Tamil Script",
        }
    }

    /// `(locale, native display name)` pairs, in preference order.
    ///
    /// Japanese and Korean are listed under Chinese characters as well as
    /// under their own scripts.
    #[must_use]
    pub const fn locales(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Latin => &[
                ("en_US", "English (United States)"),
                ("en_GB", "English (United Kingdom)"),
                ("es_ES", "Español (España)"),
                ("fr_FR", "Français (France)"),
                ("de_DE", "Deutsch (Deutschland)"),
                ("it_IT", "Italiano (Italia)"),
                ("pt_PT", "Português (Portugal)"),
                ("pt_BR", "Português (Brasil)"),
                ("en_SG", "English (Singapore)"),
                ("ms_SG", "Bahasa Melayu (Singapura)"),
                ("en_MY", "English (Malaysia)"),
                ("ms_MY", "Bahasa Melayu (Malaysia)"),
            ],
            Self::ChineseCharacters => &[
                ("zh_CN", "简体中文 (中国)"),
                ("zh_HK", "繁體中文 (中國香港)"),
                ("zh_MO", "繁體中文 (中國澳門)"),
                ("zh_TW", "繁體中文 (中國台灣)"),
                ("zh_SG", "中文 (新加坡)"),
                ("zh_MY", "中文 (马来西亚)"),
                ("ja_JP", "日本語 (日本)"),
                ("ko_KR", "한국어 (대한민국)"),
                ("ko_KP", "조선말 (조선 민주주의 인민 공화국)"),
            ],
            Self::Cyrillic => &[
                ("ru_RU", "Русский (Россия)"),
                ("uk_UA", "Українська (Україна)"),
                ("bg_BG", "Български (България)"),
                ("sr_RS", "Српски (Србија)"),
            ],
            Self::Arabic => &[
                ("ar_SA", "العربية (المملكة العربية السعودية)"),
                ("ar_EG", "العربية (مصر)"),
                ("fa_IR", "فارسی (ایران)"),
                ("ur_PK", "اُردُو (پاکستان)"),
            ],
            Self::Devanagari => &[("hi_IN", "हिंदी (भारत)"), ("ne_NP", "नेपाली (नेपाल)")],
            Self::Greek => &[("el_GR", "Ελληνικά (Ελλάδα)"), ("el_CY", "Ελληνικά (Κύπρος)")],
            Self::JapaneseKana => &[("ja_JP", "日本語 (日本)")],
            Self::Hangul => {
                &[("ko_KR", "한국어 (대한민국)"), ("ko_KP", "조선말 (조선 민주주의 인민 공화국)")]
            }
            Self::Thai => &[("th_TH", "ไทย (ประเทศไทย)")],
            Self::Hebrew => &[("he_IL", "עברית (ישראל)"), ("yi_001", "ייִדיש (יידיש)")],
            Self::Khmer => &[("km_KH", "ភាសាខ្មែរ (កម្ពុជា)")],
            Self::Ethiopic => &[("am_ET", "አማርኛ (ኢትዮጵያ)"), ("ti_ER", "ትግርኛ (ኤርትራ)")],
            Self::Georgian => &[("ka_GE", "ქართული (საქართველო)")],
            Self::Tamil => &[
                ("ta_IN", "தமிழ் (இந்தியா)"),
                ("ta_LK", "தமிழ் (இலங்கை)"),
                ("ta_MY", "தமிழ் (மலேசியா)"),
                ("ta_SG", "தமிழ் (சிங்கப்பூர்)"),
            ],
        }
    }

    /// Whether this system lists `locale`.
    fn contains(self, locale: &str) -> bool {
        self.locales().iter().any(|(code, _)| *code == locale)
    }
}

/// First writing system whose table lists `locale`.
#[must_use]
pub fn writing_system(locale: &str) -> Option<WritingSystem> {
    WritingSystem::ALL.into_iter().find(|system| system.contains(locale))
}

/// Native display name of a known locale (`zh_CN` -> `简体中文 (中国)`).
#[must_use]
pub fn display_name(locale: &str) -> Option<&'static str> {
    WritingSystem::ALL
        .into_iter()
        .flat_map(WritingSystem::locales)
        .find(|(code, _)| *code == locale)
        .map(|(_, name)| *name)
}

/// Picks the available locale a reader of `target` is most likely to understand.
///
/// Tries, in order: `target` itself, a locale with the same language, and a
/// locale sharing `target`'s writing system (in table order).
#[must_use]
pub fn match_best_locale<'a>(
    target: &LocaleId,
    available: &[&'a LocaleId],
) -> Option<&'a LocaleId> {
    if let Some(exact) = available.iter().find(|locale| **locale == target) {
        return Some(*exact);
    }

    if let Some(same_language) =
        available.iter().find(|locale| locale.language() == target.language())
    {
        return Some(*same_language);
    }

    let system = writing_system(target.as_str())?;
    system
        .locales()
        .iter()
        .find_map(|(code, _)| available.iter().find(|locale| locale.as_str() == *code))
        .copied()
}
