//! i18nco
//!
//! `.lang`、JSON、CSV の翻訳リソースを読み込み、ロケールのフォールバック付きで
//! 翻訳を引くためのライブラリ

pub mod config;
pub mod i18n;
pub mod indexer;
pub mod input;
pub mod lang;
pub mod locale;
pub mod table;
pub mod types;

mod test_utils;

pub use i18n::{
    I18nString,
    Internationalization,
    LoadError,
};
pub use lang::parse_lang;
pub use table::{
    Entry,
    TranslationTable,
};
pub use types::{
    KeyPath,
    LocaleId,
};
