//! Feature modules backed by remote services

pub mod translator;

pub use translator::{GoogleTranslator, TranslateError, Translator};
