//! User facing texts for dialogs, toasts and placeholders.
//!
//! Every text is looked up by [MessageId] in a [MessageCatalog]. The catalog picks the built-in
//! text for its [Locale] unless the user configured an override in their settings.

use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum, strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Locale {
    #[default]
    ZhCn,
    En,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::AsRefStr,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageId {
    NotInstalledTitle,
    NotInstalledMessage,
    Acknowledge,
    DisabledTitle,
    DisabledMessage,
    Cancel,
    Enable,
    EnableHintToast,
    /// Shown in place of an empty file hash.
    HashUnavailable,
}

impl MessageId {
    fn builtin(self, locale: Locale) -> &'static str {
        match locale {
            Locale::ZhCn => match self {
                MessageId::NotInstalledTitle => "错误",
                MessageId::NotInstalledMessage => "没有找到 MIUI 主题商店\n您或许卸载了 MIUI 主题商店",
                MessageId::Acknowledge => "OK",
                MessageId::DisabledTitle => "警告",
                MessageId::DisabledMessage => "MIUI 主题商店被禁用\n请手动启用 MIUI 主题商店",
                MessageId::Cancel => "返回",
                MessageId::Enable => "启用",
                MessageId::EnableHintToast => "请点击下方的 “启用”",
                MessageId::HashUnavailable => "暂无",
            },
            Locale::En => match self {
                MessageId::NotInstalledTitle => "Error",
                MessageId::NotInstalledMessage => {
                    "MIUI Theme Store was not found\nIt may have been uninstalled"
                },
                MessageId::Acknowledge => "OK",
                MessageId::DisabledTitle => "Warning",
                MessageId::DisabledMessage => "MIUI Theme Store is disabled\nPlease enable it manually",
                MessageId::Cancel => "Back",
                MessageId::Enable => "Enable",
                MessageId::EnableHintToast => "Tap \"Enable\" below",
                MessageId::HashUnavailable => "N/A",
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    locale: Locale,
    overrides: HashMap<MessageId, String>,
}

impl MessageCatalog {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            overrides: HashMap::new(),
        }
    }

    pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = (MessageId, String)>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn get(&self, id: MessageId) -> &str {
        self.overrides
            .get(&id)
            .map_or_else(|| id.builtin(self.locale), String::as_str)
    }
}
