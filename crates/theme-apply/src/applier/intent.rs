use std::collections::BTreeMap;
use std::fmt;

use bitflags::bitflags;

use crate::util::consts::{
    API_CALLED_FROM_VALUE,
    APPLY_THEME_ACTIVITY,
    EXTRA_API_CALLED_FROM,
    EXTRA_THEME_FILE_PATH,
    THEME_MANAGER_PACKAGE,
};

pub const ACTION_MAIN: &str = "android.intent.action.MAIN";
pub const ACTION_APPLICATION_DETAILS_SETTINGS: &str = "android.settings.APPLICATION_DETAILS_SETTINGS";

bitflags! {
    /// Launch flags of an [Intent], with the platform's values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct IntentFlags: u32 {
        const ACTIVITY_NEW_TASK = 0x1000_0000;
    }
}

/// Fully qualified activity of an application.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentName {
    pub package: String,
    pub class: String,
}

impl ComponentName {
    pub fn new(package: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class: class.into(),
        }
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.class)
    }
}

/// A message asking the system to start an activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub action: String,
    pub component: Option<ComponentName>,
    pub data: Option<String>,
    pub flags: IntentFlags,
    /// String extras. Ordered so that dispatch is deterministic.
    pub extras: BTreeMap<String, String>,
}

impl Intent {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            component: None,
            data: None,
            flags: IntentFlags::empty(),
            extras: BTreeMap::new(),
        }
    }

    /// Intent handing `theme_file_path` to the theme manager's apply activity.
    pub fn apply_theme(theme_file_path: impl Into<String>) -> Self {
        Self::new(ACTION_MAIN)
            .with_component(ComponentName::new(THEME_MANAGER_PACKAGE, APPLY_THEME_ACTIVITY))
            .with_flags(IntentFlags::ACTIVITY_NEW_TASK)
            .with_extra(EXTRA_THEME_FILE_PATH, theme_file_path)
            .with_extra(EXTRA_API_CALLED_FROM, API_CALLED_FROM_VALUE)
    }

    /// Intent opening the system settings page of `package`.
    pub fn application_details_settings(package: &str) -> Self {
        Self::new(ACTION_APPLICATION_DETAILS_SETTINGS).with_data(format!("package:{package}"))
    }

    pub fn with_component(mut self, component: ComponentName) -> Self {
        self.component = Some(component);
        self
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn with_flags(mut self, flags: IntentFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras.get(key).map(String::as_str)
    }
}
