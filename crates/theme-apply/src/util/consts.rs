/// Name of the log file written under the data directory.
pub const LOG_FILE_NAME: &str = "theme-apply.log";

/// Package name of the MIUI theme manager.
pub const THEME_MANAGER_PACKAGE: &str = "com.android.thememanager";
/// Activity inside the theme manager that applies a theme file handed to it.
pub const APPLY_THEME_ACTIVITY: &str = "com.android.thememanager.ApplyThemeForScreenshot";

/// Intent extra carrying the absolute theme file path.
pub const EXTRA_THEME_FILE_PATH: &str = "theme_file_path";
/// Intent extra identifying the caller to the theme manager.
pub const EXTRA_API_CALLED_FROM: &str = "api_called_from";
/// The theme manager only accepts this caller tag.
pub const API_CALLED_FROM_VALUE: &str = "test";

pub mod env_var {
    macro_rules! define_env_vars {
        ($($(#[$meta:meta])* $ident:ident = $name:expr),*) => {
            $(
                $(#[$meta])*
                pub const $ident: &str = $name;
            )*
        }
    }

    define_env_vars! {
        /// Path to the data directory
        ///
        /// Overrides the default data directory location
        CLI_DATA_DIR = "THEME_APPLY_DATA_DIR",

        /// Overrides the theme API base url
        API_BASE_URL = "THEME_APPLY_API_URL",

        /// Path to the adb executable
        ADB_PATH = "THEME_APPLY_ADB"
    }
}
