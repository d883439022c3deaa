//! Generated Manifest Reading
//!
//! Parses the merged `AndroidManifest.xml` a Gradle build produces, keeping
//! just what is needed to launch the app: the package identifier and the
//! declared activities with their launcher markers.

pub mod parser;

pub use parser::{ManifestParser, ParseError};

/// Intent action marking an entry-point activity.
pub const ACTION_MAIN: &str = "android.intent.action.MAIN";

/// Intent category marking a launcher activity.
pub const CATEGORY_LAUNCHER: &str = "android.intent.category.LAUNCHER";

/// Launch-relevant contents of a generated manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AndroidManifest {
    /// Application package identifier.
    pub package: String,
    /// Declared activities, in document order.
    pub activities: Vec<Activity>,
}

/// An `<activity>` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Activity {
    /// Activity class name; relative names keep their leading dot.
    pub name: String,
    /// `android:exported` attribute, when present.
    pub exported: Option<bool>,
    /// Carries an intent filter with the MAIN action.
    pub main: bool,
    /// Carries an intent filter with the LAUNCHER category.
    pub launcher: bool,
}

impl AndroidManifest {
    /// The activity to start: MAIN+LAUNCHER first, then any MAIN activity,
    /// then the first one declared.
    pub fn launch_activity(&self) -> Option<&Activity> {
        self.activities
            .iter()
            .find(|a| a.main && a.launcher)
            .or_else(|| self.activities.iter().find(|a| a.main))
            .or_else(|| self.activities.first())
    }

    /// The `package/activity` component for `am start -n`.
    ///
    /// Relative activity names (`.MainActivity`) pass through unchanged;
    /// the activity manager resolves them against the package.
    pub fn launch_component(&self) -> Option<String> {
        if self.package.is_empty() {
            return None;
        }
        self.launch_activity()
            .map(|activity| format!("{}/{}", self.package, activity.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(name: &str, main: bool, launcher: bool) -> Activity {
        Activity {
            name: name.to_string(),
            exported: None,
            main,
            launcher,
        }
    }

    #[test]
    fn test_launch_activity_prefers_main_launcher() {
        let manifest = AndroidManifest {
            package: "com.example.app".to_string(),
            activities: vec![
                activity(".SettingsActivity", false, false),
                activity(".MainActivity", true, true),
            ],
        };
        assert_eq!(manifest.launch_activity().unwrap().name, ".MainActivity");
    }

    #[test]
    fn test_launch_activity_falls_back_to_first() {
        let manifest = AndroidManifest {
            package: "com.example.app".to_string(),
            activities: vec![activity(".OnlyActivity", false, false)],
        };
        assert_eq!(manifest.launch_activity().unwrap().name, ".OnlyActivity");
    }

    #[test]
    fn test_launch_component_keeps_relative_name() {
        let manifest = AndroidManifest {
            package: "com.example.app".to_string(),
            activities: vec![activity(".MainActivity", true, true)],
        };
        assert_eq!(
            manifest.launch_component().as_deref(),
            Some("com.example.app/.MainActivity")
        );
    }

    #[test]
    fn test_launch_component_requires_package() {
        let manifest = AndroidManifest {
            package: String::new(),
            activities: vec![activity(".MainActivity", true, true)],
        };
        assert_eq!(manifest.launch_component(), None);
    }
}
