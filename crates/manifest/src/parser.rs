//! Manifest Parser
//!
//! Event-based reader for the merged manifest; only the package attribute
//! and activity entries are materialized.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::{Activity, AndroidManifest, ACTION_MAIN, CATEGORY_LAUNCHER};

/// Parser errors
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Pending intent-filter contents while its element is open.
#[derive(Debug, Default)]
struct FilterScope {
    main: bool,
    launcher: bool,
}

/// Manifest parser
pub struct ManifestParser;

impl ManifestParser {
    /// Parse a manifest file from path
    pub async fn parse_file(path: impl AsRef<Path>) -> Result<AndroidManifest, ParseError> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::parse_string(&content)
    }

    /// Parse manifest from string
    pub fn parse_string(xml: &str) -> Result<AndroidManifest, ParseError> {
        let mut reader = Reader::from_reader(xml.as_bytes());
        reader.trim_text(true);

        let mut manifest = AndroidManifest::default();
        let mut buf = Vec::new();
        let mut current_activity: Option<Activity> = None;
        let mut current_filter: Option<FilterScope> = None;
        let mut in_application = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.name().as_ref() {
                    b"manifest" => {
                        manifest.package = Self::get_attr(e, "package").unwrap_or_default();
                    }
                    b"application" => {
                        in_application = true;
                    }
                    b"activity" | b"activity-alias" if in_application => {
                        current_activity = Some(Self::parse_activity(e));
                    }
                    b"intent-filter" if current_activity.is_some() => {
                        current_filter = Some(FilterScope::default());
                    }
                    b"action" => {
                        Self::mark_filter(&mut current_filter, e, ACTION_MAIN, |f| {
                            f.main = true;
                        });
                    }
                    b"category" => {
                        Self::mark_filter(&mut current_filter, e, CATEGORY_LAUNCHER, |f| {
                            f.launcher = true;
                        });
                    }
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                    b"manifest" => {
                        manifest.package = Self::get_attr(e, "package").unwrap_or_default();
                    }
                    b"activity" | b"activity-alias" if in_application => {
                        manifest.activities.push(Self::parse_activity(e));
                    }
                    b"action" => {
                        Self::mark_filter(&mut current_filter, e, ACTION_MAIN, |f| {
                            f.main = true;
                        });
                    }
                    b"category" => {
                        Self::mark_filter(&mut current_filter, e, CATEGORY_LAUNCHER, |f| {
                            f.launcher = true;
                        });
                    }
                    _ => {}
                },
                Ok(Event::End(ref e)) => match e.name().as_ref() {
                    b"application" => {
                        in_application = false;
                    }
                    b"activity" | b"activity-alias" => {
                        if let Some(activity) = current_activity.take() {
                            manifest.activities.push(activity);
                        }
                    }
                    b"intent-filter" => {
                        if let Some(filter) = current_filter.take() {
                            if let Some(ref mut activity) = current_activity {
                                activity.main |= filter.main;
                                activity.launcher |= filter.launcher;
                            }
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(ParseError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        debug!(
            "parsed manifest for `{}` with {} activities",
            manifest.package,
            manifest.activities.len()
        );
        Ok(manifest)
    }

    fn parse_activity(e: &BytesStart) -> Activity {
        Activity {
            name: Self::get_android_attr(e, "name").unwrap_or_default(),
            exported: Self::get_android_attr(e, "exported").map(|s| s == "true"),
            main: false,
            launcher: false,
        }
    }

    fn mark_filter(
        filter: &mut Option<FilterScope>,
        e: &BytesStart,
        expected: &str,
        set: impl FnOnce(&mut FilterScope),
    ) {
        if let Some(ref mut scope) = filter {
            if Self::get_android_attr(e, "name").as_deref() == Some(expected) {
                set(scope);
            }
        }
    }

    /// Get an android: namespaced attribute
    fn get_android_attr(e: &BytesStart, name: &str) -> Option<String> {
        Self::get_attr(e, &format!("android:{}", name))
    }

    /// Get an attribute by exact name
    fn get_attr(e: &BytesStart, name: &str) -> Option<String> {
        for attr in e.attributes().filter_map(|a| a.ok()) {
            let key = std::str::from_utf8(attr.key.as_ref()).ok()?;
            if key == name {
                return std::str::from_utf8(&attr.value).ok().map(|s| s.to_string());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android"
    package="com.example.app"
    android:versionCode="1"
    android:versionName="1.0">

    <application
        android:label="@string/app_name"
        android:icon="@mipmap/ic_launcher">

        <activity
            android:name=".SettingsActivity"
            android:exported="false"/>

        <activity
            android:name=".MainActivity"
            android:exported="true">
            <intent-filter>
                <action android:name="android.intent.action.MAIN"/>
                <category android:name="android.intent.category.LAUNCHER"/>
            </intent-filter>
        </activity>
    </application>
</manifest>"#;

    #[test]
    fn test_parse_package_and_activities() {
        let manifest = ManifestParser::parse_string(SAMPLE_MANIFEST).unwrap();

        assert_eq!(manifest.package, "com.example.app");
        assert_eq!(manifest.activities.len(), 2);
        assert_eq!(manifest.activities[0].name, ".SettingsActivity");
        assert_eq!(manifest.activities[0].exported, Some(false));
    }

    #[test]
    fn test_parse_marks_launcher_activity() {
        let manifest = ManifestParser::parse_string(SAMPLE_MANIFEST).unwrap();

        let main = manifest.launch_activity().unwrap();
        assert_eq!(main.name, ".MainActivity");
        assert!(main.main);
        assert!(main.launcher);
        assert_eq!(
            manifest.launch_component().as_deref(),
            Some("com.example.app/.MainActivity")
        );
    }

    #[test]
    fn test_parse_without_launcher_filter() {
        let xml = r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android"
            package="com.example.bare">
            <application>
                <activity android:name=".Bare"/>
            </application>
        </manifest>"#;

        let manifest = ManifestParser::parse_string(xml).unwrap();
        assert_eq!(
            manifest.launch_component().as_deref(),
            Some("com.example.bare/.Bare")
        );
    }

    #[test]
    fn test_parse_invalid_xml_is_error() {
        let result = ManifestParser::parse_string("<manifest><application></manifest>");
        assert!(result.is_err());
    }
}
