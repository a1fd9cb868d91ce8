use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Database file name used when the caller does not choose one.
pub const DEFAULT_DATABASE_NAME: &str = "app.db";

/// Inventory of the routable pages found in a project.
///
/// Every key of `contents` is also present in `routes`. A route without an
/// entry in `contents` was listed but its file could not be read (or was
/// empty).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryReport {
    /// Virtual URL paths in filesystem walk order.
    pub routes: Vec<String>,
    /// Page text keyed by route.
    pub contents: BTreeMap<String, String>,
}

impl DiscoveryReport {
    /// Returns `true` when no route was discovered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Text of the page behind `route`, if it was read.
    pub fn content(&self, route: &str) -> Option<&str> {
        self.contents.get(route).map(String::as_str)
    }
}

fn default_true() -> bool {
    true
}

fn default_database_name() -> String {
    DEFAULT_DATABASE_NAME.to_owned()
}

/// Caller-selected switches for one generation run.
///
/// Deserializes with per-field defaults and ignores unknown fields, so tool
/// calls may pass only the values they care about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Generate user and credential tables.
    #[serde(default = "default_true")]
    pub include_auth: bool,
    /// Generate session tables.
    #[serde(default = "default_true")]
    pub include_session: bool,
    /// File name of the SQLite database, relative to the project root.
    #[serde(default = "default_database_name")]
    pub database_name: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            include_auth: true,
            include_session: true,
            database_name: default_database_name(),
        }
    }
}

/// Everything the generation agent receives for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Free-text description of the application.
    pub app_description: String,
    /// Routes that already exist in the project.
    pub existing_routes: Vec<String>,
    /// Page text keyed by route.
    pub route_contents: BTreeMap<String, String>,
    /// Generate user and credential tables.
    pub include_auth: bool,
    /// Generate session tables.
    pub include_session: bool,
    /// File name of the SQLite database.
    pub database_name: String,
    /// Root of the project the agent writes into.
    pub project_path: PathBuf,
}

impl GenerationRequest {
    /// Assembles a request from the scanned report and the run options.
    pub fn new(
        app_description: impl Into<String>,
        report: &DiscoveryReport,
        options: &GenerationOptions,
        project_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            app_description: app_description.into(),
            existing_routes: report.routes.clone(),
            route_contents: report.contents.clone(),
            include_auth: options.include_auth,
            include_session: options.include_session,
            database_name: options.database_name.clone(),
            project_path: project_path.into(),
        }
    }
}

/// Structured answer of the generation agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Whether generation completed.
    pub success: bool,
    /// Explanation, mainly meaningful on failure.
    pub message: String,
    /// Paths written, in write order.
    #[serde(default)]
    pub created_files: Vec<String>,
}

impl GenerationResult {
    /// A successful result listing the files written.
    pub fn succeeded(message: impl Into<String>, created_files: Vec<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            created_files,
        }
    }

    /// An unsuccessful result carrying the agent's explanation.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            created_files: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{from_str, from_value, json};

    #[test]
    fn test_options_defaults() {
        let options = GenerationOptions::default();
        assert!(options.include_auth);
        assert!(options.include_session);
        assert_eq!(options.database_name, "app.db");
    }

    #[test]
    fn test_options_partial_params_and_unknown_fields() {
        let options: GenerationOptions = from_value(json!({
            "include_session": false,
            "notes": "ignored free text"
        }))
        .unwrap();
        assert!(options.include_auth);
        assert!(!options.include_session);
        assert_eq!(options.database_name, DEFAULT_DATABASE_NAME);
    }

    #[test]
    fn test_request_copies_report_and_options() {
        let mut report = DiscoveryReport::default();
        report.routes.push("/index.js".to_owned());
        report
            .contents
            .insert("/index.js".to_owned(), "export default Home".to_owned());
        let options = GenerationOptions {
            include_auth: false,
            include_session: true,
            database_name: "shop.db".to_owned(),
        };

        let request = GenerationRequest::new("a shop", &report, &options, "/srv/shop");
        assert_eq!(request.existing_routes, vec!["/index.js"]);
        assert_eq!(
            request.route_contents.get("/index.js").map(String::as_str),
            Some("export default Home")
        );
        assert!(!request.include_auth);
        assert_eq!(request.database_name, "shop.db");
        assert_eq!(request.project_path, PathBuf::from("/srv/shop"));
    }

    #[test]
    fn test_result_without_created_files_field() {
        let result: GenerationResult =
            from_str(r#"{"success": false, "message": "quota exceeded"}"#).unwrap();
        assert_eq!(result, GenerationResult::failed("quota exceeded"));
    }

    #[test]
    fn test_report_lookup() {
        let mut report = DiscoveryReport::default();
        assert!(report.is_empty());
        report.routes.push("/a.js".to_owned());
        report.contents.insert("/a.js".to_owned(), "a".to_owned());
        assert!(!report.is_empty());
        assert_eq!(report.content("/a.js"), Some("a"));
        assert_eq!(report.content("/b.js"), None);
    }
}
