use tablesmith_core::GenerationRequest;

/// Instructions given to the model for every generation run.
pub const SYSTEM_PROMPT: &str = r#"You are a database engineer adding a persistent SQLite data layer to a Next.js application.

Design the tables the application needs from its description and existing pages, then answer with a single JSON object and nothing else:

{
  "success": true,
  "message": "one sentence summary",
  "schema_sql": "CREATE TABLE statements, indexes and triggers",
  "seed_sql": "INSERT statements with realistic sample rows",
  "files": [
    {"path": "lib/db.js", "content": "data access module"}
  ]
}

Rules:
- schema_sql and seed_sql must run on SQLite 3 in order, inside one transaction. Do not emit BEGIN or COMMIT.
- Use INTEGER PRIMARY KEY ids, TEXT timestamps in ISO-8601 and FOREIGN KEY constraints where rows reference each other.
- files holds the access layer: a connection helper opening the database file by its given name relative to the project root, and one module per aggregate exposing query functions used by the pages.
- Every file path is relative to the project root. Never write into pages/.
- If the request cannot be fulfilled, answer {"success": false, "message": "<reason>"}."#;

/// Renders the user query describing one generation request.
pub fn render_request(request: &GenerationRequest) -> String {
    let pages = if request.existing_routes.is_empty() {
        "The application has no pages yet.\n".to_owned()
    } else {
        request.existing_routes.iter().fold(
            "Existing pages (their source is attached):\n".to_owned(),
            |mut pages, route| {
                pages.push_str("- ");
                pages.push_str(route);
                pages.push('\n');
                pages
            },
        )
    };

    let auth = if request.include_auth {
        "include a users table with unique email and password_hash columns"
    } else {
        "do not add authentication tables"
    };
    let sessions = if request.include_session {
        "include a sessions table with token, user reference and expires_at"
    } else {
        "do not add session tables"
    };

    format!(
        "Application description:\n{}\n\n{pages}\nDatabase file name: {}\nAuthentication: {auth}\nSessions: {sessions}\n",
        request.app_description, request.database_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn request(routes: &[&str], include_auth: bool, include_session: bool) -> GenerationRequest {
        GenerationRequest {
            app_description: "A recipe sharing site".to_owned(),
            existing_routes: routes.iter().map(|route| (*route).to_owned()).collect(),
            route_contents: BTreeMap::new(),
            include_auth,
            include_session,
            database_name: "recipes.db".to_owned(),
            project_path: PathBuf::from("/srv/recipes"),
        }
    }

    #[test]
    fn test_render_lists_routes_and_flags() {
        let query = render_request(&request(&["/index.js", "/recipes/[id].tsx"], true, false));
        assert!(query.starts_with("Application description:\nA recipe sharing site"));
        assert!(query.contains("- /index.js\n- /recipes/[id].tsx\n"));
        assert!(query.contains("Database file name: recipes.db"));
        assert!(query.contains("include a users table"));
        assert!(query.contains("do not add session tables"));
    }

    #[test]
    fn test_render_without_pages() {
        let query = render_request(&request(&[], false, true));
        assert!(query.contains("no pages yet"));
        assert!(query.contains("do not add authentication tables"));
        assert!(query.contains("include a sessions table"));
    }
}
