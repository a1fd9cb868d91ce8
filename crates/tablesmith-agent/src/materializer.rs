use tablesmith_core::GenerationResult;

/// Sentence that opens every successful outcome.
pub const SUCCESS_HEADER: &str = "SQLite database generated successfully. Created files:";
/// Prefix of every failed outcome.
pub const FAILURE_PREFIX: &str = "Failed to generate SQLite database";

/// Renders a failure reason as an outcome message.
pub fn failure_message(reason: &str) -> String {
    format!("{FAILURE_PREFIX}: {reason}")
}

/// Renders a generation result as a human-readable outcome.
///
/// Successful results list each created file on its own `- ` bullet line;
/// failed results embed the agent's message verbatim.
pub fn materialize(result: &GenerationResult) -> String {
    if !result.success {
        return failure_message(&result.message);
    }

    result
        .created_files
        .iter()
        .fold(SUCCESS_HEADER.to_owned(), |mut message, path| {
            message.push_str("\n- ");
            message.push_str(path);
            message
        })
}
