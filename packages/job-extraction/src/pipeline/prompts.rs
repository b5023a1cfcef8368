//! LLM prompt for structured job extraction.
//!
//! The prompt is deterministic: the same source always renders the same text.

use crate::types::page::ExtractionSource;

/// Shown in place of page content when nothing was fetched.
pub const NO_CONTENT_PLACEHOLDER: &str = "No additional content extracted";

/// Prompt template. `{title}`, `{snippet}`, `{url}` and `{content}` are filled in.
pub const EXTRACT_PROMPT: &str = r#"You are a JSON extraction tool. Extract the following job details from this search result and format your response as a valid, parseable JSON object with these exact keys:
{
    "company_name": "The name of the company offering the job",
    "job_title": "The title of the job position",
    "recruiter": "Name of the recruiter or recruiting agency if available, otherwise empty string",
    "email": "Contact email if available, otherwise empty string",
    "phone": "Contact phone if available, otherwise empty string",
    "location": "Job location",
    "summary": "Brief job description summary (max 30 words)",
    "application_link": "Direct link to apply for the job if different from source URL",
    "posted_date": "Date when the job was posted if available, otherwise empty string",
    "still_available": "Yes, No, or empty string if the page does not say whether applications are open",
    "job_department": "Practice area or department (e.g. Corporate, IP, Litigation) if available, otherwise empty string"
}

If the page is not a job or internship posting, return the object with every value set to an empty string.

CRITICAL INSTRUCTIONS:
1. Return ONLY the JSON object, with no additional text, explanations, or formatting
2. Ensure all keys are present even if values are empty strings
3. Use double quotes for all keys and string values
4. Do not include any markdown formatting, code blocks, or backticks
5. Ensure the response is valid JSON that a strict JSON parser accepts

Title: {title}
Snippet: {snippet}
URL: {url}
Extracted Content: {content}"#;

/// Truncate to at most `max_chars` characters, never splitting a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Render the extraction prompt for one source.
pub fn format_extract_prompt(source: &ExtractionSource, content_budget: usize) -> String {
    let content = source.content.trim();
    let content = if content.is_empty() {
        NO_CONTENT_PLACEHOLDER
    } else {
        truncate_chars(content, content_budget)
    };

    // Content last so braces inside page text are never re-substituted.
    EXTRACT_PROMPT
        .replace("{title}", source.title.trim())
        .replace("{snippet}", source.snippet.trim())
        .replace("{url}", source.url.trim())
        .replace("{content}", content)
}
