//! Plain-text detail rendering for a single transaction.
//!
//! A selected transaction is shown as four sections (general, request,
//! response, timing), each a block of `Label: value` lines. The list row for
//! a transaction is a single [`summary_line`].

use super::body::{format_request_body, format_response_body};
use super::{format_bytes, format_phase, format_timestamp, format_total};
use crate::config::AnalyzerConfig;
use crate::models::{NameValuePair, Request, Response, Timings, Transaction};

/// Standard timing phases with their display labels, in display order.
const PHASE_LABELS: [(&str, &str); 6] = [
    ("dns", "DNS Lookup"),
    ("connect", "TCP Connect"),
    ("ssl", "SSL Handshake"),
    ("send", "Request Sent"),
    ("wait", "Waiting (TTFB)"),
    ("receive", "Content Download"),
];

/// Formats the one-line list summary of a transaction.
///
/// # Examples
///
/// ```
/// use har_analyzer::formatter::summary_line;
/// use har_analyzer::models::{Request, Response, Transaction};
///
/// let mut response = Response::new(200, "OK");
/// response.content.size = Some(1536);
/// let transaction = Transaction::new(Request::new("GET", "https://example.com/"), response);
///
/// assert_eq!(
///     summary_line(&transaction),
///     "GET 200 https://example.com/ | other | 1.50 KB | 0ms"
/// );
/// ```
pub fn summary_line(transaction: &Transaction) -> String {
    format!(
        "{} {} {} | {} | {} | {}",
        transaction.method(),
        transaction.status(),
        transaction.url(),
        transaction.content_category(),
        format_bytes(transaction.effective_size()),
        format_total(transaction.total_duration())
    )
}

/// Renders the general overview section.
pub fn general_section(transaction: &Transaction, config: &AnalyzerConfig) -> String {
    let request = &transaction.request;
    let response = &transaction.response;

    let mut output = String::from("General:\n");
    push_line(&mut output, "URL", &request.url);
    push_line(&mut output, "Method", &request.method);
    push_line(
        &mut output,
        "Status",
        &format!("{} {}", response.status, response.status_text),
    );
    if let Some(version) = &request.http_version {
        push_line(&mut output, "HTTP Version", version);
    }
    push_line(
        &mut output,
        "Content Type",
        transaction.content_category().as_str(),
    );
    push_line(
        &mut output,
        "Size",
        &format_bytes(transaction.effective_size()),
    );
    push_line(
        &mut output,
        "Started",
        &format_timestamp(transaction, &config.date_format),
    );
    output
}

/// Renders the request section: headers, then query parameters and cookies
/// when present, then the body when one was posted.
pub fn request_section(request: &Request, config: &AnalyzerConfig) -> String {
    let mut output = String::new();
    push_pairs(&mut output, "Request Headers", &request.headers);

    if !request.query_string.is_empty() {
        push_pairs(&mut output, "Query Parameters", &request.query_string);
    }

    if !request.cookies.is_empty() {
        push_pairs(&mut output, "Cookies", &request.cookies);
    }

    if let Some(post_data) = &request.post_data {
        let body = format_request_body(post_data, config.pretty_print_bodies);
        push_body(&mut output, "Request Body", &body, config.body_preview_limit);
    }

    output
}

/// Renders the response section: headers, then the body when text was
/// captured.
pub fn response_section(response: &Response, config: &AnalyzerConfig) -> String {
    let mut output = String::new();
    push_pairs(&mut output, "Response Headers", &response.headers);

    if response.content.text.as_deref().is_some_and(|t| !t.is_empty()) {
        let body = format_response_body(&response.content, config.pretty_print_bodies);
        push_body(&mut output, "Response Body", &body, config.body_preview_limit);
    }

    output
}

/// Renders the timing breakdown.
///
/// The six standard phases are always listed, with `N/A` for unmeasured
/// ones. Blocked time and non-standard phases are listed only when present.
/// The total is the sum of every positive phase, rounded.
pub fn timing_section(timings: &Timings) -> String {
    let mut output = String::from("Timing:\n");

    if let Some(blocked) = timings.blocked {
        push_line(&mut output, "Blocked", &format_phase(Some(blocked)));
    }

    let measured: Vec<(&str, f64)> = timings.phases().collect();
    for (name, label) in PHASE_LABELS {
        let value = measured
            .iter()
            .find(|(phase, _)| *phase == name)
            .map(|(_, millis)| *millis);
        push_line(&mut output, label, &format_phase(value));
    }

    for (name, millis) in &timings.extra {
        push_line(&mut output, name, &format_phase(Some(*millis)));
    }

    push_line(&mut output, "Total", &format_total(timings.total_duration()));
    output
}

/// Renders every detail section of a transaction, separated by blank lines.
pub fn render_details(transaction: &Transaction, config: &AnalyzerConfig) -> String {
    [
        general_section(transaction, config),
        request_section(&transaction.request, config),
        response_section(&transaction.response, config),
        timing_section(&transaction.timings),
    ]
    .join("\n")
}

fn push_line(output: &mut String, label: &str, value: &str) {
    output.push_str(&format!("  {}: {}\n", label, value));
}

fn push_pairs(output: &mut String, title: &str, pairs: &[NameValuePair]) {
    output.push_str(&format!("{}:\n", title));
    if pairs.is_empty() {
        output.push_str("  (none)\n");
    }
    for pair in pairs {
        push_line(output, &pair.name, &pair.value);
    }
}

fn push_body(output: &mut String, title: &str, body: &str, limit: usize) {
    output.push_str(&format!("{}:\n", title));

    let total = body.chars().count();
    if total > limit {
        let preview: String = body.chars().take(limit).collect();
        output.push_str(&preview);
        output.push_str(&format!("\n... ({} more characters)\n", total - limit));
    } else {
        output.push_str(body);
        output.push('\n');
    }
}
