//! Boxed section headers printed between groups of prompts.

/// Frame `message` in an ASCII box.
///
/// Each line is trimmed and left-aligned to the longest one. The result
/// starts and ends with a newline so it separates cleanly from prompts.
pub fn render_header(message: &str) -> String {
    let lines: Vec<&str> = message.lines().map(str::trim).collect();
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let edge = format!("+{}+", "-".repeat(width + 2));

    let mut out = vec![String::new(), edge.clone()];
    out.extend(lines.iter().map(|l| format!("| {:<width$} |", l)));
    out.push(edge);
    out.push(String::new());
    out.join("\n")
}
