//! Rule-based HTML to Markdown rewriting.
//!
//! This is not an HTML parser. The content API delivers a small, known tag
//! vocabulary (`h1`-`h6`, `br`, `strong`, `p`) and each tag is rewritten by
//! one regular expression, in a fixed order. Tags outside the vocabulary pass
//! through untouched; nested or malformed markup is rewritten on a best-effort
//! basis and never causes an error.

use std::sync::LazyLock;

use regex::Regex;

/// One substitution step of the conversion pipeline.
struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    #[allow(clippy::expect_used)] // Patterns below are static and guaranteed to be valid
    fn new(pattern: &str, replacement: impl Into<String>) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("valid regex"),
            replacement: replacement.into(),
        }
    }

    fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }
}

/// Ordered rewrite rules. Order matters: headings and line breaks are
/// rewritten before paragraphs, and the newline collapse runs last.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let mut rules = vec![Rule::new(r"\r\n", "\n")];

    for level in 1..=6 {
        rules.push(Rule::new(
            &format!(r"(?is)<h{level}>(.*?)</h{level}>"),
            format!("\n{} ${{1}}\n", "#".repeat(level)),
        ));
    }

    rules.push(Rule::new(r"(?i)<br\s?/?>\s?", "  \n\n"));
    rules.push(Rule::new(r"(?is)<strong>(.*?)</strong>", "**${1}**"));
    rules.push(Rule::new(r"(?is)<p>(.*?)</p>", "\n${1}\n"));

    // Pairs only: a run of three newlines becomes two, not one.
    rules.push(Rule::new(r"\n{2}", "\n"));

    rules
});

/// Convert an HTML body from the content API to Markdown.
///
/// The result is trimmed, ends with exactly one newline and has HTML
/// character references decoded as an HTML5 parser would in text content:
/// legacy entities without a trailing semicolon are expanded and numeric
/// references in the C1 range map to their Windows-1252 characters.
///
/// # Examples
/// ```
/// use legaltext_harvester::markdown::convert_html_to_markdown;
///
/// assert_eq!(convert_html_to_markdown("<h1>Title</h1>"), "# Title\n");
/// assert_eq!(
///     convert_html_to_markdown("<p>Hello <strong>world</strong></p>"),
///     "Hello **world**\n"
/// );
/// ```
pub fn convert_html_to_markdown(html: &str) -> String {
    let mut md = html.to_string();
    for rule in RULES.iter() {
        md = rule.apply(&md);
    }

    let md = format!("{}\n", md.trim());
    htmlize::unescape(md.as_str()).into_owned()
}
