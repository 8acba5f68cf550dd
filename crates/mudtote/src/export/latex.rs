//! LaTeX escaping for TikZ labels.
//!
//! Labels may hold plain text (`Boil water`, `50% off`) or LaTeX the user
//! wants typeset (`$\alpha \to \beta$`, `x^2`). Detected LaTeX passes through
//! with only the characters that would break the document escaped; plain
//! text is escaped completely.

use std::sync::OnceLock;

use regex::Regex;

const GREEK_LETTERS: &str = "alpha|beta|gamma|delta|epsilon|varepsilon|zeta|eta|theta|vartheta|\
    iota|kappa|lambda|mu|nu|xi|pi|varpi|rho|varrho|sigma|varsigma|tau|upsilon|phi|varphi|chi|psi|\
    omega|Gamma|Delta|Theta|Lambda|Xi|Pi|Sigma|Upsilon|Phi|Psi|Omega";

const OPERATORS: &str = "to|rightarrow|leftarrow|Rightarrow|Leftarrow|leftrightarrow|\
    Leftrightarrow|mapsto|vdash|models|neg|lnot|land|lor|wedge|vee|forall|exists|in|notin|\
    subset|subseteq|cup|cap|leq|geq|neq|approx|equiv|times|cdot|circ|infty|sum|prod|int|\
    frac|sqrt|mathbf|mathrm|mathit|mathcal|text|textbf|textit|emph|ldots|cdots";

fn math_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\$\$.+?\$\$|\$[^$]+\$|\\\(.+?\\\)|\\\[.+?\\\]").expect("valid regex")
    })
}

fn command_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"\\(?:{GREEK_LETTERS}|{OPERATORS})\b")).expect("valid regex")
    })
}

fn script_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z0-9}\)]\s*[_^]\s*[{A-Za-z0-9]").expect("valid regex"))
}

fn generic_command_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\\[a-zA-Z]+\{[^}]*\}").expect("valid regex"))
}

/// Returns `true` if `text` looks like LaTeX the author wants typeset.
///
/// Recognizes math delimiters (`$…$`, `$$…$$`, `\(…\)`, `\[…\]`), Greek
/// letter and operator commands, sub/superscripts and `\command{…}`.
///
/// ```
/// # use mudtote::export::latex::is_latex_content;
/// assert!(is_latex_content(r"$p \to q$"));
/// assert!(is_latex_content(r"\alpha"));
/// assert!(is_latex_content("x^2 + y^2 = 1"));
/// assert!(!is_latex_content("50% off"));
/// assert!(!is_latex_content("costs $5"));
/// ```
pub fn is_latex_content(text: &str) -> bool {
    math_pattern().is_match(text)
        || command_pattern().is_match(text)
        || script_pattern().is_match(text)
        || generic_command_pattern().is_match(text)
}

/// Escapes every LaTeX special character in plain text.
///
/// ```
/// # use mudtote::export::latex::escape_latex;
/// assert_eq!(escape_latex("50% off & more"), r"50\% off \& more");
/// assert_eq!(escape_latex(r"a\b"), r"a\textbackslash{}b");
/// assert_eq!(escape_latex("~^"), r"\~{}\^{}");
/// ```
pub fn escape_latex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str(r"\textbackslash{}"),
            '{' => escaped.push_str(r"\{"),
            '}' => escaped.push_str(r"\}"),
            '#' | '%' | '$' | '_' | '&' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '^' => escaped.push_str(r"\^{}"),
            '~' => escaped.push_str(r"\~{}"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes only `#`, `%` and `&` that are not already escaped.
fn escape_latex_content(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut previous = None;
    for c in text.chars() {
        if matches!(c, '#' | '%' | '&') && previous != Some('\\') {
            escaped.push('\\');
        }
        escaped.push(c);
        previous = Some(c);
    }
    escaped
}

/// Prepares a label for TikZ: LaTeX content keeps its markup, plain text is
/// fully escaped.
///
/// ```
/// # use mudtote::export::latex::escape_label;
/// assert_eq!(escape_label("x^2 + y^2 = 1"), "x^2 + y^2 = 1");
/// assert_eq!(escape_label("50% off"), r"50\% off");
/// assert_eq!(escape_label(r"$a \& b$ & c"), r"$a \& b$ \& c");
/// ```
pub fn escape_label(text: &str) -> String {
    if is_latex_content(text) {
        escape_latex_content(text)
    } else {
        escape_latex(text)
    }
}
