//! Title selection and LaTeX clean-up.
//!
//! Clean-up is an ordered list of pure `&str -> String` rules. Order matters:
//! MathML must be converted before `%`/`&` escaping looks at the text, and
//! `{\&}` must be collapsed before bare ampersands are escaped.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::config_file::PubsConfig;
use crate::record::Record;

/// A named text-rewrite step.
pub struct TitleRule {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

/// Clean-up rules in application order.
pub const TITLE_RULES: &[TitleRule] = &[
    TitleRule {
        name: "strip_outer_braces",
        apply: strip_outer_braces,
    },
    TitleRule {
        name: "mathml_to_latex",
        apply: mathml_to_latex,
    },
    TitleRule {
        name: "greek_letters",
        apply: greek_letters,
    },
    TitleRule {
        name: "typographic_punctuation",
        apply: typographic_punctuation,
    },
    TitleRule {
        name: "escape_percent",
        apply: escape_percent,
    },
    TitleRule {
        name: "lambda_cdm",
        apply: lambda_cdm,
    },
    TitleRule {
        name: "collapse_braced_ampersand",
        apply: collapse_braced_ampersand,
    },
    TitleRule {
        name: "escape_ampersand",
        apply: escape_ampersand,
    },
];

/// Title to print for `record`.
///
/// An explicit override is returned verbatim. Otherwise published records
/// use the first (journal) title and unpublished ones prefer the arXiv
/// variant, and the result is run through [`TITLE_RULES`].
pub fn get_title(record: &Record, config: &PubsConfig) -> String {
    if let Some(title) = config.title_override(record.texkey()) {
        return title.to_string();
    }

    let Some(first) = record.titles.first() else {
        return String::new();
    };

    let raw = if record.has_journal() {
        first.title.as_str()
    } else {
        record.arxiv_title().unwrap_or(&first.title)
    };

    clean_title(raw)
}

/// Apply every rule in [`TITLE_RULES`] in order.
pub fn clean_title(title: &str) -> String {
    TITLE_RULES
        .iter()
        .fold(title.to_string(), |text, rule| (rule.apply)(&text))
}

fn strip_outer_braces(title: &str) -> String {
    title
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .unwrap_or(title)
        .to_string()
}

static MATH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<math[^>]*>(.*?)</math>").unwrap());
static MSUB_MROW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<msub>\s*<mi>([^<]*)</mi>\s*<mrow>\s*<mi>([^<]*)</mi>\s*</mrow>\s*</msub>")
        .unwrap()
});
static MSUB_MN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<msub>\s*<mi>([^<]*)</mi>\s*<mn>([^<]*)</mn>\s*</msub>").unwrap()
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]+$").unwrap());

/// Convert the simple MathML fragments INSPIRE embeds in titles.
///
/// `<msub><mi>f</mi><mrow><mi>NL</mi></mrow></msub>` becomes `$f_{\rm NL}$`;
/// a numeric subscript stays plain. A fragment that reduces to a single
/// word longer than two letters is italicised instead of set in math mode.
fn mathml_to_latex(title: &str) -> String {
    MATH_RE
        .replace_all(title, |caps: &Captures| {
            let inner = MSUB_MROW_RE.replace_all(&caps[1], |c: &Captures| {
                format!(r"{}_{{\rm {}}}", &c[1], &c[2])
            });
            let inner = MSUB_MN_RE.replace_all(&inner, |c: &Captures| {
                format!("{}_{{{}}}", &c[1], &c[2])
            });
            let inner = TAG_RE.replace_all(&inner, "");
            let inner = inner.trim();

            if WORD_RE.is_match(inner) && inner.len() > 2 {
                format!(r"\textit{{{}}}", inner)
            } else {
                format!("${}$", inner)
            }
        })
        .into_owned()
}

fn greek_letters(title: &str) -> String {
    title
        .replace('\u{39b}', r"\Lambda")
        .replace('\u{3b1}', r"$\alpha$")
        .replace('\u{3b2}', r"$\beta$")
        .replace('\u{3b3}', r"$\gamma$")
}

fn typographic_punctuation(title: &str) -> String {
    title
        .replace('\u{2013}', "--")
        .replace('\u{2014}', "---")
        .replace('\u{2019}', "'")
        .replace('\u{2018}', "`")
        .replace('\u{201c}', "``")
        .replace('\u{201d}', "''")
}

fn escape_percent(title: &str) -> String {
    escape_unescaped(title, '%')
}

fn lambda_cdm(title: &str) -> String {
    title.replace(r"\LambdaCDM", r"$\Lambda$CDM")
}

fn collapse_braced_ampersand(title: &str) -> String {
    title.replace(r"{\&}", r"\&")
}

fn escape_ampersand(title: &str) -> String {
    escape_unescaped(title, '&')
}

/// Prefix every `target` not already preceded by a backslash.
fn escape_unescaped(text: &str, target: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev = None;
    for c in text.chars() {
        if c == target && prev != Some('\\') {
            out.push('\\');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}
