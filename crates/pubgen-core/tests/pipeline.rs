//! End-to-end rendering of `pubs.tex` from INSPIRE-shaped JSON records.

use pubgen_core::config_file::{ConfigFormat, parse_config};
use pubgen_core::{Record, generate_pubstex};
use serde_json::json;

fn records(value: serde_json::Value) -> Vec<Record> {
    serde_json::from_value(value).unwrap()
}

const CONFIG: &str = r#"
author_query: Oliver.H.E.Philcox.1
exclude: ["Philcox:2018bad"]
contributing_author: ["DESI:2024big", "Both:2020x"]
journal_map:
  Mon.Not.Roy.Astron.Soc.: MNRAS
  Phys.Rev.D: Phys. Rev. D
overrides:
  Philcox:2024sub:
    status: submitted
    journal: Phys. Rev. Lett.
extra_major_author:
  - "    \\item Philcox, O.\\,H.\\,E., ``A talk'', Conference (2021).   "
other_works: |
  \item Philcox, O.\,H.\,E., ``PhD thesis'', Princeton (2023).
"#;

fn fixture() -> Vec<Record> {
    let mut big_collab: Vec<serde_json::Value> = (0..12)
        .map(|i| json!({ "full_name": format!("Member{i:02}, Some") }))
        .collect();
    big_collab[9] = json!({ "full_name": "Philcox, Oliver H.E." });

    records(json!([
        {
            "texkeys": ["Philcox:2022letters"],
            "authors": [
                { "full_name": "Zhao, Shi-Fan" },
                { "full_name": "Philcox, Oliver H.E." }
            ],
            "titles": [{ "title": "A letter on <math><msub><mi>f</mi><mrow><mi>NL</mi></mrow></msub></math>" }],
            "arxiv_eprints": [{ "value": "2201.00001" }],
            "dois": [{ "value": "10.1093/mnrasl/slab001" }],
            "publication_info": [{
                "journal_title": "Mon.Not.Roy.Astron.Soc.",
                "journal_volume": "510",
                "page_start": "L42",
                "page_end": "L45",
                "year": 2022
            }]
        },
        {
            "texkeys": ["Philcox:2018bad"],
            "authors": [{ "full_name": "Philcox, Oliver H.E." }],
            "titles": [{ "title": "Withdrawn" }]
        },
        {
            "texkeys": ["DESI:2024big"],
            "authors": big_collab,
            "titles": [{ "title": "Collaboration results" }],
            "arxiv_eprints": [{ "value": "2404.03000" }]
        },
        {
            "texkeys": ["Philcox:2024sub"],
            "authors": [{ "full_name": "Philcox, Oliver H.E." }],
            "titles": [
                { "title": "Journal version", "source": "APS" },
                { "title": "Preprint version", "source": "arXiv" }
            ],
            "arxiv_eprints": [{ "value": "2405.00002" }]
        }
    ]))
}

#[test]
fn full_document() {
    let config = parse_config(CONFIG, ConfigFormat::Yaml).unwrap();
    let doc = generate_pubstex(&fixture(), &config);

    let expected = [
        r"\textit{\textbf{Major Author}}",
        r"\begin{enumerate}",
        r"    \item Zhao, S.-F., \textbf{Philcox, O.\,H.\,E.}, ``A letter on $f_{\rm NL}$'', \href{https://doi.org/10.1093/mnrasl/slab001}{\textit{MNRAS}} \textbf{510}, L42-L45 (2022) (\href{https://arxiv.org/abs/2201.00001}{arXiv}).",
        r"    \item \textbf{Philcox, O.\,H.\,E.}, ``Preprint version'', \textit{submitted to Phys. Rev. Lett.} (\href{https://arxiv.org/abs/2405.00002}{arXiv}).",
        r"    \item Philcox, O.\,H.\,E., ``A talk'', Conference (2021).",
        r"\end{enumerate}",
        "",
        r"\vskip 4 pt ",
        "",
        r"\textit{\textbf{Contributing Author}}",
        "",
        r"\begin{enumerate}[resume]",
        r"    \item Member00, S., \textit{et al.} (inc.\,\,\textbf{Philcox, O.\,H.\,E.}), ``Collaboration results'', (\href{https://arxiv.org/abs/2404.03000}{arXiv}).",
        r"\end{enumerate}",
        "",
        r"\vskip 4 pt ",
        "",
        r"\textit{\textbf{Other Works}}",
        r"\begin{enumerate}[resume]",
        r"\item Philcox, O.\,H.\,E., ``PhD thesis'', Princeton (2023).",
        r"\end{enumerate}",
    ]
    .join("\n");

    assert_eq!(doc, expected);
}

#[test]
fn letter_pages_are_literal() {
    let config = parse_config(CONFIG, ConfigFormat::Yaml).unwrap();
    let doc = generate_pubstex(&fixture(), &config);
    assert!(doc.contains(", L42-L45 (2022)"));
    assert!(!doc.contains("$L42"));
}

#[test]
fn excluded_records_never_appear() {
    let config = parse_config(CONFIG, ConfigFormat::Yaml).unwrap();
    let doc = generate_pubstex(&fixture(), &config);
    assert!(!doc.contains("Withdrawn"));
}

#[test]
fn output_is_deterministic() {
    let config = parse_config(CONFIG, ConfigFormat::Yaml).unwrap();
    let first = generate_pubstex(&fixture(), &config);
    let second = generate_pubstex(&fixture(), &config);
    assert_eq!(first, second);
}

#[test]
fn toml_config_gives_same_document() {
    let toml_config = r#"
author_query = "Oliver.H.E.Philcox.1"
exclude = ["Philcox:2018bad"]
contributing_author = ["DESI:2024big", "Both:2020x"]
extra_major_author = ['''    \item Philcox, O.\,H.\,E., ``A talk'', Conference (2021).   ''']
other_works = '''
\item Philcox, O.\,H.\,E., ``PhD thesis'', Princeton (2023).
'''

[journal_map]
"Mon.Not.Roy.Astron.Soc." = "MNRAS"
"Phys.Rev.D" = "Phys. Rev. D"

[overrides."Philcox:2024sub"]
status = "submitted"
journal = "Phys. Rev. Lett."
"#;
    let yaml = parse_config(CONFIG, ConfigFormat::Yaml).unwrap();
    let toml = parse_config(toml_config, ConfigFormat::Toml).unwrap();
    assert_eq!(
        generate_pubstex(&fixture(), &yaml),
        generate_pubstex(&fixture(), &toml)
    );
}
