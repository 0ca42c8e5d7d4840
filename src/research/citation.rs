use crate::types::FindingRecord;

/// Format one BibTeX `@misc` entry.
///
/// `position` is the 1-based encounter position and becomes the key (`ref{position}`).
/// Braces are stripped from field values so the entry always stays balanced.
pub fn bibtex_entry(position: usize, title: &str, url: &str) -> String {
    format!(
        "@misc{{ref{},\n    title = {{{}}},\n    howpublished = {{{}}}\n}}\n",
        position,
        clean_field(title),
        clean_field(url)
    )
}

/// One entry per finding, in encounter order.
pub fn references(findings: &[FindingRecord]) -> Vec<String> {
    findings
        .iter()
        .enumerate()
        .map(|(i, f)| bibtex_entry(i + 1, &f.title, &f.url))
        .collect()
}

fn clean_field(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '{' && *c != '}')
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}
