//! Turning retrieved passages into the information block of a prompt.
//!
//! Retrieval renders each hit in an annotated form (score and provenance lines
//! followed by the chunk text). [`clean`] strips those annotations together with
//! page footers left over from extraction, leaving only the text the model should see.

use std::sync::LazyLock;

use docent_memory::document::Chunk;
use regex::Regex;

/// `<number> | Page` footers, including letter-spaced renderings like `12 |  P a g e`.
static PAGE_FOOTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+[ \t]*\|[ \t]*P[ \t]*a[ \t]*g[ \t]*e").unwrap());

const MARKER_DISTANCE: &str = "distance:";
const MARKER_FILE_NAME: &str = "file_name:";
const MARKER_PAGE_NUMBER: &str = "page_number:";

const METADATA_MARKERS: [&str; 3] = [MARKER_DISTANCE, MARKER_FILE_NAME, MARKER_PAGE_NUMBER];

/// Render a retrieved chunk with its annotation lines.
#[must_use]
pub fn format_passage(chunk: &Chunk, score: f32) -> String {
    format!(
        "{MARKER_DISTANCE} {distance}\n{MARKER_FILE_NAME} {file}\n{MARKER_PAGE_NUMBER} {page}\n{text}",
        distance = 1.0 - score,
        file = chunk.source_file().unwrap_or_default(),
        page = chunk.page_number().unwrap_or_default(),
        text = chunk.text,
    )
}

/// Strip footers, indentation, blank lines and metadata annotations from a passage.
///
/// Applying `clean` to its own output returns it unchanged.
#[must_use]
pub fn clean(raw: &str) -> String {
    raw.split('\n')
        .filter_map(clean_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn clean_line(line: &str) -> Option<String> {
    let mut line = line.to_owned();
    while PAGE_FOOTER.is_match(&line) {
        line = PAGE_FOOTER.replace_all(&line, "").into_owned();
    }
    let line = line.trim_end_matches('\r').trim_start();
    if line.is_empty() || METADATA_MARKERS.iter().any(|m| line.starts_with(m)) {
        return None;
    }
    Some(line.to_owned())
}

/// Clean each passage and join them in the given order.
///
/// Passages that clean down to nothing are skipped.
#[must_use]
pub fn join_passages<'a, I>(passages: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    passages
        .into_iter()
        .map(clean)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use docent_memory::document::page_metadata;
    use proptest::prelude::*;

    use super::*;

    fn chunk(text: &str) -> Chunk {
        Chunk {
            id: "id".into(),
            text: text.into(),
            metadata: page_metadata("policy.pdf", 4),
        }
    }

    #[test]
    fn removes_footers() {
        assert_eq!(clean("Coverage details 12 | Page"), "Coverage details ");
        assert_eq!(clean("7 |  P a g e\nNext line"), "Next line");
    }

    #[test]
    fn removes_footers_exposed_by_earlier_removal() {
        assert_eq!(clean("1 | 2 | PagePage tail"), "tail");
    }

    #[test]
    fn trims_leading_whitespace_and_drops_blank_lines() {
        assert_eq!(clean("   first\n\n\t second\n   \n"), "first\nsecond");
    }

    #[test]
    fn drops_metadata_lines() {
        let raw = "distance: 0.12\nfile_name: policy.pdf\npage_number: 4\nBody text.";
        assert_eq!(clean(raw), "Body text.");
    }

    #[test]
    fn marker_must_start_the_line() {
        assert_eq!(clean("the distance: is long"), "the distance: is long");
    }

    #[test]
    fn handles_crlf() {
        assert_eq!(clean("one\r\n  two\r\n"), "one\ntwo");
    }

    #[test]
    fn formatted_passage_cleans_to_chunk_text() {
        let c = chunk("The warranty period is 12 months.");
        let formatted = format_passage(&c, 0.8);
        assert!(formatted.starts_with("distance: "));
        assert!(formatted.contains("file_name: policy.pdf"));
        assert!(formatted.contains("page_number: 4"));
        assert_eq!(clean(&formatted), c.text);
    }

    #[test]
    fn join_preserves_order_and_skips_empty() {
        let joined = join_passages(["distance: 0.1\nfirst", "page_number: 2", "second"]);
        assert_eq!(joined, "first\nsecond");
    }

    #[test]
    fn join_of_nothing_is_empty() {
        assert_eq!(join_passages(std::iter::empty::<&str>()), "");
    }

    proptest! {
        #[test]
        fn clean_is_idempotent(raw in "[ \t\r\na-zP|:0-9.]{0,200}") {
            let once = clean(&raw);
            prop_assert_eq!(clean(&once), once);
        }

        #[test]
        fn clean_output_has_no_markers(raw in "(distance: [0-9.]+\n|file_name: [a-z]+\n|[ a-z]{0,20}\n){0,10}") {
            for line in clean(&raw).lines() {
                prop_assert!(!METADATA_MARKERS.iter().any(|m| line.starts_with(m)));
                prop_assert!(!line.starts_with(char::is_whitespace));
            }
        }
    }
}
