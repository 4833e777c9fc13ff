//! Line-driven section parser.
//!
//! The parser is a two-state machine. A label line closes the open section
//! (if any) and opens a new, empty one; every other line is appended to the
//! open section, or dropped when nothing is open yet. A label that appears
//! twice restarts its section, so the last occurrence wins.

use tracing::warn;

use crate::config::MetricSpec;
use crate::error::{DefinitionError, Result};
use crate::section::Section;

#[derive(Debug)]
enum State {
    NoSectionOpen,
    Accumulating { section: Section, text: String },
}

#[derive(Debug)]
struct SectionParser<'a> {
    metric: &'a str,
    state: State,
    sections: [Option<String>; 3],
    line_no: usize,
}

impl<'a> SectionParser<'a> {
    fn new(metric: &'a str) -> Self {
        Self {
            metric,
            state: State::NoSectionOpen,
            sections: [None, None, None],
            line_no: 0,
        }
    }

    fn feed(&mut self, line: &str) {
        self.line_no += 1;

        if let Some(section) = Section::from_label(line) {
            self.close();
            if self.sections[section.index()].is_some() {
                warn!(
                    metric = self.metric,
                    line = self.line_no,
                    "section {section} repeated; earlier text is discarded"
                );
            }
            self.state = State::Accumulating {
                section,
                text: String::new(),
            };
            return;
        }

        if let Some(near) = Section::near_label(line) {
            warn!(
                metric = self.metric,
                line = self.line_no,
                "line {line:?} looks like the {near} label but does not match exactly; \
                 treating it as code"
            );
        }

        match &mut self.state {
            State::NoSectionOpen => {
                if !line.trim().is_empty() {
                    warn!(
                        metric = self.metric,
                        line = self.line_no,
                        "discarding text before the first section label"
                    );
                }
            }
            State::Accumulating { text, .. } => {
                text.push_str(line);
                text.push('\n');
            }
        }
    }

    fn close(&mut self) {
        if let State::Accumulating { section, text } =
            std::mem::replace(&mut self.state, State::NoSectionOpen)
        {
            self.sections[section.index()] = Some(text);
        }
    }

    fn finish(mut self) -> Result<MetricSpec> {
        self.close();

        let missing: Vec<Section> = Section::ALL
            .into_iter()
            .filter(|s| self.sections[s.index()].is_none())
            .collect();
        if !missing.is_empty() {
            return Err(DefinitionError::MalformedSpecification {
                metric: self.metric.to_string(),
                missing,
            });
        }

        let [setup, body, remainder] = self.sections.map(Option::unwrap_or_default);
        MetricSpec::new(self.metric, setup, body, remainder)
    }
}

/// Parse the text of one definition file into a complete specification.
///
/// Fails with [`DefinitionError::MalformedSpecification`] when any of the
/// three sections never appears, and with
/// [`DefinitionError::InvalidMetricName`] when `metric` is not a C identifier.
pub fn parse_definition(metric: &str, text: &str) -> Result<MetricSpec> {
    let mut parser = SectionParser::new(metric);
    for line in text.lines() {
        parser.feed(line);
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_sections_in_order() {
        let spec = parse_definition(
            "foo",
            "SETUP\nx += 1;\nBODY\ny += x;\nREMAINDER\nreturn y;\n",
        )
        .unwrap();
        assert_eq!(spec.name(), "foo");
        assert_eq!(spec.setup(), "x += 1;\n");
        assert_eq!(spec.body(), "y += x;\n");
        assert_eq!(spec.remainder(), "return y;\n");
    }

    #[test]
    fn sections_out_of_order() {
        let spec = parse_definition(
            "foo",
            "REMAINDER\nreturn y;\nSETUP\nx += 1;\nBODY\ny += x;",
        )
        .unwrap();
        assert_eq!(spec.setup(), "x += 1;\n");
        assert_eq!(spec.body(), "y += x;\n");
        assert_eq!(spec.remainder(), "return y;\n");
    }

    #[test]
    fn internal_blank_lines_preserved() {
        let spec = parse_definition(
            "foo",
            "SETUP\n\na;\n\n  b;  \nBODY\nREMAINDER\n\n",
        )
        .unwrap();
        assert_eq!(spec.setup(), "\na;\n\n  b;  \n");
        assert_eq!(spec.body(), "");
        assert_eq!(spec.remainder(), "\n");
    }

    #[test]
    fn crlf_terminators_stripped() {
        let spec = parse_definition("foo", "SETUP\r\na;\r\nBODY\r\nb;\r\nREMAINDER\r\nc;\r\n")
            .unwrap();
        assert_eq!(spec.setup(), "a;\n");
        assert_eq!(spec.remainder(), "c;\n");
    }

    #[test]
    fn repeated_label_last_wins() {
        let spec = parse_definition(
            "foo",
            "SETUP\nfirst;\nBODY\nb;\nSETUP\nsecond;\nREMAINDER\nr;\n",
        )
        .unwrap();
        assert_eq!(spec.setup(), "second;\n");
    }

    #[test]
    fn preamble_discarded() {
        let spec = parse_definition(
            "foo",
            "// comment before any label\nSETUP\na;\nBODY\nb;\nREMAINDER\nc;\n",
        )
        .unwrap();
        assert_eq!(spec.setup(), "a;\n");
        assert!(!spec.body().contains("comment"));
    }

    #[test]
    fn near_label_is_code() {
        let spec = parse_definition("foo", "SETUP\nBODY \nBODY\nb;\nREMAINDER\nc;\n").unwrap();
        assert_eq!(spec.setup(), "BODY \n");
    }

    #[test]
    fn missing_section_is_malformed() {
        let err = parse_definition("foo", "SETUP\na;\nREMAINDER\nc;\n").unwrap_err();
        match err {
            DefinitionError::MalformedSpecification { metric, missing } => {
                assert_eq!(metric, "foo");
                assert_eq!(missing, vec![Section::Body]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn no_labels_is_malformed() {
        let err = parse_definition("foo", "a;\nb;\n").unwrap_err();
        match err {
            DefinitionError::MalformedSpecification { missing, .. } => {
                assert_eq!(missing, Section::ALL.to_vec());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_file_is_malformed() {
        assert!(matches!(
            parse_definition("foo", ""),
            Err(DefinitionError::MalformedSpecification { .. })
        ));
    }

    #[test]
    fn invalid_name_rejected_after_parse() {
        let err = parse_definition("foo-bar", "SETUP\nBODY\nREMAINDER\n").unwrap_err();
        assert!(matches!(err, DefinitionError::InvalidMetricName { .. }));
    }

    #[test]
    fn malformed_message_names_sections() {
        let err = parse_definition("foo", "BODY\nb;\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed definition for metric 'foo': missing section(s) SETUP, REMAINDER"
        );
    }
}
