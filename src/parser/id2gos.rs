//! Reader for simple `id<TAB>GO;GO;...` association files
//!
//! Each line holds one identifier and a `;` separated list of GO ids.
//! An identifier may appear on several lines, its GO ids are combined.
//! Invalid GO ids are skipped with a warning. A line is ignored only if
//! it yields no GO id at all.
//! Lines starting with `#` are header lines.

use std::collections::HashSet;
use std::io::BufRead;

use tracing::warn;

use crate::annotations::{Annotation, DatabaseId};
use crate::parser::{
    read_lines, required, AnnotationSource, Annotations, DataLine, Outcome, ParseReport,
    ReaderOptions, Rejection,
};
use crate::{GoResult, GoTermId};

/// Parses id2gos files into [`Annotation`]s without evidence codes
///
/// # Examples
///
/// ```
/// use goassoc::parser::id2gos::IdToGosReader;
/// use goassoc::AnnotationSource;
///
/// let data = "geneA\tGO:0000001;GO:0000002\ngeneB\tGO:0000002\ngeneA\tGO:0000003\n";
/// let annotations = IdToGosReader::default().parse(&mut data.as_bytes(), "memory").unwrap();
///
/// assert_eq!(annotations.len(), 4);
/// assert!(annotations.iter().all(|record| record.evidence_code.is_none()));
/// ```
#[derive(Clone, Debug, Default)]
pub struct IdToGosReader {
    options: ReaderOptions,
}

impl IdToGosReader {
    /// Constructs a reader with the given options
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    fn parse_line(&self, line: &DataLine<'_>, report: &mut ParseReport) -> GoResult<Outcome> {
        let columns = line.columns(2)?;
        let id = match required(columns[0], "ID") {
            Ok(id) => id,
            Err(rejection) => return Ok(Outcome::Rejected(rejection)),
        };

        let mut seen = HashSet::new();
        let mut records = Vec::new();
        let mut illegal = Vec::new();
        for token in columns[1].split(';').map(str::trim).filter(|t| !t.is_empty()) {
            match GoTermId::try_from(token) {
                Ok(go_id) => {
                    if seen.insert(go_id) {
                        records.push(Annotation::new(DatabaseId::from(id), go_id));
                    }
                }
                Err(_) => illegal.push(token),
            }
        }

        if records.is_empty() {
            return Ok(Outcome::Rejected(if illegal.is_empty() {
                Rejection::new("missing GO_ID", format!("no GO ids for {id}"))
            } else {
                Rejection::new(
                    "illegal GO_ID",
                    format!("no valid GO ids for {id}: '{}'", illegal.join("', '")),
                )
            }));
        }
        // the line is kept, the bad ids are only counted
        for token in illegal {
            if report.warn("illegal GO_ID".to_string()) {
                warn!("{}:{}: '{token}' is not a GO id", report.source(), line.line_no);
            }
        }
        Ok(Outcome::AcceptedMany(records))
    }
}

impl AnnotationSource for IdToGosReader {
    fn options(&self) -> &ReaderOptions {
        &self.options
    }

    fn read_records(&self, reader: &mut dyn BufRead, source_name: &str) -> GoResult<Annotations> {
        read_lines(reader, source_name, '#', |_, line, report| {
            self.parse_line(line, report)
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::GoError;

    fn parse(data: &str) -> GoResult<Annotations> {
        IdToGosReader::default().read_records(&mut data.as_bytes(), "test")
    }

    #[test]
    fn header_and_duplicates() {
        let data = "# id2gos\ngeneA\tGO:0000001;GO:0000001; GO:0000002 ;\n";
        let annotations = parse(data).unwrap();
        assert_eq!(annotations.header().lines().len(), 1);
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations.report().accepted(), 2);
        assert!(annotations.report().is_clean());
    }

    #[test]
    fn invalid_ids_are_skipped() {
        let data = "geneA\tGO:0000001;GO:1;foo\n\tGO:0000001\ngeneB\tGO:1;foo\n";
        let annotations = parse(data).unwrap();
        assert_eq!(annotations.len(), 1);
        let report = annotations.report();
        assert_eq!(report.lines_read(), 3);
        assert_eq!(report.accepted_lines(), 1);
        assert_eq!(report.ignored_count(), 2);
        assert_eq!(report.warnings()["illegal GO_ID"], 2);
        let ignored = report.ignored();
        assert_eq!(ignored["missing ID"][0].line_no, 2);
        assert_eq!(ignored["illegal GO_ID"].len(), 1);
        assert_eq!(ignored["illegal GO_ID"][0].line_no, 3);
    }

    #[test]
    fn lines_without_go_ids_are_ignored() {
        let data = "geneA\tGO:0000001\ngeneB\t\ngeneC\t;\n";
        let annotations = parse(data).unwrap();
        let report = annotations.report();
        assert_eq!(annotations.len(), 1);
        assert_eq!(report.ignored()["missing GO_ID"].len(), 2);
        assert_eq!(
            report.lines_read(),
            report.accepted_lines() + report.ignored_count() + report.filtered()
        );
    }

    #[test]
    fn requires_two_columns() {
        assert!(matches!(
            parse("geneA GO:0000001\n"),
            Err(GoError::ColumnCount { expected: 2, found: 1, .. })
        ));
    }
}
