//! Reader for Gene Product Association Data (GPAD) 1.1 files
//!
//! GPAD references the evidence as ECO term. The GO evidence code of a
//! record is taken from the `go_evidence` annotation property if present,
//! otherwise it is derived from the ECO term. GPAD has no aspect column,
//! so the records carry no namespace.

use std::io::BufRead;

use tracing::{debug, warn};

use crate::annotations::{Annotation, DatabaseId, Extensions, FormatDetails, GpadDetails};
use crate::evidence::{self, EvidenceCode};
use crate::parser::{
    date, go_id, list, qualifiers, read_lines, required, taxa, AnnotationSource, Annotations,
    DataLine, LineResult, MultiField, Outcome, ParseReport, ReaderOptions,
};
use crate::GoResult;

const COLUMNS: usize = 12;
const DEFAULT_VERSION: &str = "1.1";
const SUPPORTED_VERSIONS: [&str; 2] = [DEFAULT_VERSION, "1"];

const QUALIFIER: MultiField = MultiField::new("Qualifier", 1, Some(2));
const DB_REFERENCE: MultiField = MultiField::new("DB_Reference", 1, None);
const INTERACTING_TAXON: MultiField = MultiField::new("Interacting_Taxon_ID", 0, Some(1)).strict();

/// Parses GPAD 1.1 files into [`Annotation`]s
///
/// # Examples
///
/// ```
/// use goassoc::parser::gpad::GpadReader;
/// use goassoc::{AnnotationSource, EvidenceCode};
///
/// let data = "!gpa-version: 1.1\n\
///     UniProtKB\tP12345\tenables\tGO:0003993\tPMID:2676709\tECO:0000315\t\t\t20090118\tSGD\t\t\n";
///
/// let annotations = GpadReader::default().parse(&mut data.as_bytes(), "memory").unwrap();
/// let record = &annotations.records()[0];
/// assert_eq!(record.evidence_code, Some(EvidenceCode::new("IMP")));
/// assert!(record.namespace.is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct GpadReader {
    options: ReaderOptions,
}

impl GpadReader {
    /// Constructs a reader with the given options
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    fn parse_line(&self, line: &DataLine<'_>, report: &mut ParseReport) -> GoResult<Outcome> {
        let columns = line.columns(COLUMNS)?;
        Ok(self.annotation(&columns, report).into())
    }

    fn annotation(&self, columns: &[&str], report: &mut ParseReport) -> LineResult<Annotation> {
        let db = required(columns[0], "DB")?;
        let db_object_id = required(columns[1], "DB_Object_ID")?;
        let qualifier_tokens = QUALIFIER.split(columns[2], '|', &self.options, report)?;
        let go_id = go_id(columns[3])?;
        let db_reference = DB_REFERENCE.split(columns[4], '|', &self.options, report)?;
        let eco_id = required(columns[5], "Evidence_Code")?;
        let taxon_tokens = INTERACTING_TAXON.split(columns[7], '|', &self.options, report)?;
        let taxon = taxa(&taxon_tokens, report);
        let date = date(required(columns[8], "Date")?, report);
        let assigned_by = required(columns[9], "Assigned_By")?;

        let (extensions, dropped) = Extensions::parse(columns[10]);
        if dropped > 0 {
            report.warn("malformed Extension".to_string());
        }
        let properties = properties(columns[11], report);
        let evidence_code = go_evidence(eco_id, &properties, report);

        let details = GpadDetails {
            db: db.to_string(),
            db_reference: db_reference.iter().map(|s| s.to_string()).collect(),
            eco_id: eco_id.to_string(),
            with_from: list(columns[6], '|'),
            assigned_by: assigned_by.to_string(),
            extensions,
            properties,
        };

        let mut annotation = Annotation::new(DatabaseId::from(db_object_id), go_id)
            .with_qualifiers(qualifiers(&qualifier_tokens, report))
            .with_evidence(evidence_code);
        annotation.taxon = taxon;
        annotation.date = date;
        annotation.details = Some(FormatDetails::Gpad(details));
        Ok(annotation)
    }
}

/// Parses the `key=value|key=value` annotation properties
fn properties(raw: &str, report: &mut ParseReport) -> Vec<(String, String)> {
    let mut res = Vec::new();
    for token in raw.split('|').map(str::trim).filter(|t| !t.is_empty()) {
        match token.split_once('=') {
            Some((key, value)) => res.push((key.trim().to_string(), value.trim().to_string())),
            None => report.unexpected("Annotation_Properties", token),
        }
    }
    res
}

fn go_evidence(
    eco_id: &str,
    properties: &[(String, String)],
    report: &mut ParseReport,
) -> EvidenceCode {
    let from_property = properties
        .iter()
        .find(|(key, _)| key == "go_evidence")
        .map(|(_, value)| EvidenceCode::new(value));
    if let Some(code) = from_property {
        if !code.is_known() {
            report.unexpected("Evidence", code.as_str());
        }
        return code;
    }
    match evidence::eco_to_go(eco_id) {
        Some(code) => code,
        None => {
            report.unexpected("ECO", eco_id);
            EvidenceCode::new(eco_id)
        }
    }
}

impl AnnotationSource for GpadReader {
    fn options(&self) -> &ReaderOptions {
        &self.options
    }

    fn read_records(&self, reader: &mut dyn BufRead, source_name: &str) -> GoResult<Annotations> {
        let mut version_checked = false;
        read_lines(reader, source_name, '!', |header, line, report| {
            if !version_checked {
                version_checked = true;
                let version = detect_version(header.value("gpa-version"), report).to_string();
                debug!("{source_name}: parsing as GPAD {version}");
                header.set_version(&version);
            }
            self.parse_line(line, report)
        })
    }
}

/// Returns the version to parse as
///
/// Unknown or missing versions fall back to the 1.1 layout. A file
/// with a different layout then fails on the column count.
fn detect_version<'h>(value: Option<&'h str>, report: &mut ParseReport) -> &'h str {
    match value {
        Some(value) if SUPPORTED_VERSIONS.contains(&value) => value,
        Some(value) => {
            report.warn("unsupported gpa-version".to_string());
            warn!(
                "{}: unsupported gpa-version '{value}', parsing as GPAD {DEFAULT_VERSION}",
                report.source()
            );
            DEFAULT_VERSION
        }
        None => {
            report.warn("missing gpa-version".to_string());
            warn!(
                "{}: no gpa-version header, parsing as GPAD {DEFAULT_VERSION}",
                report.source()
            );
            DEFAULT_VERSION
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::GoError;

    fn parse(data: &str) -> GoResult<Annotations> {
        GpadReader::default().read_records(&mut data.as_bytes(), "test")
    }

    #[test]
    fn evidence_from_property() {
        let data = "!gpa-version: 1.1\n\
            UniProtKB\tP1\tNOT|enables\tGO:0003674\tGO_REF:0000015\tECO:0000307\t\ttaxon:10090\t20200101\tMGI\tpart_of(CL:0000084)\tgo_evidence=ND|contributor-id=x\n";
        let annotations = parse(data).unwrap();
        assert_eq!(annotations.len(), 1);
        let record = &annotations.records()[0];
        assert!(record.evidence_code.as_ref().unwrap().is_nd());
        assert!(record.qualifiers.is_not());
        assert_eq!(record.taxon.as_slice(), &[10090]);
        let Some(FormatDetails::Gpad(details)) = &record.details else {
            panic!("GPAD details expected");
        };
        assert_eq!(details.eco_id, "ECO:0000307");
        assert_eq!(details.properties.len(), 2);
        assert_eq!(details.properties[1], ("contributor-id".to_string(), "x".to_string()));
        assert!(details.extensions.is_some());
    }

    #[test]
    fn evidence_from_eco() {
        let data = "UniProtKB\tP1\tenables\tGO:0003674\tPMID:1\tECO:0000314\t\t\t20200101\tMGI\t\t\n\
            UniProtKB\tP2\tenables\tGO:0003674\tPMID:1\tECO:9999999\t\t\t20200101\tMGI\t\t\n";
        let annotations = parse(data).unwrap();
        assert_eq!(annotations.len(), 2);
        assert_eq!(
            annotations.records()[0].evidence_code,
            Some(EvidenceCode::new("IDA"))
        );
        let unmapped = annotations.records()[1].evidence_code.as_ref().unwrap();
        assert_eq!(unmapped.as_str(), "ECO:9999999");
        assert!(!unmapped.is_known());
        assert_eq!(annotations.report().warnings()["unexpected ECO"], 1);
        assert!(annotations.records()[1].taxon.is_empty());
    }

    #[test]
    fn qualifier_is_required() {
        let data = "UniProtKB\tP1\t\tGO:0003674\tPMID:1\tECO:0000314\t\t\t20200101\tMGI\t\t\n";
        let annotations = parse(data).unwrap();
        assert!(annotations.is_empty());
        assert!(annotations
            .report()
            .ignored()
            .contains_key("min cardinality Qualifier"));
    }

    #[test]
    fn unsupported_version_uses_default_layout() {
        let data = "!gpa-version: 1.2\n\
            UniProtKB\tP1\tenables\tGO:0003674\tPMID:1\tECO:0000314\t\t\t20200101\tMGI\t\t\n";
        let annotations = parse(data).unwrap();
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations.header().version(), Some("1.1"));
        assert_eq!(annotations.report().warnings()["unsupported gpa-version"], 1);
    }

    #[test]
    fn missing_version_is_warned() {
        let data = "UniProtKB\tP1\tenables\tGO:0003674\tPMID:1\tECO:0000314\t\t\t20200101\tMGI\t\t\n";
        let annotations = parse(data).unwrap();
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations.header().version(), Some("1.1"));
        assert_eq!(annotations.report().warnings()["missing gpa-version"], 1);

        let data = format!("!gpa-version: 1\n{data}");
        let annotations = parse(&data).unwrap();
        assert_eq!(annotations.header().version(), Some("1"));
        assert!(annotations.report().is_clean());
    }

    #[test]
    fn wrong_column_count() {
        let data = "UniProtKB\tP1\tenables\tGO:0003674\n";
        assert!(matches!(
            parse(data),
            Err(GoError::ColumnCount { expected: 12, found: 4, .. })
        ));
    }
}
