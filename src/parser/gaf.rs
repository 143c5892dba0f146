//! Reader for GO Annotation Files (GAF)
//!
//! GAF files are tab separated. Header lines start with `!`, the
//! `!gaf-version:` line decides the column layout:
//!
//! | Version | Columns |
//! |---------|---------|
//! | 1.0     | 15      |
//! | 2.0     | 17      |
//! | 2.1     | 17      |
//! | 2.2     | 17      |
//!
//! Files without version line are parsed as 2.2.

use std::fmt::Display;
use std::io::BufRead;

use tracing::{debug, warn};

use crate::annotations::{Annotation, DatabaseId, Extensions, FormatDetails, GafDetails};
use crate::parser::{
    date, evidence, go_id, list, optional, qualifiers, read_lines, required, taxa,
    AnnotationSource, Annotations, DataLine, LineResult, MultiField, Outcome, ParseReport,
    ReaderOptions, Rejection,
};
use crate::term::Namespace;
use crate::GoResult;

const DB_REFERENCE: MultiField = MultiField::new("DB_Reference", 1, None);
const TAXON: MultiField = MultiField::new("Taxon", 1, Some(2)).strict();

/// The supported GAF versions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GafVersion {
    /// GAF 1.0
    V1_0,
    /// GAF 2.0
    V2_0,
    /// GAF 2.1
    V2_1,
    /// GAF 2.2, qualifiers are mandatory relations
    #[default]
    V2_2,
}

impl GafVersion {
    /// Parses the value of the `gaf-version` header line
    pub fn from_header(value: &str) -> Option<Self> {
        match value.trim() {
            "1" | "1.0" => Some(GafVersion::V1_0),
            "2" | "2.0" => Some(GafVersion::V2_0),
            "2.1" => Some(GafVersion::V2_1),
            "2.2" => Some(GafVersion::V2_2),
            _ => None,
        }
    }

    /// Number of tab separated columns of a data line
    pub fn columns(&self) -> usize {
        match self {
            GafVersion::V1_0 => 15,
            _ => 17,
        }
    }

    fn qualifier_field(&self) -> MultiField {
        match self {
            GafVersion::V2_2 => MultiField::new("Qualifier", 1, Some(2)),
            _ => MultiField::new("Qualifier", 0, Some(3)),
        }
    }
}

impl Display for GafVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let version = match self {
            GafVersion::V1_0 => "1.0",
            GafVersion::V2_0 => "2.0",
            GafVersion::V2_1 => "2.1",
            GafVersion::V2_2 => "2.2",
        };
        write!(f, "{version}")
    }
}

/// Parses GAF files into [`Annotation`]s
///
/// # Examples
///
/// ```
/// use goassoc::parser::gaf::GafReader;
/// use goassoc::{AnnotationSource, EvidenceCode, Namespace};
///
/// let data = "!gaf-version: 1.0\n\
///     UniProtKB\tP12345\tPHO3\t\tGO:0003993\tPMID:2676709\tIMP\t\tF\t\t\tprotein\ttaxon:9606\t20090118\tSGD\n";
///
/// let annotations = GafReader::default().parse(&mut data.as_bytes(), "memory").unwrap();
/// assert_eq!(annotations.len(), 1);
/// assert_eq!(annotations.header().version(), Some("1.0"));
///
/// let record = &annotations.records()[0];
/// assert_eq!(record.go_id, "GO:0003993");
/// assert!(record.qualifiers.is_empty());
/// assert_eq!(record.evidence_code, Some(EvidenceCode::new("IMP")));
/// assert_eq!(record.namespace, Some(Namespace::MF));
/// assert_eq!(record.taxon.as_slice(), &[9606]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct GafReader {
    options: ReaderOptions,
}

impl GafReader {
    /// Constructs a reader with the given options
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    fn parse_line(
        &self,
        version: GafVersion,
        line: &DataLine<'_>,
        report: &mut ParseReport,
    ) -> GoResult<Outcome> {
        let columns = line.columns(version.columns())?;
        Ok(self.annotation(version, &columns, report).into())
    }

    fn annotation(
        &self,
        version: GafVersion,
        columns: &[&str],
        report: &mut ParseReport,
    ) -> LineResult<Annotation> {
        let db = required(columns[0], "DB")?;
        let db_object_id = required(columns[1], "DB_Object_ID")?;
        let symbol = columns[2].trim();
        if symbol.is_empty() && !self.options.allow_missing_symbol() {
            return Err(Rejection::new(
                "missing DB_Object_Symbol",
                "DB_Object_Symbol is empty",
            ));
        }
        let qualifier_tokens =
            version
                .qualifier_field()
                .split(columns[3], '|', &self.options, report)?;
        let go_id = go_id(columns[4])?;
        let db_reference = DB_REFERENCE.split(columns[5], '|', &self.options, report)?;
        let evidence_code = evidence(required(columns[6], "Evidence_Code")?, report);
        let aspect = required(columns[8], "Aspect")?;
        let namespace = Namespace::from_aspect(aspect)
            .ok_or_else(|| Rejection::new("illegal Aspect", format!("unknown Aspect '{aspect}'")))?;
        let db_object_type = required(columns[11], "DB_Object_Type")?;
        let taxon_tokens = TAXON.split(columns[12], '|', &self.options, report)?;
        let taxon = taxa(&taxon_tokens, report);
        if taxon.is_empty() {
            return Err(Rejection::new(
                "illegal Taxon",
                format!("no valid taxon in '{}'", columns[12]),
            ));
        }
        let date = date(required(columns[13], "Date")?, report);
        let assigned_by = required(columns[14], "Assigned_By")?;

        let (extensions, gene_product_form_id) = if columns.len() > 15 {
            let (extensions, dropped) = Extensions::parse(columns[15]);
            if dropped > 0 {
                report.warn("malformed Extension".to_string());
            }
            (extensions, optional(columns[16]))
        } else {
            (None, None)
        };

        let details = GafDetails {
            db: db.to_string(),
            db_object_symbol: symbol.to_string(),
            db_reference: db_reference.iter().map(|s| s.to_string()).collect(),
            with_from: list(columns[7], '|'),
            db_object_name: columns[9].trim().to_string(),
            synonyms: list(columns[10], '|'),
            db_object_type: db_object_type.to_string(),
            assigned_by: assigned_by.to_string(),
            extensions,
            gene_product_form_id,
        };

        let mut annotation = Annotation::new(DatabaseId::from(db_object_id), go_id)
            .with_qualifiers(qualifiers(&qualifier_tokens, report))
            .with_evidence(evidence_code)
            .with_namespace(namespace);
        annotation.taxon = taxon;
        annotation.date = date;
        annotation.details = Some(FormatDetails::Gaf(details));
        Ok(annotation)
    }
}

fn detect_version(value: Option<&str>, source_name: &str) -> GafVersion {
    match value {
        Some(value) => GafVersion::from_header(value).unwrap_or_else(|| {
            warn!("{source_name}: unknown gaf-version '{value}', parsing as GAF {}", GafVersion::default());
            GafVersion::default()
        }),
        None => {
            warn!("{source_name}: no gaf-version header, parsing as GAF {}", GafVersion::default());
            GafVersion::default()
        }
    }
}

impl AnnotationSource for GafReader {
    fn options(&self) -> &ReaderOptions {
        &self.options
    }

    fn read_records(&self, reader: &mut dyn BufRead, source_name: &str) -> GoResult<Annotations> {
        let mut version: Option<GafVersion> = None;
        read_lines(reader, source_name, '!', |header, line, report| {
            let version = *version.get_or_insert_with(|| {
                let detected = detect_version(header.value("gaf-version"), source_name);
                debug!("{source_name}: parsing as GAF {detected}");
                header.set_version(&detected.to_string());
                detected
            });
            self.parse_line(version, line, report)
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{EvidenceCode, GoError};

    const GAF_10_LINE: &str = "UniProtKB\tP12345\tPHO3\t\tGO:0003993\tPMID:2676709\tIMP\t\tF\t\t\tprotein\ttaxon:9606\t20090118\tSGD";

    fn parse(data: &str) -> GoResult<Annotations> {
        GafReader::default().read_records(&mut data.as_bytes(), "test")
    }

    #[test]
    fn gaf_10_line() {
        let data = format!("!gaf-version: 1.0\n{GAF_10_LINE}\n");
        let annotations = parse(&data).unwrap();
        assert_eq!(annotations.len(), 1);
        let record = &annotations.records()[0];
        assert_eq!(record.db_id, DatabaseId::from("P12345"));
        assert_eq!(record.go_id, "GO:0003993");
        assert!(record.qualifiers.is_empty());
        assert_eq!(record.evidence_code, Some(EvidenceCode::new("IMP")));
        assert_eq!(record.taxon.as_slice(), &[9606]);
        assert_eq!(
            record.date,
            chrono::NaiveDate::from_ymd_opt(2009, 1, 18)
        );
        let Some(FormatDetails::Gaf(details)) = &record.details else {
            panic!("GAF details expected");
        };
        assert_eq!(details.db, "UniProtKB");
        assert_eq!(details.db_reference, vec!["PMID:2676709".to_string()]);
        assert!(details.extensions.is_none());
        assert!(annotations.report().is_clean());
    }

    #[test]
    fn gaf_22_relations() {
        let data = "!gaf-version: 2.2\n\
            UniProtKB\tA0A024RBG1\tNUDT4B\tNOT|enables\tGO:0003723\tGO_REF:0000043\tIEA\tUniProtKB-KW:KW-0694\tF\tDiphosphoinositol polyphosphate phosphohydrolase NUDT4B\tNUDT4B\tprotein\ttaxon:9606|taxon:10090\t20220829\tUniProt\tpart_of(CL:0000084)\t\n";
        let annotations = parse(data).unwrap();
        let record = &annotations.records()[0];
        assert!(record.qualifiers.is_not());
        assert!(record.qualifiers.contains("enables"));
        assert_eq!(record.taxon.as_slice(), &[9606, 10090]);
        let Some(FormatDetails::Gaf(details)) = &record.details else {
            panic!("GAF details expected");
        };
        assert!(details.extensions.as_ref().unwrap().has_relation("part_of"));
        assert_eq!(details.gene_product_form_id, None);
        assert_eq!(details.synonyms, vec!["NUDT4B".to_string()]);
    }

    #[test]
    fn gaf_22_requires_qualifier() {
        let data = "!gaf-version: 2.2\n\
            UniProtKB\tP1\tS1\t\tGO:0003723\tPMID:1\tIDA\t\tF\t\t\tprotein\ttaxon:9606\t20220829\tUniProt\t\t\n";
        let annotations = parse(data).unwrap();
        assert!(annotations.is_empty());
        assert_eq!(
            annotations.report().ignored()["min cardinality Qualifier"].len(),
            1
        );
    }

    #[test]
    fn missing_version_defaults_to_newest() {
        let data = "UniProtKB\tP1\tS1\tinvolved_in\tGO:0008150\tPMID:1\tIDA\t\tP\t\t\tprotein\ttaxon:9606\t20220829\tUniProt\t\t\n";
        let annotations = parse(data).unwrap();
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations.header().version(), Some("2.2"));
    }

    #[test]
    fn column_count_mismatch_is_fatal() {
        let data = format!("!gaf-version: 2.1\n{GAF_10_LINE}\n");
        let err = parse(&data).unwrap_err();
        assert!(matches!(
            err,
            GoError::ColumnCount {
                expected: 17,
                found: 15,
                line_no: 2,
                ..
            }
        ));
    }

    #[test]
    fn rejected_lines_are_categorized() {
        let lines = [
            // missing GO id
            "UniProtKB\tP1\tS1\t\t\tPMID:1\tIMP\t\tF\t\t\tprotein\ttaxon:9606\t20090118\tSGD",
            // bad aspect
            "UniProtKB\tP1\tS1\t\tGO:0003993\tPMID:1\tIMP\t\tX\t\t\tprotein\ttaxon:9606\t20090118\tSGD",
            // three taxa
            "UniProtKB\tP1\tS1\t\tGO:0003993\tPMID:1\tIMP\t\tF\t\t\tprotein\ttaxon:1|taxon:2|taxon:3\t20090118\tSGD",
            // missing symbol
            "UniProtKB\tP1\t\t\tGO:0003993\tPMID:1\tIMP\t\tF\t\t\tprotein\ttaxon:9606\t20090118\tSGD",
            // no reference
            "UniProtKB\tP1\tS1\t\tGO:0003993\t\tIMP\t\tF\t\t\tprotein\ttaxon:9606\t20090118\tSGD",
        ];
        let data = format!("!gaf-version: 1.0\n{}\n", lines.join("\n"));
        let annotations = parse(&data).unwrap();
        assert!(annotations.is_empty());
        let ignored = annotations.report().ignored();
        assert_eq!(ignored.len(), 5);
        assert!(ignored.contains_key("missing GO_ID"));
        assert!(ignored.contains_key("illegal Aspect"));
        assert!(ignored.contains_key("max cardinality Taxon"));
        assert!(ignored.contains_key("missing DB_Object_Symbol"));
        assert!(ignored.contains_key("min cardinality DB_Reference"));
    }

    #[test]
    fn missing_symbol_can_be_allowed() {
        let data = "!gaf-version: 1.0\n\
            UniProtKB\tP1\t\t\tGO:0003993\tPMID:1\tIMP\t\tF\t\t\tprotein\ttaxon:9606\t20090118\tSGD\n";
        let reader = GafReader::new(ReaderOptions::default().with_allow_missing_symbol(true));
        let annotations = reader.read_records(&mut data.as_bytes(), "test").unwrap();
        assert_eq!(annotations.len(), 1);
    }

    #[test]
    fn unexpected_values_are_warnings() {
        let data = "!gaf-version: 1.0\n\
            UniProtKB\tP1\tS1\tfoo\tGO:0003993\tPMID:1\tXYZ\t\tF\t\t\tprotein\ttaxon:9606\t2009\tSGD\n";
        let annotations = parse(data).unwrap();
        assert_eq!(annotations.len(), 1);
        let warnings = annotations.report().warnings();
        assert_eq!(warnings["unexpected Qualifier"], 1);
        assert_eq!(warnings["unexpected Evidence"], 1);
        assert_eq!(warnings["unexpected Date"], 1);
        assert_eq!(annotations.records()[0].date, None);
    }

    #[test]
    fn versions() {
        assert_eq!(GafVersion::from_header("2.1"), Some(GafVersion::V2_1));
        assert_eq!(GafVersion::from_header(" 1.0 "), Some(GafVersion::V1_0));
        assert_eq!(GafVersion::from_header("3.0"), None);
        assert_eq!(GafVersion::V1_0.columns(), 15);
        assert_eq!(GafVersion::V2_0.columns(), 17);
    }
}
