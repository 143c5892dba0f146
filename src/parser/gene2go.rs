//! Reader for NCBI's `gene2go` file
//!
//! The file has one header line starting with `#` and 8 tab separated
//! columns: `tax_id GeneID GO_ID Evidence Qualifier GO_term PubMed Category`.
//! Empty values are written as `-`.

use std::io::BufRead;

use crate::annotations::{Annotation, DatabaseId, FormatDetails, Gene2GoDetails, Taxa};
use crate::parser::{
    evidence, go_id, list, qualifiers, read_lines, required, AnnotationSource, Annotations,
    DataLine, LineResult, Outcome, ParseReport, ReaderOptions, Rejection,
};
use crate::term::Namespace;
use crate::GoResult;

const COLUMNS: usize = 8;

/// Parses NCBI `gene2go` files into [`Annotation`]s
///
/// The file contains annotations of all taxa. Use
/// [`ReaderOptions::with_taxids`] to keep only some of them.
///
/// # Examples
///
/// ```
/// use goassoc::parser::gene2go::Gene2GoReader;
/// use goassoc::parser::ReaderOptions;
/// use goassoc::{AnnotationSource, DatabaseId, Namespace};
///
/// let data = "#tax_id\tGeneID\tGO_ID\tEvidence\tQualifier\tGO_term\tPubMed\tCategory\n\
///     9606\t1\tGO:0003674\tND\tenables\tmolecular_function\t-\tFunction\n\
///     10090\t11287\tGO:0005576\tIDA\tlocated_in\textracellular region\t1234|5678\tComponent\n";
///
/// let reader = Gene2GoReader::new(ReaderOptions::default().with_taxids([9606]));
/// let annotations = reader.parse(&mut data.as_bytes(), "memory").unwrap();
///
/// assert_eq!(annotations.len(), 1);
/// assert_eq!(annotations.report().filtered(), 1);
/// let record = &annotations.records()[0];
/// assert_eq!(record.db_id, DatabaseId::Ncbi(1));
/// assert_eq!(record.namespace, Some(Namespace::MF));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Gene2GoReader {
    options: ReaderOptions,
}

impl Gene2GoReader {
    /// Constructs a reader with the given options
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    fn parse_line(&self, line: &DataLine<'_>, report: &mut ParseReport) -> GoResult<Outcome> {
        let columns = line.columns(COLUMNS)?;

        let tax_id = match integer(&columns, 0, "tax_id") {
            Ok(id) => id,
            Err(rejection) => return Ok(Outcome::Rejected(rejection)),
        };
        if let Some(taxids) = self.options.taxids() {
            if !taxids.contains(&tax_id) {
                return Ok(Outcome::Filtered);
            }
        }
        Ok(self.annotation(tax_id, &columns, report).into())
    }

    fn annotation(
        &self,
        tax_id: u32,
        columns: &[&str],
        report: &mut ParseReport,
    ) -> LineResult<Annotation> {
        let gene_id = integer(columns, 1, "GeneID")?;
        let go_id = go_id(columns[2])?;
        let evidence_code = evidence(required(columns[3], "Evidence")?, report);
        let qualifier_tokens: Vec<&str> = columns[4]
            .split(|c: char| c == '|' || c.is_whitespace())
            .collect();
        let category = required(columns[7], "Category")?;
        let namespace = Namespace::from_category(category).ok_or_else(|| {
            Rejection::new("illegal Category", format!("unknown Category '{category}'"))
        })?;

        let details = Gene2GoDetails {
            go_term: columns[5].trim().to_string(),
            pubmed: list(columns[6], '|'),
        };

        let mut taxon = Taxa::new();
        taxon.push(tax_id);
        let mut annotation = Annotation::new(DatabaseId::Ncbi(gene_id), go_id)
            .with_qualifiers(qualifiers(&qualifier_tokens, report))
            .with_evidence(evidence_code)
            .with_namespace(namespace);
        annotation.taxon = taxon;
        annotation.details = Some(FormatDetails::Gene2Go(details));
        Ok(annotation)
    }
}

fn integer(columns: &[&str], idx: usize, name: &str) -> LineResult<u32> {
    let value = required(columns[idx], name)?;
    value
        .parse()
        .map_err(|_| Rejection::new(format!("illegal {name}"), format!("'{value}' is not an integer")))
}

impl AnnotationSource for Gene2GoReader {
    fn options(&self) -> &ReaderOptions {
        &self.options
    }

    fn read_records(&self, reader: &mut dyn BufRead, source_name: &str) -> GoResult<Annotations> {
        read_lines(reader, source_name, '#', |_, line, report| {
            self.parse_line(line, report)
        })
    }
}
