//! Readers for GO annotation files
//!
//! Every supported format has its own reader that implements
//! [`AnnotationSource`]:
//!
//! - [`gaf::GafReader`]: GO Annotation File, versions 1.0 and 2.x
//! - [`gpad::GpadReader`]: Gene Product Association Data, version 1.1
//! - [`gene2go::Gene2GoReader`]: NCBI's `gene2go`
//! - [`id2gos::IdToGosReader`]: simple `id<TAB>GO;GO;...` lists
//!
//! All readers share the same line handling. Header lines are collected
//! into a [`Header`]. A data line that violates a field rule (e.g. a
//! missing GO id) is not an error: it is recorded in the [`ParseReport`]
//! and parsing continues. Only a wrong number of columns or an unreadable
//! input aborts the parse.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::annotations::{Annotation, Qualifiers, Taxa};
use crate::evidence::EvidenceCode;
use crate::{GoError, GoResult, GoTermId};

pub mod gaf;
pub mod gene2go;
pub mod gpad;
pub mod id2gos;

/// Shared interface of all annotation file readers
pub trait AnnotationSource {
    /// Returns the options of the reader
    fn options(&self) -> &ReaderOptions;

    /// Parses all lines of `reader` into [`Annotations`]
    ///
    /// Implementors only parse, writing the error log is done by
    /// [`AnnotationSource::parse`] and [`AnnotationSource::parse_file`].
    ///
    /// # Errors
    ///
    /// - [`GoError::ColumnCount`] if a data line has the wrong number of columns
    /// - [`GoError::Io`] if the input cannot be read or decoded
    fn read_records(&self, reader: &mut dyn BufRead, source_name: &str)
        -> GoResult<Annotations>;

    /// Parses annotations from any buffered reader
    ///
    /// `source_name` is used in log messages and errors.
    ///
    /// # Errors
    ///
    /// - [`GoError::ColumnCount`] if a data line has the wrong number of columns
    /// - [`GoError::Io`] if the input cannot be read or decoded or the
    ///   error log cannot be written
    fn parse(&self, reader: &mut dyn BufRead, source_name: &str) -> GoResult<Annotations> {
        let annotations = self.read_records(reader, source_name)?;
        finish(annotations, self.options(), None)
    }

    /// Parses an annotation file
    ///
    /// If lines were ignored, an error log is written according to
    /// [`ReaderOptions::error_log`], by default next to the input file.
    ///
    /// # Errors
    ///
    /// - [`GoError::CannotOpenFile`] if the file cannot be opened
    /// - all errors of [`AnnotationSource::parse`]
    fn parse_file<P: AsRef<Path>>(&self, path: P) -> GoResult<Annotations>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let filename = path.display().to_string();
        let file = File::open(path).map_err(|_| GoError::CannotOpenFile(filename.clone()))?;
        let mut reader = BufReader::new(file);
        let annotations = self.read_records(&mut reader, &filename)?;
        finish(annotations, self.options(), Some(path))
    }
}

fn finish(
    annotations: Annotations,
    options: &ReaderOptions,
    input: Option<&Path>,
) -> GoResult<Annotations> {
    let report = annotations.report();
    info!(
        "{}: {} annotations accepted, {} lines ignored, {} lines filtered",
        annotations.source(),
        report.accepted(),
        report.ignored_count(),
        report.filtered()
    );
    if report.ignored_count() > 0 {
        if let Some(log) = options.error_log().destination(input) {
            report.write_error_log(&log)?;
        }
    }
    Ok(annotations)
}

/// Where the log of ignored lines is written to
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ErrorLog {
    /// `<input>.err` next to an input file, nothing for in-memory input
    #[default]
    Default,
    /// Always write to this file
    Path(PathBuf),
    /// Never write an error log
    Disabled,
}

impl ErrorLog {
    /// Returns the file the error log of `input` is written to
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::{Path, PathBuf};
    /// use goassoc::parser::ErrorLog;
    ///
    /// let log = ErrorLog::Default;
    /// assert_eq!(
    ///     log.destination(Some(Path::new("data/goa.gaf"))),
    ///     Some(PathBuf::from("data/goa.gaf.err"))
    /// );
    /// assert_eq!(log.destination(None), None);
    /// assert_eq!(ErrorLog::Disabled.destination(Some(Path::new("goa.gaf"))), None);
    /// ```
    pub fn destination(&self, input: Option<&Path>) -> Option<PathBuf> {
        match self {
            ErrorLog::Default => input.map(|path| {
                let mut name = path.as_os_str().to_owned();
                name.push(".err");
                PathBuf::from(name)
            }),
            ErrorLog::Path(path) => Some(path.clone()),
            ErrorLog::Disabled => None,
        }
    }
}

/// Tokens of multi-valued fields that are known to be garbage
///
/// When a pipe-separated field has more values than allowed, trailing
/// tokens from this table are discarded before the line is judged.
/// Tokens can be registered for all fields or for a single field
/// (e.g. `Taxon`). The default table contains `-`. Empty tokens are
/// dropped before the repair and need no entry.
///
/// # Examples
///
/// ```
/// use goassoc::parser::KnownBadTokens;
///
/// let tokens = KnownBadTokens::default().with_field_token("Taxon", "taxon:0");
/// assert!(tokens.is_bad("Taxon", "taxon:0"));
/// assert!(tokens.is_bad("Taxon", "-"));
/// assert!(!tokens.is_bad("DB_Reference", "taxon:0"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnownBadTokens {
    all_fields: HashSet<String>,
    per_field: HashMap<String, HashSet<String>>,
}

impl Default for KnownBadTokens {
    fn default() -> Self {
        Self::empty().with_token("-")
    }
}

impl KnownBadTokens {
    /// Constructs a table without any tokens
    pub fn empty() -> Self {
        Self {
            all_fields: HashSet::new(),
            per_field: HashMap::new(),
        }
    }

    /// Registers a token that is garbage in every field
    #[must_use]
    pub fn with_token(mut self, token: &str) -> Self {
        self.all_fields.insert(token.to_string());
        self
    }

    /// Registers a token that is garbage in the named field
    #[must_use]
    pub fn with_field_token(mut self, field: &str, token: &str) -> Self {
        self.per_field
            .entry(field.to_string())
            .or_default()
            .insert(token.to_string());
        self
    }

    /// Returns `true` if `token` is known garbage in `field`
    pub fn is_bad(&self, field: &str, token: &str) -> bool {
        self.all_fields.contains(token)
            || self
                .per_field
                .get(field)
                .map_or(false, |tokens| tokens.contains(token))
    }
}

/// Options shared by all readers
///
/// # Examples
///
/// ```
/// use goassoc::parser::{ErrorLog, ReaderOptions};
///
/// let options = ReaderOptions::default()
///     .with_allow_missing_symbol(true)
///     .with_taxids([9606])
///     .with_error_log(ErrorLog::Disabled);
/// assert!(options.allow_missing_symbol());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ReaderOptions {
    allow_missing_symbol: bool,
    taxids: Option<HashSet<u32>>,
    error_log: ErrorLog,
    known_bad_tokens: KnownBadTokens,
}

impl ReaderOptions {
    /// Accept GAF lines with an empty `DB_Object_Symbol`
    #[must_use]
    pub fn with_allow_missing_symbol(mut self, allow: bool) -> Self {
        self.allow_missing_symbol = allow;
        self
    }

    /// Only keep gene2go lines of these taxa
    #[must_use]
    pub fn with_taxids<I: IntoIterator<Item = u32>>(mut self, taxids: I) -> Self {
        self.taxids = Some(taxids.into_iter().collect());
        self
    }

    /// Sets the destination of the error log
    #[must_use]
    pub fn with_error_log(mut self, error_log: ErrorLog) -> Self {
        self.error_log = error_log;
        self
    }

    /// Replaces the table of known garbage tokens
    #[must_use]
    pub fn with_known_bad_tokens(mut self, tokens: KnownBadTokens) -> Self {
        self.known_bad_tokens = tokens;
        self
    }

    /// Returns `true` if an empty `DB_Object_Symbol` is accepted
    pub fn allow_missing_symbol(&self) -> bool {
        self.allow_missing_symbol
    }

    /// Returns the taxa to keep, `None` keeps all
    pub fn taxids(&self) -> Option<&HashSet<u32>> {
        self.taxids.as_ref()
    }

    /// Returns the error log destination
    pub fn error_log(&self) -> &ErrorLog {
        &self.error_log
    }

    /// Returns the table of known garbage tokens
    pub fn known_bad_tokens(&self) -> &KnownBadTokens {
        &self.known_bad_tokens
    }
}

/// The header lines of an annotation file
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    lines: Vec<String>,
    version: Option<String>,
}

impl Header {
    /// Returns the raw header lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns all header lines as one text blob
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Returns the format version the file was parsed as
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the value of a `key: value` header line
    ///
    /// Leading comment characters (`!`, `#`) are ignored.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| {
            let line = line.trim_start_matches(['!', '#']).trim();
            let (k, v) = line.split_once(':')?;
            if k.trim() == key {
                Some(v.trim())
            } else {
                None
            }
        })
    }

    pub(crate) fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    pub(crate) fn set_version(&mut self, version: &str) {
        self.version = Some(version.to_string());
    }
}

/// A data line that was not turned into an annotation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IgnoredLine {
    /// 1-based line number
    pub line_no: usize,
    /// The raw line
    pub line: String,
    /// What was wrong with the line
    pub message: String,
}

/// Statistics and diagnostics of one parse
///
/// Every data line is either accepted, filtered out on request (e.g.
/// by taxon) or ignored. Ignored lines are kept, grouped by a category
/// such as `missing GO_ID`. Recoverable problems are counted as warnings.
#[derive(Clone, Debug, Default)]
pub struct ParseReport {
    source: String,
    lines_read: usize,
    accepted: usize,
    accepted_lines: usize,
    filtered: usize,
    ignored: BTreeMap<String, Vec<IgnoredLine>>,
    warnings: BTreeMap<String, usize>,
    seen_values: HashSet<(String, String)>,
}

impl ParseReport {
    /// Constructs an empty report for the source
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            ..Default::default()
        }
    }

    /// Returns the name of the parsed file or stream
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of data lines, header lines are not counted
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Number of annotation records produced
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Number of data lines that produced at least one record
    ///
    /// Together with [`ParseReport::filtered`] and
    /// [`ParseReport::ignored_count`] this adds up to
    /// [`ParseReport::lines_read`].
    pub fn accepted_lines(&self) -> usize {
        self.accepted_lines
    }

    /// Number of data lines dropped on request, e.g. by taxon filter
    pub fn filtered(&self) -> usize {
        self.filtered
    }

    /// Ignored lines, grouped by category
    pub fn ignored(&self) -> &BTreeMap<String, Vec<IgnoredLine>> {
        &self.ignored
    }

    /// Number of ignored lines
    pub fn ignored_count(&self) -> usize {
        self.ignored.values().map(Vec::len).sum()
    }

    /// Number of recoverable problems, by category
    pub fn warnings(&self) -> &BTreeMap<String, usize> {
        &self.warnings
    }

    /// Returns `true` if no line was ignored and nothing was warned about
    pub fn is_clean(&self) -> bool {
        self.ignored.is_empty() && self.warnings.is_empty()
    }

    pub(crate) fn ignore(&mut self, category: String, line_no: usize, line: &str, message: String) {
        debug!("{}:{line_no}: ignoring line, {message}", self.source);
        self.ignored.entry(category).or_default().push(IgnoredLine {
            line_no,
            line: line.to_string(),
            message,
        });
    }

    /// Counts a recoverable problem
    ///
    /// Returns `true` the first time the category is seen
    pub(crate) fn warn(&mut self, category: String) -> bool {
        let count = self.warnings.entry(category).or_default();
        *count += 1;
        *count == 1
    }

    /// Counts a value outside of the expected vocabulary of a field
    ///
    /// Each distinct value is logged once.
    pub(crate) fn unexpected(&mut self, field: &str, value: &str) {
        self.warn(format!("unexpected {field}"));
        if self.seen_values.insert((field.to_string(), value.to_string())) {
            warn!("{}: unexpected {field} value '{value}'", self.source);
        }
    }

    /// Writes all ignored lines into a human readable log file
    ///
    /// # Errors
    ///
    /// - [`GoError::CannotOpenFile`] if the file cannot be created
    /// - [`GoError::Io`] if writing fails
    pub fn write_error_log<P: AsRef<Path>>(&self, path: P) -> GoResult<()> {
        let path = path.as_ref();
        let filename = path.display().to_string();
        let file = File::create(path).map_err(|_| GoError::CannotOpenFile(filename.clone()))?;
        let mut out = BufWriter::new(file);
        self.write_log_to(&mut out)
            .and_then(|()| out.flush())
            .map_err(|err| GoError::Io(format!("{filename}: {err}")))?;
        info!(
            "{}: wrote {} ignored lines to {filename}",
            self.source,
            self.ignored_count()
        );
        Ok(())
    }

    fn write_log_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(
            out,
            "{} of {} lines ignored in {}",
            self.ignored_count(),
            self.lines_read,
            self.source
        )?;
        for (category, lines) in &self.ignored {
            writeln!(out)?;
            writeln!(out, "## {category} ({})", lines.len())?;
            for ignored in lines {
                writeln!(out, "line {}: {}", ignored.line_no, ignored.message)?;
                writeln!(out, "    {}", ignored.line)?;
            }
        }
        if !self.warnings.is_empty() {
            writeln!(out)?;
            writeln!(out, "## warnings")?;
            for (category, count) in &self.warnings {
                writeln!(out, "{category}: {count}")?;
            }
        }
        Ok(())
    }
}

impl Display for ParseReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} lines read, {} accepted, {} filtered, {} ignored",
            self.source,
            self.lines_read,
            self.accepted,
            self.filtered,
            self.ignored_count()
        )
    }
}

/// The result of parsing one annotation file
#[derive(Clone, Debug, Default)]
pub struct Annotations {
    source: String,
    header: Header,
    records: Vec<Annotation>,
    report: ParseReport,
}

impl Annotations {
    /// Wraps records that were created in memory
    pub fn from_records(source: &str, records: Vec<Annotation>) -> Self {
        let mut report = ParseReport::new(source);
        report.lines_read = records.len();
        report.accepted = records.len();
        report.accepted_lines = records.len();
        Self {
            source: source.to_string(),
            header: Header::default(),
            records,
            report,
        }
    }

    /// Returns the name of the parsed file or stream
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the header of the file
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the annotation records
    pub fn records(&self) -> &[Annotation] {
        &self.records
    }

    /// Returns the parse report
    pub fn report(&self) -> &ParseReport {
        &self.report
    }

    /// Returns the number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns an iterator of the records
    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.records.iter()
    }

    /// Consumes `self` and returns the records
    pub fn into_records(self) -> Vec<Annotation> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Annotations {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;
    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Why a single line was not accepted
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Rejection {
    category: String,
    message: String,
}

impl Rejection {
    pub fn new<C: Into<String>, M: Into<String>>(category: C, message: M) -> Self {
        Self {
            category: category.into(),
            message: message.into(),
        }
    }

    #[cfg(test)]
    pub fn category(&self) -> &str {
        &self.category
    }
}

pub(crate) type LineResult<T> = Result<T, Rejection>;

/// What became of a single data line
pub(crate) enum Outcome {
    Accepted(Annotation),
    AcceptedMany(Vec<Annotation>),
    Rejected(Rejection),
    Filtered,
}

impl From<LineResult<Annotation>> for Outcome {
    fn from(res: LineResult<Annotation>) -> Self {
        match res {
            Ok(annotation) => Outcome::Accepted(annotation),
            Err(rejection) => Outcome::Rejected(rejection),
        }
    }
}

/// A data line with its position in the input
pub(crate) struct DataLine<'l> {
    pub source: &'l str,
    pub line_no: usize,
    pub text: &'l str,
}

impl<'l> DataLine<'l> {
    /// Splits the line at tabs and checks the number of columns
    ///
    /// A mismatch is a format violation and aborts the parse
    pub fn columns(&self, expected: usize) -> GoResult<Vec<&'l str>> {
        let columns: Vec<&str> = self.text.split('\t').collect();
        if columns.len() == expected {
            Ok(columns)
        } else {
            Err(GoError::ColumnCount {
                file: self.source.to_string(),
                line_no: self.line_no,
                expected,
                found: columns.len(),
                line: self.text.to_string(),
            })
        }
    }
}

/// Reads all lines and dispatches them to the header or `parse_line`
///
/// Empty lines are skipped. Lines starting with `comment` are header lines.
pub(crate) fn read_lines<F>(
    reader: &mut dyn BufRead,
    source_name: &str,
    comment: char,
    mut parse_line: F,
) -> GoResult<Annotations>
where
    F: FnMut(&mut Header, &DataLine<'_>, &mut ParseReport) -> GoResult<Outcome>,
{
    let mut header = Header::default();
    let mut report = ParseReport::new(source_name);
    let mut records = Vec::new();

    let mut buffer = String::with_capacity(512);
    let mut line_no = 0usize;
    loop {
        buffer.clear();
        line_no += 1;
        let bytes = reader
            .read_line(&mut buffer)
            .map_err(|err| GoError::Io(format!("{source_name}:{line_no}: {err}")))?;
        if bytes == 0 {
            break;
        }
        let text = buffer.trim_end_matches(['\n', '\r']);
        if text.trim().is_empty() {
            continue;
        }
        if text.starts_with(comment) {
            header.push(text);
            continue;
        }

        report.lines_read += 1;
        let line = DataLine {
            source: source_name,
            line_no,
            text,
        };
        match parse_line(&mut header, &line, &mut report)? {
            Outcome::Accepted(annotation) => {
                report.accepted += 1;
                report.accepted_lines += 1;
                records.push(annotation);
            }
            Outcome::AcceptedMany(annotations) if annotations.is_empty() => {
                report.ignore(
                    "no annotations".to_string(),
                    line_no,
                    text,
                    "line does not contain any annotation".to_string(),
                );
            }
            Outcome::AcceptedMany(annotations) => {
                report.accepted += annotations.len();
                report.accepted_lines += 1;
                records.extend(annotations);
            }
            Outcome::Rejected(rejection) => {
                report.ignore(rejection.category, line_no, text, rejection.message);
            }
            Outcome::Filtered => report.filtered += 1,
        }
    }

    Ok(Annotations {
        source: source_name.to_string(),
        header,
        records,
        report,
    })
}

/// Cardinality rule of a pipe-separated field
///
/// Too few values reject the line. Too many values are repaired by
/// dropping trailing [`KnownBadTokens`]; if that is not enough the line
/// is kept with a warning, unless the field is `strict`.
pub(crate) struct MultiField {
    name: &'static str,
    min: usize,
    max: Option<usize>,
    strict: bool,
}

impl MultiField {
    pub const fn new(name: &'static str, min: usize, max: Option<usize>) -> Self {
        Self {
            name,
            min,
            max,
            strict: false,
        }
    }

    /// Lines with too many values are rejected after the repair
    pub const fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn split<'l>(
        &self,
        raw: &'l str,
        separator: char,
        options: &ReaderOptions,
        report: &mut ParseReport,
    ) -> LineResult<Vec<&'l str>> {
        let mut tokens: Vec<&str> = raw
            .split(separator)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect();

        if let Some(max) = self.max {
            if tokens.len() > max {
                let found = tokens.len();
                let bad = options.known_bad_tokens();
                while tokens.len() > max && tokens.last().map_or(false, |t| bad.is_bad(self.name, t)) {
                    tokens.pop();
                }
                if tokens.len() > max && self.strict {
                    return Err(Rejection::new(
                        format!("max cardinality {}", self.name),
                        format!("{} has {found} values, at most {max} allowed", self.name),
                    ));
                }
                if report.warn(format!("max cardinality {}", self.name)) {
                    warn!(
                        "{}: {} has {found} values, at most {max} allowed. Keeping {}",
                        report.source(),
                        self.name,
                        tokens.len()
                    );
                }
            }
        }

        if tokens.len() < self.min {
            return Err(Rejection::new(
                format!("min cardinality {}", self.name),
                format!(
                    "{} has {} values, at least {} required",
                    self.name,
                    tokens.len(),
                    self.min
                ),
            ));
        }
        Ok(tokens)
    }
}

/// Returns the trimmed value of a required single-valued field
pub(crate) fn required<'l>(value: &'l str, name: &str) -> LineResult<&'l str> {
    let value = value.trim();
    if value.is_empty() {
        Err(Rejection::new(
            format!("missing {name}"),
            format!("{name} is empty"),
        ))
    } else {
        Ok(value)
    }
}

/// Parses the required GO id column
pub(crate) fn go_id(value: &str) -> LineResult<GoTermId> {
    let value = required(value, "GO_ID")?;
    GoTermId::try_from(value)
        .map_err(|_| Rejection::new("illegal GO_ID", format!("'{value}' is not a GO id")))
}

/// Parses the evidence code, unknown codes are kept with a warning
pub(crate) fn evidence(value: &str, report: &mut ParseReport) -> EvidenceCode {
    let code = EvidenceCode::new(value);
    if !code.is_known() {
        report.unexpected("Evidence", value);
    }
    code
}

/// Normalizes qualifier tokens, unknown tokens are kept with a warning
pub(crate) fn qualifiers(tokens: &[&str], report: &mut ParseReport) -> Qualifiers {
    let qualifiers = Qualifiers::new(tokens);
    for token in qualifiers.unexpected() {
        report.unexpected("Qualifier", token);
    }
    qualifiers
}

/// Parses taxon tokens like `taxon:9606` or `NCBITaxon:9606`
///
/// Tokens that are not a number after the prefix are dropped with a warning.
pub(crate) fn taxa(tokens: &[&str], report: &mut ParseReport) -> Taxa {
    let mut res = Taxa::new();
    for token in tokens {
        let (prefix, id) = token.split_once(':').unwrap_or(("", token));
        if !matches!(prefix, "taxon" | "NCBITaxon" | "") {
            report.unexpected("Taxon prefix", prefix);
        }
        match id.parse::<u32>() {
            Ok(id) => res.push(id),
            Err(_) => report.unexpected("Taxon", token),
        }
    }
    res
}

/// Parses a `YYYYMMDD` or `YYYY-MM-DD` date
///
/// Malformed dates are counted and result in `None`
pub(crate) fn date(value: &str, report: &mut ParseReport) -> Option<NaiveDate> {
    let parsed = NaiveDate::parse_from_str(value, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .ok();
    if parsed.is_none() {
        report.unexpected("Date", value);
    }
    parsed
}

/// Splits a multi-valued field without cardinality rules
pub(crate) fn list(value: &str, separator: char) -> Vec<String> {
    value
        .split(separator)
        .map(str::trim)
        .filter(|token| !token.is_empty() && *token != "-")
        .map(str::to_string)
        .collect()
}

/// Returns `None` for empty values and `-`
pub(crate) fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == "-" {
        None
    } else {
        Some(value.to_string())
    }
}
