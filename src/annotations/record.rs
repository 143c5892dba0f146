use std::fmt::Display;

use chrono::NaiveDate;
use smallvec::SmallVec;
use tracing::debug;

use crate::evidence::EvidenceCode;
use crate::term::{GoTermId, Namespace};

/// Qualifier tokens that are part of the GAF, GPAD and gene2go vocabularies
pub const KNOWN_QUALIFIERS: [&str; 14] = [
    "not",
    "contributes_to",
    "colocalizes_with",
    "enables",
    "involved_in",
    "part_of",
    "located_in",
    "is_active_in",
    "acts_upstream_of",
    "acts_upstream_of_positive_effect",
    "acts_upstream_of_negative_effect",
    "acts_upstream_of_or_within",
    "acts_upstream_of_or_within_positive_effect",
    "acts_upstream_of_or_within_negative_effect",
];

/// Taxon ids of an annotation
///
/// The first is the taxon of the gene product, an optional second one is
/// the interacting taxon.
pub type Taxa = SmallVec<[u32; 2]>;

/// The identifier of an annotated gene or gene product
///
/// GAF, GPAD and id2gos use string identifiers, NCBI's gene2go uses
/// integer `GeneID`s.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum DatabaseId {
    /// A string identifier, e.g. the UniProtKB accession `P12345`
    Name(String),
    /// An NCBI `GeneID`
    Ncbi(u32),
}

impl Display for DatabaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseId::Name(name) => write!(f, "{name}"),
            DatabaseId::Ncbi(id) => write!(f, "{id}"),
        }
    }
}

impl From<&str> for DatabaseId {
    fn from(name: &str) -> Self {
        DatabaseId::Name(name.to_string())
    }
}

impl From<String> for DatabaseId {
    fn from(name: String) -> Self {
        DatabaseId::Name(name)
    }
}

impl From<u32> for DatabaseId {
    fn from(id: u32) -> Self {
        DatabaseId::Ncbi(id)
    }
}

/// The normalized set of qualifier tokens of an annotation
///
/// Tokens are lowercased and deduplicated. The empty token and `-`
/// never become part of the set, so a missing qualifier is an empty set.
///
/// # Examples
///
/// ```
/// use goassoc::annotations::Qualifiers;
///
/// let qualifiers = Qualifiers::new(["NOT", "enables"]);
/// assert!(qualifiers.is_not());
/// assert_eq!(qualifiers.len(), 2);
///
/// assert!(Qualifiers::new(["-"]).is_empty());
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Qualifiers {
    tokens: SmallVec<[String; 2]>,
}

impl Qualifiers {
    /// Constructs the normalized qualifier set from raw tokens
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut res = Self::default();
        for token in tokens {
            let token = token.as_ref().trim();
            if token.is_empty() || token == "-" {
                continue;
            }
            let token = token.to_lowercase();
            if let Err(idx) = res.tokens.binary_search(&token) {
                res.tokens.insert(idx, token);
            }
        }
        res
    }

    /// Returns `true` if the annotation is negated
    pub fn is_not(&self) -> bool {
        self.contains("not")
    }

    /// Returns `true` if the set contains the (lowercase) token
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Returns the number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if there are no qualifiers
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns an iterator of the tokens, in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Returns the tokens that are not part of [`KNOWN_QUALIFIERS`]
    pub fn unexpected(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|t| !KNOWN_QUALIFIERS.contains(t))
    }
}

/// One `relation(entity)` expression of an annotation extension
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Extension {
    /// e.g. `part_of`
    pub relation: String,
    /// e.g. `CL:0000084`
    pub entity: String,
}

/// A parsed annotation extension
///
/// The raw value is `relation(entity)[,relation(entity)]*[|...]*`.
/// Expressions joined with `,` form one group and must all hold,
/// the `|`-separated groups are alternative readings.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Extensions {
    groups: Vec<Vec<Extension>>,
}

impl Extensions {
    /// Parses the raw extension column
    ///
    /// Returns the parsed extensions (`None` for an empty column) and the
    /// number of malformed fragments that were dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use goassoc::annotations::Extensions;
    ///
    /// let (ext, dropped) = Extensions::parse("part_of(CL:0000084),occurs_in(UBERON:0002048)|has_input(X)");
    /// let ext = ext.unwrap();
    /// assert_eq!(ext.groups().len(), 2);
    /// assert_eq!(ext.groups()[0].len(), 2);
    /// assert_eq!(dropped, 0);
    /// ```
    pub fn parse(raw: &str) -> (Option<Self>, usize) {
        let raw = raw.trim();
        if raw.is_empty() || raw == "-" {
            return (None, 0);
        }
        let mut dropped = 0;
        let mut groups = Vec::new();
        for group in split_outside_parens(raw, '|') {
            let mut expressions = Vec::new();
            for fragment in split_outside_parens(group, ',') {
                match parse_fragment(fragment) {
                    Some(ext) => expressions.push(ext),
                    None => {
                        debug!("Dropping malformed extension fragment '{fragment}'");
                        dropped += 1;
                    }
                }
            }
            if !expressions.is_empty() {
                groups.push(expressions);
            }
        }
        if groups.is_empty() {
            (None, dropped)
        } else {
            (Some(Self { groups }), dropped)
        }
    }

    /// Returns the alternative groups of AND-ed expressions
    pub fn groups(&self) -> &[Vec<Extension>] {
        &self.groups
    }

    /// Returns `true` if any expression uses the relation
    pub fn has_relation(&self, relation: &str) -> bool {
        self.groups
            .iter()
            .flatten()
            .any(|ext| ext.relation == relation)
    }
}

fn split_outside_parens(s: &str, separator: char) -> Vec<&str> {
    let mut res = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                res.push(&s[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    res.push(&s[start..]);
    res
}

fn parse_fragment(fragment: &str) -> Option<Extension> {
    let fragment = fragment.trim();
    let (relation, rest) = fragment.split_once('(')?;
    let entity = rest.strip_suffix(')')?;
    if relation.is_empty() || entity.is_empty() {
        return None;
    }
    Some(Extension {
        relation: relation.to_string(),
        entity: entity.to_string(),
    })
}

/// Columns of a GAF line that have no place in the common record
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GafDetails {
    /// Column 1, e.g. `UniProtKB`
    pub db: String,
    /// Column 3
    pub db_object_symbol: String,
    /// Column 6, at least one reference
    pub db_reference: Vec<String>,
    /// Column 8
    pub with_from: Vec<String>,
    /// Column 10
    pub db_object_name: String,
    /// Column 11
    pub synonyms: Vec<String>,
    /// Column 12, e.g. `protein`
    pub db_object_type: String,
    /// Column 15
    pub assigned_by: String,
    /// Column 16 (GAF 2.x only)
    pub extensions: Option<Extensions>,
    /// Column 17 (GAF 2.x only)
    pub gene_product_form_id: Option<String>,
}

/// Columns of a GPAD line that have no place in the common record
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GpadDetails {
    /// Column 1, e.g. `UniProtKB`
    pub db: String,
    /// Column 5
    pub db_reference: Vec<String>,
    /// Column 6, the ECO term the GO evidence code was derived from
    pub eco_id: String,
    /// Column 7
    pub with_from: Vec<String>,
    /// Column 10
    pub assigned_by: String,
    /// Column 11
    pub extensions: Option<Extensions>,
    /// Column 12, `key=value` pairs
    pub properties: Vec<(String, String)>,
}

/// Columns of a gene2go line that have no place in the common record
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gene2GoDetails {
    /// The name of the GO term
    pub go_term: String,
    /// PubMed ids
    pub pubmed: Vec<String>,
}

/// Format specific payload of an [`Annotation`]
#[derive(Clone, Debug, PartialEq)]
pub enum FormatDetails {
    /// GAF 1.0 / 2.x
    Gaf(GafDetails),
    /// GPAD 1.1
    Gpad(GpadDetails),
    /// NCBI gene2go
    Gene2Go(Gene2GoDetails),
}

/// One annotation of a gene product with a GO term
///
/// All formats produce the same record shape. The fields that only
/// some formats provide are optional, everything else specific to a
/// format lives in [`Annotation::details`].
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    /// The annotated gene or gene product
    pub db_id: DatabaseId,
    /// The GO term, as written in the file (can be an alternate id)
    pub go_id: GoTermId,
    /// Normalized qualifiers, e.g. `not`
    pub qualifiers: Qualifiers,
    /// The evidence code. id2gos files do not carry one.
    pub evidence_code: Option<EvidenceCode>,
    /// The namespace, if the format provides it
    pub namespace: Option<Namespace>,
    /// One or two taxon ids (GAF), the interacting taxon (GPAD) or the
    /// `tax_id` (gene2go). Empty for id2gos.
    pub taxon: Taxa,
    /// Date of the annotation
    pub date: Option<NaiveDate>,
    /// Format specific columns
    pub details: Option<FormatDetails>,
}

impl Annotation {
    /// Constructs a bare annotation with only gene and term
    ///
    /// # Examples
    ///
    /// ```
    /// use goassoc::{Annotation, GoTermId};
    ///
    /// let anno = Annotation::new("geneA", GoTermId::from(8150u32));
    /// assert!(anno.qualifiers.is_empty());
    /// assert!(anno.evidence_code.is_none());
    /// ```
    pub fn new<D: Into<DatabaseId>>(db_id: D, go_id: GoTermId) -> Self {
        Self {
            db_id: db_id.into(),
            go_id,
            qualifiers: Qualifiers::default(),
            evidence_code: None,
            namespace: None,
            taxon: Taxa::new(),
            date: None,
            details: None,
        }
    }

    /// Sets the qualifiers
    #[must_use]
    pub fn with_qualifiers(mut self, qualifiers: Qualifiers) -> Self {
        self.qualifiers = qualifiers;
        self
    }

    /// Sets the evidence code
    #[must_use]
    pub fn with_evidence<E: Into<EvidenceCode>>(mut self, evidence: E) -> Self {
        self.evidence_code = Some(evidence.into());
        self
    }

    /// Sets the namespace
    #[must_use]
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = Some(namespace);
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn qualifiers_are_normalized() {
        let q = Qualifiers::new(["NOT", "not", "Contributes_To", ""]);
        assert_eq!(q.iter().collect::<Vec<_>>(), vec!["contributes_to", "not"]);
        assert!(q.is_not());

        let q = Qualifiers::new(["-"]);
        assert!(q.is_empty());
        assert!(!q.is_not());

        let q = Qualifiers::new(["enables", "bogus"]);
        assert_eq!(q.unexpected().collect::<Vec<_>>(), vec!["bogus"]);
    }

    #[test]
    fn extensions_drop_malformed_fragments() {
        let (ext, dropped) = Extensions::parse("part_of(CL:1),broken|occurs_in(X)");
        let ext = ext.unwrap();
        assert_eq!(dropped, 1);
        assert_eq!(ext.groups().len(), 2);
        assert_eq!(ext.groups()[0][0].entity, "CL:1");
        assert!(ext.has_relation("occurs_in"));

        let (ext, dropped) = Extensions::parse("missing_paren(X");
        assert!(ext.is_none());
        assert_eq!(dropped, 1);

        assert_eq!(Extensions::parse(""), (None, 0));
    }

    #[test]
    fn extension_commas_inside_parens() {
        let (ext, _) = Extensions::parse("has_input(a,b),part_of(c)");
        let ext = ext.unwrap();
        assert_eq!(ext.groups()[0].len(), 2);
        assert_eq!(ext.groups()[0][0].entity, "a,b");
    }

    #[test]
    fn database_ids() {
        assert_eq!(DatabaseId::from("P12345").to_string(), "P12345");
        assert_eq!(DatabaseId::from(7157u32).to_string(), "7157");
        assert_ne!(DatabaseId::from("7157"), DatabaseId::from(7157u32));
    }
}
