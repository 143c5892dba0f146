//! Registry of GO evidence codes
//!
//! Every annotation states how it was inferred with a short evidence code
//! such as `IDA` or `IEA`. The codes are organised in groups (e.g.
//! `Experimental`), and filters can be given as a mix of codes and group
//! names. The registry is a static table and never changes at runtime.
//!
//! # Examples
//!
//! ```
//! use goassoc::evidence::{expand, EvidenceGroup};
//! use goassoc::EvidenceCode;
//!
//! let ida = EvidenceCode::new("IDA");
//! assert_eq!(ida.group(), Some(EvidenceGroup::Experimental));
//!
//! let codes = expand(["Author", "IEA"]).unwrap();
//! assert_eq!(codes.len(), 3);
//! assert!(codes.contains(&EvidenceCode::new("TAS")));
//! ```
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt::Display;
use std::str::FromStr;

use crate::{GoError, GoResult};

/// The groups of the evidence codes
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum EvidenceGroup {
    /// Direct experimental evidence, e.g. `IDA`
    Experimental,
    /// Phylogenetic and sequence similarity, e.g. `ISS`
    Similarity,
    /// `RCA`
    Combinatorial,
    /// High throughput experiments, e.g. `HDA`
    HighThroughput,
    /// Author statements, `TAS` and `NAS`
    Author,
    /// `IC`
    Curatorial,
    /// `ND`
    NoBiologicalData,
    /// `IEA`
    Automatic,
}

impl EvidenceGroup {
    /// All groups, in registry order
    pub const ALL: [EvidenceGroup; 8] = [
        EvidenceGroup::Experimental,
        EvidenceGroup::Similarity,
        EvidenceGroup::Combinatorial,
        EvidenceGroup::HighThroughput,
        EvidenceGroup::Author,
        EvidenceGroup::Curatorial,
        EvidenceGroup::NoBiologicalData,
        EvidenceGroup::Automatic,
    ];

    /// Returns the name of the group as used in filter lists
    pub fn name(&self) -> &'static str {
        match self {
            EvidenceGroup::Experimental => "Experimental",
            EvidenceGroup::Similarity => "Similarity",
            EvidenceGroup::Combinatorial => "Combinatorial",
            EvidenceGroup::HighThroughput => "High_Throughput",
            EvidenceGroup::Author => "Author",
            EvidenceGroup::Curatorial => "Curatorial",
            EvidenceGroup::NoBiologicalData => "No biological data",
            EvidenceGroup::Automatic => "Automatic",
        }
    }

    /// Returns an iterator of the evidence codes of the group
    pub fn codes(&self) -> impl Iterator<Item = EvidenceCode> + '_ {
        EVIDENCE_CODES
            .iter()
            .filter(move |info| info.group == *self)
            .map(|info| EvidenceCode::from_static(info.code))
    }
}

impl Display for EvidenceGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EvidenceGroup {
    type Err = GoError;
    /// Parses a group name
    ///
    /// Matching ignores case and treats `_`, `-` and spaces the same,
    /// so `High_Throughput` and `high throughput` are both accepted.
    fn from_str(s: &str) -> GoResult<Self> {
        let normalize = |name: &str| -> String {
            name.chars()
                .map(|c| match c {
                    '_' | '-' => ' ',
                    c => c.to_ascii_lowercase(),
                })
                .collect()
        };
        let wanted = normalize(s);
        EvidenceGroup::ALL
            .into_iter()
            .find(|group| normalize(group.name()) == wanted)
            .ok_or_else(|| GoError::InvalidInput(format!("unknown evidence group {s}")))
    }
}

/// Static information about one evidence code
#[derive(Debug)]
pub struct EvidenceInfo {
    /// The code, e.g. `IDA`
    pub code: &'static str,
    /// The group of the code
    pub group: EvidenceGroup,
    /// The descriptive name, e.g. `Inferred from Direct Assay`
    pub name: &'static str,
}

const fn info(code: &'static str, group: EvidenceGroup, name: &'static str) -> EvidenceInfo {
    EvidenceInfo { code, group, name }
}

/// All known GO evidence codes
pub static EVIDENCE_CODES: [EvidenceInfo; 27] = [
    info("EXP", EvidenceGroup::Experimental, "Inferred from Experiment"),
    info("IDA", EvidenceGroup::Experimental, "Inferred from Direct Assay"),
    info("IPI", EvidenceGroup::Experimental, "Inferred from Physical Interaction"),
    info("IMP", EvidenceGroup::Experimental, "Inferred from Mutant Phenotype"),
    info("IGI", EvidenceGroup::Experimental, "Inferred from Genetic Interaction"),
    info("IEP", EvidenceGroup::Experimental, "Inferred from Expression Pattern"),
    info("ISS", EvidenceGroup::Similarity, "Inferred from Sequence or structural Similarity"),
    info("ISO", EvidenceGroup::Similarity, "Inferred from Sequence Orthology"),
    info("ISA", EvidenceGroup::Similarity, "Inferred from Sequence Alignment"),
    info("ISM", EvidenceGroup::Similarity, "Inferred from Sequence Model"),
    info("IGC", EvidenceGroup::Similarity, "Inferred from Genomic Context"),
    info("IBA", EvidenceGroup::Similarity, "Inferred from Biological aspect of Ancestor"),
    info("IBD", EvidenceGroup::Similarity, "Inferred from Biological aspect of Descendant"),
    info("IKR", EvidenceGroup::Similarity, "Inferred from Key Residues"),
    info("IRD", EvidenceGroup::Similarity, "Inferred from Rapid Divergence"),
    info("IMR", EvidenceGroup::Similarity, "Inferred from Missing Residues"),
    info("RCA", EvidenceGroup::Combinatorial, "Inferred from Reviewed Computational Analysis"),
    info("HTP", EvidenceGroup::HighThroughput, "Inferred from High Throughput Experiment"),
    info("HDA", EvidenceGroup::HighThroughput, "Inferred from High Throughput Direct Assay"),
    info("HMP", EvidenceGroup::HighThroughput, "Inferred from High Throughput Mutant Phenotype"),
    info("HGI", EvidenceGroup::HighThroughput, "Inferred from High Throughput Genetic Interaction"),
    info("HEP", EvidenceGroup::HighThroughput, "Inferred from High Throughput Expression Pattern"),
    info("TAS", EvidenceGroup::Author, "Traceable Author Statement"),
    info("NAS", EvidenceGroup::Author, "Non-traceable Author Statement"),
    info("IC", EvidenceGroup::Curatorial, "Inferred by Curator"),
    info("ND", EvidenceGroup::NoBiologicalData, "No biological Data available"),
    info("IEA", EvidenceGroup::Automatic, "Inferred from Electronic Annotation"),
];

/// ECO terms used in GPAD files and the GO evidence code they stand for
static ECO_TO_GO: [(&str, &str); 28] = [
    ("ECO:0000269", "EXP"),
    ("ECO:0000314", "IDA"),
    ("ECO:0000353", "IPI"),
    ("ECO:0000315", "IMP"),
    ("ECO:0000316", "IGI"),
    ("ECO:0000270", "IEP"),
    ("ECO:0000250", "ISS"),
    ("ECO:0000266", "ISO"),
    ("ECO:0000247", "ISA"),
    ("ECO:0000255", "ISM"),
    ("ECO:0000317", "IGC"),
    ("ECO:0000318", "IBA"),
    ("ECO:0000319", "IBD"),
    ("ECO:0000320", "IKR"),
    ("ECO:0000321", "IRD"),
    ("ECO:0000245", "RCA"),
    ("ECO:0000304", "TAS"),
    ("ECO:0000303", "NAS"),
    ("ECO:0000305", "IC"),
    ("ECO:0000307", "ND"),
    ("ECO:0000501", "IEA"),
    ("ECO:0000256", "IEA"),
    ("ECO:0000265", "IEA"),
    ("ECO:0007005", "HDA"),
    ("ECO:0006056", "HTP"),
    ("ECO:0007001", "HMP"),
    ("ECO:0007003", "HGI"),
    ("ECO:0007007", "HEP"),
];

/// Looks up the registry entry of a code
pub fn lookup(code: &str) -> Option<&'static EvidenceInfo> {
    EVIDENCE_CODES.iter().find(|info| info.code == code)
}

/// Returns the GO evidence code of an ECO term, e.g. `ECO:0000314` -> `IDA`
pub fn eco_to_go(eco: &str) -> Option<EvidenceCode> {
    ECO_TO_GO
        .iter()
        .find(|(eco_id, _)| *eco_id == eco)
        .map(|(_, code)| EvidenceCode::new(code))
}

/// An evidence code of an annotation
///
/// Codes from the registry are stored without allocation. Codes that
/// are not in the registry (e.g. an unmapped ECO term from GPAD) are
/// kept verbatim, [`EvidenceCode::is_known`] returns `false` for them.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EvidenceCode {
    code: Cow<'static, str>,
}

impl EvidenceCode {
    /// Constructs an [`EvidenceCode`]
    pub fn new(code: &str) -> Self {
        match lookup(code) {
            Some(info) => Self::from_static(info.code),
            None => Self {
                code: Cow::Owned(code.to_string()),
            },
        }
    }

    const fn from_static(code: &'static str) -> Self {
        Self {
            code: Cow::Borrowed(code),
        }
    }

    /// The code for "No biological Data available"
    pub const ND: EvidenceCode = EvidenceCode::from_static("ND");

    /// Returns the code as string
    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// Returns `true` if the code is part of the registry
    pub fn is_known(&self) -> bool {
        lookup(&self.code).is_some()
    }

    /// Returns the [`EvidenceGroup`] of a known code
    pub fn group(&self) -> Option<EvidenceGroup> {
        lookup(&self.code).map(|info| info.group)
    }

    /// Returns the descriptive name of a known code
    pub fn name(&self) -> Option<&'static str> {
        lookup(&self.code).map(|info| info.name)
    }

    /// Returns `true` for `ND`, "No biological Data available"
    pub fn is_nd(&self) -> bool {
        *self == Self::ND
    }
}

impl Display for EvidenceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

impl From<&str> for EvidenceCode {
    fn from(code: &str) -> Self {
        EvidenceCode::new(code)
    }
}

/// Returns all evidence codes of the registry
pub fn all_codes() -> HashSet<EvidenceCode> {
    EVIDENCE_CODES
        .iter()
        .map(|info| EvidenceCode::from_static(info.code))
        .collect()
}

/// Expands a list of evidence codes and group names into evidence codes
///
/// # Errors
///
/// [`GoError::InvalidInput`] if an entry is neither a known code nor
/// a group name
pub fn expand<I, S>(items: I) -> GoResult<HashSet<EvidenceCode>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut res = HashSet::new();
    for item in items {
        let item = item.as_ref();
        if let Some(info) = lookup(item) {
            res.insert(EvidenceCode::from_static(info.code));
        } else {
            let group = EvidenceGroup::from_str(item).map_err(|_| {
                GoError::InvalidInput(format!("unknown evidence code or group {item}"))
            })?;
            res.extend(group.codes());
        }
    }
    Ok(res)
}

/// Calculates the evidence codes a filter accepts
///
/// Returns `None` if neither an include nor an exclude set is given,
/// meaning that every code is accepted. Otherwise the result is the
/// include set (or every known code) minus the exclude set. A code in
/// both sets is excluded.
pub fn effective_set(
    include: Option<&HashSet<EvidenceCode>>,
    exclude: Option<&HashSet<EvidenceCode>>,
) -> Option<HashSet<EvidenceCode>> {
    if include.is_none() && exclude.is_none() {
        return None;
    }
    let mut accepted = match include {
        Some(codes) => codes.clone(),
        None => all_codes(),
    };
    if let Some(exclude) = exclude {
        accepted.retain(|code| !exclude.contains(code));
    }
    Some(accepted)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn registry_is_consistent() {
        let total: usize = EvidenceGroup::ALL.iter().map(|g| g.codes().count()).sum();
        assert_eq!(total, EVIDENCE_CODES.len());
        assert_eq!(all_codes().len(), EVIDENCE_CODES.len());
        for (_, code) in ECO_TO_GO {
            assert!(lookup(code).is_some(), "{code} missing from registry");
        }
    }

    #[test]
    fn known_and_unknown_codes() {
        let code = EvidenceCode::new("IMP");
        assert!(code.is_known());
        assert_eq!(code.name(), Some("Inferred from Mutant Phenotype"));

        let code = EvidenceCode::new("ECO:9999999");
        assert!(!code.is_known());
        assert_eq!(code.group(), None);
        assert_eq!(code.as_str(), "ECO:9999999");

        assert!(EvidenceCode::new("ND").is_nd());
        assert!(!EvidenceCode::new("IDA").is_nd());
    }

    #[test]
    fn group_names_parse() {
        assert_eq!(
            "High_Throughput".parse::<EvidenceGroup>().unwrap(),
            EvidenceGroup::HighThroughput
        );
        assert_eq!(
            "no biological data".parse::<EvidenceGroup>().unwrap(),
            EvidenceGroup::NoBiologicalData
        );
        assert!("Guesswork".parse::<EvidenceGroup>().is_err());
    }

    #[test]
    fn expand_groups() {
        let codes = expand(["Experimental"]).unwrap();
        assert_eq!(codes.len(), 6);
        assert!(codes.contains(&EvidenceCode::new("IEP")));

        let codes = expand(["Experimental", "IDA", "RCA"]).unwrap();
        assert_eq!(codes.len(), 7);

        assert!(expand(["XYZ"]).is_err());
    }

    #[test]
    fn exclude_wins() {
        let include = expand(["Experimental"]).unwrap();
        let exclude = expand(["IDA"]).unwrap();
        let accepted = effective_set(Some(&include), Some(&exclude)).unwrap();
        assert_eq!(accepted.len(), 5);
        assert!(!accepted.contains(&EvidenceCode::new("IDA")));

        let accepted = effective_set(None, Some(&exclude)).unwrap();
        assert_eq!(accepted.len(), EVIDENCE_CODES.len() - 1);

        assert!(effective_set(None, None).is_none());
    }

    #[test]
    fn eco_mapping() {
        assert_eq!(eco_to_go("ECO:0000314"), Some(EvidenceCode::new("IDA")));
        assert_eq!(eco_to_go("ECO:0000256"), Some(EvidenceCode::new("IEA")));
        assert_eq!(eco_to_go("ECO:0000001"), None);
    }
}
