use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::annotations::{Annotation, AnnotationOptions, DatabaseId, Direction};
use crate::parser::Annotations;
use crate::term::{GoGroup, GoTermId, Namespace, Relationships};
use crate::{GoError, GoResult, Ontology};

/// gene → set of GO terms
pub type Id2Gos = HashMap<DatabaseId, HashSet<GoTermId>>;

/// GO term → set of genes
pub type Go2Ids = HashMap<GoTermId, HashSet<DatabaseId>>;

/// An association map in either [`Direction`]
#[derive(Clone, Debug, PartialEq)]
pub enum Association {
    /// gene → set of GO terms
    GeneToGo(Id2Gos),
    /// GO term → set of genes
    GoToGene(Go2Ids),
}

impl Association {
    /// Returns the number of keys of the map
    pub fn len(&self) -> usize {
        match self {
            Association::GeneToGo(map) => map.len(),
            Association::GoToGene(map) => map.len(),
        }
    }

    /// Returns `true` if the map is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of (gene, GO term) pairs
    pub fn pair_count(&self) -> usize {
        match self {
            Association::GeneToGo(map) => map.values().map(HashSet::len).sum(),
            Association::GoToGene(map) => map.values().map(HashSet::len).sum(),
        }
    }

    /// Returns the gene → GO map, inverting it if needed
    pub fn into_id2gos(self) -> Id2Gos {
        match self {
            Association::GeneToGo(map) => map,
            Association::GoToGene(map) => invert(&map),
        }
    }
}

/// Inverts an association map
///
/// # Examples
///
/// ```
/// use std::collections::{HashMap, HashSet};
/// use goassoc::annotations::{invert, Id2Gos};
/// use goassoc::{DatabaseId, GoTermId};
///
/// let mut id2gos = Id2Gos::new();
/// id2gos.insert(
///     DatabaseId::from("geneA"),
///     [GoTermId::from(1u32), GoTermId::from(2u32)].into_iter().collect(),
/// );
/// let go2ids = invert(&id2gos);
/// assert_eq!(go2ids.len(), 2);
/// assert!(go2ids[&GoTermId::from(2u32)].contains(&DatabaseId::from("geneA")));
/// ```
pub fn invert<K, V>(map: &HashMap<K, HashSet<V>>) -> HashMap<V, HashSet<K>>
where
    K: Clone + Eq + std::hash::Hash,
    V: Clone + Eq + std::hash::Hash,
{
    let mut res: HashMap<V, HashSet<K>> = HashMap::new();
    for (key, values) in map {
        for value in values {
            res.entry(value.clone()).or_default().insert(key.clone());
        }
    }
    res
}

/// Reduces parsed [`Annotations`] into association maps
///
/// `AnnoReader` works on the uniform [`Annotation`] records and is
/// independent of the file format they were read from. It filters the
/// records through [`AnnotationOptions`], splits them by [`Namespace`]
/// and optionally propagates every annotation to all ancestors of the
/// annotated term.
///
/// Formats without a namespace column (GPAD, id2gos) need the GO DAG,
/// provided with [`AnnoReader::with_godag`], to split by namespace. The
/// DAG is also required for propagation.
///
/// The records are never modified, every call builds a fresh map.
///
/// # Examples
///
/// ```
/// use goassoc::{AnnoReader, AnnotationOptions, Namespace, Ontology};
/// use goassoc::parser::gaf::GafReader;
/// use goassoc::parser::AnnotationSource;
///
/// let data = "!gaf-version: 2.1\n\
///     UniProtKB\tP1\tA\t\tGO:0000001\tPMID:1\tIDA\t\tF\t\t\tprotein\ttaxon:9606\t20200101\tSGD\t\t\n\
///     UniProtKB\tP2\tB\tNOT\tGO:0000001\tPMID:1\tIDA\t\tF\t\t\tprotein\ttaxon:9606\t20200101\tSGD\t\t\n\
///     UniProtKB\tP2\tB\t\tGO:0000002\tPMID:1\tIEA\t\tP\t\t\tprotein\ttaxon:9606\t20200101\tSGD\t\t\n";
/// let annotations = GafReader::default().parse(&mut data.as_bytes(), "memory").unwrap();
///
/// let reader = AnnoReader::new(annotations);
/// let options = AnnotationOptions::default();
///
/// let mf = reader.get_id2gos(Some(Namespace::MF), &options).unwrap();
/// assert_eq!(mf.len(), 1);
///
/// let all = reader.get_id2gos(None, &options).unwrap();
/// assert_eq!(all.len(), 2);
/// ```
#[derive(Debug)]
pub struct AnnoReader<'d> {
    annotations: Annotations,
    godag: Option<&'d Ontology>,
}

impl<'d> AnnoReader<'d> {
    /// Constructs a new `AnnoReader` without a GO DAG
    pub fn new(annotations: Annotations) -> Self {
        Self {
            annotations,
            godag: None,
        }
    }

    /// Attaches the GO DAG used for namespace lookup and propagation
    #[must_use]
    pub fn with_godag(mut self, godag: &'d Ontology) -> Self {
        self.godag = Some(godag);
        self
    }

    /// Returns the parsed annotations
    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// Returns the annotation records
    pub fn records(&self) -> &[Annotation] {
        self.annotations.records()
    }

    /// Returns the GO DAG, if one was attached
    pub fn godag(&self) -> Option<&'d Ontology> {
        self.godag
    }

    /// Returns `true` if every record carries its namespace
    pub fn has_namespaces(&self) -> bool {
        self.records().iter().all(|rec| rec.namespace.is_some())
    }

    /// Returns the namespace of the record
    ///
    /// The namespace column of the record wins, the DAG is only
    /// consulted for records without one.
    pub fn namespace_of(&self, record: &Annotation) -> Option<Namespace> {
        record
            .namespace
            .or_else(|| self.godag.and_then(|dag| dag.namespace(record.go_id)))
    }

    /// Returns the records that pass the filter and belong to `namespace`
    ///
    /// If the records carry no namespace and no DAG is attached, the
    /// namespace restriction is ignored with a warning.
    pub fn reduce(
        &self,
        namespace: Option<Namespace>,
        options: &AnnotationOptions,
    ) -> Vec<&Annotation> {
        let namespace = match namespace {
            Some(ns) if self.godag.is_none() && !self.has_namespaces() => {
                warn!(
                    "{}: records carry no namespace and no GO DAG is loaded, ignoring namespace {ns}",
                    self.annotations.source()
                );
                None
            }
            ns => ns,
        };

        let kept: Vec<&Annotation> = self
            .records()
            .iter()
            .filter(|rec| options.keep_annotation(rec))
            .filter(|rec| namespace.map_or(true, |ns| self.namespace_of(rec) == Some(ns)))
            .collect();
        info!(
            "{}: kept {} of {} annotations",
            self.annotations.source(),
            kept.len(),
            self.records().len()
        );
        kept
    }

    /// Returns the gene → GO map of the filtered records
    ///
    /// # Errors
    ///
    /// [`GoError::MissingGoDag`] if propagation is requested without a DAG
    pub fn get_id2gos(
        &self,
        namespace: Option<Namespace>,
        options: &AnnotationOptions,
    ) -> GoResult<Id2Gos> {
        let records = self.reduce(namespace, options);
        self.get_dbid2goids(&records, options.propagate_counts(), options.relationships())
    }

    /// Returns the GO → gene map of the filtered records
    ///
    /// # Errors
    ///
    /// [`GoError::MissingGoDag`] if propagation is requested without a DAG
    pub fn get_go2ids(
        &self,
        namespace: Option<Namespace>,
        options: &AnnotationOptions,
    ) -> GoResult<Go2Ids> {
        let records = self.reduce(namespace, options);
        self.get_goid2dbids(&records, options.propagate_counts(), options.relationships())
    }

    /// Returns the association in the [`Direction`] of the options
    ///
    /// # Errors
    ///
    /// [`GoError::MissingGoDag`] if propagation is requested without a DAG
    pub fn get_association(
        &self,
        namespace: Option<Namespace>,
        options: &AnnotationOptions,
    ) -> GoResult<Association> {
        match options.direction() {
            Direction::GeneToGo => Ok(Association::GeneToGo(self.get_id2gos(namespace, options)?)),
            Direction::GoToGene => Ok(Association::GoToGene(self.get_go2ids(namespace, options)?)),
        }
    }

    /// Returns one association per namespace
    ///
    /// Every record is assigned to the namespace of its own GO term.
    /// The result always contains all three namespaces.
    ///
    /// # Errors
    ///
    /// - [`GoError::MissingGoDag`] if the records carry no namespace and
    ///   no DAG is attached, or if propagation is requested without a DAG
    pub fn get_ns2assc(
        &self,
        options: &AnnotationOptions,
    ) -> GoResult<HashMap<Namespace, Association>> {
        if self.godag.is_none() && !self.has_namespaces() {
            return Err(GoError::MissingGoDag(format!(
                "split {} by namespace, the records carry no namespace",
                self.annotations.source()
            )));
        }
        let records = self.reduce(None, options);

        let mut buckets: HashMap<Namespace, Vec<&Annotation>> = HashMap::new();
        let mut unplaced = 0usize;
        for record in records {
            match self.namespace_of(record) {
                Some(ns) => buckets.entry(ns).or_default().push(record),
                None => unplaced += 1,
            }
        }
        if unplaced > 0 {
            debug!("{unplaced} annotations have GO ids unknown to the DAG and no namespace");
        }

        let mut res = HashMap::with_capacity(Namespace::ALL.len());
        for ns in Namespace::ALL {
            let records = buckets.remove(&ns).unwrap_or_default();
            let assc = match options.direction() {
                Direction::GeneToGo => Association::GeneToGo(self.get_dbid2goids(
                    &records,
                    options.propagate_counts(),
                    options.relationships(),
                )?),
                Direction::GoToGene => Association::GoToGene(self.get_goid2dbids(
                    &records,
                    options.propagate_counts(),
                    options.relationships(),
                )?),
            };
            res.insert(ns, assc);
        }
        Ok(res)
    }

    /// Folds records into a gene → GO map
    ///
    /// With `propagate_counts` every gene is also associated with all
    /// ancestors of its annotated terms, following `is_a` and the given
    /// `relationships`. Ancestors are looked up once per distinct GO id.
    /// Alternate ids add their main id as well. GO ids unknown to the DAG
    /// are kept without ancestors.
    ///
    /// # Errors
    ///
    /// [`GoError::MissingGoDag`] if `propagate_counts` is set but no DAG
    /// is attached
    pub fn get_dbid2goids(
        &self,
        records: &[&Annotation],
        propagate_counts: bool,
        relationships: &Relationships,
    ) -> GoResult<Id2Gos> {
        let mut id2gos = Id2Gos::new();
        if !propagate_counts {
            for record in records {
                id2gos
                    .entry(record.db_id.clone())
                    .or_default()
                    .insert(record.go_id);
            }
            return Ok(id2gos);
        }

        let godag = self.godag.ok_or_else(|| {
            GoError::MissingGoDag("propagate annotations to ancestor terms".to_string())
        })?;

        let mut go2ancestors: HashMap<GoTermId, GoGroup> = HashMap::new();
        for record in records {
            if !go2ancestors.contains_key(&record.go_id) {
                let ancestors = godag
                    .ancestors(record.go_id, relationships)
                    .unwrap_or_default();
                go2ancestors.insert(record.go_id, ancestors);
            }
        }
        debug!("Looked up ancestors of {} GO ids", go2ancestors.len());

        for record in records {
            let gos = id2gos.entry(record.db_id.clone()).or_default();
            gos.insert(record.go_id);
            if let Some(main_id) = godag.main_id(record.go_id) {
                gos.insert(main_id);
            }
            if let Some(ancestors) = go2ancestors.get(&record.go_id) {
                gos.extend(ancestors);
            }
        }
        Ok(id2gos)
    }

    /// Folds records into a GO → gene map
    ///
    /// # Errors
    ///
    /// [`GoError::MissingGoDag`] if `propagate_counts` is set but no DAG
    /// is attached
    pub fn get_goid2dbids(
        &self,
        records: &[&Annotation],
        propagate_counts: bool,
        relationships: &Relationships,
    ) -> GoResult<Go2Ids> {
        let id2gos = self.get_dbid2goids(records, propagate_counts, relationships)?;
        Ok(invert(&id2gos))
    }
}
