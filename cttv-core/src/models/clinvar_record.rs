use serde::Deserialize;
use serde_json::Value;

use crate::errors::RecordError;
use crate::utils::europepmc_url;

// The structs below mirror the subset of the Cellbase ClinVar document
// that evidence generation reads. Unknown fields are ignored.

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CellbaseDocument {
    #[serde(default)]
    reference: String,
    #[serde(default)]
    alternate: String,
    clinvar_set: ClinvarSet,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ClinvarSet {
    reference_clin_var_assertion: ReferenceAssertion,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ReferenceAssertion {
    clin_var_accession: Accession,
    clinical_significance: ClinicalSignificance,
    #[serde(default)]
    date_last_updated: Option<i64>,
    #[serde(default)]
    observed_in: Vec<ObservedIn>,
    #[serde(default)]
    measure_set: Option<MeasureSet>,
    #[serde(default)]
    trait_set: Option<TraitSet>,
}

#[derive(Deserialize, Debug)]
struct Accession {
    acc: String,
}

#[derive(Deserialize, Debug)]
struct ClinicalSignificance {
    #[serde(default)]
    description: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ObservedIn {
    sample: Sample,
    #[serde(default)]
    observed_data: Vec<ObservedData>,
}

#[derive(Deserialize, Debug)]
struct Sample {
    #[serde(default)]
    origin: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ObservedData {
    #[serde(default)]
    citation: Vec<Citation>,
}

#[derive(Deserialize, Debug)]
struct MeasureSet {
    #[serde(default)]
    measure: Vec<Measure>,
}

#[derive(Deserialize, Debug)]
struct Measure {
    #[serde(default)]
    citation: Vec<Citation>,
}

#[derive(Deserialize, Debug)]
struct TraitSet {
    #[serde(default, rename = "trait")]
    traits: Vec<Trait>,
}

#[derive(Deserialize, Debug)]
struct Trait {
    #[serde(default)]
    name: Vec<TraitName>,
    #[serde(default)]
    citation: Vec<Citation>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct TraitName {
    element_value: ElementValue,
}

#[derive(Deserialize, Debug)]
struct ElementValue {
    #[serde(rename = "type", default)]
    kind: String,
    value: String,
}

#[derive(Deserialize, Debug)]
struct Citation {
    #[serde(default)]
    id: Vec<CitationId>,
}

#[derive(Deserialize, Debug)]
struct CitationId {
    #[serde(default)]
    source: String,
    value: String,
}

fn pubmed_ids(citations: &[Citation]) -> Vec<String> {
    citations
        .iter()
        .flat_map(|c| c.id.iter())
        .filter(|id| id.source.eq_ignore_ascii_case("pubmed"))
        .map(|id| id.value.clone())
        .collect()
}

///
/// A single ClinVar record, flattened out of its Cellbase document.
///
/// Records are read once from the record source, inspected, and dropped;
/// nothing downstream mutates them.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ClinvarRecord {
    pub accession: String,
    /// As written in ClinVar, e.g. "Pathogenic".
    pub clinical_significance: String,
    pub reference: String,
    pub alternate: String,
    /// One list per trait, the preferred name first.
    pub traits: Vec<Vec<String>>,
    /// PubMed ids per trait, parallel to `traits`.
    pub trait_pubmed_refs: Vec<Vec<String>>,
    pub observed_pubmed_refs: Vec<String>,
    pub measure_set_pubmed_refs: Vec<String>,
    /// Distinct origins in first-seen order, case preserved.
    pub allele_origins: Vec<String>,
    /// Milliseconds since the epoch.
    pub date_last_updated: Option<i64>,
}

impl TryFrom<&Value> for ClinvarRecord {
    type Error = RecordError;

    ///
    /// Create a new [ClinvarRecord] from a Cellbase ClinVar document.
    ///
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let document = CellbaseDocument::deserialize(value)
            .map_err(|e| RecordError::MalformedRecord(e.to_string()))?;
        ClinvarRecord::from_document(document)
    }
}

impl TryFrom<&str> for ClinvarRecord {
    type Error = RecordError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value: Value = serde_json::from_str(value)?;
        ClinvarRecord::try_from(&value)
    }
}

impl ClinvarRecord {
    fn from_document(document: CellbaseDocument) -> Result<Self, RecordError> {
        let assertion = document.clinvar_set.reference_clin_var_assertion;

        let accession = assertion.clin_var_accession.acc;
        if accession.is_empty() {
            return Err(RecordError::MissingAccession);
        }

        let mut traits = Vec::new();
        let mut trait_pubmed_refs = Vec::new();
        for clinvar_trait in assertion.trait_set.map(|t| t.traits).unwrap_or_default() {
            // preferred names lead, everything else keeps document order
            let (preferred, others): (Vec<&TraitName>, Vec<&TraitName>) = clinvar_trait
                .name
                .iter()
                .partition(|n| n.element_value.kind == "Preferred");
            let names: Vec<String> = preferred
                .into_iter()
                .chain(others)
                .map(|n| n.element_value.value.clone())
                .collect();

            if names.is_empty() {
                continue;
            }
            traits.push(names);
            trait_pubmed_refs.push(pubmed_ids(&clinvar_trait.citation));
        }

        let mut allele_origins: Vec<String> = Vec::new();
        let mut observed_pubmed_refs = Vec::new();
        for observation in &assertion.observed_in {
            if let Some(origin) = &observation.sample.origin {
                if !allele_origins.contains(origin) {
                    allele_origins.push(origin.clone());
                }
            }
            for data in &observation.observed_data {
                observed_pubmed_refs.extend(pubmed_ids(&data.citation));
            }
        }

        let measure_set_pubmed_refs = assertion
            .measure_set
            .map(|m| {
                m.measure
                    .iter()
                    .flat_map(|measure| pubmed_ids(&measure.citation))
                    .collect()
            })
            .unwrap_or_default();

        Ok(ClinvarRecord {
            accession,
            clinical_significance: assertion.clinical_significance.description,
            reference: document.reference,
            alternate: document.alternate,
            traits,
            trait_pubmed_refs,
            observed_pubmed_refs,
            measure_set_pubmed_refs,
            allele_origins,
            date_last_updated: assertion.date_last_updated,
        })
    }

    /// Clinical significance, lower-cased for allow-list comparison.
    pub fn clin_sig(&self) -> String {
        self.clinical_significance.to_lowercase()
    }

    pub fn has_same_ref_alt(&self) -> bool {
        self.reference == self.alternate
    }

    /// Europe PMC URLs for the references of each trait.
    pub fn trait_refs(&self) -> Vec<Vec<String>> {
        self.trait_pubmed_refs
            .iter()
            .map(|refs| refs.iter().map(|r| europepmc_url(r)).collect())
            .collect()
    }

    pub fn observed_refs(&self) -> Vec<String> {
        self.observed_pubmed_refs
            .iter()
            .map(|r| europepmc_url(r))
            .collect()
    }

    pub fn measure_set_refs(&self) -> Vec<String> {
        self.measure_set_pubmed_refs
            .iter()
            .map(|r| europepmc_url(r))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;

    #[fixture]
    fn cellbase_document() -> Value {
        json!({
            "reference": "C",
            "alternate": "T",
            "clinvarSet": {
                "referenceClinVarAssertion": {
                    "clinVarAccession": {"acc": "RCV000128628"},
                    "clinicalSignificance": {"description": "Pathogenic"},
                    "dateLastUpdated": 1_420_070_400_000_i64,
                    "observedIn": [
                        {
                            "sample": {"origin": "germline"},
                            "observedData": [
                                {"citation": [{"id": [{"source": "PubMed", "value": "111"}]}]}
                            ]
                        },
                        {"sample": {"origin": "germline"}},
                        {"sample": {"origin": "somatic"}}
                    ],
                    "measureSet": {
                        "measure": [
                            {"citation": [{"id": [{"source": "PubMed", "value": "222"}, {"source": "pmc", "value": "PMC1"}]}]}
                        ]
                    },
                    "traitSet": {
                        "trait": [
                            {
                                "name": [
                                    {"elementValue": {"type": "Alternate", "value": "LFS"}},
                                    {"elementValue": {"type": "Preferred", "value": "Li-Fraumeni syndrome"}}
                                ],
                                "citation": [{"id": [{"source": "PubMed", "value": "333"}]}]
                            },
                            {"name": []}
                        ]
                    }
                }
            }
        })
    }

    #[rstest]
    fn test_record_from_cellbase_document(cellbase_document: Value) {
        let record = ClinvarRecord::try_from(&cellbase_document).unwrap();

        assert_eq!(record.accession, "RCV000128628");
        assert_eq!(record.clin_sig(), "pathogenic");
        assert_eq!(record.reference, "C");
        assert_eq!(record.alternate, "T");
        assert_eq!(record.date_last_updated, Some(1_420_070_400_000));
    }

    #[rstest]
    fn test_preferred_name_comes_first(cellbase_document: Value) {
        let record = ClinvarRecord::try_from(&cellbase_document).unwrap();

        // the nameless trait is dropped
        assert_eq!(record.traits.len(), 1);
        assert_eq!(record.traits[0], vec!["Li-Fraumeni syndrome", "LFS"]);
    }

    #[rstest]
    fn test_allele_origins_are_distinct(cellbase_document: Value) {
        let record = ClinvarRecord::try_from(&cellbase_document).unwrap();
        assert_eq!(record.allele_origins, vec!["germline", "somatic"]);
    }

    #[rstest]
    fn test_only_pubmed_citations_become_refs(cellbase_document: Value) {
        let record = ClinvarRecord::try_from(&cellbase_document).unwrap();

        assert_eq!(
            record.trait_refs(),
            vec![vec!["http://europepmc.org/abstract/MED/333".to_string()]]
        );
        assert_eq!(
            record.observed_refs(),
            vec!["http://europepmc.org/abstract/MED/111"]
        );
        assert_eq!(
            record.measure_set_refs(),
            vec!["http://europepmc.org/abstract/MED/222"]
        );
    }

    #[rstest]
    fn test_same_ref_alt() {
        let raw = r#"{"reference": "A", "alternate": "A", "clinvarSet": {"referenceClinVarAssertion": {"clinVarAccession": {"acc": "RCV1"}, "clinicalSignificance": {"description": "benign"}}}}"#;
        let record = ClinvarRecord::try_from(raw).unwrap();

        assert_eq!(record.has_same_ref_alt(), true);
        assert_eq!(record.traits.is_empty(), true);
        assert_eq!(record.allele_origins.is_empty(), true);
    }

    #[rstest]
    fn test_malformed_document_is_rejected() {
        let result = ClinvarRecord::try_from(&json!({"reference": "A"}));
        assert_eq!(
            matches!(result, Err(RecordError::MalformedRecord(_))),
            true
        );
    }
}
