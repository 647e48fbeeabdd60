//! Evidence strings: one schema-valid JSON object per accepted
//! variant / trait / gene / allele origin combination.
//!
//! Germline and somatic evidence share target, disease, literature and
//! provenance, and differ in the shape of their evidence chain. Both are
//! built by [`Evidence::new`] from the same [`EvidenceInputs`].

use chrono::{DateTime, SecondsFormat};
use serde::Serialize;

use cttv_core::models::{AlleleOrigin, SoTerm};
use cttv_core::utils::{dbsnp_uri, ensembl_gene_uri};

use crate::consts::*;

/// Identity of an evidence unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EvidenceKey {
    pub accession: String,
    pub ensembl_gene_id: String,
    pub trait_index: usize,
    pub allele_origin: AlleleOrigin,
}

///
/// Everything needed to build one evidence unit, whatever its origin.
///
#[derive(Debug, Clone)]
pub struct EvidenceInputs<'a> {
    pub accession: &'a str,
    pub ensembl_gene_id: &'a str,
    pub trait_index: usize,
    pub rs_id: &'a str,
    pub clinical_significance: &'a str,
    pub efo_terms: &'a [String],
    pub so_term: &'a SoTerm,
    pub provenance: Provenance,
}

///
/// Provenance shared by every chain of an evidence unit.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Provenance {
    /// `http://identifiers.org/clinvar.record/<RCV>`
    pub db_xref_url: String,
    /// `http://www.ncbi.nlm.nih.gov/clinvar/<RCV>`
    pub record_url: String,
    /// Europe PMC URLs, de-duplicated.
    pub literature: Vec<String>,
    /// RFC 3339 timestamp of the last ClinVar update.
    pub date_asserted: Option<String>,
}

impl Provenance {
    pub fn new(
        db_xref_url: String,
        record_url: String,
        literature: Vec<String>,
        date_last_updated: Option<i64>,
    ) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(literature.len());
        for lit in literature {
            if !unique.contains(&lit) {
                unique.push(lit);
            }
        }

        Provenance {
            db_xref_url,
            record_url,
            literature: unique,
            date_asserted: date_last_updated.and_then(format_timestamp),
        }
    }
}

fn format_timestamp(millis: i64) -> Option<String> {
    DateTime::from_timestamp_millis(millis).map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Target activity implied by a clinical significance.
pub fn activity_for(clinical_significance: &str) -> String {
    let activity = match clinical_significance {
        "pathogenic" | "likely pathogenic" => "predicted_damaging",
        "benign" | "likely benign" | "protective" => "predicted_tolerated",
        _ => "unknown",
    };
    format!("{}{}", ACTIVITY_PREFIX, activity)
}

// Shared JSON blocks

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UniqueAssociationFields {
    #[serde(rename = "clinvarAccession")]
    pub clinvar_accession: String,
    pub gene: String,
    #[serde(rename = "alleleOrigin")]
    pub allele_origin: String,
    pub phenotype: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Target {
    pub id: String,
    pub target_type: String,
    pub activity: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Variant {
    pub id: String,
    #[serde(rename = "type")]
    pub variant_type: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Disease {
    pub id: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LiteratureRef {
    pub lit_id: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Literature {
    pub references: Vec<LiteratureRef>,
}

impl Literature {
    fn from_urls(urls: &[String]) -> Option<Self> {
        if urls.is_empty() {
            return None;
        }
        Some(Literature {
            references: urls
                .iter()
                .map(|url| LiteratureRef {
                    lit_id: url.clone(),
                })
                .collect(),
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DbXref {
    pub id: String,
    pub url: String,
    pub version: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Database {
    pub id: String,
    pub version: String,
    pub dbxref: DbXref,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Expert {
    pub status: bool,
    pub statement: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProvenanceType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expert: Option<Expert>,
    pub database: Database,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literature: Option<Literature>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LinkOut {
    pub nice_name: String,
    pub url: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ScoreMethod {
    pub description: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ResourceScore {
    #[serde(rename = "type")]
    pub score_type: String,
    pub method: ScoreMethod,
    pub value: f64,
}

// Germline evidence

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GeneToVariant {
    pub is_associated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_asserted: Option<String>,
    pub provenance_type: ProvenanceType,
    pub evidence_codes: Vec<String>,
    pub functional_consequence: String,
    pub urls: Vec<LinkOut>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct VariantToDisease {
    pub unique_experiment_reference: String,
    pub is_associated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_asserted: Option<String>,
    pub resource_score: ResourceScore,
    pub provenance_type: ProvenanceType,
    pub evidence_codes: Vec<String>,
    pub urls: Vec<LinkOut>,
    pub clinical_significance: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GeneticsChains {
    pub gene2variant: GeneToVariant,
    pub variant2disease: VariantToDisease,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GeneticsEvidence {
    #[serde(skip)]
    pub key: EvidenceKey,
    #[serde(rename = "sourceID")]
    pub source_id: String,
    #[serde(rename = "type")]
    pub evidence_type: String,
    pub access_level: String,
    pub validated_against_schema_version: String,
    pub unique_association_fields: UniqueAssociationFields,
    pub target: Target,
    pub variant: Variant,
    pub disease: Disease,
    pub evidence: GeneticsChains,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literature: Option<Literature>,
}

// Somatic evidence

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct KnownMutation {
    pub functional_consequence: String,
    pub preferred_name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SomaticChain {
    pub is_associated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_asserted: Option<String>,
    pub resource_score: ResourceScore,
    pub provenance_type: ProvenanceType,
    pub evidence_codes: Vec<String>,
    pub urls: Vec<LinkOut>,
    pub known_mutations: Vec<KnownMutation>,
    pub clinical_significance: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SomaticEvidence {
    #[serde(skip)]
    pub key: EvidenceKey,
    #[serde(rename = "sourceID")]
    pub source_id: String,
    #[serde(rename = "type")]
    pub evidence_type: String,
    pub access_level: String,
    pub validated_against_schema_version: String,
    pub unique_association_fields: UniqueAssociationFields,
    pub target: Target,
    pub disease: Disease,
    pub evidence: SomaticChain,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literature: Option<Literature>,
}

///
/// A single evidence unit. Serializes to the evidence JSON object without
/// any extra tagging.
///
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Evidence {
    Genetics(GeneticsEvidence),
    Somatic(SomaticEvidence),
}

fn database(db_xref_url: &str) -> Database {
    Database {
        id: DATABASE_ID.to_string(),
        version: DATABASE_VERSION.to_string(),
        dbxref: DbXref {
            id: DBXREF_ID.to_string(),
            url: db_xref_url.to_string(),
            version: DBXREF_VERSION.to_string(),
        },
    }
}

fn clinvar_link(record_url: &str) -> Vec<LinkOut> {
    vec![LinkOut {
        nice_name: CLINVAR_NICE_NAME.to_string(),
        url: record_url.to_string(),
    }]
}

fn resource_score(score_type: &str, value: f64) -> ResourceScore {
    ResourceScore {
        score_type: score_type.to_string(),
        method: ScoreMethod {
            description: RESOURCE_SCORE_DESCRIPTION.to_string(),
        },
        value,
    }
}

impl Evidence {
    ///
    /// Build the evidence unit for one allele origin.
    ///
    /// # Arguments
    ///
    /// - origin: decides between the germline and somatic shape
    /// - inputs: record, gene, trait and provenance details
    ///
    pub fn new(origin: AlleleOrigin, inputs: &EvidenceInputs) -> Self {
        match origin {
            AlleleOrigin::Germline => Evidence::Genetics(build_genetics(inputs)),
            AlleleOrigin::Somatic => Evidence::Somatic(build_somatic(inputs)),
        }
    }

    pub fn key(&self) -> &EvidenceKey {
        match self {
            Evidence::Genetics(e) => &e.key,
            Evidence::Somatic(e) => &e.key,
        }
    }

    pub fn accession(&self) -> &str {
        &self.key().accession
    }

    pub fn allele_origin(&self) -> AlleleOrigin {
        self.key().allele_origin
    }

    pub fn efo_terms(&self) -> &[String] {
        match self {
            Evidence::Genetics(e) => &e.disease.id,
            Evidence::Somatic(e) => &e.disease.id,
        }
    }

    pub fn target_id(&self) -> &str {
        match self {
            Evidence::Genetics(e) => &e.target.id,
            Evidence::Somatic(e) => &e.target.id,
        }
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn shared_parts(
    inputs: &EvidenceInputs,
    origin: AlleleOrigin,
) -> (EvidenceKey, UniqueAssociationFields, Target, Disease) {
    let key = EvidenceKey {
        accession: inputs.accession.to_string(),
        ensembl_gene_id: inputs.ensembl_gene_id.to_string(),
        trait_index: inputs.trait_index,
        allele_origin: origin,
    };
    let unique_association_fields = UniqueAssociationFields {
        clinvar_accession: inputs.accession.to_string(),
        gene: inputs.ensembl_gene_id.to_string(),
        allele_origin: origin.to_string(),
        phenotype: inputs.efo_terms.first().cloned().unwrap_or_default(),
    };
    let target = Target {
        id: ensembl_gene_uri(inputs.ensembl_gene_id),
        target_type: TARGET_TYPE.to_string(),
        activity: activity_for(inputs.clinical_significance),
    };
    let disease = Disease {
        id: inputs.efo_terms.to_vec(),
    };

    (key, unique_association_fields, target, disease)
}

fn build_genetics(inputs: &EvidenceInputs) -> GeneticsEvidence {
    let (key, unique_association_fields, target, disease) =
        shared_parts(inputs, AlleleOrigin::Germline);
    let provenance = &inputs.provenance;
    let literature = Literature::from_urls(&provenance.literature);

    let unique_experiment_reference = provenance
        .literature
        .first()
        .cloned()
        .unwrap_or_else(|| provenance.record_url.clone());

    let gene2variant = GeneToVariant {
        is_associated: true,
        date_asserted: provenance.date_asserted.clone(),
        provenance_type: ProvenanceType {
            expert: Some(Expert {
                status: true,
                statement: EXPERT_STATEMENT.to_string(),
            }),
            database: database(&provenance.db_xref_url),
            literature: None,
        },
        evidence_codes: vec![GENE_TO_VARIANT_EVIDENCE_CODE.to_string()],
        functional_consequence: inputs.so_term.url(),
        urls: clinvar_link(&provenance.record_url),
    };

    let variant2disease = VariantToDisease {
        unique_experiment_reference,
        is_associated: true,
        date_asserted: provenance.date_asserted.clone(),
        resource_score: resource_score("pvalue", GENETICS_PVALUE),
        provenance_type: ProvenanceType {
            expert: Some(Expert {
                status: true,
                statement: EXPERT_STATEMENT.to_string(),
            }),
            database: database(&provenance.db_xref_url),
            literature: literature.clone(),
        },
        evidence_codes: vec![VARIANT_TO_DISEASE_EVIDENCE_CODE.to_string()],
        urls: clinvar_link(&provenance.record_url),
        clinical_significance: inputs.clinical_significance.to_string(),
    };

    GeneticsEvidence {
        key,
        source_id: GENETICS_SOURCE_ID.to_string(),
        evidence_type: GENETICS_TYPE.to_string(),
        access_level: ACCESS_LEVEL.to_string(),
        validated_against_schema_version: SCHEMA_VERSION.to_string(),
        unique_association_fields,
        target,
        variant: Variant {
            id: dbsnp_uri(inputs.rs_id),
            variant_type: VARIANT_TYPE.to_string(),
        },
        disease,
        evidence: GeneticsChains {
            gene2variant,
            variant2disease,
        },
        literature,
    }
}

fn build_somatic(inputs: &EvidenceInputs) -> SomaticEvidence {
    let (key, unique_association_fields, target, disease) =
        shared_parts(inputs, AlleleOrigin::Somatic);
    let provenance = &inputs.provenance;
    let literature = Literature::from_urls(&provenance.literature);

    let evidence = SomaticChain {
        is_associated: true,
        date_asserted: provenance.date_asserted.clone(),
        resource_score: resource_score("probability", SOMATIC_PROBABILITY),
        provenance_type: ProvenanceType {
            expert: Some(Expert {
                status: true,
                statement: EXPERT_STATEMENT.to_string(),
            }),
            database: database(&provenance.db_xref_url),
            literature: literature.clone(),
        },
        evidence_codes: vec![VARIANT_TO_DISEASE_EVIDENCE_CODE.to_string()],
        urls: clinvar_link(&provenance.record_url),
        known_mutations: vec![KnownMutation {
            functional_consequence: inputs.so_term.url(),
            preferred_name: inputs.so_term.name.clone(),
        }],
        clinical_significance: inputs.clinical_significance.to_string(),
    };

    SomaticEvidence {
        key,
        source_id: SOMATIC_SOURCE_ID.to_string(),
        evidence_type: SOMATIC_TYPE.to_string(),
        access_level: ACCESS_LEVEL.to_string(),
        validated_against_schema_version: SCHEMA_VERSION.to_string(),
        unique_association_fields,
        target,
        disease,
        evidence,
        literature,
    }
}
