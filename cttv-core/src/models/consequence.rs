use crate::consts::SO_URI_PREFIX;

/// Accession used when a consequence term is not one we know about.
pub const SEQUENCE_VARIANT_ACCESSION: &str = "SO_0001060";

/// Ensembl VEP consequence terms and their Sequence Ontology accessions,
/// ordered from most to least severe.
const SO_TERMS: &[(&str, &str)] = &[
    ("transcript_ablation", "SO_0001893"),
    ("splice_acceptor_variant", "SO_0001574"),
    ("splice_donor_variant", "SO_0001575"),
    ("stop_gained", "SO_0001587"),
    ("frameshift_variant", "SO_0001589"),
    ("stop_lost", "SO_0001578"),
    ("start_lost", "SO_0002012"),
    ("transcript_amplification", "SO_0001889"),
    ("inframe_insertion", "SO_0001821"),
    ("inframe_deletion", "SO_0001822"),
    ("missense_variant", "SO_0001583"),
    ("protein_altering_variant", "SO_0001818"),
    ("splice_region_variant", "SO_0001630"),
    ("incomplete_terminal_codon_variant", "SO_0001626"),
    ("start_retained_variant", "SO_0002019"),
    ("stop_retained_variant", "SO_0001567"),
    ("synonymous_variant", "SO_0001819"),
    ("coding_sequence_variant", "SO_0001580"),
    ("mature_miRNA_variant", "SO_0001620"),
    ("5_prime_UTR_variant", "SO_0001623"),
    ("3_prime_UTR_variant", "SO_0001624"),
    ("non_coding_transcript_exon_variant", "SO_0001792"),
    ("intron_variant", "SO_0001627"),
    ("NMD_transcript_variant", "SO_0001621"),
    ("non_coding_transcript_variant", "SO_0001619"),
    ("upstream_gene_variant", "SO_0001631"),
    ("downstream_gene_variant", "SO_0001632"),
    ("TFBS_ablation", "SO_0001895"),
    ("TFBS_amplification", "SO_0001892"),
    ("TF_binding_site_variant", "SO_0001782"),
    ("regulatory_region_ablation", "SO_0001894"),
    ("regulatory_region_amplification", "SO_0001891"),
    ("feature_elongation", "SO_0001907"),
    ("regulatory_region_variant", "SO_0001566"),
    ("feature_truncation", "SO_0001906"),
    ("intergenic_variant", "SO_0001628"),
];

///
/// A Sequence Ontology consequence term, e.g. `missense_variant`.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoTerm {
    pub name: String,
    pub accession: Option<&'static str>,
}

impl SoTerm {
    pub fn new(name: &str) -> Self {
        let accession = SO_TERMS
            .iter()
            .find(|(term, _)| *term == name)
            .map(|(_, accession)| *accession);

        SoTerm {
            name: name.to_string(),
            accession,
        }
    }

    /// Rank of the term in the severity table, lower is more severe.
    pub fn rank(&self) -> Option<usize> {
        SO_TERMS.iter().position(|(term, _)| *term == self.name)
    }

    /// Full ontology URL, falling back to `sequence_variant` for unknown terms.
    pub fn url(&self) -> String {
        format!(
            "{}{}",
            SO_URI_PREFIX,
            self.accession.unwrap_or(SEQUENCE_VARIANT_ACCESSION)
        )
    }
}

///
/// Genes affected by a variant together with the consequence on them.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsequenceType {
    pub ensembl_gene_ids: Vec<String>,
    pub so_term: SoTerm,
}

impl ConsequenceType {
    pub fn new(ensembl_gene_id: &str, so_term: SoTerm) -> Self {
        ConsequenceType {
            ensembl_gene_ids: vec![ensembl_gene_id.to_string()],
            so_term,
        }
    }

    /// Adds a gene, keeping first-seen order and skipping duplicates.
    pub fn add_ensembl_gene_id(&mut self, ensembl_gene_id: &str) {
        if !self.ensembl_gene_ids.iter().any(|g| g == ensembl_gene_id) {
            self.ensembl_gene_ids.push(ensembl_gene_id.to_string());
        }
    }
}
