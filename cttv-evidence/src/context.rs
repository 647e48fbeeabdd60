use cttv_core::{ClinvarRecord, ConsequenceType};

///
/// Everything evidence expansion needs to know about a record that passed
/// the filter. Built once per record and never changed afterwards.
///
#[derive(Debug, Clone, PartialEq)]
pub struct EligibleRecordContext<'a> {
    pub record: &'a ClinvarRecord,
    /// Lower-cased clinical significance.
    pub clin_sig: String,
    pub rs_id: String,
    pub nsv: Option<String>,
    pub consequence_type: &'a ConsequenceType,
    /// Literature URLs per trait, parallel to `record.traits`.
    pub trait_refs: Vec<Vec<String>>,
    pub observed_refs: Vec<String>,
    pub measure_set_refs: Vec<String>,
}

impl<'a> EligibleRecordContext<'a> {
    pub fn new(
        record: &'a ClinvarRecord,
        rs_id: &str,
        nsv: Option<&str>,
        consequence_type: &'a ConsequenceType,
    ) -> Self {
        EligibleRecordContext {
            record,
            clin_sig: record.clin_sig(),
            rs_id: rs_id.to_string(),
            nsv: nsv.map(str::to_string),
            consequence_type,
            trait_refs: record.trait_refs(),
            observed_refs: record.observed_refs(),
            measure_set_refs: record.measure_set_refs(),
        }
    }

    pub fn has_nsv(&self) -> bool {
        self.nsv.is_some()
    }

    /// All literature of one trait: trait, observation and measure set references.
    pub fn literature_for_trait(&self, trait_index: usize) -> Vec<String> {
        let mut literature: Vec<String> = self
            .trait_refs
            .get(trait_index)
            .cloned()
            .unwrap_or_default();
        literature.extend(self.observed_refs.iter().cloned());
        literature.extend(self.measure_set_refs.iter().cloned());
        literature
    }
}
