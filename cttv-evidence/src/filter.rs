use fxhash::FxHashSet;

use cttv_core::ClinvarRecord;
use cttv_io::{ConsequenceLookup, VariantIdLookup};

use crate::context::EligibleRecordContext;
use crate::report::{Counter, RunReport};

/// Why a record does not generate evidence. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Clinical significance outside the allow-list.
    ClinicalSignificance { has_nsv: bool },
    /// Reference allele equals alternate allele.
    SameRefAlt { has_nsv: bool },
    NoRsId,
    NoConsequenceType,
}

impl SkipReason {
    /// Counters bumped when a record is skipped for this reason.
    pub fn counters(&self) -> Vec<Counter> {
        match self {
            SkipReason::ClinicalSignificance { has_nsv } => {
                let mut counters = vec![Counter::SkippedClinSig];
                if *has_nsv {
                    counters.push(Counter::NsvSkippedClinSig);
                }
                counters
            }
            SkipReason::SameRefAlt { has_nsv } => {
                let mut counters = vec![Counter::SameRefAlt];
                if *has_nsv {
                    counters.push(Counter::NsvSkippedSameRefAlt);
                }
                counters
            }
            SkipReason::NoRsId => vec![Counter::NoRsId],
            SkipReason::NoConsequenceType => vec![Counter::NoConsequenceMapping],
        }
    }
}

///
/// Decides which records are eligible for evidence generation.
///
pub struct RecordFilter<'a, V: VariantIdLookup, C: ConsequenceLookup> {
    allowed_clinical_significance: FxHashSet<String>,
    variant_ids: &'a V,
    consequence_types: &'a C,
}

impl<'a, V: VariantIdLookup, C: ConsequenceLookup> RecordFilter<'a, V, C> {
    ///
    /// # Arguments
    ///
    /// - allowed_clinical_significance: accepted significances, compared lower-cased
    /// - variant_ids: RCV accession to rs / nsv ids
    /// - consequence_types: rs id to genes and consequence
    ///
    pub fn new<S: AsRef<str>>(
        allowed_clinical_significance: &[S],
        variant_ids: &'a V,
        consequence_types: &'a C,
    ) -> Self {
        RecordFilter {
            allowed_clinical_significance: allowed_clinical_significance
                .iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .collect(),
            variant_ids,
            consequence_types,
        }
    }

    pub fn is_allowed(&self, clin_sig: &str) -> bool {
        self.allowed_clinical_significance
            .contains(&clin_sig.to_lowercase())
    }

    ///
    /// Evaluate the record without touching any counter.
    ///
    /// Returns the record context when the record is eligible, or the first
    /// reason it is not.
    ///
    pub fn check<'r>(
        &self,
        record: &'r ClinvarRecord,
    ) -> Result<EligibleRecordContext<'r>, SkipReason>
    where
        'a: 'r,
    {
        let has_nsv = self.variant_ids.get_nsv(&record.accession).is_some();

        if !self.is_allowed(&record.clinical_significance) {
            return Err(SkipReason::ClinicalSignificance { has_nsv });
        }

        if record.has_same_ref_alt() {
            return Err(SkipReason::SameRefAlt { has_nsv });
        }

        let variant_ids: &'a V = self.variant_ids;
        let Some(rs_id) = variant_ids.get_rs(&record.accession) else {
            return Err(SkipReason::NoRsId);
        };

        let consequence_types: &'a C = self.consequence_types;
        let Some(consequence_type) = consequence_types.get_consequence_type(rs_id) else {
            return Err(SkipReason::NoConsequenceType);
        };

        Ok(EligibleRecordContext::new(
            record,
            rs_id,
            variant_ids.get_nsv(&record.accession),
            consequence_type,
        ))
    }

    /// Like [`RecordFilter::check`], recording the skip counters in `report`.
    pub fn filter<'r>(
        &self,
        record: &'r ClinvarRecord,
        report: &mut RunReport,
    ) -> Option<EligibleRecordContext<'r>>
    where
        'a: 'r,
    {
        match self.check(record) {
            Ok(context) => Some(context),
            Err(reason) => {
                for counter in reason.counters() {
                    report.record_event(counter);
                }
                None
            }
        }
    }

    /// True when `filter` drops the record. Skip counters are bumped as a side effect.
    pub fn should_skip(&self, record: &ClinvarRecord, report: &mut RunReport) -> bool {
        self.filter(record, report).is_none()
    }
}
